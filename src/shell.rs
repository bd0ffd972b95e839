use tracing::info;

use crate::session::Session;

pub const LOGIN_ROUTE: &str = "/login";
pub const LOGOUT_PROMPT: &str = "🚪 Bạn có chắc chắn muốn đăng xuất?";

/// What the hosting UI provides: confirmation dialogs and routing.
pub trait Shell: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
    fn navigate(&self, route: &str);
}

/// Non-interactive shell for scripts: answers every prompt the same way and
/// logs navigation requests.
pub struct HeadlessShell {
    pub auto_confirm: bool,
}

impl Shell for HeadlessShell {
    fn confirm(&self, message: &str) -> bool {
        info!("confirm {:?} -> {}", message, self.auto_confirm);
        self.auto_confirm
    }

    fn navigate(&self, route: &str) {
        info!("navigate to {}", route);
    }
}

/// Clears the session and sends the user to the login page, if confirmed.
pub fn logout(shell: &dyn Shell, session: &Session) -> bool {
    if !shell.confirm(LOGOUT_PROMPT) {
        return false;
    }
    session.clear();
    info!("session cleared");
    shell.navigate(LOGIN_ROUTE);
    true
}
