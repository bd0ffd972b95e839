#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use campus_portal::api::MemoryApiClient;
use campus_portal::list::{Entity, ListController};
use campus_portal::session::{Session, SessionUser};
use campus_portal::shell::Shell;

/// Shell double that answers prompts with a fixed choice and records what
/// it was asked.
pub struct RecordingShell {
    answer: AtomicBool,
    pub prompts: Mutex<Vec<String>>,
    pub routes: Mutex<Vec<String>>,
}

impl RecordingShell {
    pub fn new(answer: bool) -> Self {
        Self {
            answer: AtomicBool::new(answer),
            prompts: Mutex::new(Vec::new()),
            routes: Mutex::new(Vec::new()),
        }
    }

    pub fn answer(&self, yes: bool) {
        self.answer.store(yes, Ordering::SeqCst);
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().unwrap().clone()
    }
}

impl Shell for RecordingShell {
    fn confirm(&self, message: &str) -> bool {
        self.prompts.lock().unwrap().push(message.to_string());
        self.answer.load(Ordering::SeqCst)
    }

    fn navigate(&self, route: &str) {
        self.routes.lock().unwrap().push(route.to_string());
    }
}

pub fn admin_session() -> Arc<Session> {
    Arc::new(Session::signed_in(
        "token-123",
        SessionUser {
            id: Some(1),
            username: "admin".to_string(),
            full_name: "Quản trị viên".to_string(),
            role_id: Some(1),
        },
    ))
}

pub struct Harness<E: Entity> {
    pub api: Arc<MemoryApiClient>,
    pub shell: Arc<RecordingShell>,
    pub session: Arc<Session>,
    pub controller: Arc<ListController<E>>,
}

pub fn harness<E: Entity>(api: MemoryApiClient, confirm: bool) -> Harness<E> {
    let api = Arc::new(api);
    let shell = Arc::new(RecordingShell::new(confirm));
    let session = admin_session();
    let controller = Arc::new(ListController::new(api.clone(), shell.clone(), session.clone()));
    Harness {
        api,
        shell,
        session,
        controller,
    }
}
