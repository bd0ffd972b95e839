use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: Option<i64>,
    pub username: String,
    pub full_name: String,
    pub role_id: Option<i64>,
}

/// Authentication markers shared by every controller of one signed-in shell.
#[derive(Debug, Default)]
pub struct Session {
    inner: RwLock<SessionData>,
}

#[derive(Debug, Default, Clone)]
struct SessionData {
    token: Option<String>,
    user: Option<SessionUser>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(token: impl Into<String>, user: SessionUser) -> Self {
        Self {
            inner: RwLock::new(SessionData {
                token: Some(token.into()),
                user: Some(user),
            }),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .token
            .clone()
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .user
            .clone()
    }

    /// Display name for page headers, falling back to the portal's default.
    pub fn display_name(&self, fallback: &str) -> String {
        self.user()
            .map(|u| u.full_name)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }

    pub fn set(&self, token: impl Into<String>, user: SessionUser) {
        let mut data = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        data.token = Some(token.into());
        data.user = Some(user);
    }

    /// Token without a user profile, for scripted access.
    pub fn set_token(&self, token: impl Into<String>) {
        self.inner.write().unwrap_or_else(PoisonError::into_inner).token = Some(token.into());
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn clear(&self) {
        let mut data = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *data = SessionData::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> SessionUser {
        SessionUser {
            id: Some(7),
            username: "sv001".to_string(),
            full_name: "Nguyễn Văn A".to_string(),
            role_id: Some(3),
        }
    }

    #[test]
    fn clear_drops_token_and_user() {
        let session = Session::signed_in("abc", student());
        assert!(session.is_authenticated());
        assert_eq!(session.display_name("Sinh viên"), "Nguyễn Văn A");

        session.clear();

        assert!(!session.is_authenticated());
        assert_eq!(session.user(), None);
        assert_eq!(session.display_name("Sinh viên"), "Sinh viên");
    }
}
