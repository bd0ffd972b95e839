use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{User, lenient_string, trimmed};
use super::user::ROLE_LECTURER;
use crate::api::ApiClient;
use crate::list::{Entity, ListController, Lookups, SaveMode, id_set, refresh_list, resolve_label};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lecturer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub lecturer_code: String,
}

/// Lecturer joined with its user record, as served by `lecturers/with-details`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LecturerDetails {
    pub id: i64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub lecturer_code: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub department: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
}

impl LecturerDetails {
    pub fn label(&self) -> String {
        match self.full_name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.lecturer_code.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LecturerLookups {
    pub users: Vec<User>,
}

impl LecturerLookups {
    pub fn user_name(&self, user_id: Option<i64>) -> String {
        resolve_label(user_id, &self.users, |u| u.id, User::label)
    }
}

#[async_trait]
impl Lookups for LecturerLookups {
    async fn refresh(&self, api: &dyn ApiClient) -> Self {
        Self {
            users: refresh_list(api, "user", &self.users).await,
        }
    }
}

impl Entity for Lecturer {
    type Lookups = LecturerLookups;

    const RESOURCE: &'static str = "lecturers";
    const DELETE_PROMPT: &'static str =
        "⚠️ Bạn có chắc chắn muốn xóa giảng viên này?\n\nThao tác này không thể hoàn tác!";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn payload(&self) -> Self {
        Self {
            id: None,
            user_id: id_set(self.user_id),
            lecturer_code: trimmed(&self.lecturer_code),
        }
    }

    fn missing_required(&self, _mode: SaveMode) -> Option<&'static str> {
        if self.user_id.is_none() {
            Some("userId")
        } else if self.lecturer_code.is_empty() {
            Some("lecturerCode")
        } else {
            None
        }
    }

    fn search_fields(&self, lookups: &LecturerLookups) -> Vec<String> {
        vec![lookups.user_name(self.user_id), self.lecturer_code.clone()]
    }
}

/// Users with the lecturer role that no lecturer record claims yet. The user
/// bound to the current draft stays selectable.
pub fn available_users(users: &[User], lecturers: &[Lecturer], current: Option<i64>) -> Vec<User> {
    let taken: HashSet<i64> = lecturers.iter().filter_map(|l| l.user_id).collect();
    let current = id_set(current);
    users
        .iter()
        .filter(|u| {
            let is_lecturer = u.role_id.unwrap_or(0) == ROLE_LECTURER;
            let is_taken = u.id.is_some_and(|id| taken.contains(&id));
            let is_current = current.is_some() && u.id == current;
            is_lecturer && (!is_taken || is_current)
        })
        .cloned()
        .collect()
}

impl ListController<Lecturer> {
    pub fn available_users(&self) -> Vec<User> {
        available_users(
            &self.lookups().users,
            &self.items(),
            self.draft().user_id,
        )
    }
}
