use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{Department, lenient_string, trimmed};
use crate::api::ApiClient;
use crate::list::{Entity, Lookups, SaveMode, id_set, refresh_list, resolve_label};

pub const ROLE_PRINCIPAL: i64 = 1;
pub const ROLE_LECTURER: i64 = 2;
pub const ROLE_STUDENT: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Role {
    pub id: i64,
    pub name: &'static str,
}

/// Roles are fixed server-side; the portal never fetches them.
pub const ROLES: [Role; 3] = [
    Role { id: ROLE_LECTURER, name: "ROLE_GIẢNG_VIÊN" },
    Role { id: ROLE_PRINCIPAL, name: "ROLE_HIỆU_TRƯỞNG" },
    Role { id: ROLE_STUDENT, name: "ROLE_SINH_VIÊN" },
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
            Gender::Other => "OTHER",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Nam",
            Gender::Female => "Nữ",
            Gender::Other => "Khác",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub username: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub password: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub full_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(default)]
    pub role_id: Option<i64>,
    #[serde(default)]
    pub department_id: Option<i64>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date_of_birth: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub address: String,
}

impl User {
    pub fn label(&self) -> String {
        format!("{} ({})", self.username, self.full_name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserLookups {
    pub departments: Vec<Department>,
}

impl UserLookups {
    pub fn role_name(&self, role_id: Option<i64>) -> String {
        resolve_label(role_id, &ROLES, |r| Some(r.id), |r| r.name.to_string())
    }

    pub fn department_name(&self, department_id: Option<i64>) -> String {
        resolve_label(department_id, &self.departments, |d| d.id, Department::label)
    }
}

#[async_trait]
impl Lookups for UserLookups {
    async fn refresh(&self, api: &dyn ApiClient) -> Self {
        Self {
            departments: refresh_list(api, "departments", &self.departments).await,
        }
    }
}

impl Entity for User {
    type Lookups = UserLookups;

    const RESOURCE: &'static str = "user";
    const DELETE_PROMPT: &'static str =
        "⚠️ Bạn có chắc chắn muốn xóa user này?\n\nThao tác này không thể hoàn tác!";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn payload(&self) -> Self {
        Self {
            id: None,
            username: trimmed(&self.username),
            password: trimmed(&self.password),
            full_name: trimmed(&self.full_name),
            email: trimmed(&self.email),
            role_id: id_set(self.role_id),
            department_id: id_set(self.department_id),
            gender: Some(self.gender.unwrap_or_default()),
            phone: trimmed(&self.phone),
            date_of_birth: self.date_of_birth.trim().chars().take(10).collect(),
            address: trimmed(&self.address),
        }
    }

    fn missing_required(&self, mode: SaveMode) -> Option<&'static str> {
        if self.username.is_empty() {
            Some("username")
        } else if self.full_name.is_empty() {
            Some("fullName")
        } else if self.email.is_empty() {
            Some("email")
        } else if self.role_id.is_none() {
            Some("roleId")
        } else if mode == SaveMode::Create && self.password.is_empty() {
            Some("password")
        } else {
            None
        }
    }

    fn search_fields(&self, lookups: &UserLookups) -> Vec<String> {
        vec![
            self.username.clone(),
            self.full_name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.date_of_birth.clone(),
            self.address.clone(),
            lookups.role_name(self.role_id),
            lookups.department_name(self.department_id),
            self.gender.map(|g| g.as_str().to_string()).unwrap_or_default(),
        ]
    }
}
