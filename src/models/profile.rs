use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub student_id: i64,
    pub student_code: String,
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub major: String,
    #[serde(default)]
    pub academic_year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherProfile {
    pub lecturer_id: i64,
    pub lecturer_code: String,
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub specialization: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub new_password: String,
    pub confirm_password: String,
}

pub const MIN_PASSWORD_LEN: usize = 6;

impl ChangePasswordRequest {
    pub fn new(new_password: &str, confirm_password: &str) -> Self {
        Self {
            new_password: new_password.to_string(),
            confirm_password: confirm_password.to_string(),
        }
    }

    /// Reason the request would be refused before it reaches the backend.
    pub fn problem(&self) -> Option<&'static str> {
        if self.new_password.is_empty() {
            Some("Vui lòng nhập mật khẩu mới")
        } else if self.new_password.chars().count() < MIN_PASSWORD_LEN {
            Some("Mật khẩu mới phải có ít nhất 6 ký tự")
        } else if self.new_password != self.confirm_password {
            Some("Xác nhận mật khẩu không khớp")
        } else {
            None
        }
    }
}

/// `{ success, message }` answer used by registration and password endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

impl ActionResponse {
    pub fn rejected(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
        }
    }
}
