use serde::{Deserialize, Serialize};

use super::lenient_string;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub course_code: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
}

impl Course {
    pub fn label(&self) -> String {
        format!("{} - {}", self.course_code, self.name)
    }
}

/// A course as offered on the student registration page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseInfo {
    pub course_id: i64,
    pub course_code: String,
    pub course_name: String,
    pub credit: u32,
    #[serde(default)]
    pub can_register: bool,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub available_slots: Option<u32>,
    #[serde(default)]
    pub max_slots: Option<u32>,
    #[serde(default)]
    pub lecturer_name: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub day_of_week: Option<String>,
    #[serde(default)]
    pub classroom: Option<String>,
    #[serde(default)]
    pub semester: Option<String>,
    #[serde(default)]
    pub can_unregister: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRegistrationRequest {
    pub course_id: i64,
    pub semester: String,
}
