use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScholarshipCandidate {
    pub student_id: i64,
    pub student_code: String,
    pub full_name: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub department_name: String,
    pub gpa: f64,
    #[serde(default)]
    pub total_credits: u32,
    #[serde(default)]
    pub completed_credits: u32,
    #[serde(default)]
    pub semester: String,
}
