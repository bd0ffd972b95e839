use serde::{Deserialize, Serialize};

pub const STATUS_COMPLETED: &str = "Đã hoàn thành";
pub const STATUS_IN_PROGRESS: &str = "Đang học";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeItem {
    pub course_id: i64,
    pub course_code: String,
    pub course_name: String,
    #[serde(default)]
    pub credit: u32,
    #[serde(default)]
    pub component_score1: Option<f64>,
    #[serde(default)]
    pub component_score2: Option<f64>,
    #[serde(default)]
    pub final_exam_score: Option<f64>,
    #[serde(default)]
    pub total_score: Option<f64>,
    #[serde(default)]
    pub score_coefficient4: Option<f64>,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub semester: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentGrades {
    pub student_id: i64,
    pub student_code: String,
    pub student_name: String,
    #[serde(default)]
    pub gpa: f64,
    #[serde(default)]
    pub total_credits: u32,
    #[serde(default)]
    pub completed_credits: u32,
    #[serde(default)]
    pub grade_items: Vec<GradeItem>,
    #[serde(default)]
    pub total_courses: u32,
    #[serde(default)]
    pub completed_courses: u32,
    #[serde(default)]
    pub in_progress_courses: u32,
}

/// Scores submitted by a lecturer for one student in one course.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub student_id: i64,
    pub course_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    pub component_score1: Option<f64>,
    pub component_score2: Option<f64>,
    pub final_exam_score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    #[serde(default)]
    pub grade: Option<String>,
}
