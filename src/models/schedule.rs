use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    pub course_id: i64,
    pub course_code: String,
    pub course_name: String,
    #[serde(default)]
    pub credit: u32,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub day_of_week: Option<String>,
    #[serde(default)]
    pub lecturer_name: Option<String>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub classroom: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSchedule {
    pub student_id: i64,
    pub student_code: String,
    pub student_name: String,
    pub semester: String,
    #[serde(default)]
    pub total_credits: u32,
    #[serde(default)]
    pub schedule_items: Vec<ScheduleItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleTime {
    pub period: String,
    pub day_of_week: String,
    pub classroom: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentInfo {
    pub student_id: i64,
    pub student_code: String,
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub component_score1: Option<f64>,
    #[serde(default)]
    pub component_score2: Option<f64>,
    #[serde(default)]
    pub final_exam_score: Option<f64>,
}

/// One teaching slot of the signed-in lecturer, with its enrolled students.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherScheduleInfo {
    pub teaching_id: i64,
    pub course_id: i64,
    pub course_code: String,
    pub course_name: String,
    #[serde(default)]
    pub credit: u32,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub day_of_week: String,
    #[serde(default)]
    pub classroom: String,
    #[serde(default)]
    pub periods: Vec<ScheduleTime>,
    #[serde(default)]
    pub students: Vec<StudentInfo>,
}
