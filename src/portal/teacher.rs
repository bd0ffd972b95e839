use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};

use super::round2;
use crate::api::{self, ApiClient, query_pairs};
use crate::error::AppError;
use crate::models::{
    ActionResponse, ChangePasswordRequest, Enrollment, EnrollmentDto, ScheduleTime, SemesterInfo,
    StudentInfo, TeacherProfile, TeacherScheduleInfo,
};
use crate::timetable::{self, GridEvent};

const BASE: &str = "teacher";

/// Result of pushing every student's scores for one class.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreSaveSummary {
    pub saved: usize,
    pub failed: Vec<String>,
    pub total: usize,
}

impl ScoreSaveSummary {
    pub fn message(&self) -> String {
        if self.failed.is_empty() {
            format!("✅ Đã lưu điểm cho tất cả {} sinh viên!", self.saved)
        } else if self.saved == 0 {
            "❌ Lỗi khi lưu điểm cho tất cả sinh viên!".to_string()
        } else {
            format!(
                "⚠️ Đã lưu {}/{} sinh viên. {} lỗi.",
                self.saved,
                self.total,
                self.failed.len()
            )
        }
    }
}

pub struct TeacherPortal {
    api: Arc<dyn ApiClient>,
}

fn path(tail: &str) -> String {
    format!("{}/{}", BASE, tail)
}

impl TeacherPortal {
    pub fn new(api: Arc<dyn ApiClient>) -> Self {
        Self { api }
    }

    pub async fn semesters(&self) -> Vec<SemesterInfo> {
        super::semesters_or_fallback(self.api.as_ref(), &path("semesters")).await
    }

    /// Assigned classes, one entry per course.
    pub async fn classes(&self, semester: Option<&str>) -> Result<Vec<TeacherScheduleInfo>, AppError> {
        let query = query_pairs(&[("semester", semester)]);
        let slots: Vec<TeacherScheduleInfo> =
            api::fetch_list(self.api.as_ref(), &path("classes"), &query)
                .await
                .inspect_err(|e| error!("Load classes failed: {}", e))?;
        Ok(merge_by_course(slots))
    }

    /// Grid events for the raw teaching slots, one per slot.
    pub async fn class_events(&self, semester: Option<&str>) -> Result<Vec<GridEvent>, AppError> {
        let query = query_pairs(&[("semester", semester)]);
        let slots: Vec<TeacherScheduleInfo> =
            api::fetch_list(self.api.as_ref(), &path("classes"), &query).await?;
        Ok(timetable::to_events(&slots))
    }

    pub async fn students_for_class(&self, teaching_id: i64) -> Result<Vec<StudentInfo>, AppError> {
        api::fetch_list(
            self.api.as_ref(),
            &path(&format!("classes/{}/students", teaching_id)),
            &[],
        )
        .await
        .inspect_err(|e| error!("Load students for class {} failed: {}", teaching_id, e))
    }

    /// Sends one student's scores; the student's grade is updated from the
    /// backend's answer when it carries one.
    pub async fn grade_student(
        &self,
        course_id: i64,
        student: &mut StudentInfo,
    ) -> Result<Enrollment, AppError> {
        let request = EnrollmentDto {
            id: None,
            student_id: student.student_id,
            course_id,
            grade: None,
            component_score1: student.component_score1,
            component_score2: student.component_score2,
            final_exam_score: student.final_exam_score,
        };
        let enrollment: Enrollment = api::submit(self.api.as_ref(), &path("grade"), &request).await?;
        if enrollment.grade.is_some() {
            student.grade = enrollment.grade.clone();
        }
        Ok(enrollment)
    }

    pub async fn save_all_scores(&self, course_id: i64, students: &mut [StudentInfo]) -> ScoreSaveSummary {
        let mut summary = ScoreSaveSummary {
            total: students.len(),
            ..Default::default()
        };
        for student in students.iter_mut() {
            match self.grade_student(course_id, student).await {
                Ok(_) => summary.saved += 1,
                Err(e) => {
                    error!("Saving scores for {} failed: {}", student.student_code, e);
                    summary.failed.push(student.student_code.clone());
                }
            }
        }
        if summary.failed.is_empty() {
            info!("saved scores for {} students of course {}", summary.saved, course_id);
        } else {
            warn!("{}", summary.message());
        }
        summary
    }

    pub async fn profile(&self) -> Result<TeacherProfile, AppError> {
        api::fetch(self.api.as_ref(), &path("profile"), &[]).await
    }

    pub async fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> Result<ActionResponse, AppError> {
        super::change_password(self.api.as_ref(), &path("change-password"), request).await
    }
}

/// Collapses the per-slot rows into one row per course, keeping the first
/// slot's day and classroom and listing every slot in `periods`.
pub fn merge_by_course(slots: Vec<TeacherScheduleInfo>) -> Vec<TeacherScheduleInfo> {
    let mut order: Vec<i64> = Vec::new();
    let mut grouped: HashMap<i64, Vec<TeacherScheduleInfo>> = HashMap::new();
    for slot in slots {
        if !grouped.contains_key(&slot.course_id) {
            order.push(slot.course_id);
        }
        grouped.entry(slot.course_id).or_default().push(slot);
    }

    order
        .into_iter()
        .filter_map(|course_id| grouped.remove(&course_id))
        .filter_map(|group| {
            let period = group
                .iter()
                .map(|s| format!("{} ({})", s.day_of_week, s.period))
                .collect::<Vec<_>>()
                .join(", ");
            let periods = group
                .iter()
                .map(|s| ScheduleTime {
                    period: s.period.clone(),
                    day_of_week: s.day_of_week.clone(),
                    classroom: s.classroom.clone(),
                })
                .collect();
            let first = group.into_iter().next()?;
            Some(TeacherScheduleInfo {
                period,
                periods,
                ..first
            })
        })
        .collect()
}

/// Weighted total (30/30/40) as a two-decimal string, or the current grade
/// when no score has been entered.
pub fn calculate_grade(student: &StudentInfo) -> Option<String> {
    let comp1 = student.component_score1.unwrap_or(0.0);
    let comp2 = student.component_score2.unwrap_or(0.0);
    let fin = student.final_exam_score.unwrap_or(0.0);

    if comp1 > 0.0 || comp2 > 0.0 || fin > 0.0 {
        let total = comp1 * 0.3 + comp2 * 0.3 + fin * 0.4;
        Some(round2(total).to_string())
    } else {
        student.grade.clone()
    }
}

pub fn graded_count(students: &[StudentInfo]) -> usize {
    students.iter().filter(|s| s.grade.is_some()).count()
}

pub fn progress_percentage(students: &[StudentInfo]) -> u32 {
    if students.is_empty() {
        return 0;
    }
    (graded_count(students) as f64 / students.len() as f64 * 100.0).round() as u32
}
