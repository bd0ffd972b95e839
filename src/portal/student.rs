use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::api::{self, ApiClient, query_pairs};
use crate::error::AppError;
use crate::models::grade::STATUS_COMPLETED;
use crate::models::{
    ActionResponse, ChangePasswordRequest, CourseInfo, CourseRegistrationRequest, GradeItem,
    PaymentInfo, SemesterInfo, StudentGrades, StudentProfile, StudentSchedule,
};
use crate::shell::Shell;
use crate::timetable::{self, GridEvent};

const BASE: &str = "student";
pub const CREATE_PAYMENT_PROMPT: &str =
    "🏦 Bạn có chắc chắn muốn tạo yêu cầu thanh toán cho học kỳ này?";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentTimetable {
    pub schedule: StudentSchedule,
    pub events: Vec<GridEvent>,
}

/// Courses the student may pick this semester, next to the ones that are
/// already settled.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RegistrationBoard {
    pub available: Vec<CourseInfo>,
    pub enrolled: Vec<CourseInfo>,
    pub completed: Vec<CourseInfo>,
}

impl RegistrationBoard {
    pub fn enrolled_credits(&self) -> u32 {
        self.enrolled.iter().map(|c| c.credit).sum()
    }

    pub fn registrable_count(&self) -> usize {
        self.available.iter().filter(|c| c.can_register).count()
    }
}

pub struct StudentPortal {
    api: Arc<dyn ApiClient>,
    shell: Arc<dyn Shell>,
}

fn path(tail: &str) -> String {
    format!("{}/{}", BASE, tail)
}

impl StudentPortal {
    pub fn new(api: Arc<dyn ApiClient>, shell: Arc<dyn Shell>) -> Self {
        Self { api, shell }
    }

    pub async fn semesters(&self) -> Vec<SemesterInfo> {
        super::semesters_or_fallback(self.api.as_ref(), &path("semesters")).await
    }

    pub async fn schedule(&self, semester: &str) -> Result<StudentTimetable, AppError> {
        let schedule: StudentSchedule =
            api::fetch(self.api.as_ref(), &path("schedule"), &[("semester", semester)])
                .await
                .inspect_err(|e| error!("Load schedule for {} failed: {}", semester, e))?;
        let events = timetable::to_events(&schedule.schedule_items);
        debug!("{} events for {}", events.len(), semester);
        Ok(StudentTimetable { schedule, events })
    }

    pub async fn grades(&self, semester: Option<&str>) -> Result<StudentGrades, AppError> {
        let query = query_pairs(&[("semester", semester)]);
        api::fetch(self.api.as_ref(), &path("grades"), &query)
            .await
            .inspect_err(|e| error!("Load grades failed: {}", e))
    }

    pub async fn registration_board(&self, semester: &str) -> Result<RegistrationBoard, AppError> {
        // Completed courses come from the full transcript; a missing
        // transcript only means nothing is excluded.
        let completed: Vec<CourseInfo> = match self.grades(None).await {
            Ok(grades) => completed_courses(&grades.grade_items),
            Err(_) => Vec::new(),
        };

        let offered: Vec<CourseInfo> = api::fetch_list(
            self.api.as_ref(),
            &path("available-courses"),
            &[("semester", semester)],
        )
        .await
        .inspect_err(|e| error!("Load available courses failed: {}", e))?;

        Ok(build_board(offered, completed))
    }

    pub async fn register_course(
        &self,
        course_id: i64,
        semester: &str,
    ) -> Result<ActionResponse, AppError> {
        let request = CourseRegistrationRequest {
            course_id,
            semester: semester.to_string(),
        };
        let response: ActionResponse =
            api::submit(self.api.as_ref(), &path("register-course"), &request)
                .await
                .inspect_err(|e| error!("Register course {} failed: {}", course_id, e))?;
        if response.success {
            info!("registered course {} for {}", course_id, semester);
        } else {
            warn!("registration of {} refused: {}", course_id, response.message);
        }
        Ok(response)
    }

    /// `None` when the student declined the confirmation.
    pub async fn unregister_course(
        &self,
        course: &CourseInfo,
    ) -> Result<Option<ActionResponse>, AppError> {
        let prompt = format!(
            "🤔 Bạn có chắc chắn muốn hủy đăng ký môn \"{}\" ({})?",
            course.course_name, course.course_code
        );
        if !self.shell.confirm(&prompt) {
            return Ok(None);
        }
        let text = self
            .api
            .delete(&path(&format!("courses/{}", course.course_id)))
            .await
            .inspect_err(|e| error!("Unregister course {} failed: {}", course.course_id, e))?;
        let response: ActionResponse = serde_json::from_str(&text)?;
        info!("unregister {}: {}", course.course_id, response.message);
        Ok(Some(response))
    }

    pub async fn payment_info(&self, semester: Option<&str>) -> Result<PaymentInfo, AppError> {
        let query = query_pairs(&[("semester", semester)]);
        api::fetch(self.api.as_ref(), &path("payment"), &query)
            .await
            .inspect_err(|e| error!("Load payment info failed: {}", e))
    }

    pub async fn all_payment_info(&self) -> Result<Vec<PaymentInfo>, AppError> {
        api::fetch_list(self.api.as_ref(), &path("payment/all"), &[])
            .await
            .inspect_err(|e| error!("Load all payment info failed: {}", e))
    }

    /// Opens a tuition payment request. `None` when not confirmed.
    pub async fn create_payment(&self, semester: Option<&str>) -> Result<Option<String>, AppError> {
        if !self.shell.confirm(CREATE_PAYMENT_PROMPT) {
            return Ok(None);
        }
        let query = query_pairs(&[("semester", semester)]);
        let ack = self
            .api
            .post(&path("payment/create"), &query, None)
            .await
            .inspect_err(|e| error!("Create payment failed: {}", e))?;
        info!("payment request created: {}", ack);
        Ok(Some(ack))
    }

    pub async fn profile(&self) -> Result<StudentProfile, AppError> {
        api::fetch(self.api.as_ref(), &path("profile"), &[]).await
    }

    pub async fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> Result<ActionResponse, AppError> {
        super::change_password(self.api.as_ref(), &path("change-password"), request).await
    }
}

fn completed_courses(items: &[GradeItem]) -> Vec<CourseInfo> {
    items
        .iter()
        .filter(|item| item.status == STATUS_COMPLETED || item.grade.is_some())
        .map(|item| CourseInfo {
            course_id: item.course_id,
            course_code: item.course_code.clone(),
            course_name: item.course_name.clone(),
            credit: item.credit,
            can_register: false,
            reason: Some(STATUS_COMPLETED.to_string()),
            ..Default::default()
        })
        .collect()
}

fn build_board(offered: Vec<CourseInfo>, completed: Vec<CourseInfo>) -> RegistrationBoard {
    let done: HashSet<i64> = completed.iter().map(|c| c.course_id).collect();
    let (enrolled, rest): (Vec<_>, Vec<_>) = offered
        .into_iter()
        .filter(|c| !done.contains(&c.course_id))
        .partition(|c| c.can_unregister == Some(true));
    RegistrationBoard {
        available: rest,
        enrolled,
        completed,
    }
}

/// Transcript rows matching a course code/name search plus exact status and
/// semester filters. Empty filters match everything.
pub fn filter_grades(items: &[GradeItem], search: &str, status: &str, semester: &str) -> Vec<GradeItem> {
    let term = search.to_lowercase();
    items
        .iter()
        .filter(|item| {
            let matches_search = term.is_empty()
                || item.course_code.to_lowercase().contains(&term)
                || item.course_name.to_lowercase().contains(&term);
            let matches_status = status.is_empty() || item.status == status;
            let matches_semester = semester.is_empty() || item.semester == semester;
            matches_search && matches_status && matches_semester
        })
        .cloned()
        .collect()
}

pub fn gpa_classification(gpa: f64) -> &'static str {
    match gpa {
        g if g >= 3.6 => "Xuất sắc",
        g if g >= 3.2 => "Giỏi",
        g if g >= 2.5 => "Khá",
        g if g >= 2.0 => "Trung bình",
        _ => "Yếu",
    }
}

pub fn completion_percentage(grades: &StudentGrades) -> f64 {
    if grades.total_credits == 0 {
        return 0.0;
    }
    grades.completed_credits as f64 / grades.total_credits as f64 * 100.0
}

pub fn count_with_grade(items: &[GradeItem], grade: &str) -> usize {
    items
        .iter()
        .filter(|item| item.grade.as_deref() == Some(grade))
        .count()
}
