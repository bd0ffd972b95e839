//! Role-specific views over the backend: student self-service, lecturer
//! grading, the admin payments desk and the scholarship board.

mod payments;
mod scholarship;
mod student;
mod teacher;

use tracing::{error, warn};

use crate::api::{self, ApiClient};
use crate::error::AppError;
use crate::models::{ActionResponse, ChangePasswordRequest, SemesterInfo};

pub use payments::{PaymentDesk, filter_payments, status_text};
pub use scholarship::{ScholarshipBoard, average_gpa, completion_rate, top_gpa};
pub use student::{
    CREATE_PAYMENT_PROMPT, RegistrationBoard, StudentPortal, StudentTimetable, completion_percentage,
    count_with_grade, filter_grades, gpa_classification,
};
pub use teacher::{
    ScoreSaveSummary, TeacherPortal, calculate_grade, graded_count, merge_by_course,
    progress_percentage,
};

/// Semester list for a portal, or the built-in list when it cannot be fetched.
pub(crate) async fn semesters_or_fallback(api: &dyn ApiClient, path: &str) -> Vec<SemesterInfo> {
    match api::fetch_list::<SemesterInfo>(api, path, &[]).await {
        Ok(semesters) => semesters,
        Err(e) => {
            error!("Load {} failed, using built-in semesters: {}", path, e);
            SemesterInfo::fallback()
        }
    }
}

pub(crate) async fn change_password(
    api: &dyn ApiClient,
    path: &str,
    request: &ChangePasswordRequest,
) -> Result<ActionResponse, AppError> {
    if let Some(problem) = request.problem() {
        return Ok(ActionResponse::rejected(problem));
    }
    let response: ActionResponse = api::submit(api, path, request).await?;
    if !response.success {
        warn!("password change refused: {}", response.message);
    }
    Ok(response)
}

/// Rounds to two decimals, half away from zero.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
