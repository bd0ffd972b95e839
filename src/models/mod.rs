pub mod class;
pub mod course;
pub mod department;
pub mod grade;
pub mod lecturer;
pub mod payment;
pub mod profile;
pub mod schedule;
pub mod scholarship;
pub mod semester;
pub mod teaching;
pub mod user;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub use class::ClassEntity;
pub use course::{Course, CourseInfo, CourseRegistrationRequest};
pub use department::Department;
pub use grade::{Enrollment, EnrollmentDto, GradeItem, StudentGrades};
pub use lecturer::{Lecturer, LecturerDetails, LecturerLookups};
pub use payment::{
    CoursePaymentDetail, Payment, PaymentDetail, PaymentInfo, PaymentStatistics, PaymentStatus,
    PaymentStatusUpdateRequest, PaymentStatusUpdateResponse,
};
pub use profile::{ActionResponse, ChangePasswordRequest, StudentProfile, TeacherProfile};
pub use schedule::{ScheduleItem, ScheduleTime, StudentInfo, StudentSchedule, TeacherScheduleInfo};
pub use scholarship::ScholarshipCandidate;
pub use semester::{Semester, SemesterInfo};
pub use teaching::{Teaching, TeachingLookups};
pub use user::{Gender, Role, User, UserLookups, ROLES};

/// Accepts a string, a number or null, so `"2024"`, `2024` and `null` all
/// land in a `String` field.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

pub(crate) fn trimmed(value: &str) -> String {
    value.trim().to_string()
}
