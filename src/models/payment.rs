use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Paid => "PAID",
            PaymentStatus::Failed => "FAILED",
            PaymentStatus::Unknown => "UNKNOWN",
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Đã thanh toán",
            PaymentStatus::Pending => "Chờ thanh toán",
            PaymentStatus::Failed => "Thanh toán thất bại",
            PaymentStatus::Unknown => "Không xác định",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "status-paid",
            PaymentStatus::Pending => "status-pending",
            PaymentStatus::Failed => "status-failed",
            PaymentStatus::Unknown => "status-unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i64,
    pub student_id: i64,
    #[serde(default)]
    pub student_code: Option<String>,
    pub semester_id: i64,
    #[serde(default)]
    pub semester_name: Option<String>,
    #[serde(default)]
    pub payment_date: Option<String>,
    pub status: PaymentStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursePaymentDetail {
    pub course_id: i64,
    pub course_code: String,
    pub course_name: String,
    #[serde(default)]
    pub credits: u32,
    #[serde(default)]
    pub fee: f64,
    #[serde(default)]
    pub enrollment_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetail {
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    #[serde(default)]
    pub student_class: String,
    pub semester_id: i64,
    pub semester_name: String,
    #[serde(default)]
    pub payment_date: Option<String>,
    pub status: PaymentStatus,
    #[serde(default)]
    pub courses: Vec<CoursePaymentDetail>,
    #[serde(default)]
    pub total_amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatistics {
    pub total_payments: u64,
    pub paid_payments: u64,
    pub pending_payments: u64,
    pub failed_payments: u64,
    pub total_amount: f64,
    pub paid_amount: f64,
    pub pending_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusUpdateRequest {
    pub status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusUpdateResponse {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub payment: Option<Payment>,
}

/// Tuition summary for one semester as seen by the student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    pub semester_id: i64,
    pub semester: String,
    #[serde(default)]
    pub semester_display_name: String,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub paid_amount: f64,
    #[serde(default)]
    pub remaining_amount: f64,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub payment_date: Option<String>,
    #[serde(default)]
    pub course_details: Vec<CoursePaymentDetail>,
}
