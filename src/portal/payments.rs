use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, info, warn};

use crate::api::{self, ApiClient, query_pairs};
use crate::error::AppError;
use crate::models::{
    Payment, PaymentDetail, PaymentStatistics, PaymentStatus, PaymentStatusUpdateRequest,
    PaymentStatusUpdateResponse,
};
use crate::shell::Shell;

const BASE: &str = "admin/payments";

#[derive(Default)]
struct DeskState {
    payments: Vec<Payment>,
    status: Option<PaymentStatus>,
    semester: Option<String>,
    statistics: Option<PaymentStatistics>,
}

/// Admin view over tuition payments: server-side filtered loads, client-side
/// search and status changes.
pub struct PaymentDesk {
    api: Arc<dyn ApiClient>,
    shell: Arc<dyn Shell>,
    state: Mutex<DeskState>,
}

impl PaymentDesk {
    pub fn new(api: Arc<dyn ApiClient>, shell: Arc<dyn Shell>) -> Self {
        Self {
            api,
            shell,
            state: Mutex::new(DeskState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, DeskState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub async fn load(
        &self,
        status: Option<PaymentStatus>,
        semester: Option<&str>,
    ) -> Result<Vec<Payment>, AppError> {
        let query = query_pairs(&[
            ("status", status.as_ref().map(PaymentStatus::as_str)),
            ("semester", semester),
        ]);
        let payments: Vec<Payment> = api::fetch_list(self.api.as_ref(), BASE, &query)
            .await
            .inspect_err(|e| error!("Load payments failed: {}", e))?;
        debug!("loaded {} payments", payments.len());

        let mut state = self.state();
        state.payments = payments.clone();
        state.status = status;
        state.semester = semester.map(str::to_string);
        Ok(payments)
    }

    pub fn payments(&self) -> Vec<Payment> {
        self.state().payments.clone()
    }

    pub fn apply_filters(
        &self,
        search: &str,
        status: Option<PaymentStatus>,
        semester: &str,
    ) -> Vec<Payment> {
        filter_payments(&self.state().payments, search, status, semester)
    }

    pub async fn statistics(&self, semester: Option<&str>) -> Result<PaymentStatistics, AppError> {
        let query = query_pairs(&[("semester", semester)]);
        let statistics: PaymentStatistics =
            api::fetch(self.api.as_ref(), &format!("{}/statistics", BASE), &query)
                .await
                .inspect_err(|e| error!("Load payment statistics failed: {}", e))?;
        self.state().statistics = Some(statistics.clone());
        Ok(statistics)
    }

    /// Statistics from the last successful `statistics` call.
    pub fn last_statistics(&self) -> Option<PaymentStatistics> {
        self.state().statistics.clone()
    }

    pub async fn detail(&self, id: i64) -> Result<PaymentDetail, AppError> {
        api::fetch(self.api.as_ref(), &format!("{}/{}/detail", BASE, id), &[])
            .await
            .inspect_err(|e| error!("Load payment {} detail failed: {}", id, e))
    }

    /// Moves a payment to `new_status` after confirmation, then reloads the
    /// list (with the filters of the last load) and the statistics. `None` when the status is unchanged or
    /// the admin declined.
    pub async fn update_status(
        &self,
        payment: &Payment,
        new_status: PaymentStatus,
        reason: Option<&str>,
    ) -> Result<Option<PaymentStatusUpdateResponse>, AppError> {
        if new_status == payment.status {
            debug!("payment {} already {}", payment.id, new_status.as_str());
            return Ok(None);
        }
        let prompt = format!(
            "🔄 Bạn có chắc chắn muốn thay đổi trạng thái thanh toán từ \"{}\" thành \"{}\"?",
            payment.status.text(),
            new_status.text()
        );
        if !self.shell.confirm(&prompt) {
            return Ok(None);
        }

        let request = PaymentStatusUpdateRequest {
            status: new_status,
            reason: reason.filter(|r| !r.is_empty()).map(str::to_string),
        };
        let response: PaymentStatusUpdateResponse =
            api::replace(self.api.as_ref(), &format!("{}/{}/status", BASE, payment.id), &request)
                .await
                .inspect_err(|e| error!("Update payment {} status failed: {}", payment.id, e))?;

        if response.success {
            info!("payment {} -> {}", payment.id, new_status.as_str());
            let (status, semester) = {
                let state = self.state();
                (state.status, state.semester.clone())
            };
            let _ = self.load(status, semester.as_deref()).await;
            let _ = self.statistics(semester.as_deref()).await;
        } else {
            warn!("payment {} status change refused: {}", payment.id, response.message);
        }
        Ok(Some(response))
    }
}

pub fn status_text(status: PaymentStatus) -> &'static str {
    status.text()
}

/// Search matches the student code or the payment id; status and semester
/// name must match exactly when given.
pub fn filter_payments(
    payments: &[Payment],
    search: &str,
    status: Option<PaymentStatus>,
    semester: &str,
) -> Vec<Payment> {
    let term = search.to_lowercase();
    payments
        .iter()
        .filter(|p| {
            let code = p.student_code.as_deref().unwrap_or_default().to_lowercase();
            let matches_search =
                term.is_empty() || code.contains(&term) || p.id.to_string().contains(&term);
            let matches_status = status.is_none_or(|s| p.status == s);
            let matches_semester =
                semester.is_empty() || p.semester_name.as_deref() == Some(semester);
            matches_search && matches_status && matches_semester
        })
        .cloned()
        .collect()
}
