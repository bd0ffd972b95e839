use std::sync::Arc;

use tracing::{error, info};

use crate::api::{self, ApiClient, query_pairs};
use crate::error::AppError;
use crate::models::{Department, ScholarshipCandidate, SemesterInfo};

const BASE: &str = "admin/enrollments";

/// Students eligible for a scholarship (GPA >= 3.6), by department and semester.
pub struct ScholarshipBoard {
    api: Arc<dyn ApiClient>,
}

impl ScholarshipBoard {
    pub fn new(api: Arc<dyn ApiClient>) -> Self {
        Self { api }
    }

    pub async fn departments(&self) -> Result<Vec<Department>, AppError> {
        api::fetch_list(self.api.as_ref(), &format!("{}/departments", BASE), &[])
            .await
            .inspect_err(|e| error!("Load departments failed: {}", e))
    }

    pub async fn semesters(&self) -> Result<Vec<SemesterInfo>, AppError> {
        api::fetch_list(self.api.as_ref(), &format!("{}/semesters", BASE), &[])
            .await
            .inspect_err(|e| error!("Load semesters failed: {}", e))
    }

    pub async fn eligible(
        &self,
        department_id: Option<i64>,
        semester: Option<&str>,
    ) -> Result<Vec<ScholarshipCandidate>, AppError> {
        let department = department_id.filter(|&id| id != 0).map(|id| id.to_string());
        let query = query_pairs(&[("departmentId", department.as_deref()), ("semester", semester)]);
        let candidates: Vec<ScholarshipCandidate> = api::fetch_list(
            self.api.as_ref(),
            &format!("{}/scholarships/eligible-students", BASE),
            &query,
        )
        .await
        .inspect_err(|e| error!("Load scholarship candidates failed: {}", e))?;
        info!("{} students eligible for a scholarship", candidates.len());
        Ok(candidates)
    }
}

pub fn average_gpa(candidates: &[ScholarshipCandidate]) -> f64 {
    if candidates.is_empty() {
        return 0.0;
    }
    candidates.iter().map(|c| c.gpa).sum::<f64>() / candidates.len() as f64
}

pub fn top_gpa(candidates: &[ScholarshipCandidate]) -> f64 {
    candidates.iter().map(|c| c.gpa).fold(0.0, f64::max)
}

pub fn completion_rate(candidate: &ScholarshipCandidate) -> f64 {
    if candidate.total_credits == 0 {
        return 0.0;
    }
    candidate.completed_credits as f64 / candidate.total_credits as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(gpa: f64, completed: u32, total: u32) -> ScholarshipCandidate {
        ScholarshipCandidate {
            gpa,
            completed_credits: completed,
            total_credits: total,
            ..Default::default()
        }
    }

    #[test]
    fn gpa_statistics() {
        let list = vec![candidate(3.6, 0, 0), candidate(4.0, 0, 0), candidate(3.8, 0, 0)];
        assert!((average_gpa(&list) - 3.8).abs() < 1e-9);
        assert_eq!(top_gpa(&list), 4.0);
        assert_eq!(average_gpa(&[]), 0.0);
        assert_eq!(top_gpa(&[]), 0.0);
    }

    #[test]
    fn completion_rate_of_candidate() {
        assert_eq!(completion_rate(&candidate(3.9, 60, 120)), 50.0);
        assert_eq!(completion_rate(&candidate(3.9, 10, 0)), 0.0);
    }
}
