use std::env;
use std::time::Duration;

use reqwest::Url;

use crate::error::AppError;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SEMESTER: &str = "2024-1";

#[derive(Clone, Debug)]
pub struct PortalConfig {
    pub api_base_url: Url,
    pub request_timeout: Duration,
    pub default_semester: String,
}

impl PortalConfig {
    pub fn new(api_base_url: &str) -> Result<Self, AppError> {
        Ok(Self {
            api_base_url: parse_base_url(api_base_url)?,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_semester: DEFAULT_SEMESTER.to_string(),
        })
    }

    pub fn new_from_env() -> Result<Self, AppError> {
        let base = env::var("PORTAL_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        let timeout_secs = match env::var("PORTAL_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                AppError::Config(format!("PORTAL_TIMEOUT_SECS is not a number: {}", raw))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let default_semester = env::var("PORTAL_DEFAULT_SEMESTER")
            .unwrap_or_else(|_| DEFAULT_SEMESTER.to_string());

        Ok(Self {
            api_base_url: parse_base_url(&base)?,
            request_timeout: Duration::from_secs(timeout_secs),
            default_semester,
        })
    }
}

// A trailing slash keeps `Url::join` from dropping the last path segment.
fn parse_base_url(raw: &str) -> Result<Url, AppError> {
    let trimmed = raw.trim();
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };
    Url::parse(&normalized)
        .map_err(|e| AppError::Config(format!("Invalid PORTAL_API_BASE_URL {}: {}", raw, e)))
}
