use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Another request is still in flight")]
    Busy,
}

impl AppError {
    /// Message suitable for the page's visible error line.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Status { status, .. } => format!(
                "{} - {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            ),
            AppError::Transport(_) => "Network error".to_string(),
            AppError::Decode(_) => "Unexpected response from server".to_string(),
            AppError::Config(msg) => msg.clone(),
            AppError::NotFound(what) => format!("{} not found", what),
            AppError::Busy => "Please wait for the current request to finish".to_string(),
        }
    }
}
