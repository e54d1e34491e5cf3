use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    Validation,
    RateLimited,
    Internal,
    /// Codes introduced server-side after this client was built.
    #[serde(other)]
    Unknown,
}

/// Structured error body the content API attaches to non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize, Error)]
#[error("content api error ({code:?}): {message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}
