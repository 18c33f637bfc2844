//! LLM error types

use thiserror::Error;

/// Errors that can occur during LLM operations
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API key not found: set the {0} environment variable")]
    MissingApiKey(String),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LlmError {
    /// Check if this is a configuration problem (vs a transient one)
    ///
    /// Configuration errors will reproduce on resend, so the REPL points the
    /// user at their setup instead of suggesting a retry.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            LlmError::MissingApiKey(_) | LlmError::ApiError { status: 401 | 403, .. }
        )
    }
}
