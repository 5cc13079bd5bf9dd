//! Error types for the session engine

use thiserror::Error;

/// Session engine error types
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("LLM error: {0}")]
    Llm(String),

    #[error("{provider} returned HTTP {status}: {message}")]
    LlmHttp {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("request timed out")]
    Timeout,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// Structured timeout classification; never matches on message text.
    pub fn is_timeout(&self) -> bool {
        match self {
            CoreError::Timeout => true,
            CoreError::Http(e) => e.is_timeout(),
            _ => false,
        }
    }
}

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_classification_is_structural() {
        assert!(CoreError::Timeout.is_timeout());
        assert!(!CoreError::Llm("The read operation timed out".to_string()).is_timeout());
        assert!(
            !CoreError::LlmHttp {
                provider: "openai".to_string(),
                status: 500,
                message: "boom".to_string(),
            }
            .is_timeout()
        );
    }
}
