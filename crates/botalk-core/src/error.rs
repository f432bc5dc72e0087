//! Error Types

use thiserror::Error;

/// Result type alias for chat operations
pub type Result<T> = std::result::Result<T, ChatError>;

/// Errors raised on the remote generation path.
///
/// None of these reach the end user: the orchestrator absorbs every one of
/// them and answers from the local fact base instead.
#[derive(Error, Debug)]
pub enum ChatError {
    /// Network-level failure talking to the generation service
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with a non-2xx status or an error payload
    #[error("Service error ({status}): {message}")]
    Service { status: u16, message: String },

    /// A 2xx payload without the expected text field
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The remote call exceeded its time budget (milliseconds)
    #[error("Timed out after {0}ms")]
    Timeout(u64),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other/unknown error
    #[error("{0}")]
    Other(String),
}

impl ChatError {
    /// Check if error is retryable
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout(_) | Self::Io(_) => true,
            Self::Service { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable() {
        assert!(ChatError::Transport("reset".into()).is_retryable());
        assert!(ChatError::Service { status: 503, message: "busy".into() }.is_retryable());
        assert!(ChatError::Service { status: 429, message: "quota".into() }.is_retryable());
        assert!(!ChatError::Service { status: 400, message: "bad".into() }.is_retryable());
        assert!(!ChatError::MalformedResponse("no candidates".into()).is_retryable());
    }

    #[test]
    fn test_display() {
        let err = ChatError::Service { status: 403, message: "API key invalid".into() };
        assert_eq!(err.to_string(), "Service error (403): API key invalid");
        assert_eq!(ChatError::Timeout(50).to_string(), "Timed out after 50ms");
    }
}
