// src/error.rs
// Error types for groq-chat

use std::fmt;
use thiserror::Error;

/// Why a completion call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    Network,
    Auth,
    Quota,
    Malformed,
    Unknown,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => write!(f, "network"),
            Self::Auth => write!(f, "authentication"),
            Self::Quota => write!(f, "quota"),
            Self::Malformed => write!(f, "malformed response"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Any failure surfaced by the hosted completion client.
///
/// Stops at the invoker boundary; callers turn it into a notice and leave
/// history untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason} error: {message}")]
pub struct CompletionFailure {
    pub reason: FailureReason,
    pub message: String,
}

impl CompletionFailure {
    pub fn new(reason: FailureReason, message: impl Into<String>) -> Self {
        Self {
            reason,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(FailureReason::Network, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(FailureReason::Malformed, message)
    }

    /// Classify a non-success HTTP status from the provider
    pub fn from_status(status: u16, body: &str) -> Self {
        let reason = match status {
            401 | 403 => FailureReason::Auth,
            429 => FailureReason::Quota,
            _ => FailureReason::Unknown,
        };
        Self::new(reason, format!("API error {}: {}", status, body))
    }
}

/// Main error type for the groq-chat library
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("missing API key: {0}")]
    MissingCredential(String),

    #[error(transparent)]
    Completion(#[from] CompletionFailure),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Result using ChatError
pub type Result<T> = std::result::Result<T, ChatError>;

impl ChatError {
    /// Convert to the string shown in the page
    pub fn to_user_string(&self) -> String {
        match self {
            Self::MissingCredential(_) => {
                "Please enter your Groq API Key to start the chat.".to_string()
            }
            Self::Completion(failure) => format!("Error: {}", failure),
            other => other.to_string(),
        }
    }

    pub fn is_missing_credential(&self) -> bool {
        matches!(self, Self::MissingCredential(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_classification() {
        assert_eq!(
            CompletionFailure::from_status(401, "bad key").reason,
            FailureReason::Auth
        );
        assert_eq!(
            CompletionFailure::from_status(403, "").reason,
            FailureReason::Auth
        );
        assert_eq!(
            CompletionFailure::from_status(429, "slow down").reason,
            FailureReason::Quota
        );
        assert_eq!(
            CompletionFailure::from_status(500, "oops").reason,
            FailureReason::Unknown
        );
    }

    #[test]
    fn test_completion_failure_display() {
        let err = CompletionFailure::from_status(429, "rate limited");
        let s = err.to_string();
        assert!(s.contains("quota"));
        assert!(s.contains("429"));
        assert!(s.contains("rate limited"));
    }

    #[test]
    fn test_missing_credential_user_string() {
        let err = ChatError::MissingCredential("no key".into());
        assert!(err.is_missing_credential());
        assert!(err.to_user_string().contains("API Key"));
    }

    #[test]
    fn test_completion_user_string_distinct() {
        let err: ChatError = CompletionFailure::network("connection refused").into();
        assert!(!err.is_missing_credential());
        let s = err.to_user_string();
        assert!(s.starts_with("Error: "));
        assert!(s.contains("connection refused"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ChatError = io_err.into();
        assert!(matches!(err, ChatError::Io(_)));
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_config_error_user_string() {
        let err = ChatError::Config("bad file".into());
        assert_eq!(err.to_user_string(), "configuration error: bad file");
    }
}
