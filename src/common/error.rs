//! Error types for the scenario runner
//!
//! Step errors carry the expected and actual values so a failed run can be
//! diagnosed from the report alone.

use std::error::Error as StdError;
use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the scenario runner
#[derive(Error, Debug)]
pub enum Error {
    // === Step Errors ===
    #[error("{check}: expected {expected}, got {actual}")]
    Assertion {
        check: String,
        expected: String,
        actual: String,
    },

    #[error("Precondition not met: {0}")]
    PreconditionUnmet(String),

    #[error("Request failed: {0}")]
    Transport(String),

    // === Run Errors ===
    #[error("Scenario failed: {failed} of {total} steps did not pass")]
    ScenarioFailed { failed: usize, total: usize },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("Invalid scenario file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an assertion error from anything displayable
    pub fn assertion(
        check: impl Into<String>,
        expected: impl std::fmt::Display,
        actual: impl std::fmt::Display,
    ) -> Self {
        Self::Assertion {
            check: check.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Prefix an assertion's check with the request it applies to
    pub fn context(self, label: &str) -> Self {
        match self {
            Error::Assertion {
                check,
                expected,
                actual,
            } => Error::Assertion {
                check: format!("{label} {check}"),
                expected,
                actual,
            },
            other => other,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        // Surface the full source chain; reqwest's top-level message is terse
        let mut message = e.to_string();
        let mut source = StdError::source(&e);
        while let Some(inner) = source {
            message.push_str(": ");
            message.push_str(&inner.to_string());
            source = inner.source();
        }
        Error::Transport(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assertion_message_shows_both_sides() {
        let err = Error::assertion("status", 200, 404);
        assert_eq!(err.to_string(), "status: expected 200, got 404");
    }

    #[test]
    fn test_context_labels_assertions_only() {
        let err = Error::assertion("status", 404, 200).context("GET /users/1");
        assert_eq!(err.to_string(), "GET /users/1 status: expected 404, got 200");

        let err = Error::Transport("refused".into()).context("GET /users/1");
        assert_eq!(err.to_string(), "Request failed: refused");
    }
}
