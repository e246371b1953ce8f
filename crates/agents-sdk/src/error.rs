//! Error types for the agent platform SDK.

use std::time::Duration;
use thiserror::Error;

/// Result type for SDK operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when using the agent platform SDK.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error during client setup or endpoint resolution.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue.
        message: String,
    },

    /// HTTP request failed at the transport level.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error response to a synchronous request.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message or body from the server.
        message: String,
    },

    /// Job submission was not accepted.
    #[error("Job submission rejected ({status}): {body}")]
    SubmissionRejected {
        /// HTTP status code of the submission response.
        status: u16,
        /// Response text, for diagnostics.
        body: String,
    },

    /// A status poll returned a non-ok response.
    #[error("Status poll failed ({status}): {body}")]
    Transport {
        /// HTTP status code of the poll response.
        status: u16,
        /// Raw response content.
        body: String,
    },

    /// The platform reported the job as failed or aborted.
    #[error("Job failed on the platform: {body}")]
    Remote {
        /// Full status body reported by the platform.
        body: serde_json::Value,
    },

    /// The poll deadline elapsed before the job reached a terminal state.
    #[error("Job did not complete within {waited:?}")]
    DeadlineExceeded {
        /// How long the poller waited.
        waited: Duration,
    },

    /// Response body could not be decoded.
    #[error("Failed to parse response: {message}")]
    Parse {
        /// Error message describing the parse failure.
        message: String,
    },
}

impl Error {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an API error from response details.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a submission rejected error.
    pub fn submission_rejected(status: u16, body: impl Into<String>) -> Self {
        Self::SubmissionRejected {
            status,
            body: body.into(),
        }
    }

    /// Create a transport error from a failed poll.
    pub fn transport(status: u16, body: impl Into<String>) -> Self {
        Self::Transport {
            status,
            body: body.into(),
        }
    }

    /// Create a remote job failure error.
    pub fn remote(body: serde_json::Value) -> Self {
        Self::Remote { body }
    }

    /// Create a deadline exceeded error.
    pub fn deadline_exceeded(waited: Duration) -> Self {
        Self::DeadlineExceeded { waited }
    }

    /// Create a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Get the HTTP status code if available.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. }
            | Self::SubmissionRejected { status, .. }
            | Self::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_creation() {
        let err = Error::configuration("invalid base URL");
        assert!(matches!(err, Error::Configuration { .. }));
        assert!(err.to_string().contains("invalid base URL"));
    }

    #[test]
    fn test_submission_rejected_carries_body() {
        let err = Error::submission_rejected(500, "backend exploded");
        assert!(err.to_string().contains("backend exploded"));
        assert_eq!(err.status_code(), Some(500));
    }

    #[test]
    fn test_remote_carries_status_body() {
        let err = Error::remote(json!({"status": "ERROR", "errorMessage": "boom"}));
        assert!(err.to_string().contains("boom"));
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_deadline_exceeded_display() {
        let err = Error::deadline_exceeded(Duration::from_secs(30));
        assert!(err.to_string().contains("did not complete"));
    }
}
