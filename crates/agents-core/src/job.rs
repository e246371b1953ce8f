//! Job model for asynchronous agent execution.
//!
//! An agent run is submitted as a job: the platform answers with a status URL,
//! the client polls it until the job reaches a terminal state, and the final
//! payload is classified into a [`JobOutcome`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::request::Message;

/// Body of an agent job submission.
///
/// The job endpoint accepts a bare message list; model selection and sampling
/// are owned by the agent itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRequest {
    /// Messages in the conversation.
    pub messages: Vec<Message>,
}

impl JobRequest {
    /// Create a job request from a list of messages.
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Create a job request carrying a single user prompt.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::user(prompt)],
        }
    }
}

/// Handle for a submitted job.
///
/// Created when a submission is accepted; consumed by the poll loop when the
/// job reaches a terminal state.
#[derive(Debug, Clone)]
pub struct JobHandle {
    /// Server-provided polling location.
    pub status_url: Url,
    /// When the job was accepted.
    pub created_at: DateTime<Utc>,
}

impl JobHandle {
    /// Create a handle for a freshly accepted job.
    pub fn new(status_url: Url) -> Self {
        Self {
            status_url,
            created_at: Utc::now(),
        }
    }
}

/// Status reported by the job status endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    /// Job is waiting to be scheduled.
    Queued,
    /// Job is executing.
    Running,
    /// Job failed on the platform side.
    Error,
    /// Job was aborted before completion.
    Aborted,
    /// Any other status string; treated as still in progress.
    Other(String),
}

impl JobStatus {
    /// Whether this status ends the poll loop with a failure.
    pub fn is_terminal_failure(&self) -> bool {
        matches!(self, Self::Error | Self::Aborted)
    }
}

impl From<&str> for JobStatus {
    fn from(value: &str) -> Self {
        match value {
            "QUEUED" => Self::Queued,
            "RUNNING" => Self::Running,
            "ERROR" => Self::Error,
            "ABORTED" => Self::Aborted,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Queued => write!(f, "QUEUED"),
            Self::Running => write!(f, "RUNNING"),
            Self::Error => write!(f, "ERROR"),
            Self::Aborted => write!(f, "ABORTED"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Decoded body of a status poll response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatusBody {
    /// Raw status string.
    pub status: String,
    /// Error message, present when the job failed.
    #[serde(rename = "errorMessage", skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Everything else the platform included.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl JobStatusBody {
    /// The status as a typed value.
    pub fn status(&self) -> JobStatus {
        JobStatus::from(self.status.as_str())
    }
}

/// Terminal outcome of a job.
///
/// Classification of the final payload follows a fixed precedence: a
/// non-empty `errorMessage` wins, then `choices[0].message.content`, then the
/// raw payload as a fallback. An application error is a success value here,
/// not a failure: the platform ran the job and the job itself reported a
/// domain-level error.
#[derive(Debug, Clone)]
pub enum JobOutcome {
    /// The job ran and reported an application-level error.
    ApplicationError {
        /// The reported error message.
        message: String,
        /// Additional details, when present.
        details: Option<String>,
    },
    /// The job produced a chat reply.
    Reply {
        /// Content of the first choice.
        content: String,
    },
    /// The payload matched neither shape; kept verbatim.
    Raw(serde_json::Value),
}

impl JobOutcome {
    /// Classify a terminal payload.
    pub fn classify(payload: serde_json::Value) -> Self {
        if let Some(message) = payload
            .get("errorMessage")
            .and_then(serde_json::Value::as_str)
            .filter(|m| !m.is_empty())
        {
            let details = payload
                .get("errorDetails")
                .and_then(serde_json::Value::as_str)
                .map(String::from);
            return Self::ApplicationError {
                message: message.to_string(),
                details,
            };
        }

        if let Some(content) = payload
            .pointer("/choices/0/message/content")
            .and_then(serde_json::Value::as_str)
        {
            return Self::Reply {
                content: content.to_string(),
            };
        }

        Self::Raw(payload)
    }

    /// Whether the job reported an application-level error.
    pub fn is_application_error(&self) -> bool {
        matches!(self, Self::ApplicationError { .. })
    }

    /// Render the outcome as user-facing text.
    pub fn into_text(self) -> String {
        match self {
            Self::ApplicationError { message, details } => format!(
                "Error: {message}\nError details: {}",
                details.as_deref().unwrap_or("No details available")
            ),
            Self::Reply { content } => content,
            Self::Raw(payload) => payload.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_job_request_from_prompt() {
        let request = JobRequest::from_prompt("hello");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            json!({"messages": [{"role": "user", "content": "hello"}]})
        );
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(JobStatus::from("RUNNING"), JobStatus::Running);
        assert_eq!(JobStatus::from("QUEUED"), JobStatus::Queued);
        assert_eq!(JobStatus::from("ERROR"), JobStatus::Error);
        assert_eq!(JobStatus::from("ABORTED"), JobStatus::Aborted);
        assert_eq!(
            JobStatus::from("INITIALIZING"),
            JobStatus::Other("INITIALIZING".to_string())
        );
    }

    #[test]
    fn test_terminal_failure() {
        assert!(JobStatus::Error.is_terminal_failure());
        assert!(JobStatus::Aborted.is_terminal_failure());
        assert!(!JobStatus::Running.is_terminal_failure());
        assert!(!JobStatus::Other("INITIALIZING".to_string()).is_terminal_failure());
    }

    #[test]
    fn test_status_body_decoding() {
        let body: JobStatusBody =
            serde_json::from_value(json!({"status": "ERROR", "errorMessage": "boom"})).unwrap();
        assert_eq!(body.status(), JobStatus::Error);
        assert_eq!(body.error_message.as_deref(), Some("boom"));
    }

    #[test]
    fn test_classify_application_error() {
        let outcome = JobOutcome::classify(json!({
            "errorMessage": "bad input",
            "errorDetails": "field X"
        }));
        assert!(outcome.is_application_error());

        let text = outcome.into_text();
        assert!(text.contains("bad input"));
        assert!(text.contains("field X"));
    }

    #[test]
    fn test_classify_error_wins_over_choices() {
        // Error check takes precedence over a choices array
        let outcome = JobOutcome::classify(json!({
            "errorMessage": "boom",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "hi"}}]
        }));
        assert!(outcome.is_application_error());
    }

    #[test]
    fn test_classify_empty_error_message_ignored() {
        let outcome = JobOutcome::classify(json!({
            "errorMessage": "",
            "choices": [{"message": {"content": "hi"}}]
        }));
        assert_eq!(outcome.into_text(), "hi");
    }

    #[test]
    fn test_classify_reply() {
        // Minimal shape: only the content path is required
        let outcome = JobOutcome::classify(json!({
            "choices": [{"message": {"content": "hi"}}]
        }));
        assert_eq!(outcome.into_text(), "hi");
    }

    #[test]
    fn test_classify_raw_fallback() {
        let outcome = JobOutcome::classify(json!({"unexpected": true}));
        assert!(matches!(outcome, JobOutcome::Raw(_)));
        assert!(outcome.into_text().contains("unexpected"));
    }
}
