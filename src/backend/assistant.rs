use std::fmt;

use async_trait::async_trait;

use crate::core::message::Source;

/// Errors that can occur while talking to the assistant backend.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendError {
    /// Backend misconfigured (bad base URL, client could not be built).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Backend returned a non-success status.
    Api { status: u16, message: String },
    /// Response body did not have the expected shape.
    Parse(String),
}

impl BackendError {
    /// True when the backend could not be reached at all.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, BackendError::Network(_))
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Config(msg) => write!(f, "config error: {msg}"),
            BackendError::Network(msg) => write!(f, "network error: {msg}"),
            BackendError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            BackendError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

/// An answer to a single question.
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub text: String,
    pub source: Source,
}

#[async_trait]
pub trait AssistantBackend: Send + Sync {
    /// Returns the name of the backend, for logs.
    fn name(&self) -> &str;

    /// Ask one question within a meeting session.
    async fn ask(&self, question: &str, session_id: &str) -> Result<Answer, BackendError>;

    /// Produce narrative notes for the session so far.
    async fn summarize(&self, session_id: &str, duration: &str) -> Result<String, BackendError>;

    /// Check that the backend is reachable and healthy.
    async fn health(&self) -> Result<(), BackendError>;
}
