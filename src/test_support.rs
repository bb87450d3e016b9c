//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::backend::{Answer, AssistantBackend, BackendError};
use crate::content::{ClipboardSink, CopyError};
use crate::core::message::Source;
use crate::core::state::App;

/// A backend that answers every question with the same canned text.
pub struct StubBackend {
    pub answer: String,
    pub source: Source,
}

impl Default for StubBackend {
    fn default() -> Self {
        Self {
            answer: "Stub answer".to_string(),
            source: Source::Model,
        }
    }
}

#[async_trait]
impl AssistantBackend for StubBackend {
    fn name(&self) -> &str {
        "stub"
    }

    async fn ask(&self, _question: &str, _session_id: &str) -> Result<Answer, BackendError> {
        Ok(Answer {
            text: self.answer.clone(),
            source: self.source,
        })
    }

    async fn summarize(&self, _session_id: &str, duration: &str) -> Result<String, BackendError> {
        Ok(format!("Stub summary ({duration})"))
    }

    async fn health(&self) -> Result<(), BackendError> {
        Ok(())
    }
}

/// Creates a test App with a StubBackend.
pub fn test_app() -> App {
    App::new(Arc::new(StubBackend::default()), "test-session".to_string())
}

/// Records every write instead of touching the OS clipboard.
#[derive(Debug, Default)]
pub struct RecordingClipboard {
    pub copied: Vec<String>,
}

impl ClipboardSink for RecordingClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), CopyError> {
        self.copied.push(text.to_string());
        Ok(())
    }
}

/// Fails every write with the configured error.
#[derive(Debug)]
pub struct FailingClipboard(CopyError);

impl FailingClipboard {
    pub fn unavailable() -> Self {
        Self(CopyError::Unavailable("no display".into()))
    }

    pub fn rejected() -> Self {
        Self(CopyError::Rejected("owner refused".into()))
    }
}

impl ClipboardSink for FailingClipboard {
    fn set_text(&mut self, _text: &str) -> Result<(), CopyError> {
        Err(self.0.clone())
    }
}

#[test]
fn stub_backend_answers_and_summarizes() {
    let backend = StubBackend::default();
    let answer = tokio_test::block_on(backend.ask("q", "s")).unwrap();
    assert_eq!(answer.text, "Stub answer");
    assert_eq!(
        tokio_test::block_on(backend.summarize("s", "01:00")).unwrap(),
        "Stub summary (01:00)"
    );
}
