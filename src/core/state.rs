//! # Application State
//!
//! Core business state for the meeting assistant. Domain logic only; no
//! TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── backend: Arc<dyn AssistantBackend>  // REST backend
//! ├── session_id: String                  // sent with every request
//! ├── messages: Vec<Message>              // the conversation, append-only
//! ├── status_message: String              // status bar text
//! ├── is_typing: bool                     // waiting for an answer
//! ├── is_connected: bool                  // last known backend reachability
//! ├── started_at: Instant                 // meeting clock
//! ├── summary: Option<MeetingSummary>     // summary panel (None = hidden)
//! └── summary_pending: bool               // backend notes requested
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::backend::AssistantBackend;
use crate::content::{code_blocks, count_code_blocks};
use crate::core::config::ResolvedConfig;
use crate::core::message::Message;
use crate::core::summary::{MeetingSummary, format_duration};

pub const WELCOME_STATUS: &str = "Ask anything during your meeting.";

/// Addresses one fenced code block: the message it lives in and its
/// position among that message's code segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CodeRef {
    pub message: usize,
    pub block: usize,
}

pub struct App {
    pub backend: Arc<dyn AssistantBackend>,
    pub session_id: String,
    pub messages: Vec<Message>,
    pub status_message: String,
    pub is_typing: bool,
    pub is_connected: bool,
    pub started_at: Instant,
    pub summary: Option<MeetingSummary>,
    pub summary_pending: bool,
}

impl App {
    pub fn new(backend: Arc<dyn AssistantBackend>, session_id: String) -> Self {
        Self {
            backend,
            session_id,
            messages: Vec::new(),
            status_message: WELCOME_STATUS.to_string(),
            is_typing: false,
            // Optimistic until the first health probe or request says otherwise
            is_connected: true,
            started_at: Instant::now(),
            summary: None,
            summary_pending: false,
        }
    }

    pub fn from_config(backend: Arc<dyn AssistantBackend>, config: &ResolvedConfig) -> Self {
        Self::new(backend, config.session_id.clone())
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Meeting clock as shown in the header.
    pub fn meeting_duration(&self) -> String {
        format_duration(self.elapsed())
    }

    /// The code of the referenced block, if the message and block exist.
    pub fn code_at(&self, target: CodeRef) -> Option<String> {
        let message = self.messages.get(target.message)?;
        code_blocks(&message.content)
            .into_iter()
            .nth(target.block)
            .map(|block| block.code)
    }

    pub fn code_block_count(&self, message: usize) -> usize {
        self.messages
            .get(message)
            .map(|m| count_code_blocks(&m.content))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Source;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, WELCOME_STATUS);
        assert!(!app.is_typing);
        assert!(app.is_connected);
        assert!(app.messages.is_empty());
        assert!(app.summary.is_none());
        assert_eq!(app.session_id, "test-session");
    }

    #[test]
    fn code_at_addresses_blocks_by_position() {
        let mut app = test_app();
        app.messages.push(Message::user("hi"));
        app.messages.push(Message::assistant(
            "a\n```py\nfirst()\n```\nb\n```\nsecond()\n```",
            Source::Model,
        ));

        assert_eq!(
            app.code_at(CodeRef { message: 1, block: 0 }).as_deref(),
            Some("first()")
        );
        assert_eq!(
            app.code_at(CodeRef { message: 1, block: 1 }).as_deref(),
            Some("second()")
        );
        assert_eq!(app.code_at(CodeRef { message: 1, block: 2 }), None);
        assert_eq!(app.code_at(CodeRef { message: 0, block: 0 }), None);
        assert_eq!(app.code_at(CodeRef { message: 9, block: 0 }), None);
        assert_eq!(app.code_block_count(1), 2);
        assert_eq!(app.code_block_count(9), 0);
    }

    #[test]
    fn meeting_duration_starts_at_zero() {
        let app = test_app();
        assert_eq!(app.meeting_duration(), "00:00");
    }
}
