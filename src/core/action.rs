//! # Actions
//!
//! Everything that can happen in the meeting assistant becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! The backend answers? That's `Action::AnswerReceived(answer)`.
//!
//! `update()` takes the current state and an action, mutates the state, and
//! returns an [`Effect`] describing the I/O the caller should start. No I/O
//! happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::backend::{Answer, BackendError};
use crate::content::{CopyError, CopyOutcome};
use crate::core::message::Message;
use crate::core::state::{App, CodeRef};
use crate::core::summary::MeetingSummary;

#[derive(Debug)]
pub enum Action {
    /// User sent a question.
    Submit(String),
    AnswerReceived(Answer),
    AnswerFailed(BackendError),
    /// Result of the start-up health probe.
    HealthChecked(Result<(), BackendError>),
    OpenSummary,
    SummaryNotes(Result<String, BackendError>),
    CloseSummary,
    CopyFinished {
        target: CodeRef,
        result: Result<(), CopyError>,
    },
    Quit,
}

/// Side effects requested by `update()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Ask the backend this question.
    SpawnAsk(String),
    /// Request narrative notes for a session of this duration.
    SpawnSummary { duration: String },
    /// Show the "copied" indicator on this block.
    FlashCopied(CodeRef),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => {
            let question = text.trim();
            if question.is_empty() || app.is_typing {
                return Effect::None;
            }
            let question = question.to_string();
            app.messages.push(Message::user(question.clone()));
            app.is_typing = true;
            app.status_message = "Thinking...".to_string();
            Effect::SpawnAsk(question)
        }
        Action::AnswerReceived(answer) => {
            debug!("Answer from {:?}: {} bytes", answer.source, answer.text.len());
            app.messages.push(Message::assistant(answer.text, answer.source));
            app.is_typing = false;
            app.is_connected = true;
            app.status_message.clear();
            Effect::None
        }
        Action::AnswerFailed(e) => {
            warn!("Ask failed: {}", e);
            app.is_typing = false;
            if e.is_connectivity() {
                app.is_connected = false;
            }
            app.status_message = format!("Request failed: {e}");
            Effect::None
        }
        Action::HealthChecked(result) => {
            app.is_connected = result.is_ok();
            if let Err(e) = result {
                info!("Backend health check failed: {}", e);
                app.status_message = format!("Backend offline: {e}");
            }
            Effect::None
        }
        Action::OpenSummary => {
            if app.summary.is_some() {
                return Effect::None;
            }
            let summary = MeetingSummary::from_messages(&app.messages, app.elapsed());
            let duration = summary.duration.clone();
            app.summary = Some(summary);
            app.summary_pending = true;
            Effect::SpawnSummary { duration }
        }
        Action::SummaryNotes(result) => {
            app.summary_pending = false;
            match result {
                Ok(notes) => {
                    // Panel may have been closed while the request was in flight
                    if let Some(summary) = app.summary.as_mut() {
                        summary.notes = Some(notes);
                    }
                }
                Err(e) => {
                    warn!("Summary notes unavailable: {}", e);
                    if e.is_connectivity() {
                        app.is_connected = false;
                    }
                }
            }
            Effect::None
        }
        Action::CloseSummary => {
            app.summary = None;
            Effect::None
        }
        Action::CopyFinished { target, result } => {
            debug!("Copy of {:?}: {:?}", target, CopyOutcome::from(&result));
            match result {
                Ok(()) if app.code_at(target).is_some() => {
                    app.status_message = "Copied to clipboard".to_string();
                    Effect::FlashCopied(target)
                }
                Ok(()) => {
                    debug!("Ignoring copy result for stale block {:?}", target);
                    Effect::None
                }
                Err(e) => {
                    app.status_message = format!("Copy failed: {e}");
                    Effect::None
                }
            }
        }
        Action::Quit => Effect::Quit,
    }
}
