//! # Copy Affordance
//!
//! Places the code of one fenced block on a clipboard and reports whether it
//! worked. Which block is "active" and how a success is shown (the transient
//! "copied" indicator) belong to the renderer, not to this module.
//!
//! The system clipboard is reached through `arboard`. Everything else talks to
//! the [`ClipboardSink`] trait so tests and headless runs can swap it out.

use std::fmt;

use log::{debug, warn};

/// Clipboard failures. Both variants mean "nothing was copied"; the caller
/// still holds the code and may retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyError {
    /// No clipboard could be opened (headless session, missing display server).
    Unavailable(String),
    /// The clipboard exists but refused the write.
    Rejected(String),
}

impl fmt::Display for CopyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CopyError::Unavailable(msg) => write!(f, "clipboard unavailable: {msg}"),
            CopyError::Rejected(msg) => write!(f, "clipboard rejected write: {msg}"),
        }
    }
}

impl std::error::Error for CopyError {}

/// Something that can receive copied text.
pub trait ClipboardSink: Send {
    fn set_text(&mut self, text: &str) -> Result<(), CopyError>;
}

/// The OS clipboard, opened fresh for every write.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), CopyError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| CopyError::Unavailable(e.to_string()))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| CopyError::Rejected(e.to_string()))
    }
}

/// Copy `code` to `sink`. A failure leaves nothing half-written; the caller
/// still owns `code` and may retry.
pub fn request_copy(sink: &mut dyn ClipboardSink, code: &str) -> Result<(), CopyError> {
    match sink.set_text(code) {
        Ok(()) => {
            debug!("Copied {} bytes to clipboard", code.len());
            Ok(())
        }
        Err(e) => {
            warn!("Copy failed: {}", e);
            Err(e)
        }
    }
}

/// Result of a copy request with the error detail dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Failed,
}

impl CopyOutcome {
    pub fn succeeded(self) -> bool {
        self == CopyOutcome::Copied
    }
}

impl From<&Result<(), CopyError>> for CopyOutcome {
    fn from(result: &Result<(), CopyError>) -> Self {
        match result {
            Ok(()) => CopyOutcome::Copied,
            Err(_) => CopyOutcome::Failed,
        }
    }
}
