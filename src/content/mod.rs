//! # Message Content
//!
//! Turns the raw text of a message into structured, displayable segments.
//! Pure and UI-agnostic: the TUI draws what this module returns, the summary
//! counts code blocks with it, and nothing here keeps state between calls.
//!
//! ```text
//! raw content ──► segment() ──► [Text, Code, Text, …]
//!                                  │
//!                                  └─► classify_lines() per Text
//! ```
//!
//! ## Modules
//!
//! - [`segment`]: fence-based split into text and code segments
//! - [`lines`]: bullet / plain classification of text lines
//! - [`copy`]: copying one code block to a clipboard

pub mod copy;
pub mod lines;
pub mod segment;

pub use copy::{ClipboardSink, CopyError, CopyOutcome, SystemClipboard, request_copy};
pub use lines::{Bullet, Line, classify_lines};
pub use segment::{
    CodeSegment, FENCE, Segment, TextSegment, code_blocks, count_code_blocks, segment,
};
