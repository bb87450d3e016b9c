//! # Segmenter
//!
//! Splits message content into text and fenced code segments.
//!
//! The content is split on the fence token. Parts at even positions are
//! outside any fence and become [`TextSegment`]s; parts at odd positions are
//! inside a fence and become [`CodeSegment`]s:
//!
//! ```text
//! "intro\n```rust\nfn main() {}\n```\noutro"
//!   part 0  "intro\n"                  → Text
//!   part 1  "rust\nfn main() {}\n"     → Code { language: "rust", code: "fn main() {}" }
//!   part 2  "\noutro"                  → Text
//! ```
//!
//! An odd number of fences leaves the last part inside a fence, so a
//! truncated (still streaming) answer renders its open code block as code.
//! There is no escape for a literal fence inside prose.

use serde::Serialize;

use super::lines::{Line, classify_lines};

/// The fenced-code delimiter emitted by the assistant backend.
pub const FENCE: &str = "```";

/// A run of message content outside any fence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextSegment {
    pub lines: Vec<Line>,
}

impl TextSegment {
    /// True for the segment produced by an empty part (a single empty line).
    pub fn is_empty(&self) -> bool {
        matches!(self.lines.as_slice(), [only] if !only.is_bullet() && only.text.is_empty())
    }
}

/// The content of one fenced block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeSegment {
    /// Text after the opening fence on the same line, trimmed. May be empty.
    pub language: String,
    /// Body of the block without leading/trailing blank lines.
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Segment {
    Text(TextSegment),
    Code(CodeSegment),
}

impl Segment {
    pub fn as_code(&self) -> Option<&CodeSegment> {
        match self {
            Segment::Code(code) => Some(code),
            Segment::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextSegment> {
        match self {
            Segment::Text(text) => Some(text),
            Segment::Code(_) => None,
        }
    }
}

/// Split `content` into an ordered list of segments.
///
/// Never fails and always returns at least one segment.
pub fn segment(content: &str) -> Vec<Segment> {
    content
        .split(FENCE)
        .enumerate()
        .map(|(i, part)| {
            if i % 2 == 0 {
                Segment::Text(TextSegment {
                    lines: classify_lines(part),
                })
            } else {
                Segment::Code(parse_code_part(part))
            }
        })
        .collect()
}

/// The code blocks of `content`, in order.
pub fn code_blocks(content: &str) -> Vec<CodeSegment> {
    segment(content)
        .into_iter()
        .filter_map(|s| match s {
            Segment::Code(code) => Some(code),
            Segment::Text(_) => None,
        })
        .collect()
}

/// Number of code blocks in `content` (open trailing block included).
pub fn count_code_blocks(content: &str) -> usize {
    content.split(FENCE).skip(1).step_by(2).count()
}

fn parse_code_part(part: &str) -> CodeSegment {
    let Some((first, body)) = part.split_once('\n') else {
        return CodeSegment {
            language: part.trim().to_string(),
            code: String::new(),
        };
    };

    let body_lines: Vec<&str> = body.split('\n').collect();
    let is_blank = |l: &&str| l.trim().is_empty();
    let start = body_lines
        .iter()
        .position(|l| !is_blank(l))
        .unwrap_or(body_lines.len());
    let end = body_lines
        .iter()
        .rposition(|l| !is_blank(l))
        .map_or(start, |i| i + 1);

    CodeSegment {
        language: first.trim().to_string(),
        code: body_lines[start..end].join("\n"),
    }
}
