//! # Line Classifier
//!
//! Splits the raw text of a text segment into lines and tags each one as a
//! bullet item or a plain line.
//!
//! ```text
//! "- a\nplain\n• b"  →  [Bullet(Dash) "a", Plain "plain", Bullet(Dot) "b"]
//! ```
//!
//! A bullet is exactly one line. There is no nesting, no ordered-list
//! numbering and no continuation: a line either starts (after trimming) with
//! one of the two markers or it is plain text.

use serde::Serialize;

/// The two recognized bullet markers, each followed by one mandatory space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Bullet {
    /// `"- "`
    Dash,
    /// `"• "`
    Dot,
}

impl Bullet {
    const ALL: [Bullet; 2] = [Bullet::Dash, Bullet::Dot];

    /// The marker text, including its trailing space.
    pub fn marker(self) -> &'static str {
        match self {
            Bullet::Dash => "- ",
            Bullet::Dot => "• ",
        }
    }
}

/// A single line of a text segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    /// Which marker introduced the line, if it is a bullet item.
    pub bullet: Option<Bullet>,
    /// Bullet: the trimmed line without its marker.
    /// Plain: the original, untrimmed line.
    pub text: String,
}

impl Line {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            bullet: None,
            text: text.into(),
        }
    }

    pub fn bullet(bullet: Bullet, text: impl Into<String>) -> Self {
        Self {
            bullet: Some(bullet),
            text: text.into(),
        }
    }

    pub fn is_bullet(&self) -> bool {
        self.bullet.is_some()
    }

    /// Rebuild the source form of the line with its marker restored.
    ///
    /// Whitespace that surrounded a bullet line is not recoverable; plain
    /// lines come back byte-for-byte.
    pub fn to_source(&self) -> String {
        match self.bullet {
            Some(b) => format!("{}{}", b.marker(), self.text),
            None => self.text.clone(),
        }
    }
}

/// Classify every line of `text`.
///
/// Always returns at least one line: `""` yields a single empty plain line and
/// a trailing `\n` yields a trailing empty line.
pub fn classify_lines(text: &str) -> Vec<Line> {
    text.split('\n').map(classify_line).collect()
}

fn classify_line(raw: &str) -> Line {
    let trimmed = raw.trim();
    Bullet::ALL
        .iter()
        .find_map(|&b| {
            trimmed
                .strip_prefix(b.marker())
                .map(|rest| Line::bullet(b, rest))
        })
        .unwrap_or_else(|| Line::plain(raw))
}
