//! Segments → ratatui `Text` renderer.
//!
//! Draws what `content::segment` produces: text lines with bullet glyphs,
//! and fenced code as a bordered box with a language label and a copy hint.
//! Output is owned (`'static`) so callers aren't tied to the message's lifetime.
//!
//! ```text
//! Here's how:
//! ╭── python ── [y] copy
//! │ def greet():
//! │     print("hi")
//! ╰──
//! • runs anywhere
//! ```

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

use crate::content::{self, CodeSegment, Segment};

/// Bullet glyph drawn in place of either source marker.
pub const BULLET_GLYPH: &str = "• ";
/// Copy hints share one width so toggling them never changes a message's height.
pub const COPY_HINT: &str = "[y] copy";
pub const COPIED_HINT: &str = "✓ copied";

/// Per-message code block highlighting, by position among the message's code segments.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CodeMarks {
    /// Block that `y` would copy.
    pub active: Option<usize>,
    /// Block showing the transient "copied" indicator.
    pub copied: Option<usize>,
}

/// Render raw message content.
pub fn render_content(content: &str, base_fg: Color, marks: CodeMarks) -> Text<'static> {
    render_segments(&content::segment(content), base_fg, marks)
}

pub fn render_segments(segments: &[Segment], base_fg: Color, marks: CodeMarks) -> Text<'static> {
    let mut w = Writer::new(base_fg, marks);
    let last = segments.len().saturating_sub(1);
    for (i, seg) in segments.iter().enumerate() {
        match seg {
            // Text and code alternate, so a text segment's neighbours are fences
            Segment::Text(t) => w.text_lines(&t.lines, i > 0, i < last),
            Segment::Code(c) => w.code_block(c),
        }
    }
    w.finish()
}

struct Writer {
    lines: Vec<Line<'static>>,
    base_fg: Color,
    marks: CodeMarks,
    code_index: usize,
}

impl Writer {
    fn new(base_fg: Color, marks: CodeMarks) -> Self {
        Self {
            lines: Vec::new(),
            base_fg,
            marks,
            code_index: 0,
        }
    }

    fn text_lines(&mut self, lines: &[content::Line], after_fence: bool, before_fence: bool) {
        let mut lines = lines;
        // The line breaks that sit against a fence are layout, not content
        if after_fence && let [first, rest @ ..] = lines && is_blank_plain(first) {
            lines = rest;
        }
        if before_fence && let [rest @ .., last] = lines && is_blank_plain(last) {
            lines = rest;
        }

        let style = Style::default().fg(self.base_fg);
        for line in lines {
            let text = expand_tabs(&line.text);
            if line.is_bullet() {
                self.lines.push(Line::from(vec![
                    Span::styled(
                        BULLET_GLYPH,
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(text, style),
                ]));
            } else {
                self.lines.push(Line::from(Span::styled(text, style)));
            }
        }
    }

    fn code_block(&mut self, code: &CodeSegment) {
        let index = self.code_index;
        self.code_index += 1;

        // Top border: ╭── lang ── hint  or  ╭── hint
        let bs = Style::default().fg(Color::DarkGray);
        let mut top = vec![Span::styled("╭──", bs)];
        if !code.language.is_empty() {
            top.push(Span::styled(" ", bs));
            top.push(Span::styled(
                code.language.clone(),
                bs.add_modifier(Modifier::BOLD),
            ));
            top.push(Span::styled(" ──", bs));
        }
        top.push(Span::raw(" "));
        top.push(self.copy_hint(index));
        self.lines.push(Line::from(top));

        if !code.code.is_empty() {
            let code_style = Style::default().fg(Color::White);
            for line in code.code.split('\n') {
                self.lines.push(Line::from(vec![
                    Span::styled("│ ", bs),
                    Span::styled(expand_tabs(line), code_style),
                ]));
            }
        }

        self.lines.push(Line::from(Span::styled("╰──", bs)));
    }

    fn copy_hint(&self, index: usize) -> Span<'static> {
        if self.marks.copied == Some(index) {
            Span::styled(
                COPIED_HINT,
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )
        } else if self.marks.active == Some(index) {
            Span::styled(
                COPY_HINT,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                COPY_HINT,
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            )
        }
    }

    /// Drop blank lines at either end of the message.
    fn finish(mut self) -> Text<'static> {
        while self.lines.last().is_some_and(|l| l.width() == 0) {
            self.lines.pop();
        }
        let leading = self.lines.iter().take_while(|l| l.width() == 0).count();
        self.lines.drain(..leading);
        Text::from(self.lines)
    }
}

fn is_blank_plain(line: &content::Line) -> bool {
    !line.is_bullet() && line.text.trim().is_empty()
}

/// ratatui renders `\t` as zero-width.
fn expand_tabs(s: &str) -> String {
    if s.contains('\t') {
        s.replace('\t', "    ")
    } else {
        s.to_string()
    }
}
