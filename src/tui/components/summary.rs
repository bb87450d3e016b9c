//! # Summary Panel
//!
//! Centered overlay opened with Ctrl+S, dismissed with Esc or Enter.
//!
//! ```text
//! ┌ Meeting Summary ──────────────────────────────────────┐
//! │ Generated at 02:05:11 PM                              │
//! │                                                       │
//! │ Total Messages 12   Duration 05:12   Code Snippets 2  │
//! │                                                       │
//! │ Key Topics Discussed                                  │
//! │ • Programming & Development                           │
//! │                                                       │
//! │ Session Notes                                         │
//! │ ...                                                   │
//! └──────────────────────── Esc Close  ↑↓ Scroll ─────────┘
//! ```
//!
//! Stateless like the other overlays' render path: the summary and the
//! scroll offset are props; `TuiState` owns the offset.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::core::summary::MeetingSummary;
use crate::tui::component::Component;
use crate::tui::components::SPINNER;
use crate::tui::render::{BULLET_GLYPH, CodeMarks, render_content};

pub struct SummaryPanel<'a> {
    pub summary: &'a MeetingSummary,
    /// Backend notes still on their way
    pub pending: bool,
    pub spinner_frame: usize,
    pub scroll: u16,
}

impl<'a> SummaryPanel<'a> {
    fn heading(text: &'static str) -> Line<'static> {
        Line::styled(
            text,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }

    fn stat(label: &'static str, value: String, color: Color) -> Vec<Span<'static>> {
        vec![
            Span::styled(format!("{label} "), Style::default().fg(Color::Gray)),
            Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::raw("   "),
        ]
    }

    fn body(&self) -> Text<'static> {
        let summary = self.summary;
        let mut lines = vec![
            Line::styled(
                format!(
                    "Generated at {}",
                    summary.generated_at.format("%I:%M:%S %p")
                ),
                Style::default().fg(Color::DarkGray),
            ),
            Line::default(),
        ];

        let mut stats = Self::stat(
            "Total Messages",
            summary.total_messages.to_string(),
            Color::Blue,
        );
        stats.extend(Self::stat("Duration", summary.duration.clone(), Color::Green));
        stats.extend(Self::stat(
            "Code Snippets",
            summary.code_snippets.to_string(),
            Color::Yellow,
        ));
        lines.push(Line::from(stats));

        if !summary.key_topics.is_empty() {
            lines.push(Line::default());
            lines.push(Self::heading("Key Topics Discussed"));
            for topic in &summary.key_topics {
                lines.push(Line::from(vec![
                    Span::styled(
                        BULLET_GLYPH,
                        Style::default()
                            .fg(Color::Blue)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*topic),
                ]));
            }
        }

        lines.push(Line::default());
        lines.push(Self::heading("Session Notes"));
        if self.pending {
            let glyph = SPINNER[self.spinner_frame % SPINNER.len()];
            lines.push(Line::styled(
                format!("{glyph} Generating notes…"),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ));
        } else {
            let notes = render_content(&summary.notes_text(), Color::Gray, CodeMarks::default());
            lines.extend(notes.lines);
        }

        Text::from(lines)
    }
}

impl<'a> SummaryPanel<'a> {
    fn block() -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(Span::styled(
                " Meeting Summary ",
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Line::from(" Esc Close  ↑↓ Scroll ").centered())
            .padding(Padding::horizontal(1))
    }

    /// Largest scroll offset that still keeps the last line of the body on
    /// screen when the panel is drawn over `area`.
    pub fn max_scroll(&self, area: Rect) -> u16 {
        let inner = Self::block().inner(centered_rect(70, 70, area));
        if inner.width == 0 {
            return 0;
        }
        let lines = Paragraph::new(self.body())
            .wrap(Wrap { trim: false })
            .line_count(inner.width);
        u16::try_from(lines)
            .unwrap_or(u16::MAX)
            .saturating_sub(inner.height)
    }
}

impl<'a> Component for SummaryPanel<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(70, 70, area);
        let scroll = self.scroll.min(self.max_scroll(area));

        // Clear underlying content
        frame.render_widget(Clear, overlay);

        let paragraph = Paragraph::new(self.body())
            .block(Self::block())
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0));
        frame.render_widget(paragraph, overlay);
    }
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
