//! # Header Component
//!
//! Single-line bar across the top: product title on the left, backend
//! connection state and the meeting clock on the right.
//!
//! ```text
//!  Meeting Assistant · AI support              ● Connected  ⏱ 05:12
//! ```
//!
//! Stateless: every field is a prop, rebuilt each frame from `App`.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::Component;

const TITLE: &str = " Meeting Assistant";
const SUBTITLE: &str = " · AI support";

pub struct Header {
    pub is_connected: bool,
    /// Already formatted (`MM:SS` or `H:MM:SS`).
    pub duration: String,
}

impl Header {
    pub fn new(is_connected: bool, duration: String) -> Self {
        Self {
            is_connected,
            duration,
        }
    }

    fn right_spans(&self) -> Vec<Span<'static>> {
        let (dot, label, color) = if self.is_connected {
            ("● ", "Connected", Color::Green)
        } else {
            ("● ", "Offline", Color::Red)
        };
        vec![
            Span::styled(dot, Style::default().fg(color)),
            Span::styled(label, Style::default().fg(color)),
            Span::raw("  "),
            Span::styled(
                format!("⏱ {} ", self.duration),
                Style::default().fg(Color::Gray),
            ),
        ]
    }
}

impl Component for Header {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let right = self.right_spans();
        let right_width: usize = right.iter().map(|s| s.content.width()).sum();
        let available = area.width as usize;

        let mut spans = vec![Span::styled(
            TITLE,
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        )];
        let mut used = TITLE.width();
        // Subtitle is the first thing to go on narrow terminals
        if used + SUBTITLE.width() + right_width < available {
            spans.push(Span::styled(SUBTITLE, Style::default().fg(Color::DarkGray)));
            used += SUBTITLE.width();
        }
        let gap = available.saturating_sub(used + right_width);
        spans.push(Span::raw(" ".repeat(gap)));
        spans.extend(right);

        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_string(header: &mut Header, width: u16) -> String {
        let backend = TestBackend::new(width, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| header.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_header_connected() {
        let mut header = Header::new(true, "05:12".to_string());
        let text = render_to_string(&mut header, 80);
        assert!(text.contains("Meeting Assistant"));
        assert!(text.contains("AI support"));
        assert!(text.contains("Connected"));
        assert!(text.contains("05:12"));
        assert!(!text.contains("Offline"));
    }

    #[test]
    fn test_header_offline() {
        let mut header = Header::new(false, "1:00:03".to_string());
        let text = render_to_string(&mut header, 80);
        assert!(text.contains("Offline"));
        assert!(text.contains("1:00:03"));
    }

    #[test]
    fn test_header_right_aligned() {
        let mut header = Header::new(true, "00:07".to_string());
        let text = render_to_string(&mut header, 80);
        assert!(text.trim_end().ends_with("00:07"));
    }

    #[test]
    fn test_narrow_header_drops_subtitle_first() {
        let mut header = Header::new(true, "00:07".to_string());
        let text = render_to_string(&mut header, 40);
        assert!(text.contains("Meeting Assistant"));
        assert!(!text.contains("AI support"));
        assert!(text.contains("Connected"));
    }
}
