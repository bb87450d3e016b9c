//! # InputBox Component
//!
//! Where the participant types the next question.
//!
//! ## Responsibilities
//!
//! - Capture text input
//! - Handle editing (backspace, delete, cursor movement, paste)
//! - Handle submission (Enter), refused while an answer is pending
//! - Show a placeholder when empty and a spinner while waiting
//!
//! ## State Management
//!
//! The buffer and cursor are internal state. `waiting`, `spinner_frame` and
//! `focused` are props refreshed from the application state each frame.

mod layout;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{
    Block, BorderType, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};

use crate::tui::component::{Component, EventHandler};
use crate::tui::components::SPINNER;
use crate::tui::event::TuiEvent;

use layout::{
    BORDER_OFFSET, MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, cursor_row_col, inner_width,
    move_vertically, next_char_boundary, prev_char_boundary, wrap_rows,
};

pub const PLACEHOLDER: &str =
    "Ask me anything during the meeting... (Enter to send, Ctrl+J for new line)";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed)
    Submit(String),
    /// Buffer or cursor changed
    ContentChanged,
}

/// Multi-line text input.
///
/// # Props
///
/// - `waiting`: an answer is pending; Enter is ignored and the draft kept
/// - `spinner_frame`: animation frame for the waiting title
/// - `focused`: false in cursor mode; the box dims and hides the terminal cursor
pub struct InputBox {
    pub buffer: String,
    pub waiting: bool,
    pub spinner_frame: usize,
    pub focused: bool,
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    cursor: usize,
    /// Row offset for internal scrolling (0 when content fits)
    scroll_offset: u16,
    /// Content width from the last render, for vertical movement
    last_width: u16,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    const DEFAULT_WIDTH: u16 = 80;

    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            waiting: false,
            spinner_frame: 0,
            focused: true,
            cursor: 0,
            scroll_offset: 0,
            last_width: Self::DEFAULT_WIDTH,
        }
    }

    /// Required height for the current buffer, clamped to
    /// `[1 + VERTICAL_OVERHEAD, MAX_VISIBLE_LINES + VERTICAL_OVERHEAD]`.
    pub fn calculate_height(&self, area_width: u16) -> u16 {
        let rows = wrap_rows(&self.buffer, inner_width(area_width)).len() as u16;
        rows.min(MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    fn title(&self) -> String {
        if self.waiting {
            let glyph = SPINNER[self.spinner_frame % SPINNER.len()];
            format!(" Waiting for answer {glyph} ")
        } else {
            " Ask a question ".to_string()
        }
    }

    fn update_scroll_offset(&mut self, cursor_row: u16, total_rows: u16) {
        if total_rows <= MAX_VISIBLE_LINES {
            self.scroll_offset = 0;
        } else if cursor_row < self.scroll_offset {
            self.scroll_offset = cursor_row;
        } else if cursor_row >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = cursor_row + 1 - MAX_VISIBLE_LINES;
        }
    }

    fn render_scrollbar(&self, frame: &mut Frame, area: Rect, total_rows: u16) {
        if total_rows <= MAX_VISIBLE_LINES {
            return;
        }
        // ScrollbarState content_length is max scrollable position, not total items
        let max_scroll = total_rows - MAX_VISIBLE_LINES;
        let mut scrollbar_state = ScrollbarState::default()
            .content_length(max_scroll as usize)
            .position(self.scroll_offset as usize);
        let scrollbar_area = Rect {
            x: area.x + area.width.saturating_sub(1),
            y: area.y + 1,
            width: 1,
            height: area.height.saturating_sub(2),
        };
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            scrollbar_area,
            &mut scrollbar_state,
        );
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = inner_width(area.width);
        self.last_width = width;

        let rows = wrap_rows(&self.buffer, width);
        let (cursor_row, cursor_col) = cursor_row_col(&self.buffer, &rows, self.cursor, width);
        let total_rows = rows.len() as u16;
        self.update_scroll_offset(cursor_row as u16, total_rows);

        let border_style = if self.focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(self.title());

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(PLACEHOLDER).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            let visible: Vec<Line> = rows
                .iter()
                .skip(self.scroll_offset as usize)
                .take(MAX_VISIBLE_LINES as usize)
                .map(|r| Line::raw(self.buffer[r.start..r.end].to_string()))
                .collect();
            let fg = if self.focused { Color::White } else { Color::Gray };
            Paragraph::new(visible).style(Style::default().fg(fg))
        };

        frame.render_widget(paragraph.block(block), area);
        self.render_scrollbar(frame, area, total_rows);

        if self.focused {
            let visible_row = (cursor_row as u16).saturating_sub(self.scroll_offset);
            frame.set_cursor_position((
                area.x + BORDER_OFFSET + cursor_col,
                area.y + BORDER_OFFSET + visible_row,
            ));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Terminals send CRLF on some platforms
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                self.buffer.insert_str(self.cursor, &text);
                self.cursor += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace if self.cursor > 0 => {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete if self.cursor < self.buffer.len() => {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft if self.cursor > 0 => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorRight if self.cursor < self.buffer.len() => {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor != line_start).then(|| {
                    self.cursor = line_start;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor != line_end).then(|| {
                    self.cursor = line_end;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorUp | TuiEvent::CursorDown => {
                let direction = if *event == TuiEvent::CursorUp { -1 } else { 1 };
                let pos = move_vertically(&self.buffer, self.cursor, self.last_width, direction)?;
                self.cursor = pos;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Submit => {
                if self.waiting || self.buffer.trim().is_empty() {
                    return None;
                }
                let text = std::mem::take(&mut self.buffer);
                self.cursor = 0;
                self.scroll_offset = 0;
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_string(input: &mut InputBox, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| input.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn typed(text: &str) -> InputBox {
        let mut input = InputBox::new();
        for c in text.chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
        input
    }

    #[test]
    fn test_handle_input() {
        let mut input = InputBox::new();

        let res = input.handle_event(&TuiEvent::InputChar('a'));
        assert_eq!(res, Some(InputEvent::ContentChanged));
        input.handle_event(&TuiEvent::InputChar('b'));
        assert_eq!(input.buffer, "ab");

        let res = input.handle_event(&TuiEvent::Backspace);
        assert_eq!(res, Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "a");
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut input = InputBox::new();
        assert_eq!(input.handle_event(&TuiEvent::Backspace), None);
    }

    #[test]
    fn test_insert_in_middle() {
        let mut input = typed("ac");
        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::InputChar('b'));
        assert_eq!(input.buffer, "abc");
        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "bc");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = typed("café");
        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.buffer, "caf");
    }

    #[test]
    fn test_submit() {
        let mut input = typed("  what's next?  ");
        match input.handle_event(&TuiEvent::Submit) {
            Some(InputEvent::Submit(text)) => assert_eq!(text, "  what's next?  "),
            other => panic!("Expected Submit event, got {other:?}"),
        }
        assert!(input.buffer.is_empty(), "Buffer should be cleared after submit");
    }

    #[test]
    fn test_blank_submit_is_ignored() {
        let mut input = typed(" \n ");
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
        assert_eq!(input.buffer, " \n ");
    }

    #[test]
    fn test_submit_while_waiting_keeps_draft() {
        let mut input = typed("follow-up");
        input.waiting = true;
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
        assert_eq!(input.buffer, "follow-up");
    }

    #[test]
    fn test_paste_normalizes_line_endings() {
        let mut input = InputBox::new();
        input.handle_event(&TuiEvent::Paste("one\r\ntwo".to_string()));
        assert_eq!(input.buffer, "one\ntwo");
        input.handle_event(&TuiEvent::InputChar('!'));
        assert_eq!(input.buffer, "one\ntwo!");
    }

    #[test]
    fn test_home_end_within_line() {
        let mut input = typed("first\nsecond");
        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::InputChar('>'));
        assert_eq!(input.buffer, "first\n>second");
        input.handle_event(&TuiEvent::CursorUp);
        input.handle_event(&TuiEvent::CursorEnd);
        input.handle_event(&TuiEvent::InputChar('.'));
        assert_eq!(input.buffer, "first.\n>second");
    }

    #[test]
    fn test_calculate_height_clamps() {
        assert_eq!(InputBox::new().calculate_height(40), 3);
        let input = typed("1\n2\n3\n4\n5\n6\n7");
        assert_eq!(input.calculate_height(40), MAX_VISIBLE_LINES + VERTICAL_OVERHEAD);
    }

    #[test]
    fn test_render_placeholder_and_title() {
        let mut input = InputBox::new();
        let text = render_to_string(&mut input, 100, 3);
        assert!(text.contains("Ask a question"));
        assert!(text.contains("Ask me anything during the meeting..."));
    }

    #[test]
    fn test_render_waiting_title() {
        let mut input = typed("draft");
        input.waiting = true;
        let text = render_to_string(&mut input, 60, 3);
        assert!(text.contains("Waiting for answer"));
        assert!(text.contains("draft"));
        assert!(!text.contains("Ask me anything"));
    }

    #[test]
    fn test_render_scrolls_to_cursor() {
        let mut input = typed("1\n2\n3\n4\n5\n6\n7");
        let text = render_to_string(&mut input, 20, 7);
        assert!(text.contains('7'));
        assert!(!text.contains('1'));
    }

    #[test]
    fn test_render_wraps_at_word_boundaries() {
        let mut input = typed("the quick brown fox");
        let text = render_to_string(&mut input, 14, 4);
        assert!(text.contains("the quick"));
        assert!(text.contains("brown fox"));
        assert_eq!(input.calculate_height(14), 2 + VERTICAL_OVERHEAD);
    }
}
