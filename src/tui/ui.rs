use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{Header, MessageList, SummaryPanel};
use crate::tui::{InputMode, TuiState};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

const INPUT_HINTS: &str = "Esc browse · Ctrl+S summary · Ctrl+C quit ";
const CURSOR_HINTS: &str = "↑↓ select · Tab next block · y copy · Esc type ";

/// Header, conversation, input box and status footer, top to bottom.
fn layout_areas(frame_area: Rect, input_height: u16) -> [Rect; 4] {
    use Constraint::{Length, Min};
    Layout::vertical([Length(1), Min(0), Length(input_height), Length(1)]).areas(frame_area)
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    let input_height = tui.input_box.calculate_height(frame.area().width);
    let [header_area, messages_area, input_area, footer_area] =
        layout_areas(frame.area(), input_height);

    Header::new(app.is_connected, app.meeting_duration()).render(frame, header_area);

    MessageList {
        state: &mut tui.message_list,
        messages: &app.messages,
        is_typing: app.is_typing,
        spinner_frame,
        copied: tui.copy_flash.map(|(target, _)| target),
        show_active_block: tui.input_mode == InputMode::Cursor,
    }
    .render(frame, messages_area);

    tui.input_box.render(frame, input_area);

    draw_footer(frame, footer_area, &app.status_message, tui.input_mode);

    if let Some(summary) = &app.summary {
        SummaryPanel {
            summary,
            pending: app.summary_pending,
            spinner_frame,
            scroll: tui.summary_scroll,
        }
        .render(frame, frame.area());
    }
}

/// Status message on the left, key hints for the current mode on the right.
/// The hints give way when the status needs the room.
fn draw_footer(frame: &mut Frame, area: Rect, status: &str, mode: InputMode) {
    let hints = match mode {
        InputMode::Input => INPUT_HINTS,
        InputMode::Cursor => CURSOR_HINTS,
    };
    let status = format!(" {status}");
    let available = area.width as usize;

    let mut spans = vec![Span::styled(status.clone(), Style::default().fg(Color::Yellow))];
    let used = status.width() + hints.width();
    if used < available {
        spans.push(Span::raw(" ".repeat(available - used)));
        spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));
    }
    frame.render_widget(Line::from(spans), area);
}

/// Hit test: given a screen Y coordinate, find which message index (if any) is at that position
pub fn hit_test_message(
    screen_y: u16,
    frame_area: Rect,
    scroll_offset_y: u16,
    prefix_heights: &[u16],
    input_height: u16,
) -> Option<usize> {
    let [_, main_area, _, _] = layout_areas(frame_area, input_height);

    if screen_y < main_area.y || screen_y >= main_area.y + main_area.height {
        return None;
    }

    let content_y = (screen_y - main_area.y).saturating_add(scroll_offset_y);
    // First message whose bottom edge lies below content_y
    let index = prefix_heights.partition_point(|&bottom| bottom <= content_y);
    (index < prefix_heights.len()).then_some(index)
}
