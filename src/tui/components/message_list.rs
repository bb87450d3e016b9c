//! # MessageList Component
//!
//! Scrollable view of the meeting conversation.
//!
//! ## Responsibilities
//!
//! - Display the messages, newest at the bottom
//! - Manage scrolling and stick-to-bottom
//! - Track the selected message and its active code block
//! - Cache message heights
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the message slice (props).
//! Messages never change after they're appended, so a cached height stays
//! valid until the width changes.

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::message::Message as ChatMessage;
use crate::core::state::CodeRef;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::SPINNER;
use crate::tui::components::message::Message;
use crate::tui::event::TuiEvent;
use crate::tui::render::CodeMarks;

const WELCOME: &str = "Ask me anything during the meeting.\n\n\
    Answers come from the team's FAQ or the AI model.\n\
    Press Ctrl+S for a meeting summary.";

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Message under the mouse pointer
    pub hovered_index: Option<usize>,
    /// Message picked with the keyboard in cursor mode
    pub selected_index: Option<usize>,
    /// Code block `y` copies, by position within the selected message
    pub active_block: usize,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true,
            hovered_index: None,
            selected_index: None,
            active_block: 0,
            viewport_height: 0,
        }
    }

    /// Change the selection. The active code block resets when the message changes.
    pub fn select(&mut self, index: Option<usize>) {
        if self.selected_index != index {
            self.active_block = 0;
        }
        self.selected_index = index;
    }

    pub fn select_previous(&mut self, message_count: usize) {
        if message_count == 0 {
            return;
        }
        let idx = self
            .selected_index
            .map(|i| i.saturating_sub(1))
            .unwrap_or(message_count - 1);
        self.select(Some(idx));
        self.scroll_to_selected();
    }

    pub fn select_next(&mut self, message_count: usize) {
        if let Some(idx) = self.selected_index
            && idx + 1 < message_count
        {
            self.select(Some(idx + 1));
            self.scroll_to_selected();
        }
    }

    /// Advance to the next code block of the selected message, wrapping around.
    pub fn cycle_code_block(&mut self, blocks_in_selected: usize) {
        if blocks_in_selected == 0 {
            self.active_block = 0;
        } else {
            self.active_block = (self.active_block + 1) % blocks_in_selected;
        }
    }

    /// The block `y` would copy, if the selection has any code.
    pub fn copy_target(&self, blocks_in_selected: usize) -> Option<CodeRef> {
        let message = self.selected_index?;
        (blocks_in_selected > 0).then(|| CodeRef {
            message,
            block: self.active_block.min(blocks_in_selected - 1),
        })
    }

    fn max_scroll(&self) -> u16 {
        self.layout.total_height().saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_scroll();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Scroll the viewport so the selected message is fully visible.
    /// If the message is taller than the viewport, align its top edge.
    pub fn scroll_to_selected(&mut self) {
        let Some(idx) = self.selected_index else {
            return;
        };
        let Some(&item_bottom) = self.layout.prefix_heights.get(idx) else {
            return;
        };
        let item_top = item_bottom.saturating_sub(self.layout.heights[idx]);
        let offset_y = self.scroll_state.offset().y;

        if item_top < offset_y {
            self.scroll_state.set_offset(Position { x: 0, y: item_top });
            self.stick_to_bottom = false;
        } else if item_bottom > offset_y.saturating_add(self.viewport_height) {
            let new_y = item_bottom
                .saturating_sub(self.viewport_height)
                .min(item_top);
            self.scroll_state.set_offset(Position { x: 0, y: new_y });
            self.stick_to_bottom = new_y >= self.max_scroll();
        }
    }

    /// Re-engage auto-scroll once the user scrolls back to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_scroll();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

/// Scrollable conversation view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub messages: &'a [ChatMessage],
    pub is_typing: bool,
    pub spinner_frame: usize,
    /// Block currently showing the "copied" indicator
    pub copied: Option<CodeRef>,
    /// Highlight the active block of the selected message (cursor mode)
    pub show_active_block: bool,
}

impl<'a> MessageList<'a> {
    fn marks_for(&self, index: usize) -> CodeMarks {
        let active = (self.show_active_block && self.state.selected_index == Some(index))
            .then_some(self.state.active_block);
        let copied = self
            .copied
            .filter(|c| c.message == index)
            .map(|c| c.block);
        CodeMarks { active, copied }
    }

    fn render_welcome(frame: &mut Frame, area: Rect) {
        let top = area.y + area.height.saturating_sub(5) / 2;
        let welcome_area = Rect::new(area.x, top, area.width, area.height.min(5));
        let paragraph = Paragraph::new(WELCOME)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, welcome_area);
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.messages.is_empty() && !self.is_typing {
            Self::render_welcome(frame, area);
            return;
        }

        let content_width = area.width.saturating_sub(1); // -1 for scrollbar safe area
        let num_items = self.messages.len();

        // 1. Update layout cache
        let layout = &mut self.state.layout;
        let reusable = layout.reusable_count(num_items, content_width);
        layout.heights.truncate(reusable);
        for message in self.messages.iter().skip(layout.heights.len()) {
            layout
                .heights
                .push(Message::calculate_height(message, content_width));
        }
        layout.rebuild_prefix_heights();
        layout.update_metadata(num_items, content_width);

        let total_height = self.state.layout.total_height();
        // One extra row at the bottom for the typing indicator
        let typing_rows = u16::from(self.is_typing);
        let canvas_height = total_height.saturating_add(typing_rows);

        // 2. Clamp scroll offset
        self.state.viewport_height = area.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = self.state.layout.visible_range(scroll_offset, area.height);

        // 3. Render visible messages into a ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        for i in visible_range {
            let height = self.state.layout.heights[i];
            let y = self.state.layout.prefix_heights[i].saturating_sub(height);
            let rect = Rect::new(0, y, content_width, height);
            let is_hovered = self.state.hovered_index == Some(i);
            let is_selected = self.state.selected_index == Some(i);
            let message =
                Message::new(&self.messages[i], is_hovered, is_selected, self.marks_for(i));
            scroll_view.render_widget(message, rect);
        }

        if self.is_typing {
            let frame_glyph = SPINNER[self.spinner_frame % SPINNER.len()];
            let indicator = Line::from(vec![
                Span::styled(format!(" {frame_glyph} "), Style::default().fg(Color::Blue)),
                Span::styled(
                    "AI Assistant is thinking...",
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                ),
            ]);
            scroll_view.render_widget(indicator, Rect::new(0, total_height, content_width, 1));
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// EventHandler lives on `MessageListState` because `MessageList` is rebuilt
/// every frame and can't hold scroll position.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Cached per-message heights for one content width.
pub struct LayoutCache {
    pub heights: Vec<u16>,
    /// Running sums of `heights`: `prefix_heights[i]` is the bottom edge of message `i`.
    pub prefix_heights: Vec<u16>,
    message_count: usize,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            message_count: 0,
            content_width: 0,
        }
    }

    /// How many cached heights are still valid.
    pub fn reusable_count(&self, message_count: usize, content_width: u16) -> usize {
        if self.content_width != content_width || message_count < self.message_count {
            return 0;
        }
        self.message_count.min(self.heights.len())
    }

    pub fn update_metadata(&mut self, message_count: usize, content_width: u16) {
        self.message_count = message_count;
        self.content_width = content_width;
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                // Rows past u16::MAX cannot be addressed by the scroll view
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    pub fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Messages overlapping the viewport, plus half a viewport above and below.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Source;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn cache_with(heights: &[u16], width: u16) -> LayoutCache {
        let mut cache = LayoutCache::new();
        cache.heights = heights.to_vec();
        cache.rebuild_prefix_heights();
        cache.update_metadata(heights.len(), width);
        cache
    }

    fn state_with(heights: &[u16], viewport: u16) -> MessageListState {
        let mut state = MessageListState::new();
        state.layout = cache_with(heights, 80);
        state.viewport_height = viewport;
        state
    }

    #[test]
    fn test_layout_cache_reusable() {
        let cache = cache_with(&[3, 3, 3, 3, 3], 80);

        // Same everything -> all reusable
        assert_eq!(cache.reusable_count(5, 80), 5);
        // New message appended -> the old five still hold
        assert_eq!(cache.reusable_count(6, 80), 5);
        // Width changed -> nothing reusable
        assert_eq!(cache.reusable_count(5, 40), 0);
        // Fewer messages than cached -> history replaced
        assert_eq!(cache.reusable_count(2, 80), 0);
    }

    #[test]
    fn test_fresh_cache_reuses_nothing() {
        assert_eq!(LayoutCache::new().reusable_count(3, 80), 0);
    }

    #[test]
    fn test_prefix_heights_and_total() {
        let cache = cache_with(&[3, 5, 2], 80);
        assert_eq!(cache.prefix_heights, vec![3, 8, 10]);
        assert_eq!(cache.total_height(), 10);
    }

    #[test]
    fn test_prefix_heights_saturate_on_tall_history() {
        let cache = cache_with(&[40_000, 40_000, 5], 80);
        assert_eq!(cache.prefix_heights, vec![40_000, u16::MAX, u16::MAX]);
        assert_eq!(cache.total_height(), u16::MAX);
        // Messages past the last addressable row fall outside every range
        assert_eq!(cache.visible_range(u16::MAX - 10, 20), 1..2);
    }

    #[test]
    fn test_visible_range_covers_viewport() {
        let cache = cache_with(&[10; 20], 80); // 200 rows total
        let range = cache.visible_range(100, 20);
        // Viewport rows 100..120, buffered 90..130
        assert!(range.start <= 9);
        assert!(range.end >= 12);
        assert!(range.end <= 20);
    }

    #[test]
    fn test_select_previous_from_nothing_picks_last() {
        let mut state = state_with(&[3, 3, 3], 20);
        state.select_previous(3);
        assert_eq!(state.selected_index, Some(2));
        state.select_previous(3);
        assert_eq!(state.selected_index, Some(1));
    }

    #[test]
    fn test_select_next_stops_at_end() {
        let mut state = state_with(&[3, 3], 20);
        state.select(Some(1));
        state.select_next(2);
        assert_eq!(state.selected_index, Some(1));
    }

    #[test]
    fn test_selection_change_resets_active_block() {
        let mut state = state_with(&[3, 3], 20);
        state.select(Some(0));
        state.cycle_code_block(3);
        assert_eq!(state.active_block, 1);
        state.select(Some(0));
        assert_eq!(state.active_block, 1);
        state.select(Some(1));
        assert_eq!(state.active_block, 0);
    }

    #[test]
    fn test_cycle_code_block_wraps() {
        let mut state = MessageListState::new();
        state.cycle_code_block(2);
        state.cycle_code_block(2);
        assert_eq!(state.active_block, 0);
        state.cycle_code_block(0);
        assert_eq!(state.active_block, 0);
    }

    #[test]
    fn test_copy_target() {
        let mut state = MessageListState::new();
        assert_eq!(state.copy_target(2), None);
        state.select(Some(4));
        assert_eq!(state.copy_target(0), None);
        state.active_block = 5;
        assert_eq!(state.copy_target(2), Some(CodeRef { message: 4, block: 1 }));
    }

    #[test]
    fn test_scroll_to_selected_above_viewport() {
        let mut state = state_with(&[10, 10, 10, 10], 10);
        state.scroll_state.set_offset(Position { x: 0, y: 30 });
        state.select(Some(0));
        state.scroll_to_selected();
        assert_eq!(state.scroll_state.offset().y, 0);
        assert!(!state.stick_to_bottom);
    }

    #[test]
    fn test_scroll_to_selected_below_viewport_repins_at_bottom() {
        let mut state = state_with(&[10, 10, 10, 10], 10);
        state.stick_to_bottom = false;
        state.select(Some(3));
        state.scroll_to_selected();
        assert_eq!(state.scroll_state.offset().y, 30);
        assert!(state.stick_to_bottom);
    }

    #[test]
    fn test_render_empty_shows_welcome() {
        let mut state = MessageListState::new();
        let backend = TestBackend::new(60, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let mut list = MessageList {
                    state: &mut state,
                    messages: &[],
                    is_typing: false,
                    spinner_frame: 0,
                    copied: None,
                    show_active_block: false,
                };
                list.render(f, f.area());
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Ask me anything during the meeting."));
    }

    #[test]
    fn test_render_messages_fills_cache_and_shows_typing() {
        let messages = vec![
            ChatMessage::user("Hello"),
            ChatMessage::assistant("```sh\nls\n```", Source::Model),
        ];
        let mut state = MessageListState::new();
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let mut list = MessageList {
                    state: &mut state,
                    messages: &messages,
                    is_typing: true,
                    spinner_frame: 3,
                    copied: Some(CodeRef { message: 1, block: 0 }),
                    show_active_block: false,
                };
                list.render(f, f.area());
            })
            .unwrap();

        assert_eq!(state.layout.heights.len(), 2);
        assert_eq!(state.layout.heights[0], 3);
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Hello"));
        assert!(text.contains("✓ copied"));
        assert!(text.contains("AI Assistant is thinking..."));
    }
}
