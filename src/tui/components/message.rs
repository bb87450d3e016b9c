use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::message::{Message as ChatMessage, Role, Source};
use crate::tui::component::Component;
use crate::tui::render::{CodeMarks, render_segments};

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders one chat bubble.
///
/// The title carries the role and time (`You · 02:05 PM`); assistant answers
/// also get a right-aligned source badge. The body goes through the segment
/// renderer, so code blocks and bullets look the same everywhere.
///
/// # Height Calculation
///
/// [`calculate_height`](Self::calculate_height) renders the body and asks
/// `Paragraph::line_count` for the wrapped height, using the same wrap
/// settings as `render`. Copy hints have a fixed width, so heights don't
/// depend on [`CodeMarks`] and can be cached per message.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub message: &'a ChatMessage,
    pub is_hovered: bool,
    pub is_selected: bool,
    pub marks: CodeMarks,
}

impl<'a> Message<'a> {
    pub fn new(
        message: &'a ChatMessage,
        is_hovered: bool,
        is_selected: bool,
        marks: CodeMarks,
    ) -> Self {
        Self {
            message,
            is_hovered,
            is_selected,
            marks,
        }
    }

    pub fn calculate_height(message: &ChatMessage, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Degenerate case: terminal too narrow for borders + padding.
            return 1;
        }

        let body = render_segments(
            &message.segments(),
            role_color(message.role),
            CodeMarks::default(),
        );
        let lines = Paragraph::new(body)
            .wrap(Wrap { trim: false })
            .line_count(content_width);
        u16::try_from(lines)
            .unwrap_or(u16::MAX)
            .max(1)
            .saturating_add(VERTICAL_OVERHEAD)
    }
}

fn role_color(role: Role) -> Color {
    match role {
        Role::User => Color::Green,
        Role::Assistant => Color::Blue,
    }
}

fn badge(source: Source) -> Span<'static> {
    let color = match source {
        Source::Dataset => Color::Green,
        Source::Model => Color::Magenta,
    };
    Span::styled(
        format!(" {} ", source.label()),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let color = role_color(self.message.role);
        let style = Style::default().fg(color);

        // Selection overrides hover: cyan border for selected, bright for hover, dim otherwise
        let border_style = if self.is_selected {
            Style::default().fg(Color::Cyan)
        } else if self.is_hovered {
            style
        } else {
            style.add_modifier(Modifier::DIM)
        };

        let title = Line::from(vec![
            Span::styled(
                format!(" {}", self.message.role.label()),
                style.add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" · {} ", self.message.time_label()),
                Style::default().fg(Color::DarkGray),
            ),
        ]);

        let mut block = Block::bordered()
            .title(title)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));
        if let Some(source) = self.message.source {
            block = block.title(Line::from(badge(source)).right_aligned());
        }

        let inner_area = block.inner(area);
        block.render(area, buf);

        let body = render_segments(&self.message.segments(), color, self.marks);
        Paragraph::new(body)
            .wrap(Wrap { trim: false })
            .render(inner_area, buf);
    }
}

impl<'a> Component for Message<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
