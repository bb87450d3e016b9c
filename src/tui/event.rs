use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    /// Ctrl+C: quits from any mode
    ForceQuit,
    Submit,
    Escape,

    // Editing
    InputChar(char),
    Paste(String), // Bracketed paste - preserves newlines
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    CursorHome,
    CursorEnd,

    // Navigation
    NextCodeBlock, // Tab
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    MouseMove(u16, u16),

    OpenSummary, // Ctrl+S
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    if !event::poll(timeout).unwrap_or(false) {
        return None;
    }
    match event::read().ok()? {
        Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            map_key(key_event.modifiers, key_event.code)
        }
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::Moved => Some(TuiEvent::MouseMove(mouse_event.column, mouse_event.row)),
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

fn map_key(modifiers: KeyModifiers, code: KeyCode) -> Option<TuiEvent> {
    match (modifiers, code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
        (KeyModifiers::CONTROL, KeyCode::Char('s')) => Some(TuiEvent::OpenSummary),
        // Ctrl+J inserts newline (ASCII LF; Ctrl+Enter sends this in most terminals)
        (KeyModifiers::CONTROL, KeyCode::Char('j')) => Some(TuiEvent::InputChar('\n')),
        (KeyModifiers::CONTROL, _) => None,
        (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
        (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
        (_, KeyCode::Delete) => Some(TuiEvent::Delete),
        (_, KeyCode::Enter) => Some(TuiEvent::Submit),
        (_, KeyCode::Esc) => Some(TuiEvent::Escape),
        (_, KeyCode::Tab) => Some(TuiEvent::NextCodeBlock),
        (_, KeyCode::Left) => Some(TuiEvent::CursorLeft),
        (_, KeyCode::Right) => Some(TuiEvent::CursorRight),
        (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
        (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
        (_, KeyCode::Home) => Some(TuiEvent::CursorHome),
        (_, KeyCode::End) => Some(TuiEvent::CursorEnd),
        (_, KeyCode::PageUp) => Some(TuiEvent::ScrollPageUp),
        (_, KeyCode::PageDown) => Some(TuiEvent::ScrollPageDown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_chords() {
        assert_eq!(
            map_key(KeyModifiers::CONTROL, KeyCode::Char('c')),
            Some(TuiEvent::ForceQuit)
        );
        assert_eq!(
            map_key(KeyModifiers::CONTROL, KeyCode::Char('s')),
            Some(TuiEvent::OpenSummary)
        );
        assert_eq!(
            map_key(KeyModifiers::CONTROL, KeyCode::Char('j')),
            Some(TuiEvent::InputChar('\n'))
        );
        // Unbound chords don't leak into the draft as plain characters
        assert_eq!(map_key(KeyModifiers::CONTROL, KeyCode::Char('x')), None);
    }

    #[test]
    fn plain_and_shifted_characters_are_input() {
        assert_eq!(
            map_key(KeyModifiers::NONE, KeyCode::Char('y')),
            Some(TuiEvent::InputChar('y'))
        );
        assert_eq!(
            map_key(KeyModifiers::SHIFT, KeyCode::Char('Y')),
            Some(TuiEvent::InputChar('Y'))
        );
    }

    #[test]
    fn navigation_keys() {
        assert_eq!(map_key(KeyModifiers::NONE, KeyCode::Tab), Some(TuiEvent::NextCodeBlock));
        assert_eq!(map_key(KeyModifiers::NONE, KeyCode::Esc), Some(TuiEvent::Escape));
        assert_eq!(map_key(KeyModifiers::NONE, KeyCode::Enter), Some(TuiEvent::Submit));
        assert_eq!(map_key(KeyModifiers::NONE, KeyCode::Up), Some(TuiEvent::CursorUp));
    }
}
