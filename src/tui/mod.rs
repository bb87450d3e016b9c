//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (waiting for an answer or summary notes, copy flash
//!   showing): draws every ~80ms so spinners move and the flash expires on time.
//! - **Idle**: sleeps up to 500ms, redrawing only on events, background
//!   actions, or when the meeting clock shows a new second.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

mod component;
mod components;
mod event;
pub mod render;
mod ui;

use log::{debug, error, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::layout::Rect;

use crate::backend::{AssistantBackend, HttpBackend};
use crate::content::{SystemClipboard, request_copy};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, CodeRef};
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState, SummaryPanel};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Modal input mode: determines how keyboard events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Pick a message with arrow keys, cycle its code blocks, copy. Typing switches to Input.
    Cursor,
    /// Text editing in the input box. Esc switches to Cursor.
    Input,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub message_list: MessageListState,
    pub input_box: InputBox,
    pub input_mode: InputMode,
    /// Block showing the "copied" indicator and when it started
    pub copy_flash: Option<(CodeRef, Instant)>,
    /// How long the indicator stays up
    pub copy_feedback: Duration,
    /// Summary overlay scroll offset in rows
    pub summary_scroll: u16,
}

impl TuiState {
    pub fn new(copy_feedback: Duration) -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
            input_mode: InputMode::Input, // User expects to type immediately
            copy_flash: None,
            copy_feedback,
            summary_scroll: 0,
        }
    }

    /// Drop the copy indicator once it has been visible long enough.
    /// Returns true if it was cleared.
    fn expire_copy_flash(&mut self, now: Instant) -> bool {
        match self.copy_flash {
            Some((_, started)) if now.duration_since(started) >= self.copy_feedback => {
                self.copy_flash = None;
                true
            }
            _ => false,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

/// Work the event loop has to start after routing one terminal event.
#[derive(Debug, PartialEq)]
enum Command {
    Run(Effect),
    Copy { target: CodeRef, code: String },
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let backend = HttpBackend::new(config.backend_url.clone(), config.request_timeout)
        .map_err(|e| {
            error!("Cannot build backend client: {}", e);
            std::io::Error::other(e.to_string())
        })?;
    info!(
        "Using {} backend at {} (session {})",
        backend.name(),
        backend.base_url(),
        config.session_id
    );
    let mut app = App::from_config(Arc::new(backend), &config);
    let mut tui = TuiState::new(config.copy_feedback);

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    if config.check_health {
        spawn_health_check(&app, tx.clone());
    }

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Animation timer
    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame
    let mut drawn_clock = String::new();

    'main: loop {
        if tui.expire_copy_flash(Instant::now()) {
            needs_redraw = true;
        }

        // Sync InputBox props with App/TUI state
        tui.input_box.waiting = app.is_typing;
        tui.input_box.focused = app.summary.is_none() && tui.input_mode == InputMode::Input;

        let animating = app.is_typing || app.summary_pending || tui.copy_flash.is_some();
        let clock = app.meeting_duration();
        if animating || clock != drawn_clock {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            tui.input_box.spinner_frame = spinner_frame;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            drawn_clock = clock;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let frame_area = terminal.get_frame().area();
            let Some(command) = route_event(&mut app, &mut tui, event, frame_area) else {
                continue;
            };
            match command {
                Command::Run(effect) => {
                    if apply_effect(effect, &app, &mut tui, &tx) {
                        break 'main;
                    }
                }
                Command::Copy { target, code } => spawn_copy(target, code, tx.clone()),
            }
        }

        // Handle background task actions (answers, summary notes, copy results)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if apply_effect(effect, &app, &mut tui, &tx) {
                break 'main;
            }
        }
    }

    info!(
        "Meeting ended after {} with {} messages",
        app.meeting_duration(),
        app.messages.len()
    );
    ratatui::restore();
    Ok(())
}

/// Translate one terminal event into state changes, returning the work
/// (if any) the loop has to start.
fn route_event(
    app: &mut App,
    tui: &mut TuiState,
    event: TuiEvent,
    frame_area: Rect,
) -> Option<Command> {
    // Keep the submit guard current within a single drain of events
    tui.input_box.waiting = app.is_typing;

    match event {
        // Resize just needs a redraw
        TuiEvent::Resize => return None,
        // ForceQuit (Ctrl+C) always quits regardless of mode
        TuiEvent::ForceQuit => return Some(Command::Run(update(app, Action::Quit))),
        _ => {}
    }

    // While the summary overlay is open it takes every other key
    if app.summary.is_some() {
        match event {
            TuiEvent::Escape | TuiEvent::Submit => {
                update(app, Action::CloseSummary);
                tui.summary_scroll = 0;
            }
            TuiEvent::CursorUp | TuiEvent::ScrollUp => {
                tui.summary_scroll = tui.summary_scroll.saturating_sub(1);
            }
            TuiEvent::CursorDown | TuiEvent::ScrollDown => {
                tui.summary_scroll = tui.summary_scroll.saturating_add(1);
            }
            TuiEvent::ScrollPageUp => tui.summary_scroll = tui.summary_scroll.saturating_sub(10),
            TuiEvent::ScrollPageDown => tui.summary_scroll = tui.summary_scroll.saturating_add(10),
            _ => {}
        }
        if let Some(summary) = &app.summary {
            let panel = SummaryPanel {
                summary,
                pending: app.summary_pending,
                spinner_frame: 0,
                scroll: tui.summary_scroll,
            };
            tui.summary_scroll = tui.summary_scroll.min(panel.max_scroll(frame_area));
        }
        return None;
    }

    if event == TuiEvent::OpenSummary {
        tui.summary_scroll = 0;
        return Some(Command::Run(update(app, Action::OpenSummary)));
    }

    // Mouse hover, always active regardless of mode
    if let TuiEvent::MouseMove(_col, row) = event {
        let scroll_offset = tui.message_list.scroll_state.offset().y;
        let input_height = tui.input_box.calculate_height(frame_area.width);
        tui.message_list.hovered_index = ui::hit_test_message(
            row,
            frame_area,
            scroll_offset,
            &tui.message_list.layout.prefix_heights,
            input_height,
        );
        return None;
    }

    // Scroll events always go to MessageList regardless of mode
    if matches!(
        event,
        TuiEvent::ScrollUp | TuiEvent::ScrollDown | TuiEvent::ScrollPageUp | TuiEvent::ScrollPageDown
    ) {
        tui.message_list.handle_event(&event);
        return None;
    }

    match tui.input_mode {
        InputMode::Input => {
            if event == TuiEvent::Escape {
                tui.input_mode = InputMode::Cursor;
                // Start from the newest message
                let last = app.messages.len().checked_sub(1);
                tui.message_list.select(last);
                tui.message_list.scroll_to_selected();
                return None;
            }
            match tui.input_box.handle_event(&event)? {
                InputEvent::Submit(text) => Some(Command::Run(update(app, Action::Submit(text)))),
                InputEvent::ContentChanged => None,
            }
        }
        InputMode::Cursor => match event {
            TuiEvent::Escape | TuiEvent::Submit => {
                tui.input_mode = InputMode::Input;
                tui.message_list.select(None);
                None
            }
            TuiEvent::CursorUp => {
                tui.message_list.select_previous(app.messages.len());
                None
            }
            TuiEvent::CursorDown => {
                tui.message_list.select_next(app.messages.len());
                None
            }
            TuiEvent::NextCodeBlock => {
                if let Some(idx) = tui.message_list.selected_index {
                    tui.message_list.cycle_code_block(app.code_block_count(idx));
                }
                None
            }
            TuiEvent::InputChar('y') => {
                let blocks = tui
                    .message_list
                    .selected_index
                    .map_or(0, |idx| app.code_block_count(idx));
                let Some(target) = tui.message_list.copy_target(blocks) else {
                    app.status_message = "No code block to copy".to_string();
                    return None;
                };
                let code = app.code_at(target)?;
                Some(Command::Copy { target, code })
            }
            // Typing auto-switches to Input mode and forwards the event
            TuiEvent::InputChar(_) | TuiEvent::Paste(_) => {
                tui.input_mode = InputMode::Input;
                tui.message_list.select(None);
                tui.input_box.handle_event(&event);
                None
            }
            _ => None,
        },
    }
}

/// Start whatever `effect` asks for. Returns true when the loop should quit.
fn apply_effect(
    effect: Effect,
    app: &App,
    tui: &mut TuiState,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match effect {
        Effect::None => {}
        Effect::SpawnAsk(question) => spawn_ask(app, question, tx.clone()),
        Effect::SpawnSummary { duration } => spawn_summary(app, duration, tx.clone()),
        Effect::FlashCopied(target) => tui.copy_flash = Some((target, Instant::now())),
        Effect::Quit => return true,
    }
    false
}

fn send_action(tx: &mpsc::Sender<Action>, action: Action) {
    if tx.send(action).is_err() {
        warn!("Failed to send action: receiver dropped");
    }
}

fn spawn_ask(app: &App, question: String, tx: mpsc::Sender<Action>) {
    info!("Spawning ask request ({} chars)", question.len());
    let backend = Arc::clone(&app.backend);
    let session_id = app.session_id.clone();
    tokio::spawn(async move {
        let request_start = Instant::now();
        let action = match backend.ask(&question, &session_id).await {
            Ok(answer) => {
                debug!(
                    "Answer received in {}ms",
                    request_start.elapsed().as_millis()
                );
                Action::AnswerReceived(answer)
            }
            Err(e) => Action::AnswerFailed(e),
        };
        send_action(&tx, action);
    });
}

fn spawn_summary(app: &App, duration: String, tx: mpsc::Sender<Action>) {
    info!("Spawning summary request (duration {})", duration);
    let backend = Arc::clone(&app.backend);
    let session_id = app.session_id.clone();
    tokio::spawn(async move {
        let result = backend.summarize(&session_id, &duration).await;
        send_action(&tx, Action::SummaryNotes(result));
    });
}

fn spawn_health_check(app: &App, tx: mpsc::Sender<Action>) {
    let backend = Arc::clone(&app.backend);
    tokio::spawn(async move {
        let result = backend.health().await;
        send_action(&tx, Action::HealthChecked(result));
    });
}

/// Clipboard access can block on some platforms, so it runs off the async workers.
fn spawn_copy(target: CodeRef, code: String, tx: mpsc::Sender<Action>) {
    debug!("Copying block {} of message {}", target.block, target.message);
    tokio::task::spawn_blocking(move || {
        let result = request_copy(&mut SystemClipboard, &code);
        send_action(&tx, Action::CopyFinished { target, result });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::{Message, Source};
    use crate::test_support::test_app;

    const FRAME: Rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };

    fn tui() -> TuiState {
        TuiState::new(Duration::from_millis(2000))
    }

    fn app_with_code() -> App {
        let mut app = test_app();
        app.messages.push(Message::user("Show me"));
        app.messages.push(Message::assistant(
            "First:\n```sh\nls\n```\nSecond:\n```sh\npwd\n```",
            Source::Model,
        ));
        app
    }

    fn type_text(app: &mut App, tui: &mut TuiState, text: &str) {
        for c in text.chars() {
            route_event(app, tui, TuiEvent::InputChar(c), FRAME);
        }
    }

    #[test]
    fn enter_submits_draft_and_spawns_ask() {
        let mut app = test_app();
        let mut tui = tui();
        type_text(&mut app, &mut tui, "Agenda?");
        let command = route_event(&mut app, &mut tui, TuiEvent::Submit, FRAME);
        assert_eq!(
            command,
            Some(Command::Run(Effect::SpawnAsk("Agenda?".to_string())))
        );
        assert!(tui.input_box.buffer.is_empty());
        assert!(app.is_typing);
    }

    #[test]
    fn second_submit_while_waiting_keeps_draft() {
        let mut app = test_app();
        let mut tui = tui();
        type_text(&mut app, &mut tui, "one");
        route_event(&mut app, &mut tui, TuiEvent::Submit, FRAME);
        type_text(&mut app, &mut tui, "two");
        let command = route_event(&mut app, &mut tui, TuiEvent::Submit, FRAME);
        assert_eq!(command, None);
        assert_eq!(tui.input_box.buffer, "two");
        assert_eq!(app.messages.len(), 1);
    }

    #[test]
    fn escape_toggles_modes_and_selects_newest() {
        let mut app = app_with_code();
        let mut tui = tui();
        route_event(&mut app, &mut tui, TuiEvent::Escape, FRAME);
        assert_eq!(tui.input_mode, InputMode::Cursor);
        assert_eq!(tui.message_list.selected_index, Some(1));

        route_event(&mut app, &mut tui, TuiEvent::Escape, FRAME);
        assert_eq!(tui.input_mode, InputMode::Input);
        assert_eq!(tui.message_list.selected_index, None);
    }

    #[test]
    fn y_copies_active_block() {
        let mut app = app_with_code();
        let mut tui = tui();
        route_event(&mut app, &mut tui, TuiEvent::Escape, FRAME);

        let command = route_event(&mut app, &mut tui, TuiEvent::InputChar('y'), FRAME);
        assert_eq!(
            command,
            Some(Command::Copy {
                target: CodeRef { message: 1, block: 0 },
                code: "ls".to_string(),
            })
        );

        route_event(&mut app, &mut tui, TuiEvent::NextCodeBlock, FRAME);
        let command = route_event(&mut app, &mut tui, TuiEvent::InputChar('y'), FRAME);
        assert_eq!(
            command,
            Some(Command::Copy {
                target: CodeRef { message: 1, block: 1 },
                code: "pwd".to_string(),
            })
        );
    }

    #[test]
    fn y_without_code_reports_status() {
        let mut app = app_with_code();
        let mut tui = tui();
        route_event(&mut app, &mut tui, TuiEvent::Escape, FRAME);
        route_event(&mut app, &mut tui, TuiEvent::CursorUp, FRAME);
        assert_eq!(tui.message_list.selected_index, Some(0));

        let command = route_event(&mut app, &mut tui, TuiEvent::InputChar('y'), FRAME);
        assert_eq!(command, None);
        assert_eq!(app.status_message, "No code block to copy");
    }

    #[test]
    fn typing_in_cursor_mode_returns_to_input() {
        let mut app = app_with_code();
        let mut tui = tui();
        route_event(&mut app, &mut tui, TuiEvent::Escape, FRAME);
        route_event(&mut app, &mut tui, TuiEvent::InputChar('h'), FRAME);
        assert_eq!(tui.input_mode, InputMode::Input);
        assert_eq!(tui.input_box.buffer, "h");
    }

    #[test]
    fn summary_overlay_captures_keys_until_closed() {
        let mut app = app_with_code();
        let mut tui = tui();
        let command = route_event(&mut app, &mut tui, TuiEvent::OpenSummary, FRAME);
        assert!(matches!(
            command,
            Some(Command::Run(Effect::SpawnSummary { .. }))
        ));
        assert!(app.summary.is_some());

        // Typing is swallowed while the panel is open
        route_event(&mut app, &mut tui, TuiEvent::InputChar('x'), FRAME);
        assert!(tui.input_box.buffer.is_empty());
        // Nothing to scroll while the body fits
        route_event(&mut app, &mut tui, TuiEvent::CursorDown, FRAME);
        assert_eq!(tui.summary_scroll, 0);

        route_event(&mut app, &mut tui, TuiEvent::Escape, FRAME);
        assert!(app.summary.is_none());
        assert_eq!(tui.summary_scroll, 0);
        assert_eq!(tui.input_mode, InputMode::Input);
    }

    #[test]
    fn summary_scroll_is_clamped_to_content() {
        let mut app = app_with_code();
        let mut tui = tui();
        route_event(&mut app, &mut tui, TuiEvent::OpenSummary, FRAME);
        let notes = (1..=40)
            .map(|n| format!("- point {n}"))
            .collect::<Vec<_>>()
            .join("\n");
        update(&mut app, Action::SummaryNotes(Ok(notes)));

        route_event(&mut app, &mut tui, TuiEvent::CursorDown, FRAME);
        assert_eq!(tui.summary_scroll, 1);

        for _ in 0..20 {
            route_event(&mut app, &mut tui, TuiEvent::ScrollPageDown, FRAME);
        }
        let max = tui.summary_scroll;
        assert!(max > 1 && max < 200);

        // One press back up moves off the last page
        route_event(&mut app, &mut tui, TuiEvent::CursorUp, FRAME);
        assert_eq!(tui.summary_scroll, max - 1);
    }

    #[test]
    fn force_quit_from_any_mode() {
        let mut app = test_app();
        let mut tui = tui();
        tui.input_mode = InputMode::Cursor;
        assert_eq!(
            route_event(&mut app, &mut tui, TuiEvent::ForceQuit, FRAME),
            Some(Command::Run(Effect::Quit))
        );
    }

    #[test]
    fn copy_flash_expires_after_feedback_window() {
        let mut tui = tui();
        let start = Instant::now();
        tui.copy_flash = Some((CodeRef { message: 0, block: 0 }, start));
        assert!(!tui.expire_copy_flash(start + Duration::from_millis(500)));
        assert!(tui.copy_flash.is_some());
        assert!(tui.expire_copy_flash(start + Duration::from_millis(2000)));
        assert!(tui.copy_flash.is_none());
    }

    #[test]
    fn flash_effect_records_target() {
        let app = test_app();
        let mut tui = tui();
        let (tx, _rx) = mpsc::channel();
        let target = CodeRef { message: 1, block: 0 };
        assert!(!apply_effect(Effect::FlashCopied(target), &app, &mut tui, &tx));
        assert_eq!(tui.copy_flash.map(|(t, _)| t), Some(target));
        assert!(apply_effect(Effect::Quit, &app, &mut tui, &tx));
    }
}
