//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the panel,
//! and translates keyboard events into core `Msg` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Task Model
//!
//! Each triggered action runs as its own tokio task and reports back over a
//! `std::sync::mpsc` channel through a `ChannelSink`. Triggering a new action
//! aborts the one still in flight. Each spawn carries the run id from
//! `Effect::Dispatch`; results of an aborted run that were already queued
//! are dropped by the reducer.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use ratatui::widgets::ListState;

use crate::core::action::Action;
use crate::core::config::ResolvedConfig;
use crate::core::handler::ActionHandler;
use crate::core::sink::ChannelSink;
use crate::core::state::App;
use crate::core::update::{Effect, Msg, update};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Poll timeout while a request is running.
const BUSY_POLL: Duration = Duration::from_millis(50);
const IDLE_POLL: Duration = Duration::from_millis(250);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub list_state: ListState,
}

impl TuiState {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self { list_state }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), Hide)?;
        info!("Terminal modes enabled (cursor hidden)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show);
    }
}

/// Maps a key event to a core message. `Resize` only needs a redraw.
fn to_msg(event: TuiEvent) -> Option<Msg> {
    match event {
        TuiEvent::Quit | TuiEvent::ForceQuit => Some(Msg::Quit),
        TuiEvent::CursorUp => Some(Msg::SelectPrev),
        TuiEvent::CursorDown => Some(Msg::SelectNext),
        TuiEvent::Submit => Some(Msg::Trigger),
        TuiEvent::CycleMode => Some(Msg::CycleMode),
        TuiEvent::Resize => None,
    }
}

pub fn run(config: ResolvedConfig, handler: Arc<ActionHandler>) -> std::io::Result<()> {
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for messages from background tasks
    let (tx, rx) = mpsc::channel();

    // Abort handle for the action in flight
    let mut active: Option<tokio::task::AbortHandle> = None;
    let mut needs_redraw = true; // Force first frame

    let result = loop {
        if needs_redraw {
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &app, &mut tui)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        let timeout = if app.is_busy() { BUSY_POLL } else { IDLE_POLL };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            needs_redraw = true;
            let Some(msg) = to_msg(event) else {
                continue;
            };
            match update(&mut app, msg) {
                Effect::Quit => should_quit = true,
                Effect::Dispatch { run, action } => {
                    if let Some(handle) = active.take() {
                        debug!("Aborting action still in flight");
                        handle.abort();
                    }
                    active = Some(spawn_action(&app, run, action, handler.clone(), tx.clone()));
                }
                Effect::None => {}
            }
        }

        if should_quit {
            break Ok(());
        }

        // Handle messages from background tasks
        while let Ok(msg) = rx.try_recv() {
            needs_redraw = true;
            let finished = matches!(msg, Msg::Completed { .. });
            update(&mut app, msg);
            if finished && !app.is_busy() {
                active = None;
            }
        }
    };

    if let Some(handle) = active.take() {
        handle.abort();
    }
    ratatui::restore();
    result
}

fn spawn_action(
    app: &App,
    run: u64,
    action: Action,
    handler: Arc<ActionHandler>,
    tx: mpsc::Sender<Msg>,
) -> tokio::task::AbortHandle {
    info!("Spawning '{}' (run {}) in {:?} mode", action.label, run, app.mode);

    let mode = app.mode;
    let base_url = app.base_url.clone();

    let handle = tokio::spawn(async move {
        let sink = ChannelSink::new(tx.clone(), run, action.label.clone());
        if let Err(e) = handler.dispatch(&action, mode, &base_url, &sink).await {
            // Config errors end the action without a network outcome.
            if tx
                .send(Msg::Completed {
                    run,
                    label: action.label.clone(),
                    text: format!("✗ {e}"),
                    failed: true,
                })
                .is_err()
            {
                warn!("Failed to report config error for '{}': receiver dropped", action.label);
            }
        }
    });

    handle.abort_handle()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mode;
    use crate::test_support::StubTransport;

    #[test]
    fn test_key_events_map_to_messages() {
        assert_eq!(to_msg(TuiEvent::Submit), Some(Msg::Trigger));
        assert_eq!(to_msg(TuiEvent::ForceQuit), Some(Msg::Quit));
        assert_eq!(to_msg(TuiEvent::CycleMode), Some(Msg::CycleMode));
        assert_eq!(to_msg(TuiEvent::Resize), None);
    }

    #[tokio::test]
    async fn test_spawned_action_reports_outcome() {
        let handler = Arc::new(
            ActionHandler::new(Arc::new(StubTransport::ok("unused")))
                .with_sim_delay(Duration::ZERO),
        );
        let app = crate::test_support::test_app();
        let (tx, rx) = mpsc::channel();

        spawn_action(&app, 4, Action::light_off(), handler, tx);

        let msg = tokio::task::spawn_blocking(move || {
            let mut last = None;
            while let Ok(msg) = rx.recv() {
                last = Some(msg);
            }
            last
        })
        .await
        .unwrap();

        assert_eq!(
            msg,
            Some(Msg::Completed {
                run: 4,
                label: "Light Off".into(),
                text: "Light switched OFF (sim)".into(),
                failed: false,
            })
        );
    }

    #[tokio::test]
    async fn test_spawned_config_error_is_reported_as_failure() {
        let handler = Arc::new(ActionHandler::new(Arc::new(StubTransport::ok("unused"))));
        let mut app = crate::test_support::test_app();
        app.mode = Mode::RealBackend;
        app.base_url = String::new();
        let (tx, rx) = mpsc::channel();

        spawn_action(&app, 0, Action::get_temperature(), handler, tx);

        let msgs = tokio::task::spawn_blocking(move || rx.iter().collect::<Vec<_>>())
            .await
            .unwrap();

        assert_eq!(
            msgs.last(),
            Some(&Msg::Completed {
                run: 0,
                label: "Get Temperature".into(),
                text: "✗ config error: no backend URL configured".into(),
                failed: true,
            })
        );
    }
}
