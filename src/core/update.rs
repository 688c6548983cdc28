//! # Messages
//!
//! Everything that can happen on the panel becomes a `Msg`.
//! User presses Enter? That's `Msg::Trigger`.
//! A request finishes? That's `Msg::Completed { .. }`.
//!
//! `update()` takes the current state and a message, mutates the state and
//! returns an `Effect` for the caller to perform. No I/O here.
//!
//! ```text
//! State + Msg  →  update()  →  New State + Effect
//! ```
//!
//! Every dispatch gets a fresh run id. Messages from a task carry that id,
//! and anything not matching the run in flight is dropped.

use chrono::Local;
use log::debug;

use super::action::Action;
use super::state::{App, HistoryEntry, InFlight, MAX_HISTORY, mode_status};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    SelectPrev,
    SelectNext,
    /// Run the highlighted action.
    Trigger,
    CycleMode,
    /// Interim text from the running action.
    Progress { run: u64, text: String },
    Completed {
        run: u64,
        label: String,
        text: String,
        failed: bool,
    },
    Quit,
}

/// Work `update()` asks the caller to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Spawn the action tagged with `run`. Any action still in flight should
    /// be cancelled.
    Dispatch { run: u64, action: Action },
    Quit,
}

pub fn update(app: &mut App, msg: Msg) -> Effect {
    debug!("update: {:?}", msg);
    match msg {
        Msg::SelectPrev => {
            app.selected = app.selected.saturating_sub(1);
            Effect::None
        }
        Msg::SelectNext => {
            if !app.actions.is_empty() {
                app.selected = (app.selected + 1).min(app.actions.len() - 1);
            }
            Effect::None
        }
        Msg::Trigger => match app.selected_action().cloned() {
            Some(action) => {
                let run = app.next_run;
                app.next_run += 1;
                app.in_flight = Some(InFlight {
                    run,
                    label: action.label.clone(),
                });
                app.output = format!("{} …", action.label);
                app.output_failed = false;
                Effect::Dispatch { run, action }
            }
            None => Effect::None,
        },
        Msg::CycleMode => {
            app.mode = app.mode.next();
            app.status_message = mode_status(app.mode);
            Effect::None
        }
        Msg::Progress { run, text } => {
            if app.is_current(run) {
                app.output = text;
            }
            Effect::None
        }
        Msg::Completed {
            run,
            label,
            text,
            failed,
        } => {
            if !app.is_current(run) {
                debug!("Dropping stale result of run {} ('{}')", run, label);
                return Effect::None;
            }
            app.in_flight = None;
            app.output = text.clone();
            app.output_failed = failed;
            app.history.push(HistoryEntry {
                at: Local::now(),
                label,
                text,
                failed,
            });
            if app.history.len() > MAX_HISTORY {
                let excess = app.history.len() - MAX_HISTORY;
                app.history.drain(..excess);
            }
            Effect::None
        }
        Msg::Quit => Effect::Quit,
    }
}
