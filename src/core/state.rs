//! # Panel State
//!
//! Core business state for the button panel. Domain logic only; presentation
//! state (list widget selection, frame timing) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── mode: Mode                  // governs every action
//! ├── base_url: String            // backend root for RealBackend
//! ├── actions: Vec<Action>        // panel buttons
//! ├── selected: usize             // highlighted button
//! ├── output: String              // the result text area
//! ├── output_failed: bool         // last outcome was a failure
//! ├── in_flight: Option<InFlight> // run id + label of the running action
//! ├── next_run: u64               // id handed to the next dispatch
//! ├── history: Vec<HistoryEntry>  // completed outcomes, newest last
//! └── status_message: String      // title bar text
//! ```
//!
//! State changes only happen through `update(state, msg)` in update.rs.

use chrono::{DateTime, Local};

use super::action::{Action, catalogue};
use super::config::ResolvedConfig;
use crate::Mode;

/// Oldest entries are dropped beyond this.
pub const MAX_HISTORY: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub at: DateTime<Local>,
    pub label: String,
    pub text: String,
    pub failed: bool,
}

/// The action currently running. `run` tags every message its task sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InFlight {
    pub run: u64,
    pub label: String,
}

pub struct App {
    pub mode: Mode,
    pub base_url: String,
    pub actions: Vec<Action>,
    pub selected: usize,
    pub output: String,
    pub output_failed: bool,
    pub in_flight: Option<InFlight>,
    pub next_run: u64,
    pub history: Vec<HistoryEntry>,
    pub status_message: String,
}

impl App {
    pub fn new(mode: Mode, base_url: String, device_url: &str) -> Self {
        Self {
            mode,
            base_url,
            actions: catalogue(device_url),
            selected: 0,
            output: String::from("Press Enter to run an action."),
            output_failed: false,
            in_flight: None,
            next_run: 0,
            history: Vec::new(),
            status_message: mode_status(mode),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config.mode, config.base_url.clone(), &config.device_url)
    }

    pub fn selected_action(&self) -> Option<&Action> {
        self.actions.get(self.selected)
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn running_label(&self) -> Option<&str> {
        self.in_flight.as_ref().map(|f| f.label.as_str())
    }

    /// True if `run` is the dispatch currently in flight.
    pub fn is_current(&self, run: u64) -> bool {
        self.in_flight.as_ref().is_some_and(|f| f.run == run)
    }
}

pub fn mode_status(mode: Mode) -> String {
    format!("Mode: {}", mode.label())
}
