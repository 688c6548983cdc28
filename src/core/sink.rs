//! # Output Sinks
//!
//! Where outcome strings go. The handler never knows whether it is writing to
//! a log, a terminal, or the panel's output area.

use std::sync::mpsc::Sender;

use log::{error, info};

use super::handler::Outcome;
use super::update::Msg;

pub trait OutputSink: Send + Sync {
    /// Interim status while the request is in flight.
    fn progress(&self, _text: &str) {}

    /// The final outcome of one action.
    fn outcome(&self, outcome: &Outcome);
}

/// Writes everything to the log. Failures go out at `error`.
///
/// Used by `--quiet` one-shot runs.
pub struct LogSink;

impl OutputSink for LogSink {
    fn progress(&self, text: &str) {
        info!("{}", text);
    }

    fn outcome(&self, outcome: &Outcome) {
        if outcome.is_failure() {
            error!("{}", outcome);
        } else {
            info!("{}", outcome);
        }
    }
}

/// Prints to the terminal for one-shot CLI use.
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn progress(&self, text: &str) {
        println!("{text}");
    }

    fn outcome(&self, outcome: &Outcome) {
        println!("{outcome}");
    }
}

/// Forwards to the panel's event loop, tagging every message with the run id
/// of the dispatch it belongs to.
///
/// A closed receiver means the panel is gone, so send errors are dropped.
pub struct ChannelSink {
    sender: Sender<Msg>,
    run: u64,
    label: String,
}

impl ChannelSink {
    pub fn new(sender: Sender<Msg>, run: u64, label: impl Into<String>) -> Self {
        Self {
            sender,
            run,
            label: label.into(),
        }
    }
}

impl OutputSink for ChannelSink {
    fn progress(&self, text: &str) {
        let _ = self.sender.send(Msg::Progress {
            run: self.run,
            text: text.to_string(),
        });
    }

    fn outcome(&self, outcome: &Outcome) {
        let _ = self.sender.send(Msg::Completed {
            run: self.run,
            label: self.label.clone(),
            text: outcome.to_string(),
            failed: outcome.is_failure(),
        });
    }
}
