//! iotctl library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod core;
pub mod transport;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// How every action behaves. Exactly one mode is active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Canned or randomised replies, no I/O
    #[default]
    Simulated,
    /// Real request against a public echo service
    DummyRemote,
    /// Real request against the device backend
    RealBackend,
}

impl Mode {
    /// Cycles to the next mode (wraps around)
    pub fn next(self) -> Mode {
        match self {
            Mode::Simulated => Mode::DummyRemote,
            Mode::DummyRemote => Mode::RealBackend,
            Mode::RealBackend => Mode::Simulated,
        }
    }

    /// Returns a human-readable label for display
    pub fn label(self) -> &'static str {
        match self {
            Mode::Simulated => "Simulated",
            Mode::DummyRemote => "Dummy Remote",
            Mode::RealBackend => "Real Backend",
        }
    }
}
