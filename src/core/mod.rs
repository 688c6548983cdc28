//! # Core Application Logic
//!
//! This module contains iotctl's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Action (requests)    │
//!                    │  • ActionHandler        │
//!                    │  • App + update()       │
//!                    │                         │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │    CLI     │      │ Transport  │
//!     │   Panel    │      │  one-shot  │      │ (reqwest)  │
//!     │ (ratatui)  │      │  (main.rs) │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`action`]: The `Action` type and the built-in device actions
//! - [`handler`]: `ActionHandler`, the mode-dispatched request/response logic
//! - [`sim`]: Simulated outcomes
//! - [`sink`]: Where outcome strings are written
//! - [`config`]: File, env and CLI settings
//! - [`state`] / [`update`]: Panel state and its reducer

pub mod action;
pub mod config;
pub mod handler;
pub mod sim;
pub mod sink;
pub mod state;
pub mod update;

pub use action::Action;
pub use handler::{ActionHandler, ConfigError, Outcome};
