//! # Actions
//!
//! Every button on the panel and every CLI subcommand becomes an `Action`:
//! an HTTP verb, a key naming the backend resource, and an optional JSON body.
//!
//! ```text
//! Action { verb: POST, key: "light", body: {"state":"on"} }
//!        │
//!        ├── Simulated   → "Light switched ON (sim)"
//!        ├── DummyRemote → POST {echo}/post
//!        └── RealBackend → POST {base_url}/api/mqtt/light
//! ```
//!
//! The key is ignored in `DummyRemote` mode. `url` overrides the backend path
//! for the single-command device variant.

use std::fmt;

use serde::Serialize;
use serde_json::json;

pub use crate::transport::Verb;

/// Key used by the single-command device variant.
pub const COMMAND_KEY: &str = "command";

/// Largest servo angle the backend accepts.
pub const MAX_MOTION_ANGLE: u8 = 90;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub label: String,
    pub verb: Verb,
    pub key: String,
    pub body: Option<String>,
    /// Full target URL, used instead of `{base_url}/api/mqtt/{key}`.
    pub url: Option<String>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn label(self) -> &'static str {
        match self {
            Direction::Left => "Left",
            Direction::Right => "Right",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    AngleOutOfRange(u8),
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::AngleOutOfRange(angle) => {
                write!(f, "angle {angle} out of range (0-{MAX_MOTION_ANGLE})")
            }
        }
    }
}

impl std::error::Error for ActionError {}

impl Action {
    pub fn get(label: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            verb: Verb::Get,
            key: key.into(),
            body: None,
            url: None,
        }
    }

    pub fn post(label: impl Into<String>, key: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            verb: Verb::Post,
            key: key.into(),
            body: Some(body.into()),
            url: None,
        }
    }

    pub fn get_temperature() -> Self {
        Self::get("Get Temperature", "temperature")
    }

    pub fn get_humidity() -> Self {
        Self::get("Get Humidity", "humidity")
    }

    pub fn light_on() -> Self {
        Self::post("Light On", "light", json!({ "state": "on" }).to_string())
    }

    pub fn light_off() -> Self {
        Self::post("Light Off", "light", json!({ "state": "off" }).to_string())
    }

    pub fn light_status() -> Self {
        Self::get("Light Status", "light")
    }

    pub fn motion(direction: Direction, angle: u8) -> Result<Self, ActionError> {
        if angle > MAX_MOTION_ANGLE {
            return Err(ActionError::AngleOutOfRange(angle));
        }
        let body = json!({ "direction": direction, "angle": angle }).to_string();
        Ok(Self::post(
            format!("Motion {} {}°", direction.label(), angle),
            "motion",
            body,
        ))
    }

    pub fn motion_status() -> Self {
        Self::get("Motion Status", "motion")
    }

    pub fn backend_status() -> Self {
        Self::get("Backend Status", "status")
    }

    /// Single GET against a caller-supplied device URL.
    pub fn device_command(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::get("Send Command", COMMAND_KEY)
        }
    }
}

/// The buttons shown on the panel, in display order.
pub fn catalogue(device_url: &str) -> Vec<Action> {
    let mut actions = vec![
        Action::get_temperature(),
        Action::get_humidity(),
        Action::light_on(),
        Action::light_off(),
        Action::light_status(),
    ];
    actions.extend(
        [Direction::Left, Direction::Right]
            .into_iter()
            .filter_map(|d| Action::motion(d, 45).ok()),
    );
    actions.push(Action::motion_status());
    actions.push(Action::backend_status());
    actions.push(Action::device_command(device_url));
    actions
}
