//! # Mode-Dispatched Action Handler
//!
//! Turns one `Action` into one outcome string. The active `Mode` decides
//! where (or whether) the request goes:
//!
//! ```text
//!                    ┌──────────────┐
//!   Action + Mode ──▶│ ActionHandler│
//!                    └──────┬───────┘
//!          ┌────────────────┼─────────────────┐
//!          ▼                ▼                 ▼
//!     Simulated        DummyRemote        RealBackend
//!     (sim.rs)        {echo}/get|post   {base}/api/mqtt/{key}
//!          │                └───────┬─────────┘
//!          │                        ▼
//!          │                  HttpTransport
//!          ▼                        ▼
//!   "Temp 23.4 °C (sim)"    "✓ body" / "✗ error"
//! ```
//!
//! Configuration problems are caught before anything is sent and returned as
//! `ConfigError`. Once a request is on the wire, every failure is folded into
//! `Outcome::Failed` and never escapes as an error.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info};

use super::action::{Action, Verb};
use super::config::ResolvedConfig;
use super::sim;
use super::sink::OutputSink;
use crate::Mode;
use crate::transport::{HttpRequest, HttpTransport, RequestFailed};

pub const DEFAULT_ECHO_BASE_URL: &str = "https://postman-echo.com";
pub const DEFAULT_SIM_DELAY: Duration = Duration::from_millis(500);

/// Marker left in the default URLs until the user sets a real device address.
pub const URL_PLACEHOLDER: &str = "YOUR_PI_IP";

/// Path prefix of the device backend's MQTT bridge routes.
const MQTT_API_PREFIX: &str = "/api/mqtt/";

// ============================================================================
// Outcome
// ============================================================================

/// The result of one action. `Display` renders the outcome string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Simulated(String),
    Success(String),
    Failed(RequestFailed),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Simulated(text) => f.write_str(text),
            Outcome::Success(body) => write!(f, "✓ {body}"),
            Outcome::Failed(e) => write!(f, "✗ {e}"),
        }
    }
}

/// Folds a transport result into an outcome.
pub fn render_outcome(result: Result<String, RequestFailed>) -> Outcome {
    match result {
        Ok(body) => Outcome::Success(body),
        Err(e) => Outcome::Failed(e),
    }
}

// ============================================================================
// Error Type
// ============================================================================

/// Malformed configuration, detected before dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Base URL (or the action's URL override) is empty.
    MissingUrl,
    /// URL still holds the `YOUR_PI_IP` placeholder.
    Placeholder(String),
    InvalidUrl { url: String, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingUrl => write!(f, "config error: no backend URL configured"),
            ConfigError::Placeholder(url) => {
                write!(f, "config error: {url} still contains the {URL_PLACEHOLDER} placeholder")
            }
            ConfigError::InvalidUrl { url, reason } => {
                write!(f, "config error: invalid URL {url}: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Endpoint Resolution
// ============================================================================

/// Resolves where an action goes in the given mode. `None` means no I/O.
pub fn resolve_endpoint(
    action: &Action,
    mode: Mode,
    base_url: &str,
    echo_base_url: &str,
) -> Result<Option<String>, ConfigError> {
    let endpoint = match mode {
        Mode::Simulated => return Ok(None),
        Mode::DummyRemote => {
            let echo = echo_base_url.trim().trim_end_matches('/');
            match action.verb {
                Verb::Get => format!("{echo}/get"),
                Verb::Post => format!("{echo}/post"),
            }
        }
        Mode::RealBackend => match action.url.as_deref() {
            Some(url) => non_empty(url)?.to_string(),
            None => {
                let base = non_empty(base_url)?.trim_end_matches('/');
                format!("{base}{MQTT_API_PREFIX}{}", action.key)
            }
        },
    };

    validate_url(&endpoint)?;
    Ok(Some(endpoint))
}

fn non_empty(url: &str) -> Result<&str, ConfigError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::MissingUrl);
    }
    Ok(trimmed)
}

fn validate_url(url: &str) -> Result<(), ConfigError> {
    if url.contains(URL_PLACEHOLDER) {
        return Err(ConfigError::Placeholder(url.to_string()));
    }
    let parsed = reqwest::Url::parse(url).map_err(|e| ConfigError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

// ============================================================================
// Handler
// ============================================================================

pub struct ActionHandler {
    transport: Arc<dyn HttpTransport>,
    echo_base_url: String,
    sim_delay: Duration,
}

impl ActionHandler {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            echo_base_url: DEFAULT_ECHO_BASE_URL.to_string(),
            sim_delay: DEFAULT_SIM_DELAY,
        }
    }

    pub fn from_config(transport: Arc<dyn HttpTransport>, config: &ResolvedConfig) -> Self {
        Self::new(transport)
            .with_echo_base_url(config.echo_base_url.clone())
            .with_sim_delay(config.sim_delay)
    }

    pub fn with_echo_base_url(mut self, url: impl Into<String>) -> Self {
        self.echo_base_url = url.into();
        self
    }

    /// Artificial wait before a simulated reply. Zero is allowed.
    pub fn with_sim_delay(mut self, delay: Duration) -> Self {
        self.sim_delay = delay;
        self
    }

    /// Runs one action and returns its outcome.
    pub async fn handle(
        &self,
        action: &Action,
        mode: Mode,
        base_url: &str,
    ) -> Result<Outcome, ConfigError> {
        self.dispatch(action, mode, base_url, &NullSink).await
    }

    /// Runs one action, reporting progress and the outcome to `sink`.
    pub async fn dispatch(
        &self,
        action: &Action,
        mode: Mode,
        base_url: &str,
        sink: &dyn OutputSink,
    ) -> Result<Outcome, ConfigError> {
        info!("Dispatching '{}' ({} {}) in {:?} mode", action.label, action.verb, action.key, mode);

        let endpoint = match resolve_endpoint(action, mode, base_url, &self.echo_base_url) {
            Ok(endpoint) => endpoint,
            Err(e) => {
                error!("Rejected '{}': {}", action.label, e);
                sink.progress(&format!("✗ {e}"));
                return Err(e);
            }
        };

        let outcome = match endpoint {
            None => {
                sink.progress("-- Simulating REST call …");
                if !self.sim_delay.is_zero() {
                    tokio::time::sleep(self.sim_delay).await;
                }
                Outcome::Simulated(sim::simulate(action))
            }
            Some(url) => {
                sink.progress(&format!("{} {} …", action.verb, url));
                let request = match action.verb {
                    Verb::Get => HttpRequest::get(url),
                    Verb::Post => HttpRequest::post(url, action.body.clone().unwrap_or_default()),
                };
                debug!("Sending via {} transport: {:?}", self.transport.name(), request);
                render_outcome(self.transport.send(&request).await)
            }
        };

        info!("'{}' finished: {}", action.label, outcome);
        sink.outcome(&outcome);
        Ok(outcome)
    }
}

struct NullSink;

impl OutputSink for NullSink {
    fn outcome(&self, _outcome: &Outcome) {}
}
