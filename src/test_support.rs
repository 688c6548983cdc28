//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::Mode;
use crate::core::handler::Outcome;
use crate::core::sink::OutputSink;
use crate::core::state::App;
use crate::transport::{HttpRequest, HttpTransport, RequestFailed};

/// A transport that answers every request with the same canned result
/// and records what it was asked to send.
pub struct StubTransport {
    result: Result<String, RequestFailed>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl StubTransport {
    pub fn ok(body: &str) -> Self {
        Self {
            result: Ok(body.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(RequestFailed::new(message)),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    fn name(&self) -> &str {
        "stub"
    }

    async fn send(&self, request: &HttpRequest) -> Result<String, RequestFailed> {
        self.requests.lock().unwrap().push(request.clone());
        self.result.clone()
    }
}

/// A sink that keeps every line it receives.
#[derive(Default)]
pub struct CollectingSink {
    progress: Mutex<Vec<String>>,
    outcomes: Mutex<Vec<String>>,
}

impl CollectingSink {
    pub fn progress_lines(&self) -> Vec<String> {
        self.progress.lock().unwrap().clone()
    }

    pub fn outcomes(&self) -> Vec<String> {
        self.outcomes.lock().unwrap().clone()
    }
}

impl OutputSink for CollectingSink {
    fn progress(&self, text: &str) {
        self.progress.lock().unwrap().push(text.to_string());
    }

    fn outcome(&self, outcome: &Outcome) {
        self.outcomes.lock().unwrap().push(outcome.to_string());
    }
}

/// Creates a test App in simulated mode with a real-looking backend address.
pub fn test_app() -> App {
    App::new(Mode::Simulated, "http://10.0.0.5:5000".to_string(), "http://10.0.0.5:8000/api/lamp/on")
}
