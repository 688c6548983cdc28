//! reqwest-backed transport.
//!
//! Failure messages:
//! - timeout → `Request timeout`
//! - refused / unreachable → `Cannot connect to destination host`
//! - non-2xx → `HTTP/1.1 404 Not Found`

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::header::CONTENT_TYPE;

use super::client::{HttpTransport, RequestFailed};
use super::types::{HttpRequest, Verb};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with timeout {:?}: {}", timeout, e);
                reqwest::Client::new()
            });
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

/// Collapses a reqwest error into the single failure message.
fn classify(e: &reqwest::Error) -> RequestFailed {
    if e.is_timeout() {
        RequestFailed::new("Request timeout")
    } else if e.is_connect() {
        RequestFailed::new("Cannot connect to destination host")
    } else {
        RequestFailed::new(e.to_string())
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    fn name(&self) -> &str {
        "reqwest"
    }

    async fn send(&self, request: &HttpRequest) -> Result<String, RequestFailed> {
        info!("{} {}", request.verb, request.url);

        let builder = match request.verb {
            Verb::Get => self.client.get(&request.url),
            Verb::Post => {
                let body = request.body.clone().unwrap_or_default();
                self.client
                    .post(&request.url)
                    .header(CONTENT_TYPE, "application/json")
                    .body(body.into_bytes())
            }
        };

        let response = builder.send().await.map_err(|e| {
            warn!("Request to {} failed: {}", request.url, e);
            classify(&e)
        })?;

        let status = response.status();
        debug!("Response status from {}: {}", request.url, status);

        if !status.is_success() {
            warn!("Non-success status from {}: {}", request.url, status);
            return Err(RequestFailed::new(format!("HTTP/1.1 {status}")));
        }

        let text = response.text().await.map_err(|e| classify(&e))?;
        debug!("Response body: {} bytes", text.len());
        Ok(text)
    }
}
