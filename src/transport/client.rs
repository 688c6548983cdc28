use std::fmt;

use async_trait::async_trait;

use super::types::HttpRequest;

/// The only runtime failure a request can produce.
///
/// Timeouts, refused connections and non-2xx statuses all collapse into a
/// message string. Nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFailed(pub String);

impl RequestFailed {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for RequestFailed {}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Returns the name of the transport.
    fn name(&self) -> &str;

    /// Sends a single request and returns the response body on a 2xx status.
    async fn send(&self, request: &HttpRequest) -> Result<String, RequestFailed>;
}
