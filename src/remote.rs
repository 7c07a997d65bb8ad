//! Remote time-service transport.
//!
//! The remote side of the dual-source policy is a stateless request
//! function: given query parameters, return a raw text payload. The payload
//! is an envelope carrying the HTTP status code and the body as a
//! JSON-encoded string:
//!
//! ```json
//! { "code": 200, "response": "{\"status\":\"OK\",\"results\":{...}}" }
//! ```
//!
//! Interpreting the envelope (status check, inner decode, field extraction)
//! belongs to the resolver; the transport only produces it. A non-2xx status
//! still yields an envelope so the resolver can reject it by `code`; only
//! transport-level failures (DNS, connect, timeout, unreadable body) are
//! errors here.

use anyhow::{Context, Result};
use serde_json::json;
use std::time::Duration;

use crate::constants::{REMOTE_ENDPOINT, REQUEST_TIMEOUT_SECS};

/// Stateless request function against the remote time service.
pub trait RemoteTimeSource {
    /// Issue a GET-style request with the given query parameters and return
    /// the raw envelope text.
    fn request(&self, params: &[(&str, String)]) -> Result<String>;
}

/// HTTP transport over a blocking [`ureq`] agent.
pub struct HttpTimeSource {
    endpoint: String,
    agent: ureq::Agent,
}

impl HttpTimeSource {
    /// Create a transport against `endpoint`.
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            agent: ureq::AgentBuilder::new()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build(),
        }
    }
}

impl Default for HttpTimeSource {
    fn default() -> Self {
        Self::new(REMOTE_ENDPOINT)
    }
}

impl RemoteTimeSource for HttpTimeSource {
    fn request(&self, params: &[(&str, String)]) -> Result<String> {
        let mut request = self.agent.get(&self.endpoint);
        for (name, value) in params {
            request = request.query(name, value);
        }

        let (code, body) = match request.call() {
            Ok(response) => {
                let code = response.status();
                let body = response
                    .into_string()
                    .context("failed to read remote response body")?;
                (code, body)
            }
            // Server answered with an error status; still enveloped.
            Err(ureq::Error::Status(code, response)) => {
                (code, response.into_string().unwrap_or_default())
            }
            Err(err) => {
                return Err(err).context("remote time service unreachable");
            }
        };

        Ok(json!({ "code": code, "response": body }).to_string())
    }
}
