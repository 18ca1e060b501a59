//! # Transport
//!
//! Issues GET/DELETE/POST calls against the configured base endpoint. No
//! business logic lives here: handlers decide paths and bodies, transport
//! only executes.
//!
//! The one firm contract is that transport never raises. Connection-level
//! failures (DNS, refused, reset) are folded into
//! [`RequestOutcome::Failed`], so the dispatcher always receives an outcome
//! and rendering stays uniform.

use anyhow::Result;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::config::Config;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// What one transport call produced: either a real HTTP response or a
/// transport failure that never reached the service. Exactly one variant
/// holds; a failure is never dressed up as a synthetic response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The service answered, with any status code.
    Response { status: u16, body: String },
    /// The call never completed; carries a human-readable description.
    Failed { error: String },
}

impl RequestOutcome {
    /// Sentinel status reported for the failure variant. Not a real HTTP
    /// status, so it can never collide with a service-reported code.
    pub const TRANSPORT_FAILURE_STATUS: u16 = 0;

    /// Status code for classification; the failure sentinel for `Failed`.
    pub fn status(&self) -> u16 {
        match self {
            RequestOutcome::Response { status, .. } => *status,
            RequestOutcome::Failed { .. } => Self::TRANSPORT_FAILURE_STATUS,
        }
    }

    /// Anything other than a plain 200 is presented as an error.
    pub fn is_error(&self) -> bool {
        self.status() != 200
    }
}

/// Request execution seam between the dispatcher and the network.
///
/// The search endpoints send a JSON body on GET, which is why `get` takes an
/// optional body.
pub trait Transport {
    fn get(&self, path: &str, body: Option<&Value>) -> RequestOutcome;
    fn delete(&self, path: &str) -> RequestOutcome;
    fn post(&self, path: &str, body: &Value) -> RequestOutcome;
}

/// Production transport backed by a blocking reqwest client.
///
/// No per-call timeout is configured: a hung call blocks the interpreter
/// until the connection dies, matching the synchronous REPL model.
pub struct HttpTransport {
    client: Client,
    base_endpoint: String,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_endpoint: config.base_endpoint(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_endpoint, path)
    }

    fn execute(&self, builder: RequestBuilder, body: Option<&Value>) -> RequestOutcome {
        let builder = match body {
            Some(value) => builder
                .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
                .body(value.to_string()),
            None => builder,
        };
        match builder.send() {
            Ok(response) => {
                let status = response.status().as_u16();
                match response.text() {
                    Ok(body) => RequestOutcome::Response { status, body },
                    Err(e) => RequestOutcome::Failed {
                        error: format!("failed to read response body: {e}"),
                    },
                }
            }
            Err(e) => RequestOutcome::Failed {
                error: e.to_string(),
            },
        }
    }
}

impl Transport for HttpTransport {
    fn get(&self, path: &str, body: Option<&Value>) -> RequestOutcome {
        let url = self.url(path);
        tracing::debug!("GET {url}");
        self.execute(self.client.get(url), body)
    }

    fn delete(&self, path: &str) -> RequestOutcome {
        let url = self.url(path);
        tracing::debug!("DELETE {url}");
        self.execute(self.client.delete(url), None)
    }

    fn post(&self, path: &str, body: &Value) -> RequestOutcome {
        let url = self.url(path);
        tracing::debug!("POST {url}");
        self.execute(self.client.post(url), Some(body))
    }
}
