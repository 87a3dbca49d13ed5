use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;

use crate::errors::Result;

/// Network-level failure before any HTTP status was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Sends one JSON body and reports the HTTP status.
pub trait WebhookTransport {
    fn post_json(&self, url: &str, body: &[u8]) -> std::result::Result<u16, TransportError>;
}

/// Blocking `reqwest` transport.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("assessment_core/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl WebhookTransport for ReqwestTransport {
    fn post_json(&self, url: &str, body: &[u8]) -> std::result::Result<u16, TransportError> {
        self.client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_vec())
            .send()
            .map(|response| response.status().as_u16())
            .map_err(|err| TransportError(err.to_string()))
    }
}
