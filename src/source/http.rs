//! HTTP source backed by a blocking [`reqwest`] client.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;

use super::DataSource;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Issues a GET against a fixed URL on every fetch.
pub struct HttpSource {
    url: String,
    client: Client,
}

impl HttpSource {
    /// Build a source for `url`. The client is created once and reused for
    /// every cycle.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

impl DataSource for HttpSource {
    fn name(&self) -> &str {
        &self.url
    }

    fn fetch(&self) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .with_context(|| format!("GET {} failed", self.url))?
            .error_for_status()
            .with_context(|| format!("GET {} returned an error status", self.url))?;

        // Drain the body even though the caller discards it.
        let body = response
            .bytes()
            .with_context(|| format!("failed to read response body from {}", self.url))?;
        Ok(body.to_vec())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
