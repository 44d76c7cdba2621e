//! HTTP implementations of the live-data collaborators

use super::{ConnectivityProbe, TimeSource};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use std::time::Duration;

fn client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to create HTTP client")
}

/// Probes connectivity with a HEAD request
pub struct HttpProbe {
    client: reqwest::Client,
    url: String,
}

impl HttpProbe {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: client(timeout)?,
            url: url.into(),
        })
    }
}

#[async_trait]
impl ConnectivityProbe for HttpProbe {
    async fn is_online(&self) -> bool {
        match self.client.head(&self.url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                tracing::debug!("Connectivity probe to {} failed: {}", self.url, e);
                false
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct WorldTimeResponse {
    datetime: String,
}

/// Reads the current time from a world-time JSON service
///
/// The service answers with an object whose `datetime` field is an RFC 3339
/// timestamp carrying the caller's UTC offset.
pub struct WorldTimeSource {
    client: reqwest::Client,
    url: String,
}

impl WorldTimeSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: client(timeout)?,
            url: url.into(),
        })
    }
}

/// Parse the body of a world-time response
pub fn parse_world_time(body: &str) -> Result<DateTime<FixedOffset>> {
    let response: WorldTimeResponse =
        serde_json::from_str(body).context("Time service returned unexpected JSON")?;
    DateTime::parse_from_rfc3339(&response.datetime)
        .with_context(|| format!("Invalid datetime from time service: {}", response.datetime))
}

#[async_trait]
impl TimeSource for WorldTimeSource {
    async fn now(&self) -> Result<DateTime<FixedOffset>> {
        tracing::debug!("Fetching time from: {}", self.url);

        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch from: {}", self.url))?;

        if !resp.status().is_success() {
            anyhow::bail!(
                "Time request failed: {} (status: {})",
                self.url,
                resp.status()
            );
        }

        let body = resp.text().await.context("Failed to read time response")?;
        parse_world_time(&body)
    }
}
