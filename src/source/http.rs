//! HTTP-backed telemetry source.
//!
//! Talks to the provider's JSON API with a shared connection pool and a
//! per-request timeout, so a stalled provider cannot wedge a polling loop
//! past its next tick.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;

use super::{
    HistoryPayload, LongTermPayload, PingTargetRequest, PingTargetResponse, ScorePayload,
    TelemetrySource,
};
use crate::data::Period;

/// Per-request timeout. Kept under the long-term poll interval so even the
/// slowest feed settles before its next tick.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// A telemetry source backed by the provider's HTTP API.
#[derive(Debug)]
pub struct HttpSource {
    client: reqwest::Client,
    base: String,
    description: String,
}

impl HttpSource {
    /// Create a source for the given base URL (e.g. `http://127.0.0.1:5555`).
    pub fn new(base: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("building HTTP client")?;
        let base = base.trim_end_matches('/').to_string();
        let description = format!("api: {}", base);
        Ok(Self {
            client,
            base,
            description,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

#[async_trait]
impl TelemetrySource for HttpSource {
    async fn short_history(&self, seconds: u32) -> Result<HistoryPayload> {
        let payload = self
            .client
            .get(self.url("/api/history"))
            .query(&[("seconds", seconds)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(payload)
    }

    async fn long_history(&self, period: Period) -> Result<LongTermPayload> {
        let payload = self
            .client
            .get(self.url("/api/long-term-history"))
            .query(&[("period", period.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(payload)
    }

    async fn score(&self, period: Period) -> Result<ScorePayload> {
        let payload = self
            .client
            .get(self.url("/api/longterm-score"))
            .query(&[("period", period.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(payload)
    }

    async fn set_ping_target(&self, target: &str) -> Result<String> {
        let response: PingTargetResponse = self
            .client
            .post(self.url("/api/ping-target"))
            .json(&PingTargetRequest { target })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.target)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let source = HttpSource::new("http://127.0.0.1:5555/").unwrap();
        assert_eq!(source.url("/api/history"), "http://127.0.0.1:5555/api/history");
        assert_eq!(source.description(), "api: http://127.0.0.1:5555");
    }
}
