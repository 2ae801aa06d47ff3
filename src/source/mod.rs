//! Telemetry provider abstraction.
//!
//! This module provides a trait-based abstraction over the telemetry
//! provider API so the polling loops can be exercised against fakes in
//! tests and against the HTTP provider in production.

mod http;
mod payload;

#[cfg(test)]
pub mod testing;

pub use http::HttpSource;
pub use payload::{
    DetailEntry, DetailsPayload, HistoryPayload, LongTermPayload, PingTargetRequest,
    PingTargetResponse, ScorePayload,
};

use std::fmt::Debug;

use anyhow::Result;
use async_trait::async_trait;

use crate::data::Period;

/// Interface to the telemetry provider.
///
/// Every method is one non-blocking network operation; failures surface as
/// errors for the caller's retry policy and never panic. Implementations
/// must be shareable across polling tasks.
#[async_trait]
pub trait TelemetrySource: Send + Sync + Debug {
    /// Fetch the short-window series for the trailing `seconds` lookback.
    async fn short_history(&self, seconds: u32) -> Result<HistoryPayload>;

    /// Fetch the long-window series for a period.
    async fn long_history(&self, period: Period) -> Result<LongTermPayload>;

    /// Fetch the derived quality summary for a period.
    async fn score(&self, period: Period) -> Result<ScorePayload>;

    /// Set the provider's active ping destination. Returns the target the
    /// provider acknowledged.
    async fn set_ping_target(&self, target: &str) -> Result<String>;

    /// Human-readable description of the source, shown in the status bar.
    fn description(&self) -> &str;
}
