//! Layered settings: built-in defaults, optional TOML file, environment
//! overrides. CLI flags are applied on top by the binary.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::charts::ChartId;

/// Dashboard settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the telemetry provider API.
    pub api_url: String,
    /// Ping destination pushed to the provider at startup, if set.
    pub ping_target: Option<String>,
    /// Initial long-term period (`day`, `week`, `month`).
    pub period: String,
    /// Short-term lookback window in seconds.
    pub lookback_secs: u32,
    /// Short-term poll interval in milliseconds.
    pub short_interval_ms: u64,
    /// Long-term poll interval in seconds.
    pub long_interval_secs: u64,
    /// Quality score below which the alert fires.
    pub alert_threshold: u8,
    /// Suppress the audible alert.
    pub mute: bool,
    /// Chart panes to enable; `None` enables all of them. Unknown names
    /// are rejected at load time.
    pub charts: Option<Vec<String>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:5555".into(),
            ping_target: None,
            period: "day".into(),
            lookback_secs: 60,
            short_interval_ms: 1000,
            long_interval_secs: 60,
            alert_threshold: 50,
            mute: false,
            charts: None,
        }
    }
}

impl Settings {
    /// Resolve the configured chart panes into ids.
    pub fn enabled_charts(&self) -> Result<Vec<ChartId>> {
        match &self.charts {
            None => Ok(ChartId::ALL.to_vec()),
            Some(names) => names
                .iter()
                .map(|name| {
                    ChartId::from_name(name)
                        .with_context(|| format!("unknown chart pane '{}'", name))
                })
                .collect(),
        }
    }
}

/// Load settings from an optional TOML file plus `LINKWATCH_*` environment
/// variables. Without an explicit path, `linkwatch.toml` in the working
/// directory is used when present.
pub fn load(path: Option<&Path>) -> Result<Settings> {
    let mut builder = config::Config::builder();
    builder = match path {
        Some(path) => builder.add_source(config::File::from(path)),
        None => builder.add_source(config::File::with_name("linkwatch").required(false)),
    };
    builder = builder.add_source(config::Environment::with_prefix("LINKWATCH"));

    let settings = builder
        .build()
        .context("loading configuration")?
        .try_deserialize()
        .context("parsing configuration")?;
    Ok(settings)
}
