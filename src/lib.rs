//! # linkwatch
//!
//! A terminal dashboard for monitoring network link quality.
//!
//! Linkwatch polls a telemetry provider's HTTP API at two time scales and
//! renders the results as live charts: a rolling short-term window
//! (ping/jitter/packet loss, refreshed every second) and a selectable
//! long-term period (day/week/month, refreshed every minute) with a
//! derived letter-grade quality summary. When the quality score crosses
//! below the alert threshold, an audible tone fires.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                       Main thread (TUI)                       │
//! │  ┌─────────┐   ┌──────────┐   ┌─────────┐    ┌──────────┐     │
//! │  │  app    │──▶│  charts  │──▶│   ui    │───▶│ Terminal │     │
//! │  │ (state) │   │(registry)│   │(render) │    │          │     │
//! │  └────▲────┘   └──────────┘   └─────────┘    └──────────┘     │
//! │       │ SyncUpdate (mpsc)          ▲ commands                 │
//! ├───────┼────────────────────────────┼──────────────────────────┤
//! │       │        Background runtime  │                          │
//! │  ┌────┴─────────┐   ┌──────────────┴┐                         │
//! │  │ ShortTermSync│   │ LongTermSync  │──▶ source (HTTP API)    │
//! │  │  (1s poll)   │   │ (60s + score) │                         │
//! │  └──────────────┘   └───────────────┘                         │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: application state, views, and seq-guarded update
//!   application
//! - **[`sync`]**: the two polling loops and their command/update channels
//! - **[`source`]**: telemetry provider abstraction ([`TelemetrySource`])
//!   with the HTTP implementation
//! - **[`charts`]**: chart registry owning every pane's renderable state
//! - **[`data`]**: validated series windows and quality grading
//! - **[`alert`]**: threshold-crossing detection and the alert tone
//! - **[`ui`]**: ratatui rendering - charts, score panel, chrome
//!
//! ## Usage
//!
//! ```bash
//! # Dashboard against a local provider
//! linkwatch --url http://127.0.0.1:5555
//!
//! # Week view, custom ping target, silent
//! linkwatch --period week --ping-target 1.1.1.1 --mute
//! ```

pub mod alert;
pub mod app;
pub mod charts;
pub mod config;
pub mod data;
pub mod events;
pub mod source;
pub mod sync;
pub mod ui;

// Re-export main types for convenience
pub use alert::{AlertTone, QualityWatcher};
pub use app::{App, View};
pub use charts::{ChartId, ChartRegistry, ChartState};
pub use config::Settings;
pub use data::{
    GradeBand, LossSeverity, Metric, Period, QualityGrade, ScoreBand, SeriesWindow,
};
pub use source::{HttpSource, TelemetrySource};
pub use sync::{LongTermSync, ShortTermSync, SyncHandle, SyncUpdate};
