//! Data models and processing for telemetry payloads.
//!
//! This module transforms raw provider payloads into validated, chart-ready
//! data.
//!
//! ## Submodules
//!
//! - [`series`]: index-aligned series windows ([`SeriesWindow`]) and the
//!   [`Metric`] axis names
//! - [`quality`]: quality grading ([`QualityGrade`]), severity bands, and
//!   the long-term [`Period`] selector
//!
//! ## Data flow
//!
//! ```text
//! HistoryPayload / LongTermPayload (raw JSON)
//!        │
//!        ▼
//! SeriesWindow (validated: label axis and value arrays index-aligned)
//!        │
//!        └──▶ ChartRegistry::update_series (wholesale replacement)
//!
//! ScorePayload ──▶ QualityGrade ──▶ score panel + QualityWatcher
//! ```

pub mod quality;
pub mod series;

pub use quality::{
    bar_width, status_word, DetailScore, DetailScores, GradeBand, LossSeverity, Period,
    QualityGrade, ScoreBand,
};
pub use series::{Metric, SeriesWindow};
