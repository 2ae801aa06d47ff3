//! Wire payload types for the telemetry provider API.
//!
//! These types match the JSON bodies served by the provider. They are the
//! boundary between the network and the validated data models in
//! [`crate::data`]: every payload is converted through a checked
//! constructor before anything renders it.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::data::{Metric, SeriesWindow};

/// Short-window series from `GET /api/history?seconds=<n>`.
///
/// Arrays are index-aligned with `timestamps`; the alignment is verified
/// when converting into a [`SeriesWindow`].
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryPayload {
    pub timestamps: Vec<String>,
    pub ping: Vec<f64>,
    pub jitter: Vec<f64>,
    pub packet_loss: Vec<f64>,
}

impl HistoryPayload {
    pub fn into_window(self) -> Result<SeriesWindow> {
        SeriesWindow::new(
            self.timestamps,
            vec![
                (Metric::Ping, self.ping),
                (Metric::Jitter, self.jitter),
                (Metric::PacketLoss, self.packet_loss),
            ],
        )
    }
}

/// Long-window series from `GET /api/long-term-history?period=<p>`.
#[derive(Debug, Clone, Deserialize)]
pub struct LongTermPayload {
    pub timestamps: Vec<String>,
    pub ping: Vec<f64>,
    pub jitter: Vec<f64>,
    pub quality: Vec<f64>,
    pub packet_loss: Vec<f64>,
    pub signal: Vec<f64>,
}

impl LongTermPayload {
    pub fn into_window(self) -> Result<SeriesWindow> {
        SeriesWindow::new(
            self.timestamps,
            vec![
                (Metric::Ping, self.ping),
                (Metric::Jitter, self.jitter),
                (Metric::Quality, self.quality),
                (Metric::PacketLoss, self.packet_loss),
                (Metric::Signal, self.signal),
            ],
        )
    }
}

/// Derived quality summary from `GET /api/longterm-score?period=<p>`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScorePayload {
    pub grade: String,
    pub score: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub record_count: u64,
    #[serde(default)]
    pub hours_analyzed: f64,
    #[serde(default)]
    pub details: DetailsPayload,
}

/// Per-metric sub-scores within a score payload. All entries are optional;
/// absent ones default downstream rather than erroring.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailsPayload {
    #[serde(default)]
    pub packet_loss: Option<DetailEntry>,
    #[serde(default)]
    pub ping: Option<DetailEntry>,
    #[serde(default)]
    pub connection: Option<DetailEntry>,
    #[serde(default)]
    pub jitter: Option<DetailEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetailEntry {
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub avg_ms: Option<f64>,
    #[serde(default)]
    pub events: Option<u64>,
}

/// Request body for `POST /api/ping-target`.
#[derive(Debug, Serialize)]
pub struct PingTargetRequest<'a> {
    pub target: &'a str,
}

/// Response body for `POST /api/ping-target`.
#[derive(Debug, Deserialize)]
pub struct PingTargetResponse {
    pub target: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_payload_into_window() {
        let payload: HistoryPayload = serde_json::from_str(
            r#"{"timestamps": ["12:00:01", "12:00:02"],
                "ping": [18.0, 21.0],
                "jitter": [1.2, 2.4],
                "packet_loss": [0.0, 1.0]}"#,
        )
        .unwrap();

        let window = payload.into_window().unwrap();
        assert_eq!(window.len(), 2);
        assert_eq!(window.metric(Metric::Jitter), Some(&[1.2, 2.4][..]));
    }

    #[test]
    fn test_history_payload_rejects_misaligned_arrays() {
        let payload: HistoryPayload = serde_json::from_str(
            r#"{"timestamps": ["12:00:01", "12:00:02"],
                "ping": [18.0],
                "jitter": [1.2, 2.4],
                "packet_loss": [0.0, 1.0]}"#,
        )
        .unwrap();

        assert!(payload.into_window().is_err());
    }

    #[test]
    fn test_long_term_payload_into_window() {
        let payload: LongTermPayload = serde_json::from_str(
            r#"{"timestamps": ["14:00", "14:15"],
                "ping": [20.0, 25.0],
                "jitter": [2.0, 3.0],
                "quality": [95.0, 88.0],
                "packet_loss": [0.0, 0.5],
                "signal": [80.0, 76.0]}"#,
        )
        .unwrap();

        let window = payload.into_window().unwrap();
        assert_eq!(window.metric(Metric::Quality), Some(&[95.0, 88.0][..]));
        assert_eq!(window.metric(Metric::Signal), Some(&[80.0, 76.0][..]));
    }

    #[test]
    fn test_score_payload_tolerates_sparse_body() {
        let payload: ScorePayload =
            serde_json::from_str(r#"{"grade": "C", "score": 55}"#).unwrap();
        assert_eq!(payload.grade, "C");
        assert!(payload.details.connection.is_none());
        assert_eq!(payload.record_count, 0);
    }
}
