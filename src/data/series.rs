//! Time-aligned series windows.
//!
//! A [`SeriesWindow`] is one poll's worth of chart data: an ordered label
//! axis plus one value array per metric, all index-aligned. Windows are
//! replaced wholesale on every poll, never merged, so a bad response can
//! never corrupt a previously good display.

use anyhow::{bail, Result};

/// A metric carried by a telemetry series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Ping,
    Jitter,
    PacketLoss,
    Signal,
    Quality,
}

impl Metric {
    /// Short label for chart legends.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Ping => "ping",
            Metric::Jitter => "jitter",
            Metric::PacketLoss => "loss",
            Metric::Signal => "signal",
            Metric::Quality => "quality",
        }
    }
}

/// An ordered sequence of samples sharing a common time axis.
///
/// Invariant: every metric's value array has the same length as the
/// timestamp axis. Construction fails on a mismatch, so a window that
/// exists is always safe to render.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesWindow {
    timestamps: Vec<String>,
    metrics: Vec<(Metric, Vec<f64>)>,
}

impl SeriesWindow {
    /// Build a window from a label axis and per-metric value arrays.
    ///
    /// Returns an error if any value array's length differs from the
    /// timestamp axis (a malformed provider payload).
    pub fn new(timestamps: Vec<String>, metrics: Vec<(Metric, Vec<f64>)>) -> Result<Self> {
        for (metric, values) in &metrics {
            if values.len() != timestamps.len() {
                bail!(
                    "series length mismatch: {} has {} values for {} timestamps",
                    metric.label(),
                    values.len(),
                    timestamps.len()
                );
            }
        }
        Ok(Self {
            timestamps,
            metrics,
        })
    }

    /// Number of samples in the window.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// The shared label axis.
    pub fn timestamps(&self) -> &[String] {
        &self.timestamps
    }

    /// Values for one metric, if the window carries it.
    pub fn metric(&self, metric: Metric) -> Option<&[f64]> {
        self.metrics
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, values)| values.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("12:00:{:02}", i)).collect()
    }

    #[test]
    fn test_window_accepts_aligned_arrays() {
        let window = SeriesWindow::new(
            labels(3),
            vec![
                (Metric::Ping, vec![10.0, 12.0, 11.0]),
                (Metric::Jitter, vec![1.0, 2.0, 1.5]),
            ],
        )
        .unwrap();

        assert_eq!(window.len(), 3);
        assert_eq!(window.metric(Metric::Ping), Some(&[10.0, 12.0, 11.0][..]));
        assert_eq!(window.metric(Metric::Signal), None);
    }

    #[test]
    fn test_window_rejects_length_mismatch() {
        let result = SeriesWindow::new(labels(3), vec![(Metric::Ping, vec![10.0, 12.0])]);
        assert!(result.is_err());
        let message = result.unwrap_err().to_string();
        assert!(message.contains("mismatch"));
    }

    #[test]
    fn test_empty_window_is_valid() {
        let window = SeriesWindow::new(Vec::new(), vec![(Metric::Ping, Vec::new())]).unwrap();
        assert!(window.is_empty());
    }
}
