//! Chart registry: owns the renderable state of every chart pane.
//!
//! Each chart is keyed by a [`ChartId`] and written by exactly one sync
//! path, so entries never contend. The UI reads registry state every draw;
//! the sync loops replace it wholesale via [`ChartRegistry::update_series`].

use std::collections::HashMap;

use crate::data::{Metric, SeriesWindow};

/// The chart roles a dashboard page can host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartId {
    /// Rolling short-term latency + jitter lines.
    ShortTermLatency,
    /// Rolling short-term packet-loss bars.
    ShortTermLoss,
    /// Long-term latency + jitter lines for the active period.
    LongTermLatency,
    /// Long-term quality-score line.
    LongTermQuality,
    /// Long-term packet-loss bars.
    LongTermLoss,
    /// Long-term signal-strength line.
    LongTermSignal,
}

impl ChartId {
    pub const ALL: [ChartId; 6] = [
        ChartId::ShortTermLatency,
        ChartId::ShortTermLoss,
        ChartId::LongTermLatency,
        ChartId::LongTermQuality,
        ChartId::LongTermLoss,
        ChartId::LongTermSignal,
    ];

    /// Pane title shown in the chart border.
    pub fn title(&self) -> &'static str {
        match self {
            ChartId::ShortTermLatency => "Latency / Jitter (60s)",
            ChartId::ShortTermLoss => "Packet Loss (60s)",
            ChartId::LongTermLatency => "Latency / Jitter",
            ChartId::LongTermQuality => "Quality Score",
            ChartId::LongTermLoss => "Packet Loss",
            ChartId::LongTermSignal => "Signal Strength",
        }
    }

    /// Configuration name used to enable/disable a pane.
    pub fn name(&self) -> &'static str {
        match self {
            ChartId::ShortTermLatency => "short-latency",
            ChartId::ShortTermLoss => "short-loss",
            ChartId::LongTermLatency => "long-latency",
            ChartId::LongTermQuality => "long-quality",
            ChartId::LongTermLoss => "long-loss",
            ChartId::LongTermSignal => "long-signal",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|id| id.name() == name)
    }
}

/// Renderable state of one chart: a label axis plus dataset value arrays.
///
/// Replaced as a unit on every update; the UI never observes a half-applied
/// window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartState {
    pub labels: Vec<String>,
    pub datasets: Vec<(Metric, Vec<f64>)>,
}

impl ChartState {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Owns every configured chart pane.
pub struct ChartRegistry {
    charts: HashMap<ChartId, ChartState>,
}

impl ChartRegistry {
    /// Create chart state for the enabled panes only. A pane missing from
    /// `enabled` is simply absent: updates addressed to it are skipped, the
    /// way a page without that display region would skip it.
    pub fn initialize(enabled: impl IntoIterator<Item = ChartId>) -> Self {
        let charts = enabled
            .into_iter()
            .map(|id| (id, ChartState::default()))
            .collect();
        Self { charts }
    }

    /// Registry with every pane enabled.
    pub fn with_all_charts() -> Self {
        Self::initialize(ChartId::ALL)
    }

    pub fn contains(&self, id: ChartId) -> bool {
        self.charts.contains_key(&id)
    }

    pub fn get(&self, id: ChartId) -> Option<&ChartState> {
        self.charts.get(&id)
    }

    /// Replace a chart's label axis and datasets from a window in one
    /// assignment.
    ///
    /// No-ops: a pane not in the registry (absent display region), and a
    /// window with zero samples (keeps the last good contents instead of
    /// flickering to empty on a transient empty response). Metrics the
    /// window does not carry are skipped.
    pub fn update_series(&mut self, id: ChartId, window: &SeriesWindow, metrics: &[Metric]) {
        if window.is_empty() {
            return;
        }
        let Some(chart) = self.charts.get_mut(&id) else {
            return;
        };

        let datasets = metrics
            .iter()
            .filter_map(|&m| window.metric(m).map(|values| (m, values.to_vec())))
            .collect();

        *chart = ChartState {
            labels: window.timestamps().to_vec(),
            datasets,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(labels: &[&str], ping: &[f64]) -> SeriesWindow {
        SeriesWindow::new(
            labels.iter().map(|s| s.to_string()).collect(),
            vec![(Metric::Ping, ping.to_vec())],
        )
        .unwrap()
    }

    #[test]
    fn test_update_replaces_wholesale() {
        let mut registry = ChartRegistry::with_all_charts();
        registry.update_series(
            ChartId::ShortTermLatency,
            &window(&["a", "b"], &[10.0, 20.0]),
            &[Metric::Ping],
        );
        registry.update_series(
            ChartId::ShortTermLatency,
            &window(&["c"], &[30.0]),
            &[Metric::Ping],
        );

        let chart = registry.get(ChartId::ShortTermLatency).unwrap();
        assert_eq!(chart.labels, vec!["c"]);
        assert_eq!(chart.datasets, vec![(Metric::Ping, vec![30.0])]);
    }

    #[test]
    fn test_empty_window_keeps_prior_contents() {
        let mut registry = ChartRegistry::with_all_charts();
        let seeded = window(&["a", "b"], &[10.0, 20.0]);
        registry.update_series(ChartId::ShortTermLoss, &seeded, &[Metric::Ping]);
        let before = registry.get(ChartId::ShortTermLoss).unwrap().clone();

        let empty = SeriesWindow::new(Vec::new(), vec![(Metric::Ping, Vec::new())]).unwrap();
        registry.update_series(ChartId::ShortTermLoss, &empty, &[Metric::Ping]);

        assert_eq!(registry.get(ChartId::ShortTermLoss).unwrap(), &before);
    }

    #[test]
    fn test_disabled_chart_is_skipped() {
        let mut registry = ChartRegistry::initialize([ChartId::ShortTermLatency]);
        registry.update_series(
            ChartId::LongTermQuality,
            &window(&["a"], &[1.0]),
            &[Metric::Ping],
        );

        assert!(!registry.contains(ChartId::LongTermQuality));
        assert!(registry.contains(ChartId::ShortTermLatency));
    }

    #[test]
    fn test_update_touches_only_target_chart() {
        let mut registry = ChartRegistry::with_all_charts();
        registry.update_series(
            ChartId::LongTermLoss,
            &window(&["a"], &[2.0]),
            &[Metric::Ping],
        );

        registry.update_series(
            ChartId::ShortTermLoss,
            &window(&["b"], &[5.0]),
            &[Metric::Ping],
        );

        assert_eq!(
            registry.get(ChartId::LongTermLoss).unwrap().labels,
            vec!["a"]
        );
    }

    #[test]
    fn test_chart_id_names_round_trip() {
        for id in ChartId::ALL {
            assert_eq!(ChartId::from_name(id.name()), Some(id));
        }
        assert_eq!(ChartId::from_name("bogus"), None);
    }
}
