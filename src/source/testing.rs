//! Scriptable fake telemetry source for exercising the polling paths.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;

use super::{DetailsPayload, HistoryPayload, LongTermPayload, ScorePayload, TelemetrySource};
use crate::data::Period;

/// A telemetry source with canned responses and call accounting.
#[derive(Debug)]
pub struct FakeSource {
    short_labels: Vec<String>,
    short_ping: Vec<f64>,
    misaligned_short: bool,
    fail_short: bool,
    fail_long: bool,
    fail_score: bool,
    score_grade: String,
    score_value: i64,
    /// Per-call success overrides for the short feed; once drained the
    /// `fail_short` flag applies.
    short_script: Mutex<VecDeque<bool>>,
    short_count: AtomicUsize,
    long_periods: Mutex<Vec<Period>>,
    score_periods: Mutex<Vec<Period>>,
}

impl Default for FakeSource {
    fn default() -> Self {
        Self {
            short_labels: vec!["12:00:01".into()],
            short_ping: vec![20.0],
            misaligned_short: false,
            fail_short: false,
            fail_long: false,
            fail_score: false,
            score_grade: "A".into(),
            score_value: 92,
            short_script: Mutex::new(VecDeque::new()),
            short_count: AtomicUsize::new(0),
            long_periods: Mutex::new(Vec::new()),
            score_periods: Mutex::new(Vec::new()),
        }
    }
}

impl FakeSource {
    /// Source whose short feed always returns the given samples.
    pub fn with_short_samples(labels: &[&str], ping: &[f64]) -> Self {
        Self {
            short_labels: labels.iter().map(|s| s.to_string()).collect(),
            short_ping: ping.to_vec(),
            ..Self::default()
        }
    }

    /// Source where every endpoint fails at the transport level.
    pub fn failing() -> Self {
        Self {
            fail_short: true,
            fail_long: true,
            fail_score: true,
            ..Self::default()
        }
    }

    /// Source whose short feed returns arrays of mismatched length.
    pub fn with_misaligned_short_samples() -> Self {
        Self {
            misaligned_short: true,
            ..Self::default()
        }
    }

    /// Source whose score feed fails while the series feeds succeed.
    pub fn with_failing_score() -> Self {
        Self {
            fail_score: true,
            ..Self::default()
        }
    }

    /// Source reporting the given quality summary.
    pub fn with_score(grade: &str, score: i64) -> Self {
        Self {
            score_grade: grade.into(),
            score_value: score,
            ..Self::default()
        }
    }

    /// Script the next short-feed calls: `true` succeeds, `false` fails.
    pub fn script_short(self, outcomes: &[bool]) -> Self {
        *self.short_script.lock().unwrap() = outcomes.iter().copied().collect();
        self
    }

    pub fn short_calls(&self) -> usize {
        self.short_count.load(Ordering::SeqCst)
    }

    /// Periods requested from the long-history endpoint, in order.
    pub fn long_periods(&self) -> Vec<Period> {
        self.long_periods.lock().unwrap().clone()
    }

    /// Periods requested from the score endpoint, in order.
    pub fn score_periods(&self) -> Vec<Period> {
        self.score_periods.lock().unwrap().clone()
    }
}

#[async_trait]
impl TelemetrySource for FakeSource {
    async fn short_history(&self, _seconds: u32) -> Result<HistoryPayload> {
        self.short_count.fetch_add(1, Ordering::SeqCst);

        let succeed = match self.short_script.lock().unwrap().pop_front() {
            Some(outcome) => outcome,
            None => !self.fail_short,
        };
        if !succeed {
            bail!("connection refused");
        }

        let n = self.short_labels.len();
        Ok(HistoryPayload {
            timestamps: self.short_labels.clone(),
            ping: self.short_ping.clone(),
            jitter: vec![1.0; if self.misaligned_short { n + 1 } else { n }],
            packet_loss: vec![0.0; n],
        })
    }

    async fn long_history(&self, period: Period) -> Result<LongTermPayload> {
        self.long_periods.lock().unwrap().push(period);
        if self.fail_long {
            bail!("connection refused");
        }
        Ok(LongTermPayload {
            timestamps: vec!["10:00".into(), "10:15".into()],
            ping: vec![22.0, 28.0],
            jitter: vec![2.0, 3.5],
            quality: vec![90.0, 84.0],
            packet_loss: vec![0.0, 0.5],
            signal: vec![78.0, 74.0],
        })
    }

    async fn score(&self, period: Period) -> Result<ScorePayload> {
        self.score_periods.lock().unwrap().push(period);
        if self.fail_score {
            bail!("connection refused");
        }
        Ok(ScorePayload {
            grade: self.score_grade.clone(),
            score: self.score_value,
            message: "Stable connection".into(),
            record_count: 1440,
            hours_analyzed: 24.0,
            details: DetailsPayload::default(),
        })
    }

    async fn set_ping_target(&self, target: &str) -> Result<String> {
        Ok(target.to_string())
    }

    fn description(&self) -> &str {
        "fake"
    }
}
