//! Long-term polling loop.
//!
//! Fetches the selected period's series and its derived quality summary.
//! The two fetches are independent tasks: a failure in one never blocks or
//! corrupts the other. The active period persists across cycles and is
//! replaced when the user selects a new one.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::{Feed, LongTermCommand, SyncUpdate};
use crate::data::{Period, QualityGrade, SeriesWindow};
use crate::source::TelemetrySource;

/// Delay before the first full cycle, so the initial paint is not blocked
/// on chart data.
const STARTUP_DELAY: Duration = Duration::from_millis(1000);

/// Extra delay before the startup score-only warmup (~1.5s after launch).
const SCORE_WARMUP_DELAY: Duration = Duration::from_millis(500);

/// The 60-second polling loop for long-term charts and the quality score.
pub struct LongTermSync {
    source: Arc<dyn TelemetrySource>,
    updates: mpsc::UnboundedSender<SyncUpdate>,
    period: Period,
    interval: Duration,
    series_seq: u64,
    score_seq: u64,
}

impl LongTermSync {
    pub fn new(
        source: Arc<dyn TelemetrySource>,
        updates: mpsc::UnboundedSender<SyncUpdate>,
        period: Period,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            updates,
            period,
            interval,
            series_seq: 0,
            score_seq: 0,
        }
    }

    /// Run forever: a full cycle shortly after startup, a score-only warmup
    /// right after, then one cycle per interval plus any commanded runs.
    pub async fn run(mut self, mut commands: mpsc::UnboundedReceiver<LongTermCommand>) {
        tokio::time::sleep(STARTUP_DELAY).await;
        self.run_cycle(None);
        tokio::time::sleep(SCORE_WARMUP_DELAY).await;
        self.spawn_score_fetch();

        let mut ticker = tokio::time::interval(self.interval);
        ticker.tick().await; // the first tick completes immediately

        loop {
            tokio::select! {
                _ = ticker.tick() => self.run_cycle(None),
                command = commands.recv() => match command {
                    Some(LongTermCommand::Run(period)) => {
                        debug!(?period, "long-term cycle forced");
                        self.run_cycle(period);
                    }
                    None => break,
                },
            }
        }
    }

    /// Start one series fetch and one score fetch for the active period.
    /// A supplied period becomes the new active period first.
    pub fn run_cycle(&mut self, period: Option<Period>) {
        if let Some(period) = period {
            self.period = period;
        }
        self.spawn_series_fetch();
        self.spawn_score_fetch();
    }

    pub fn period(&self) -> Period {
        self.period
    }

    fn spawn_series_fetch(&mut self) {
        self.series_seq += 1;
        let seq = self.series_seq;
        let period = self.period;
        let source = Arc::clone(&self.source);
        let updates = self.updates.clone();

        tokio::spawn(async move {
            let update = match fetch_long_window(source.as_ref(), period).await {
                Ok(window) => SyncUpdate::LongTerm {
                    seq,
                    period,
                    window,
                },
                Err(e) => {
                    warn!(period = period.as_str(), "long-term poll failed: {:#}", e);
                    SyncUpdate::Failure {
                        feed: Feed::LongTerm,
                        message: e.to_string(),
                    }
                }
            };
            let _ = updates.send(update);
        });
    }

    fn spawn_score_fetch(&mut self) {
        self.score_seq += 1;
        let seq = self.score_seq;
        let period = self.period;
        let source = Arc::clone(&self.source);
        let updates = self.updates.clone();

        tokio::spawn(async move {
            let update = match fetch_score(source.as_ref(), period).await {
                Ok(grade) => SyncUpdate::Score { seq, period, grade },
                Err(e) => {
                    warn!(period = period.as_str(), "score poll failed: {:#}", e);
                    SyncUpdate::Failure {
                        feed: Feed::Score,
                        message: e.to_string(),
                    }
                }
            };
            let _ = updates.send(update);
        });
    }
}

/// One long-window fetch: network call plus payload validation.
pub async fn fetch_long_window(
    source: &dyn TelemetrySource,
    period: Period,
) -> Result<SeriesWindow> {
    source.long_history(period).await?.into_window()
}

/// One score fetch, normalized into a [`QualityGrade`].
pub async fn fetch_score(source: &dyn TelemetrySource, period: Period) -> Result<QualityGrade> {
    Ok(QualityGrade::from_payload(source.score(period).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::testing::FakeSource;

    fn sync_with(
        source: Arc<FakeSource>,
        period: Period,
    ) -> (LongTermSync, mpsc::UnboundedReceiver<SyncUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let sync = LongTermSync::new(
            source as Arc<dyn TelemetrySource>,
            tx,
            period,
            Duration::from_secs(60),
        );
        (sync, rx)
    }

    async fn drain(rx: &mut mpsc::UnboundedReceiver<SyncUpdate>) -> Vec<SyncUpdate> {
        // Let the spawned fetch tasks run to completion.
        tokio::time::sleep(Duration::from_millis(50)).await;
        let mut updates = Vec::new();
        while let Ok(update) = rx.try_recv() {
            updates.push(update);
        }
        updates
    }

    #[tokio::test]
    async fn test_selecting_week_fetches_both_feeds_once() {
        let source = Arc::new(FakeSource::default());
        let (mut sync, mut rx) = sync_with(Arc::clone(&source), Period::Day);

        sync.run_cycle(Some(Period::Week));
        let updates = drain(&mut rx).await;

        assert_eq!(source.long_periods(), vec![Period::Week]);
        assert_eq!(source.score_periods(), vec![Period::Week]);
        assert_eq!(updates.len(), 2);
    }

    #[tokio::test]
    async fn test_period_persists_across_cycles() {
        let source = Arc::new(FakeSource::default());
        let (mut sync, mut rx) = sync_with(Arc::clone(&source), Period::Day);

        sync.run_cycle(Some(Period::Month));
        sync.run_cycle(None);
        let _ = drain(&mut rx).await;

        assert_eq!(sync.period(), Period::Month);
        assert_eq!(source.long_periods(), vec![Period::Month, Period::Month]);
    }

    #[tokio::test]
    async fn test_score_failure_does_not_block_series() {
        let source = Arc::new(FakeSource::with_failing_score());
        let (mut sync, mut rx) = sync_with(Arc::clone(&source), Period::Day);

        sync.run_cycle(None);
        let updates = drain(&mut rx).await;

        let got_series = updates
            .iter()
            .any(|u| matches!(u, SyncUpdate::LongTerm { .. }));
        let got_score_failure = updates
            .iter()
            .any(|u| matches!(u, SyncUpdate::Failure { feed: Feed::Score, .. }));
        assert!(got_series, "series fetch should survive a score failure");
        assert!(got_score_failure);
    }

    #[tokio::test]
    async fn test_fetch_score_normalizes_payload() {
        let source = FakeSource::with_score("B+", 78);
        let grade = fetch_score(&source, Period::Day).await.unwrap();
        assert_eq!(grade.grade, "B+");
        assert_eq!(grade.score, 78);
    }
}
