//! Short-term polling loop.
//!
//! Polls the short-window endpoint once shortly after startup and then
//! every second. There is no retry backoff: the next tick is the retry.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::{Feed, ShortTermCommand, SyncUpdate};
use crate::data::SeriesWindow;
use crate::source::TelemetrySource;

/// Delay before the first poll, so the terminal is up before data lands.
const STARTUP_DELAY: Duration = Duration::from_millis(500);

/// The 1-second polling loop for the rolling short-term window.
pub struct ShortTermSync {
    source: Arc<dyn TelemetrySource>,
    updates: mpsc::UnboundedSender<SyncUpdate>,
    lookback_secs: u32,
    interval: Duration,
    seq: u64,
}

impl ShortTermSync {
    pub fn new(
        source: Arc<dyn TelemetrySource>,
        updates: mpsc::UnboundedSender<SyncUpdate>,
        lookback_secs: u32,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            updates,
            lookback_secs,
            interval,
            seq: 0,
        }
    }

    /// Run forever: tick every interval, fetch out of cycle on command.
    /// Ends only when the command channel closes at teardown.
    pub async fn run(mut self, mut commands: mpsc::UnboundedReceiver<ShortTermCommand>) {
        tokio::time::sleep(STARTUP_DELAY).await;

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => self.spawn_fetch(),
                command = commands.recv() => match command {
                    Some(ShortTermCommand::Refresh) => {
                        debug!("short-term resync forced");
                        self.spawn_fetch();
                    }
                    None => break,
                },
            }
        }
    }

    /// Start one fetch without waiting for it, so a slow response cannot
    /// delay the next tick. The sequence number is taken now; the receiver
    /// discards results that lost the race to a newer request.
    fn spawn_fetch(&mut self) {
        self.seq += 1;
        let seq = self.seq;
        let source = Arc::clone(&self.source);
        let updates = self.updates.clone();
        let lookback = self.lookback_secs;

        tokio::spawn(async move {
            let update = match fetch_short_window(source.as_ref(), lookback).await {
                Ok(window) => SyncUpdate::ShortTerm { seq, window },
                Err(e) => {
                    warn!("short-term poll failed: {:#}", e);
                    SyncUpdate::Failure {
                        feed: Feed::ShortTerm,
                        message: e.to_string(),
                    }
                }
            };
            let _ = updates.send(update);
        });
    }
}

/// One short-window fetch: network call plus payload validation.
pub async fn fetch_short_window(
    source: &dyn TelemetrySource,
    lookback_secs: u32,
) -> Result<SeriesWindow> {
    source.short_history(lookback_secs).await?.into_window()
}
