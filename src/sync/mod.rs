//! Polling loops that keep the dashboard in sync with the provider.
//!
//! Two independent loops run on the background runtime:
//!
//! - [`ShortTermSync`]: the rolling 60-second window, polled every second
//! - [`LongTermSync`]: the selected period's series and quality score,
//!   polled every minute
//!
//! Each fetch is spawned as its own task so a slow response never delays
//! the next tick; results flow to the main loop as [`SyncUpdate`]s over an
//! unbounded channel and commands flow the other way. Every fetch carries
//! a sequence number taken when the request starts, and the application
//! side discards responses older than the last applied one: overlapping
//! ticks resolve as sequence-guarded last-applied-wins, so a stale
//! response can never overwrite fresher chart state.

mod long_term;
mod short_term;

pub use long_term::LongTermSync;
pub use short_term::ShortTermSync;

use tokio::sync::mpsc;

use crate::data::{Period, QualityGrade, SeriesWindow};

/// The three data feeds the dashboard consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    ShortTerm,
    LongTerm,
    Score,
}

impl Feed {
    pub fn label(&self) -> &'static str {
        match self {
            Feed::ShortTerm => "live",
            Feed::LongTerm => "history",
            Feed::Score => "score",
        }
    }
}

/// A result delivered from a polling task to the main loop.
#[derive(Debug)]
pub enum SyncUpdate {
    /// A fresh short-term window.
    ShortTerm { seq: u64, window: SeriesWindow },
    /// A fresh long-term window for a period.
    LongTerm {
        seq: u64,
        period: Period,
        window: SeriesWindow,
    },
    /// A fresh quality summary for a period.
    Score {
        seq: u64,
        period: Period,
        grade: QualityGrade,
    },
    /// A fetch failed; charts stay untouched, status bar shows the message.
    Failure { feed: Feed, message: String },
}

/// Commands accepted by the short-term loop.
#[derive(Debug, Clone, Copy)]
pub enum ShortTermCommand {
    /// Fetch now, out of cycle (keyboard refresh, focus regained).
    Refresh,
}

/// Commands accepted by the long-term loop.
#[derive(Debug, Clone, Copy)]
pub enum LongTermCommand {
    /// Run both fetches now. `Some(period)` makes that period active first;
    /// `None` reuses the current one.
    Run(Option<Period>),
}

/// Cheap handle for steering the polling loops from the UI thread.
///
/// Sends are fire-and-forget: the UI never blocks on a poll, and a closed
/// channel (teardown in progress) is ignored.
#[derive(Debug, Clone)]
pub struct SyncHandle {
    short: mpsc::UnboundedSender<ShortTermCommand>,
    long: mpsc::UnboundedSender<LongTermCommand>,
}

impl SyncHandle {
    /// Build a handle plus the receiver ends for the two loops.
    pub fn channel() -> (
        Self,
        mpsc::UnboundedReceiver<ShortTermCommand>,
        mpsc::UnboundedReceiver<LongTermCommand>,
    ) {
        let (short_tx, short_rx) = mpsc::unbounded_channel();
        let (long_tx, long_rx) = mpsc::unbounded_channel();
        (
            Self {
                short: short_tx,
                long: long_tx,
            },
            short_rx,
            long_rx,
        )
    }

    /// Force an immediate short-term resync.
    pub fn refresh_short_term(&self) {
        let _ = self.short.send(ShortTermCommand::Refresh);
    }

    /// Run the long-term cycle now, optionally switching period.
    pub fn run_long_term(&self, period: Option<Period>) {
        let _ = self.long.send(LongTermCommand::Run(period));
    }
}
