//! Application state and update application.
//!
//! The `App` owns everything the UI renders: the chart registry, the active
//! period, the latest quality summary, and per-feed status. Sync results
//! arrive as [`SyncUpdate`]s and are applied here under the per-feed
//! sequence guard.

use std::time::Instant;

use crate::alert::{AlertTone, QualityWatcher};
use crate::charts::{ChartId, ChartRegistry};
use crate::data::{Metric, Period, QualityGrade};
use crate::sync::{Feed, SyncHandle, SyncUpdate};
use crate::ui::Theme;

/// The current view/tab in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Rolling short-term charts, refreshed every second.
    Live,
    /// Long-term charts and the quality summary for the active period.
    LongTerm,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Live => View::LongTerm,
            View::LongTerm => View::Live,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        self.next()
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Live => "Live",
            View::LongTerm => "Long-term",
        }
    }
}

/// Freshness and error state of one data feed.
#[derive(Debug, Default)]
pub struct FeedStatus {
    pub last_update: Option<Instant>,
    pub error: Option<String>,
}

impl FeedStatus {
    fn mark_fresh(&mut self) {
        self.last_update = Some(Instant::now());
        self.error = None;
    }
}

/// Status of all three feeds.
#[derive(Debug, Default)]
pub struct FeedStates {
    pub short_term: FeedStatus,
    pub long_term: FeedStatus,
    pub score: FeedStatus,
}

impl FeedStates {
    pub fn get(&self, feed: Feed) -> &FeedStatus {
        match feed {
            Feed::ShortTerm => &self.short_term,
            Feed::LongTerm => &self.long_term,
            Feed::Score => &self.score,
        }
    }

    fn get_mut(&mut self, feed: Feed) -> &mut FeedStatus {
        match feed {
            Feed::ShortTerm => &mut self.short_term,
            Feed::LongTerm => &mut self.long_term,
            Feed::Score => &mut self.score,
        }
    }
}

/// Last applied sequence number per feed. Responses that lost the race to
/// a newer request are discarded, never rendered.
#[derive(Debug, Default)]
struct AppliedSeq {
    short_term: u64,
    long_term: u64,
    score: u64,
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,
    /// Instructions panel for launching the external overlay tool.
    pub show_overlay_hint: bool,

    pub registry: ChartRegistry,
    pub period: Period,
    pub grade: Option<QualityGrade>,
    pub feeds: FeedStates,
    pub watcher: QualityWatcher,
    tone: AlertTone,
    sync: SyncHandle,
    applied: AppliedSeq,

    // UI
    pub theme: Theme,
    pub status_message: Option<(String, Instant)>,
    source_description: String,
}

impl App {
    pub fn new(
        registry: ChartRegistry,
        sync: SyncHandle,
        period: Period,
        alert_threshold: u8,
        muted: bool,
        source_description: String,
    ) -> Self {
        Self {
            running: true,
            current_view: View::Live,
            show_help: false,
            show_overlay_hint: false,
            registry,
            period,
            grade: None,
            feeds: FeedStates::default(),
            watcher: QualityWatcher::new(alert_threshold),
            tone: AlertTone::new(muted),
            sync,
            applied: AppliedSeq::default(),
            theme: Theme::auto_detect(),
            status_message: None,
            source_description,
        }
    }

    /// Returns a description of the telemetry source.
    pub fn source_description(&self) -> &str {
        &self.source_description
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Apply one sync result to the owned state.
    ///
    /// Each feed updates only its own disjoint charts/panel, so a partial
    /// failure in one feed never corrupts another. Stale responses (older
    /// sequence than the last applied) are dropped.
    pub fn apply_update(&mut self, update: SyncUpdate) {
        match update {
            SyncUpdate::ShortTerm { seq, window } => {
                if seq <= self.applied.short_term {
                    tracing::trace!(seq, "discarding stale short-term response");
                    return;
                }
                self.applied.short_term = seq;
                self.registry.update_series(
                    ChartId::ShortTermLatency,
                    &window,
                    &[Metric::Ping, Metric::Jitter],
                );
                self.registry
                    .update_series(ChartId::ShortTermLoss, &window, &[Metric::PacketLoss]);
                self.feeds.short_term.mark_fresh();
            }
            SyncUpdate::LongTerm { seq, window, .. } => {
                if seq <= self.applied.long_term {
                    tracing::trace!(seq, "discarding stale long-term response");
                    return;
                }
                self.applied.long_term = seq;
                self.registry.update_series(
                    ChartId::LongTermLatency,
                    &window,
                    &[Metric::Ping, Metric::Jitter],
                );
                self.registry
                    .update_series(ChartId::LongTermQuality, &window, &[Metric::Quality]);
                self.registry
                    .update_series(ChartId::LongTermLoss, &window, &[Metric::PacketLoss]);
                self.registry
                    .update_series(ChartId::LongTermSignal, &window, &[Metric::Signal]);
                self.feeds.long_term.mark_fresh();
            }
            SyncUpdate::Score { seq, grade, .. } => {
                if seq <= self.applied.score {
                    tracing::trace!(seq, "discarding stale score response");
                    return;
                }
                self.applied.score = seq;
                let score = grade.score;
                self.grade = Some(grade);
                self.feeds.score.mark_fresh();

                // The score reaches the watcher as data, straight from the
                // fetch; the rendered panel is not involved.
                if self.watcher.observe(score) {
                    tracing::info!(score, "quality fell below {}", self.watcher.threshold());
                    self.set_status_message(format!(
                        "Quality alert: score {} fell below {}",
                        score,
                        self.watcher.threshold()
                    ));
                    self.tone.play();
                }
            }
            SyncUpdate::Failure { feed, message } => {
                self.feeds.get_mut(feed).error = Some(message);
            }
        }
    }

    /// Make a period active and kick off its chart + score refresh.
    /// Fire-and-forget: the fetches land as updates later.
    pub fn set_period(&mut self, period: Period) {
        self.period = period;
        self.sync.run_long_term(Some(period));
    }

    /// Force an immediate refresh of every feed.
    pub fn force_refresh(&mut self) {
        self.sync.refresh_short_term();
        self.sync.run_long_term(None);
        self.set_status_message("Refreshing...".into());
    }

    /// Force a short-term resync (used when the terminal regains focus).
    pub fn resync_short_term(&mut self) {
        self.sync.refresh_short_term();
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Show the external-overlay launch instructions.
    pub fn show_overlay_instructions(&mut self) {
        self.show_overlay_hint = true;
    }

    /// Close overlays first; then fall back to the Live view.
    pub fn go_back(&mut self) {
        if self.show_overlay_hint {
            self.show_overlay_hint = false;
            return;
        }
        if self.show_help {
            self.show_help = false;
            return;
        }
        if self.current_view != View::Live {
            self.current_view = View::Live;
        }
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}
