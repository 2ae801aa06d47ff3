//! Quality alerting: threshold-crossing detection and the audible alert.

use std::time::Duration;

use rodio::source::{SineWave, Source};
use rodio::{OutputStream, OutputStreamHandle};
use tracing::warn;

/// Tone parameters for an alert beep.
const TONE_FREQ_HZ: f32 = 440.0;
const TONE_DURATION: Duration = Duration::from_millis(300);
const TONE_GAIN_START: f32 = 0.1;
const TONE_GAIN_END: f32 = 0.01;

/// Detects downward crossings of the alert threshold.
///
/// Level-edge triggered: an alert fires only when the score transitions
/// from at/above the threshold to strictly below it between consecutive
/// observations. Staying low does not re-fire; recovering and dropping
/// again does.
#[derive(Debug)]
pub struct QualityWatcher {
    threshold: u8,
    last_score: u8,
}

impl QualityWatcher {
    /// Watcher with the given threshold. The initial stored score is 100,
    /// so a first observation below the threshold fires.
    pub fn new(threshold: u8) -> Self {
        Self {
            threshold,
            last_score: 100,
        }
    }

    /// Record a new score. Returns true when it crossed the threshold
    /// downward. The stored score is always updated, fired or not.
    pub fn observe(&mut self, score: u8) -> bool {
        let crossed = self.last_score >= self.threshold && score < self.threshold;
        self.last_score = score;
        crossed
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }
}

/// Plays the audible alert tone.
///
/// The audio output handle is opened lazily on first use and at most once
/// per process lifetime; later plays reuse it. Opening a new device per
/// beep would pile up device handles.
pub struct AlertTone {
    muted: bool,
    stream: Option<(OutputStream, OutputStreamHandle)>,
    init_failed: bool,
}

impl AlertTone {
    pub fn new(muted: bool) -> Self {
        Self {
            muted,
            stream: None,
            init_failed: false,
        }
    }

    /// Emit a short sine beep with an exponential fade-out.
    ///
    /// All failures (no audio device, playback error) are logged and
    /// swallowed; alerting must never disturb the caller.
    pub fn play(&mut self) {
        if self.muted {
            return;
        }

        if self.stream.is_none() {
            if self.init_failed {
                return;
            }
            match OutputStream::try_default() {
                Ok(pair) => self.stream = Some(pair),
                Err(e) => {
                    self.init_failed = true;
                    warn!("audio device unavailable, alerts will be silent: {}", e);
                    return;
                }
            }
        }

        let Some((_, handle)) = self.stream.as_ref() else {
            return;
        };

        let tone = ExponentialDecay::new(
            SineWave::new(TONE_FREQ_HZ).take_duration(TONE_DURATION),
            TONE_GAIN_START,
            TONE_GAIN_END,
            TONE_DURATION,
        );
        if let Err(e) = handle.play_raw(tone) {
            warn!("failed to play alert tone: {}", e);
        }
    }
}

impl std::fmt::Debug for AlertTone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertTone")
            .field("muted", &self.muted)
            .field("initialized", &self.stream.is_some())
            .field("init_failed", &self.init_failed)
            .finish()
    }
}

/// Wraps a source with a per-sample exponential gain envelope.
struct ExponentialDecay<S> {
    inner: S,
    gain: f32,
    factor: f32,
}

impl<S: Source<Item = f32>> ExponentialDecay<S> {
    fn new(inner: S, start: f32, end: f32, duration: Duration) -> Self {
        let samples =
            (inner.sample_rate() as f32 * inner.channels() as f32 * duration.as_secs_f32())
                .max(1.0);
        let factor = (end / start).powf(1.0 / samples);
        Self {
            inner,
            gain: start,
            factor,
        }
    }
}

impl<S: Source<Item = f32>> Iterator for ExponentialDecay<S> {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        let sample = self.inner.next()?;
        let out = sample * self.gain;
        self.gain *= self.factor;
        Some(out)
    }
}

impl<S: Source<Item = f32>> Source for ExponentialDecay<S> {
    fn current_frame_len(&self) -> Option<usize> {
        self.inner.current_frame_len()
    }

    fn channels(&self) -> u16 {
        self.inner.channels()
    }

    fn sample_rate(&self) -> u32 {
        self.inner.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        self.inner.total_duration()
    }
}
