//! Quality grading and severity classification.
//!
//! The provider derives a 0-100 quality score per aggregation period and
//! buckets it into a letter grade. This module holds the processed form of
//! that summary plus the pure classification functions shared by the charts
//! and the score panel.

use crate::source::{DetailEntry, ScorePayload};

/// A long-term aggregation window selectable by the user.
///
/// Exactly one period is active at a time; the enum representation makes
/// the mutual exclusion structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Period {
    #[default]
    Day,
    Week,
    Month,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Day, Period::Week, Period::Month];

    /// Wire value used in provider query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
        }
    }

    /// Display label for the period tabs.
    pub fn label(&self) -> &'static str {
        match self {
            Period::Day => "Day",
            Period::Week => "Week",
            Period::Month => "Month",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "day" => Some(Period::Day),
            "week" => Some(Period::Week),
            "month" => Some(Period::Month),
            _ => None,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Period::Day => Period::Week,
            Period::Week => Period::Month,
            Period::Month => Period::Day,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Period::Day => Period::Month,
            Period::Week => Period::Day,
            Period::Month => Period::Week,
        }
    }
}

/// Severity bucket for a packet-loss value.
///
/// Used for bar coloring on both loss charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossSeverity {
    Nominal,
    Low,
    Medium,
    High,
}

impl LossSeverity {
    /// Classify a packet-loss percentage.
    pub fn of(percent: f64) -> Self {
        if percent > 5.0 {
            LossSeverity::High
        } else if percent > 1.0 {
            LossSeverity::Medium
        } else if percent > 0.0 {
            LossSeverity::Low
        } else {
            LossSeverity::Nominal
        }
    }
}

/// Semantic band derived from a grade string's leading character.
///
/// Tolerates any grade string: unmatched prefixes fall back to the lowest
/// band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeBand {
    High,
    MidHigh,
    Mid,
    Low,
    Lowest,
}

impl GradeBand {
    pub fn of(grade: &str) -> Self {
        match grade.chars().next() {
            Some('A') => GradeBand::High,
            Some('B') => GradeBand::MidHigh,
            Some('C') => GradeBand::Mid,
            Some('D') => GradeBand::Low,
            _ => GradeBand::Lowest,
        }
    }
}

/// Band for a 0-100 sub-score detail bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    High,
    Mid,
    Low,
}

impl ScoreBand {
    pub fn of(score: f64) -> Self {
        if score >= 80.0 {
            ScoreBand::High
        } else if score >= 50.0 {
            ScoreBand::Mid
        } else {
            ScoreBand::Low
        }
    }
}

/// Clamp a sub-score to the renderable 0-100 bar range.
pub fn bar_width(score: f64) -> u16 {
    score.clamp(0.0, 100.0).round() as u16
}

/// Status wording for a live quality score, following the provider's
/// bucketing.
pub fn status_word(score: u8) -> &'static str {
    match score {
        90..=u8::MAX => "Excellent",
        75..=89 => "Good",
        50..=74 => "Fair",
        25..=49 => "Poor",
        _ => "Critical",
    }
}

/// One named sub-score within a quality summary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailScore {
    pub score: f64,
    pub avg_ms: Option<f64>,
    pub events: Option<u64>,
}

impl DetailScore {
    fn from_entry(entry: Option<DetailEntry>) -> Self {
        // A sub-score the provider omitted renders as 0, not an error.
        match entry {
            Some(e) => Self {
                score: e.score,
                avg_ms: e.avg_ms,
                events: e.events,
            },
            None => Self::default(),
        }
    }
}

/// The four named sub-scores of a quality summary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailScores {
    pub packet_loss: DetailScore,
    pub ping: DetailScore,
    pub connection: DetailScore,
    pub jitter: DetailScore,
}

impl DetailScores {
    /// Sub-scores in display order with their panel labels.
    pub fn named(&self) -> [(&'static str, &DetailScore); 4] {
        [
            ("packet loss", &self.packet_loss),
            ("ping", &self.ping),
            ("connection", &self.connection),
            ("jitter", &self.jitter),
        ]
    }
}

/// Processed quality summary for the active period.
///
/// Recomputed wholesale from each score fetch; never merged incrementally.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityGrade {
    pub grade: String,
    pub score: u8,
    pub message: String,
    pub record_count: u64,
    pub hours_analyzed: f64,
    pub details: DetailScores,
}

impl QualityGrade {
    /// Normalize a raw score payload: clamp the score into 0-100 and
    /// default absent sub-scores to zero.
    pub fn from_payload(payload: ScorePayload) -> Self {
        Self {
            grade: payload.grade,
            score: payload.score.clamp(0, 100) as u8,
            message: payload.message,
            record_count: payload.record_count,
            hours_analyzed: payload.hours_analyzed,
            details: DetailScores {
                packet_loss: DetailScore::from_entry(payload.details.packet_loss),
                ping: DetailScore::from_entry(payload.details.ping),
                connection: DetailScore::from_entry(payload.details.connection),
                jitter: DetailScore::from_entry(payload.details.jitter),
            },
        }
    }

    pub fn band(&self) -> GradeBand {
        GradeBand::of(&self.grade)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loss_severity_boundaries() {
        assert_eq!(LossSeverity::of(0.0), LossSeverity::Nominal);
        assert_eq!(LossSeverity::of(0.5), LossSeverity::Low);
        assert_eq!(LossSeverity::of(1.0), LossSeverity::Low);
        assert_eq!(LossSeverity::of(1.1), LossSeverity::Medium);
        assert_eq!(LossSeverity::of(5.0), LossSeverity::Medium);
        assert_eq!(LossSeverity::of(5.1), LossSeverity::High);
        assert_eq!(LossSeverity::of(100.0), LossSeverity::High);
    }

    #[test]
    fn test_grade_band_prefixes() {
        assert_eq!(GradeBand::of("A+"), GradeBand::High);
        assert_eq!(GradeBand::of("A"), GradeBand::High);
        assert_eq!(GradeBand::of("B+"), GradeBand::MidHigh);
        assert_eq!(GradeBand::of("C-"), GradeBand::Mid);
        assert_eq!(GradeBand::of("D"), GradeBand::Low);
        assert_eq!(GradeBand::of("E"), GradeBand::Lowest);
        assert_eq!(GradeBand::of("F"), GradeBand::Lowest);
        assert_eq!(GradeBand::of(""), GradeBand::Lowest);
    }

    #[test]
    fn test_score_band_boundaries() {
        assert_eq!(ScoreBand::of(100.0), ScoreBand::High);
        assert_eq!(ScoreBand::of(80.0), ScoreBand::High);
        assert_eq!(ScoreBand::of(79.9), ScoreBand::Mid);
        assert_eq!(ScoreBand::of(50.0), ScoreBand::Mid);
        assert_eq!(ScoreBand::of(49.9), ScoreBand::Low);
        assert_eq!(ScoreBand::of(0.0), ScoreBand::Low);
    }

    #[test]
    fn test_bar_width_clamps() {
        assert_eq!(bar_width(-5.0), 0);
        assert_eq!(bar_width(0.0), 0);
        assert_eq!(bar_width(42.4), 42);
        assert_eq!(bar_width(100.0), 100);
        assert_eq!(bar_width(250.0), 100);
    }

    #[test]
    fn test_period_round_trip() {
        for period in Period::ALL {
            assert_eq!(Period::from_name(period.as_str()), Some(period));
        }
        assert_eq!(Period::from_name("year"), None);
    }

    #[test]
    fn test_grade_from_payload_defaults_missing_details() {
        let payload: ScorePayload = serde_json::from_str(
            r#"{"grade": "B+", "score": 78, "message": "Stable connection",
                "record_count": 1440, "hours_analyzed": 24.0,
                "details": {"ping": {"score": 85, "avg_ms": 23.5}}}"#,
        )
        .unwrap();

        let grade = QualityGrade::from_payload(payload);
        assert_eq!(grade.score, 78);
        assert_eq!(grade.band(), GradeBand::MidHigh);
        assert_eq!(grade.details.ping.score, 85.0);
        assert_eq!(grade.details.ping.avg_ms, Some(23.5));
        // packet_loss / connection / jitter were absent: default to zero.
        assert_eq!(grade.details.packet_loss.score, 0.0);
        assert_eq!(grade.details.jitter, DetailScore::default());
    }

    #[test]
    fn test_grade_from_payload_clamps_score() {
        let payload: ScorePayload =
            serde_json::from_str(r#"{"grade": "A+", "score": 140}"#).unwrap();
        assert_eq!(QualityGrade::from_payload(payload).score, 100);

        let payload: ScorePayload =
            serde_json::from_str(r#"{"grade": "F", "score": -3}"#).unwrap();
        assert_eq!(QualityGrade::from_payload(payload).score, 0);
    }
}
