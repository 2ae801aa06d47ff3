//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::{GradeBand, LossSeverity, Metric, ScoreBand};

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for healthy/nominal values.
    pub good: Color,
    /// Color for mildly degraded values.
    pub degraded: Color,
    /// Color for badly degraded values.
    pub bad: Color,
    /// Color for critical values.
    pub critical: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for pane headers.
    pub header: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            good: Color::Green,
            degraded: Color::Yellow,
            bad: Color::LightRed,
            critical: Color::Red,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            good: Color::Green,
            degraded: Color::Yellow,
            bad: Color::LightRed,
            critical: Color::Red,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Color for a packet-loss severity bucket.
    pub fn severity_color(&self, severity: LossSeverity) -> Color {
        match severity {
            LossSeverity::Nominal => self.good,
            LossSeverity::Low => self.degraded,
            LossSeverity::Medium => self.bad,
            LossSeverity::High => self.critical,
        }
    }

    /// Style for a grade band (the score badge and panel).
    pub fn band_style(&self, band: GradeBand) -> Style {
        let color = match band {
            GradeBand::High => self.good,
            GradeBand::MidHigh => self.highlight,
            GradeBand::Mid => self.degraded,
            GradeBand::Low => self.bad,
            GradeBand::Lowest => self.critical,
        };
        let style = Style::default().fg(color);
        if band == GradeBand::Lowest {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    /// Color for a detail-bar score band.
    pub fn score_band_color(&self, band: ScoreBand) -> Color {
        match band {
            ScoreBand::High => self.good,
            ScoreBand::Mid => self.degraded,
            ScoreBand::Low => self.critical,
        }
    }

    /// Line color for a chart dataset.
    pub fn metric_color(&self, metric: Metric) -> Color {
        match metric {
            Metric::Ping => self.highlight,
            Metric::Jitter => Color::Magenta,
            Metric::PacketLoss => self.critical,
            Metric::Signal => Color::Blue,
            Metric::Quality => self.good,
        }
    }
}
