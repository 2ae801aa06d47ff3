//! Common UI components shared across views.
//!
//! This module contains the header bar, tab row, status bar, and the help
//! and overlay-instruction modals.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, View};
use crate::data::{status_word, Period};
use crate::sync::Feed;
use crate::ui::clock::ClockDisplay;

/// Render the header bar: app name, quality badge, active period, source,
/// and the wall clock.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        " LINKWATCH ",
        Style::default().add_modifier(Modifier::BOLD),
    )];

    match &app.grade {
        Some(grade) => {
            spans.push(Span::raw("│ "));
            spans.push(Span::styled(
                format!("{} {}", grade.score, grade.grade),
                app.theme.band_style(grade.band()),
            ));
            spans.push(Span::raw(format!(" ({}) ", status_word(grade.score))));
        }
        None => spans.push(Span::raw("│ scoring... ")),
    }

    spans.push(Span::raw(format!(
        "│ {} │ {} ",
        app.period.label().to_lowercase(),
        app.source_description()
    )));

    let clock = ClockDisplay.text();
    let used: usize = spans.iter().map(|s| s.width()).sum();
    let pad = (area.width as usize).saturating_sub(used + clock.len() + 1);
    spans.push(Span::raw(" ".repeat(pad)));
    spans.push(Span::styled(clock, Style::default().add_modifier(Modifier::DIM)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the tab row: view tabs on the left, period tabs beside them.
///
/// Cell widths are fixed so mouse clicks resolve through
/// [`crate::events::tab_hit`].
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();

    for view in [View::Live, View::LongTerm] {
        let style = if app.current_view == view {
            app.theme.tab_active
        } else {
            app.theme.tab_inactive
        };
        let label = match view {
            View::Live => " 1:Live",
            View::LongTerm => " 2:Long-term",
        };
        spans.push(Span::styled(format!("{:<13}", label), style));
    }

    for period in Period::ALL {
        let style = if app.period == period {
            app.theme.tab_active
        } else {
            app.theme.tab_inactive
        };
        let label = match period {
            Period::Day => " d:Day  ",
            Period::Week => " w:Week ",
            Period::Month => " m:Month",
        };
        spans.push(Span::styled(label, style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the status bar at the bottom.
///
/// Shows temporary status messages first, then feed freshness, feed
/// errors, and the key hints for the current view.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    // The first feed error wins the status line; stale charts stay up
    // behind it.
    for feed in [Feed::ShortTerm, Feed::LongTerm, Feed::Score] {
        if let Some(err) = &app.feeds.get(feed).error {
            let paragraph = Paragraph::new(format!(" {} feed: {} | r:retry q:quit ", feed.label(), err))
                .style(Style::default().fg(app.theme.critical));
            frame.render_widget(paragraph, area);
            return;
        }
    }

    let freshness = match app.feeds.get(Feed::ShortTerm).last_update {
        Some(at) => format!("updated {:.1}s ago", at.elapsed().as_secs_f64()),
        None => "waiting for data".to_string(),
    };

    let controls = match app.current_view {
        View::Live => "Tab:switch r:refresh o:overlay ?:help q:quit",
        View::LongTerm => "d/w/m:period ←/→:cycle r:refresh ?:help q:quit",
    };

    let status = format!(" {} | {} | {}", app.current_view.label(), freshness, controls);
    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Views",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  Tab         Switch view"),
        Line::from("  1 / 2       Live / Long-term"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Long-term period",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  d / w / m   Day / Week / Month"),
        Line::from("  ←/→         Cycle period"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r           Refresh now"),
        Line::from("  o           Overlay instructions"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);
    let modal = centered(area, 40, 20);
    frame.render_widget(Clear, modal);
    frame.render_widget(paragraph, modal);
}

/// Render the overlay-launch instructions.
///
/// The in-game overlay is a separate desktop process this dashboard never
/// manages; all we do is tell the user how to start it.
pub fn render_overlay_hint(frame: &mut Frame, app: &App, area: Rect) {
    let text = vec![
        Line::from(vec![Span::styled("Desktop Overlay", app.theme.header)]),
        Line::from(""),
        Line::from("The overlay runs as its own process, on top"),
        Line::from("of your game or desktop. Start it from a"),
        Line::from("separate terminal:"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "  linkwatch-overlay --url <api-url>",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from("It reads the same telemetry API as this"),
        Line::from("dashboard and stays on top of other windows."),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Overlay ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(text).block(block);
    let modal = centered(area, 48, 15);
    frame.render_widget(Clear, modal);
    frame.render_widget(paragraph, modal);
}

/// Center a fixed-size modal within an area, shrinking to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
