//! Long-term view: period charts plus the quality summary panel.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::charts::ChartId;
use crate::data::{bar_width, status_word, ScoreBand};
use crate::ui::widgets::{render_line_chart, render_loss_chart};

/// Width of the score panel on the right.
const SCORE_PANEL_WIDTH: u16 = 34;

/// Render the Long-term view: a 2x2 chart grid and the score panel.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let columns =
        Layout::horizontal([Constraint::Min(40), Constraint::Length(SCORE_PANEL_WIDTH)])
            .split(area);

    render_chart_grid(frame, app, columns[0]);
    render_score_panel(frame, app, columns[1]);
}

fn render_chart_grid(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let top = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    let bottom = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    if let Some(state) = app.registry.get(ChartId::LongTermLatency) {
        render_line_chart(
            frame,
            &app.theme,
            top[0],
            ChartId::LongTermLatency.title(),
            state,
            None,
        );
    }
    if let Some(state) = app.registry.get(ChartId::LongTermQuality) {
        render_line_chart(
            frame,
            &app.theme,
            top[1],
            ChartId::LongTermQuality.title(),
            state,
            Some([0.0, 100.0]),
        );
    }
    if let Some(state) = app.registry.get(ChartId::LongTermLoss) {
        render_loss_chart(
            frame,
            &app.theme,
            bottom[0],
            ChartId::LongTermLoss.title(),
            state,
        );
    }
    if let Some(state) = app.registry.get(ChartId::LongTermSignal) {
        render_line_chart(
            frame,
            &app.theme,
            bottom[1],
            ChartId::LongTermSignal.title(),
            state,
            Some([0.0, 100.0]),
        );
    }
}

/// Render the grade, score, message, and the four sub-score bars.
fn render_score_panel(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(format!(" Quality ({}) ", app.period.label()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(grade) = &app.grade else {
        frame.render_widget(Paragraph::new("waiting for score..."), inner);
        return;
    };

    let band_style = app.theme.band_style(grade.band());
    let header = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", grade.grade),
                band_style.add_modifier(Modifier::BOLD | Modifier::REVERSED),
            ),
            Span::raw(" "),
            Span::styled(format!("{}/100", grade.score), band_style),
            Span::raw(format!(" {}", status_word(grade.score))),
        ]),
        Line::from(""),
        Line::from(grade.message.clone()),
        Line::from(Span::styled(
            format!(
                "{} records over {:.1}h",
                grade.record_count, grade.hours_analyzed
            ),
            Style::default().add_modifier(Modifier::DIM),
        )),
        Line::from(""),
    ];
    let header_height = header.len() as u16;

    let chunks = Layout::vertical([
        Constraint::Length(header_height),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(inner);

    frame.render_widget(Paragraph::new(header).wrap(Wrap { trim: true }), chunks[0]);

    for (chunk, (name, detail)) in chunks[1..].iter().zip(grade.details.named()) {
        let width = bar_width(detail.score);
        let color = app.theme.score_band_color(ScoreBand::of(detail.score));
        let mut label = format!("{} {}", name, width);
        if let Some(avg) = detail.avg_ms {
            label.push_str(&format!(" ({:.0}ms)", avg));
        }
        if let Some(events) = detail.events {
            label.push_str(&format!(" ({} events)", events));
        }
        let gauge = Gauge::default()
            .ratio(f64::from(width) / 100.0)
            .label(label)
            .gauge_style(Style::default().fg(color))
            .use_unicode(true);
        frame.render_widget(gauge, *chunk);
    }
}
