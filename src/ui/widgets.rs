//! Chart pane rendering.
//!
//! Turns [`ChartState`] owned by the registry into ratatui widgets. A pane
//! whose chart is disabled is skipped by the caller; a pane whose chart has
//! no data yet renders a placeholder instead of an empty axis.

use ratatui::{
    layout::Rect,
    style::Style,
    symbols,
    text::Line,
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::charts::ChartState;
use crate::data::LossSeverity;
use crate::ui::Theme;

/// Fixed y-axis ceiling for the packet-loss charts, in percent. Values
/// above it are clipped to the axis rather than rescaling it.
const LOSS_AXIS_MAX: f64 = 10.0;

/// Render a multi-line chart pane from chart state.
///
/// `y_bounds` pins the axis (quality and signal are percentages); without
/// it the axis scales to the data.
pub fn render_line_chart(
    frame: &mut Frame,
    theme: &Theme,
    area: Rect,
    title: &str,
    state: &ChartState,
    y_bounds: Option<[f64; 2]>,
) {
    let block = pane_block(theme, title);

    if state.is_empty() {
        render_placeholder(frame, area, block);
        return;
    }

    let points: Vec<Vec<(f64, f64)>> = state
        .datasets
        .iter()
        .map(|(_, values)| {
            values
                .iter()
                .enumerate()
                .map(|(i, v)| (i as f64, *v))
                .collect()
        })
        .collect();

    let datasets: Vec<Dataset> = state
        .datasets
        .iter()
        .zip(points.iter())
        .map(|((metric, _), data)| {
            Dataset::default()
                .name(metric.label())
                .graph_type(GraphType::Line)
                .marker(symbols::Marker::Braille)
                .style(Style::default().fg(theme.metric_color(*metric)))
                .data(data)
        })
        .collect();

    let x_max = (state.labels.len().saturating_sub(1)).max(1) as f64;
    let x_labels: Vec<Line> = vec![
        state.labels.first().cloned().unwrap_or_default().into(),
        state.labels.last().cloned().unwrap_or_default().into(),
    ];

    let [y_min, y_max] = y_bounds.unwrap_or_else(|| {
        let max = state
            .datasets
            .iter()
            .flat_map(|(_, values)| values.iter().copied())
            .fold(f64::NEG_INFINITY, f64::max);
        [0.0, (max * 1.1).max(10.0)]
    });

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, x_max])
                .labels(x_labels)
                .style(Style::default().fg(theme.border)),
        )
        .y_axis(
            Axis::default()
                .bounds([y_min, y_max])
                .labels([
                    Line::from(format!("{:.0}", y_min)),
                    Line::from(format!("{:.0}", (y_min + y_max) / 2.0)),
                    Line::from(format!("{:.0}", y_max)),
                ])
                .style(Style::default().fg(theme.border)),
        );

    frame.render_widget(chart, area);
}

/// Render a packet-loss pane as severity-colored bars.
///
/// One bar per sample, colored by [`LossSeverity`], clipped to the fixed
/// 0-10% axis. Only the trailing samples that fit the pane are drawn.
pub fn render_loss_chart(
    frame: &mut Frame,
    theme: &Theme,
    area: Rect,
    title: &str,
    state: &ChartState,
) {
    let latest = state
        .datasets
        .first()
        .and_then(|(_, values)| values.last().copied());
    let title = match latest {
        Some(v) => format!("{} ({:.1}%)", title, v),
        None => title.to_string(),
    };
    let block = pane_block(theme, &title);

    let Some((_, values)) = state.datasets.first() else {
        render_placeholder(frame, area, block);
        return;
    };
    if values.is_empty() {
        render_placeholder(frame, area, block);
        return;
    }

    let capacity = area.width.saturating_sub(2).max(1) as usize;
    let start = values.len().saturating_sub(capacity);

    let bars: Vec<Bar> = values[start..]
        .iter()
        .map(|&v| {
            let severity = LossSeverity::of(v);
            // Scale 0-10% to the 0-100 bar axis; clip past the ceiling.
            let scaled = (v.clamp(0.0, LOSS_AXIS_MAX) * 10.0).round() as u64;
            Bar::default()
                .value(scaled)
                .text_value(String::new())
                .style(Style::default().fg(theme.severity_color(severity)))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .bar_width(1)
        .bar_gap(0)
        .max(100)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

fn pane_block(theme: &Theme, title: &str) -> Block<'static> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
}

fn render_placeholder(frame: &mut Frame, area: Rect, block: Block) {
    let paragraph = Paragraph::new("waiting for samples...").block(block);
    frame.render_widget(paragraph, area);
}
