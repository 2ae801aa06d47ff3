//! Live view: the rolling short-term window.
//!
//! Latency/jitter lines on top, packet-loss bars underneath. Panes whose
//! charts are disabled in the configuration are simply not drawn.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};

use crate::app::App;
use crate::charts::ChartId;
use crate::ui::widgets::{render_line_chart, render_loss_chart};

/// Render the Live view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let latency = app.registry.get(ChartId::ShortTermLatency);
    let loss = app.registry.get(ChartId::ShortTermLoss);

    match (latency, loss) {
        (Some(latency), Some(loss)) => {
            let chunks =
                Layout::vertical([Constraint::Percentage(62), Constraint::Percentage(38)])
                    .split(area);
            render_line_chart(
                frame,
                &app.theme,
                chunks[0],
                ChartId::ShortTermLatency.title(),
                latency,
                None,
            );
            render_loss_chart(
                frame,
                &app.theme,
                chunks[1],
                ChartId::ShortTermLoss.title(),
                loss,
            );
        }
        (Some(latency), None) => render_line_chart(
            frame,
            &app.theme,
            area,
            ChartId::ShortTermLatency.title(),
            latency,
            None,
        ),
        (None, Some(loss)) => {
            render_loss_chart(frame, &app.theme, area, ChartId::ShortTermLoss.title(), loss)
        }
        (None, None) => {}
    }
}
