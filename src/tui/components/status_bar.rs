// Status bar component
//
// Uptime, endpoint, request counters and latency, with a key hint.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let stats = &app.stats;

    let discarded = if stats.discarded > 0 {
        format!(" ({} stale)", stats.discarded)
    } else {
        String::new()
    };

    let latency = match stats.last_latency {
        Some(last) => format!(
            " │ last {}ms, avg {}ms",
            last.as_millis(),
            stats.avg_latency().as_millis()
        ),
        None => String::new(),
    };

    let text = format!(
        " {} │ {} │ {} sent, {} ok, {} failed{}{} │ Tab focus · ^Y copy · ^T theme · Esc quit",
        app.uptime(),
        app.endpoint,
        stats.requests,
        stats.succeeded,
        stats.failed,
        discarded,
        latency,
    );

    let status = Paragraph::new(text)
        .style(app.theme.status_style())
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}
