// Title bar component
//
// App name, plus a spinner and in-flight count while requests are pending.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let pending = app.analyzer.in_flight();
    let indicator = match pending {
        0 => String::new(),
        1 => format!("  {} analyzing", app.spinner_char()),
        n => format!("  {} analyzing ({} in flight)", app.spinner_char(), n),
    };

    let title = Paragraph::new(format!(" Sentiment Analyzer{}", indicator))
        .style(app.theme.title_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.title))
                .title_top(Line::from(format!(" {} ", app.theme_kind.name())).right_aligned()),
        );

    f.render_widget(title, area);
}
