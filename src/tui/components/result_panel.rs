// Result panel
//
// Pretty-printed JSON of the last settled result. Success and failure are
// rendered the same way; only the border color tells them apart. Nothing
// but a hint is shown before the first result arrives.

use crate::tui::app::{App, Focus};
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some(result) = app.analyzer.result() else {
        let hint = Paragraph::new(" Press Enter to analyze the text above")
            .style(app.theme.muted_style());
        f.render_widget(hint, area);
        return;
    };

    let focused = app.focus == Focus::Result;
    let accent = if result.is_failure() {
        app.theme.error
    } else {
        match result.sentiment() {
            Some(s) if s.eq_ignore_ascii_case("negative") => app.theme.negative,
            _ => app.theme.positive,
        }
    };
    let border_style = if focused {
        app.theme.border_style(true)
    } else {
        Style::default().fg(accent)
    };

    let paragraph = Paragraph::new(result.to_pretty_json())
        .style(app.theme.base_style())
        .scroll((app.result_scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(" Result: "),
        );

    f.render_widget(paragraph, area);
}
