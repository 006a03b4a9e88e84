// Input box and Analyze button
//
// The box shows the analyzer's input text with a cursor; the button is a
// one-line control underneath that triggers analysis when focused.

use crate::tui::app::{App, Focus};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Input;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(focused))
        .title(" Text ");
    let inner = block.inner(area);

    let text = app.analyzer.input();
    let paragraph = if text.is_empty() && !focused {
        Paragraph::new(Span::styled("Enter text to analyze", app.theme.muted_style()))
    } else {
        let (visible, cursor_col) = app.input.viewport(text, inner.width);
        if focused {
            f.set_cursor_position(Position::new(inner.x + cursor_col, inner.y));
        }
        Paragraph::new(visible).style(app.theme.base_style())
    };

    f.render_widget(paragraph.block(block), area);
}

pub fn render_button(f: &mut Frame, area: Rect, app: &App) {
    let style = if app.focus == Focus::Button {
        Style::default()
            .fg(app.theme.button_fg)
            .bg(app.theme.button_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.button_bg)
    };

    let line = Line::from(vec![
        Span::raw(" "),
        Span::styled("[ Analyze ]", style),
        Span::styled("  Enter", app.theme.muted_style()),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
