// UI rendering
//
// One screen, split top to bottom: title, input, button, result, logs,
// status. The toast is drawn last as an overlay.

use super::app::App;
use super::components::{input_box, logs_panel, result_panel, status_bar, title_bar};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    widgets::Block,
    Frame,
};

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &App) {
    f.render_widget(Block::default().style(app.theme.base_style()), f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Input box
            Constraint::Length(1), // Analyze button
            Constraint::Min(6),    // Result
            Constraint::Length(8), // Logs
            Constraint::Length(2), // Status bar
        ])
        .split(f.area());

    title_bar::render(f, chunks[0], app);
    input_box::render(f, chunks[1], app);
    input_box::render_button(f, chunks[2], app);
    result_panel::render(f, chunks[3], app);
    logs_panel::render(f, chunks[4], app);
    status_bar::render(f, chunks[5], app);

    if let Some(toast) = &app.toast {
        toast.render(f, f.area(), &app.theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::AnalysisResult;
    use crate::config::Config;
    use crate::events::AnalysisEvent;
    use crate::logging::LogBuffer;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn render_to_string(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_result_hidden_until_settled() {
        let app = App::new(&Config::default(), LogBuffer::new());
        let screen = render_to_string(&app);
        assert!(screen.contains("Sentiment Analyzer"));
        assert!(screen.contains("[ Analyze ]"));
        assert!(!screen.contains("Result:"));
    }

    #[test]
    fn test_failure_rendered_as_json() {
        let mut app = App::new(&Config::default(), LogBuffer::new());
        let request = app.analyzer.begin_analysis();
        app.on_analysis_event(AnalysisEvent::Settled {
            generation: request.generation,
            result: AnalysisResult::failure(),
            elapsed: Duration::from_millis(5),
        });

        let screen = render_to_string(&app);
        assert!(screen.contains("Result:"));
        assert!(screen.contains("\"error\": \"Failed to analyze sentiment\""));
    }

    #[test]
    fn test_spinner_while_in_flight() {
        let mut app = App::new(&Config::default(), LogBuffer::new());
        app.analyzer.begin_analysis();
        app.analyzer.begin_analysis();
        assert!(render_to_string(&app).contains("analyzing (2 in flight)"));
    }
}
