// TUI module - Terminal User Interface
//
// Sets up the terminal, runs the event loop and restores the terminal on
// exit. The loop waits on keyboard input, a redraw tick and settled
// analyses from background tasks; all state changes happen here, one
// event at a time.

pub mod app;
pub mod clipboard;
pub mod components;
pub mod input;
pub mod theme;
pub mod ui;

use crate::analyzer::Dispatcher;
use crate::client::SentimentClient;
use crate::config::Config;
use crate::events::AnalysisEvent;
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Settled results queued between background tasks and the UI
const EVENT_CHANNEL_SIZE: usize = 64;

/// Run the TUI until the user quits
pub async fn run_tui(config: Config, client: SentimentClient, log_buffer: LogBuffer) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::channel(EVENT_CHANNEL_SIZE);
    let dispatcher = Dispatcher::new(Arc::new(client), config.analysis.strict_schema, event_tx);
    let mut app = App::new(&config, log_buffer);

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    // Bracketed paste delivers pasted text as one event, so a newline inside
    // it never reaches the key handler as Enter
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    tracing::info!(
        "Ready: endpoint {} ({} policy)",
        config.endpoint,
        app.analyzer.policy().as_str()
    );

    let result = run_event_loop(&mut terminal, &mut app, &dispatcher, &mut event_rx).await;

    // Restore even when the loop failed
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    if app.analyzer.in_flight() > 0 {
        tracing::debug!(
            "Exiting with {} request(s) still in flight",
            app.analyzer.in_flight()
        );
    }

    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    dispatcher: &Dispatcher,
    event_rx: &mut mpsc::Receiver<AnalysisEvent>,
) -> Result<()> {
    // Spinner and toast expiry
    let mut tick_interval = tokio::time::interval(Duration::from_millis(100));

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => {
                            if let Some(request) = app.handle_key(key_event) {
                                dispatcher.dispatch(request);
                            }
                        }
                        Ok(Event::Paste(text)) => app.handle_paste(&text),
                        _ => {}
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick();
            }

            Some(analysis_event) = event_rx.recv() => {
                app.on_analysis_event(analysis_event);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
