// Sentiment Analyzer - terminal client for a sentiment-classification service
//
// Sends text to a remote prediction endpoint and shows the JSON it returns.
//
// Architecture:
// - Analyzer: input text + last result, request generations, settle policy
// - Client (reqwest): POST {"text": ...} with X-API-KEY, health checks
// - TUI (ratatui): input box, Analyze button, result JSON, captured logs
// - Batch: JSONL in, JSON array out, through the same client
// - Event system: dispatch tasks report settled results over an mpsc channel

mod analyzer;
mod batch;
mod cli;
mod client;
mod config;
mod events;
mod logging;
#[cfg(test)]
mod testing;
mod tui;
mod util;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use logging::{LogBuffer, LogOutput};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config commands print and exit before any logging is set up
    if cli::handle_config_command(&cli) {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let mut config = Config::from_env();
    cli.apply_overrides(&mut config);

    // In TUI mode logs are captured into a buffer so they don't garble the
    // display; subcommands log to stderr. The guard keeps file logs flushing.
    let log_buffer = LogBuffer::new();
    let output = match cli.command {
        None => LogOutput::Tui(log_buffer.clone()),
        Some(_) => LogOutput::Stderr,
    };
    let file_guard = logging::init(&config.logging, output);

    tracing::debug!("Config loaded from {:?}", Config::config_path());

    match cli.command {
        None => {
            let client = cli::build_client(&config)?;
            tui::run_tui(config, client, log_buffer).await
        }
        Some(Commands::Analyze { text }) => {
            let code = cli::run_analyze(&config, &text).await?;
            if code != 0 {
                drop(file_guard);
                std::process::exit(code);
            }
            Ok(())
        }
        Some(Commands::Batch {
            input,
            output,
            concurrency,
        }) => cli::run_batch(&config, input, output, concurrency).await,
        Some(Commands::Health) => cli::run_health(&config).await,
        // Handled above
        Some(Commands::Config { .. }) => Ok(()),
    }
}
