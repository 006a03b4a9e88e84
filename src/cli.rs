// CLI module - command-line argument parsing and handlers
//
// With no subcommand the TUI starts. Subcommands:
// - analyze <TEXT>: one request, result printed as JSON
// - batch: analyze a JSONL file, write a JSON array
// - health: query the service health endpoint
// - config --show | --path | --reset

use crate::analyzer::analyze_once;
use crate::batch;
use crate::client::{ClientSettings, SentimentClient};
use crate::config::{Config, VERSION};
use crate::util::key_fingerprint;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sentiment Analyzer - terminal client for a sentiment-classification service
#[derive(Parser, Debug)]
#[command(name = "sentiment-analyzer")]
#[command(version = VERSION)]
#[command(about = "Terminal client for a remote sentiment-classification endpoint", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Override the prediction endpoint URL
    #[arg(long, global = true)]
    pub endpoint: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a single text and print the result
    Analyze {
        /// Text to analyze (may be empty)
        text: String,
    },

    /// Analyze every {"text": ...} line of a JSONL file
    Batch {
        /// Input JSONL file [default: from config]
        #[arg(long, short)]
        input: Option<PathBuf>,

        /// Output JSON file [default: from config]
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Requests in flight at once [default: from config]
        #[arg(long)]
        concurrency: Option<usize>,
    },

    /// Check the service health endpoint
    Health,

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
    }
}

/// Handle `config` flags. Returns true if the command was a config command.
pub fn handle_config_command(cli: &Cli) -> bool {
    let Some(Commands::Config { show, reset, path }) = &cli.command else {
        return false;
    };

    if *path {
        handle_config_path();
    } else if *show {
        let mut config = Config::from_env();
        cli.apply_overrides(&mut config);
        handle_config_show(&config);
    } else if *reset {
        handle_config_reset();
    } else {
        println!("Usage: sentiment-analyzer config [--show|--reset|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --path    Show config file path");
    }
    true
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show(config: &Config) {
    println!("# Effective configuration (env > file > defaults)");
    println!();
    println!("endpoint = {:?}", config.endpoint);
    match &config.health_url {
        Some(url) => println!("health_url = {:?}", url),
        None => println!("# health_url derived from endpoint"),
    }
    match &config.api_key {
        Some(key) => println!("# api_key set (fingerprint {})", key_fingerprint(key)),
        None => println!("# api_key not set (X-API-KEY header will be omitted)"),
    }
    match config.timeout_secs {
        Some(secs) => println!("timeout_secs = {}", secs),
        None => println!("# timeout_secs not set (transport default)"),
    }
    println!("theme = {:?}", config.theme);
    println!();
    println!("[analysis]");
    println!(
        "response_policy = {:?}",
        config.analysis.response_policy.as_str()
    );
    println!("strict_schema = {}", config.analysis.strict_schema);
    println!();
    println!("[logging]");
    println!("level = {:?}", config.logging.level);
    println!("file_enabled = {}", config.logging.file_enabled);
    println!("file_dir = {:?}", config.logging.file_dir.display().to_string());
    println!("file_rotation = {:?}", config.logging.file_rotation.as_str());
    println!("file_prefix = {:?}", config.logging.file_prefix);
    println!();
    println!("[batch]");
    println!("input = {:?}", config.batch.input.display().to_string());
    println!("output = {:?}", config.batch.output.display().to_string());
    println!("concurrency = {}", config.batch.concurrency);
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error: Could not create config directory: {}", e);
            std::process::exit(1);
        }
    }

    match std::fs::write(&path, Config::default().to_toml()) {
        Ok(()) => println!("Config reset to defaults: {}", path.display()),
        Err(e) => {
            eprintln!("Error: Could not write config: {}", e);
            std::process::exit(1);
        }
    }
}

/// Build the HTTP client from config, logging where requests go
pub fn build_client(config: &Config) -> Result<SentimentClient> {
    let client = SentimentClient::new(ClientSettings::from_config(config))
        .context("Invalid client configuration")?;

    if !client.has_api_key() {
        tracing::warn!(
            "No API key configured (set SENTIMENT_API_KEY); requests are sent without X-API-KEY"
        );
    } else if let Some(key) = &config.api_key {
        tracing::debug!("Using API key {}", key_fingerprint(key));
    }
    tracing::debug!("Prediction endpoint: {}", client.endpoint());

    Ok(client)
}

/// `analyze <TEXT>`: returns the process exit code
pub async fn run_analyze(config: &Config, text: &str) -> Result<i32> {
    let client = build_client(config)?;
    let result = analyze_once(&client, text, config.analysis.strict_schema).await;

    println!("{}", result.to_pretty_json());
    Ok(if result.is_failure() { 1 } else { 0 })
}

/// `batch`: analyze a JSONL file
pub async fn run_batch(
    config: &Config,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    concurrency: Option<usize>,
) -> Result<()> {
    let client = build_client(config)?;
    let input = input.unwrap_or_else(|| config.batch.input.clone());
    let output = output.unwrap_or_else(|| config.batch.output.clone());
    let concurrency = concurrency.unwrap_or(config.batch.concurrency);

    let summary = batch::run(
        &client,
        config.analysis.strict_schema,
        &input,
        &output,
        concurrency,
    )
    .await?;

    println!(
        "Batch analysis complete: {} analyzed ({} ok, {} failed, {} skipped). Results saved to {}",
        summary.analyzed,
        summary.succeeded,
        summary.failed,
        summary.skipped,
        output.display()
    );
    Ok(())
}

/// `health`: print the service health document
pub async fn run_health(config: &Config) -> Result<()> {
    let client = build_client(config)?;
    let body = client
        .health()
        .await
        .with_context(|| format!("Health check failed for {}", client.health_url()))?;

    println!(
        "{}",
        serde_json::to_string_pretty(&body).context("Failed to format health response")?
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["sentiment-analyzer"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!handle_config_command(&cli));
    }

    #[test]
    fn test_parse_analyze_allows_empty_text() {
        let cli = Cli::try_parse_from(["sentiment-analyzer", "analyze", ""]).unwrap();
        match cli.command {
            Some(Commands::Analyze { text }) => assert_eq!(text, ""),
            other => panic!("Expected Analyze, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_batch_flags() {
        let cli = Cli::try_parse_from([
            "sentiment-analyzer",
            "batch",
            "-i",
            "in.jsonl",
            "--output",
            "out.json",
            "--concurrency",
            "4",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Batch {
                input,
                output,
                concurrency,
            }) => {
                assert_eq!(input, Some(PathBuf::from("in.jsonl")));
                assert_eq!(output, Some(PathBuf::from("out.json")));
                assert_eq!(concurrency, Some(4));
            }
            other => panic!("Expected Batch, got {:?}", other),
        }
    }

    #[test]
    fn test_endpoint_override_is_global() {
        let cli = Cli::try_parse_from([
            "sentiment-analyzer",
            "health",
            "--endpoint",
            "http://10.0.0.5:5000/predict",
        ])
        .unwrap();

        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.endpoint, "http://10.0.0.5:5000/predict");
    }
}
