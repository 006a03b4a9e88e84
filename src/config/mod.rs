//! Configuration for the sentiment client
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/sentiment-analyzer/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod analysis;
mod batch;
mod observability;
mod serialization;


// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (maintain public API)
// ─────────────────────────────────────────────────────────────────────────────

pub use analysis::{AnalysisConfig, FileAnalysis, ResponsePolicy};
pub use batch::{BatchConfig, FileBatch};
pub use observability::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default prediction endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/predict";

/// Default TUI theme name
pub const DEFAULT_THEME: &str = "Dark";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL the analysis request is POSTed to
    pub endpoint: String,

    /// Health check URL (derived from the endpoint when unset)
    pub health_url: Option<String>,

    /// Credential sent as `X-API-KEY`. Never compiled in, never logged.
    pub api_key: Option<String>,

    /// Request timeout in seconds (None = transport default)
    pub timeout_secs: Option<u64>,

    /// Theme name: "Dark", "Light", "Nord"
    pub theme: String,

    /// How settled responses update the result
    pub analysis: AnalysisConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Batch mode defaults
    pub batch: BatchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            health_url: None,
            api_key: None,
            timeout_secs: None,
            theme: DEFAULT_THEME.to_string(),
            analysis: AnalysisConfig::default(),
            logging: LoggingConfig::default(),
            batch: BatchConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub endpoint: Option<String>,
    pub health_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
    pub theme: Option<String>,

    /// Optional [analysis] section
    pub analysis: Option<FileAnalysis>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,

    /// Optional [batch] section
    pub batch: Option<FileBatch>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/sentiment-analyzer/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| {
            p.join(".config")
                .join("sentiment-analyzer")
                .join("config.toml")
        })
    }

    /// Create config file with defaults if it doesn't exist
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists
    ///
    /// # Panics
    /// Exits the process if the config file exists but cannot be parsed. A
    /// broken config should fail loudly, not silently fall back to defaults.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                    eprintln!("║  CONFIG ERROR - Failed to parse configuration file          ║");
                    eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  To reset, run `sentiment-analyzer config --reset`.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file              ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env vars > file > defaults
    pub fn from_env() -> Self {
        Self::from_sources(Self::load_file_config(), |name| std::env::var(name).ok())
    }

    /// Merge a parsed config file with an environment lookup
    pub(crate) fn from_sources<F>(file: FileConfig, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty env values count as unset
        let env = |name: &str| env(name).filter(|v| !v.trim().is_empty());

        let endpoint = env("SENTIMENT_ENDPOINT")
            .or(file.endpoint)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let health_url = env("SENTIMENT_HEALTH_URL").or(file.health_url);

        let api_key = env("SENTIMENT_API_KEY").or(file.api_key);

        let timeout_secs = env("SENTIMENT_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .or(file.timeout_secs)
            .filter(|secs| *secs > 0);

        let theme = env("SENTIMENT_THEME")
            .or(file.theme)
            .unwrap_or_else(|| DEFAULT_THEME.to_string());

        Self {
            endpoint,
            health_url,
            api_key,
            timeout_secs,
            theme,
            analysis: AnalysisConfig::from_file(file.analysis),
            logging: LoggingConfig::from_file(file.logging),
            batch: BatchConfig::from_file(file.batch),
        }
    }
}
