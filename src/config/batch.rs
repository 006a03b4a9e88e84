//! Batch mode defaults

use serde::Deserialize;
use std::path::PathBuf;

/// Batch analysis configuration
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// JSONL file with one `{"text": ...}` object per line
    pub input: PathBuf,
    /// JSON array of results
    pub output: PathBuf,
    /// Requests kept in flight at once
    pub concurrency: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/input.jsonl"),
            output: PathBuf::from("output/results.json"),
            concurrency: 1,
        }
    }
}

/// Batch settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileBatch {
    pub input: Option<String>,
    pub output: Option<String>,
    pub concurrency: Option<usize>,
}

impl BatchConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileBatch>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            input: file.input.map(PathBuf::from).unwrap_or(defaults.input),
            output: file.output.map(PathBuf::from).unwrap_or(defaults.output),
            concurrency: file
                .concurrency
                .filter(|n| *n > 0)
                .unwrap_or(defaults.concurrency),
        }
    }
}
