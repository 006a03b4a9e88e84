//! Analysis behavior: how settled responses reach the result block

use serde::Deserialize;

/// Which settled responses may update the displayed result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponsePolicy {
    /// Every settlement overwrites the result, in arrival order (default)
    #[default]
    LastSettled,
    /// Only the most recently triggered request may update the result
    LatestOnly,
}

impl ResponsePolicy {
    /// Parse policy string from config
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().replace('_', "-").as_str() {
            "latest-only" | "latest" => Self::LatestOnly,
            _ => Self::LastSettled, // Default for unknown values
        }
    }

    /// Convert to string for TOML serialization
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LastSettled => "last-settled",
            Self::LatestOnly => "latest-only",
        }
    }
}

/// Analysis configuration
#[derive(Debug, Clone, Default)]
pub struct AnalysisConfig {
    pub response_policy: ResponsePolicy,
    /// Require `{sentiment: string, confidence: number}`; mismatches become failures
    pub strict_schema: bool,
}

/// Analysis settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileAnalysis {
    pub response_policy: Option<String>,
    pub strict_schema: Option<bool>,
}

impl AnalysisConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileAnalysis>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            response_policy: file
                .response_policy
                .map(|s| ResponsePolicy::from_str(&s))
                .unwrap_or(defaults.response_policy),
            strict_schema: file.strict_schema.unwrap_or(defaults.strict_schema),
        }
    }
}
