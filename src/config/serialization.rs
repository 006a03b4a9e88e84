//! Config serialization to TOML
//!
//! Single source of truth for the config file template.

use super::Config;

impl Config {
    /// Serialize to a commented TOML template
    ///
    /// The API key value is never written; it is left as a commented example
    /// pointing at the environment variable.
    pub fn to_toml(&self) -> String {
        let health_url = match &self.health_url {
            Some(url) => format!("health_url = \"{}\"", url),
            None => "# health_url = \"http://localhost:5000/health\"  # derived from endpoint when unset"
                .to_string(),
        };

        let timeout = match self.timeout_secs {
            Some(secs) => format!("timeout_secs = {}", secs),
            None => "# timeout_secs = 30  # unset = transport default".to_string(),
        };

        format!(
            r#"# sentiment-analyzer configuration

# Prediction endpoint (POST {{"text": "..."}})
endpoint = "{endpoint}"
{health_url}

# Credential sent as X-API-KEY. Prefer the SENTIMENT_API_KEY environment
# variable over storing the key in this file.
# api_key = "..."

{timeout}

# Theme: Dark, Light, Nord
theme = "{theme}"

# How settled responses update the result
[analysis]
response_policy = "{policy}"  # last-settled, latest-only
strict_schema = {strict}       # require {{sentiment: string, confidence: number}}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# File logging (in addition to TUI buffer or stderr)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"

# Batch mode defaults (sentiment-analyzer batch)
[batch]
input = "{batch_input}"
output = "{batch_output}"
concurrency = {batch_concurrency}
"#,
            endpoint = self.endpoint,
            health_url = health_url,
            timeout = timeout,
            theme = self.theme,
            policy = self.analysis.response_policy.as_str(),
            strict = self.analysis.strict_schema,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
            batch_input = self.batch.input.display(),
            batch_output = self.batch.output.display(),
            batch_concurrency = self.batch.concurrency,
        )
    }
}
