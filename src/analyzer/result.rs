//! Analysis outcome types
//!
//! `AnalysisResult` is what the result block displays. A success holds the
//! decoded response body exactly as the server sent it; a failure is always
//! the same fixed message, whatever went wrong underneath.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The only error text ever shown to the user
pub const FAILURE_MESSAGE: &str = "Failed to analyze sentiment";

/// Outcome of a settled analysis request
///
/// Serializes untagged so a success renders as the server's own object and a
/// failure renders as `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisResult {
    /// Decoded response body, stored verbatim
    Success(Value),
    /// Fixed failure shape
    Failure { error: String },
}

impl AnalysisResult {
    pub fn success(body: Value) -> Self {
        AnalysisResult::Success(body)
    }

    /// The single user-visible failure
    pub fn failure() -> Self {
        AnalysisResult::Failure {
            error: FAILURE_MESSAGE.to_string(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, AnalysisResult::Failure { .. })
    }

    /// Label reported by the server, if it sent one
    pub fn sentiment(&self) -> Option<&str> {
        match self {
            AnalysisResult::Success(body) => body.get("sentiment").and_then(Value::as_str),
            AnalysisResult::Failure { .. } => None,
        }
    }

    /// Confidence reported by the server, if it sent a number
    pub fn confidence(&self) -> Option<f64> {
        match self {
            AnalysisResult::Success(body) => body.get("confidence").and_then(Value::as_f64),
            AnalysisResult::Failure { .. } => None,
        }
    }

    /// Pretty-printed JSON with 2-space indentation
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self)
            .unwrap_or_else(|_| format!("{{\n  \"error\": \"{}\"\n}}", FAILURE_MESSAGE))
    }
}

/// Shape a response must have when strict schema checking is enabled
///
/// Extra fields (`model_version`, `status`, ...) are allowed and ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Prediction {
    pub sentiment: String,
    pub confidence: f64,
}

impl Prediction {
    pub fn validate(body: &Value) -> Result<Self, serde_json::Error> {
        Prediction::deserialize(body)
    }
}
