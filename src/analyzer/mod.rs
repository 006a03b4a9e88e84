//! Sentiment analyzer state
//!
//! Owns the two pieces of state the UI binds to: the current input text and
//! the last analysis result. Requests are numbered with a generation counter
//! so the configured `ResponsePolicy` can decide whether a late response may
//! still replace the result.

mod dispatch;
mod result;

pub use dispatch::Dispatcher;
pub use result::{AnalysisResult, Prediction};

use crate::client::{ClientError, SentimentClient};
use crate::config::ResponsePolicy;
use crate::util::preview;

/// Snapshot of what a triggered analysis will send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub generation: u64,
    pub text: String,
}

/// What happened to a settled response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settle {
    /// The result was replaced
    Applied,
    /// A newer request was triggered after this one (latest-only policy)
    Discarded,
}

/// Input text plus last result, with request bookkeeping
#[derive(Debug, Default)]
pub struct SentimentAnalyzer {
    input: String,
    result: Option<AnalysisResult>,
    policy: ResponsePolicy,
    /// Generation of the most recently triggered request (0 = none yet)
    latest_generation: u64,
    in_flight: usize,
}

impl SentimentAnalyzer {
    pub fn new(policy: ResponsePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// None until the first request settles
    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn policy(&self) -> ResponsePolicy {
        self.policy
    }

    /// Requests triggered but not yet settled
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Replace the input text with `text`, exactly as given
    pub fn on_text_change(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Start an analysis of the current input
    ///
    /// Nothing blocks this: empty input is analyzed too, and earlier requests
    /// stay in flight.
    pub fn begin_analysis(&mut self) -> AnalysisRequest {
        self.latest_generation += 1;
        self.in_flight += 1;
        AnalysisRequest {
            generation: self.latest_generation,
            text: self.input.clone(),
        }
    }

    /// Record that the request issued as `generation` settled with `result`
    ///
    /// A success whose body is JSON `null` clears the result.
    pub fn settle(&mut self, generation: u64, result: AnalysisResult) -> Settle {
        self.in_flight = self.in_flight.saturating_sub(1);

        let applies = match self.policy {
            ResponsePolicy::LastSettled => true,
            ResponsePolicy::LatestOnly => generation == self.latest_generation,
        };

        if applies {
            // A `null` body means "no result", not a result to display
            self.result = match result {
                AnalysisResult::Success(serde_json::Value::Null) => None,
                other => Some(other),
            };
            Settle::Applied
        } else {
            tracing::debug!(
                "Discarded response for request #{} (latest is #{})",
                generation,
                self.latest_generation
            );
            Settle::Discarded
        }
    }
}

/// Run one analysis and fold every failure into the fixed failure shape
///
/// The underlying cause is logged at error level; it never reaches the result.
pub async fn analyze_once(
    client: &SentimentClient,
    text: &str,
    strict_schema: bool,
) -> AnalysisResult {
    tracing::debug!("Analyzing: {:?}", preview(text, 50));

    let outcome = client.predict(text).await.and_then(|body| {
        if strict_schema {
            let prediction = Prediction::validate(&body).map_err(ClientError::Schema)?;
            tracing::trace!(
                "Response matches schema: {} ({})",
                prediction.sentiment,
                prediction.confidence
            );
        }
        Ok(body)
    });

    match outcome {
        Ok(body) => {
            let result = AnalysisResult::success(body);
            tracing::info!(
                "Prediction made for: {:?} -> {} ({})",
                preview(text, 50),
                result.sentiment().unwrap_or("?"),
                result
                    .confidence()
                    .map(|c| format!("{:.2}", c))
                    .unwrap_or_else(|| "-".to_string())
            );
            result
        }
        Err(e) => {
            tracing::error!("Error analyzing sentiment: {}", e);
            AnalysisResult::failure()
        }
    }
}
