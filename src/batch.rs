// Batch module - analyze a JSONL file of texts through the remote endpoint
//
// Input: one JSON object per line with a string "text" field. Blank lines are
// ignored; lines that are not valid JSON or have no string "text" are logged
// and skipped.
//
// Output: a pretty-printed JSON array, one record per analyzed text, in input
// order:
//   {"text": "...", <response fields>, "status": "success"}
//   {"text": "...", "error": "Failed to analyze sentiment", "status": "error"}

use crate::analyzer::{analyze_once, AnalysisResult};
use crate::client::SentimentClient;
use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use serde_json::{Map, Value};
use std::path::Path;

/// Counts reported after a batch run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub analyzed: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Extract texts from JSONL content; returns the texts and the skipped-line count
pub fn parse_input(contents: &str) -> (Vec<String>, usize) {
    let mut texts = Vec::new();
    let mut skipped = 0;

    for (index, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<Value>(line) {
            Ok(Value::Object(obj)) => match obj.get("text") {
                Some(Value::String(text)) => texts.push(text.clone()),
                _ => {
                    tracing::warn!("Skipping line {}: no string \"text\" field", index + 1);
                    skipped += 1;
                }
            },
            Ok(_) => {
                tracing::warn!("Skipping line {}: not a JSON object", index + 1);
                skipped += 1;
            }
            Err(e) => {
                tracing::warn!("Skipping line {}: invalid JSON ({})", index + 1, e);
                skipped += 1;
            }
        }
    }

    (texts, skipped)
}

/// Build the output record for one analyzed text
pub fn record(text: &str, result: &AnalysisResult) -> Value {
    let mut record = Map::new();
    record.insert("text".to_string(), Value::String(text.to_string()));

    match result {
        AnalysisResult::Success(Value::Object(fields)) => {
            for (key, value) in fields {
                if key != "text" {
                    record.insert(key.clone(), value.clone());
                }
            }
            record
                .entry("status")
                .or_insert_with(|| Value::String("success".to_string()));
        }
        AnalysisResult::Success(other) => {
            record.insert("result".to_string(), other.clone());
            record.insert("status".to_string(), Value::String("success".to_string()));
        }
        AnalysisResult::Failure { error } => {
            record.insert("error".to_string(), Value::String(error.clone()));
            record.insert("status".to_string(), Value::String("error".to_string()));
        }
    }

    Value::Object(record)
}

/// Analyze every text in `input` and write the results to `output`
pub async fn run(
    client: &SentimentClient,
    strict_schema: bool,
    input: &Path,
    output: &Path,
    concurrency: usize,
) -> Result<BatchSummary> {
    let contents = std::fs::read_to_string(input).with_context(|| {
        format!(
            "Input file {} not found or unreadable. Create it with one {{\"text\": ...}} object per line.",
            input.display()
        )
    })?;

    let (texts, skipped) = parse_input(&contents);
    tracing::info!(
        "Batch: {} text(s) to analyze from {} ({} skipped)",
        texts.len(),
        input.display(),
        skipped
    );

    // `buffered` keeps input order while running up to `concurrency` at once
    let results: Vec<(String, AnalysisResult)> = stream::iter(texts)
        .map(|text| async move {
            let result = analyze_once(client, &text, strict_schema).await;
            (text, result)
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let mut summary = BatchSummary {
        skipped,
        ..Default::default()
    };
    let records: Vec<Value> = results
        .iter()
        .map(|(text, result)| {
            summary.analyzed += 1;
            if result.is_failure() {
                summary.failed += 1;
            } else {
                summary.succeeded += 1;
            }
            record(text, result)
        })
        .collect();

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(&records).context("Failed to serialize results")?;
    std::fs::write(output, json)
        .with_context(|| format!("Failed to write results to {}", output.display()))?;

    tracing::info!(
        "Batch complete: {} succeeded, {} failed -> {}",
        summary.succeeded,
        summary.failed,
        output.display()
    );

    Ok(summary)
}
