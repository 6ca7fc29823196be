//! Extraction and validation of model replies.
//!
//! Replies arrive as free text that usually wraps a JSON object in prose.
//! Extraction takes the span from the first `{` to the last `}` (the whole
//! reply when no span exists), syntax errors are `MalformedReply`, and a
//! parseable object that misses a field or has a wrong type is
//! `InvalidSchema` naming the offending field.

use crate::error::AnalysisError;
use prepdeck_core::{AnalysisResult, GraphPoint};
use serde_json::Value;

/// Parses a raw model reply into an `AnalysisResult`.
pub fn parse_reply(text: &str) -> Result<AnalysisResult, AnalysisError> {
    let span = extract_json_span(text);

    let value: Value = serde_json::from_str(span)
        .map_err(|e| AnalysisError::MalformedReply(format!("reply is not valid JSON: {}", e)))?;

    validate(&value)
}

/// Returns the first-`{`-to-last-`}` span, or the whole reply when there is
/// no such span.
fn extract_json_span(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}

fn validate(value: &Value) -> Result<AnalysisResult, AnalysisError> {
    let object = value
        .as_object()
        .ok_or_else(|| AnalysisError::InvalidSchema("reply is not a JSON object".to_string()))?;

    let complexity = object
        .get("complexity")
        .and_then(Value::as_str)
        .ok_or_else(|| AnalysisError::InvalidSchema("complexity must be a string".to_string()))?
        .to_string();

    let graph_values = object
        .get("graphData")
        .and_then(Value::as_array)
        .ok_or_else(|| AnalysisError::InvalidSchema("graphData must be an array".to_string()))?;

    let mut graph_data = Vec::with_capacity(graph_values.len());
    for (i, point) in graph_values.iter().enumerate() {
        let n = point.get("n").and_then(Value::as_i64).ok_or_else(|| {
            AnalysisError::InvalidSchema(format!("graphData[{}].n must be an integer", i))
        })?;
        let ops = point.get("ops").and_then(Value::as_f64).ok_or_else(|| {
            AnalysisError::InvalidSchema(format!("graphData[{}].ops must be a number", i))
        })?;
        graph_data.push(GraphPoint { n, ops });
    }

    let explanation = object
        .get("explanation")
        .and_then(Value::as_str)
        .ok_or_else(|| AnalysisError::InvalidSchema("explanation must be a string".to_string()))?
        .to_string();

    Ok(AnalysisResult {
        complexity,
        graph_data,
        explanation,
    })
}
