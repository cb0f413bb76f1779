//! Parsing of the synthesis response

use super::types::{HealthVerdict, QuickFix, Recommendation};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::warn;

static FENCED_JSON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:json)?\s*\n?([\s\S]*?)\n?```").expect("valid regex"));

#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("No JSON object found in synthesis response")]
    NoJson,
    #[error("Invalid synthesis JSON: {0}")]
    InvalidJson(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisOutcome {
    pub overall: HealthVerdict,
    pub recommendations: Vec<Recommendation>,
    pub quick_fixes: Vec<QuickFix>,
}

/// Items are kept as raw values so one malformed entry cannot discard the
/// verdict or its siblings
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOutcome {
    overall: HealthVerdict,
    #[serde(default)]
    recommendations: Vec<serde_json::Value>,
    #[serde(default, alias = "quick_fixes")]
    quick_fixes: Vec<serde_json::Value>,
}

fn convert_items<T: DeserializeOwned>(kind: &str, items: Vec<serde_json::Value>) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Dropping invalid {} from synthesis: {}", kind, e);
                None
            }
        })
        .collect()
}

/// Pulls a JSON object out of a response that may wrap it in prose or a
/// markdown fence
pub fn extract_json(response: &str) -> Result<&str, SynthesisError> {
    let trimmed = response.trim();

    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        return Ok(trimmed);
    }

    if let Some(inner) = FENCED_JSON
        .captures(trimmed)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| s.starts_with('{') && s.ends_with('}'))
    {
        return Ok(inner);
    }

    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => Ok(&trimmed[start..=end]),
        _ => Err(SynthesisError::NoJson),
    }
}

pub fn parse_synthesis(response: &str) -> Result<SynthesisOutcome, SynthesisError> {
    let json = extract_json(response)?;
    let raw: RawOutcome = serde_json::from_str(json).map_err(|e| {
        SynthesisError::InvalidJson(format!(
            "{}: {}",
            e,
            json.chars().take(100).collect::<String>()
        ))
    })?;

    Ok(SynthesisOutcome {
        overall: raw.overall,
        recommendations: convert_items("recommendation", raw.recommendations),
        quick_fixes: convert_items("quick fix", raw.quick_fixes),
    })
}
