//! Reading item responses from files for the headless subcommands.
//!
//! Accepted shapes: a JSON array of 90 integers, a JSON object with a
//! `responses` array, or plain text with 90 values separated by commas or
//! whitespace.

use std::path::Path;

use serde::Deserialize;

use scl90_core::models::likert::Responses;
use scl90_instruments::instruments::scl90r::Scl90R;
use scl90_instruments::Instrument;

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonResponses {
    Plain(Vec<i64>),
    Wrapped { responses: Vec<i64> },
}

pub fn read_responses(path: &Path) -> eyre::Result<Responses> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read {}: {e}", path.display()))?;
    let responses = parse_responses(&text)?;
    tracing::debug!(path = %path.display(), total = responses.total(), "responses loaded");
    Ok(responses)
}

pub fn parse_responses(text: &str) -> eyre::Result<Responses> {
    let trimmed = text.trim();
    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        let parsed: JsonResponses = serde_json::from_str(trimmed)
            .map_err(|e| eyre::eyre!("invalid JSON responses: {e}"))?;
        let values = match parsed {
            JsonResponses::Plain(v) | JsonResponses::Wrapped { responses: v } => v,
        };
        return from_numbers(&values);
    }

    let fields: Vec<&str> = trimmed
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|f| !f.is_empty())
        .collect();
    let mut values = Vec::with_capacity(fields.len());
    for (i, field) in fields.iter().enumerate() {
        let value: i64 = field
            .parse()
            .map_err(|_| eyre::eyre!("item {}: '{field}' is not a number", i + 1))?;
        values.push(value);
    }
    from_numbers(&values)
}

/// Validate every value and report all offending items at once.
fn from_numbers(values: &[i64]) -> eyre::Result<Responses> {
    let expected = Scl90R.item_count();
    if values.len() != expected {
        return Err(eyre::eyre!(
            "expected {expected} responses, found {}",
            values.len()
        ));
    }

    // Anything outside u8 is clamped so the range check still flags it.
    let bytes: Vec<u8> = values
        .iter()
        .map(|&v| u8::try_from(v).unwrap_or(u8::MAX))
        .collect();
    let errors = Scl90R.validate_responses(&bytes);
    if !errors.is_empty() {
        let items: Vec<String> = errors
            .iter()
            .map(|e| format!("item {}: {}", e.item, values[e.item - 1]))
            .collect();
        return Err(eyre::eyre!(
            "responses must be between 0 and 4 ({})",
            items.join(", ")
        ));
    }
    Ok(Responses::from_values(&bytes)?)
}
