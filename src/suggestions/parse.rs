//! Provider response validation

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::ProviderError;
use crate::types::Suggestion;

// Greedy: from the first '[' to the last ']'
static JSON_ARRAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\[.*\]").expect("valid regex"));

/// Parse a response that must be a JSON array of `{original, inclusive}`.
///
/// Elements without non-empty `original` and `inclusive` strings are dropped.
pub fn parse_suggestions(provider: &str, content: &str) -> Result<Vec<Suggestion>, ProviderError> {
    let value: Value = serde_json::from_str(content.trim()).map_err(|e| {
        ProviderError::InvalidResponse(format!(
            "No se pudo parsear la respuesta de {} como JSON: {}",
            provider, e
        ))
    })?;
    suggestions_from_value(provider, value)
}

/// Like [`parse_suggestions`], but tolerates prose around the array.
///
/// Chat models often wrap the JSON in explanations or code fences.
pub fn parse_suggestions_lenient(
    provider: &str,
    content: &str,
) -> Result<Vec<Suggestion>, ProviderError> {
    let value = match serde_json::from_str::<Value>(content.trim()) {
        Ok(value) => value,
        Err(_) => {
            let array = JSON_ARRAY.find(content).ok_or_else(|| {
                ProviderError::InvalidResponse(format!(
                    "No se pudo parsear la respuesta de {} como JSON",
                    provider
                ))
            })?;
            serde_json::from_str(array.as_str()).map_err(|e| {
                ProviderError::InvalidResponse(format!(
                    "No se pudo parsear la respuesta de {} como JSON: {}",
                    provider, e
                ))
            })?
        }
    };
    suggestions_from_value(provider, value)
}

fn suggestions_from_value(provider: &str, value: Value) -> Result<Vec<Suggestion>, ProviderError> {
    let Value::Array(items) = value else {
        return Err(ProviderError::InvalidResponse(format!(
            "La API de {} no devolvió un array válido.",
            provider
        )));
    };

    Ok(items.iter().filter_map(suggestion_from_item).collect())
}

fn suggestion_from_item(item: &Value) -> Option<Suggestion> {
    let original = item.get("original")?.as_str()?;
    let inclusive = item.get("inclusive")?.as_str()?;
    if original.trim().is_empty() || inclusive.trim().is_empty() {
        return None;
    }
    Some(Suggestion::new(original, inclusive))
}
