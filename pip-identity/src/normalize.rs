//! Identity document normalization.
//!
//! Normalization fills in declared defaults for anything the caller left
//! out, producing a fully-populated document with predictable shape. It
//! is deliberately tolerant: enforcement of structure is the validator's
//! job, so malformed values pass through unchanged rather than being
//! corrected or dropped.

use serde_json::{Map, Value};

use crate::schema::{self, SectionSpec};

/// Error types for normalization.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    /// Input is not a JSON object
    #[error("Identity must be a JSON object")]
    InvalidInput,
}

/// Normalize an identity document, applying defaults for missing fields.
///
/// Returns a fresh document where every canonical preference sub-section
/// is present and every field with a declared default has a value.
/// Caller-supplied values always win over defaults, caller-only fields
/// survive unchanged, and `behaviors` is passed through as-is (or `{}`
/// when absent). The operation is idempotent.
pub fn normalize(document: &Value) -> Result<Value, NormalizeError> {
    let identity = document.as_object().ok_or(NormalizeError::InvalidInput)?;

    // Top-level fields outside preferences/behaviors pass through via the clone
    let mut normalized = identity.clone();

    match identity.get("preferences") {
        // Malformed preferences pass through unchanged; the validator owns enforcement
        Some(value) if !value.is_object() => {}
        supplied => {
            let empty = Map::new();
            let supplied = supplied.and_then(Value::as_object).unwrap_or(&empty);
            normalized.insert(
                "preferences".to_string(),
                Value::Object(build_preferences(supplied)),
            );
        }
    }

    // No defaults are declared for behaviors
    if !identity.contains_key("behaviors") {
        normalized.insert("behaviors".to_string(), Value::Object(Map::new()));
    }

    Ok(Value::Object(normalized))
}

/// Build the normalized `preferences` object.
///
/// Canonical sub-sections come first in declared order; caller-defined
/// sub-sections follow unchanged.
fn build_preferences(supplied: &Map<String, Value>) -> Map<String, Value> {
    let mut preferences = Map::new();

    for section in schema::PREFERENCE_SECTIONS {
        match supplied.get(section.name) {
            Some(value) if !value.is_object() => {
                preferences.insert(section.name.to_string(), value.clone());
            }
            other => {
                let empty = Map::new();
                let fields = other.and_then(Value::as_object).unwrap_or(&empty);
                preferences.insert(
                    section.name.to_string(),
                    Value::Object(overlay_section(section, fields)),
                );
            }
        }
    }

    for (name, value) in supplied {
        if !schema::is_canonical_section(name) {
            preferences.insert(name.clone(), value.clone());
        }
    }

    preferences
}

/// Overlay one sub-section: declared fields in order, caller value if
/// present else default, then caller-only fields unchanged.
fn overlay_section(section: &SectionSpec, supplied: &Map<String, Value>) -> Map<String, Value> {
    let mut fields = Map::new();

    for spec in section.fields {
        if let Some(value) = supplied.get(spec.name) {
            fields.insert(spec.name.to_string(), value.clone());
        } else if let Some(default) = spec.default.to_value() {
            fields.insert(spec.name.to_string(), default);
        }
    }

    for (name, value) in supplied {
        if !fields.contains_key(name) {
            fields.insert(name.clone(), value.clone());
        }
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_object_input() {
        assert!(matches!(
            normalize(&json!(null)),
            Err(NormalizeError::InvalidInput)
        ));
        assert!(matches!(
            normalize(&json!([1, 2])),
            Err(NormalizeError::InvalidInput)
        ));
    }

    #[test]
    fn test_empty_document_gets_full_defaults() {
        let normalized = normalize(&json!({})).unwrap();

        assert_eq!(normalized["preferences"]["ui"]["theme"], "auto");
        assert_eq!(normalized["preferences"]["ui"]["density"], "comfortable");
        assert_eq!(normalized["preferences"]["ui"]["fontSize"], "medium");
        assert_eq!(normalized["preferences"]["ui"]["colorBlindMode"], false);
        assert_eq!(normalized["preferences"]["interaction"]["tone"], "friendly");
        assert_eq!(
            normalized["preferences"]["interaction"]["confirmationStyle"],
            "destructive-only"
        );
        assert_eq!(
            normalized["preferences"]["automation"]["level"],
            "suggestions"
        );
        assert_eq!(
            normalized["preferences"]["automation"]["maxAutomationScope"],
            "session"
        );
        assert_eq!(normalized["preferences"]["notifications"]["enabled"], true);
        assert_eq!(
            normalized["preferences"]["notifications"]["channels"],
            json!(["in-app"])
        );
        assert_eq!(normalized["preferences"]["content"]["language"], "en");
        assert_eq!(normalized["preferences"]["content"]["currency"], "USD");
        assert_eq!(
            normalized["preferences"]["privacy"]["dataSharing"],
            "anonymized"
        );
        assert_eq!(
            normalized["preferences"]["accessibility"]["focusIndicators"],
            "standard"
        );
        assert_eq!(normalized["preferences"]["risk"]["tolerance"], "moderate");
        assert_eq!(
            normalized["preferences"]["risk"]["requireConfirmation"],
            true
        );
        assert_eq!(normalized["behaviors"], json!({}));
    }

    #[test]
    fn test_no_default_means_absent() {
        let normalized = normalize(&json!({})).unwrap();
        assert!(normalized["preferences"]["risk"]
            .as_object()
            .unwrap()
            .get("maxTransactionAmount")
            .is_none());
    }

    #[test]
    fn test_caller_value_wins() {
        let normalized = normalize(&json!({
            "preferences": { "ui": { "theme": "dark" } }
        }))
        .unwrap();

        assert_eq!(normalized["preferences"]["ui"]["theme"], "dark");
        // Siblings still at defaults
        assert_eq!(normalized["preferences"]["ui"]["density"], "comfortable");
        assert_eq!(normalized["preferences"]["ui"]["reducedMotion"], false);
    }

    #[test]
    fn test_unknown_field_passthrough() {
        let normalized = normalize(&json!({
            "preferences": { "ui": { "customFlag": true } }
        }))
        .unwrap();

        assert_eq!(normalized["preferences"]["ui"]["customFlag"], true);
        assert_eq!(normalized["preferences"]["ui"]["theme"], "auto");
    }

    #[test]
    fn test_custom_section_passthrough() {
        let normalized = normalize(&json!({
            "preferences": { "workspace": { "layout": "grid" } }
        }))
        .unwrap();

        assert_eq!(
            normalized["preferences"]["workspace"],
            json!({ "layout": "grid" })
        );
        // Canonical sections still materialized
        assert_eq!(normalized["preferences"]["ui"]["theme"], "auto");
    }

    #[test]
    fn test_top_level_passthrough() {
        let normalized = normalize(&json!({
            "version": "0.1.0",
            "metadata": { "created": "2024-01-01T00:00:00Z", "updated": "2024-01-01T00:00:00Z" },
            "extension": { "custom": 1 }
        }))
        .unwrap();

        assert_eq!(normalized["version"], "0.1.0");
        assert_eq!(normalized["metadata"]["created"], "2024-01-01T00:00:00Z");
        assert_eq!(normalized["extension"], json!({ "custom": 1 }));
    }

    #[test]
    fn test_behaviors_passthrough() {
        let normalized = normalize(&json!({
            "behaviors": { "workflow": "linear", "custom": "kept" }
        }))
        .unwrap();

        assert_eq!(
            normalized["behaviors"],
            json!({ "workflow": "linear", "custom": "kept" })
        );
    }

    #[test]
    fn test_malformed_sections_pass_through() {
        let normalized = normalize(&json!({
            "preferences": { "ui": 5, "risk": "high" }
        }))
        .unwrap();

        assert_eq!(normalized["preferences"]["ui"], 5);
        assert_eq!(normalized["preferences"]["risk"], "high");
        // Well-formed siblings still get defaults
        assert_eq!(normalized["preferences"]["content"]["language"], "en");
    }

    #[test]
    fn test_malformed_preferences_and_behaviors_pass_through() {
        let normalized = normalize(&json!({
            "preferences": "dark",
            "behaviors": [1, 2]
        }))
        .unwrap();

        assert_eq!(normalized["preferences"], "dark");
        assert_eq!(normalized["behaviors"], json!([1, 2]));
    }

    #[test]
    fn test_idempotence() {
        let documents = [
            json!({}),
            json!({ "preferences": { "ui": { "theme": "dark", "customFlag": true } } }),
            json!({
                "version": "0.1.0",
                "metadata": { "created": "2024-01-01T00:00:00Z", "updated": "2024-01-01T00:00:00Z" },
                "preferences": {
                    "notifications": { "channels": ["email", "push"] },
                    "workspace": { "layout": "grid" }
                },
                "behaviors": { "workflow": "exploratory" }
            }),
            json!({ "preferences": { "ui": 5 } }),
        ];

        for document in documents {
            let once = normalize(&document).unwrap();
            let twice = normalize(&once).unwrap();
            assert_eq!(once, twice, "normalize must be idempotent for {document}");
        }
    }

    #[test]
    fn test_input_is_not_mutated() {
        let document = json!({ "preferences": { "ui": { "theme": "dark" } } });
        let before = document.clone();
        let _ = normalize(&document).unwrap();
        assert_eq!(document, before);
    }

    #[test]
    fn test_normalized_document_is_valid() {
        let normalized = normalize(&json!({
            "version": "0.1.0",
            "metadata": { "created": "2024-01-01T00:00:00Z", "updated": "2024-01-01T00:00:00Z" }
        }))
        .unwrap();

        let result = crate::validate(&normalized);
        assert!(result.valid, "unexpected errors: {:?}", result.errors);
    }
}
