//! Identity document validation.
//!
//! Validation never fails with an error: schema violations are returned
//! as data in a [`ValidationResult`] and the caller decides whether they
//! are fatal. All applicable checks run; invalidity in one field does
//! not suppress checks on siblings, so the error list is complete and
//! its order is stable for identical input.

use chrono::{DateTime, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::OnceLock;

use crate::schema::{self, FieldRule, FieldSpec};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Outcome of validating an identity document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ValidationResult {
    /// Whether the document passed every check
    pub valid: bool,
    /// Human-readable error descriptions, empty iff valid
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

static SEMVER_RE: OnceLock<Regex> = OnceLock::new();
static LANGUAGE_RE: OnceLock<Regex> = OnceLock::new();
static CURRENCY_RE: OnceLock<Regex> = OnceLock::new();

fn semver_re() -> &'static Regex {
    SEMVER_RE.get_or_init(|| Regex::new(r"^\d+\.\d+\.\d+$").expect("hard-coded pattern compiles"))
}

fn language_re() -> &'static Regex {
    LANGUAGE_RE
        .get_or_init(|| Regex::new(r"^[a-z]{2}(-[A-Z]{2})?$").expect("hard-coded pattern compiles"))
}

fn currency_re() -> &'static Regex {
    CURRENCY_RE.get_or_init(|| Regex::new(r"^[A-Z]{3}$").expect("hard-coded pattern compiles"))
}

/// Validate an identity document against the PIP schema.
///
/// Accepts any JSON value; a non-object input is itself a validation
/// failure with a single error, not a panic or an `Err`.
pub fn validate(document: &Value) -> ValidationResult {
    let Some(identity) = document.as_object() else {
        return ValidationResult::from_errors(vec!["Identity must be a JSON object".to_string()]);
    };

    let mut errors = Vec::new();

    check_version(identity, &mut errors);
    check_metadata(identity, &mut errors);

    if let Some(preferences) = identity.get("preferences") {
        check_preferences(preferences, &mut errors);
    }

    if let Some(behaviors) = identity.get("behaviors") {
        check_behaviors(behaviors, &mut errors);
    }

    tracing::debug!(errors = errors.len(), "Validated identity document");

    ValidationResult::from_errors(errors)
}

fn check_version(identity: &Map<String, Value>, errors: &mut Vec<String>) {
    match identity.get("version") {
        None => errors.push("Missing required field: version".to_string()),
        Some(Value::String(version)) => {
            if !semver_re().is_match(version) {
                errors.push(
                    "Field \"version\" must follow semantic versioning (e.g., \"0.1.0\")"
                        .to_string(),
                );
            }
        }
        Some(_) => errors.push("Field \"version\" must be a string".to_string()),
    }
}

fn check_metadata(identity: &Map<String, Value>, errors: &mut Vec<String>) {
    let Some(metadata) = identity.get("metadata") else {
        errors.push("Missing required field: metadata".to_string());
        return;
    };

    let Some(metadata) = metadata.as_object() else {
        errors.push("Metadata must be a JSON object".to_string());
        return;
    };

    // created and updated are checked independently
    for name in ["created", "updated"] {
        match metadata.get(name) {
            None => errors.push(format!("Missing required field: metadata.{name}")),
            Some(value) => {
                if !value.as_str().map_or(false, is_iso8601_datetime) {
                    errors.push(format!(
                        "Field \"metadata.{name}\" must be a valid ISO 8601 date-time"
                    ));
                }
            }
        }
    }
}

/// Check whether a string is an ISO 8601 date-time.
///
/// The string must carry a literal `T` separator; date-only strings are
/// rejected even though they are legal partial ISO 8601 dates. A `Z`
/// designator, a numeric offset, and a naive date-time are all
/// accepted; fractional seconds are optional.
fn is_iso8601_datetime(raw: &str) -> bool {
    if !raw.contains('T') {
        return false;
    }
    DateTime::parse_from_rfc3339(raw).is_ok() || raw.parse::<NaiveDateTime>().is_ok()
}

fn check_preferences(preferences: &Value, errors: &mut Vec<String>) {
    let Some(preferences) = preferences.as_object() else {
        errors.push("Preferences must be a JSON object".to_string());
        return;
    };

    // Unknown sub-section names pass through unchecked
    for section in schema::PREFERENCE_SECTIONS {
        let Some(value) = preferences.get(section.name) else {
            continue;
        };

        let Some(supplied) = value.as_object() else {
            errors.push(format!(
                "Preferences section \"{}\" must be a JSON object",
                section.name
            ));
            continue;
        };

        for spec in section.fields {
            if let Some(value) = supplied.get(spec.name) {
                check_field(section.name, spec, value, errors);
            }
        }
    }
}

fn check_behaviors(behaviors: &Value, errors: &mut Vec<String>) {
    let Some(behaviors) = behaviors.as_object() else {
        errors.push("Behaviors must be a JSON object".to_string());
        return;
    };

    // Absence of a behavior field is never an error
    for spec in schema::BEHAVIOR_FIELDS {
        if let Some(value) = behaviors.get(spec.name) {
            check_field("behaviors", spec, value, errors);
        }
    }
}

fn check_field(section: &str, spec: &FieldSpec, value: &Value, errors: &mut Vec<String>) {
    match spec.rule {
        FieldRule::OneOf(allowed) => {
            if !value.as_str().map_or(false, |s| allowed.contains(&s)) {
                errors.push(format!("Invalid {section}.{} value", spec.name));
            }
        }
        FieldRule::Bool => {
            if !value.is_boolean() {
                errors.push(format!("Invalid {section}.{} value", spec.name));
            }
        }
        FieldRule::Channels(allowed) => match value.as_array() {
            None => errors.push(format!("{section}.{} must be a list", spec.name)),
            Some(entries) => {
                let invalid: Vec<String> = entries
                    .iter()
                    .filter(|entry| !entry.as_str().map_or(false, |s| allowed.contains(&s)))
                    .map(|entry| match entry.as_str() {
                        Some(s) => s.to_string(),
                        None => entry.to_string(),
                    })
                    .collect();
                if !invalid.is_empty() {
                    errors.push(format!(
                        "Invalid notification channels: {}",
                        invalid.join(", ")
                    ));
                }
            }
        },
        FieldRule::Language => {
            if !value.as_str().map_or(false, |s| language_re().is_match(s)) {
                errors.push(format!(
                    "Invalid {section}.{} format (expected ISO 639-1)",
                    spec.name
                ));
            }
        }
        FieldRule::Currency => {
            if !value.as_str().map_or(false, |s| currency_re().is_match(s)) {
                errors.push(format!(
                    "Invalid {section}.{} format (expected ISO 4217)",
                    spec.name
                ));
            }
        }
        FieldRule::NonNegativeNumber => {
            let valid = match value {
                Value::Number(n) => n.as_f64().map_or(false, |n| n >= 0.0),
                _ => false,
            };
            if !valid {
                errors.push(format!(
                    "{section}.{} must be a non-negative number",
                    spec.name
                ));
            }
        }
        FieldRule::Any => {}
    }
}
