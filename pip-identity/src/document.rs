//! Sub-tree access helpers for identity documents.

use serde_json::{Map, Value};

use crate::normalize::NormalizeError;

/// Extract the `preferences` sub-tree from an identity document.
///
/// Returns `{}` when the document carries no preferences.
pub fn extract_preferences(document: &Value) -> Result<Value, NormalizeError> {
    extract(document, "preferences")
}

/// Extract the `behaviors` sub-tree from an identity document.
///
/// Returns `{}` when the document carries no behaviors.
pub fn extract_behaviors(document: &Value) -> Result<Value, NormalizeError> {
    extract(document, "behaviors")
}

fn extract(document: &Value, key: &str) -> Result<Value, NormalizeError> {
    let identity = document.as_object().ok_or(NormalizeError::InvalidInput)?;
    Ok(identity
        .get(key)
        .cloned()
        .unwrap_or_else(|| Value::Object(Map::new())))
}
