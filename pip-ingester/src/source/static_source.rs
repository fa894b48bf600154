//! In-memory identity source for testing.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use super::traits::*;

/// In-memory source serving fixed documents.
///
/// Configurable URL-to-document map and a call counter for unit tests.
pub struct StaticSource {
    documents: HashMap<String, Value>,
    call_count: AtomicU32,
}

impl StaticSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self {
            documents: HashMap::new(),
            call_count: AtomicU32::new(0),
        }
    }

    /// Register a document under a URL.
    pub fn with_document(mut self, url: impl Into<String>, document: Value) -> Self {
        self.documents.insert(url.into(), document);
        self
    }

    /// Get the number of times fetch was called.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl Default for StaticSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentitySource for StaticSource {
    fn id(&self) -> &str {
        "static"
    }

    async fn fetch(&self, url: &str) -> Result<Value, SourceError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        self.documents
            .get(url)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(url.to_string()))
    }
}
