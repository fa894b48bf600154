//! Core trait for identity sources.
//!
//! This module defines the `IdentitySource` trait - the abstraction over
//! where identity documents come from. The production implementation
//! fetches over HTTPS; tests use an in-memory source.

use async_trait::async_trait;
use serde_json::Value;

/// Error types for identity sources.
///
/// Every variant means "could not obtain a document" - distinct from a
/// document that was obtained but failed validation.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// URL is empty or does not use HTTPS
    #[error("Identity URL must use HTTPS: {0:?}")]
    InsecureUrl(String),

    /// Fetch timed out
    #[error("Identity fetch timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// Server answered with a non-success status
    #[error("Identity fetch failed with HTTP {status}")]
    RequestFailed { status: u16 },

    /// Network error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Response body is not valid JSON
    #[error("Failed to parse identity JSON: {0}")]
    DecodeError(String),

    /// No document at the given URL
    #[error("Identity not found: {0}")]
    NotFound(String),
}

/// Trait for fetching identity documents.
///
/// Implementations decode the response body as JSON; the returned value
/// is handed to the core validator/normalizer untouched.
#[async_trait]
pub trait IdentitySource: Send + Sync {
    /// Get the source identifier for logs and diagnostics.
    fn id(&self) -> &str;

    /// Fetch and decode the identity document at `url`.
    async fn fetch(&self, url: &str) -> Result<Value, SourceError>;
}
