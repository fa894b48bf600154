//! Ingester - main entry point for identity ingestion.
//!
//! Composes a source with the core validator and normalizer:
//! fetch -> decode -> validate -> normalize.

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::source::{HttpSource, IdentitySource, SourceError};
use pip_identity::NormalizeError;

/// Error types for ingestion.
///
/// `Source` variants mean "could not obtain a document"; `Validation`
/// means a document was obtained but is invalid. Callers that branch on
/// the distinction match on the variant.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// Could not obtain a document
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Document failed schema validation
    #[error("Identity validation failed: {}", .errors.join(", "))]
    Validation {
        /// Every violation the validator reported, in checking order
        errors: Vec<String>,
    },

    /// Document could not be normalized
    #[error("Failed to normalize identity: {0}")]
    Normalize(#[from] NormalizeError),
}

/// Configuration for an ingestion run.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Request timeout for the default HTTP source
    pub timeout: Duration,
    /// Whether to validate the document
    pub validate: bool,
    /// Whether to normalize with defaults
    pub normalize: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(crate::source::http::DEFAULT_TIMEOUT_SECS),
            validate: true,
            normalize: true,
        }
    }
}

impl IngestConfig {
    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable or disable validation.
    pub fn with_validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Enable or disable normalization.
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }
}

/// Fetches and processes PIP identities.
pub struct Ingester {
    source: Arc<dyn IdentitySource>,
    config: IngestConfig,
}

impl Ingester {
    /// Create an ingester over a custom source.
    ///
    /// The config timeout only applies to the default HTTP source;
    /// custom sources own their transport settings.
    pub fn new(source: Arc<dyn IdentitySource>) -> Self {
        Self {
            source,
            config: IngestConfig::default(),
        }
    }

    /// Create an ingester over the default HTTPS source.
    pub fn http() -> Self {
        Self::http_with(IngestConfig::default())
    }

    /// Create an HTTPS ingester with custom configuration.
    pub fn http_with(config: IngestConfig) -> Self {
        Self {
            source: Arc::new(HttpSource::with_timeout(config.timeout)),
            config,
        }
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: IngestConfig) -> Self {
        self.config = config;
        self
    }

    /// Fetch, validate, and normalize the identity at `url`.
    ///
    /// Validation failures carry the full error list; they are never
    /// silently swallowed. With both steps disabled this is a plain
    /// fetch-and-decode.
    pub async fn ingest(&self, url: &str) -> Result<Value, IngestError> {
        let document = self.source.fetch(url).await?;

        if self.config.validate {
            let result = pip_identity::validate(&document);
            if !result.valid {
                warn!(
                    url = %url,
                    errors = result.errors.len(),
                    "Identity validation failed"
                );
                return Err(IngestError::Validation {
                    errors: result.errors,
                });
            }
        }

        let document = if self.config.normalize {
            pip_identity::normalize(&document)?
        } else {
            document
        };

        debug!(url = %url, source = %self.source.id(), "Ingested identity document");

        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticSource;
    use serde_json::json;

    const URL: &str = "https://example.com/identity.json";

    fn valid_identity() -> Value {
        json!({
            "version": "0.1.0",
            "metadata": {
                "created": "2024-01-01T00:00:00Z",
                "updated": "2024-01-01T00:00:00Z"
            },
            "preferences": { "ui": { "theme": "dark" } }
        })
    }

    fn ingester_for(document: Value) -> Ingester {
        Ingester::new(Arc::new(
            StaticSource::new().with_document(URL, document),
        ))
    }

    #[tokio::test]
    async fn test_ingest_normalizes() {
        let identity = ingester_for(valid_identity()).ingest(URL).await.unwrap();

        assert_eq!(identity["preferences"]["ui"]["theme"], "dark");
        assert_eq!(identity["preferences"]["ui"]["density"], "comfortable");
        assert_eq!(identity["behaviors"], json!({}));
    }

    #[tokio::test]
    async fn test_invalid_identity_is_rejected() {
        let mut document = valid_identity();
        document["preferences"] = json!({
            "notifications": { "channels": ["in-app", "carrier-pigeon"] }
        });

        let err = ingester_for(document).ingest(URL).await.unwrap_err();
        match err {
            IngestError::Validation { errors } => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].contains("carrier-pigeon"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_validation_can_be_skipped() {
        let mut document = valid_identity();
        document["version"] = json!("not-semver");

        let ingester = ingester_for(document)
            .with_config(IngestConfig::default().with_validate(false));
        let identity = ingester.ingest(URL).await.unwrap();

        // Normalizer tolerates the invalid version and passes it through
        assert_eq!(identity["version"], "not-semver");
        assert_eq!(identity["preferences"]["ui"]["theme"], "dark");
    }

    #[tokio::test]
    async fn test_normalization_can_be_skipped() {
        let ingester = ingester_for(valid_identity())
            .with_config(IngestConfig::default().with_normalize(false));
        let identity = ingester.ingest(URL).await.unwrap();

        // Raw document: no defaults filled in
        assert!(identity["preferences"]["ui"]
            .as_object()
            .unwrap()
            .get("density")
            .is_none());
        assert!(identity.as_object().unwrap().get("behaviors").is_none());
    }

    #[tokio::test]
    async fn test_fetch_failure_is_distinct_from_invalid() {
        let ingester = Ingester::new(Arc::new(StaticSource::new()));
        let err = ingester.ingest(URL).await.unwrap_err();
        assert!(matches!(err, IngestError::Source(SourceError::NotFound(_))));
    }
}
