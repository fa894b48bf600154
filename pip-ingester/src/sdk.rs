//! One-call conveniences for loading PIP identities.
//!
//! The functions here cover the common cases an application embeds:
//! load the full identity, or just the `preferences` or `behaviors`
//! sub-tree, all over the default HTTPS source. Applications that need
//! a custom source or finer control use [`Ingester`](crate::Ingester)
//! directly.

use serde_json::Value;

use crate::service::{IngestConfig, IngestError, Ingester};

/// Load a PIP identity from a URL.
///
/// # Example
///
/// ```no_run
/// use pip_ingester::{load_identity, IngestConfig};
///
/// # async fn run() -> Result<(), pip_ingester::IngestError> {
/// let identity =
///     load_identity("https://example.com/identity.json", IngestConfig::default()).await?;
/// if identity["preferences"]["ui"]["theme"] == "dark" {
///     // apply dark mode
/// }
/// # Ok(())
/// # }
/// ```
pub async fn load_identity(url: &str, config: IngestConfig) -> Result<Value, IngestError> {
    Ingester::http_with(config).ingest(url).await
}

/// Load only the `preferences` sub-tree from an identity URL.
pub async fn load_preferences(url: &str, config: IngestConfig) -> Result<Value, IngestError> {
    let identity = load_identity(url, config).await?;
    Ok(pip_identity::extract_preferences(&identity)?)
}

/// Load only the `behaviors` sub-tree from an identity URL.
pub async fn load_behaviors(url: &str, config: IngestConfig) -> Result<Value, IngestError> {
    let identity = load_identity(url, config).await?;
    Ok(pip_identity::extract_behaviors(&identity)?)
}
