//! HTTPS identity source backed by reqwest.

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

use super::traits::*;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Fetches identity documents over HTTPS.
///
/// Sends `Accept: application/json` and a `pip-ingester` user-agent on
/// every request. URLs must start with `https://`; plain HTTP is only
/// accepted when explicitly enabled for local development.
pub struct HttpSource {
    client: Client,
    timeout: Duration,
    allow_http: bool,
}

impl HttpSource {
    /// Create a source with the default timeout.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a source with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("pip-ingester/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            timeout,
            allow_http: false,
        }
    }

    /// Permit plain-HTTP URLs.
    ///
    /// Off by default. Intended for local development against a server
    /// without TLS; production identities stay HTTPS-only.
    pub fn allow_http(mut self, allow: bool) -> Self {
        self.allow_http = allow;
        self
    }

    fn check_url(&self, url: &str) -> Result<(), SourceError> {
        let secure = url.starts_with("https://");
        let insecure_ok = self.allow_http && url.starts_with("http://");
        if secure || insecure_ok {
            Ok(())
        } else {
            Err(SourceError::InsecureUrl(url.to_string()))
        }
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentitySource for HttpSource {
    fn id(&self) -> &str {
        "https"
    }

    async fn fetch(&self, url: &str) -> Result<Value, SourceError> {
        self.check_url(url)?;

        tracing::debug!(url = %url, "Fetching identity document");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout {
                    timeout_secs: self.timeout.as_secs(),
                }
            } else {
                SourceError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            if status == StatusCode::NOT_FOUND {
                return Err(SourceError::NotFound(url.to_string()));
            }
            return Err(SourceError::RequestFailed {
                status: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| SourceError::DecodeError(e.to_string()))
    }
}
