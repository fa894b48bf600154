//! Identity document validation and normalization for the PIP protocol.
//!
//! A PIP identity is a small JSON document describing a user's
//! preferences and behavioral settings. This crate implements the pure
//! core of identity ingestion:
//!
//! - [`validate`]: check a candidate document against the identity
//!   schema, returning every violation as data
//! - [`normalize`]: produce a fully-populated document by overlaying the
//!   caller's values on the schema's declared defaults
//! - [`extract_preferences`] / [`extract_behaviors`]: pull out the
//!   sub-trees consumers actually use
//!
//! Both operations are synchronous, perform no I/O, and hold no shared
//! state; they can be called concurrently without coordination. Network
//! fetch and JSON decoding live in the `pip-ingester` crate.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//!
//! let document = json!({
//!     "version": "0.1.0",
//!     "metadata": {
//!         "created": "2024-01-01T00:00:00Z",
//!         "updated": "2024-01-01T00:00:00Z"
//!     },
//!     "preferences": { "ui": { "theme": "dark" } }
//! });
//!
//! let result = pip_identity::validate(&document);
//! assert!(result.valid);
//!
//! let normalized = pip_identity::normalize(&document)?;
//! assert_eq!(normalized["preferences"]["ui"]["theme"], "dark");
//! assert_eq!(normalized["preferences"]["ui"]["density"], "comfortable");
//! # Ok::<(), pip_identity::NormalizeError>(())
//! ```

pub mod document;
pub mod normalize;
pub mod schema;
pub mod validate;

// Re-export main entry points
pub use document::{extract_behaviors, extract_preferences};
pub use normalize::{normalize, NormalizeError};
pub use validate::{validate, ValidationResult};
