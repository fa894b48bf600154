//! PIP identity ingestion.
//!
//! Fetches, validates, and normalizes PIP identity documents:
//!
//! - Trait-based identity sources (HTTPS via reqwest, in-memory static
//!   source for tests)
//! - [`Ingester`]: fetch -> decode -> validate -> normalize composition
//! - SDK conveniences: [`load_identity`], [`load_preferences`],
//!   [`load_behaviors`]
//!
//! The validation and normalization rules themselves live in the pure
//! `pip-identity` crate; this crate owns the network edge. Fetch-side
//! failures ([`SourceError`]) stay distinct from schema violations
//! ([`IngestError::Validation`]) so callers can branch on "could not
//! obtain a document" vs "document is invalid".
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │               Ingester                  │
//! │    (fetch, validate, normalize)         │
//! └────────────────┬────────────────────────┘
//!                  │
//!      ┌───────────┴───────────┐
//!      ▼                       ▼
//! ┌──────────────┐      ┌──────────────┐
//! │IdentitySource│      │ pip-identity │
//! │ (Http/Static)│      │ core rules   │
//! └──────────────┘      └──────────────┘
//! ```

pub mod sdk;
pub mod service;
pub mod source;

// Re-export main types for convenience
pub use sdk::{load_behaviors, load_identity, load_preferences};
pub use service::{IngestConfig, IngestError, Ingester};
pub use source::{HttpSource, IdentitySource, SourceError, StaticSource};
