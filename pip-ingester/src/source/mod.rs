//! Identity source abstraction layer.
//!
//! Provides a trait-based interface over where identity documents come
//! from:
//! - HTTPS fetch for production
//! - In-memory static source for testing

pub mod http;
pub mod static_source;
pub mod traits;

pub use http::HttpSource;
pub use static_source::StaticSource;
pub use traits::{IdentitySource, SourceError};
