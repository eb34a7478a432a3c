//! Error types for trellis.
//!
//! Validation failures are reported as [`ValidationResult`](crate::validation::ValidationResult)
//! values, not errors. The variants here cover mistakes made while
//! *configuring* validation, such as a malformed regex or message catalog.

use thiserror::Error;

/// Errors raised while building rules or loading configuration.
#[derive(Debug, Error)]
pub enum Error {
    /// A `pattern` rule was given a regex that does not compile.
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern as written by the caller.
        pattern: String,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// A message catalog could not be parsed.
    #[error("Invalid message catalog: {0}")]
    InvalidCatalog(#[from] serde_json::Error),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
