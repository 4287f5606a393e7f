//! Error types for filter building and storage.

use thiserror::Error;

/// Errors raised while building a [`crate::FilterSpec`] from raw query
/// parameters.
///
/// All variants carry the offending raw input and are detected before
/// any store access.
#[derive(Debug, Error)]
pub enum FilterError {
    /// A `start_date`/`end_date` value was not a parseable date-time.
    #[error("invalid date: {0:?}")]
    InvalidDate(String),

    /// A year-shorthand bound was not a valid 4-digit year.
    #[error("invalid year: {0:?}")]
    InvalidYear(String),

    /// The message regex failed to compile.
    #[error("invalid regex {pattern:?}: {source}")]
    InvalidRegex {
        /// The raw pattern as supplied by the caller.
        pattern: String,
        /// The compile error from the regex engine.
        #[source]
        source: Box<regex::Error>,
    },
}

/// Errors raised by a record store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store cannot accept more records.
    #[error("record store capacity exceeded")]
    CapacityExceeded,

    /// The backend failed to execute the operation.
    #[error("store backend error: {0}")]
    Backend(String),
}
