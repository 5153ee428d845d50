//! Error types for the NEO catalog.
//!
//! A single unified error type [`NeoError`] covers the failure modes of the
//! catalog core: unparseable approach timestamps, malformed dataset fields,
//! and queries that dereference a close approach with no linked NEO.
//!
//! # Error Categories
//!
//! | Variant | Use Case | Recoverable? |
//! |---------|----------|--------------|
//! | [`InvalidTimestamp`](NeoError::InvalidTimestamp) | Approach time string does not parse | Yes |
//! | [`InvalidRecord`](NeoError::InvalidRecord) | Dataset field is missing or malformed | Yes |
//! | [`MissingLinkage`](NeoError::MissingLinkage) | NEO-dependent filter hit an unlinked approach | No |
//!
//! Most fallible catalog functions return [`NeoResult<T>`], which is
//! `Result<T, NeoError>`. Use the constructor methods for consistent error
//! creation:
//!
//! ```
//! use neo_catalog::errors::NeoError;
//!
//! let err = NeoError::invalid_timestamp("2020-Foo-01 00:00", "unknown month");
//! assert!(err.to_string().contains("2020-Foo-01"));
//! ```

use thiserror::Error;

/// Unified error type for catalog loading and querying.
///
/// Use the constructor methods ([`invalid_timestamp`](Self::invalid_timestamp),
/// [`invalid_record`](Self::invalid_record),
/// [`missing_linkage`](Self::missing_linkage)) for consistent error creation.
#[derive(Error, Debug)]
pub enum NeoError {
    /// An approach timestamp string did not match the expected
    /// `YYYY-Mon-DD HH:MM` calendar format.
    #[error("Invalid approach timestamp '{value}': {message}")]
    InvalidTimestamp { value: String, message: String },

    /// A dataset field was missing or failed to convert.
    #[error("Invalid record field '{field}': {message}")]
    InvalidRecord { field: String, message: String },

    /// A filter needed the NEO linked to a close approach, but the approach's
    /// designation matched no NEO at link time.
    ///
    /// This is surfaced rather than treated as a non-match: silently skipping
    /// the approach would make the query result indistinguishable from a
    /// legitimate filter miss.
    #[error("Close approach of '{designation}' has no linked NEO; cannot evaluate a NEO-dependent filter")]
    MissingLinkage { designation: String },
}

/// Convenience alias for `Result<T, NeoError>`.
pub type NeoResult<T> = Result<T, NeoError>;

impl NeoError {
    /// Creates an [`InvalidTimestamp`](Self::InvalidTimestamp) error.
    pub fn invalid_timestamp(value: &str, reason: &str) -> Self {
        Self::InvalidTimestamp {
            value: value.to_string(),
            message: reason.to_string(),
        }
    }

    /// Creates an [`InvalidRecord`](Self::InvalidRecord) error.
    pub fn invalid_record(field: &str, reason: &str) -> Self {
        Self::InvalidRecord {
            field: field.to_string(),
            message: reason.to_string(),
        }
    }

    /// Creates a [`MissingLinkage`](Self::MissingLinkage) error.
    pub fn missing_linkage(designation: &str) -> Self {
        Self::MissingLinkage {
            designation: designation.to_string(),
        }
    }

    /// Returns `true` if skipping or fixing the offending input row might
    /// succeed.
    ///
    /// Timestamp and record errors describe bad dataset rows; a loader may
    /// drop the row and continue. [`MissingLinkage`](Self::MissingLinkage)
    /// is a defect in how the query was composed and is not recoverable.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidTimestamp { .. } | Self::InvalidRecord { .. } => true,
            Self::MissingLinkage { .. } => false,
        }
    }
}
