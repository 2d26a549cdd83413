//! HAL Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. Underlying `serde_json` failures are
//! kept as child frames of the [`ErrorKind`] that was raised over them.

use derive_more::{Display, Error};

/// A HAL error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for HAL operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The resource payload is not a JSON object, so it has no named properties.
    #[display("invalid payload: not a JSON object")]
    InvalidPayload,
    /// A named property was requested but is not present in the payload.
    #[display("key {_0} missing in payload")]
    MissingKey(#[error(not(source))] String),
    /// `_links` and `_embedded` belong to the HAL envelope and cannot hold payload data.
    #[display("reserved key cannot hold payload data: {_0}")]
    ReservedKey(#[error(not(source))] String),
    /// Conversion to or from JSON failed.
    #[display("JSON error")]
    Json,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Every failure here is a property of the data; the same input fails
        // the same way.
        false
    }
}
