//! CLI Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A CLI error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The configuration could not be loaded.
    #[display("could not load configuration")]
    Config,
    /// The input file does not exist.
    #[display("input not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// The input file exists but may not be read.
    #[display("permission denied: {}", _0.display())]
    PermissionDenied(#[error(not(source))] PathBuf),
    /// Reading the input failed for another, possibly transient, reason.
    #[display("could not read input: {}", _0.display())]
    Input(#[error(not(source))] PathBuf),
    /// The input is not a HAL document.
    #[display("input is not a valid HAL document")]
    Parse,
    /// The requested payload data is not available.
    #[display("payload data unavailable")]
    Data,
    /// Writing the result failed.
    #[display("could not write output")]
    Output,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Input(_) | Self::Output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ErrorKind::Config, false)]
    #[case(ErrorKind::NotFound(PathBuf::from("doc.json")), false)]
    #[case(ErrorKind::PermissionDenied(PathBuf::from("doc.json")), false)]
    #[case(ErrorKind::Input(PathBuf::from("doc.json")), true)]
    #[case(ErrorKind::Parse, false)]
    #[case(ErrorKind::Data, false)]
    #[case(ErrorKind::Output, true)]
    fn retryable(#[case] kind: ErrorKind, #[case] expected: bool) {
        assert_eq!(kind.is_retryable(), expected);
    }

    #[test]
    fn display_names_the_path() {
        assert_eq!(ErrorKind::NotFound(PathBuf::from("doc.json")).to_string(), "input not found: doc.json");
    }
}
