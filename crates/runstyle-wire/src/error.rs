//! Parse-rejection error type for the span wire format.

use thiserror::Error;

/// Errors produced by the span wire-format parser.
///
/// Every variant rejects the whole write: nothing from a payload that fails to
/// parse is ever applied. Line numbers are 1-based and count blank lines.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WireError {
    #[error("line {line}: expected at least 3 fields (offset, length, color)")]
    /// A span line had fewer than the three mandatory fields.
    MissingFields {
        /// The offending line number.
        line: usize,
    },

    #[error("line {line}: invalid {field} '{token}'")]
    /// An offset or length field was not a parsable integer.
    InvalidInteger {
        /// The offending line number.
        line: usize,
        /// Which field failed to parse.
        field: &'static str,
        /// The unparsable token.
        token: String,
    },

    #[error("line {line}: negative {field}")]
    /// An offset or length field was negative.
    Negative {
        /// The offending line number.
        line: usize,
        /// Which field was negative.
        field: &'static str,
    },

    #[error("line {line}: malformed color '{token}' (expected '-' or '#rrggbb')")]
    /// A color field was neither `-` nor a 6-hex-digit `#rrggbb` value.
    InvalidColor {
        /// The offending line number.
        line: usize,
        /// The malformed token.
        token: String,
    },

    #[error("line {line}: unknown flag '{token}'")]
    /// A trailing field was not one of the recognized flag names.
    UnknownFlag {
        /// The offending line number.
        line: usize,
        /// The unrecognized token.
        token: String,
    },

    #[error("line {line}: spans must be contiguous (expected offset {expected}, found {found})")]
    /// A line's offset left a gap or overlapped the previous line's range.
    NotContiguous {
        /// The offending line number.
        line: usize,
        /// The running end of the previous line.
        expected: usize,
        /// The offset actually found.
        found: usize,
    },
}
