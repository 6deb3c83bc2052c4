//! Error types for the fallible helper APIs.
//!
//! The copy path itself never fails: an unconvertible unit is skipped.
//! These errors come from building values ([`ValueError`]), parsing
//! timestamps ([`TimeError`]) and decoding JSON ([`JsonError`]).

use thiserror::Error;

/// Error while building or updating a record value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// The record type has no field with this name.
    #[error("record '{record}' has no field '{field}'")]
    UnknownField {
        /// Record type name.
        record: String,
        /// Requested field name.
        field: String,
    },

    /// The value's type differs from the field's declared type.
    #[error("field '{field}' expects {expected}, got {found}")]
    TypeMismatch {
        /// Field name.
        field: String,
        /// Declared field type.
        expected: String,
        /// Type of the rejected value.
        found: String,
    },
}

/// Error while parsing text into a timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    /// The text does not match the layout.
    #[error("cannot parse '{input}' with layout '{layout}': {source}")]
    Parse {
        /// Rejected input.
        input: String,
        /// Layout in reference-timestamp form.
        layout: String,
        /// Underlying chrono error.
        #[source]
        source: chrono::ParseError,
    },

    /// The local time does not exist in the zone (e.g. skipped by a DST change).
    #[error("local time '{input}' does not exist in zone {zone}")]
    Nonexistent {
        /// Rejected input.
        input: String,
        /// Zone name.
        zone: String,
    },
}

/// Error while decoding JSON into a typed value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsonError {
    /// JSON kind does not match the target type.
    #[error("expected {expected}, got JSON {found}")]
    Mismatch {
        /// Target type name.
        expected: String,
        /// JSON kind found.
        found: &'static str,
    },

    /// Number does not fit the target width.
    #[error("number {value} out of range for {ty}")]
    OutOfRange {
        /// Number as written.
        value: String,
        /// Target type name.
        ty: String,
    },

    /// Text is not a valid RFC 3339 timestamp.
    #[error("invalid timestamp '{0}'")]
    InvalidTime(String),

    /// Map key text cannot be parsed as the key type.
    #[error("invalid map key '{key}' for {ty}")]
    InvalidKey {
        /// Key text.
        key: String,
        /// Key type name.
        ty: String,
    },

    /// The target type cannot be decoded from JSON.
    #[error("type {0} cannot be decoded from JSON")]
    Unsupported(String),
}
