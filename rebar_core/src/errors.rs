//! # Error Types
//!
//! Structured error types for rebar_core. Layout failures carry the numbers
//! that caused them so a front end can show them verbatim, and every variant
//! serializes to JSON for programmatic consumers.
//!
//! ## Example
//!
//! ```rust
//! use rebar_core::errors::{CalcError, CalcResult};
//!
//! fn validate_cover(cover_mm: f64) -> CalcResult<()> {
//!     if cover_mm <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "cover_mm",
//!             cover_mm.to_string(),
//!             "Cover must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for rebar_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for layout and project operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// The last bar centre of a layer lies beyond the link limit
    #[error(
        "The placement of bars exceeds the available effective width. \
         Max bar position: {max_position_mm:.2}, Effective width limit: {limit_mm:.2}"
    )]
    PlacementOverflow { max_position_mm: f64, limit_mm: f64 },

    /// A layer cannot be spaced (fewer than two bars)
    #[error("Invalid layer with {bar_count} bar(s): {reason}")]
    InvalidLayer { bar_count: u32, reason: String },

    /// An input value is invalid (out of range, infeasible section, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create a PlacementOverflow error
    pub fn placement_overflow(max_position_mm: f64, limit_mm: f64) -> Self {
        CalcError::PlacementOverflow {
            max_position_mm,
            limit_mm,
        }
    }

    /// Create an InvalidLayer error
    pub fn invalid_layer(bar_count: u32, reason: impl Into<String>) -> Self {
        CalcError::InvalidLayer {
            bar_count,
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(
        path: impl Into<String>,
        locked_by: impl Into<String>,
        locked_at: impl Into<String>,
    ) -> Self {
        CalcError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Wrap a serde_json error
    pub fn serialization(err: impl std::fmt::Display) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::PlacementOverflow { .. } => "PLACEMENT_OVERFLOW",
            CalcError::InvalidLayer { .. } => "INVALID_LAYER",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::FileLocked { .. } => "FILE_LOCKED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::placement_overflow(409.0, 249.0);
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"PlacementOverflow\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_overflow_message_rounds_to_two_places() {
        let error = CalcError::placement_overflow(409.123, 249.0);
        assert_eq!(
            error.to_string(),
            "The placement of bars exceeds the available effective width. \
             Max bar position: 409.12, Effective width limit: 249.00"
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CalcError::invalid_layer(1, "needs two bars").error_code(),
            "INVALID_LAYER"
        );
        assert_eq!(
            CalcError::placement_overflow(1.0, 0.0).error_code(),
            "PLACEMENT_OVERFLOW"
        );
        assert!(CalcError::file_locked("a", "b", "c").is_recoverable());
        assert!(!CalcError::placement_overflow(1.0, 0.0).is_recoverable());
    }
}
