//! # Error Types
//!
//! Structured error types for footing_core. Every failure carries enough
//! context to identify the offending request and field without re-running
//! the design, so a batch driver can report failures programmatically.
//!
//! ## Example
//!
//! ```rust
//! use footing_core::errors::{DesignError, DesignResult};
//!
//! fn validate_load(dead_load: f64) -> DesignResult<()> {
//!     if dead_load <= 0.0 {
//!         return Err(DesignError::invalid_input(
//!             "dead_load",
//!             dead_load.to_string(),
//!             "Dead load must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for footing_core operations
pub type DesignResult<T> = Result<T, DesignError>;

/// Structured error type for footing design operations.
///
/// Failures are always scoped to a single design request. A batch driver
/// collects them independently; one bad request never aborts the run.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum DesignError {
    /// A categorical input does not match its enumerated set
    #[error("Invalid category for '{field}': '{value}' (expected one of {allowed})")]
    InvalidCategory {
        field: String,
        value: String,
        allowed: String,
    },

    /// A required field is missing (e.g., wall_type on a wall request)
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A numeric input is out of range or non-finite
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// The flexural quadratic has no real root - the section cannot carry
    /// the applied moment at any reinforcement ratio
    #[error("Section cannot resist the applied moment (k_bar = {k_bar_ksi:.3} ksi)")]
    NonPhysicalSection { k_bar_ksi: f64 },

    /// A shear-adjustment loop exhausted its iteration cap
    #[error("{check} check did not converge after {iterations} thickness adjustments")]
    NonConvergent { check: String, iterations: u32 },

    /// Net allowable soil pressure is zero or negative - overburden and
    /// self-weight consume the entire gross bearing capacity
    #[error("Net allowable soil pressure is {net_allowable_ksf:.3} ksf; no capacity remains for superimposed loads")]
    InsufficientBearingCapacity { net_allowable_ksf: f64 },

    /// File I/O error at the batch boundary
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl DesignError {
    /// Create an InvalidCategory error
    pub fn invalid_category(
        field: impl Into<String>,
        value: impl Into<String>,
        allowed: impl Into<String>,
    ) -> Self {
        DesignError::InvalidCategory {
            field: field.into(),
            value: value.into(),
            allowed: allowed.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        DesignError::MissingField {
            field: field.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        DesignError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a NonConvergent error
    pub fn non_convergent(check: impl Into<String>, iterations: u32) -> Self {
        DesignError::NonConvergent {
            check: check.into(),
            iterations,
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        DesignError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            DesignError::InvalidCategory { .. } => "INVALID_CATEGORY",
            DesignError::MissingField { .. } => "MISSING_FIELD",
            DesignError::InvalidInput { .. } => "INVALID_INPUT",
            DesignError::NonPhysicalSection { .. } => "NON_PHYSICAL_SECTION",
            DesignError::NonConvergent { .. } => "NON_CONVERGENT",
            DesignError::InsufficientBearingCapacity { .. } => "INSUFFICIENT_BEARING",
            DesignError::FileError { .. } => "FILE_ERROR",
            DesignError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }

    /// Whether this failure stems from the request itself rather than the
    /// structural checks (useful for batch reporting)
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            DesignError::InvalidCategory { .. }
                | DesignError::MissingField { .. }
                | DesignError::InvalidInput { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = DesignError::invalid_category("conc_type", "heavy", "nw, lw, s_lw");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: DesignError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            DesignError::missing_field("wall_type").error_code(),
            "MISSING_FIELD"
        );
        assert_eq!(
            DesignError::non_convergent("one-way shear", 64).error_code(),
            "NON_CONVERGENT"
        );
        assert_eq!(
            DesignError::InsufficientBearingCapacity {
                net_allowable_ksf: -0.2
            }
            .error_code(),
            "INSUFFICIENT_BEARING"
        );
    }

    #[test]
    fn test_input_error_classification() {
        assert!(DesignError::missing_field("wall_type").is_input_error());
        assert!(!DesignError::NonPhysicalSection { k_bar_ksi: 2.0 }.is_input_error());
    }

    #[test]
    fn test_display_messages() {
        let error = DesignError::non_convergent("two-way shear", 64);
        let text = error.to_string();
        assert!(text.contains("two-way shear"));
        assert!(text.contains("64"));
    }
}
