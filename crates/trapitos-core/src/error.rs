//! # Error Types
//!
//! Domain-specific error types for trapitos-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  trapitos-core (this file)                                             │
//! │  └── ValidationError  - input/business-rule validation failures        │
//! │                                                                         │
//! │  trapitos-db (separate crate)                                          │
//! │  └── DbError          - database operation failures, by constraint     │
//! │                                                                         │
//! │  trapitos-engine (separate crate)                                      │
//! │  └── SaleError        - the user-facing checkout failure taxonomy      │
//! │                                                                         │
//! │  Flow: ValidationError / DbError → SaleError → caller message          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Input validation errors.
///
/// These occur when caller input doesn't meet requirements. Used for early
/// validation before any persistence is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;
