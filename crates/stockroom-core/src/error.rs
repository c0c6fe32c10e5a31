//! # Error Types
//!
//! Domain-specific error types for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  CoreError        - Guard failures (combination limits)                 │
//! │  └── Validation   - wraps ValidationError                               │
//! │                                                                         │
//! │  ValidationError  - Opt-in input checks (validation module)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Most of this crate is infallible. Stock folds and sale accounting return
//! plain values; business rules such as "a canceled sale has no receipt" are
//! zeroes, not errors. Errors only come from the combination guard and from
//! the validation helpers that callers run before handing data in.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The selected attribute values would expand into more variants than
    /// the configured limit.
    ///
    /// ## User Workflow
    /// ```text
    /// Category: Color × Size × Material
    /// Selected: 12 colors, 10 sizes, 15 materials
    ///      │
    ///      ▼
    /// combination_count = 1800 > max 1000
    ///      │
    ///      ▼
    /// UI shows: "1800 variants selected, at most 1000 allowed"
    /// ```
    #[error("{count} variant combinations requested, at most {max} allowed")]
    TooManyCombinations { count: usize, max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (attribute id, attribute value).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// A category declares more than one primary attribute.
    #[error("only one primary attribute is allowed, found {found:?}")]
    MultiplePrimaryAttributes { found: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::TooManyCombinations {
            count: 1800,
            max: 1000,
        };
        assert_eq!(
            err.to_string(),
            "1800 variant combinations requested, at most 1000 allowed"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "details[0].quantity".to_string(),
        };
        assert_eq!(err.to_string(), "details[0].quantity must be positive");

        let err = ValidationError::MultiplePrimaryAttributes {
            found: vec!["color".to_string(), "size".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "only one primary attribute is allowed, found [\"color\", \"size\"]"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "attributeId".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
