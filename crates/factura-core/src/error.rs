//! # Error Types
//!
//! Domain-specific error types for factura-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  factura-core errors (this file)                                       │
//! │  └── ValidationError  - Constructor / input validation failures        │
//! │                                                                         │
//! │  factura-db errors (separate crate)                                    │
//! │  └── DbError          - Storage failures (logged, never fatal)         │
//! │                                                                         │
//! │  desktop app errors                                                    │
//! │  └── ApiError         - What the form's message area shows             │
//! │                                                                         │
//! │  Flow: ValidationError → ApiError → inline message                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Returned synchronously by the `Customer`, `Product` and `Invoice`
/// constructors. A failed construction never produces a value, so existing
/// draft state is untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing, empty or zero.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// An amount does not fit in the money range (line or invoice total).
    #[error("{field} is too large")]
    TooLarge { field: String },

    /// Invalid format (e.g., unparseable price or date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates an InvalidFormat error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a TooLarge error.
    pub fn too_large(field: impl Into<String>) -> Self {
        ValidationError::TooLarge {
            field: field.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::TooLarge { field }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::required("price");
        assert_eq!(err.to_string(), "price is required");

        let err = ValidationError::TooShort {
            field: "id_card".to_string(),
            min: 3,
        };
        assert_eq!(err.to_string(), "id_card must be at least 3 characters");

        let err = ValidationError::too_large("total");
        assert_eq!(err.to_string(), "total is too large");
    }

    #[test]
    fn test_field_accessor() {
        assert_eq!(ValidationError::required("qty").field(), "qty");
        assert_eq!(
            ValidationError::invalid_format("date", "bad").field(),
            "date"
        );
    }
}
