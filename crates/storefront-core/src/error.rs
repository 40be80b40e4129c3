//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Admin, checkout and seed failures              │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  App errors (apps/storefront)                                          │
//! │  └── ApiError         - What the UI sees (serialized)                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → UI                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart and catalog filter/sort intents never produce any of these: they are
//! total functions. Errors only come from admin edits, checkout, and parsing.

use thiserror::Error;

use crate::checkout::CheckoutStep;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found.
    ///
    /// ## When This Occurs
    /// - Admin update/delete of an id that is not in the catalog
    /// - Adding an unknown product id to the cart through a command
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A product with the same id already exists in the catalog.
    #[error("Product '{0}' already exists")]
    DuplicateProduct(String),

    /// Checkout was started or completed with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// A checkout operation was attempted at the wrong step.
    ///
    /// ## User Workflow
    /// ```text
    /// Shipping ──► Payment ──► Review ──► Complete
    ///                 │
    ///        place_order() here
    ///                 │
    ///                 ▼
    /// InvalidCheckoutStep { expected: Review, actual: Payment }
    /// ```
    #[error("Checkout is at step {actual}, expected {expected}")]
    InvalidCheckoutStep {
        expected: CheckoutStep,
        actual: CheckoutStep,
    },

    /// Unknown sort key string.
    #[error("Unknown sort key: {0}")]
    InvalidSortKey(String),

    /// Seed data could not be parsed.
    #[error("Invalid seed data: {0}")]
    InvalidSeed(#[from] serde_json::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any state changes, so a rejected input leaves the store
/// untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Empty or whitespace-only input for a mandatory field.
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Number outside an inclusive range (rating, expiry month).
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Amount below zero (prices).
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Text that doesn't parse (card number, expiry, cvv).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ProductNotFound("42".to_string());
        assert_eq!(err.to_string(), "Product not found: 42");

        let err = CoreError::InvalidCheckoutStep {
            expected: CheckoutStep::Review,
            actual: CheckoutStep::Payment,
        };
        assert_eq!(err.to_string(), "Checkout is at step payment, expected review");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "city".to_string(),
        };
        assert_eq!(err.to_string(), "city is required");

        let err = ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        };
        assert_eq!(err.to_string(), "query must be at most 100 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
