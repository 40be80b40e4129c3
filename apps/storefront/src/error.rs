//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow                                           │
//! │                                                                         │
//! │  storefront-core                 commands                 wire          │
//! │  ───────────────                 ────────                 ────          │
//! │                                                                         │
//! │  ValidationError ──┐                                                    │
//! │                    ├──► CoreError ──► ApiError ──► {"error": {         │
//! │  checkout/admin ───┘                  (code,          "code": ...,     │
//! │                                        message)       "message": ...}} │
//! │                                                                         │
//! │  bad JSON line ─────────────────────► ApiError(BAD_REQUEST)            │
//! │                                                                         │
//! │  seed file / flags ─────────────────► StartupError (process exits)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use serde::Serialize;
use storefront_core::CoreError;
use thiserror::Error;

/// API error returned from commands.
///
/// ## Serialization
/// This is what the UI receives when a command fails:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 42"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown product id
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Cart operation failed
    CartError,

    /// Checkout step out of order or not started
    CheckoutError,

    /// Request could not be understood
    BadRequest,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn checkout(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CheckoutError, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BadRequest, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match &err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", id),
            CoreError::DuplicateProduct(_) => ApiError::validation(err.to_string()),
            CoreError::EmptyCart => ApiError::new(ErrorCode::CartError, err.to_string()),
            CoreError::InvalidCheckoutStep { .. } => ApiError::checkout(err.to_string()),
            CoreError::InvalidSortKey(_) => ApiError::bad_request(err.to_string()),
            CoreError::InvalidSeed(e) => {
                tracing::error!("Seed data rejected: {}", e);
                ApiError::bad_request("Invalid product data")
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Errors that stop the process before the command loop starts.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to read seed file {path}: {source}")]
    ReadSeed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid seed file {path}: {source}")]
    InvalidSeed {
        path: PathBuf,
        #[source]
        source: CoreError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{CheckoutStep, ValidationError};

    #[test]
    fn test_core_errors_map_to_codes() {
        let err = ApiError::from(CoreError::ProductNotFound("9".to_string()));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: 9");

        let err = ApiError::from(CoreError::EmptyCart);
        assert_eq!(err.code, ErrorCode::CartError);

        let err = ApiError::from(CoreError::InvalidCheckoutStep {
            expected: CheckoutStep::Review,
            actual: CheckoutStep::Shipping,
        });
        assert_eq!(err.code, ErrorCode::CheckoutError);

        let err = ApiError::from(CoreError::Validation(ValidationError::Required {
            field: "city".to_string(),
        }));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "city is required");
    }

    #[test]
    fn test_api_error_serializes_screaming_code() {
        let json = serde_json::to_value(ApiError::not_found("Product", "1")).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found: 1");
    }
}
