//! # Error Types
//!
//! Domain-specific error types for cart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cart-core errors (this file)                                          │
//! │  ├── CoreError        - Cart rule violations                           │
//! │  └── ValidationError  - Input / snapshot validation failures           │
//! │                                                                         │
//! │  cart-db errors                                                        │
//! │  └── DbError          - Snapshot persistence failures                  │
//! │                                                                         │
//! │  cart-store errors                                                     │
//! │  └── StoreError       - Everything an operation can fail with          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → Notifier message     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Cart rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Requested quantity exceeds what the stock source reports.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart holds 2 × product 1
    ///      │
    ///      ▼
    /// add_product(1) → stock(1) = 2
    ///      │
    ///      ▼
    /// InsufficientStock { product_id: 1, available: 2, requested: 3 }
    ///      │
    ///      ▼
    /// Notifier: "Requested quantity out of stock"
    /// ```
    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: ProductId,
        available: i64,
        requested: i64,
    },

    /// The product is not held in the cart.
    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),

    /// The product is already held in the cart.
    #[error("Product {0} is already in the cart")]
    DuplicateProduct(ProductId),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Duplicate value (e.g. the same product id twice in a snapshot).
    #[error("{field} '{value}' appears more than once")]
    Duplicate { field: String, value: String },

    /// Invalid format (e.g. a snapshot that is not a JSON array of products).
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
        let err = CoreError::InsufficientStock {
            product_id: ProductId::new(7),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for product 7: available 3, requested 5"
        );

        assert_eq!(
            CoreError::NotInCart(ProductId::new(99)).to_string(),
            "Product 99 is not in the cart"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "amount".to_string(),
        };
        assert_eq!(validation_err.to_string(), "amount must be positive");

        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
