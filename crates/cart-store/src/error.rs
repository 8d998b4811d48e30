//! # Store Error Types
//!
//! Everything a cart operation can fail with.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Store Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │   Cart rules    │  │   Transport     │  │     Persistence         │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Core(          │  │  Request        │  │  Persistence(DbError)   │ │
//! │  │   Insufficient  │  │  Status         │  │                         │ │
//! │  │   NotInCart)    │  │  Response       │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐                                                   │
//! │  │  Configuration  │   User-facing mapping (notifier.rs):              │
//! │  │                 │   • insufficient stock → "out of stock" message   │
//! │  │  InvalidConfig  │   • anything else      → generic failure message  │
//! │  │  InvalidUrl     │                          of the operation         │
//! │  │  ConfigLoad/Save│                                                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use cart_core::{CoreError, ProductId};
use cart_db::DbError;
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store error type covering all cart operation failures.
#[derive(Debug, Error)]
pub enum StoreError {
    // =========================================================================
    // Cart Rules
    // =========================================================================
    /// A cart rule refused the operation.
    #[error(transparent)]
    Core(#[from] CoreError),

    // =========================================================================
    // Transport
    // =========================================================================
    /// The request could not be sent or timed out.
    #[error("Request to {path} failed: {reason}")]
    Request { path: String, reason: String },

    /// The API answered with a non-success status.
    #[error("Request to {path} returned HTTP {status}")]
    Status { path: String, status: u16 },

    /// The response body could not be decoded.
    #[error("Invalid response from {path}: {reason}")]
    Response { path: String, reason: String },

    // =========================================================================
    // Persistence
    // =========================================================================
    /// Snapshot load or save failed.
    #[error("Persistence error: {0}")]
    Persistence(#[from] DbError),

    // =========================================================================
    // Configuration
    // =========================================================================
    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid API base URL.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),
}

impl From<url::ParseError> for StoreError {
    fn from(err: url::ParseError) -> Self {
        StoreError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        StoreError::ConfigSaveFailed(err.to_string())
    }
}

impl StoreError {
    /// Shorthand for a cart-miss error.
    pub fn not_in_cart(product_id: ProductId) -> Self {
        StoreError::Core(CoreError::NotInCart(product_id))
    }

    /// Returns true if the requested quantity exceeded stock.
    pub fn is_stock_error(&self) -> bool {
        matches!(self, StoreError::Core(CoreError::InsufficientStock { .. }))
    }

    /// Returns true if the product was not in the cart.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Core(CoreError::NotInCart(_)))
    }

    /// Returns true if a stock or catalog request failed.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            StoreError::Request { .. } | StoreError::Status { .. } | StoreError::Response { .. }
        )
    }

    /// Returns true if the snapshot store failed.
    pub fn is_persistence(&self) -> bool {
        matches!(self, StoreError::Persistence(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let stock = StoreError::from(CoreError::InsufficientStock {
            product_id: ProductId::new(1),
            available: 2,
            requested: 3,
        });
        assert!(stock.is_stock_error());
        assert!(!stock.is_transport());

        let missing = StoreError::not_in_cart(ProductId::new(99));
        assert!(missing.is_not_found());
        assert!(!missing.is_stock_error());

        let status = StoreError::Status {
            path: "stock/1".to_string(),
            status: 404,
        };
        assert!(status.is_transport());

        let db = StoreError::from(DbError::PoolExhausted);
        assert!(db.is_persistence());
    }

    #[test]
    fn test_error_display() {
        let err = StoreError::Status {
            path: "products/7".to_string(),
            status: 500,
        };
        assert_eq!(err.to_string(), "Request to products/7 returned HTTP 500");

        let err = StoreError::not_in_cart(ProductId::new(99));
        assert_eq!(err.to_string(), "Product 99 is not in the cart");
    }
}
