//! # Validation Module
//!
//! Amount and snapshot validation.
//!
//! ## Where Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Points                                  │
//! │                                                                         │
//! │  Startup                                                               │
//! │  └── parse_snapshot(json)  ← persisted cart must satisfy invariants    │
//! │                                                                         │
//! │  Every mutation                                                        │
//! │  └── validate_amount(n)    ← a held line never drops below 1           │
//! │                                                                         │
//! │  update_product_amount(n <= 0) never reaches this module: the store    │
//! │  skips it before any I/O.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use crate::cart::Cart;
use crate::error::ValidationError;
use crate::types::Product;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a held amount.
///
/// ## Example
/// ```rust
/// use cart_core::validation::validate_amount;
///
/// assert!(validate_amount(1).is_ok());
/// assert!(validate_amount(0).is_err());
/// ```
pub fn validate_amount(amount: i64) -> ValidationResult<()> {
    if amount < 1 {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }
    Ok(())
}

/// Validates a sequence of line items: amounts >= 1, ids unique.
pub fn validate_items(items: &[Product]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(items.len());

    for product in items {
        validate_amount(product.amount)?;
        if !seen.insert(product.id) {
            return Err(ValidationError::Duplicate {
                field: "product id".to_string(),
                value: product.id.to_string(),
            });
        }
    }

    Ok(())
}

/// Decodes and validates a persisted snapshot.
///
/// ## Example
/// ```rust
/// use cart_core::validation::parse_snapshot;
///
/// let cart = parse_snapshot(r#"[{"id":1,"title":"Shoe","price":100,"image":"","amount":2}]"#).unwrap();
/// assert_eq!(cart.total_amount(), 2);
///
/// assert!(parse_snapshot("not json").is_err());
/// ```
pub fn parse_snapshot(json: &str) -> ValidationResult<Cart> {
    let items: Vec<Product> =
        serde_json::from_str(json).map_err(|e| ValidationError::InvalidFormat {
            field: "snapshot".to_string(),
            reason: e.to_string(),
        })?;

    Cart::from_products(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_snapshot() {
        assert!(parse_snapshot("[]").unwrap().is_empty());
    }

    #[test]
    fn test_snapshot_with_duplicate_ids_is_rejected() {
        let json = r#"[
            {"id":1,"title":"Shoe","price":100,"image":"","amount":1},
            {"id":1,"title":"Shoe","price":100,"image":"","amount":2}
        ]"#;

        let err = parse_snapshot(json).unwrap_err();
        assert!(matches!(err, ValidationError::Duplicate { .. }));
    }

    #[test]
    fn test_snapshot_with_zero_amount_is_rejected() {
        let json = r#"[{"id":1,"title":"Shoe","price":100,"image":"","amount":0}]"#;

        let err = parse_snapshot(json).unwrap_err();
        assert!(matches!(err, ValidationError::MustBePositive { .. }));
    }

    #[test]
    fn test_snapshot_must_be_an_array() {
        let err = parse_snapshot(r#"{"id":1}"#).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }
}
