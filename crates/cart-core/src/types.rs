//! # Domain Types
//!
//! Core domain types shared by the store, the persistence layer and views.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌──────────────────────┐  │
//! │  │    Product      │   │     Stock       │   │ UpdateProductAmount  │  │
//! │  │  ─────────────  │   │  ─────────────  │   │  ──────────────────  │  │
//! │  │  id             │   │  product_id     │   │  product_id          │  │
//! │  │  name  (title)  │   │  amount         │   │  amount (signed)     │  │
//! │  │  price (Money)  │   │  (available)    │   │  (transient command) │  │
//! │  │  image_url      │   └─────────────────┘   └──────────────────────┘  │
//! │  │  amount (held)  │                                                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Names
//! Field names follow the storefront API (`title`, `image`), so the same
//! types decode catalog responses and encode the persisted snapshot.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product Id
// =============================================================================

/// Integer product identifier, serialized as a bare JSON number.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct ProductId(#[ts(type = "number")] u64);

impl ProductId {
    #[inline]
    pub const fn new(id: u64) -> Self {
        ProductId(id)
    }

    #[inline]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        ProductId(id)
    }
}

impl std::str::FromStr for ProductId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ProductId)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product, as returned by the catalog and as held in the cart.
///
/// `amount` is cart state stored inline on the record: the quantity the
/// shopper holds. Catalog responses omit it, so it decodes to 0 and the
/// store sets it to 1 when the product first enters the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    pub id: ProductId,

    /// Display name.
    #[serde(rename = "title", alias = "name")]
    pub name: String,

    /// Unit price.
    #[ts(type = "number")]
    pub price: Money,

    /// Product image.
    #[serde(rename = "image", alias = "imageUrl", default)]
    pub image_url: String,

    /// Quantity held in the cart.
    #[serde(default)]
    #[ts(type = "number")]
    pub amount: i64,
}

impl Product {
    /// Creates a catalog product (amount 0, not yet in a cart).
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Money,
        image_url: impl Into<String>,
    ) -> Self {
        Product {
            id,
            name: name.into(),
            price,
            image_url: image_url.into(),
            amount: 0,
        }
    }

    /// Returns a copy holding `amount` units.
    pub fn with_amount(mut self, amount: i64) -> Self {
        self.amount = amount;
        self
    }
}

// =============================================================================
// Stock
// =============================================================================

/// Units available for a product, as reported by the stock source.
///
/// Read-only: the cart never writes stock back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Stock {
    pub product_id: ProductId,

    #[ts(type = "number")]
    pub amount: i64,
}

impl Stock {
    pub const fn new(product_id: ProductId, amount: i64) -> Self {
        Stock { product_id, amount }
    }
}

// =============================================================================
// Update Request
// =============================================================================

/// Request to set the held amount of a cart line.
///
/// `amount` is signed: zero and negative requests are representable and are
/// ignored by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,

    #[ts(type = "number")]
    pub amount: i64,
}

impl UpdateProductAmount {
    pub const fn new(product_id: ProductId, amount: i64) -> Self {
        UpdateProductAmount { product_id, amount }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_decodes_catalog_response() {
        let json = r#"{
            "id": 1,
            "title": "Tênis de Caminhada Leve Confortável",
            "price": 179.9,
            "image": "https://example.com/shoe.jpg"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.name, "Tênis de Caminhada Leve Confortável");
        assert_eq!(product.price, Money::from_cents(17_990));
        assert_eq!(product.image_url, "https://example.com/shoe.jpg");
        assert_eq!(product.amount, 0);
    }

    #[test]
    fn test_product_accepts_alternate_field_names() {
        let json = r#"{ "id": 1, "name": "Shoe", "price": 100, "imageUrl": "shoe.png", "amount": 2 }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.name, "Shoe");
        assert_eq!(product.image_url, "shoe.png");
        assert_eq!(product.amount, 2);
    }

    #[test]
    fn test_product_encodes_storefront_field_names() {
        let product =
            Product::new(ProductId::new(3), "Shoe", Money::from_cents(10_000), "shoe.png")
                .with_amount(1);

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 3,
                "title": "Shoe",
                "price": 100,
                "image": "shoe.png",
                "amount": 1
            })
        );
    }

    #[test]
    fn test_update_request_uses_camel_case() {
        let request: UpdateProductAmount =
            serde_json::from_str(r#"{ "productId": 4, "amount": -1 }"#).unwrap();
        assert_eq!(request, UpdateProductAmount::new(ProductId::new(4), -1));
    }

    #[test]
    fn test_product_id_parsing() {
        assert_eq!(" 42 ".parse::<ProductId>().unwrap(), ProductId::new(42));
        assert!("abc".parse::<ProductId>().is_err());
    }
}
