//! # Cart
//!
//! The ordered, unique-by-id collection of line items, and the stock
//! decisions the store applies before changing it.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Transitions (pure)                              │
//! │                                                                         │
//! │  Store Operation          Cart Method              Result               │
//! │  ───────────────          ───────────              ──────               │
//! │                                                                         │
//! │  add (new product) ──────► push_new(product) ────► new Cart             │
//! │                                                                         │
//! │  add (held) / update ────► with_amount(id, n) ───► new Cart             │
//! │                                                                         │
//! │  remove ─────────────────► without(id) ──────────► new Cart             │
//! │                                                                         │
//! │  NOTE: Every method returns a new Cart. The store persists it first   │
//! │        and installs it only after the write succeeds.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Every held product has `amount >= 1`
//! - At most one line per product id
//! - Insertion order is kept (display order)

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{Product, ProductId, Stock};
use crate::validation;

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// Serialized as a bare JSON array of products; that array is the persisted
/// snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<Product>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Builds a cart from products, checking the invariants.
    pub fn from_products(items: Vec<Product>) -> Result<Self, ValidationError> {
        let cart = Cart { items };
        cart.validate()?;
        Ok(cart)
    }

    /// Checks the cart invariants (positive amounts, unique ids).
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_items(&self.items)
    }

    /// Line items in display order.
    pub fn products(&self) -> &[Product] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.items.iter()
    }

    pub fn get(&self, product_id: ProductId) -> Option<&Product> {
        self.items.iter().find(|p| p.id == product_id)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Returns the held amount of a product, if it is in the cart.
    pub fn amount_of(&self, product_id: ProductId) -> Option<i64> {
        self.get(product_id).map(|p| p.amount)
    }

    /// Returns the number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the total number of held units across all lines, saturating
    /// at `i64::MAX`.
    pub fn total_amount(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |total, p| total.saturating_add(p.amount))
    }

    /// Returns a cart with `product` appended.
    ///
    /// ## Errors
    /// - `DuplicateProduct` if the id is already held
    /// - `Validation` if the product holds less than one unit
    pub fn push_new(&self, product: Product) -> CoreResult<Cart> {
        if self.contains(product.id) {
            return Err(CoreError::DuplicateProduct(product.id));
        }
        validation::validate_amount(product.amount)?;

        let mut items = self.items.clone();
        items.push(product);
        Ok(Cart { items })
    }

    /// Returns a cart where `product_id` holds `amount` units.
    ///
    /// The line keeps its position.
    pub fn with_amount(&self, product_id: ProductId, amount: i64) -> CoreResult<Cart> {
        validation::validate_amount(amount)?;
        if !self.contains(product_id) {
            return Err(CoreError::NotInCart(product_id));
        }

        let items = self
            .items
            .iter()
            .map(|p| {
                if p.id == product_id {
                    p.clone().with_amount(amount)
                } else {
                    p.clone()
                }
            })
            .collect();
        Ok(Cart { items })
    }

    /// Returns a cart without `product_id`.
    pub fn without(&self, product_id: ProductId) -> CoreResult<Cart> {
        if !self.contains(product_id) {
            return Err(CoreError::NotInCart(product_id));
        }

        let items = self
            .items
            .iter()
            .filter(|p| p.id != product_id)
            .cloned()
            .collect();
        Ok(Cart { items })
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// =============================================================================
// Stock Decisions
// =============================================================================

/// How `add_product` compares stock against a product already in the cart.
///
/// ```text
/// held = 3
///
///   stock │ Literal          │ Strict
///   ──────┼──────────────────┼──────────────────
///     2   │ recheck as 4 ✗   │ out of stock ✗
///     3   │ out of stock ✗   │ out of stock ✗
///     5   │ recheck as 4 ✓   │ apply 4 ✓
/// ```
///
/// `Literal` only refuses when stock equals the held amount and hands every
/// other case to the update path, which fetches stock again and refuses when
/// it is below the request. `Strict` refuses whenever one more unit cannot be
/// satisfied and reuses the stock it already has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockCheck {
    #[default]
    Literal,
    Strict,
}

impl std::fmt::Display for StockCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockCheck::Literal => write!(f, "literal"),
            StockCheck::Strict => write!(f, "strict"),
        }
    }
}

impl std::str::FromStr for StockCheck {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "literal" => Ok(StockCheck::Literal),
            "strict" => Ok(StockCheck::Strict),
            other => Err(ValidationError::InvalidFormat {
                field: "stock_check".to_string(),
                reason: format!("unknown mode '{}', expected literal or strict", other),
            }),
        }
    }
}

/// What `add_product` does with a product already held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Increment {
    /// Run the update path for `amount` (fetches stock again).
    Recheck { amount: i64 },
    /// Set `amount` directly; stock has been checked.
    Apply { amount: i64 },
}

/// Decides whether a held product can take one more unit.
///
/// A line already at `i64::MAX` can never grow and is refused as out of stock.
pub fn check_increment(stock: &Stock, current: i64, mode: StockCheck) -> CoreResult<Increment> {
    let Some(requested) = current.checked_add(1) else {
        return Err(CoreError::InsufficientStock {
            product_id: stock.product_id,
            available: stock.amount,
            requested: i64::MAX,
        });
    };
    let refused = match mode {
        StockCheck::Literal => stock.amount == current,
        StockCheck::Strict => stock.amount <= current,
    };

    if refused {
        return Err(CoreError::InsufficientStock {
            product_id: stock.product_id,
            available: stock.amount,
            requested,
        });
    }

    Ok(match mode {
        StockCheck::Literal => Increment::Recheck { amount: requested },
        StockCheck::Strict => Increment::Apply { amount: requested },
    })
}

/// Refuses a requested amount above available stock.
pub fn check_requested(stock: &Stock, requested: i64) -> CoreResult<()> {
    if stock.amount < requested {
        return Err(CoreError::InsufficientStock {
            product_id: stock.product_id,
            available: stock.amount,
            requested,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn product(id: u64, amount: i64) -> Product {
        Product::new(
            ProductId::new(id),
            format!("Product {}", id),
            Money::from_cents(10_000),
            format!("https://example.com/{}.jpg", id),
        )
        .with_amount(amount)
    }

    fn id(n: u64) -> ProductId {
        ProductId::new(n)
    }

    #[test]
    fn test_push_new_appends_in_order() {
        let cart = Cart::new()
            .push_new(product(2, 1))
            .unwrap()
            .push_new(product(1, 1))
            .unwrap();

        let ids: Vec<_> = cart.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_push_new_rejects_duplicates() {
        let cart = Cart::new().push_new(product(1, 1)).unwrap();

        let err = cart.push_new(product(1, 1)).unwrap_err();
        assert_eq!(err, CoreError::DuplicateProduct(id(1)));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_push_new_rejects_zero_amount() {
        let err = Cart::new().push_new(product(1, 0)).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_with_amount_keeps_position_and_leaves_original() {
        let cart = Cart::from_products(vec![product(1, 1), product(2, 1)]).unwrap();

        let updated = cart.with_amount(id(1), 3).unwrap();

        assert_eq!(updated.amount_of(id(1)), Some(3));
        assert_eq!(updated.products()[0].id, id(1));
        assert_eq!(cart.amount_of(id(1)), Some(1));
    }

    #[test]
    fn test_with_amount_unknown_product() {
        let err = Cart::new().with_amount(id(9), 2).unwrap_err();
        assert_eq!(err, CoreError::NotInCart(id(9)));
    }

    #[test]
    fn test_without() {
        let cart = Cart::from_products(vec![product(1, 2), product(2, 1)]).unwrap();

        let removed = cart.without(id(1)).unwrap();
        assert_eq!(removed.len(), 1);
        assert!(!removed.contains(id(1)));

        assert_eq!(
            Cart::new().without(id(99)).unwrap_err(),
            CoreError::NotInCart(id(99))
        );
    }

    #[test]
    fn test_total_amount() {
        let cart = Cart::from_products(vec![product(1, 2), product(2, 3)]).unwrap();
        assert_eq!(cart.total_amount(), 5);
        assert_eq!(Cart::new().total_amount(), 0);
    }

    #[test]
    fn test_total_amount_saturates() {
        let half = i64::MAX / 2 + 1;
        let cart = Cart::from_products(vec![product(1, half), product(2, half)]).unwrap();
        assert_eq!(cart.total_amount(), i64::MAX);
    }

    #[test]
    fn test_serializes_as_bare_array() {
        let cart = Cart::from_products(vec![product(1, 2)]).unwrap();
        let json = serde_json::to_string(&cart).unwrap();
        assert!(json.starts_with('['));
    }

    #[test]
    fn test_literal_check_only_refuses_equal_stock() {
        let held = 3;

        let equal = check_increment(&Stock::new(id(1), 3), held, StockCheck::Literal);
        assert!(matches!(
            equal,
            Err(CoreError::InsufficientStock { available: 3, requested: 4, .. })
        ));

        let below = check_increment(&Stock::new(id(1), 2), held, StockCheck::Literal);
        assert_eq!(below.unwrap(), Increment::Recheck { amount: 4 });

        let above = check_increment(&Stock::new(id(1), 5), held, StockCheck::Literal);
        assert_eq!(above.unwrap(), Increment::Recheck { amount: 4 });
    }

    #[test]
    fn test_strict_check_refuses_unsatisfiable_increments() {
        let held = 3;

        assert!(check_increment(&Stock::new(id(1), 2), held, StockCheck::Strict).is_err());
        assert!(check_increment(&Stock::new(id(1), 3), held, StockCheck::Strict).is_err());
        assert_eq!(
            check_increment(&Stock::new(id(1), 4), held, StockCheck::Strict).unwrap(),
            Increment::Apply { amount: 4 }
        );
    }

    #[test]
    fn test_increment_refused_at_max_amount() {
        for mode in [StockCheck::Literal, StockCheck::Strict] {
            let result = check_increment(&Stock::new(id(1), 5), i64::MAX, mode);
            assert!(matches!(
                result,
                Err(CoreError::InsufficientStock { available: 5, requested: i64::MAX, .. })
            ));
        }
    }

    #[test]
    fn test_check_requested() {
        let stock = Stock::new(id(1), 10);
        assert!(check_requested(&stock, 10).is_ok());
        assert!(check_requested(&stock, 11).is_err());
    }

    #[test]
    fn test_stock_check_parsing() {
        assert_eq!("literal".parse::<StockCheck>().unwrap(), StockCheck::Literal);
        assert_eq!("STRICT".parse::<StockCheck>().unwrap(), StockCheck::Strict);
        assert!("loose".parse::<StockCheck>().is_err());
    }
}
