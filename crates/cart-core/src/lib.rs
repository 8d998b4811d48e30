//! # cart-core: Pure Cart Rules
//!
//! Types and rules for the storefront cart, as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        rocket-cart Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Consumers (views, `cart` CLI)                   │   │
//! │  │    cart() / add_product / remove_product / update_amount        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                cart-store (CartStore, HTTP, config)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cart-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │  snapshot │  │   │
//! │  │   │   Stock   │  │  (cents)  │  │  stock    │  │  amounts  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Stock, UpdateProductAmount)
//! - [`money`] - Price type held in integer cents
//! - [`cart`] - The ordered, unique-by-id cart and stock decisions
//! - [`error`] - Domain error types
//! - [`validation`] - Amount and snapshot validation
//!
//! ## Example Usage
//!
//! ```rust
//! use cart_core::{Cart, Money, Product, ProductId};
//!
//! let shoe = Product::new(ProductId::new(1), "Shoe", Money::from_cents(10_000), "shoe.png")
//!     .with_amount(1);
//!
//! let cart = Cart::new().push_new(shoe).unwrap();
//! assert_eq!(cart.amount_of(ProductId::new(1)), Some(1));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{check_increment, check_requested, Cart, Increment, StockCheck};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default key under which the cart snapshot is persisted.
///
/// Namespaced so several storefront apps can share one key-value store.
pub const DEFAULT_SNAPSHOT_KEY: &str = "@RocketShoes:cart";
