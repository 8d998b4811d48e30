//! # Collaborator Traits
//!
//! The seams between `CartStore` and the outside world.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         CartStore<A, P>                                 │
//! │                                                                         │
//! │     A: StockOracle + ProductCatalog         P: SnapshotStore            │
//! │        │                                       │                        │
//! │        ├── HttpCatalog (http.rs)               ├── SqliteSnapshotStore  │
//! │        └── test fakes                          └── MemorySnapshotStore  │
//! │                                                                         │
//! │     Arc<dyn Notifier>  (notifier.rs)                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The async traits return `Send` futures so a store can be driven from any
//! tokio worker thread.

use std::future::Future;
use std::sync::Arc;

use cart_core::{Cart, Product, ProductId, Stock};

use crate::error::StoreResult;

/// Reports units available for a product.
pub trait StockOracle: Send + Sync {
    fn stock(&self, product_id: ProductId) -> impl Future<Output = StoreResult<Stock>> + Send;
}

/// Reports canonical product data. The returned product holds amount 0.
pub trait ProductCatalog: Send + Sync {
    fn product(&self, product_id: ProductId)
        -> impl Future<Output = StoreResult<Product>> + Send;
}

/// Durable storage for the whole cart under one fixed key.
pub trait SnapshotStore: Send + Sync {
    /// Reads the persisted cart, `None` if nothing was saved yet.
    fn load(&self) -> impl Future<Output = StoreResult<Option<Cart>>> + Send;

    /// Overwrites the persisted cart.
    fn save(&self, cart: &Cart) -> impl Future<Output = StoreResult<()>> + Send;
}

impl<T: StockOracle> StockOracle for Arc<T> {
    fn stock(&self, product_id: ProductId) -> impl Future<Output = StoreResult<Stock>> + Send {
        (**self).stock(product_id)
    }
}

impl<T: ProductCatalog> ProductCatalog for Arc<T> {
    fn product(
        &self,
        product_id: ProductId,
    ) -> impl Future<Output = StoreResult<Product>> + Send {
        (**self).product(product_id)
    }
}

impl<T: SnapshotStore> SnapshotStore for Arc<T> {
    fn load(&self) -> impl Future<Output = StoreResult<Option<Cart>>> + Send {
        (**self).load()
    }

    fn save(&self, cart: &Cart) -> impl Future<Output = StoreResult<()>> + Send {
        (**self).save(cart)
    }
}
