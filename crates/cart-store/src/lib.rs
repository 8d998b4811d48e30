//! # cart-store: Cart State for rocket-cart
//!
//! Owns every mutation of the cart: checks stock, fetches catalog data,
//! persists the snapshot and reports failures to the shopper.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         cart-store Architecture                         │
//! │                                                                         │
//! │   consumer ──► CartStore ──┬──► StockOracle    ─┐                       │
//! │      ▲            │        ├──► ProductCatalog ─┴─ HttpCatalog (reqwest)│
//! │      │            │        └──► SnapshotStore  ── SqliteSnapshotStore   │
//! │      │            │                               MemorySnapshotStore   │
//! │      │            └──► Notifier (failure messages)                      │
//! │      │                                                                  │
//! │      └── cart() / subscribe()  (watch channel)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`store`] - `CartStore` and its operations
//! - [`ports`] - Collaborator traits
//! - [`http`] - Storefront API client
//! - [`persistence`] - Snapshot store implementations
//! - [`notifier`] - Notifiers and shopper-facing messages
//! - [`config`] - TOML/env configuration
//! - [`error`] - Store error types
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use cart_core::ProductId;
//! use cart_db::{Database, DbConfig};
//! use cart_store::{
//!     CartConfig, CartStore, HttpCatalog, SqliteSnapshotStore, StoreSettings, TracingNotifier,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CartConfig::load(None)?;
//! let db = Database::new(DbConfig::new(config.database_path()?)).await?;
//!
//! let store = CartStore::init(
//!     HttpCatalog::new(&config.api.base_url, config.timeout())?,
//!     SqliteSnapshotStore::new(db.snapshots(), &config.storage.snapshot_key),
//!     Arc::new(TracingNotifier),
//!     StoreSettings::from(&config),
//! )
//! .await;
//!
//! store.add_product(ProductId::new(1)).await;
//! println!("{} units in cart", store.cart().total_amount());
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod http;
pub mod notifier;
pub mod persistence;
pub mod ports;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::CartConfig;
pub use error::{StoreError, StoreResult};
pub use http::HttpCatalog;
pub use notifier::{Locale, Messages, Notifier, Operation, RecordingNotifier, TracingNotifier};
pub use persistence::{MemorySnapshotStore, SqliteSnapshotStore};
pub use ports::{ProductCatalog, SnapshotStore, StockOracle};
pub use store::{CartStore, Mutation, StoreSettings};
