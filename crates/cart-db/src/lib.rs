//! # cart-db: Snapshot Persistence for rocket-cart
//!
//! Durable key-value storage for the cart snapshot, backed by SQLite through
//! sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        rocket-cart Data Flow                            │
//! │                                                                         │
//! │  CartStore (after every mutation)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     cart-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐   ┌────────────┐ │   │
//! │  │   │   Database    │    │    Repository      │   │ Migrations │ │   │
//! │  │   │   (pool.rs)   │◄───│   (snapshot.rs)    │   │ (embedded) │ │   │
//! │  │   │  SqlitePool   │    │ load(key)          │   │ 001_kv_... │ │   │
//! │  │   │               │    │ save(key, &Cart)   │   │            │ │   │
//! │  │   └───────────────┘    └────────────────────┘   └────────────┘ │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  kv_store table:  "@RocketShoes:cart" → "[{...},{...}]"               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Snapshot repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cart_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/cart.db")).await?;
//!
//! let snapshots = db.snapshots();
//! snapshots.save("@RocketShoes:cart", &cart).await?;
//! let restored = snapshots.load("@RocketShoes:cart").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::snapshot::SnapshotRepository;
