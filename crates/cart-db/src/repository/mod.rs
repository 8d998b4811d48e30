//! # Repository Module
//!
//! Data access for the key-value table.
//!
//! ## Pattern
//! Each repository owns a clone of the pool (cheap, reference counted) and
//! exposes typed methods. Callers get repositories from [`crate::Database`]:
//!
//! ```rust,ignore
//! let cart = db.snapshots().load("@RocketShoes:cart").await?;
//! ```

pub mod snapshot;
