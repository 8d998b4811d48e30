//! # CLI Commands
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  cart.rs   │ show, add, remove, update  → CartStore consumer forms      │
//! │  config.rs │ config show/path/init, status                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod config;

/// How a cart is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Table,
    Json,
}
