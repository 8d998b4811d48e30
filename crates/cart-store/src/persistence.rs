//! # Snapshot Stores
//!
//! `SnapshotStore` implementations: SQLite for real sessions, memory for
//! tests and throwaway sessions.

use std::sync::Mutex;

use cart_core::validation::parse_snapshot;
use cart_core::Cart;
use cart_db::{DbError, SnapshotRepository};

use crate::error::{StoreError, StoreResult};
use crate::ports::SnapshotStore;

// =============================================================================
// SQLite
// =============================================================================

/// Persists the cart in the `kv_store` table under one key.
#[derive(Debug, Clone)]
pub struct SqliteSnapshotStore {
    repo: SnapshotRepository,
    key: String,
}

impl SqliteSnapshotStore {
    pub fn new(repo: SnapshotRepository, key: impl Into<String>) -> Self {
        SqliteSnapshotStore {
            repo,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl SnapshotStore for SqliteSnapshotStore {
    async fn load(&self) -> StoreResult<Option<Cart>> {
        Ok(self.repo.load(&self.key).await?)
    }

    async fn save(&self, cart: &Cart) -> StoreResult<()> {
        Ok(self.repo.save(&self.key, cart).await?)
    }
}

// =============================================================================
// Memory
// =============================================================================

/// Keeps the snapshot as a JSON string in memory.
///
/// Holding the encoded form means loads go through the same decoding and
/// validation as the SQLite store.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    value: Mutex<Option<String>>,
    saves: Mutex<usize>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `raw` already stored, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        MemorySnapshotStore {
            value: Mutex::new(Some(raw.into())),
            saves: Mutex::new(0),
        }
    }

    /// Returns the stored JSON, if any.
    pub fn raw(&self) -> Option<String> {
        self.value.lock().ok().and_then(|v| v.clone())
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.lock().map(|n| *n).unwrap_or_default()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    async fn load(&self) -> StoreResult<Option<Cart>> {
        let Some(raw) = self.raw() else {
            return Ok(None);
        };

        let cart = parse_snapshot(&raw).map_err(|source| DbError::InvalidSnapshot {
            key: "memory".to_string(),
            source,
        })?;
        Ok(Some(cart))
    }

    async fn save(&self, cart: &Cart) -> StoreResult<()> {
        let raw = serde_json::to_string(cart).map_err(DbError::from)?;

        let mut value = self
            .value
            .lock()
            .map_err(|_| StoreError::Persistence(DbError::Internal("snapshot lock poisoned".into())))?;
        *value = Some(raw);

        if let Ok(mut saves) = self.saves.lock() {
            *saves += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cart_core::{Money, Product, ProductId};
    use cart_db::{Database, DbConfig};

    fn one_item_cart() -> Cart {
        let shoe = Product::new(ProductId::new(1), "Shoe", Money::from_cents(9_990), "shoe.jpg")
            .with_amount(2);
        Cart::new().push_new(shoe).unwrap()
    }

    #[tokio::test]
    async fn test_sqlite_store_round_trip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = SqliteSnapshotStore::new(db.snapshots(), "@RocketShoes:cart");

        assert!(store.load().await.unwrap().is_none());

        store.save(&one_item_cart()).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(one_item_cart()));
    }

    #[tokio::test]
    async fn test_sqlite_store_reports_closed_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = SqliteSnapshotStore::new(db.snapshots(), "@RocketShoes:cart");
        db.close().await;

        let err = store.save(&one_item_cart()).await.unwrap_err();
        assert!(err.is_persistence());
    }

    #[tokio::test]
    async fn test_memory_store_counts_saves() {
        let store = MemorySnapshotStore::new();
        store.save(&Cart::new()).await.unwrap();
        store.save(&one_item_cart()).await.unwrap();

        assert_eq!(store.save_count(), 2);
        assert_eq!(store.load().await.unwrap(), Some(one_item_cart()));
    }

    #[tokio::test]
    async fn test_memory_store_rejects_invalid_raw_value() {
        let store = MemorySnapshotStore::with_raw(r#"[{"id":1,"title":"Shoe","price":1,"amount":0}]"#);

        let err = store.load().await.unwrap_err();
        assert!(err.is_persistence());
    }
}
