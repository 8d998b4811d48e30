//! # Snapshot Repository
//!
//! Key-value persistence of the whole cart.
//!
//! ## Storage Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  kv_store                                                               │
//! │  ─────────────────────────────────────────────────────────────────────  │
//! │  key                  │ value                          │ updated_at     │
//! │  "@RocketShoes:cart"  │ [{"id":1,...,"amount":2}, ...] │ 2026-10-18...  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One row per key. Every save overwrites the whole value; there is no
//! per-item storage, no versioning and no delete.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use cart_core::validation::parse_snapshot;
use cart_core::Cart;

use crate::error::{DbError, DbResult};

/// Repository for cart snapshots.
#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    pool: SqlitePool,
}

impl SnapshotRepository {
    /// Creates a new SnapshotRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SnapshotRepository { pool }
    }

    /// Loads the cart stored under `key`.
    ///
    /// ## Returns
    /// - `Ok(None)` if nothing was ever saved under `key`
    /// - `Err(DbError::InvalidSnapshot)` if the stored value is not a valid cart
    pub async fn load(&self, key: &str) -> DbResult<Option<Cart>> {
        let Some(value) = self.load_raw(key).await? else {
            debug!(key = %key, "No snapshot stored");
            return Ok(None);
        };

        let cart = parse_snapshot(&value).map_err(|source| DbError::InvalidSnapshot {
            key: key.to_string(),
            source,
        })?;

        debug!(key = %key, items = cart.len(), "Snapshot loaded");
        Ok(Some(cart))
    }

    /// Loads the raw stored value under `key`.
    pub async fn load_raw(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    /// Overwrites the value under `key` with `cart`.
    pub async fn save(&self, key: &str, cart: &Cart) -> DbResult<()> {
        let value = serde_json::to_string(cart)?;
        self.save_raw(key, &value).await?;

        debug!(key = %key, items = cart.len(), "Snapshot saved");
        Ok(())
    }

    /// Overwrites the raw value under `key`.
    pub async fn save_raw(&self, key: &str, value: &str) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use cart_core::{Money, Product, ProductId};

    const KEY: &str = "@RocketShoes:cart";

    async fn repo() -> SnapshotRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().snapshots()
    }

    fn cart(amounts: &[(u64, i64)]) -> Cart {
        let items = amounts
            .iter()
            .map(|&(id, amount)| {
                Product::new(
                    ProductId::new(id),
                    format!("Shoe {}", id),
                    Money::from_cents(17_990),
                    "shoe.jpg",
                )
                .with_amount(amount)
            })
            .collect();
        Cart::from_products(items).unwrap()
    }

    #[tokio::test]
    async fn test_load_missing_key() {
        let repo = repo().await;
        assert!(repo.load(KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load_keeps_order_and_amounts() {
        let repo = repo().await;
        let saved = cart(&[(3, 1), (1, 4), (2, 2)]);

        repo.save(KEY, &saved).await.unwrap();

        assert_eq!(repo.load(KEY).await.unwrap(), Some(saved));
    }

    #[tokio::test]
    async fn test_round_trip_over_varied_carts() {
        let cases: &[&[(u64, &str, i64, i64)]] = &[
            &[(1, "Tênis de Caminhada Leve Confortável", 17_990, 1)],
            &[(7, "Penny", 1, 3), (2, "Nickel", 5, 1), (9, "Ninety-nine", 99, 12)],
            &[(4, "Sapato Social Couro Marrom", 10_000, 2), (3, "靴 ランニング", 13_990, 1)],
            &[(10, "", 0, 1), (5, "Emoji 👟 \"quoted\"", 12_345_678_901, 4_000)],
            &[(1_000_000, "Ελαφρύ παπούτσι", 100, i64::MAX), (1, "Shoe", 250, 1)],
        ];

        let repo = repo().await;
        for lines in cases {
            let saved = Cart::from_products(
                lines
                    .iter()
                    .map(|&(id, name, cents, amount)| {
                        Product::new(ProductId::new(id), name, Money::from_cents(cents), "shoe.jpg")
                            .with_amount(amount)
                    })
                    .collect(),
            )
            .unwrap();

            repo.save(KEY, &saved).await.unwrap();

            assert_eq!(repo.load(KEY).await.unwrap(), Some(saved), "case {:?}", lines);
        }
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_value() {
        let repo = repo().await;

        repo.save(KEY, &cart(&[(1, 1), (2, 1)])).await.unwrap();
        repo.save(KEY, &cart(&[(2, 5)])).await.unwrap();

        let loaded = repo.load(KEY).await.unwrap().unwrap();
        assert_eq!(loaded, cart(&[(2, 5)]));
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let repo = repo().await;

        repo.save(KEY, &cart(&[(1, 1)])).await.unwrap();

        assert!(repo.load("@OtherShop:cart").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalid_stored_value() {
        let repo = repo().await;
        repo.save_raw(KEY, "{ not a cart").await.unwrap();

        let err = repo.load(KEY).await.unwrap_err();
        assert!(matches!(err, DbError::InvalidSnapshot { .. }));
    }

    #[tokio::test]
    async fn test_stored_value_is_a_json_array() {
        let repo = repo().await;
        repo.save(KEY, &cart(&[(1, 2)])).await.unwrap();

        let raw = repo.load_raw(KEY).await.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["amount"], 2);
        assert_eq!(value[0]["title"], "Shoe 1");
    }
}
