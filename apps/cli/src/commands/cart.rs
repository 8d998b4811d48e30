//! # Cart Commands
//!
//! One store per invocation: load config, open the database, restore the
//! snapshot, run the operation, print the cart.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use cart_core::{Cart, ProductId, UpdateProductAmount};
use cart_db::{Database, DbConfig};
use cart_store::{CartConfig, CartStore, HttpCatalog, SqliteSnapshotStore, StoreSettings};

use super::Output;
use crate::console::ConsoleNotifier;

type AppStore = CartStore<HttpCatalog, SqliteSnapshotStore>;

type CmdResult = Result<i32, Box<dyn std::error::Error>>;

/// Builds the store described by the config file and environment.
async fn open_store(
    config_path: Option<PathBuf>,
) -> Result<(AppStore, Arc<ConsoleNotifier>, Database), Box<dyn std::error::Error>> {
    let config = CartConfig::load(config_path)?;

    let database_path = config.database_path()?;
    if let Some(parent) = database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let db = Database::new(DbConfig::new(database_path)).await?;

    let api = HttpCatalog::new(&config.api.base_url, config.timeout())?;
    let snapshots = SqliteSnapshotStore::new(db.snapshots(), config.storage.snapshot_key.clone());
    let notifier = Arc::new(ConsoleNotifier::new());

    let store = CartStore::init(api, snapshots, notifier.clone(), StoreSettings::from(&config)).await;
    debug!(?store, "Store ready");

    Ok((store, notifier, db))
}

/// Prints the cart and closes the database.
async fn finish(store: &AppStore, notifier: &ConsoleNotifier, db: Database, output: Output) -> CmdResult {
    print!("{}", render(&store.cart(), output)?);
    db.close().await;

    Ok(if notifier.fired() > 0 { 1 } else { 0 })
}

pub async fn show(config_path: Option<PathBuf>, output: Output) -> CmdResult {
    let (store, notifier, db) = open_store(config_path).await?;
    finish(&store, &notifier, db, output).await
}

pub async fn add(config_path: Option<PathBuf>, output: Output, id: u64) -> CmdResult {
    let (store, notifier, db) = open_store(config_path).await?;
    store.add_product(ProductId::new(id)).await;
    finish(&store, &notifier, db, output).await
}

pub async fn remove(config_path: Option<PathBuf>, output: Output, id: u64) -> CmdResult {
    let (store, notifier, db) = open_store(config_path).await?;
    store.remove_product(ProductId::new(id)).await;
    finish(&store, &notifier, db, output).await
}

pub async fn update(config_path: Option<PathBuf>, output: Output, id: u64, amount: i64) -> CmdResult {
    let (store, notifier, db) = open_store(config_path).await?;
    store
        .update_product_amount(UpdateProductAmount::new(ProductId::new(id), amount))
        .await;
    finish(&store, &notifier, db, output).await
}

// =============================================================================
// Rendering
// =============================================================================

/// Renders the cart as a table or a JSON array.
///
/// ```text
///   ID  PRODUCT                                   PRICE   QTY
///    1  Tênis de Caminhada Leve Confortável      179.90     2
///    3  Tênis Adidas Duramo Lite 2.0             219.90     1
///   ─────────────────────────────────────────────────────────
///   3 units, 2 products
/// ```
fn render(cart: &Cart, output: Output) -> Result<String, Box<dyn std::error::Error>> {
    if output == Output::Json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(cart)?));
    }

    if cart.is_empty() {
        return Ok("Cart is empty\n".to_string());
    }

    let mut out = String::new();
    writeln!(out, "{:>4}  {:<40} {:>8} {:>5}", "ID", "PRODUCT", "PRICE", "QTY")?;
    for product in cart {
        writeln!(
            out,
            "{:>4}  {:<40} {:>8} {:>5}",
            product.id.get(),
            truncate(&product.name, 40),
            product.price.to_string(),
            product.amount
        )?;
    }
    writeln!(out, "{}", "─".repeat(60))?;
    writeln!(
        out,
        "{} units, {} products",
        cart.total_amount(),
        cart.len()
    )?;
    Ok(out)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut cut: String = s.chars().take(max - 1).collect();
    cut.push('…');
    cut
}
