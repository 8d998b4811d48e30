//! # Config & Status Commands

use std::path::PathBuf;

use cart_db::{Database, DbConfig};
use cart_store::CartConfig;

type CmdResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Prints the effective configuration (file + environment) as TOML.
pub fn show(config_path: Option<PathBuf>) -> CmdResult {
    let config = CartConfig::load(config_path)?;
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

/// Prints the config file that would be read.
pub fn path(config_path: Option<PathBuf>) -> CmdResult {
    match config_path.or_else(CartConfig::default_config_path) {
        Some(path) => println!("{}", path.display()),
        None => return Err("no config directory available on this platform".into()),
    }
    Ok(())
}

/// Writes the effective configuration to the config file.
pub fn init(config_path: Option<PathBuf>) -> CmdResult {
    let config = CartConfig::load(config_path.clone())?;
    config.save(config_path)?;
    Ok(())
}

/// Reports where the cart lives and whether storage is usable.
///
/// ```text
/// API          http://localhost:3333/
/// Stock check  literal
/// Database     /home/me/.local/share/rocket-cart/cart.db
/// Migrations   1/1 applied
/// Health       ok
/// ```
pub async fn status(config_path: Option<PathBuf>) -> CmdResult<i32> {
    let config = CartConfig::load(config_path)?;
    let database_path = config.database_path()?;

    println!("{:<12} {}", "API", config.api.base_url);
    println!("{:<12} {}", "Stock check", config.stock_check());
    println!("{:<12} {}", "Snapshot key", config.storage.snapshot_key);
    println!("{:<12} {}", "Database", database_path.display());

    if !database_path.exists() {
        println!("{:<12} not created yet", "Health");
        return Ok(0);
    }

    let db = Database::new(DbConfig::new(database_path).run_migrations(false)).await?;
    let (total, applied) = db.migration_status().await?;
    let healthy = db.health_check().await;
    db.close().await;

    println!("{:<12} {}/{} applied", "Migrations", applied, total);
    println!("{:<12} {}", "Health", if healthy { "ok" } else { "failing" });

    Ok(if healthy && applied == total { 0 } else { 1 })
}
