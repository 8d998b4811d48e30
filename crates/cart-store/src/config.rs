//! # Cart Configuration
//!
//! Where the storefront API lives, where the cart is persisted, and how the
//! store talks to the shopper.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CART_API_URL=http://localhost:3333/                                │
//! │     CART_STOCK_CHECK=strict                                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/rocket-cart/cart.toml (Linux)                            │
//! │     ~/Library/Application Support/com.rocketseat.rocket-cart/cart.toml │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # cart.toml
//! [api]
//! base_url = "http://localhost:3333/"
//! timeout_secs = 10
//!
//! [storage]
//! database_path = "/home/me/.local/share/rocket-cart/cart.db"
//! snapshot_key = "@RocketShoes:cart"
//!
//! [behavior]
//! stock_check = "literal"  # literal | strict
//!
//! [messages]
//! locale = "pt-BR"         # en | pt-BR
//! out_of_stock = "Sold out"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use cart_core::{StockCheck, DEFAULT_SNAPSHOT_KEY};

use crate::error::{StoreError, StoreResult};
use crate::notifier::{Locale, Messages};

// =============================================================================
// API Settings
// =============================================================================

/// Storefront API connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL; `stock/{id}` and `products/{id}` are resolved against it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3333/".to_string()
}

fn default_timeout() -> u64 {
    10
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

// =============================================================================
// Storage Settings
// =============================================================================

/// Snapshot persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// SQLite file. Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Key the cart snapshot is stored under.
    #[serde(default = "default_snapshot_key")]
    pub snapshot_key: String,
}

fn default_snapshot_key() -> String {
    DEFAULT_SNAPSHOT_KEY.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            database_path: None,
            snapshot_key: default_snapshot_key(),
        }
    }
}

// =============================================================================
// Behavior Settings
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BehaviorSettings {
    /// Stock comparison used when adding a product already in the cart.
    #[serde(default)]
    pub stock_check: StockCheck,
}

// =============================================================================
// Message Settings
// =============================================================================

/// Shopper-facing messages: a locale preset plus per-message overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageSettings {
    #[serde(default)]
    pub locale: Locale,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_of_stock: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_failed: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_failed: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_failed: Option<String>,
}

impl MessageSettings {
    /// Resolves the locale preset with overrides applied.
    pub fn resolve(&self) -> Messages {
        let mut messages = Messages::for_locale(self.locale);
        if let Some(ref m) = self.out_of_stock {
            messages.out_of_stock = m.clone();
        }
        if let Some(ref m) = self.add_failed {
            messages.add_failed = m.clone();
        }
        if let Some(ref m) = self.remove_failed {
            messages.remove_failed = m.clone();
        }
        if let Some(ref m) = self.update_failed {
            messages.update_failed = m.clone();
        }
        messages
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete cart configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub behavior: BehaviorSettings,

    #[serde(default)]
    pub messages: MessageSettings,
}

impl CartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (cart.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading cart config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load cart config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StoreError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| StoreError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Cart config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        let url = url::Url::parse(&self.api.base_url)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(StoreError::InvalidUrl(format!(
                "API URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(StoreError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.storage.snapshot_key.trim().is_empty() {
            return Err(StoreError::InvalidConfig(
                "snapshot_key must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("CART_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Ok(secs) = std::env::var("CART_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(s) => self.api.timeout_secs = s,
                Err(_) => warn!(value = %secs, "Ignoring non-numeric CART_TIMEOUT_SECS"),
            }
        }

        if let Ok(path) = std::env::var("CART_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.database_path = Some(PathBuf::from(path));
        }

        if let Ok(key) = std::env::var("CART_SNAPSHOT_KEY") {
            self.storage.snapshot_key = key;
        }

        if let Ok(mode) = std::env::var("CART_STOCK_CHECK") {
            match mode.parse() {
                Ok(parsed) => {
                    debug!(mode = %mode, "Overriding stock check from environment");
                    self.behavior.stock_check = parsed;
                }
                Err(_) => warn!(mode = %mode, "Unknown stock check mode in environment"),
            }
        }

        if let Ok(locale) = std::env::var("CART_LOCALE") {
            match locale.parse() {
                Ok(parsed) => self.messages.locale = parsed,
                Err(_) => warn!(locale = %locale, "Unknown locale in environment"),
            }
        }
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "rocketseat", "rocket-cart")
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("cart.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Returns the database file, falling back to the platform data directory.
    pub fn database_path(&self) -> StoreResult<PathBuf> {
        if let Some(ref path) = self.storage.database_path {
            return Ok(path.clone());
        }
        Self::project_dirs()
            .map(|dirs| dirs.data_dir().join("cart.db"))
            .ok_or_else(|| StoreError::InvalidConfig("No data directory available".into()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn stock_check(&self) -> StockCheck {
        self.behavior.stock_check
    }

    pub fn resolved_messages(&self) -> Messages {
        self.messages.resolve()
    }
}
