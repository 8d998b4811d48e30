//! # rocket-cart CLI
//!
//! Drives the cart store from a terminal.
//!
//! ## Usage
//!
//! ```bash
//! # Show the cart
//! cart show
//!
//! # Add one unit of product 3, then set it to 2 units
//! cart add 3
//! cart update 3 2
//!
//! # Remove it, printing the cart as JSON
//! cart --json remove 3
//!
//! # Inspect configuration and storage
//! cart config show
//! cart status
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr)
//! 2. Load configuration (file < environment)
//! 3. Open the snapshot database and run migrations
//! 4. Restore the cart from its snapshot
//! 5. Run one command

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod commands;
mod console;

#[derive(Debug, Parser)]
#[command(name = "cart")]
#[command(author, version, about = "Storefront cart from the command line")]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the cart as JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the cart
    Show,
    /// Add one unit of a product
    Add {
        /// Product id
        id: u64,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        id: u64,
    },
    /// Set the amount held of a product
    Update {
        /// Product id
        id: u64,

        /// New amount; zero or less is ignored
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
    /// Inspect or write configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Show storage and API status
    Status,
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file path
    Path,
    /// Write the effective configuration to the config file
    Init,
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

/// Runs one command and returns the process exit code.
async fn run(cli: Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let output = if cli.json {
        commands::Output::Json
    } else {
        commands::Output::Table
    };

    match cli.command {
        Commands::Show => commands::cart::show(cli.config, output).await,
        Commands::Add { id } => commands::cart::add(cli.config, output, id).await,
        Commands::Remove { id } => commands::cart::remove(cli.config, output, id).await,
        Commands::Update { id, amount } => {
            commands::cart::update(cli.config, output, id, amount).await
        }
        Commands::Config { action } => {
            match action {
                ConfigAction::Show => commands::config::show(cli.config)?,
                ConfigAction::Path => commands::config::path(cli.config)?,
                ConfigAction::Init => commands::config::init(cli.config)?,
            }
            Ok(0)
        }
        Commands::Status => commands::config::status(cli.config).await,
    }
}

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "warn,cart_cli=info";

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=cart_store=trace` - Trace store internals
///
/// Logs go to stderr so stdout stays clean for `--json`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    log_subscriber(filter).init();
}

fn log_subscriber(filter: EnvFilter) -> impl tracing::Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_update_with_negative_amount() {
        let cli = Cli::try_parse_from(["cart", "update", "3", "-1"]).unwrap();
        assert!(matches!(cli.command, Commands::Update { id: 3, amount: -1 }));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["cart", "add", "7", "--json", "--config", "/tmp/c.toml"])
            .unwrap();
        assert!(cli.json);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
        assert!(matches!(cli.command, Commands::Add { id: 7 }));
    }

    #[test]
    fn test_config_subcommands() {
        let cli = Cli::try_parse_from(["cart", "config", "path"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Path
            }
        ));
    }

    #[test]
    fn test_rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["cart", "remove", "shoe"]).is_err());
        assert!(Cli::try_parse_from(["cart", "add"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_filter_silences_dependencies() {
        use tracing::Level;

        let subscriber = log_subscriber(EnvFilter::new(DEFAULT_LOG_FILTER));
        tracing::subscriber::with_default(subscriber, || {
            assert!(!tracing::enabled!(target: "sqlx::query", Level::TRACE));
            assert!(!tracing::enabled!(target: "reqwest::connect", Level::DEBUG));
            assert!(tracing::enabled!(target: "cart_cli", Level::INFO));
            assert!(!tracing::enabled!(target: "cart_cli", Level::DEBUG));
        });
    }

    #[test]
    fn test_explicit_filter_is_honored() {
        use tracing::Level;

        let subscriber = log_subscriber(EnvFilter::new("cart_store=trace"));
        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "cart_store::store", Level::TRACE));
            assert!(!tracing::enabled!(target: "sqlx::query", Level::INFO));
        });
    }
}
