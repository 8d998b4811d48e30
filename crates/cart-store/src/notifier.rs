//! # Notifier
//!
//! User-facing failure messages.
//!
//! ## Boundary Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 StoreError → message (per operation)                    │
//! │                                                                         │
//! │  Operation   InsufficientStock        anything else                     │
//! │  ─────────   ─────────────────        ─────────────                     │
//! │  Add         messages.out_of_stock    messages.add_failed               │
//! │  Remove      messages.out_of_stock    messages.remove_failed            │
//! │  Update      messages.out_of_stock    messages.update_failed            │
//! │                                                                         │
//! │  Not-found, transport and persistence errors are deliberately not       │
//! │  told apart for the shopper; the log line carries the precise cause.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::StoreError;

// =============================================================================
// Notifier Trait
// =============================================================================

/// One-way "show error message" channel. No acknowledgment.
pub trait Notifier: Send + Sync {
    fn notify_error(&self, message: &str);
}

/// Logs messages at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify_error(&self, message: &str) {
        warn!(target: "cart::notify", "{}", message);
    }
}

/// Collects messages in memory.
///
/// Useful for views that render a toast list, and in tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all messages received so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    /// Removes and returns all messages received so far.
    pub fn drain(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|mut m| std::mem::take(&mut *m))
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify_error(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

// =============================================================================
// Messages
// =============================================================================

/// Which consumer operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Remove,
    Update,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Add => write!(f, "add_product"),
            Operation::Remove => write!(f, "remove_product"),
            Operation::Update => write!(f, "update_product_amount"),
        }
    }
}

/// Built-in message sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "pt-BR")]
    PtBr,
}

impl std::str::FromStr for Locale {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "en-us" => Ok(Locale::En),
            "pt-br" | "pt" => Ok(Locale::PtBr),
            other => Err(StoreError::InvalidConfig(format!(
                "Unknown locale: '{}'. Valid options: en, pt-BR",
                other
            ))),
        }
    }
}

/// The literal strings shown to the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Messages {
    pub out_of_stock: String,
    pub add_failed: String,
    pub remove_failed: String,
    pub update_failed: String,
}

impl Messages {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::En => Messages {
                out_of_stock: "Requested quantity out of stock".to_string(),
                add_failed: "Error adding product".to_string(),
                remove_failed: "Error removing product".to_string(),
                update_failed: "Error changing product amount".to_string(),
            },
            Locale::PtBr => Messages {
                out_of_stock: "Quantidade solicitada fora de estoque".to_string(),
                add_failed: "Erro na adição do produto".to_string(),
                remove_failed: "Erro na remoção do produto".to_string(),
                update_failed: "Erro na alteração de quantidade do produto".to_string(),
            },
        }
    }

    /// Picks the message for a failed operation.
    pub fn for_error(&self, operation: Operation, err: &StoreError) -> &str {
        if err.is_stock_error() {
            return &self.out_of_stock;
        }
        match operation {
            Operation::Add => &self.add_failed,
            Operation::Remove => &self.remove_failed,
            Operation::Update => &self.update_failed,
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Messages::for_locale(Locale::En)
    }
}
