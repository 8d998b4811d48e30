//! Terminal notifier.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};

use cart_store::Notifier;

/// Prints shopper messages to stderr and counts them for the exit code.
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    fired: AtomicUsize,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fired(&self) -> usize {
        self.fired.load(Ordering::SeqCst)
    }
}

impl Notifier for ConsoleNotifier {
    fn notify_error(&self, message: &str) {
        self.fired.fetch_add(1, Ordering::SeqCst);
        // Nothing sensible to do if stderr is gone.
        let _ = writeln!(std::io::stderr(), "✗ {}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_notifications() {
        let notifier = ConsoleNotifier::new();
        assert_eq!(notifier.fired(), 0);

        notifier.notify_error("Requested quantity out of stock");
        notifier.notify_error("Error adding product");
        assert_eq!(notifier.fired(), 2);
    }
}
