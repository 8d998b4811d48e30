//! # Cart Store
//!
//! The single owner of cart state.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        One mutation, start to end                       │
//! │                                                                         │
//! │  caller ──► lock(cart) ──► fetch stock / product ──► compute next Cart  │
//! │                 │                                         │             │
//! │                 │              ┌──────────────────────────┘             │
//! │                 │              ▼                                        │
//! │                 │      snapshots.save(&next) ──✗──► error, nothing      │
//! │                 │              │ ✓                   changed            │
//! │                 │              ▼                                        │
//! │                 │      *cart = next; publish(next)                      │
//! │                 ▼                                                       │
//! │           guard dropped: the next mutation may start                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The lock is held across the stock and catalog requests, so two calls on
//! the same store never compute against the same starting cart. Readers use
//! the watch channel and never wait on the lock.
//!
//! ## Two Forms per Operation
//! - `try_add_product`, `try_remove_product`, `try_update_product_amount`
//!   return the precise outcome.
//! - `add_product`, `remove_product`, `update_product_amount` return nothing
//!   and report failures through the [`Notifier`].

use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use cart_core::{check_increment, check_requested, Cart, Increment, ProductId, StockCheck, UpdateProductAmount};

use crate::config::CartConfig;
use crate::error::{StoreError, StoreResult};
use crate::notifier::{Messages, Notifier, Operation};
use crate::ports::{ProductCatalog, SnapshotStore, StockOracle};

/// Outcome of a successful call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// The cart changed and was persisted.
    Applied,
    /// The request was ignored (non-positive amount).
    Skipped,
}

/// Behavior knobs for a [`CartStore`].
#[derive(Debug, Clone, Default)]
pub struct StoreSettings {
    pub stock_check: StockCheck,
    pub messages: Messages,
}

impl From<&CartConfig> for StoreSettings {
    fn from(config: &CartConfig) -> Self {
        StoreSettings {
            stock_check: config.stock_check(),
            messages: config.resolved_messages(),
        }
    }
}

/// A failure tagged with the operation whose message it should show.
///
/// Differs from the called operation when `add_product` hands off to the
/// update path.
#[derive(Debug)]
struct Failure {
    operation: Operation,
    error: StoreError,
}

impl Failure {
    fn add(error: StoreError) -> Self {
        Failure {
            operation: Operation::Add,
            error,
        }
    }

    fn update(error: StoreError) -> Self {
        Failure {
            operation: Operation::Update,
            error,
        }
    }
}

/// In-memory cart mirrored to a [`SnapshotStore`].
pub struct CartStore<A, P> {
    api: A,
    snapshots: P,
    notifier: Arc<dyn Notifier>,
    settings: StoreSettings,
    cart: Mutex<Cart>,
    published: watch::Sender<Cart>,
}

impl<A, P> std::fmt::Debug for CartStore<A, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("settings", &self.settings)
            .field("items", &self.published.borrow().len())
            .finish_non_exhaustive()
    }
}

impl<A, P> CartStore<A, P>
where
    A: StockOracle + ProductCatalog,
    P: SnapshotStore,
{
    /// Creates the store from the persisted snapshot.
    ///
    /// A missing snapshot starts an empty cart. So does one that cannot be
    /// read or decoded, or that breaks a cart invariant; the bad value stays
    /// in storage until the next successful mutation overwrites it.
    pub async fn init(
        api: A,
        snapshots: P,
        notifier: Arc<dyn Notifier>,
        settings: StoreSettings,
    ) -> Self {
        let cart = match snapshots.load().await {
            Ok(Some(cart)) => {
                info!(items = cart.len(), units = cart.total_amount(), "Cart restored from snapshot");
                cart
            }
            Ok(None) => {
                debug!("No cart snapshot, starting empty");
                Cart::new()
            }
            Err(e) => {
                warn!(error = %e, "Discarding unreadable cart snapshot");
                Cart::new()
            }
        };

        let (published, _) = watch::channel(cart.clone());

        CartStore {
            api,
            snapshots,
            notifier,
            settings,
            cart: Mutex::new(cart),
            published,
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Returns the last committed cart.
    pub fn cart(&self) -> Cart {
        self.published.borrow().clone()
    }

    /// Returns a receiver that observes every committed cart.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.published.subscribe()
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    // =========================================================================
    // Consumer Forms
    // =========================================================================

    /// Adds one unit of `product_id`, notifying on failure.
    pub async fn add_product(&self, product_id: ProductId) {
        let mut cart = self.cart.lock().await;
        if let Err(failure) = self.add_locked(&mut cart, product_id).await {
            self.report(failure);
        }
    }

    /// Removes `product_id`, notifying on failure.
    pub async fn remove_product(&self, product_id: ProductId) {
        if let Err(error) = self.try_remove_product(product_id).await {
            self.report(Failure {
                operation: Operation::Remove,
                error,
            });
        }
    }

    /// Sets the held amount, notifying on failure.
    pub async fn update_product_amount(&self, request: UpdateProductAmount) {
        if let Err(error) = self.try_update_product_amount(request).await {
            self.report(Failure::update(error));
        }
    }

    // =========================================================================
    // Precise Forms
    // =========================================================================

    /// Adds one unit of `product_id`.
    ///
    /// ## Errors
    /// - `InsufficientStock` when the stock check refuses one more unit
    /// - transport errors from the stock or catalog request
    /// - `Persistence` when the snapshot cannot be written
    pub async fn try_add_product(&self, product_id: ProductId) -> StoreResult<Mutation> {
        let mut cart = self.cart.lock().await;
        self.add_locked(&mut cart, product_id)
            .await
            .map_err(|failure| failure.error)
    }

    /// Removes `product_id`.
    ///
    /// ## Errors
    /// - `NotInCart` when the product is not held
    /// - `Persistence` when the snapshot cannot be written
    pub async fn try_remove_product(&self, product_id: ProductId) -> StoreResult<Mutation> {
        let mut cart = self.cart.lock().await;

        let next = cart.without(product_id)?;
        self.commit(&mut cart, next).await?;

        info!(product_id = %product_id, "Product removed from cart");
        Ok(Mutation::Applied)
    }

    /// Sets the held amount of a product already in the cart.
    ///
    /// Amounts of zero or less are ignored without touching the stock API.
    ///
    /// ## Errors
    /// - `NotInCart` when the product is not held
    /// - `InsufficientStock` when stock is below the requested amount
    /// - transport errors from the stock request
    /// - `Persistence` when the snapshot cannot be written
    pub async fn try_update_product_amount(
        &self,
        request: UpdateProductAmount,
    ) -> StoreResult<Mutation> {
        let mut cart = self.cart.lock().await;
        self.update_locked(&mut cart, request).await
    }

    // =========================================================================
    // Internals
    // =========================================================================

    async fn add_locked(&self, cart: &mut Cart, product_id: ProductId) -> Result<Mutation, Failure> {
        match self.add_or_hand_off(cart, product_id).await.map_err(Failure::add)? {
            Some(request) => self
                .update_locked(cart, request)
                .await
                .map_err(Failure::update),
            None => Ok(Mutation::Applied),
        }
    }

    /// Applies the add, or returns the update request it hands off.
    async fn add_or_hand_off(
        &self,
        cart: &mut Cart,
        product_id: ProductId,
    ) -> StoreResult<Option<UpdateProductAmount>> {
        let stock = self.api.stock(product_id).await?;

        if let Some(current) = cart.amount_of(product_id) {
            match check_increment(&stock, current, self.settings.stock_check)? {
                Increment::Recheck { amount } => {
                    debug!(product_id = %product_id, amount, "Handing increment to update path");
                    return Ok(Some(UpdateProductAmount::new(product_id, amount)));
                }
                Increment::Apply { amount } => {
                    let next = cart.with_amount(product_id, amount)?;
                    self.commit(cart, next).await?;

                    info!(product_id = %product_id, amount, "Product amount incremented");
                    return Ok(None);
                }
            }
        }

        let product = self.api.product(product_id).await?.with_amount(1);
        let next = cart.push_new(product)?;
        self.commit(cart, next).await?;

        info!(product_id = %product_id, "Product added to cart");
        Ok(None)
    }

    async fn update_locked(
        &self,
        cart: &mut Cart,
        request: UpdateProductAmount,
    ) -> StoreResult<Mutation> {
        let UpdateProductAmount { product_id, amount } = request;

        if amount <= 0 {
            debug!(product_id = %product_id, amount, "Ignoring non-positive amount");
            return Ok(Mutation::Skipped);
        }

        let stock = self.api.stock(product_id).await?;

        if !cart.contains(product_id) {
            return Err(StoreError::not_in_cart(product_id));
        }
        check_requested(&stock, amount)?;

        let next = cart.with_amount(product_id, amount)?;
        self.commit(cart, next).await?;

        info!(product_id = %product_id, amount, "Product amount updated");
        Ok(Mutation::Applied)
    }

    /// Persists `next`, then installs and publishes it.
    async fn commit(&self, cart: &mut Cart, next: Cart) -> StoreResult<()> {
        self.snapshots.save(&next).await?;

        *cart = next.clone();
        self.published.send_replace(next);
        Ok(())
    }

    fn report(&self, failure: Failure) {
        let Failure { operation, error } = failure;
        warn!(operation = %operation, error = %error, "Cart operation failed");
        self.notifier
            .notify_error(self.settings.messages.for_error(operation, &error));
    }
}
