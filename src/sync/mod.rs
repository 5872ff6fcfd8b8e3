//! The cart synchronization core.
//!
//! [`CartSync`] translates UI intents into remote calls and local state
//! transitions. Reads and additions always re-derive state from the
//! service (prices and stock shift server-side); removal is the one
//! operation applied optimistically, because its effect (absence)
//! cannot be contradicted by server-side recomputation.
//!
//! # Concurrency
//! `CartSync` is a cheap-clone handle. Cart state sits behind a mutex that
//! is released before every suspension point, so observers are never
//! blocked for the duration of a remote call. Loads carry a monotonically
//! increasing sequence number: a response older than the last-issued load
//! is discarded, so local state always reflects the most recently *issued*
//! request, not the most recently resolved one. Mutating intents are not
//! serialized here; callers disable the triggering control while
//! `loading` is true.

pub mod error;

pub use error::CartError;

use crate::clients::CartService;
use crate::model::ProductId;
use crate::service::ServiceError;
use crate::store::CartState;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tracing::{debug, info, warn};

const GENERIC_ADD_FAILURE: &str = "Could not add the item to your cart.";

/// Orchestrates optimistic/pessimistic updates between UI intents and the
/// cart service, and exposes derived queries over the local state.
#[derive(Clone)]
pub struct CartSync<S: CartService> {
    service: S,
    auth: watch::Receiver<bool>,
    state: Arc<Mutex<CartState>>,
    load_seq: Arc<AtomicU64>,
}

impl<S: CartService> CartSync<S> {
    pub fn new(service: S, auth: watch::Receiver<bool>) -> Self {
        Self {
            service,
            auth,
            state: Arc::new(Mutex::new(CartState::new())),
            load_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut CartState) -> R) -> R {
        let mut state = self.state.lock().expect("cart state lock poisoned");
        f(&mut state)
    }

    /// Snapshot of the current cart state.
    pub fn state(&self) -> CartState {
        self.with_state(|state| state.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        *self.auth.borrow()
    }

    // --- operations ---

    /// Full authoritative reload. Silent no-op when signed out.
    ///
    /// A response that arrives after a newer load has been issued is
    /// discarded: the newer request owns the state. On failure the
    /// previous items stay in place: stale-but-present beats empty.
    pub async fn load(&self) -> Result<(), CartError> {
        if !self.is_authenticated() {
            debug!("Load skipped: not signed in");
            return Ok(());
        }

        let seq = self.load_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.with_state(|state| state.set_loading(true));

        let fetched = self.service.fetch().await;

        if self.load_seq.load(Ordering::SeqCst) != seq {
            debug!(seq, "Stale load response discarded");
            return Ok(());
        }

        match fetched {
            Ok(items) => {
                info!(count = items.len(), "Cart reloaded");
                self.with_state(|state| state.set_data(items));
                Ok(())
            }
            Err(err) if err.is_fatal() => {
                self.with_state(|state| state.set_loading(false));
                Err(CartError::Protocol(err))
            }
            Err(err) => {
                let message = err.to_string();
                warn!(error = %message, "Cart reload failed; keeping previous items");
                self.with_state(|state| state.set_error(message.clone()));
                Err(CartError::Remote { message })
            }
        }
    }

    /// Adds a product to the cart.
    ///
    /// On success the local view is rebuilt with a full reload rather than
    /// an optimistic append: the service computes merged quantities and
    /// price snapshots, and the local view must match them.
    pub async fn add(&self, product_id: &ProductId, quantity: u32) -> Result<(), CartError> {
        if !self.is_authenticated() {
            debug!(%product_id, "Add refused: not signed in");
            return Err(CartError::Unauthenticated);
        }

        self.with_state(|state| state.set_loading(true));

        match self.service.add(product_id, quantity).await {
            Ok(()) => {
                debug!(%product_id, quantity, "Added remotely; reloading");
                self.load().await
            }
            Err(err) if err.is_fatal() => {
                self.with_state(|state| state.set_loading(false));
                Err(CartError::Protocol(err))
            }
            Err(err) => {
                let message = match &err {
                    ServiceError::Rejected {
                        user_tip: Some(tip),
                    } => tip.clone(),
                    _ => GENERIC_ADD_FAILURE.to_string(),
                };
                warn!(%product_id, error = %err, "Remote add failed");
                self.with_state(|state| state.set_error(message.clone()));
                Err(CartError::Remote { message })
            }
        }
    }

    /// Removes a product from the cart.
    ///
    /// Applied optimistically on success, without a reload. On failure the
    /// are left unchanged, and callers must not assume the item is gone.
    pub async fn remove(&self, product_id: &ProductId) -> Result<(), CartError> {
        if !self.is_authenticated() {
            debug!(%product_id, "Remove refused: not signed in");
            return Err(CartError::Unauthenticated);
        }

        self.with_state(|state| state.set_loading(true));

        match self.service.remove(product_id).await {
            Ok(()) => {
                debug!(%product_id, "Removed");
                self.with_state(|state| {
                    state.remove_item(product_id);
                    state.set_loading(false);
                });
                Ok(())
            }
            Err(err) if err.is_fatal() => {
                self.with_state(|state| state.set_loading(false));
                Err(CartError::Protocol(err))
            }
            Err(err) => {
                let message = err.to_string();
                warn!(%product_id, error = %message, "Remote remove failed");
                self.with_state(|state| state.set_error(message.clone()));
                Err(CartError::Remote { message })
            }
        }
    }

    /// Clears the cart: one batched remote call for every present id, then
    /// a local clear. Signed-out sessions and already-empty carts return
    /// success without contacting the service.
    pub async fn clear(&self) -> Result<(), CartError> {
        if !self.is_authenticated() {
            return Ok(());
        }
        let product_ids: Vec<ProductId> = self.with_state(|state| {
            state
                .items()
                .iter()
                .map(|item| item.product_id.clone())
                .collect()
        });
        if product_ids.is_empty() {
            return Ok(());
        }

        self.with_state(|state| state.set_loading(true));

        match self.service.clear(product_ids).await {
            Ok(()) => {
                info!("Cart cleared");
                self.with_state(|state| {
                    state.clear();
                    state.set_loading(false);
                });
                Ok(())
            }
            Err(err) if err.is_fatal() => {
                self.with_state(|state| state.set_loading(false));
                Err(CartError::Protocol(err))
            }
            Err(err) => {
                let message = err.to_string();
                warn!(error = %message, "Remote clear failed");
                self.with_state(|state| state.set_error(message.clone()));
                Err(CartError::Remote { message })
            }
        }
    }

    // --- derived queries ---

    pub fn is_in_cart(&self, product_id: &ProductId) -> bool {
        self.with_state(|state| state.contains(product_id))
    }

    /// Σ `price × quantity` over all items. Not currency-rounded here.
    pub fn total_price(&self) -> f64 {
        self.with_state(|state| state.total_price())
    }

    // --- auth transitions ---

    /// Local-only reset used on sign-out; there is no session left to
    /// clear server-side.
    pub fn clear_local(&self) {
        info!("Signed out; clearing local cart");
        self.with_state(|state| state.clear());
    }

    /// Drives auth transitions: exactly one reload per sign-in edge and
    /// exactly one local clear per sign-out edge. Runs until the auth
    /// signal's writer is dropped.
    pub async fn watch_auth(self) {
        let mut auth = self.auth.clone();
        let mut signed_in = *auth.borrow_and_update();
        if signed_in {
            if let Err(err) = self.load().await {
                warn!(error = %err, "Initial cart load failed");
            }
        }

        while auth.changed().await.is_ok() {
            let now = *auth.borrow_and_update();
            if now == signed_in {
                continue;
            }
            signed_in = now;
            if now {
                if let Err(err) = self.load().await {
                    warn!(error = %err, "Cart load after sign-in failed");
                }
            } else {
                self.clear_local();
            }
        }

        debug!("Auth signal closed; watcher stopped");
    }
}
