//! The selection & checkout projector.
//!
//! Page-local layer over [`CartSync`]: a set of product ids marked for
//! checkout, gated by availability. The selection never mutates the store
//! directly; removal goes through the synchronization core.
//!
//! Invariant: after every [`CheckoutSelection::prune`], the selection is a
//! subset of the ids currently present in the cart with status
//! available-for-sale. Callers run `prune` after every change to the
//! underlying item collection; stale ids are dropped silently.

use crate::clients::CartService;
use crate::model::{CartItem, CheckoutPayload, ProductId};
use crate::sync::CartSync;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Selection state for a single cart page view.
pub struct CheckoutSelection<S: CartService> {
    cart: CartSync<S>,
    selected: HashSet<ProductId>,
}

impl<S: CartService> CheckoutSelection<S> {
    pub fn new(cart: CartSync<S>) -> Self {
        Self {
            cart,
            selected: HashSet::new(),
        }
    }

    /// Ids currently marked for checkout.
    pub fn selected(&self) -> &HashSet<ProductId> {
        &self.selected
    }

    pub fn is_selected(&self, product_id: &ProductId) -> bool {
        self.selected.contains(product_id)
    }

    /// Toggles one item. Unavailable or absent items cannot enter the
    /// selection through this path.
    pub fn toggle(&mut self, product_id: &ProductId) {
        if self.selected.remove(product_id) {
            return;
        }
        let selectable = self
            .cart
            .state()
            .items()
            .iter()
            .any(|item| &item.product_id == product_id && item.is_available());
        if selectable {
            self.selected.insert(product_id.clone());
        } else {
            debug!(%product_id, "Toggle ignored: item unavailable or absent");
        }
    }

    /// Select-all: assigns the full set of currently available ids, or
    /// empties the selection.
    pub fn set_all(&mut self, checked: bool) {
        if checked {
            self.selected = self.available_ids().into_iter().collect();
        } else {
            self.selected.clear();
        }
    }

    /// Whether the select-all control should render checked: every
    /// available item is selected and there is at least one.
    pub fn all_selected(&self) -> bool {
        let available = self.available_ids();
        !available.is_empty() && available.iter().all(|id| self.selected.contains(id))
    }

    /// Intersects the selection with the current available-item id set.
    /// Run after every change to the underlying items.
    pub fn prune(&mut self) {
        let available: HashSet<ProductId> = self.available_ids().into_iter().collect();
        self.selected.retain(|id| available.contains(id));
    }

    /// Σ `price × quantity` over selected items.
    pub fn selected_total(&self) -> f64 {
        self.cart
            .state()
            .items()
            .iter()
            .filter(|item| self.selected.contains(&item.product_id))
            .map(CartItem::line_total)
            .sum()
    }

    /// Count of items both selected and available-for-sale. The selection
    /// should already exclude unavailable ids; the double filter is
    /// deliberate.
    pub fn selected_available_count(&self) -> usize {
        self.cart
            .state()
            .items()
            .iter()
            .filter(|item| item.is_available() && self.selected.contains(&item.product_id))
            .count()
    }

    /// Best-effort bulk removal.
    ///
    /// Every selected id is removed concurrently through the
    /// synchronization core; the call returns once each removal has
    /// resolved, and the selection is cleared regardless of individual
    /// outcomes. Not atomic: partial failure leaves a mixed cart, and
    /// callers needing strict consistency reload afterwards.
    pub async fn delete_selected(&mut self) {
        let ids: Vec<ProductId> = self.selected.iter().cloned().collect();
        let mut handles = Vec::with_capacity(ids.len());
        for product_id in ids {
            let cart = self.cart.clone();
            handles.push(tokio::spawn(async move {
                if let Err(err) = cart.remove(&product_id).await {
                    warn!(%product_id, error = %err, "Bulk removal failed for one item");
                }
            }));
        }
        for handle in handles {
            let _ = handle.await;
        }
        self.selected.clear();
    }

    /// Checkout handoff. `None` (the control is disabled) when nothing
    /// selected is available; otherwise the selected ids in cart order.
    pub fn checkout(&self) -> Option<CheckoutPayload> {
        if self.selected_available_count() == 0 {
            return None;
        }
        let product_ids = self
            .cart
            .state()
            .items()
            .iter()
            .filter(|item| item.is_available() && self.selected.contains(&item.product_id))
            .map(|item| item.product_id.clone())
            .collect();
        Some(CheckoutPayload { product_ids })
    }

    fn available_ids(&self) -> Vec<ProductId> {
        self.cart
            .state()
            .items()
            .iter()
            .filter(|item| item.is_available())
            .map(|item| item.product_id.clone())
            .collect()
    }
}
