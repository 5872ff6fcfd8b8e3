//! In-process cart service: the authoritative "remote" truth for demos
//! and integration tests.
//!
//! The server owns the catalog and the cart lines and processes requests
//! sequentially from its channel, so no locks are needed for internal
//! state. Quantity merging, the per-line cap and price snapshots all live
//! here; the core deliberately re-fetches after an add instead of
//! reproducing this logic locally.

use crate::clients::CartServiceClient;
use crate::model::{CartItem, ItemStatus, ProductId, MAX_QUANTITY};
use crate::service::protocol::{CartRequest, ServiceError};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// One sellable product known to the service.
#[derive(Debug, Clone)]
pub struct CatalogProduct {
    pub product_id: ProductId,
    pub title: String,
    pub seller_name: String,
    pub image_url: String,
    pub price: f64,
    pub status: ItemStatus,
}

impl CatalogProduct {
    pub fn new(
        product_id: impl Into<ProductId>,
        title: impl Into<String>,
        seller_name: impl Into<String>,
        image_url: impl Into<String>,
        price: f64,
        status: ItemStatus,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            title: title.into(),
            seller_name: seller_name.into(),
            image_url: image_url.into(),
            price,
            status,
        }
    }
}

/// Server half of the in-process cart service.
pub struct InMemoryCartService {
    receiver: mpsc::Receiver<CartRequest>,
    catalog: HashMap<ProductId, CatalogProduct>,
    // Insertion order is the order clients see on fetch.
    lines: Vec<(ProductId, u32)>,
}

impl InMemoryCartService {
    /// Creates the service and a connected client.
    pub fn new(
        buffer_size: usize,
        catalog: impl IntoIterator<Item = CatalogProduct>,
    ) -> (Self, CartServiceClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            catalog: catalog
                .into_iter()
                .map(|product| (product.product_id.clone(), product))
                .collect(),
            lines: Vec::new(),
        };
        (service, CartServiceClient::new(sender))
    }

    /// Runs the request loop until every client is dropped.
    pub async fn run(mut self) {
        info!(products = self.catalog.len(), "Cart service started");

        while let Some(request) = self.receiver.recv().await {
            match request {
                CartRequest::Fetch { respond_to } => {
                    let items = self.snapshot();
                    debug!(count = items.len(), "Fetch");
                    let _ = respond_to.send(Ok(items));
                }
                CartRequest::Add {
                    product_id,
                    quantity,
                    respond_to,
                } => {
                    let result = self.add(&product_id, quantity);
                    match &result {
                        Ok(()) => debug!(%product_id, quantity, "Add"),
                        Err(e) => warn!(%product_id, quantity, error = %e, "Add rejected"),
                    }
                    let _ = respond_to.send(result);
                }
                CartRequest::Remove {
                    product_id,
                    respond_to,
                } => {
                    let result = self.remove(&product_id);
                    match &result {
                        Ok(()) => debug!(%product_id, "Remove"),
                        Err(e) => warn!(%product_id, error = %e, "Remove rejected"),
                    }
                    let _ = respond_to.send(result);
                }
                CartRequest::Clear {
                    product_ids,
                    respond_to,
                } => {
                    self.lines.retain(|(id, _)| !product_ids.contains(id));
                    debug!(count = product_ids.len(), "Clear");
                    let _ = respond_to.send(Ok(()));
                }
            }
        }

        info!(lines = self.lines.len(), "Cart service stopped");
    }

    /// Joins cart lines with the catalog. Prices are snapshot at this point.
    fn snapshot(&self) -> Vec<CartItem> {
        self.lines
            .iter()
            .filter_map(|(product_id, quantity)| {
                self.catalog.get(product_id).map(|product| {
                    CartItem::new(
                        product.product_id.clone(),
                        product.title.clone(),
                        product.seller_name.clone(),
                        product.image_url.clone(),
                        product.price,
                        *quantity,
                        product.status,
                    )
                })
            })
            .collect()
    }

    fn add(&mut self, product_id: &ProductId, quantity: u32) -> Result<(), ServiceError> {
        if quantity == 0 {
            return Err(ServiceError::rejected("Quantity must be at least 1."));
        }
        let Some(product) = self.catalog.get(product_id) else {
            return Err(ServiceError::rejected("This item is no longer sold."));
        };
        if !product.status.is_available() {
            return Err(ServiceError::rejected("This item is currently unavailable."));
        }

        if let Some((_, existing)) = self.lines.iter_mut().find(|(id, _)| id == product_id) {
            let merged = existing.saturating_add(quantity);
            if merged > MAX_QUANTITY {
                return Err(ServiceError::rejected(format!(
                    "You can order at most {MAX_QUANTITY} of one item."
                )));
            }
            *existing = merged;
        } else {
            if quantity > MAX_QUANTITY {
                return Err(ServiceError::rejected(format!(
                    "You can order at most {MAX_QUANTITY} of one item."
                )));
            }
            self.lines.push((product_id.clone(), quantity));
        }
        Ok(())
    }

    fn remove(&mut self, product_id: &ProductId) -> Result<(), ServiceError> {
        let before = self.lines.len();
        self.lines.retain(|(id, _)| id != product_id);
        if self.lines.len() == before {
            return Err(ServiceError::rejected("That item is not in your cart."));
        }
        Ok(())
    }
}
