//! Typed access to the cart service.
//!
//! The synchronization core never touches the channel protocol directly;
//! it talks to the [`CartService`] trait, with [`CartServiceClient`] as the
//! production implementation.

pub mod cart_client;

pub use cart_client::CartServiceClient;

use crate::model::{CartItem, ProductId};
use crate::service::ServiceError;
use async_trait::async_trait;

/// The seam between the synchronization core and the remote cart service.
///
/// Implementations issue the remote operation and report the outcome as a
/// typed failure; they never mutate local cart state themselves.
#[async_trait]
pub trait CartService: Clone + Send + Sync + 'static {
    /// Fetch the authoritative item list, normalized.
    async fn fetch(&self) -> Result<Vec<CartItem>, ServiceError>;

    /// Add `quantity` units of a product. Quantity merging happens
    /// server-side; callers re-fetch to observe the result.
    async fn add(&self, product_id: &ProductId, quantity: u32) -> Result<(), ServiceError>;

    /// Remove a single line.
    async fn remove(&self, product_id: &ProductId) -> Result<(), ServiceError>;

    /// Remove the given lines in one batched call.
    async fn clear(&self, product_ids: Vec<ProductId>) -> Result<(), ServiceError>;
}
