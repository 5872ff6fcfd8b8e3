use crate::clients::CartService;
use crate::model::{CartItem, ProductId, MAX_QUANTITY};
use crate::service::{CartRequest, Response, ServiceError};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

/// Channel-transport client for the cart service.
///
/// The sending half of the service channel; cheap to clone. Every
/// operation suspends until the service answers or the channel closes.
#[derive(Clone)]
pub struct CartServiceClient {
    sender: mpsc::Sender<CartRequest>,
}

impl CartServiceClient {
    pub fn new(sender: mpsc::Sender<CartRequest>) -> Self {
        Self { sender }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(Response<T>) -> CartRequest,
    ) -> Result<T, ServiceError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| ServiceError::Unavailable)?;
        response.await.map_err(|_| ServiceError::Unavailable)?
    }
}

#[async_trait]
impl CartService for CartServiceClient {
    #[tracing::instrument(skip(self))]
    async fn fetch(&self) -> Result<Vec<CartItem>, ServiceError> {
        debug!("Sending fetch request");
        let items = self
            .request(|respond_to| CartRequest::Fetch { respond_to })
            .await?;
        normalize(items)
    }

    #[tracing::instrument(skip(self))]
    async fn add(&self, product_id: &ProductId, quantity: u32) -> Result<(), ServiceError> {
        debug!("Sending add request");
        self.request(|respond_to| CartRequest::Add {
            product_id: product_id.clone(),
            quantity,
            respond_to,
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn remove(&self, product_id: &ProductId) -> Result<(), ServiceError> {
        debug!("Sending remove request");
        self.request(|respond_to| CartRequest::Remove {
            product_id: product_id.clone(),
            respond_to,
        })
        .await
    }

    #[tracing::instrument(skip(self, product_ids))]
    async fn clear(&self, product_ids: Vec<ProductId>) -> Result<(), ServiceError> {
        debug!(count = product_ids.len(), "Sending clear request");
        self.request(|respond_to| CartRequest::Clear {
            product_ids,
            respond_to,
        })
        .await
    }
}

/// Validates a fetched item list before it is allowed to replace local state.
fn normalize(items: Vec<CartItem>) -> Result<Vec<CartItem>, ServiceError> {
    for item in &items {
        if item.quantity == 0 || item.quantity > MAX_QUANTITY {
            return Err(ServiceError::InvalidPayload(format!(
                "quantity {} out of range for {}",
                item.quantity, item.product_id
            )));
        }
        if !item.price.is_finite() || item.price < 0.0 {
            return Err(ServiceError::InvalidPayload(format!(
                "invalid price {} for {}",
                item.price, item.product_id
            )));
        }
    }
    Ok(items)
}
