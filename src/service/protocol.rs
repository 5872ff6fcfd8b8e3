//! Wire contract between the cart core and whatever serves the cart.
//!
//! Each request carries a oneshot responder, so a server processes
//! requests sequentially and answers each one exactly once.

use crate::model::{CartItem, ProductId};
use thiserror::Error;
use tokio::sync::oneshot;

/// Failures reported across the cart service boundary.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
    /// The service refused the operation. May carry a human-readable tip
    /// meant to be surfaced to the user as-is.
    #[error("{}", .user_tip.as_deref().unwrap_or("the cart service rejected the request"))]
    Rejected { user_tip: Option<String> },

    /// The service answered with something this client cannot accept.
    /// Fatal class: must stay distinguishable from "service said no".
    #[error("invalid cart payload: {0}")]
    InvalidPayload(String),

    /// The transport to the service is gone.
    #[error("cart service unavailable")]
    Unavailable,
}

impl ServiceError {
    pub fn rejected(user_tip: impl Into<String>) -> Self {
        ServiceError::Rejected {
            user_tip: Some(user_tip.into()),
        }
    }

    /// True for malformed-response failures that must propagate instead of
    /// being coerced into the normal failure path.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ServiceError::InvalidPayload(_))
    }
}

/// One-shot responder for service requests.
pub type Response<T> = oneshot::Sender<Result<T, ServiceError>>;

/// Requests understood by the cart service.
///
/// - `Fetch` returns the authoritative item list in server order.
/// - `Add` merges quantities server-side; the caller is expected to
///   re-fetch rather than guess the merged result.
/// - `Remove` deletes a single line.
/// - `Clear` deletes the given lines in one batched call.
#[derive(Debug)]
pub enum CartRequest {
    Fetch {
        respond_to: Response<Vec<CartItem>>,
    },
    Add {
        product_id: ProductId,
        quantity: u32,
        respond_to: Response<()>,
    },
    Remove {
        product_id: ProductId,
        respond_to: Response<()>,
    },
    Clear {
        product_ids: Vec<ProductId>,
        respond_to: Response<()>,
    },
}
