//! The handoff contract to the external checkout flow.

use crate::model::ProductId;
use serde::{Deserialize, Serialize};

/// Payload handed to the checkout flow at navigation time.
///
/// Carries the selected ids in cart order. Not persisted, not versioned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutPayload {
    pub product_ids: Vec<ProductId>,
}
