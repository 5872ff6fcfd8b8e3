/// Represents one line in the cart.
///
/// # Cart Core
/// Items are produced by the cart service and replaced wholesale on every
/// authoritative reload. Display metadata (`title`, `seller_name`,
/// `image_url`) is non-authoritative; `price` is a snapshot taken at the
/// time of the last load, not a live quote.
use serde::{Deserialize, Serialize};

use std::fmt::Display;

/// Highest quantity the service accepts for a single line item.
pub const MAX_QUANTITY: u32 = 99;

/// Type-safe identifier for products.
///
/// Acts as the cart's primary key: a cart never contains two entries with
/// the same `ProductId` once reloaded from the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sale status the service reports for a line item.
///
/// Unavailable items stay visible in the cart but cannot be selected for
/// checkout or have their quantity changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemStatus {
    AvailableForSale,
    Unavailable,
}

impl ItemStatus {
    pub fn is_available(self) -> bool {
        matches!(self, ItemStatus::AvailableForSale)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub title: String,
    pub seller_name: String,
    pub image_url: String,
    pub price: f64,
    pub quantity: u32,
    pub status: ItemStatus,
}

impl CartItem {
    /// Creates a new CartItem instance.
    ///
    /// # Arguments
    /// * `product_id` - Unique identifier within the cart
    /// * `title` - Display title
    /// * `seller_name` - Display name of the seller
    /// * `image_url` - Display image location
    /// * `price` - Unit price snapshot
    /// * `quantity` - Units in the cart (1..=99)
    /// * `status` - Sale status reported by the service
    pub fn new(
        product_id: impl Into<ProductId>,
        title: impl Into<String>,
        seller_name: impl Into<String>,
        image_url: impl Into<String>,
        price: f64,
        quantity: u32,
        status: ItemStatus,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            title: title.into(),
            seller_name: seller_name.into(),
            image_url: image_url.into(),
            price,
            quantity,
            status,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status.is_available()
    }

    /// `price × quantity`. Not currency-rounded; rounding is a display concern.
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}
