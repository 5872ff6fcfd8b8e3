//! The cart state store: the single writer of local cart state.
//!
//! `CartState` is a reducer over a fixed set of transitions. Every
//! transition is synchronous, total and infallible, and `total_items`
//! equals `items.len()` after each one. Fields are private so that the
//! transitions below stay the only way to mutate cart state; everything
//! else in the crate reads through the accessors.

use crate::model::{CartItem, ProductId};

/// Local authoritative view of the cart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    items: Vec<CartItem>,
    loading: bool,
    error: Option<String>,
    total_items: usize,
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    // --- transitions ---

    /// Flips the in-flight flag; no other field changes.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Wholesale replacement after a successful authoritative read.
    /// Clears both the in-flight flag and any previous error.
    pub fn set_data(&mut self, items: Vec<CartItem>) {
        self.items = items;
        self.total_items = self.items.len();
        self.loading = false;
        self.error = None;
    }

    /// Appends an item. Append-only: a duplicate add yields a duplicate
    /// entry, and de-duplication is deferred to the next reload.
    pub fn add_item(&mut self, item: CartItem) {
        self.items.push(item);
        self.total_items = self.items.len();
    }

    /// Removes every entry with the given id. A miss leaves state unchanged.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        self.items.retain(|item| &item.product_id != product_id);
        self.total_items = self.items.len();
    }

    /// Empties the cart and drops any stale error. The structure itself
    /// stays alive for the next session.
    pub fn clear(&mut self) {
        self.items.clear();
        self.total_items = 0;
        self.error = None;
    }

    /// Records the last failure and ends the in-flight operation.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.loading = false;
    }

    // --- reads ---

    /// Items in server-returned order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|item| &item.product_id == product_id)
    }

    /// Σ `price × quantity` over all items. Not currency-rounded.
    pub fn total_price(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemStatus;

    fn item(id: &str, price: f64, quantity: u32) -> CartItem {
        CartItem::new(
            id,
            "Test Item",
            "Test Seller",
            "https://img.example/test.png",
            price,
            quantity,
            ItemStatus::AvailableForSale,
        )
    }

    #[test]
    fn total_items_tracks_items_len_across_transitions() {
        let mut state = CartState::new();
        assert_eq!(state.total_items(), state.items().len());

        state.set_data(vec![item("p1", 10.0, 1), item("p2", 5.0, 2)]);
        assert_eq!(state.total_items(), 2);
        assert_eq!(state.total_items(), state.items().len());

        state.add_item(item("p3", 1.0, 1));
        assert_eq!(state.total_items(), state.items().len());

        state.remove_item(&"p1".into());
        assert_eq!(state.total_items(), state.items().len());

        state.clear();
        assert_eq!(state.total_items(), 0);
        assert_eq!(state.total_items(), state.items().len());
    }

    #[test]
    fn set_data_clears_loading_and_error() {
        let mut state = CartState::new();
        state.set_loading(true);
        state.set_error("boom");
        assert!(!state.loading());

        state.set_loading(true);
        state.set_data(vec![item("p1", 10.0, 1)]);
        assert!(!state.loading());
        assert!(state.error().is_none());
    }

    #[test]
    fn set_error_records_message_and_ends_the_operation() {
        let mut state = CartState::new();
        state.set_data(vec![item("p1", 10.0, 1)]);
        state.set_loading(true);

        state.set_error("service said no");
        assert_eq!(state.error(), Some("service said no"));
        assert!(!state.loading());
        // Prior items survive a failure.
        assert_eq!(state.total_items(), 1);
    }

    #[test]
    fn remove_item_is_idempotent_on_missing_ids() {
        let mut state = CartState::new();
        state.set_data(vec![item("p1", 10.0, 1)]);

        state.remove_item(&"ghost".into());
        state.remove_item(&"ghost".into());
        assert_eq!(state.total_items(), 1);

        state.remove_item(&"p1".into());
        state.remove_item(&"p1".into());
        assert_eq!(state.total_items(), 0);
    }

    #[test]
    fn add_item_is_not_idempotent() {
        let mut state = CartState::new();
        state.add_item(item("p1", 10.0, 1));
        state.add_item(item("p1", 10.0, 1));
        // Two identical adds yield two entries; reload is what de-duplicates.
        assert_eq!(state.total_items(), 2);
    }

    #[test]
    fn remove_item_drops_every_entry_with_the_id() {
        let mut state = CartState::new();
        state.add_item(item("p1", 10.0, 1));
        state.add_item(item("p1", 10.0, 1));
        state.add_item(item("p2", 5.0, 1));

        state.remove_item(&"p1".into());
        assert_eq!(state.total_items(), 1);
        assert!(state.contains(&"p2".into()));
    }

    #[test]
    fn total_price_sums_line_totals() {
        let mut state = CartState::new();
        state.set_data(vec![item("p1", 10.0, 2), item("p2", 2.5, 4)]);
        assert_eq!(state.total_price(), 30.0);
    }
}
