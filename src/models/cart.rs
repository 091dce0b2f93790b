//! The cart domain model.
//!
//! A [`Cart`] is owned by a single client session: created empty on
//! first visit, mutated by user actions, persisted after every
//! mutation, and cleared explicitly or discarded on a schema-version
//! mismatch at load time.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Coupon, CouponCode, ItemId, SchemaVersion};

/// One line in the cart: a selected service or product with a
/// quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Identifier of the selected service/product.
    pub id: ItemId,
    /// Display name at the time the item was added.
    pub name: String,
    /// Price per unit.
    pub unit_price: f64,
    /// Number of units selected.
    pub quantity: u32,
}

impl CartItem {
    /// Creates a line item.
    #[inline]
    #[must_use]
    pub fn new<I, N>(id: I, name: N, unit_price: f64, quantity: u32) -> Self
    where
        I: Into<ItemId>,
        N: Into<String>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    /// Price of this line (`unit_price * quantity`).
    #[inline]
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// Client-held collection of selected items awaiting checkout.
///
/// Fields this build does not model are preserved in `extra` and
/// round-trip unchanged through persistence, so data written by a
/// newer same-version revision is not silently dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    /// Schema tag checked against [`SchemaVersion::CURRENT`] on load.
    pub version: SchemaVersion,
    /// Line items, at most one per item id.
    #[serde(default)]
    pub items: Vec<CartItem>,
    /// Code of the coupon the user applied, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon: Option<CouponCode>,
    /// Top-level fields not modeled by this build.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Cart {
    /// Creates an empty cart tagged with the current schema version.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            version: SchemaVersion::CURRENT,
            items: Vec::new(),
            coupon: None,
            extra: Map::new(),
        }
    }

    /// Adds an item, merging quantities when a line with the same id
    /// already exists.
    #[inline]
    pub fn add_item(&mut self, item: CartItem) {
        if let Some(existing) = self.items.iter_mut().find(|line| line.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
        } else {
            self.items.push(item);
        }
    }

    /// Removes the line with the given id, if present.
    #[inline]
    pub fn remove_item(&mut self, id: &ItemId) {
        self.items.retain(|line| line.id != *id);
    }

    /// Sets the quantity of an existing line. A quantity of zero
    /// removes the line; unknown ids are ignored.
    #[inline]
    pub fn set_quantity(&mut self, id: &ItemId, quantity: u32) {
        if quantity == 0 {
            self.remove_item(id);
        } else if let Some(line) = self.items.iter_mut().find(|line| line.id == *id) {
            line.quantity = quantity;
        }
    }

    /// Removes all items and any applied coupon.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.coupon = None;
    }

    /// Returns `true` when the cart holds no items.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    #[inline]
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |sum, line| sum.saturating_add(line.quantity))
    }

    /// Sum of all line totals, before any discount.
    #[inline]
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Total after applying the given coupon, if any.
    #[inline]
    #[must_use]
    pub fn total(&self, coupon: Option<&Coupon>) -> f64 {
        let subtotal = self.subtotal();
        coupon.map_or(subtotal, |c| c.apply_to(subtotal))
    }

    /// Records the user's applied coupon code.
    #[inline]
    pub fn apply_coupon(&mut self, code: CouponCode) {
        self.coupon = Some(code);
    }

    /// Drops any applied coupon code.
    #[inline]
    pub fn remove_coupon(&mut self) {
        self.coupon = None;
    }
}

impl Default for Cart {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DiscountKind;

    fn window_item(quantity: u32) -> CartItem {
        CartItem::new("aluminium-window-2x3", "Aluminium Window 2x3", 4500.0, quantity)
    }

    #[test]
    fn new_cart_is_empty_and_current_version() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.version, SchemaVersion::CURRENT);
        assert!(cart.coupon.is_none());
    }

    #[test]
    fn add_item_merges_quantities_by_id() {
        let mut cart = Cart::new();
        cart.add_item(window_item(1));
        cart.add_item(window_item(2));
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn add_item_keeps_distinct_ids_separate() {
        let mut cart = Cart::new();
        cart.add_item(window_item(1));
        cart.add_item(CartItem::new("safety-net-balcony", "Balcony Safety Net", 1200.0, 2));
        assert_eq!(cart.items.len(), 2);
    }

    #[test]
    fn remove_item_drops_the_line() {
        let mut cart = Cart::new();
        cart.add_item(window_item(1));
        cart.remove_item(&ItemId::from("aluminium-window-2x3"));
        assert!(cart.is_empty());
    }

    #[test]
    fn set_quantity_zero_removes_the_line() {
        let mut cart = Cart::new();
        cart.add_item(window_item(3));
        cart.set_quantity(&ItemId::from("aluminium-window-2x3"), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn set_quantity_updates_existing_line() {
        let mut cart = Cart::new();
        cart.add_item(window_item(1));
        cart.set_quantity(&ItemId::from("aluminium-window-2x3"), 5);
        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn set_quantity_ignores_unknown_id() {
        let mut cart = Cart::new();
        cart.add_item(window_item(1));
        cart.set_quantity(&ItemId::from("not-in-cart"), 5);
        assert_eq!(cart.total_quantity(), 1);
    }

    #[test]
    fn subtotal_sums_line_totals() {
        let mut cart = Cart::new();
        cart.add_item(window_item(2));
        cart.add_item(CartItem::new("safety-net-balcony", "Balcony Safety Net", 1200.0, 1));
        assert!((cart.subtotal() - 10200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn total_applies_coupon_when_given() {
        let mut cart = Cart::new();
        cart.add_item(window_item(2));
        let coupon = Coupon::new("WELCOME10", "10% off", 10.0, DiscountKind::Percentage);
        assert!((cart.total(Some(&coupon)) - 8100.0).abs() < f64::EPSILON);
        assert!((cart.total(None) - 9000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn clear_drops_items_and_coupon() {
        let mut cart = Cart::new();
        cart.add_item(window_item(1));
        cart.apply_coupon(CouponCode::new("welcome10"));
        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.coupon.is_none());
    }

    #[test]
    fn items_serialize_camel_case() {
        let mut cart = Cart::new();
        cart.add_item(window_item(1));
        let json = serde_json::to_string(&cart).unwrap();
        assert!(json.contains(r#""unitPrice":4500.0"#));
        assert!(json.contains(r#""version":1"#));
    }

    #[test]
    fn unknown_top_level_fields_round_trip() {
        let json = r#"{
            "version": 1,
            "items": [],
            "giftWrap": true,
            "note": "call before delivery"
        }"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.extra.get("giftWrap"), Some(&Value::Bool(true)));

        let out = serde_json::to_string(&cart).unwrap();
        assert!(out.contains("giftWrap"));
        assert!(out.contains("call before delivery"));
    }

    #[test]
    fn missing_optional_fields_deserialize_to_defaults() {
        let cart: Cart = serde_json::from_str(r#"{"version":1}"#).unwrap();
        assert!(cart.is_empty());
        assert!(cart.coupon.is_none());
    }
}
