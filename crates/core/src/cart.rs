//! Cart line items and pure cart state transitions.
//!
//! Every transition here is a plain in-memory operation: nothing touches
//! storage. Callers that mirror the cart somewhere durable do so after the
//! transition returns (see the storefront crate's cart store).
//!
//! # Invariants
//!
//! - Lines are unique by product id and keep insertion order.
//! - Every line has a quantity of at least one. A transition that would take
//!   a quantity to zero or below removes the line instead.
//! - A line's unit price is captured on first insertion and never refreshed.

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{CatalogProduct, DisplayFields, ProductId, line_total};

/// One row of the cart.
///
/// Serializes as the full denormalized row:
/// `{ "_id", "name", "image", "description", "price", "quantity" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "_id")]
    pub id: ProductId,
    #[serde(flatten)]
    pub display: DisplayFields,
    /// Price per unit, locked in when the product was first added.
    #[serde(rename = "price", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    pub quantity: NonZeroU32,
}

impl LineItem {
    /// Build a new line from a catalog product.
    #[must_use]
    pub fn from_product(product: &CatalogProduct, quantity: NonZeroU32) -> Self {
        Self {
            id: product.id.clone(),
            display: product.display_fields(),
            unit_price: product.price,
            quantity,
        }
    }

    /// `quantity * unit_price`.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        line_total(self.unit_price, self.quantity.get())
    }
}

/// What a transition did to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// A new line was appended.
    Inserted { quantity: u32 },
    /// An existing line's quantity grew by an add.
    Merged { from: u32, to: u32 },
    /// An existing line's quantity was overwritten.
    Updated { from: u32, to: u32 },
    /// A line was deleted.
    Removed { quantity: u32 },
    /// Every line was deleted.
    Cleared { lines: usize },
    /// Nothing matched, or the request was a no-op.
    Unchanged,
}

/// An ordered sequence of line items, unique by product id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from previously stored lines.
    ///
    /// Lines sharing a product id are merged into the first occurrence: the
    /// quantities are summed, and the first line keeps its position, price
    /// and display fields.
    #[must_use]
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            match cart.position(&item.id) {
                Some(index) => {
                    if let Some(existing) = cart.items.get_mut(index) {
                        existing.quantity = existing.quantity.saturating_add(item.quantity.get());
                    }
                }
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a line by product id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Current quantity for a product, if it is in the cart.
    #[must_use]
    pub fn quantity(&self, id: &ProductId) -> Option<u32> {
        self.get(id).map(|item| item.quantity.get())
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    /// Sum of `quantity * unit_price` over all lines. No rounding is applied.
    ///
    /// Saturates rather than overflowing, so a stored cart with absurd prices
    /// still renders.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.items
            .iter()
            .map(LineItem::subtotal)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Add `quantity` units of `product`.
    ///
    /// An existing line has its quantity increased; its price and display
    /// fields are left as they were. Otherwise a new line is appended.
    /// Adding zero units changes nothing.
    pub fn add(&mut self, product: &CatalogProduct, quantity: u32) -> CartChange {
        let Some(quantity) = NonZeroU32::new(quantity) else {
            return CartChange::Unchanged;
        };

        if let Some(existing) = self.items.iter_mut().find(|item| item.id == product.id) {
            let from = existing.quantity.get();
            existing.quantity = existing.quantity.saturating_add(quantity.get());
            return CartChange::Merged {
                from,
                to: existing.quantity.get(),
            };
        }

        self.items.push(LineItem::from_product(product, quantity));
        CartChange::Inserted {
            quantity: quantity.get(),
        }
    }

    /// Remove the line for `id`. Absent ids are a no-op.
    pub fn remove(&mut self, id: &ProductId) -> CartChange {
        match self.position(id) {
            Some(index) => {
                let removed = self.items.remove(index);
                CartChange::Removed {
                    quantity: removed.quantity.get(),
                }
            }
            None => CartChange::Unchanged,
        }
    }

    /// Overwrite the quantity for `id`.
    ///
    /// Zero or negative quantities remove the line. An absent id is a no-op;
    /// unlike [`Cart::add`] this never creates a line. Quantities beyond
    /// `u32::MAX` saturate.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: i64) -> CartChange {
        if quantity <= 0 {
            return self.remove(id);
        }

        let clamped = u32::try_from(quantity).unwrap_or(u32::MAX);
        let Some(quantity) = NonZeroU32::new(clamped) else {
            return self.remove(id);
        };

        match self.items.iter_mut().find(|item| &item.id == id) {
            Some(existing) => {
                let from = existing.quantity.get();
                existing.quantity = quantity;
                CartChange::Updated {
                    from,
                    to: quantity.get(),
                }
            }
            None => CartChange::Unchanged,
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) -> CartChange {
        let lines = self.items.len();
        self.items.clear();
        CartChange::Cleared { lines }
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<LineItem>::deserialize(deserializer).map(Self::from_items)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: &str, price: i64) -> CatalogProduct {
        CatalogProduct {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Decimal::new(price, 0),
            image: format!("https://cdn.example/{id}.png"),
            description: String::new(),
            in_stock: 10,
            is_featured: false,
            category: None,
        }
    }

    #[test]
    fn test_add_distinct_products_appends_in_order() {
        let mut cart = Cart::new();
        cart.add(&product("a", 10), 1);
        cart.add(&product("b", 20), 2);
        cart.add(&product("c", 30), 3);

        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(cart.total_item_count(), 6);
        assert_eq!(cart.len(), 3);
    }

    #[test]
    fn test_add_same_product_merges_quantity() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.add(&product("a", 10), 2),
            CartChange::Inserted { quantity: 2 }
        );
        assert_eq!(
            cart.add(&product("a", 10), 3),
            CartChange::Merged { from: 2, to: 5 }
        );

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity(&ProductId::new("a")), Some(5));
    }

    #[test]
    fn test_add_keeps_first_price() {
        let mut cart = Cart::new();
        cart.add(&product("a", 100), 1);

        let mut repriced = product("a", 80);
        repriced.name = "Renamed".to_string();
        cart.add(&repriced, 1);

        let line = cart.get(&ProductId::new("a")).unwrap();
        assert_eq!(line.unit_price, Decimal::new(100, 0));
        assert_eq!(line.display.name, "Product a");
        assert_eq!(cart.total_price(), Decimal::new(200, 0));
    }

    #[test]
    fn test_add_zero_is_noop() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(&product("a", 10), 0), CartChange::Unchanged);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_saturates_quantity() {
        let mut cart = Cart::new();
        cart.add(&product("a", 1), u32::MAX);
        cart.add(&product("a", 1), 5);
        assert_eq!(cart.quantity(&ProductId::new("a")), Some(u32::MAX));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add(&product("a", 10), 1);
        let before = cart.clone();

        assert_eq!(cart.remove(&ProductId::new("zzz")), CartChange::Unchanged);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_set_quantity_zero_or_negative_removes() {
        let mut cart = Cart::new();
        cart.add(&product("a", 10), 3);
        cart.add(&product("b", 10), 1);

        assert_eq!(
            cart.set_quantity(&ProductId::new("a"), 0),
            CartChange::Removed { quantity: 3 }
        );
        assert_eq!(
            cart.set_quantity(&ProductId::new("b"), -1),
            CartChange::Removed { quantity: 1 }
        );
        assert!(cart.is_empty());
        assert_eq!(cart.total_item_count(), 0);
    }

    #[test]
    fn test_set_quantity_absent_does_not_create() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.set_quantity(&ProductId::new("a"), 4),
            CartChange::Unchanged
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_overwrites() {
        let mut cart = Cart::new();
        cart.add(&product("a", 10), 3);
        assert_eq!(
            cart.set_quantity(&ProductId::new("a"), 7),
            CartChange::Updated { from: 3, to: 7 }
        );
        assert_eq!(cart.total_item_count(), 7);
    }

    #[test]
    fn test_set_quantity_saturates_large_values() {
        let mut cart = Cart::new();
        cart.add(&product("a", 1), 1);
        cart.set_quantity(&ProductId::new("a"), i64::MAX);
        assert_eq!(cart.quantity(&ProductId::new("a")), Some(u32::MAX));
    }

    #[test]
    fn test_total_price_saturates_on_overflow() {
        let mut cart = Cart::new();
        let mut pricey = product("a", 1);
        pricey.price = Decimal::from_i128_with_scale(100_000_000_000_000_000_000, 0);
        cart.add(&pricey, 1);
        cart.add(&product("b", 10), 1);
        cart.set_quantity(&ProductId::new("a"), i64::MAX);

        assert_eq!(cart.get(&ProductId::new("a")).unwrap().subtotal(), Decimal::MAX);
        assert_eq!(cart.total_price(), Decimal::MAX);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(&product("a", 10), 1);
        cart.add(&product("b", 10), 1);
        assert_eq!(cart.clear(), CartChange::Cleared { lines: 2 });
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals_scenario() {
        let mut cart = Cart::new();
        cart.add(&product("a", 999), 1);
        cart.add(&product("b", 250), 2);
        assert_eq!(cart.total_item_count(), 3);
        assert_eq!(cart.total_price(), Decimal::new(1499, 0));

        cart.set_quantity(&ProductId::new("a"), 5);
        assert_eq!(cart.total_item_count(), 7);
        assert_eq!(cart.total_price(), Decimal::new(5495, 0));

        cart.remove(&ProductId::new("b"));
        assert_eq!(cart.total_item_count(), 5);
        assert_eq!(cart.total_price(), Decimal::new(4995, 0));
    }

    #[test]
    fn test_serialized_layout() {
        let mut cart = Cart::new();
        cart.add(&product("a", 100), 2);

        let value = serde_json::to_value(&cart).unwrap();
        let row = &value[0];
        assert_eq!(row["_id"], "a");
        assert_eq!(row["name"], "Product a");
        assert_eq!(row["image"], "https://cdn.example/a.png");
        assert_eq!(row["description"], "");
        assert_eq!(row["price"].as_f64(), Some(100.0));
        assert_eq!(row["quantity"], 2);
    }

    #[test]
    fn test_deserialize_merges_duplicate_ids() {
        let json = r#"[
            {"_id": "a", "name": "A", "image": "", "description": "", "price": 10, "quantity": 1},
            {"_id": "b", "name": "B", "image": "", "description": "", "price": 5, "quantity": 1},
            {"_id": "a", "name": "A2", "image": "", "description": "", "price": 99, "quantity": 2}
        ]"#;

        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.len(), 2);

        let a = cart.get(&ProductId::new("a")).unwrap();
        assert_eq!(a.quantity.get(), 3);
        assert_eq!(a.unit_price, Decimal::new(10, 0));
        assert_eq!(a.display.name, "A");
        assert_eq!(cart.items().first().unwrap().id.as_str(), "a");
    }

    #[test]
    fn test_deserialize_rejects_zero_quantity() {
        let json = r#"[{"_id": "a", "name": "A", "price": 10, "quantity": 0}]"#;
        assert!(serde_json::from_str::<Cart>(json).is_err());
    }
}
