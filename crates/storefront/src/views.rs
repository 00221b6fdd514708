//! Display models for the shop front-end.
//!
//! Everything here is presentation: formatting, badges, the transient "added"
//! confirmation and the product-page quantity picker. None of it changes the
//! cart.

use std::time::{Duration, Instant};

use gamearena_core::{Cart, LineItem, format_inr};

/// How long the "added to cart" confirmation stays visible.
pub const ADDED_NOTICE_DURATION: Duration = Duration::from_secs(2);

/// Largest count the cart badge shows before switching to `99+`.
const BADGE_MAX: u64 = 99;

/// Cart line display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub description: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart page display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
}

impl CartView {
    /// Whether there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            subtotal: format_inr(cart.total_price()),
            item_count: cart.total_item_count(),
        }
    }
}

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.display.name.clone(),
            image: item.display.image.clone(),
            description: item.display.description.clone(),
            quantity: item.quantity.get(),
            price: format_inr(item.unit_price),
            line_price: format_inr(item.subtotal()),
        }
    }
}

/// Text for the cart icon badge, or `None` when the cart is empty.
#[must_use]
pub fn cart_badge(count: u64) -> Option<String> {
    match count {
        0 => None,
        n if n > BADGE_MAX => Some(format!("{BADGE_MAX}+")),
        n => Some(n.to_string()),
    }
}

/// Transient confirmation shown after a product is added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedNotice {
    message: String,
    raised_at: Instant,
}

impl AddedNotice {
    /// Raise a confirmation for `product_name` at `now`.
    #[must_use]
    pub fn raise(product_name: &str, now: Instant) -> Self {
        Self {
            message: format!("{product_name} added to cart!"),
            raised_at: now,
        }
    }

    /// The confirmation text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the notice is still showing at `now`.
    #[must_use]
    pub fn is_visible_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) < ADDED_NOTICE_DURATION
    }
}

/// Product-page quantity picker, bounded to `1..=in_stock`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantitySelector {
    quantity: u32,
    in_stock: u32,
}

impl QuantitySelector {
    /// Start at one unit.
    #[must_use]
    pub const fn new(in_stock: u32) -> Self {
        Self {
            quantity: 1,
            in_stock,
        }
    }

    /// Currently selected quantity.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Step up by one, unless that would exceed the stock.
    pub const fn increase(&mut self) {
        if self.quantity < self.in_stock {
            self.quantity += 1;
        }
    }

    /// Step down by one, never below one.
    pub const fn decrease(&mut self) {
        if self.quantity > 1 {
            self.quantity -= 1;
        }
    }

    /// Whether the add button is enabled.
    #[must_use]
    pub const fn can_add(&self) -> bool {
        self.in_stock > 0
    }

    /// Whether the increase button is enabled.
    #[must_use]
    pub const fn can_increase(&self) -> bool {
        self.quantity < self.in_stock
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use gamearena_core::{CatalogProduct, ProductId};
    use rust_decimal::Decimal;

    use super::*;

    fn product(id: &str, name: &str, price: i64) -> CatalogProduct {
        CatalogProduct {
            id: ProductId::new(id),
            name: name.to_string(),
            price: Decimal::new(price, 0),
            image: format!("{id}.png"),
            description: String::new(),
            in_stock: 3,
            is_featured: false,
            category: None,
        }
    }

    #[test]
    fn test_cart_view_formats_prices() {
        let mut cart = Cart::new();
        cart.add(&product("a", "Arcade Stick", 999), 1);
        cart.add(&product("b", "Headset", 250), 2);

        let view = CartView::from(&cart);
        assert_eq!(view.item_count, 3);
        assert_eq!(view.subtotal, "₹1,499.00");

        let headset = view.items.get(1).unwrap();
        assert_eq!(headset.name, "Headset");
        assert_eq!(headset.price, "₹250.00");
        assert_eq!(headset.line_price, "₹500.00");
        assert_eq!(headset.image, "b.png");
    }

    #[test]
    fn test_empty_view() {
        let view = CartView::from(&Cart::new());
        assert!(view.is_empty());
        assert_eq!(view.item_count, 0);
        assert_eq!(view.subtotal, "₹0.00");
    }

    #[test]
    fn test_cart_badge() {
        assert_eq!(cart_badge(0), None);
        assert_eq!(cart_badge(7).as_deref(), Some("7"));
        assert_eq!(cart_badge(99).as_deref(), Some("99"));
        assert_eq!(cart_badge(100).as_deref(), Some("99+"));
    }

    #[test]
    fn test_added_notice_expires() {
        let start = Instant::now();
        let notice = AddedNotice::raise("Headset", start);

        assert_eq!(notice.message(), "Headset added to cart!");
        assert!(notice.is_visible_at(start));
        assert!(notice.is_visible_at(start + Duration::from_millis(1999)));
        assert!(!notice.is_visible_at(start + ADDED_NOTICE_DURATION));
    }

    #[test]
    fn test_quantity_selector_bounds() {
        let mut selector = QuantitySelector::new(2);
        selector.decrease();
        assert_eq!(selector.quantity(), 1);

        selector.increase();
        selector.increase();
        assert_eq!(selector.quantity(), 2);
        assert!(!selector.can_increase());
        assert!(selector.can_add());
    }

    #[test]
    fn test_quantity_selector_out_of_stock() {
        let mut selector = QuantitySelector::new(0);
        selector.increase();
        assert_eq!(selector.quantity(), 1);
        assert!(!selector.can_add());
    }
}
