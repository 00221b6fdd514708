//! Cart commands.
//!
//! Each run opens the stored cart, applies one change and prints the result.

use gamearena_core::ProductId;
use gamearena_core::cart::CartChange;
use gamearena_storefront::ShopSession;
use gamearena_storefront::error::AppError;
use gamearena_storefront::storage::LocalStorage;
use gamearena_storefront::views::CartView;

/// Add `quantity` units of a catalog product.
///
/// # Errors
///
/// Returns an error if the product is unknown, out of stock, or the
/// quantity is not allowed.
pub async fn add<S: LocalStorage>(
    session: &mut ShopSession<S>,
    id: &ProductId,
    quantity: u32,
) -> Result<(), AppError> {
    session.add_product(id, quantity).await?;

    if let Some(notice) = session.notice_at(std::time::Instant::now()) {
        #[allow(clippy::print_stdout)]
        {
            println!("{}", notice.message());
        }
    }
    Ok(())
}

pub fn remove<S: LocalStorage>(session: &mut ShopSession<S>, id: &ProductId) {
    let change = session.cart_mut().remove(id);
    report(id, &change);
}

pub fn set<S: LocalStorage>(session: &mut ShopSession<S>, id: &ProductId, quantity: i64) {
    let change = session.cart_mut().set_quantity(id, quantity);
    report(id, &change);
}

pub fn clear<S: LocalStorage>(session: &mut ShopSession<S>) {
    let change = session.cart_mut().clear();
    tracing::debug!(?change, "Cart cleared");
}

/// Print the cart page.
pub fn show<S: LocalStorage>(session: &ShopSession<S>) {
    let view = session.cart_view();

    #[allow(clippy::print_stdout)]
    {
        for line in render(&view, session.badge().as_deref()) {
            println!("{line}");
        }
    }
}

fn report(id: &ProductId, change: &CartChange) {
    if *change == CartChange::Unchanged {
        tracing::info!(product_id = %id, "Product is not in the cart");
    }
}

fn render(view: &CartView, badge: Option<&str>) -> Vec<String> {
    if view.is_empty() {
        return vec!["Your cart is empty".to_string()];
    }

    let mut lines = vec![format!("Cart ({})", badge.unwrap_or("0"))];
    lines.extend(view.items.iter().map(|item| {
        format!(
            "  {:<24} {} x {:>3} = {}  {}",
            item.id, item.price, item.quantity, item.line_price, item.name
        )
    }));
    lines.push(format!("  Subtotal: {}", view.subtotal));
    lines
}
