//! Per-session shop context.

use std::time::Instant;

use gamearena_core::ProductId;
use gamearena_core::cart::CartChange;
use tracing::{info, instrument};

use crate::cart_store::{CartStore, InitOutcome};
use crate::catalog::CatalogClient;
use crate::error::{AppError, Result};
use crate::storage::LocalStorage;
use crate::views::{AddedNotice, CartView, cart_badge};

/// Everything one shopper's session needs: the cart, the catalog and the
/// transient "added" confirmation.
///
/// Created once at session start and handed to every consumer. The cart is
/// loaded from storage exactly once, here.
#[derive(Debug)]
pub struct ShopSession<S> {
    cart: CartStore<S>,
    catalog: CatalogClient,
    init_outcome: InitOutcome,
    notice: Option<AddedNotice>,
}

impl<S: LocalStorage> ShopSession<S> {
    /// Start a session, restoring any cart left in `storage`.
    #[must_use]
    pub fn new(storage: S, catalog: CatalogClient) -> Self {
        let (cart, init_outcome) = CartStore::initialize(storage);

        Self {
            cart,
            catalog,
            init_outcome,
            notice: None,
        }
    }

    /// How the cart was obtained at session start.
    #[must_use]
    pub const fn init_outcome(&self) -> &InitOutcome {
        &self.init_outcome
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartStore<S> {
        &mut self.cart
    }

    #[must_use]
    pub const fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    /// Look up a product and add `quantity` units of it to the cart.
    ///
    /// # Errors
    ///
    /// - `InvalidQuantity` if `quantity` is zero or more than is in stock
    /// - `OutOfStock` if the product has no stock
    /// - `Catalog` if the product cannot be fetched
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn add_product(&mut self, id: &ProductId, quantity: u32) -> Result<CartChange> {
        if quantity == 0 {
            return Err(AppError::InvalidQuantity(
                "quantity must be at least 1".to_string(),
            ));
        }

        let product = self.catalog.get_product(id).await?;

        if !product.is_available() {
            return Err(AppError::OutOfStock(product.name));
        }
        if quantity > product.in_stock {
            return Err(AppError::InvalidQuantity(format!(
                "only {} of {} in stock",
                product.in_stock, product.name
            )));
        }

        let change = self.cart.add(&product, quantity);
        self.notice = Some(AddedNotice::raise(&product.name, Instant::now()));
        info!(quantity, name = %product.name, "Product added to cart");

        Ok(change)
    }

    /// The "added" confirmation, if it is still showing at `now`.
    #[must_use]
    pub fn notice_at(&self, now: Instant) -> Option<&AddedNotice> {
        self.notice
            .as_ref()
            .filter(|notice| notice.is_visible_at(now))
    }

    /// Cart page display data.
    #[must_use]
    pub fn cart_view(&self) -> CartView {
        CartView::from(self.cart.cart())
    }

    /// Cart icon badge text.
    #[must_use]
    pub fn badge(&self) -> Option<String> {
        cart_badge(self.cart.total_item_count())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use url::Url;

    use super::*;
    use crate::CART_STORAGE_KEY;
    use crate::config::CatalogConfig;
    use crate::storage::MemoryStorage;

    fn offline_catalog() -> CatalogClient {
        CatalogClient::new(&CatalogConfig {
            base_url: Url::parse("http://127.0.0.1:9").unwrap(),
            cache_ttl: Duration::from_secs(60),
            request_timeout: Duration::from_millis(200),
        })
        .unwrap()
    }

    #[test]
    fn test_new_session_restores_cart() {
        let storage = MemoryStorage::new();
        storage
            .set_item(
                CART_STORAGE_KEY,
                r#"[{"_id":"p1","name":"Headset","image":"h.png","description":"","price":250,"quantity":2}]"#,
            )
            .unwrap();

        let session = ShopSession::new(storage, offline_catalog());
        assert_eq!(session.init_outcome(), &InitOutcome::Restored { lines: 1 });
        assert_eq!(session.badge().as_deref(), Some("2"));
        assert_eq!(session.cart_view().subtotal, "₹500.00");
    }

    #[test]
    fn test_empty_session_has_no_badge() {
        let session = ShopSession::new(MemoryStorage::new(), offline_catalog());
        assert_eq!(session.init_outcome(), &InitOutcome::Fresh);
        assert!(session.badge().is_none());
        assert!(session.notice_at(Instant::now()).is_none());
    }

    #[tokio::test]
    async fn test_add_zero_is_rejected_before_lookup() {
        let mut session = ShopSession::new(MemoryStorage::new(), offline_catalog());
        let err = session
            .add_product(&ProductId::new("p1"), 0)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidQuantity(_)));
        assert!(session.cart().cart().is_empty());
    }
}
