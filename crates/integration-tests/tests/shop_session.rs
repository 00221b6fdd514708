//! Adding catalog products to the cart through a shop session.

#![allow(clippy::unwrap_used)]

use std::fs;
use std::time::{Duration, Instant};

use gamearena_core::ProductId;
use gamearena_core::cart::CartChange;
use gamearena_integration_tests::{StubCatalog, product_json, temp_storage_dir};
use gamearena_storefront::catalog::CatalogError;
use gamearena_storefront::error::AppError;
use gamearena_storefront::storage::{FileStorage, MemoryStorage};
use gamearena_storefront::{InitOutcome, ShopSession};
use rust_decimal::Decimal;

async fn stub() -> StubCatalog {
    StubCatalog::spawn(vec![
        product_json("p1", "Gamepad", 1499.0, 5),
        product_json("p2", "Racing Wheel", 12999.0, 0),
        product_json("p3", "Headset", 4999.0, 2),
    ])
    .await
}

#[tokio::test]
async fn test_add_product_updates_cart_and_notice() {
    let stub = stub().await;
    let mut session = ShopSession::new(MemoryStorage::new(), stub.client());

    let change = session.add_product(&ProductId::new("p1"), 2).await.unwrap();
    assert_eq!(change, CartChange::Inserted { quantity: 2 });

    let change = session.add_product(&ProductId::new("p1"), 1).await.unwrap();
    assert_eq!(change, CartChange::Merged { from: 2, to: 3 });

    assert_eq!(session.cart().total_price(), Decimal::new(4497, 0));
    assert_eq!(session.badge().as_deref(), Some("3"));

    let now = Instant::now();
    let notice = session.notice_at(now).unwrap();
    assert_eq!(notice.message(), "Gamepad added to cart!");
    assert!(session.notice_at(now + Duration::from_secs(3)).is_none());
}

#[tokio::test]
async fn test_out_of_stock_is_rejected() {
    let stub = stub().await;
    let mut session = ShopSession::new(MemoryStorage::new(), stub.client());

    let err = session
        .add_product(&ProductId::new("p2"), 1)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::OutOfStock(name) if name == "Racing Wheel"));
    assert!(session.cart().cart().is_empty());
    assert!(session.notice_at(Instant::now()).is_none());
}

#[tokio::test]
async fn test_quantity_above_stock_is_rejected() {
    let stub = stub().await;
    let mut session = ShopSession::new(MemoryStorage::new(), stub.client());

    let err = session
        .add_product(&ProductId::new("p3"), 3)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidQuantity(_)));
    assert!(err.is_user_error());
}

#[tokio::test]
async fn test_unknown_product() {
    let stub = stub().await;
    let mut session = ShopSession::new(MemoryStorage::new(), stub.client());

    let err = session
        .add_product(&ProductId::new("nope"), 1)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Catalog(CatalogError::NotFound(_))));
}

#[tokio::test]
async fn test_session_cart_persists_between_sessions() {
    let stub = stub().await;
    let dir = temp_storage_dir("session");

    {
        let mut session = ShopSession::new(FileStorage::new(&dir), stub.client());
        session.add_product(&ProductId::new("p3"), 2).await.unwrap();
    }

    let session = ShopSession::new(FileStorage::new(&dir), stub.client());
    assert_eq!(session.init_outcome(), &InitOutcome::Restored { lines: 1 });

    let view = session.cart_view();
    assert_eq!(view.item_count, 2);
    assert_eq!(view.subtotal, "₹9,998.00");

    let _ = fs::remove_dir_all(&dir);
}
