//! Integration tests for GameArena.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p gamearena-integration-tests
//! ```
//!
//! No external services are needed. Catalog tests run against a stub API
//! served by [`StubCatalog`] on a random local port, and cart tests write to
//! a fresh directory under the system temp dir.
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart snapshots across sessions on disk
//! - `catalog_client` - HTTP catalog client against the stub API
//! - `shop_session` - Adding catalog products through a session

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use gamearena_storefront::catalog::CatalogClient;
use gamearena_storefront::config::CatalogConfig;
use serde_json::{Value, json};
use url::Url;

/// Product id for which the stub API answers `500`.
pub const FAILING_PRODUCT_ID: &str = "explode";

/// A fresh, not yet created directory under the system temp dir.
#[must_use]
pub fn temp_storage_dir(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!("gamearena_it_{label}_{}", uuid::Uuid::new_v4()))
}

/// A product record in the catalog API's JSON shape.
#[must_use]
pub fn product_json(id: &str, name: &str, price: f64, in_stock: u32) -> Value {
    json!({
        "_id": id,
        "name": name,
        "price": price,
        "image": format!("/images/{id}.png"),
        "description": format!("{name} for serious players"),
        "inStock": in_stock,
        "isFeatured": false,
        "category": { "_id": "accessories", "name": "Accessories" },
        "createdAt": "2025-01-01T00:00:00.000Z"
    })
}

/// In-process stand-in for the shop's product API.
pub struct StubCatalog {
    pub base_url: Url,
    hits: Arc<AtomicUsize>,
}

#[derive(Clone)]
struct StubState {
    products: Arc<Vec<Value>>,
    hits: Arc<AtomicUsize>,
}

impl StubCatalog {
    /// Serve `products` on `127.0.0.1` at a random port.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn spawn(products: Vec<Value>) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let state = StubState {
            products: Arc::new(products),
            hits: Arc::clone(&hits),
        };

        let app = Router::new()
            .route("/api/products", get(list_products))
            .route("/api/products/{id}", get(get_product))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub catalog");
        let addr = listener.local_addr().expect("Stub catalog has no address");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Stub catalog server failed");
        });

        Self {
            base_url: Url::parse(&format!("http://{addr}")).expect("Invalid stub URL"),
            hits,
        }
    }

    /// Number of requests the stub has answered.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// A catalog client pointed at this stub.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    #[must_use]
    pub fn client(&self) -> CatalogClient {
        CatalogClient::new(&CatalogConfig {
            base_url: self.base_url.clone(),
            cache_ttl: Duration::from_secs(60),
            request_timeout: Duration::from_secs(5),
        })
        .expect("Failed to build catalog client")
    }
}

async fn list_products(State(state): State<StubState>) -> Json<Value> {
    state.hits.fetch_add(1, Ordering::SeqCst);
    Json(json!({ "products": state.products.as_slice() }))
}

async fn get_product(
    State(state): State<StubState>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    state.hits.fetch_add(1, Ordering::SeqCst);

    if id == FAILING_PRODUCT_ID {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "error": "Failed to fetch product" })),
        );
    }

    state
        .products
        .iter()
        .find(|p| p.get("_id").and_then(Value::as_str) == Some(id.as_str()))
        .map_or_else(
            || {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "success": false, "error": "Product not found" })),
                )
            },
            |product| {
                (
                    StatusCode::OK,
                    Json(json!({ "success": true, "product": product })),
                )
            },
        )
}
