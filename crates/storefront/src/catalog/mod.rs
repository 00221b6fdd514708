//! Product catalog client.
//!
//! The cart never owns product data; it copies what it needs from a
//! [`CatalogProduct`] at add time. This module fetches those records from the
//! shop API and keeps them in a short-lived `moka` cache.
//!
//! # Endpoints
//!
//! - `GET {base}/api/products` returns `{ "products": [...] }`
//! - `GET {base}/api/products/{id}` returns `{ "success": true, "product": {...} }`,
//!   or `404` with `{ "success": false, "error": "..." }`
//!
//! # Example
//!
//! ```rust,ignore
//! use gamearena_storefront::catalog::CatalogClient;
//!
//! let catalog = CatalogClient::new(&config.catalog)?;
//! let product = catalog.get_product(&ProductId::new("6650a1b2c3d4e5f601234567")).await?;
//! ```

mod cache;
pub mod query;

use std::sync::Arc;

use gamearena_core::{CatalogProduct, ProductId};
use moka::future::Cache;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::CatalogConfig;

use cache::{CacheKey, CacheValue};

pub use query::{ProductQuery, SortOrder, search_suggestions};

/// Maximum number of cached responses.
const CACHE_CAPACITY: u64 = 1000;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Product does not exist.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The API answered with a non-success status.
    #[error("Catalog API returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The request URL could not be built from the base URL.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),
}

#[derive(Debug, Deserialize)]
struct ProductsEnvelope {
    #[serde(default)]
    products: Vec<CatalogProduct>,
}

#[derive(Debug, Deserialize)]
struct ProductEnvelope {
    product: Option<CatalogProduct>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
}

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the shop's product API.
///
/// Cheap to clone; clones share the HTTP connection pool and the cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Cache<CacheKey, CacheValue>,
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Http` if the HTTP client cannot be built.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: with_trailing_slash(config.base_url.clone()),
                cache,
            }),
        })
    }

    /// Fetch every product in the shop.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request fails or the body is malformed.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Arc<Vec<CatalogProduct>>, CatalogError> {
        if let Some(CacheValue::Products(products)) =
            self.inner.cache.get(&CacheKey::Products).await
        {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let url = self.products_url()?;
        let body = self.fetch(url, None).await?;
        let envelope: ProductsEnvelope = serde_json::from_str(&body)?;
        let products = Arc::new(envelope.products);

        debug!(count = products.len(), "Fetched products");
        self.inner
            .cache
            .insert(CacheKey::Products, CacheValue::Products(Arc::clone(&products)))
            .await;

        Ok(products)
    }

    /// Fetch a single product by id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the API has no such product, or
    /// another `CatalogError` if the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: &ProductId) -> Result<CatalogProduct, CatalogError> {
        let cache_key = CacheKey::Product(id.clone());
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let url = self.product_url(id)?;
        let body = self.fetch(url, Some(id)).await?;
        let envelope: ProductEnvelope = serde_json::from_str(&body)?;
        let product = envelope
            .product
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Drop every cached response.
    pub fn invalidate_cache(&self) {
        self.inner.cache.invalidate_all();
    }

    /// GET `url` and return the body of a successful response.
    async fn fetch(&self, url: Url, id: Option<&ProductId>) -> Result<String, CatalogError> {
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status == reqwest::StatusCode::NOT_FOUND
            && let Some(id) = id
        {
            return Err(CatalogError::NotFound(id.to_string()));
        }

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .ok()
                .and_then(|e| e.error)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());
            return Err(CatalogError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }

    fn products_url(&self) -> Result<Url, CatalogError> {
        self.inner
            .base_url
            .join("api/products")
            .map_err(|e| CatalogError::InvalidUrl(e.to_string()))
    }

    fn product_url(&self, id: &ProductId) -> Result<Url, CatalogError> {
        let mut url = self.products_url()?;
        url.path_segments_mut()
            .map_err(|()| CatalogError::InvalidUrl(self.inner.base_url.to_string()))?
            .push(id.as_str());
        Ok(url)
    }
}

/// Relative joins replace the last path segment unless the base ends in `/`.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
