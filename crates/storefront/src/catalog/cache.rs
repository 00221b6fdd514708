//! Cache types for catalog API responses.

use std::sync::Arc;

use gamearena_core::{CatalogProduct, ProductId};

/// Cache key for catalog responses.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Product(ProductId),
    Products,
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<CatalogProduct>),
    Products(Arc<Vec<CatalogProduct>>),
}
