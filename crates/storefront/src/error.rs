//! Application-level error type for the shop session.
//!
//! Cart operations themselves never fail; these errors come from the steps
//! around them (loading configuration, fetching a product, validating what
//! the shopper asked for).

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog API operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// The product cannot be added because none are in stock.
    #[error("Out of stock: {0}")]
    OutOfStock(String),

    /// The requested quantity is not allowed.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),
}

impl AppError {
    /// Whether the error was caused by shopper input rather than a fault.
    ///
    /// Faults are worth reporting to error tracking; user errors are not.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::OutOfStock(_) | Self::InvalidQuantity(_) | Self::Catalog(CatalogError::NotFound(_))
        )
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
