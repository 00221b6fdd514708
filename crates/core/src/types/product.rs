//! Catalog product records as served by the shop API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId};

/// A product as returned by `GET /api/products` and `GET /api/products/{id}`.
///
/// Field names follow the API's JSON (`_id`, `inStock`, `isFeatured`).
/// Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    #[serde(rename = "_id")]
    pub id: ProductId,
    #[serde(default)]
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    /// Units available for sale.
    #[serde(default)]
    pub in_stock: u32,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRef>,
}

impl CatalogProduct {
    /// Whether at least one unit can be added to a cart.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.in_stock > 0
    }

    /// Denormalized display metadata captured into a cart line.
    #[must_use]
    pub fn display_fields(&self) -> DisplayFields {
        DisplayFields {
            name: self.name.clone(),
            image: self.image.clone(),
            description: self.description.clone(),
        }
    }

    /// The category id, whether the API sent a bare id or a populated object.
    #[must_use]
    pub fn category_id(&self) -> Option<&CategoryId> {
        self.category.as_ref().map(CategoryRef::id)
    }
}

/// A product's category: a bare id, or the populated category document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Id(CategoryId),
    Populated {
        #[serde(rename = "_id")]
        id: CategoryId,
        #[serde(default)]
        name: String,
    },
}

impl CategoryRef {
    /// The referenced category id.
    #[must_use]
    pub const fn id(&self) -> &CategoryId {
        match self {
            Self::Id(id) | Self::Populated { id, .. } => id,
        }
    }
}

/// Catalog metadata copied into a cart line at insertion time.
///
/// Rendering a cart never re-fetches the catalog; these fields are what the
/// cart page shows even if the product changes later.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
}
