//! Shop-page product search, filtering and sorting.
//!
//! Runs client-side over the list returned by
//! [`CatalogClient::list_products`](super::CatalogClient::list_products).

use std::fmt;
use std::str::FromStr;

use gamearena_core::{CatalogProduct, CategoryId};

/// Number of names offered as search suggestions.
pub const MAX_SUGGESTIONS: usize = 5;

/// Category filter value meaning "every category".
pub const ALL_CATEGORIES: &str = "all";

/// Product list ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Featured products first, otherwise catalog order.
    #[default]
    Featured,
    /// Cheapest first.
    PriceLow,
    /// Most expensive first.
    PriceHigh,
    /// Alphabetical by name, case-insensitive.
    Name,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Featured => write!(f, "featured"),
            Self::PriceLow => write!(f, "price-low"),
            Self::PriceHigh => write!(f, "price-high"),
            Self::Name => write!(f, "name"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "featured" => Ok(Self::Featured),
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            "name" => Ok(Self::Name),
            _ => Err(format!(
                "invalid sort order: {s} (expected featured, price-low, price-high or name)"
            )),
        }
    }
}

/// Search, category filter and sort applied to a product list.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    /// Case-insensitive substring matched against name and description.
    pub search: Option<String>,
    /// Only products in this category. `None` means all categories.
    pub category: Option<CategoryId>,
    pub sort: SortOrder,
}

impl ProductQuery {
    /// Build a query from raw shop-page inputs.
    ///
    /// Blank search terms are ignored, and the category value `all` means no
    /// category filter.
    #[must_use]
    pub fn new(search: Option<&str>, category: Option<&str>, sort: SortOrder) -> Self {
        let search = search
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_owned);
        let category = category
            .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
            .map(CategoryId::from);

        Self {
            search,
            category,
            sort,
        }
    }

    /// Filter and sort `products`. Sorting is stable.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [CatalogProduct]) -> Vec<&'a CatalogProduct> {
        let needle = self.search.as_deref().map(str::to_lowercase);

        let mut result: Vec<&CatalogProduct> = products
            .iter()
            .filter(|product| {
                needle.as_deref().is_none_or(|needle| {
                    product.name.to_lowercase().contains(needle)
                        || product.description.to_lowercase().contains(needle)
                })
            })
            .filter(|product| {
                self.category
                    .as_ref()
                    .is_none_or(|category| product.category_id() == Some(category))
            })
            .collect();

        match self.sort {
            SortOrder::Featured => result.sort_by_key(|product| !product.is_featured),
            SortOrder::PriceLow => result.sort_by(|a, b| a.price.cmp(&b.price)),
            SortOrder::PriceHigh => result.sort_by(|a, b| b.price.cmp(&a.price)),
            SortOrder::Name => result.sort_by_cached_key(|product| product.name.to_lowercase()),
        }

        result
    }
}

/// Up to [`MAX_SUGGESTIONS`] product names containing `term`, in catalog order.
#[must_use]
pub fn search_suggestions<'a>(products: &'a [CatalogProduct], term: &str) -> Vec<&'a str> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return Vec::new();
    }

    products
        .iter()
        .filter(|product| product.name.to_lowercase().contains(&term))
        .take(MAX_SUGGESTIONS)
        .map(|product| product.name.as_str())
        .collect()
}
