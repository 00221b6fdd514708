//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! ga-cli products --search headset --sort price-high
//! ga-cli suggest "gam"
//! ga-cli product 64f1c0ffee
//! ```

use gamearena_core::{CatalogProduct, ProductId, format_inr};
use gamearena_storefront::catalog::{
    CatalogClient, CatalogError, ProductQuery, SortOrder, search_suggestions,
};
use gamearena_storefront::views::QuantitySelector;

/// List products matching the search, category and sort options.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched.
pub async fn list(
    catalog: &CatalogClient,
    search: Option<&str>,
    category: Option<&str>,
    sort: SortOrder,
) -> Result<(), CatalogError> {
    let products = catalog.list_products().await?;
    let query = ProductQuery::new(search, category, sort);
    let matches = query.apply(&products);

    tracing::debug!(total = products.len(), shown = matches.len(), %sort, "Listing products");

    #[allow(clippy::print_stdout)]
    {
        if matches.is_empty() {
            println!("No products found");
        }
        for product in matches {
            println!("{}", summary_line(product));
        }
    }
    Ok(())
}

/// Print search-box suggestions for `term`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched.
pub async fn suggest(catalog: &CatalogClient, term: &str) -> Result<(), CatalogError> {
    let products = catalog.list_products().await?;

    #[allow(clippy::print_stdout)]
    {
        for name in search_suggestions(&products, term) {
            println!("{name}");
        }
    }
    Ok(())
}

/// Show a single product.
///
/// # Errors
///
/// Returns `CatalogError::NotFound` if no product has this id.
pub async fn show(catalog: &CatalogClient, id: &ProductId) -> Result<(), CatalogError> {
    let product = catalog.get_product(id).await?;
    let selector = QuantitySelector::new(product.in_stock);

    #[allow(clippy::print_stdout)]
    {
        println!("{}", product.name);
        println!("  id:    {}", product.id);
        println!("  price: {}", format_inr(product.price));
        if selector.can_add() {
            println!("  stock: {} available", product.in_stock);
        } else {
            println!("  stock: out of stock");
        }
        if let Some(category) = product.category_id() {
            println!("  category: {category}");
        }
        if !product.description.is_empty() {
            println!();
            println!("{}", product.description);
        }
    }
    Ok(())
}

fn summary_line(product: &CatalogProduct) -> String {
    let featured = if product.is_featured { "*" } else { " " };
    let stock = if product.is_available() {
        format!("{} in stock", product.in_stock)
    } else {
        "out of stock".to_string()
    };
    format!(
        "{featured} {:<24} {:>14}  {:<14} {}",
        product.id.as_str(),
        format_inr(product.price),
        stock,
        product.name
    )
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_summary_line_marks_featured_and_stock() {
        let product = CatalogProduct {
            id: ProductId::new("p1"),
            name: "Arcade Stick".to_string(),
            price: Decimal::new(899_900, 2),
            image: String::new(),
            description: String::new(),
            in_stock: 0,
            is_featured: true,
            category: None,
        };

        let line = summary_line(&product);
        assert!(line.starts_with("* p1"));
        assert!(line.contains("₹8,999.00"));
        assert!(line.contains("out of stock"));
        assert!(line.ends_with("Arcade Stick"));
    }
}
