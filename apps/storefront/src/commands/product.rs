//! # Product Commands
//!
//! Browsing, search, sorting and admin edits of the catalog.
//!
//! ## Browse Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Browse Flow                                  │
//! │                                                                         │
//! │  Route /category/Accessories/Grips                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  browse_category { category: "Accessories", subCategory: "Grips" }     │
//! │       │                                                                 │
//! │       ▼  lower-case route segments                                      │
//! │  ┌───────────────────────────────────────────┐                         │
//! │  │  sub-category given?                      │                         │
//! │  │  YES: filter_by_sub_category(cat, sub)    │                         │
//! │  │  NO:  filter_by_category(cat)             │                         │
//! │  └───────────────────────────────────────────┘                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogSnapshot (filtered view in catalog order, sort cleared)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use storefront_core::seed;
use storefront_core::validation::validate_search_query;
use storefront_core::{CatalogSnapshot, Category, Product, SortKey};

use crate::error::ApiError;
use crate::state::{CatalogStore, ConfigState};

/// A navigation category with its product count.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    #[serde(flatten)]
    pub category: Category,
    pub slug: String,
    pub product_count: usize,
}

/// Current catalog view.
pub fn list_products(catalog: &CatalogStore) -> CatalogSnapshot {
    debug!("list_products command");
    catalog.with_catalog(|c| c.snapshot())
}

/// Looks up a product and makes it the selected one (product detail page).
///
/// ## Errors
/// `NOT_FOUND` for an unknown id; the previous selection is then cleared.
pub fn get_product(catalog: &CatalogStore, id: &str) -> Result<Product, ApiError> {
    debug!(product_id = %id, "get_product command");

    catalog.with_catalog_mut(|c| {
        c.set_selected_product(id);
        c.selected_product()
            .cloned()
            .ok_or_else(|| ApiError::not_found("Product", id))
    })
}

pub fn clear_selected_product(catalog: &CatalogStore) -> CatalogSnapshot {
    debug!("clear_selected_product command");
    catalog.with_catalog_mut(|c| {
        c.clear_selected_product();
        c.snapshot()
    })
}

/// Filters by category, or by sub-category within it.
///
/// Route segments arrive as typed in the URL ("Accessories") while product
/// tags are lower-case slugs, so both are lower-cased here.
pub fn browse_category(
    catalog: &CatalogStore,
    category: &str,
    sub_category: Option<&str>,
) -> CatalogSnapshot {
    let category = category.to_lowercase();
    let sub_category = sub_category.map(str::to_lowercase);
    debug!(category = %category, sub_category = ?sub_category, "browse_category command");

    catalog.with_catalog_mut(|c| {
        match &sub_category {
            Some(sub) => c.filter_by_sub_category(&category, sub),
            None => c.filter_by_category(&category),
        }
        c.snapshot()
    })
}

/// Case-insensitive substring search. An empty query shows everything.
///
/// ## Errors
/// `VALIDATION_ERROR` for queries over 100 characters.
pub fn search_products(catalog: &CatalogStore, query: &str) -> Result<CatalogSnapshot, ApiError> {
    debug!(query = %query, "search_products command");
    validate_search_query(query).map_err(|e| ApiError::validation(e.to_string()))?;

    Ok(catalog.with_catalog_mut(|c| {
        c.search_products(query);
        c.snapshot()
    }))
}

/// Sorts the current view. `key` is one of `price_asc`, `price_desc`,
/// `name_asc`, `name_desc`, `rating`.
pub fn sort_products(catalog: &CatalogStore, key: &str) -> Result<CatalogSnapshot, ApiError> {
    debug!(key = %key, "sort_products command");
    let key: SortKey = key.parse()?;

    Ok(catalog.with_catalog_mut(|c| {
        c.sort_products(key);
        c.snapshot()
    }))
}

pub fn clear_filters(catalog: &CatalogStore) -> CatalogSnapshot {
    debug!("clear_filters command");
    catalog.with_catalog_mut(|c| {
        c.clear_filters();
        c.snapshot()
    })
}

/// Home page strip: the highest rated products.
pub fn featured_products(
    catalog: &CatalogStore,
    config: &ConfigState,
    limit: Option<usize>,
) -> Vec<Product> {
    let limit = limit.unwrap_or(config.featured_count);
    debug!(limit = %limit, "featured_products command");
    catalog.with_catalog(|c| c.featured(limit))
}

/// Navigation tree with live product counts.
pub fn list_categories(catalog: &CatalogStore) -> Vec<CategoryResponse> {
    debug!("list_categories command");
    catalog.with_catalog(|c| {
        seed::categories()
            .into_iter()
            .map(|category| {
                let slug = category.slug();
                CategoryResponse {
                    product_count: c.count_in_category(&slug),
                    slug,
                    category,
                }
            })
            .collect()
    })
}

/// Adds a product. A blank id gets a generated one.
pub fn add_product(catalog: &CatalogStore, mut product: Product) -> Result<Product, ApiError> {
    if product.id.trim().is_empty() {
        product.id = Uuid::new_v4().to_string();
    }
    debug!(product_id = %product.id, "add_product command");

    catalog.with_catalog_mut(|c| c.add_product(product.clone()))?;
    info!(product_id = %product.id, name = %product.name, "Product added");
    Ok(product)
}

pub fn update_product(catalog: &CatalogStore, product: Product) -> Result<Product, ApiError> {
    debug!(product_id = %product.id, "update_product command");
    catalog.with_catalog_mut(|c| c.update_product(product.clone()))?;
    info!(product_id = %product.id, "Product updated");
    Ok(product)
}

/// Removes a product from the catalog. Carts keep their copy.
pub fn delete_product(catalog: &CatalogStore, id: &str) -> Result<Product, ApiError> {
    debug!(product_id = %id, "delete_product command");
    let removed = catalog.with_catalog_mut(|c| c.delete_product(id))?;
    info!(product_id = %id, "Product deleted");
    Ok(removed)
}
