//! # Catalog State
//!
//! Holds the authoritative product list and the derived view the product
//! grid shows.
//!
//! ## View Derivation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog View Derivation                              │
//! │                                                                         │
//! │   products (authoritative)                                              │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   last filter intent (overrides the previous one)                       │
//! │   ├── All            → every product                                    │
//! │   ├── Category       → category == c                                    │
//! │   ├── SubCategory    → category == c && sub_category == s               │
//! │   └── Search         → name/description/category/sub contains q         │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   last sort key (stable)                                                │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   filtered_products                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Filter, search, sort and selection intents are total. Only the admin
//! edits (`add_product`, `update_product`, `delete_product`) can fail.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::Product;
use crate::validation::validate_product;

// =============================================================================
// Sort Key
// =============================================================================

/// Orderings offered by the "Sort by" menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
    /// Highest rating first.
    Rating,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::PriceAsc => "price_asc",
            SortKey::PriceDesc => "price_desc",
            SortKey::NameAsc => "name_asc",
            SortKey::NameDesc => "name_desc",
            SortKey::Rating => "rating",
        }
    }

    /// Comparator for a stable sort.
    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortKey::PriceAsc => a.price.cmp(&b.price),
            SortKey::PriceDesc => b.price.cmp(&a.price),
            SortKey::NameAsc => compare_names(a, b),
            SortKey::NameDesc => compare_names(b, a),
            SortKey::Rating => b.rating.total_cmp(&a.rating),
        }
    }
}

impl FromStr for SortKey {
    type Err = CoreError;

    /// ```rust
    /// use storefront_core::catalog::SortKey;
    ///
    /// assert_eq!("price_desc".parse::<SortKey>().unwrap(), SortKey::PriceDesc);
    /// assert!("cheapest".parse::<SortKey>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price_asc" => Ok(SortKey::PriceAsc),
            "price_desc" => Ok(SortKey::PriceDesc),
            "name_asc" => Ok(SortKey::NameAsc),
            "name_desc" => Ok(SortKey::NameDesc),
            "rating" => Ok(SortKey::Rating),
            other => Err(CoreError::InvalidSortKey(other.to_string())),
        }
    }
}

/// Case-insensitive first, then raw bytes so the order is total.
fn compare_names(a: &Product, b: &Product) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
}

// =============================================================================
// Catalog State
// =============================================================================

/// Which filter intent produced the current view.
#[derive(Debug, Clone, PartialEq, Eq)]
enum View {
    All,
    Category(String),
    SubCategory { category: String, sub_category: String },
    Search(String),
}

/// The catalog store.
///
/// `search_query`, `current_category` and `current_sub_category` remember the
/// last parameters each intent was given so the UI can redisplay them. They
/// are not cross-checked: a search leaves `current_category` as it was.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogState {
    products: Vec<Product>,
    filtered_products: Vec<Product>,
    selected_product: Option<Product>,
    search_query: String,
    current_category: Option<String>,
    current_sub_category: Option<String>,
    view: View,
    sort: Option<SortKey>,
}

impl CatalogState {
    /// Creates a catalog whose view shows every seed product.
    pub fn new(products: Vec<Product>) -> Self {
        CatalogState {
            filtered_products: products.clone(),
            products,
            selected_product: None,
            search_query: String::new(),
            current_category: None,
            current_sub_category: None,
            view: View::All,
            sort: None,
        }
    }

    // -------------------------------------------------------------------------
    // Filter intents
    // -------------------------------------------------------------------------

    /// Shows only products tagged with `category`.
    ///
    /// Clears the current sub-category. Matching is exact.
    pub fn filter_by_category(&mut self, category: &str) {
        self.current_category = Some(category.to_string());
        self.current_sub_category = None;
        self.apply(View::Category(category.to_string()), None);
    }

    /// Shows only products tagged with both `category` and `sub_category`.
    ///
    /// Takes the category explicitly, so it does not depend on a prior
    /// `filter_by_category` call.
    ///
    /// ```rust
    /// use storefront_core::catalog::CatalogState;
    /// use storefront_core::seed;
    ///
    /// let mut catalog = CatalogState::new(seed::products());
    /// catalog.filter_by_sub_category("accessories", "grips");
    /// assert!(!catalog.filtered_products().is_empty());
    /// assert!(catalog
    ///     .filtered_products()
    ///     .iter()
    ///     .all(|p| p.sub_category.as_deref() == Some("grips")));
    /// ```
    pub fn filter_by_sub_category(&mut self, category: &str, sub_category: &str) {
        self.current_category = Some(category.to_string());
        self.current_sub_category = Some(sub_category.to_string());
        self.apply(
            View::SubCategory {
                category: category.to_string(),
                sub_category: sub_category.to_string(),
            },
            None,
        );
    }

    /// Case-insensitive substring search over the full product list.
    ///
    /// An empty query shows every product. Overrides any category filter.
    pub fn search_products(&mut self, query: &str) {
        self.search_query = query.to_string();
        let view = if query.is_empty() {
            View::All
        } else {
            View::Search(query.to_lowercase())
        };
        self.apply(view, None);
    }

    /// Shows every product and forgets all filter parameters.
    pub fn clear_filters(&mut self) {
        self.current_category = None;
        self.current_sub_category = None;
        self.search_query.clear();
        self.apply(View::All, None);
    }

    /// Stable reorder of the current view.
    pub fn sort_products(&mut self, key: SortKey) {
        self.sort = Some(key);
        self.filtered_products.sort_by(|a, b| key.compare(a, b));
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Focuses the product with `id`, looked up in the full list.
    ///
    /// An unknown id clears the selection.
    pub fn set_selected_product(&mut self, id: &str) {
        self.selected_product = self.product(id).cloned();
    }

    pub fn clear_selected_product(&mut self) {
        self.selected_product = None;
    }

    // -------------------------------------------------------------------------
    // Admin edits
    // -------------------------------------------------------------------------

    /// Appends a new product.
    ///
    /// ## Errors
    /// - `Validation` if the product fails [`validate_product`]
    /// - `DuplicateProduct` if the id is taken
    pub fn add_product(&mut self, product: Product) -> CoreResult<()> {
        validate_product(&product)?;
        if self.product(&product.id).is_some() {
            return Err(CoreError::DuplicateProduct(product.id));
        }

        self.products.push(product);
        self.refresh_view();
        Ok(())
    }

    /// Replaces the product with the same id.
    pub fn update_product(&mut self, product: Product) -> CoreResult<()> {
        validate_product(&product)?;
        let slot = self
            .products
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or_else(|| CoreError::ProductNotFound(product.id.clone()))?;

        if self.selected_product.as_ref().is_some_and(|s| s.id == product.id) {
            self.selected_product = Some(product.clone());
        }
        *slot = product;
        self.refresh_view();
        Ok(())
    }

    /// Removes the product with `id`, returning it.
    pub fn delete_product(&mut self, id: &str) -> CoreResult<Product> {
        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;

        let removed = self.products.remove(index);
        if self.selected_product.as_ref().is_some_and(|s| s.id == id) {
            self.selected_product = None;
        }
        self.refresh_view();
        Ok(removed)
    }

    /// Applies an intent.
    pub fn dispatch(&mut self, intent: CatalogIntent) {
        match intent {
            CatalogIntent::FilterByCategory { category } => self.filter_by_category(&category),
            CatalogIntent::FilterBySubCategory {
                category,
                sub_category,
            } => self.filter_by_sub_category(&category, &sub_category),
            CatalogIntent::SearchProducts { query } => self.search_products(&query),
            CatalogIntent::SetSelectedProduct { id } => self.set_selected_product(&id),
            CatalogIntent::ClearSelectedProduct => self.clear_selected_product(),
            CatalogIntent::ClearFilters => self.clear_filters(),
            CatalogIntent::SortProducts { key } => self.sort_products(key),
        }
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn filtered_products(&self) -> &[Product] {
        &self.filtered_products
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.selected_product.as_ref()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn current_category(&self) -> Option<&str> {
        self.current_category.as_deref()
    }

    pub fn current_sub_category(&self) -> Option<&str> {
        self.current_sub_category.as_deref()
    }

    /// Looks up a product in the full list.
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Top `limit` products by rating, ties in catalog order.
    pub fn featured(&self, limit: usize) -> Vec<Product> {
        let mut ranked = self.products.clone();
        ranked.sort_by(|a, b| SortKey::Rating.compare(a, b));
        ranked.truncate(limit);
        ranked
    }

    /// Number of products tagged with `category` in the full list.
    pub fn count_in_category(&self, category: &str) -> usize {
        self.products.iter().filter(|p| p.category == category).count()
    }

    /// Read-only copy for display.
    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            filtered_products: self.filtered_products.clone(),
            selected_product: self.selected_product.clone(),
            search_query: self.search_query.clone(),
            current_category: self.current_category.clone(),
            current_sub_category: self.current_sub_category.clone(),
            sort: self.sort,
            total_products: self.products.len(),
        }
    }

    // -------------------------------------------------------------------------
    // View derivation
    // -------------------------------------------------------------------------

    /// Recomputes the view from `view`. `sort` carries over when given.
    fn apply(&mut self, view: View, sort: Option<SortKey>) {
        self.filtered_products = self
            .products
            .iter()
            .filter(|p| match &view {
                View::All => true,
                View::Category(category) => p.is_in(category, None),
                View::SubCategory {
                    category,
                    sub_category,
                } => p.is_in(category, Some(sub_category)),
                View::Search(needle) => p.matches_query(needle),
            })
            .cloned()
            .collect();
        self.view = view;
        self.sort = None;

        if let Some(key) = sort {
            self.sort_products(key);
        }
    }

    /// Re-derives the view after the product list changed.
    fn refresh_view(&mut self) {
        let view = self.view.clone();
        let sort = self.sort;
        self.apply(view, sort);
    }
}

/// Catalog intents as data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CatalogIntent {
    FilterByCategory {
        category: String,
    },
    #[serde(rename_all = "camelCase")]
    FilterBySubCategory {
        category: String,
        sub_category: String,
    },
    SearchProducts {
        query: String,
    },
    SetSelectedProduct {
        id: String,
    },
    ClearSelectedProduct,
    ClearFilters,
    SortProducts {
        key: SortKey,
    },
}

/// Snapshot of the catalog handed to display code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    pub filtered_products: Vec<Product>,
    pub selected_product: Option<Product>,
    pub search_query: String,
    pub current_category: Option<String>,
    pub current_sub_category: Option<String>,
    pub sort: Option<SortKey>,
    pub total_products: usize,
}
