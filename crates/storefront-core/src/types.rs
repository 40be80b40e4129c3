//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Category     │   │    TaxRate      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (string)    │   │  id             │   │  bps (u32)      │       │
//! │  │  name           │   │  name           │   │  1000 = 10%     │       │
//! │  │  price (Money)  │   │  sub_categories │   └─────────────────┘       │
//! │  │  category       │   │    └ SubCategory│                             │
//! │  │  sub_category?  │   └─────────────────┘                             │
//! │  │  stock, rating  │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Category tags on products are lower-case route slugs (`"rackets"`,
//! `"grips"`), while [`Category::name`] is the display name. Matching is
//! exact; callers lower-case route segments before filtering.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 1000 bps = 10%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for config parsing).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate(crate::DEFAULT_TAX_RATE_BPS)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available in the catalog.
///
/// Authored by seed data (or the admin commands) and never mutated by the
/// cart or catalog reducers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique, stable identifier.
    pub id: String,

    pub name: String,

    pub description: String,

    /// Unit price in minor units.
    pub price: Money,

    #[serde(default)]
    pub image_url: String,

    /// Lower-case category slug, e.g. `"rackets"`.
    pub category: String,

    /// Lower-case sub-category slug, e.g. `"grips"`.
    #[serde(default)]
    pub sub_category: Option<String>,

    /// Units on hand. Display-only: the cart does not enforce it.
    pub stock: u32,

    /// Average review score, used for sorting and the featured strip.
    pub rating: f64,

    #[serde(default)]
    pub specifications: BTreeMap<String, String>,

    #[serde(default)]
    pub featured: bool,
}

impl Product {
    /// Whether the product shows as purchasable in the UI.
    ///
    /// ## Note
    /// Adding to the cart does not consult this; see `CartState::add_to_cart`.
    #[inline]
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Case-insensitive substring match on name, description, category and
    /// sub-category.
    ///
    /// `needle` must already be lower-cased.
    pub fn matches_query(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
            || self
                .sub_category
                .as_deref()
                .is_some_and(|sub| sub.to_lowercase().contains(needle))
    }

    /// Exact match on category and, when given, sub-category.
    pub fn is_in(&self, category: &str, sub_category: Option<&str>) -> bool {
        if self.category != category {
            return false;
        }
        match sub_category {
            Some(sub) => self.sub_category.as_deref() == Some(sub),
            None => true,
        }
    }
}

// =============================================================================
// Category
// =============================================================================

/// A top-level navigation category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    /// Display name, e.g. `"Accessories"`.
    pub name: String,
    #[serde(default)]
    pub sub_categories: Vec<SubCategory>,
}

impl Category {
    /// Route slug that products are tagged with.
    ///
    /// ```rust
    /// use storefront_core::types::Category;
    ///
    /// let category = Category { id: "5".into(), name: "Accessories".into(), sub_categories: vec![] };
    /// assert_eq!(category.slug(), "accessories");
    /// ```
    pub fn slug(&self) -> String {
        self.name.to_lowercase()
    }
}

/// A second-level category nested under a [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SubCategory {
    pub id: String,
    pub name: String,
    pub category_id: String,
}

impl SubCategory {
    pub fn slug(&self) -> String {
        self.name.to_lowercase()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn grip() -> Product {
        Product {
            id: "g1".to_string(),
            name: "Towel Grip".to_string(),
            description: "Absorbent cotton grip".to_string(),
            price: Money::from_minor(19_900),
            image_url: String::new(),
            category: "accessories".to_string(),
            sub_category: Some("grips".to_string()),
            stock: 0,
            rating: 4.1,
            specifications: BTreeMap::new(),
            featured: false,
        }
    }

    #[test]
    fn test_tax_rate_default_is_ten_percent() {
        let rate = TaxRate::default();
        assert_eq!(rate.bps(), 1000);
        assert!((rate.percentage() - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        assert_eq!(TaxRate::from_percentage(8.25).bps(), 825);
    }

    #[test]
    fn test_matches_query_checks_every_text_field() {
        let product = grip();
        assert!(product.matches_query("towel"));
        assert!(product.matches_query("cotton"));
        assert!(product.matches_query("access"));
        assert!(product.matches_query("grips"));
        assert!(!product.matches_query("racket"));
    }

    #[test]
    fn test_is_in_category() {
        let product = grip();
        assert!(product.is_in("accessories", None));
        assert!(product.is_in("accessories", Some("grips")));
        assert!(!product.is_in("accessories", Some("strings")));
        // Matching is case-sensitive; callers lower-case first
        assert!(!product.is_in("Accessories", None));
    }

    #[test]
    fn test_out_of_stock() {
        assert!(!grip().is_in_stock());
    }

    #[test]
    fn test_product_json_uses_camel_case() {
        let json = serde_json::to_value(grip()).unwrap();
        assert_eq!(json["subCategory"], "grips");
        assert_eq!(json["price"], 19_900);
        assert!(json.get("imageUrl").is_some());
    }
}
