//! # Seed Catalog
//!
//! The built-in badminton catalog and the category tree used for navigation.
//! A JSON file with the same shape can replace the built-in products at
//! startup; see [`parse_products`].
//!
//! Prices are in paise.

use std::collections::{BTreeMap, HashSet};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Category, Product, SubCategory};
use crate::validation::validate_product;

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    description: &str,
    rupees: i64,
    category: &str,
    sub_category: Option<&str>,
    stock: u32,
    rating: f64,
    specifications: &[(&str, &str)],
    featured: bool,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price: Money::from_major_minor(rupees, 0),
        image_url: format!("/images/products/{}.jpg", id),
        category: category.to_string(),
        sub_category: sub_category.map(str::to_string),
        stock,
        rating,
        specifications: specifications
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>(),
        featured,
    }
}

/// The built-in product list.
pub fn products() -> Vec<Product> {
    vec![
        product(
            "1",
            "Astrox 88D Pro",
            "Head-heavy attacking racket for doubles back-court play",
            18_990,
            "rackets",
            None,
            12,
            4.8,
            &[("weight", "4U"), ("balance", "head heavy"), ("flex", "stiff")],
            true,
        ),
        product(
            "2",
            "Nanoflare 700",
            "Head-light racket built for fast drives and defence",
            14_490,
            "rackets",
            None,
            8,
            4.6,
            &[("weight", "5U"), ("balance", "head light"), ("flex", "medium")],
            true,
        ),
        product(
            "3",
            "Arcsaber 11 Play",
            "Even-balance all-rounder for club players",
            7_990,
            "rackets",
            None,
            0,
            4.3,
            &[("weight", "4U"), ("balance", "even")],
            false,
        ),
        product(
            "4",
            "Court Dry T-Shirt",
            "Breathable quick-dry tournament tee",
            1_299,
            "clothes",
            Some("t-shirts"),
            40,
            4.2,
            &[("material", "polyester")],
            false,
        ),
        product(
            "5",
            "Rally Shorts",
            "Lightweight shorts with a stretch waistband",
            999,
            "clothes",
            Some("shorts"),
            25,
            4.0,
            &[("material", "polyester")],
            false,
        ),
        product(
            "6",
            "Pleated Court Skirt",
            "Pleated skirt with built-in inner shorts",
            1_499,
            "clothes",
            Some("skirts"),
            15,
            4.4,
            &[("material", "nylon blend")],
            true,
        ),
        product(
            "7",
            "Aerosensa 30 Feather Shuttles",
            "Tube of 12 goose feather shuttlecocks, speed 77",
            2_850,
            "shuttles",
            None,
            60,
            4.7,
            &[("count", "12"), ("speed", "77")],
            true,
        ),
        product(
            "8",
            "Mavis 350 Nylon Shuttles",
            "Durable nylon shuttles for practice sessions",
            1_150,
            "shuttles",
            None,
            80,
            4.5,
            &[("count", "6"), ("speed", "medium")],
            false,
        ),
        product(
            "9",
            "Pro Thermal Bag",
            "Six-racket thermal bag with a shoe compartment",
            4_999,
            "bags",
            None,
            10,
            4.6,
            &[("capacity", "6 rackets")],
            true,
        ),
        product(
            "10",
            "Club Backpack",
            "Backpack with a padded racket sleeve",
            2_499,
            "bags",
            None,
            0,
            4.1,
            &[("capacity", "2 rackets")],
            false,
        ),
        product(
            "11",
            "Super Grap Overgrip",
            "Tacky overgrip, pack of 3",
            449,
            "accessories",
            Some("grips"),
            100,
            4.7,
            &[("count", "3")],
            true,
        ),
        product(
            "12",
            "Towel Grip",
            "Absorbent cotton towel grip",
            299,
            "accessories",
            Some("grips"),
            50,
            4.2,
            &[("material", "cotton")],
            false,
        ),
        product(
            "13",
            "BG80 Power String",
            "High-repulsion string with a crisp feel",
            750,
            "accessories",
            Some("strings"),
            70,
            4.5,
            &[("gauge", "0.68mm")],
            false,
        ),
        product(
            "14",
            "Terry Wristband Pair",
            "Cotton terry wristbands",
            349,
            "accessories",
            Some("wristbands"),
            0,
            3.9,
            &[],
            false,
        ),
        product(
            "15",
            "Power Cushion 65 Z",
            "Court shoe with shock-absorbing cushioning",
            11_999,
            "shoes",
            None,
            6,
            4.8,
            &[("sole", "non-marking rubber")],
            true,
        ),
        product(
            "16",
            "Court Ace Shoe",
            "Entry-level non-marking court shoe",
            3_499,
            "shoes",
            None,
            20,
            4.0,
            &[("sole", "gum rubber")],
            false,
        ),
    ]
}

fn sub(id: &str, name: &str, category_id: &str) -> SubCategory {
    SubCategory {
        id: id.to_string(),
        name: name.to_string(),
        category_id: category_id.to_string(),
    }
}

fn category(id: &str, name: &str, sub_categories: Vec<SubCategory>) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        sub_categories,
    }
}

/// The navigation tree. Slugs line up with the product tags in [`products`].
pub fn categories() -> Vec<Category> {
    vec![
        category("1", "Rackets", vec![]),
        category(
            "2",
            "Clothes",
            vec![sub("1", "T-Shirts", "2"), sub("2", "Shorts", "2"), sub("3", "Skirts", "2")],
        ),
        category("3", "Shuttles", vec![]),
        category("4", "Bags", vec![]),
        category(
            "5",
            "Accessories",
            vec![sub("4", "Grips", "5"), sub("5", "Strings", "5"), sub("6", "Wristbands", "5")],
        ),
        category("6", "Shoes", vec![]),
    ]
}

/// Parses a JSON array of products, as found in a seed file.
///
/// Every product is validated and ids must be unique.
///
/// ```rust
/// use storefront_core::seed::parse_products;
///
/// let json = r#"[{"id":"a","name":"Grip","description":"","price":299,
///                 "category":"accessories","subCategory":"grips","stock":3,"rating":4.0}]"#;
/// let products = parse_products(json).unwrap();
/// assert_eq!(products[0].price.minor(), 299);
/// ```
pub fn parse_products(json: &str) -> CoreResult<Vec<Product>> {
    let products: Vec<Product> = serde_json::from_str(json)?;

    let mut seen = HashSet::new();
    for product in &products {
        validate_product(product)?;
        if !seen.insert(product.id.as_str()) {
            return Err(CoreError::DuplicateProduct(product.id.clone()));
        }
    }

    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_products_are_valid_and_unique() {
        let products = products();
        let mut ids = HashSet::new();
        for product in &products {
            assert!(validate_product(product).is_ok(), "invalid seed {}", product.id);
            assert!(ids.insert(product.id.clone()), "duplicate seed {}", product.id);
        }
    }

    #[test]
    fn test_product_tags_match_category_tree() {
        let categories = categories();
        for product in products() {
            let category = categories
                .iter()
                .find(|c| c.slug() == product.category)
                .unwrap_or_else(|| panic!("unknown category {}", product.category));

            if let Some(sub) = &product.sub_category {
                assert!(category.sub_categories.iter().any(|s| &s.slug() == sub));
            }
        }
    }

    #[test]
    fn test_seed_has_out_of_stock_items() {
        assert!(products().iter().any(|p| !p.is_in_stock()));
    }

    #[test]
    fn test_sub_categories_point_at_parent() {
        for category in categories() {
            for sub in &category.sub_categories {
                assert_eq!(sub.category_id, category.id);
            }
        }
    }

    #[test]
    fn test_parse_products_rejects_duplicates() {
        let json = r#"[
            {"id":"a","name":"A","description":"","price":100,"category":"bags","stock":1,"rating":4.0},
            {"id":"a","name":"B","description":"","price":200,"category":"bags","stock":1,"rating":4.0}
        ]"#;
        assert!(matches!(
            parse_products(json),
            Err(CoreError::DuplicateProduct(id)) if id == "a"
        ));
    }

    #[test]
    fn test_parse_products_rejects_invalid() {
        let json = r#"[{"id":"a","name":"","description":"","price":100,"category":"bags","stock":1,"rating":4.0}]"#;
        assert!(matches!(parse_products(json), Err(CoreError::Validation(_))));

        assert!(matches!(parse_products("{not json"), Err(CoreError::InvalidSeed(_))));

        let json = r#"[{"id":"a","name":"Gold Racket","description":"","price":4611686018427387904,"category":"rackets","stock":1,"rating":4.0}]"#;
        assert!(matches!(parse_products(json), Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_parse_products_round_trips_seed() {
        let json = serde_json::to_string(&products()).unwrap();
        assert_eq!(parse_products(&json).unwrap(), products());
    }
}
