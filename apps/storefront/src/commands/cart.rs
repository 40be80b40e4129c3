//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │  steps   │     │  placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                 │              │
//! │                   add_to_cart                       place_order        │
//! │                   increase/decrease                 (checkout.rs)      │
//! │                   remove_from_cart                       │              │
//! │                        │                                 │              │
//! │                        ▼                                 ▼              │
//! │                   clear_cart ─────────────────► (back to empty)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command answers with the full cart and its totals so the UI can
//! re-render from one response.

use tracing::debug;

use crate::error::ApiError;
use crate::state::{CartStore, CartTotals, CatalogStore, ConfigState};

/// Gets the current cart contents.
///
/// ## Returns
/// Current cart with items and calculated totals
pub fn get_cart(cart: &CartStore, config: &ConfigState) -> CartTotals {
    debug!("get_cart command");
    cart.with_cart(|c| CartTotals::compute(c, config.tax_rate()))
}

/// Adds one unit of a catalog product to the cart.
///
/// ## Behavior
/// - Already in cart: quantity goes up by one
/// - Not in cart: added as a new line with quantity 1
/// - Stock is not checked
///
/// ## Errors
/// `NOT_FOUND` when the id is not in the catalog.
pub fn add_to_cart(
    catalog: &CatalogStore,
    cart: &CartStore,
    config: &ConfigState,
    product_id: &str,
) -> Result<CartTotals, ApiError> {
    debug!(product_id = %product_id, "add_to_cart command");

    let product = catalog
        .find(product_id)
        .ok_or_else(|| ApiError::not_found("Product", product_id))?;

    Ok(cart.with_cart_mut(|c| {
        c.add_to_cart(&product);
        CartTotals::compute(c, config.tax_rate())
    }))
}

/// Removes a line. Unknown ids are a no-op.
pub fn remove_from_cart(cart: &CartStore, config: &ConfigState, product_id: &str) -> CartTotals {
    debug!(product_id = %product_id, "remove_from_cart command");
    cart.with_cart_mut(|c| {
        c.remove_from_cart(product_id);
        CartTotals::compute(c, config.tax_rate())
    })
}

pub fn increase_quantity(cart: &CartStore, config: &ConfigState, product_id: &str) -> CartTotals {
    debug!(product_id = %product_id, "increase_quantity command");
    cart.with_cart_mut(|c| {
        c.increase_quantity(product_id);
        CartTotals::compute(c, config.tax_rate())
    })
}

/// Lowers the quantity by one; a line at quantity 1 is removed.
pub fn decrease_quantity(cart: &CartStore, config: &ConfigState, product_id: &str) -> CartTotals {
    debug!(product_id = %product_id, "decrease_quantity command");
    cart.with_cart_mut(|c| {
        c.decrease_quantity(product_id);
        CartTotals::compute(c, config.tax_rate())
    })
}

pub fn clear_cart(cart: &CartStore, config: &ConfigState) -> CartTotals {
    debug!("clear_cart command");
    cart.with_cart_mut(|c| {
        c.clear();
        CartTotals::compute(c, config.tax_rate())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use storefront_core::{seed, Money, MAX_PRICE_MINOR};

    fn stores() -> (CatalogStore, CartStore, ConfigState) {
        (
            CatalogStore::new(seed::products()),
            CartStore::new(),
            ConfigState::default(),
        )
    }

    #[test]
    fn test_add_resolves_product_from_catalog() {
        let (catalog, cart, config) = stores();
        let price = catalog.find("7").unwrap().price;

        add_to_cart(&catalog, &cart, &config, "7").unwrap();
        let totals = add_to_cart(&catalog, &cart, &config, "7").unwrap();

        assert_eq!(totals.items.len(), 1);
        assert_eq!(totals.items[0].quantity, 2);
        assert_eq!(totals.total_items, 2);
        assert_eq!(totals.total_amount, price * 2);
        assert_eq!(totals.tax, (price * 2).calculate_tax(config.tax_rate()));
    }

    #[test]
    fn test_add_unknown_product_is_not_found() {
        let (catalog, cart, config) = stores();
        let err = add_to_cart(&catalog, &cart, &config, "999").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(get_cart(&cart, &config).total_items, 0);
    }

    #[test]
    fn test_out_of_stock_product_can_be_added() {
        let (catalog, cart, config) = stores();
        assert!(!catalog.find("3").unwrap().is_in_stock());
        assert!(add_to_cart(&catalog, &cart, &config, "3").is_ok());
    }

    #[test]
    fn test_quantity_commands() {
        let (catalog, cart, config) = stores();
        add_to_cart(&catalog, &cart, &config, "11").unwrap();
        add_to_cart(&catalog, &cart, &config, "12").unwrap();

        let totals = increase_quantity(&cart, &config, "11");
        assert_eq!(totals.total_items, 3);

        decrease_quantity(&cart, &config, "12");
        let totals = get_cart(&cart, &config);
        assert_eq!(totals.items.len(), 1);
        assert_eq!(totals.items[0].product.id, "11");

        let totals = remove_from_cart(&cart, &config, "11");
        assert!(totals.items.is_empty());
        let totals = remove_from_cart(&cart, &config, "11");
        assert_eq!(totals.total_amount.minor(), 0);
    }

    #[test]
    fn test_oversized_price_never_reaches_the_cart() {
        let (catalog, cart, config) = stores();
        let mut racket = catalog.find("1").unwrap();
        racket.id = "gold".to_string();
        racket.price = Money::from_minor(i64::MAX / 2 + 1);

        let err = crate::commands::product::add_product(&catalog, racket.clone()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(add_to_cart(&catalog, &cart, &config, "gold").unwrap_err().code, ErrorCode::NotFound);

        racket.price = Money::from_minor(MAX_PRICE_MINOR);
        crate::commands::product::add_product(&catalog, racket).unwrap();
        add_to_cart(&catalog, &cart, &config, "gold").unwrap();
        let totals = add_to_cart(&catalog, &cart, &config, "gold").unwrap();
        assert_eq!(totals.total_amount.minor(), MAX_PRICE_MINOR * 2);
    }

    #[test]
    fn test_huge_cart_total_saturates() {
        let mut racket = seed::products().remove(0);
        racket.price = Money::from_minor(i64::MAX / 2 + 1);
        let catalog = CatalogStore::new(vec![racket]);
        let (_, cart, config) = stores();

        add_to_cart(&catalog, &cart, &config, "1").unwrap();
        let totals = add_to_cart(&catalog, &cart, &config, "1").unwrap();

        assert_eq!(totals.total_items, 2);
        assert_eq!(totals.total_amount.minor(), i64::MAX);
        assert_eq!(totals.grand_total.minor(), i64::MAX);
    }

    #[test]
    fn test_clear_cart() {
        let (catalog, cart, config) = stores();
        add_to_cart(&catalog, &cart, &config, "1").unwrap();
        let totals = clear_cart(&cart, &config);
        assert_eq!(totals.total_items, 0);
        assert!(totals.grand_total.is_zero());
    }
}
