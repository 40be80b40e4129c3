//! # Checkout Commands
//!
//! Drives the three-step checkout and order placement.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Flow                                        │
//! │                                                                         │
//! │  begin_checkout ──► submit_shipping ──► submit_payment ──► place_order │
//! │       │                  │                   │                  │       │
//! │   cart empty?        validate            validate          new uuid    │
//! │   CART_ERROR         address             card              Utc::now()  │
//! │                                                            clear cart  │
//! │                                                                         │
//! │  checkout_back: one step back, forms kept                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use storefront_core::{CheckoutFlow, CheckoutSnapshot, Order, OrderSummary, PaymentDetails, ShippingAddress};

use crate::error::ApiError;
use crate::state::{CartStore, CheckoutStore, ConfigState};

/// Starts a new checkout at the shipping step, replacing any previous one.
///
/// ## Errors
/// `CART_ERROR` when the cart is empty.
pub fn begin_checkout(checkout: &CheckoutStore, cart: &CartStore) -> Result<CheckoutSnapshot, ApiError> {
    debug!("begin_checkout command");

    checkout.with_slot_mut(|slot| {
        let flow = cart.with_cart(CheckoutFlow::start)?;
        let snapshot = flow.snapshot();
        *slot = Some(flow);
        Ok(snapshot)
    })
}

pub fn get_checkout(checkout: &CheckoutStore) -> Result<CheckoutSnapshot, ApiError> {
    debug!("get_checkout command");
    checkout.with_flow_mut(|flow| Ok(flow.snapshot()))
}

pub fn submit_shipping(
    checkout: &CheckoutStore,
    address: ShippingAddress,
) -> Result<CheckoutSnapshot, ApiError> {
    debug!(city = %address.city, "submit_shipping command");
    checkout.with_flow_mut(|flow| {
        flow.submit_shipping(address)?;
        Ok(flow.snapshot())
    })
}

pub fn submit_payment(
    checkout: &CheckoutStore,
    payment: PaymentDetails,
) -> Result<CheckoutSnapshot, ApiError> {
    debug!(card = %payment.masked_card_number(), "submit_payment command");
    checkout.with_flow_mut(|flow| {
        flow.submit_payment(payment)?;
        Ok(flow.snapshot())
    })
}

pub fn checkout_back(checkout: &CheckoutStore) -> Result<CheckoutSnapshot, ApiError> {
    debug!("checkout_back command");
    checkout.with_flow_mut(|flow| {
        flow.back();
        Ok(flow.snapshot())
    })
}

/// Review-step totals for the current cart.
pub fn order_summary(cart: &CartStore, config: &ConfigState) -> OrderSummary {
    debug!("order_summary command");
    cart.with_cart(|c| OrderSummary::from_cart(c, config.tax_rate()))
}

/// Places the order from the review step and empties the cart.
pub fn place_order(
    checkout: &CheckoutStore,
    cart: &CartStore,
    config: &ConfigState,
) -> Result<Order, ApiError> {
    debug!("place_order command");

    let order = checkout.with_flow_mut(|flow| {
        cart.with_cart_mut(|c| {
            flow.place_order(c, config.tax_rate(), Uuid::new_v4().to_string(), Utc::now())
        })
        .map_err(ApiError::from)
    })?;

    info!(
        order_id = %order.id,
        items = order.summary.total_items,
        total = %config.format_currency(order.summary.total),
        "Order placed"
    );
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::{add_to_cart, get_cart};
    use crate::error::ErrorCode;
    use crate::state::CatalogStore;
    use storefront_core::{seed, CheckoutStep, OrderStatus};

    struct Fixture {
        catalog: CatalogStore,
        cart: CartStore,
        checkout: CheckoutStore,
        config: ConfigState,
    }

    fn fixture() -> Fixture {
        Fixture {
            catalog: CatalogStore::new(seed::products()),
            cart: CartStore::new(),
            checkout: CheckoutStore::new(),
            config: ConfigState::default(),
        }
    }

    fn address() -> ShippingAddress {
        ShippingAddress {
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            address1: "12 Court Road".to_string(),
            city: "Pune".to_string(),
            zip: "411001".to_string(),
            country: "India".to_string(),
            ..Default::default()
        }
    }

    fn payment() -> PaymentDetails {
        PaymentDetails {
            card_name: "Asha Rao".to_string(),
            card_number: "4111 1111 1111 1111".to_string(),
            exp_date: "09/29".to_string(),
            cvv: "123".to_string(),
            save_card: false,
        }
    }

    #[test]
    fn test_begin_with_empty_cart_fails() {
        let f = fixture();
        let err = begin_checkout(&f.checkout, &f.cart).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
        assert_eq!(
            get_checkout(&f.checkout).unwrap_err().code,
            ErrorCode::CheckoutError
        );
    }

    #[test]
    fn test_full_checkout() {
        let f = fixture();
        add_to_cart(&f.catalog, &f.cart, &f.config, "9").unwrap();
        add_to_cart(&f.catalog, &f.cart, &f.config, "11").unwrap();

        let snapshot = begin_checkout(&f.checkout, &f.cart).unwrap();
        assert_eq!(snapshot.step, CheckoutStep::Shipping);

        submit_shipping(&f.checkout, address()).unwrap();
        let snapshot = submit_payment(&f.checkout, payment()).unwrap();
        assert_eq!(snapshot.step, CheckoutStep::Review);

        let summary = order_summary(&f.cart, &f.config);
        let order = place_order(&f.checkout, &f.cart, &f.config).unwrap();

        assert_eq!(order.summary, summary);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_method, "xxxx-xxxx-xxxx-1111");
        assert!(Uuid::parse_str(&order.id).is_ok());
        assert_eq!(get_cart(&f.cart, &f.config).total_items, 0);
        assert_eq!(
            get_checkout(&f.checkout).unwrap().step,
            CheckoutStep::Complete
        );
    }

    #[test]
    fn test_place_order_before_review_keeps_cart() {
        let f = fixture();
        add_to_cart(&f.catalog, &f.cart, &f.config, "9").unwrap();
        begin_checkout(&f.checkout, &f.cart).unwrap();

        let err = place_order(&f.checkout, &f.cart, &f.config).unwrap_err();
        assert_eq!(err.code, ErrorCode::CheckoutError);
        assert_eq!(get_cart(&f.cart, &f.config).total_items, 1);
    }

    #[test]
    fn test_invalid_card_is_rejected() {
        let f = fixture();
        add_to_cart(&f.catalog, &f.cart, &f.config, "9").unwrap();
        begin_checkout(&f.checkout, &f.cart).unwrap();
        submit_shipping(&f.checkout, address()).unwrap();

        let mut bad = payment();
        bad.card_number = "4111".to_string();
        let err = submit_payment(&f.checkout, bad).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let snapshot = checkout_back(&f.checkout).unwrap();
        assert_eq!(snapshot.step, CheckoutStep::Shipping);
        assert_eq!(snapshot.shipping, Some(address()));
    }
}
