//! # Cart State
//!
//! Shared handle around the cart reducer.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple commands may access/modify the cart
//! 2. Only one command should modify the cart at a time
//! 3. Each reducer call must be observed as one atomic transition

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use storefront_core::{CartItem, CartState, Money, TaxRate};

/// Cart contents with the checkout-page presentation totals.
///
/// `total_amount` comes straight from the cart; `tax` and `grand_total` are
/// computed on top of it for display and never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub items: Vec<CartItem>,
    pub total_items: u32,
    pub total_amount: Money,
    pub tax_rate_bps: u32,
    pub tax: Money,
    pub grand_total: Money,
}

impl CartTotals {
    pub fn compute(cart: &CartState, tax_rate: TaxRate) -> Self {
        let total_amount = cart.total_amount();
        let tax = total_amount.calculate_tax(tax_rate);
        CartTotals {
            items: cart.items().to_vec(),
            total_items: cart.total_items(),
            total_amount,
            tax_rate_bps: tax_rate.bps(),
            tax,
            grand_total: total_amount + tax,
        }
    }
}

/// Process-wide cart store.
///
/// ## Poisoning
/// A panic while the lock is held leaves the last fully applied state in
/// place (reducers never panic half-way), so a poisoned lock is recovered
/// rather than propagated.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    cart: Arc<Mutex<CartState>>,
}

impl CartStore {
    /// Creates a new empty cart store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the cart.
    ///
    /// ```rust
    /// use storefront_app::state::CartStore;
    ///
    /// let store = CartStore::new();
    /// assert!(store.with_cart(|cart| cart.is_empty()));
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartState) -> R,
    {
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartState) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }
}
