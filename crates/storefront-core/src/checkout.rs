//! # Checkout Flow
//!
//! The three-step checkout: shipping address, payment details, review.
//!
//! ## Step Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Steps                                   │
//! │                                                                         │
//! │  ┌──────────┐  submit_   ┌──────────┐  submit_   ┌──────────┐          │
//! │  │ Shipping │──shipping─►│ Payment  │──payment──►│  Review  │          │
//! │  └──────────┘            └──────────┘            └────┬─────┘          │
//! │       ▲        back()        │ ▲       back()         │                 │
//! │       └──────────────────────┘ └──────────────────────┤                 │
//! │                                                  place_order()          │
//! │                                                       │                 │
//! │                                                       ▼                 │
//! │                                                 ┌──────────┐            │
//! │                                                 │ Complete │            │
//! │                                                 └──────────┘            │
//! │                                                                         │
//! │  place_order() clears the cart and returns a pending Order.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tax is computed here, at summary time, on top of the cart's total amount.
//! The cart itself never stores tax.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::{CartItem, CartState};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::TaxRate;
use crate::validation::{normalize_card_number, validate_payment_details, validate_shipping_address};

// =============================================================================
// Forms
// =============================================================================

/// Shipping step form.
///
/// `address2` and `state` are optional and may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub first_name: String,
    pub last_name: String,
    pub address1: String,
    #[serde(default)]
    pub address2: String,
    pub city: String,
    #[serde(default)]
    pub state: String,
    pub zip: String,
    pub country: String,
    #[serde(default)]
    pub save_address: bool,
}

/// Payment step form. Only the masked card number outlives checkout.
#[derive(Clone, Default, PartialEq, Eq, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub card_name: String,
    pub card_number: String,
    pub exp_date: String,
    pub cvv: String,
    #[serde(default)]
    pub save_card: bool,
}

impl PaymentDetails {
    /// `xxxx-xxxx-xxxx-1234` style rendering of the card number.
    ///
    /// ```rust
    /// use storefront_core::checkout::PaymentDetails;
    ///
    /// let payment = PaymentDetails {
    ///     card_number: "4111 1111 1111 1234".into(),
    ///     ..Default::default()
    /// };
    /// assert_eq!(payment.masked_card_number(), "xxxx-xxxx-xxxx-1234");
    /// ```
    pub fn masked_card_number(&self) -> String {
        let digits = normalize_card_number(&self.card_number);
        let last4: String = digits
            .chars()
            .skip(digits.chars().count().saturating_sub(4))
            .collect();
        format!("xxxx-xxxx-xxxx-{}", last4)
    }
}

// Card data stays out of logs.
impl fmt::Debug for PaymentDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentDetails")
            .field("card_name", &self.card_name)
            .field("card_number", &self.masked_card_number())
            .field("save_card", &self.save_card)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Order Summary
// =============================================================================

/// One line of the review step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
}

impl From<&CartItem> for OrderLine {
    fn from(item: &CartItem) -> Self {
        OrderLine {
            product_id: item.product.id.clone(),
            name: item.product.name.clone(),
            quantity: item.quantity,
            unit_price: item.product.price,
            line_total: item.line_total(),
        }
    }
}

/// Totals shown on the review step.
///
/// ```text
/// Subtotal   = cart total amount
/// Shipping   = free
/// Tax        = subtotal × tax rate
/// Total      = subtotal + shipping + tax
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub lines: Vec<OrderLine>,
    pub total_items: u32,
    pub subtotal: Money,
    pub shipping: Money,
    pub tax_rate: TaxRate,
    pub tax: Money,
    pub total: Money,
}

impl OrderSummary {
    /// Builds the summary for the current cart.
    ///
    /// ```rust
    /// use storefront_core::cart::CartState;
    /// use storefront_core::checkout::OrderSummary;
    /// use storefront_core::types::TaxRate;
    /// use storefront_core::seed;
    ///
    /// let mut cart = CartState::new();
    /// cart.add_to_cart(&seed::products()[0]);
    ///
    /// let summary = OrderSummary::from_cart(&cart, TaxRate::from_bps(1000));
    /// assert_eq!(summary.tax, summary.subtotal.calculate_tax(TaxRate::from_bps(1000)));
    /// assert_eq!(summary.total, summary.subtotal + summary.tax);
    /// ```
    pub fn from_cart(cart: &CartState, tax_rate: TaxRate) -> Self {
        let subtotal = cart.total_amount();
        let shipping = Money::zero();
        let tax = subtotal.calculate_tax(tax_rate);

        OrderSummary {
            lines: cart.items().iter().map(OrderLine::from).collect(),
            total_items: cart.total_items(),
            subtotal,
            shipping,
            tax_rate,
            tax,
            total: subtotal + shipping + tax,
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// Lifecycle of a placed order. New orders are `Pending`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

/// A placed order, the confirmation shown after checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub items: Vec<CartItem>,
    pub summary: OrderSummary,
    pub status: OrderStatus,
    /// Masked card number.
    pub payment_method: String,
    pub shipping_address: ShippingAddress,
    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,
}

// =============================================================================
// Checkout Flow
// =============================================================================

/// Where the customer is in checkout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    #[default]
    Shipping,
    Payment,
    Review,
    Complete,
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckoutStep::Shipping => "shipping",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Review => "review",
            CheckoutStep::Complete => "complete",
        };
        f.write_str(name)
    }
}

/// State of one checkout attempt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    shipping: Option<ShippingAddress>,
    payment: Option<PaymentDetails>,
}

impl CheckoutFlow {
    /// Starts checkout at the shipping step.
    ///
    /// ## Errors
    /// `EmptyCart` when there is nothing to check out.
    pub fn start(cart: &CartState) -> CoreResult<Self> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        Ok(CheckoutFlow::default())
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn shipping(&self) -> Option<&ShippingAddress> {
        self.shipping.as_ref()
    }

    /// Records the shipping address and moves to payment.
    pub fn submit_shipping(&mut self, address: ShippingAddress) -> CoreResult<()> {
        self.expect_step(CheckoutStep::Shipping)?;
        validate_shipping_address(&address)?;
        self.shipping = Some(address);
        self.step = CheckoutStep::Payment;
        Ok(())
    }

    /// Records the payment details and moves to review.
    pub fn submit_payment(&mut self, payment: PaymentDetails) -> CoreResult<()> {
        self.expect_step(CheckoutStep::Payment)?;
        validate_payment_details(&payment)?;
        self.payment = Some(payment);
        self.step = CheckoutStep::Review;
        Ok(())
    }

    /// One step back. Entered forms are kept for redisplay.
    pub fn back(&mut self) {
        self.step = match self.step {
            CheckoutStep::Shipping => CheckoutStep::Shipping,
            CheckoutStep::Payment => CheckoutStep::Shipping,
            CheckoutStep::Review => CheckoutStep::Payment,
            CheckoutStep::Complete => CheckoutStep::Complete,
        };
    }

    /// Places the order from the review step.
    ///
    /// The order id and timestamp come from the caller so this stays
    /// deterministic. On success the cart is cleared and the flow is
    /// `Complete`; on error nothing changes.
    pub fn place_order(
        &mut self,
        cart: &mut CartState,
        tax_rate: TaxRate,
        order_id: String,
        placed_at: DateTime<Utc>,
    ) -> CoreResult<Order> {
        self.expect_step(CheckoutStep::Review)?;
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        let (Some(shipping), Some(payment)) = (&self.shipping, &self.payment) else {
            return Err(CoreError::InvalidCheckoutStep {
                expected: CheckoutStep::Review,
                actual: self.step,
            });
        };

        let order = Order {
            id: order_id,
            items: cart.items().to_vec(),
            summary: OrderSummary::from_cart(cart, tax_rate),
            status: OrderStatus::Pending,
            payment_method: payment.masked_card_number(),
            shipping_address: shipping.clone(),
            placed_at,
        };

        cart.clear();
        self.payment = None;
        self.step = CheckoutStep::Complete;
        Ok(order)
    }

    /// Read-only view for the UI; card details are never included.
    pub fn snapshot(&self) -> CheckoutSnapshot {
        CheckoutSnapshot {
            step: self.step,
            shipping: self.shipping.clone(),
            payment_method: self.payment.as_ref().map(PaymentDetails::masked_card_number),
        }
    }

    fn expect_step(&self, expected: CheckoutStep) -> CoreResult<()> {
        if self.step != expected {
            return Err(CoreError::InvalidCheckoutStep {
                expected,
                actual: self.step,
            });
        }
        Ok(())
    }
}

/// Checkout progress handed to display code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSnapshot {
    pub step: CheckoutStep,
    pub shipping: Option<ShippingAddress>,
    pub payment_method: Option<String>,
}
