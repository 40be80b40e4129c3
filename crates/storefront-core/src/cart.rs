//! # Cart State
//!
//! The shopping cart reducer.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  UI Action                Intent                  Cart State Change     │
//! │  ─────────                ──────                  ─────────────────     │
//! │                                                                         │
//! │  "Add to Cart" ──────────► AddToCart ───────────► qty += 1 or push     │
//! │                                                                         │
//! │  "+" button ─────────────► IncreaseQuantity ────► items[i].qty += 1    │
//! │                                                                         │
//! │  "-" button ─────────────► DecreaseQuantity ────► qty -= 1 / remove    │
//! │                                                                         │
//! │  Trash icon ─────────────► RemoveFromCart ──────► items.remove(i)      │
//! │                                                                         │
//! │  Order placed ───────────► ClearCart ───────────► items.clear()        │
//! │                                                                         │
//! │  Totals are never stored: total_items() / total_amount() read items.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every intent is total. Unknown product ids are silent no-ops.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Product;

/// A line item: one product and how many of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Copy of the product at the time it was added.
    pub product: Product,

    /// Always >= 1; an item that would drop to 0 is removed instead.
    pub quantity: u32,
}

impl CartItem {
    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.price * self.quantity
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - At most one item per product id (adding again increases quantity)
/// - Items keep insertion order; the first add fixes the position
/// - Every quantity is >= 1
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    items: Vec<CartItem>,
}

impl CartState {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        CartState { items: Vec::new() }
    }

    /// Adds one unit of `product`.
    ///
    /// - If the product is already in the cart: its quantity increases by 1
    /// - Otherwise: a new item with quantity 1 is appended
    ///
    /// ## Note
    /// No stock check is made; an out-of-stock product is accepted. Whether
    /// to clamp against `stock` is an open product decision.
    ///
    /// ```rust
    /// use storefront_core::cart::CartState;
    /// use storefront_core::seed;
    ///
    /// let product = &seed::products()[0];
    /// let mut cart = CartState::new();
    /// cart.add_to_cart(product);
    /// assert_eq!(cart.total_amount(), product.price);
    /// ```
    pub fn add_to_cart(&mut self, product: &Product) {
        if let Some(item) = self.find_mut(&product.id) {
            item.quantity = item.quantity.saturating_add(1);
            return;
        }

        self.items.push(CartItem {
            product: product.clone(),
            quantity: 1,
        });
    }

    /// Removes the whole line for `product_id`. Idempotent.
    pub fn remove_from_cart(&mut self, product_id: &str) {
        self.items.retain(|i| i.product.id != product_id);
    }

    /// Adds one unit to an existing line. No upper bound is applied.
    pub fn increase_quantity(&mut self, product_id: &str) {
        if let Some(item) = self.find_mut(product_id) {
            item.quantity = item.quantity.saturating_add(1);
        }
    }

    /// Takes one unit off an existing line, removing it when it hits zero.
    pub fn decrease_quantity(&mut self, product_id: &str) {
        let Some(index) = self.position(product_id) else {
            return;
        };

        if self.items[index].quantity > 1 {
            self.items[index].quantity -= 1;
        } else {
            self.items.remove(index);
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Applies an intent.
    pub fn dispatch(&mut self, intent: CartIntent) {
        match intent {
            CartIntent::AddToCart { product } => self.add_to_cart(&product),
            CartIntent::RemoveFromCart { product_id } => self.remove_from_cart(&product_id),
            CartIntent::IncreaseQuantity { product_id } => self.increase_quantity(&product_id),
            CartIntent::DecreaseQuantity { product_id } => self.decrease_quantity(&product_id),
            CartIntent::ClearCart => self.clear(),
        }
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, product_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product.id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all quantities.
    pub fn total_items(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Sum of all line totals.
    pub fn total_amount(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Read-only copy for display.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::from(self)
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.items.iter().position(|i| i.product.id == product_id)
    }

    fn find_mut(&mut self, product_id: &str) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|i| i.product.id == product_id)
    }
}

/// Cart intents as data, for callers that dispatch serialized actions.
///
/// ```rust
/// use storefront_core::cart::{CartIntent, CartState};
///
/// let intent: CartIntent =
///     serde_json::from_str(r#"{"type": "remove_from_cart", "productId": "7"}"#).unwrap();
/// let mut cart = CartState::new();
/// cart.dispatch(intent);
/// assert!(cart.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartIntent {
    AddToCart {
        product: Product,
    },
    #[serde(rename_all = "camelCase")]
    RemoveFromCart {
        product_id: String,
    },
    #[serde(rename_all = "camelCase")]
    IncreaseQuantity {
        product_id: String,
    },
    #[serde(rename_all = "camelCase")]
    DecreaseQuantity {
        product_id: String,
    },
    ClearCart,
}

/// Snapshot of the cart handed to display code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    pub items: Vec<CartItem>,
    pub total_items: u32,
    pub total_amount: Money,
}

impl From<&CartState> for CartSnapshot {
    fn from(cart: &CartState) -> Self {
        CartSnapshot {
            items: cart.items.clone(),
            total_items: cart.total_items(),
            total_amount: cart.total_amount(),
        }
    }
}
