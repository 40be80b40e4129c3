//! # storefront-core: Pure State Logic for the Storefront
//!
//! This crate is the **heart** of the storefront. It contains the cart and
//! catalog reducers, the checkout flow, and the money math, all as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront UI (external)                     │   │
//! │  │    Browse ──► Product Detail ──► Cart ──► Checkout ──► Done     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON commands                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 apps/storefront (commands + stores)             │   │
//! │  │    browse_category, search_products, add_to_cart, ...          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │   cart    │  │ checkout  │  │ validation│  │   │
//! │  │   │  filter   │  │ CartState │  │   flow    │  │   rules   │  │   │
//! │  │   │  sort     │  │ CartItem  │  │  Order    │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO GLOBAL STATE • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category, TaxRate)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart reducer and snapshots
//! - [`catalog`] - Catalog reducer: filter, search, sort, admin edits
//! - [`checkout`] - Multi-step checkout flow and orders
//! - [`validation`] - Input validation rules
//! - [`seed`] - Built-in seed catalog
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Explicit State**: stores are plain values owned by the caller, never globals
//! 2. **Derived, Not Duplicated**: cart totals are computed from the line items
//! 3. **Integer Money**: all monetary values are in minor units (i64)
//! 4. **Total Reducers**: cart and catalog intents never fail
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::cart::CartState;
//! use storefront_core::seed;
//!
//! let products = seed::products();
//! let mut cart = CartState::new();
//!
//! cart.add_to_cart(&products[0]);
//! cart.add_to_cart(&products[0]);
//!
//! assert_eq!(cart.items().len(), 1);
//! assert_eq!(cart.total_items(), 2);
//! assert_eq!(cart.total_amount(), products[0].price * 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod seed;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartIntent, CartItem, CartSnapshot, CartState};
pub use catalog::{CatalogIntent, CatalogSnapshot, CatalogState, SortKey};
pub use checkout::{
    CheckoutFlow, CheckoutSnapshot, CheckoutStep, Order, OrderLine, OrderStatus, OrderSummary,
    PaymentDetails, ShippingAddress,
};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default sales tax applied at checkout, in basis points (10%).
pub const DEFAULT_TAX_RATE_BPS: u32 = 1000;

/// Number of products shown in the "featured" strip on the home page.
pub const DEFAULT_FEATURED_COUNT: usize = 8;

/// Highest unit price accepted for a product, in minor units (₹1,00,00,000.00).
///
/// Keeps line totals and cart totals far from the `i64` range for any
/// realistic quantity.
pub const MAX_PRICE_MINOR: i64 = 1_000_000_000;

/// Maximum accepted length of a search query.
pub const MAX_SEARCH_QUERY_LEN: usize = 100;
