//! # State Module
//!
//! The stores the commands operate on.
//!
//! ## Why Multiple State Types?
//! Each command takes only the stores it needs instead of one big
//! `AppState`, and independent stores don't block each other.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Application State                                    │
//! │                                                                         │
//! │  ┌────────────────┐ ┌────────────────┐ ┌────────────────┐ ┌──────────┐ │
//! │  │ CatalogStore   │ │ CartStore      │ │ CheckoutStore  │ │ Config   │ │
//! │  │ Arc<Mutex<     │ │ Arc<Mutex<     │ │ Arc<Mutex<     │ │ State    │ │
//! │  │  CatalogState>>│ │  CartState>>   │ │  Option<Flow>>>│ │ (plain)  │ │
//! │  └────────────────┘ └────────────────┘ └────────────────┘ └──────────┘ │
//! │                                                                         │
//! │  Lock order when two stores are needed: checkout, then cart.           │
//! │  The catalog lock is always released before the cart is locked.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod checkout;
mod config;

pub use cart::{CartStore, CartTotals};
pub use catalog::CatalogStore;
pub use checkout::CheckoutStore;
pub use config::ConfigState;
