//! # Commands Module
//!
//! All commands exposed to the storefront UI.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (Request + dispatch)
//! ├── product.rs   ◄─── Browse, search, sort, admin edits
//! ├── cart.rs      ◄─── Cart manipulation
//! ├── checkout.rs  ◄─── Checkout steps and order placement
//! └── config.rs    ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  UI sends one JSON line                                                 │
//! │  ──────────────────────                                                 │
//! │  {"command": "add_to_cart", "productId": "7"}                           │
//! │         │                                                               │
//! │         │ (serde, tagged by "command")                                  │
//! │         ▼                                                               │
//! │  Request::AddToCart { product_id: "7" }                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  invoke(ctx, request)                                                   │
//! │    └── cart::add_to_cart(&ctx.catalog, &ctx.cart, &ctx.config, "7")    │
//! │         │        ▲ each command takes only the stores it needs          │
//! │         ▼                                                               │
//! │  Result<Value, ApiError>  ──►  {"ok": {...}} / {"error": {...}}         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod checkout;
pub mod config;
pub mod product;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use storefront_core::{PaymentDetails, Product, ShippingAddress};

use crate::error::ApiError;
use crate::AppContext;

/// A command as received from the UI.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Request {
    // Products
    ListProducts,
    GetProduct {
        id: String,
    },
    ClearSelectedProduct,
    #[serde(rename_all = "camelCase")]
    BrowseCategory {
        category: String,
        #[serde(default)]
        sub_category: Option<String>,
    },
    SearchProducts {
        query: String,
    },
    SortProducts {
        key: String,
    },
    ClearFilters,
    FeaturedProducts {
        #[serde(default)]
        limit: Option<usize>,
    },
    ListCategories,
    AddProduct {
        product: Product,
    },
    UpdateProduct {
        product: Product,
    },
    DeleteProduct {
        id: String,
    },

    // Cart
    GetCart,
    #[serde(rename_all = "camelCase")]
    AddToCart {
        product_id: String,
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

    // Checkout
    BeginCheckout,
    GetCheckout,
    SubmitShipping {
        address: ShippingAddress,
    },
    SubmitPayment {
        payment: PaymentDetails,
    },
    CheckoutBack,
    OrderSummary,
    PlaceOrder,

    // Config
    GetConfig,
}

impl Request {
    /// Command name as it appears on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Request::ListProducts => "list_products",
            Request::GetProduct { .. } => "get_product",
            Request::ClearSelectedProduct => "clear_selected_product",
            Request::BrowseCategory { .. } => "browse_category",
            Request::SearchProducts { .. } => "search_products",
            Request::SortProducts { .. } => "sort_products",
            Request::ClearFilters => "clear_filters",
            Request::FeaturedProducts { .. } => "featured_products",
            Request::ListCategories => "list_categories",
            Request::AddProduct { .. } => "add_product",
            Request::UpdateProduct { .. } => "update_product",
            Request::DeleteProduct { .. } => "delete_product",
            Request::GetCart => "get_cart",
            Request::AddToCart { .. } => "add_to_cart",
            Request::RemoveFromCart { .. } => "remove_from_cart",
            Request::IncreaseQuantity { .. } => "increase_quantity",
            Request::DecreaseQuantity { .. } => "decrease_quantity",
            Request::ClearCart => "clear_cart",
            Request::BeginCheckout => "begin_checkout",
            Request::GetCheckout => "get_checkout",
            Request::SubmitShipping { .. } => "submit_shipping",
            Request::SubmitPayment { .. } => "submit_payment",
            Request::CheckoutBack => "checkout_back",
            Request::OrderSummary => "order_summary",
            Request::PlaceOrder => "place_order",
            Request::GetConfig => "get_config",
        }
    }
}

/// Runs one command against the application stores.
pub fn invoke(ctx: &AppContext, request: Request) -> Result<Value, ApiError> {
    match request {
        Request::ListProducts => to_value(product::list_products(&ctx.catalog)),
        Request::GetProduct { id } => to_value(product::get_product(&ctx.catalog, &id)?),
        Request::ClearSelectedProduct => to_value(product::clear_selected_product(&ctx.catalog)),
        Request::BrowseCategory {
            category,
            sub_category,
        } => to_value(product::browse_category(
            &ctx.catalog,
            &category,
            sub_category.as_deref(),
        )),
        Request::SearchProducts { query } => {
            to_value(product::search_products(&ctx.catalog, &query)?)
        }
        Request::SortProducts { key } => to_value(product::sort_products(&ctx.catalog, &key)?),
        Request::ClearFilters => to_value(product::clear_filters(&ctx.catalog)),
        Request::FeaturedProducts { limit } => {
            to_value(product::featured_products(&ctx.catalog, &ctx.config, limit))
        }
        Request::ListCategories => to_value(product::list_categories(&ctx.catalog)),
        Request::AddProduct { product: item } => {
            to_value(product::add_product(&ctx.catalog, item)?)
        }
        Request::UpdateProduct { product: item } => {
            to_value(product::update_product(&ctx.catalog, item)?)
        }
        Request::DeleteProduct { id } => to_value(product::delete_product(&ctx.catalog, &id)?),

        Request::GetCart => to_value(cart::get_cart(&ctx.cart, &ctx.config)),
        Request::AddToCart { product_id } => to_value(cart::add_to_cart(
            &ctx.catalog,
            &ctx.cart,
            &ctx.config,
            &product_id,
        )?),
        Request::RemoveFromCart { product_id } => {
            to_value(cart::remove_from_cart(&ctx.cart, &ctx.config, &product_id))
        }
        Request::IncreaseQuantity { product_id } => {
            to_value(cart::increase_quantity(&ctx.cart, &ctx.config, &product_id))
        }
        Request::DecreaseQuantity { product_id } => {
            to_value(cart::decrease_quantity(&ctx.cart, &ctx.config, &product_id))
        }
        Request::ClearCart => to_value(cart::clear_cart(&ctx.cart, &ctx.config)),

        Request::BeginCheckout => to_value(checkout::begin_checkout(&ctx.checkout, &ctx.cart)?),
        Request::GetCheckout => to_value(checkout::get_checkout(&ctx.checkout)?),
        Request::SubmitShipping { address } => {
            to_value(checkout::submit_shipping(&ctx.checkout, address)?)
        }
        Request::SubmitPayment { payment } => {
            to_value(checkout::submit_payment(&ctx.checkout, payment)?)
        }
        Request::CheckoutBack => to_value(checkout::checkout_back(&ctx.checkout)?),
        Request::OrderSummary => to_value(checkout::order_summary(&ctx.cart, &ctx.config)),
        Request::PlaceOrder => to_value(checkout::place_order(
            &ctx.checkout,
            &ctx.cart,
            &ctx.config,
        )?),

        Request::GetConfig => to_value(config::get_config(&ctx.config)),
    }
}

fn to_value<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| {
        tracing::error!("Failed to serialize response: {}", e);
        ApiError::internal("Failed to serialize response")
    })
}

/// One line of output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Response {
    Ok(Value),
    Error(ApiError),
}

impl From<Result<Value, ApiError>> for Response {
    fn from(result: Result<Value, ApiError>) -> Self {
        match result {
            Ok(value) => Response::Ok(value),
            Err(err) => Response::Error(err),
        }
    }
}
