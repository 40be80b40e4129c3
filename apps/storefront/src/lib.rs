//! # Storefront App Library
//!
//! Composition layer for the storefront: owns the stores, exposes the
//! commands, and runs the JSON-lines command loop used by the `storefront`
//! binary.
//!
//! ## Module Organization
//! ```text
//! storefront_app/
//! ├── lib.rs          ◄─── You are here (bootstrap & command loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── catalog.rs  ◄─── Catalog store
//! │   ├── cart.rs     ◄─── Cart store + display totals
//! │   ├── checkout.rs ◄─── Checkout in progress
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Request enum + invoke
//! │   ├── product.rs  ◄─── Browse/search/sort/admin commands
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   ├── checkout.rs ◄─── Checkout commands
//! │   └── config.rs   ◄─── Config command
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Wire Format
//! ```text
//! stdin  ─► {"command":"search_products","query":"grip"}
//! stdout ◄─ {"ok":{"filteredProducts":[...],"searchQuery":"grip",...}}
//!
//! stdin  ─► {"command":"add_to_cart","productId":"nope"}
//! stdout ◄─ {"error":{"code":"NOT_FOUND","message":"Product not found: nope"}}
//! ```
//! Logs go to stderr so stdout carries nothing but responses.

pub mod commands;
pub mod error;
pub mod state;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use commands::{Request, Response};
use error::{ApiError, StartupError};
use state::{CartStore, CatalogStore, CheckoutStore, ConfigState};
use storefront_core::seed;

/// Everything a command may need, created once at startup.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: ConfigState,
    pub catalog: CatalogStore,
    pub cart: CartStore,
    pub checkout: CheckoutStore,
}

impl AppContext {
    /// Builds the stores, loading products from `config.seed_path` when set
    /// and from the built-in catalog otherwise.
    ///
    /// ## Errors
    /// `StartupError` when the seed file can't be read or holds invalid
    /// products.
    pub fn new(config: ConfigState) -> Result<Self, StartupError> {
        let products = match &config.seed_path {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|source| StartupError::ReadSeed {
                    path: path.clone(),
                    source,
                })?;
                seed::parse_products(&json).map_err(|source| StartupError::InvalidSeed {
                    path: path.clone(),
                    source,
                })?
            }
            None => seed::products(),
        };

        info!(
            products = products.len(),
            seed = ?config.seed_path,
            "Catalog loaded"
        );

        Ok(AppContext {
            catalog: CatalogStore::new(products),
            cart: CartStore::new(),
            checkout: CheckoutStore::new(),
            config,
        })
    }
}

/// Handles one input line and returns the JSON response line.
pub fn handle_line(ctx: &AppContext, line: &str) -> String {
    let result = match serde_json::from_str::<Request>(line) {
        Ok(request) => {
            let name = request.name();
            let result = commands::invoke(ctx, request);
            if let Err(err) = &result {
                warn!(command = name, code = ?err.code, "{}", err.message);
            }
            result
        }
        Err(e) => {
            warn!(error = %e, "Rejected request");
            Err(ApiError::bad_request(format!("Invalid request: {}", e)))
        }
    };

    serde_json::to_string(&Response::from(result)).unwrap_or_else(|e| {
        tracing::error!("Failed to encode response: {}", e);
        r#"{"error":{"code":"INTERNAL","message":"Failed to encode response"}}"#.to_string()
    })
}

/// Reads requests line by line until EOF, writing one response per line.
///
/// Blank lines are skipped.
pub async fn serve<R, W>(ctx: &AppContext, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        debug!(bytes = line.len(), "Request received");

        let response = handle_line(ctx, &line);
        writer.write_all(response.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }

    info!("Input closed, shutting down");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront=trace` - Show trace for storefront crates only
/// - Default: INFO, DEBUG for storefront crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::path::PathBuf;

    fn ctx() -> AppContext {
        AppContext::new(ConfigState::default()).unwrap()
    }

    fn parse(line: &str) -> Value {
        serde_json::from_str(line).unwrap()
    }

    #[test]
    fn test_handle_line_ok_and_error() {
        let ctx = ctx();

        let response = parse(&handle_line(&ctx, r#"{"command":"add_to_cart","productId":"1"}"#));
        assert_eq!(response["ok"]["totalItems"], 1);

        let response = parse(&handle_line(&ctx, r#"{"command":"add_to_cart","productId":"nope"}"#));
        assert_eq!(response["error"]["code"], "NOT_FOUND");

        let response = parse(&handle_line(&ctx, "not json"));
        assert_eq!(response["error"]["code"], "BAD_REQUEST");
    }

    #[test]
    fn test_missing_seed_file_fails_startup() {
        let config = ConfigState {
            seed_path: Some(PathBuf::from("/definitely/not/here.json")),
            ..ConfigState::default()
        };
        assert!(matches!(
            AppContext::new(config),
            Err(StartupError::ReadSeed { .. })
        ));
    }

    #[test]
    fn test_seed_file_replaces_catalog() {
        let path = std::env::temp_dir().join(format!("storefront-seed-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"[{"id":"a","name":"Grip","description":"","price":299,"category":"accessories","subCategory":"grips","stock":3,"rating":4.0}]"#,
        )
        .unwrap();

        let config = ConfigState {
            seed_path: Some(path.clone()),
            ..ConfigState::default()
        };
        let ctx = AppContext::new(config).unwrap();
        std::fs::remove_file(&path).unwrap();

        let response = parse(&handle_line(&ctx, r#"{"command":"list_products"}"#));
        assert_eq!(response["ok"]["totalProducts"], 1);
    }

    #[tokio::test]
    async fn test_serve_writes_one_line_per_request() {
        let ctx = ctx();
        let input = concat!(
            r#"{"command":"browse_category","category":"Rackets"}"#,
            "\n\n",
            r#"{"command":"add_to_cart","productId":"2"}"#,
            "\n",
            r#"{"command":"begin_checkout"}"#,
            "\n",
            r#"{"command":"place_order"}"#,
            "\n",
        );
        let mut output = Vec::new();

        serve(&ctx, input.as_bytes(), &mut output).await.unwrap();

        let lines: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(parse)
            .collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0]["ok"]["currentCategory"], "rackets");
        assert_eq!(lines[1]["ok"]["totalItems"], 1);
        assert_eq!(lines[2]["ok"]["step"], "shipping");
        assert_eq!(lines[3]["error"]["code"], "CHECKOUT_ERROR");
    }
}
