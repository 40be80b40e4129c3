//! # Storefront Command Loop
//!
//! Entry point for the `storefront` binary.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        storefront (binary)                              │
//! │                                                                         │
//! │  Storefront UI ──── JSON line per command ────► stdin                   │
//! │                                                   │                     │
//! │                                                   ▼                     │
//! │                                    storefront_app::serve                │
//! │                                    (commands + stores)                  │
//! │                                                   │                     │
//! │  Storefront UI ◄─── JSON line per response ─── stdout                  │
//! │                                                                         │
//! │  Logs ──► stderr                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup Sequence
//! 1. Parse flags
//! 2. Initialize tracing (logging)
//! 3. Load configuration (defaults, `STOREFRONT_*` env, then flags)
//! 4. Load the seed catalog and create the stores
//! 5. Serve until stdin closes

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use storefront_app::state::ConfigState;
use storefront_app::AppContext;
use storefront_core::TaxRate;
use tokio::io::BufReader;
use tracing::{error, info};

/// Storefront state service speaking JSON lines over stdin/stdout.
#[derive(Debug, Parser)]
#[command(name = "storefront", version, about)]
struct Args {
    /// JSON file of products replacing the built-in catalog.
    #[arg(long, value_name = "PATH")]
    seed: Option<PathBuf>,

    /// Tax rate applied at checkout, in percent (e.g. 10 or 8.25).
    #[arg(long, value_name = "PERCENT", value_parser = parse_tax_rate)]
    tax_rate: Option<f64>,

    /// Store name shown in the header.
    #[arg(long)]
    store_name: Option<String>,
}

impl Args {
    /// Flags win over the environment.
    fn apply(self, mut config: ConfigState) -> ConfigState {
        if let Some(path) = self.seed {
            config.seed_path = Some(path);
        }
        if let Some(rate) = self.tax_rate {
            config.tax_rate_bps = TaxRate::from_percentage(rate).bps();
        }
        if let Some(name) = self.store_name {
            config.store_name = name;
        }
        config
    }
}

fn parse_tax_rate(s: &str) -> Result<f64, String> {
    let rate: f64 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    if !(0.0..=100.0).contains(&rate) {
        return Err(format!("tax rate must be between 0 and 100, got {}", rate));
    }
    Ok(rate)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    storefront_app::init_tracing();

    let config = args.apply(ConfigState::from_env());
    info!(
        store = %config.store_name,
        tax_rate_bps = config.tax_rate_bps,
        currency = %config.currency_code,
        "Starting storefront"
    );

    let ctx = match AppContext::new(config) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Startup failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let stdin = BufReader::new(tokio::io::stdin());
    if let Err(e) = storefront_app::serve(&ctx, stdin, tokio::io::stdout()).await {
        error!("Command loop failed: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "storefront",
            "--tax-rate",
            "12.5",
            "--store-name",
            "Net Play",
            "--seed",
            "products.json",
        ]);
        let config = args.apply(ConfigState::default());
        assert_eq!(config.tax_rate_bps, 1250);
        assert_eq!(config.store_name, "Net Play");
        assert_eq!(config.seed_path, Some(PathBuf::from("products.json")));
    }

    #[test]
    fn test_no_flags_keep_config() {
        let args = Args::parse_from(["storefront"]);
        assert_eq!(args.apply(ConfigState::default()), ConfigState::default());
    }

    #[test]
    fn test_tax_rate_bounds() {
        assert!(parse_tax_rate("10").is_ok());
        assert!(parse_tax_rate("101").is_err());
        assert!(parse_tax_rate("-1").is_err());
        assert!(parse_tax_rate("ten").is_err());
    }
}
