//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command line flags (`--store-name`, `--tax-rate`, `--seed`)
//! 2. Environment variables (`STOREFRONT_*`)
//! 3. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;

use serde::Serialize;
use storefront_core::{Money, TaxRate, DEFAULT_FEATURED_COUNT};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name shown in the header
    pub store_name: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Tax rate applied at checkout, in basis points
    /// e.g., 1000 = 10%
    pub tax_rate_bps: u32,

    /// Products in the home page strip
    pub featured_count: usize,

    /// JSON product file replacing the built-in catalog
    #[serde(skip)]
    pub seed_path: Option<PathBuf>,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Store: "Shuttle Point"
    /// - Currency: INR (₹)
    /// - Tax: 10%
    /// - Seed: built-in catalog
    fn default() -> Self {
        ConfigState {
            store_name: "Shuttle Point".to_string(),
            currency_code: "INR".to_string(),
            currency_symbol: "₹".to_string(),
            currency_decimals: 2,
            tax_rate_bps: TaxRate::default().bps(),
            featured_count: DEFAULT_FEATURED_COUNT,
            seed_path: None,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `STOREFRONT_STORE_NAME`: Override store name
    /// - `STOREFRONT_TAX_RATE`: Override tax rate as a percentage (e.g., "8.25")
    /// - `STOREFRONT_SEED_PATH`: Load products from a JSON file
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::from_env`] with an injectable lookup.
    ///
    /// Unparseable tax rates are ignored and the default is kept.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(store_name) = lookup("STOREFRONT_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(tax_rate_str) = lookup("STOREFRONT_TAX_RATE") {
            if let Ok(rate) = tax_rate_str.trim().parse::<f64>() {
                if (0.0..=100.0).contains(&rate) {
                    config.tax_rate_bps = TaxRate::from_percentage(rate).bps();
                }
            }
        }

        if let Some(path) = lookup("STOREFRONT_SEED_PATH") {
            config.seed_path = Some(PathBuf::from(path));
        }

        config
    }

    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    /// Formats an amount as a currency string.
    ///
    /// ```rust
    /// use storefront_app::state::ConfigState;
    /// use storefront_core::Money;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_minor(1_899_000)), "₹18990.00");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let minor = amount.minor();
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = minor / divisor;
        let frac = (minor % divisor).abs();

        format!(
            "{}{}{}",
            if minor < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ConfigState::from_lookup(lookup_from(&[]));
        assert_eq!(config, ConfigState::default());
        assert_eq!(config.tax_rate().bps(), 1000);
        assert_eq!(config.featured_count, 8);
        assert_eq!(config.currency_code, "INR");
    }

    #[test]
    fn test_env_overrides() {
        let config = ConfigState::from_lookup(lookup_from(&[
            ("STOREFRONT_STORE_NAME", "Smash Hub"),
            ("STOREFRONT_TAX_RATE", "8.25"),
            ("STOREFRONT_SEED_PATH", "/tmp/products.json"),
        ]));
        assert_eq!(config.store_name, "Smash Hub");
        assert_eq!(config.tax_rate_bps, 825);
        assert_eq!(config.seed_path, Some(PathBuf::from("/tmp/products.json")));
    }

    #[test]
    fn test_bad_tax_rate_keeps_default() {
        let config = ConfigState::from_lookup(lookup_from(&[("STOREFRONT_TAX_RATE", "ten")]));
        assert_eq!(config.tax_rate_bps, 1000);

        let config = ConfigState::from_lookup(lookup_from(&[("STOREFRONT_TAX_RATE", "-5")]));
        assert_eq!(config.tax_rate_bps, 1000);
    }

    #[test]
    fn test_format_currency() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_minor(1234)), "₹12.34");
        assert_eq!(config.format_currency(Money::from_minor(5)), "₹0.05");
        assert_eq!(config.format_currency(Money::zero()), "₹0.00");
        assert_eq!(config.format_currency(Money::from_minor(-1234)), "-₹12.34");
    }

    #[test]
    fn test_seed_path_not_exposed() {
        let mut config = ConfigState::default();
        config.seed_path = Some(PathBuf::from("/secret/products.json"));
        let json = serde_json::to_value(&config).unwrap();
        assert!(json.get("seedPath").is_none());
        assert_eq!(json["taxRateBps"], 1000);
    }
}
