//! # Configuration Commands

use tracing::debug;

use crate::state::ConfigState;

/// Store settings the UI needs for display (name, currency, tax rate).
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}
