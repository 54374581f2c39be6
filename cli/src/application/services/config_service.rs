//! Application service: configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::ZephyrwwConfig;

/// Load configuration.
pub fn load_config(store: &impl ConfigStore) -> Result<ZephyrwwConfig> {
    store.load()
}

/// Validate and persist a single `key = value` change.
///
/// # Errors
///
/// Returns an error if the key or value is invalid, or the store fails.
pub fn set_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<ZephyrwwConfig> {
    let mut config = store.load()?;
    config.set(key, value)?;
    store.save(&config)?;
    Ok(config)
}
