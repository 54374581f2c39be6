//! Infrastructure implementation of the `ConfigStore` port.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore;
use crate::domain::config::ZephyrwwConfig;

/// Config file name inside the installation home.
pub const CONFIG_FILENAME: &str = "config.yaml";

/// Production implementation of `ConfigStore` that uses a YAML file on disk.
pub struct YamlConfigStore {
    path: PathBuf,
}

impl YamlConfigStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `ZEPHYRWW_CONFIG` if set, else `<home>/config.yaml`.
    #[must_use]
    pub fn for_home(home: &Path) -> Self {
        let path = std::env::var_os("ZEPHYRWW_CONFIG")
            .map_or_else(|| home.join(CONFIG_FILENAME), PathBuf::from);
        Self::new(path)
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<ZephyrwwConfig> {
        let path = &self.path;
        if !path.exists() {
            return Ok(ZephyrwwConfig::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    fn save(&self, config: &ZephyrwwConfig) -> Result<()> {
        let path = &self.path;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
        let content = serde_yaml::to_string(config).context("cannot serialize config")?;
        std::fs::write(path, content).with_context(|| format!("cannot write {}", path.display()))
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
