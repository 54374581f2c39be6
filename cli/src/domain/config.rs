//! Domain types and validators for zephyrww configuration.
//!
//! Pure functions only; no I/O, no async, no filesystem access.

use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::layout::{venv_bin, venv_dir};
use crate::domain::step::ToolSettings;

// ── Constants ────────────────────────────────────────────────────────────────

pub const DEFAULT_MANIFEST_URL: &str = "https://github.com/htringuyen/zephyr.git";
pub const DEFAULT_RELEASE_URL: &str =
    "https://api.github.com/repos/zephyrproject-rtos/zephyr/releases/latest";
pub const DEFAULT_PYTHON: &str = "python3";

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "manifest.url",
    "release.url",
    "tools.python",
    "tools.pip",
    "tools.west",
];

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `<home>/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ZephyrwwConfig {
    pub manifest: ManifestConfig,
    pub release: ReleaseConfig,
    pub tools: ToolsConfig,
}

/// Zephyr manifest repository used by `west init`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManifestConfig {
    #[serde(default = "default_manifest_url")]
    pub url: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            url: default_manifest_url(),
        }
    }
}

/// Remote index queried for the latest release tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReleaseConfig {
    #[serde(default = "default_release_url")]
    pub url: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            url: default_release_url(),
        }
    }
}

/// External programs. Unset `pip`/`west` resolve against the home's venv.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolsConfig {
    #[serde(default = "default_python")]
    pub python: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub west: Option<String>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            python: default_python(),
            pip: None,
            west: None,
        }
    }
}

fn default_manifest_url() -> String {
    DEFAULT_MANIFEST_URL.to_string()
}

fn default_release_url() -> String {
    DEFAULT_RELEASE_URL.to_string()
}

fn default_python() -> String {
    DEFAULT_PYTHON.to_string()
}

impl ZephyrwwConfig {
    /// Resolve the programs used for provisioning.
    ///
    /// Explicit `tools.pip` / `tools.west` win. Otherwise, when the home has
    /// a virtual environment, its binaries are used; failing that, the bare
    /// program names are looked up on `PATH`.
    #[must_use]
    pub fn tool_settings(&self, home: &Path, venv_present: bool) -> ToolSettings {
        let venv = venv_dir(home);
        let resolve = |configured: &Option<String>, program: &str| match configured {
            Some(p) => p.clone(),
            None if venv_present => venv_bin(&venv, program).to_string_lossy().into_owned(),
            None => program.to_string(),
        };
        ToolSettings {
            pip: resolve(&self.tools.pip, "pip"),
            west: resolve(&self.tools.west, "west"),
            manifest_url: self.manifest.url.clone(),
        }
    }

    /// Apply a validated `key = value` pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the key or value is invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;
        match key {
            "manifest.url" => self.manifest.url = value.to_string(),
            "release.url" => self.release.url = value.to_string(),
            "tools.python" => self.tools.python = value.to_string(),
            "tools.pip" => self.tools.pip = Some(value.to_string()),
            "tools.west" => self.tools.west = Some(value.to_string()),
            _ => anyhow::bail!("Unknown setting: {key}"),
        }
        Ok(())
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let reason = if value.trim().is_empty() {
        Some("Value must not be empty.")
    } else if key == "release.url" && !value.starts_with("https://") {
        Some("The release index must be an https:// URL.")
    } else {
        None
    };
    if let Some(reason) = reason {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
        .into());
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
