//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod layout;
pub mod step;
pub mod version;

pub use config::{ZephyrwwConfig, validate_config_key, validate_config_value};
pub use error::{CleanupWarning, ConfigError, InstallError, ReleaseError, StepExit};
pub use layout::InstallPaths;
pub use step::{ProvisionStep, Severity, StepAction, StepCommand, ToolSettings};
pub use version::ZephyrVersion;
