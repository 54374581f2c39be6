//! Command implementations

pub mod config;
pub mod ensure;
pub mod latest;
pub mod list;
pub mod remove;
pub mod setup;
pub mod status;
pub mod version;
