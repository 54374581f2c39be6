//! Zephyr version identifiers.
//!
//! Pure validation only; no I/O.

use std::fmt;

use crate::domain::error::InstallError;

/// Literal every accepted version tag must begin with.
pub const VERSION_PREFIX: char = 'v';

/// Keyword accepted by `ensure` in place of a concrete tag.
pub const LATEST_KEYWORD: &str = "latest";

/// A validated Zephyr release tag such as `v3.7.0`.
///
/// The tag doubles as a directory name under the installation home, so it is
/// guaranteed to start with `v` and to be a single path component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZephyrVersion(String);

impl ZephyrVersion {
    /// Validate a raw version string.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::InvalidVersion`] if the string does not start
    /// with `v` or contains a path separator.
    pub fn parse(raw: &str) -> Result<Self, InstallError> {
        if !raw.starts_with(VERSION_PREFIX) || raw.contains(['/', '\\']) {
            return Err(InstallError::InvalidVersion(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Semantic version of the tag with the `v` stripped, when it parses.
    #[must_use]
    pub fn semver(&self) -> Option<semver::Version> {
        semver::Version::parse(&self.0[VERSION_PREFIX.len_utf8()..]).ok()
    }
}

impl fmt::Display for ZephyrVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ZephyrVersion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Order versions by semver when both parse, otherwise by raw string.
#[must_use]
pub fn compare_versions(a: &ZephyrVersion, b: &ZephyrVersion) -> std::cmp::Ordering {
    match (a.semver(), b.semver()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Greater,
        (None, Some(_)) => std::cmp::Ordering::Less,
        (None, None) => a.as_str().cmp(b.as_str()),
    }
}
