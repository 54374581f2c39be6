//! Output formatting module

pub mod human;
pub mod json;
pub mod progress;
pub mod reporter;
pub mod styles;

use std::path::Path;

use anyhow::Result;
use console::Term;
use owo_colors::OwoColorize as _;

use crate::application::services::ensure::EnsureOutcome;
use crate::application::services::registry::InstalledVersion;
use crate::application::services::setup::SetupOutcome;
use crate::domain::config::ZephyrwwConfig;
use crate::domain::step::ToolSettings;
pub use human::HumanRenderer;
pub use json::JsonRenderer;
pub use reporter::TerminalReporter;
pub use styles::Styles;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Check if progress indicators should be shown.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print a warning message prefixed with `⚠`. Suppressed when `quiet`.
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "⚠".style(self.styles.warning));
        }
    }

    /// Print an error message prefixed with `✗` to stderr. Never suppressed.
    pub fn error(&self, msg: &str) {
        eprintln!("  {} {msg}", "✗".style(self.styles.error));
    }

    /// Print an info message prefixed with `ℹ`. Suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "ℹ".style(self.styles.info));
        }
    }

    /// Print a section header. Suppressed when `quiet`.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// Print a key-value pair with the key dimmed. Suppressed when `quiet`.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }
}

/// Output renderer selected by `--json`.
///
/// Commands call `app.renderer().render_*()` and never branch on the mode
/// themselves.
pub enum Renderer<'a> {
    Human(HumanRenderer<'a>),
    Json(JsonRenderer),
}

impl Renderer<'_> {
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_version(version);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::render_version(version),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_ensure(&self, outcome: &EnsureOutcome) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_ensure(outcome);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::render_ensure(outcome),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_status(&self, installed: &InstalledVersion) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_status(installed);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::render_status(installed),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_list(&self, home: &Path, versions: &[InstalledVersion]) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_list(home, versions);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::render_list(home, versions),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_latest(&self, tag: &str) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_latest(tag);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::render_latest(tag),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_setup(&self, home: &Path, outcome: SetupOutcome) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_setup(home, outcome);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::render_setup(home, outcome),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_remove(&self, version: &str, removed: bool) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_remove(version, removed);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::render_remove(version, removed),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(
        &self,
        config: &ZephyrwwConfig,
        tools: &ToolSettings,
        path: &Path,
    ) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_config(config, tools, path);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::render_config(config, tools, path),
        }
    }

    /// Confirm a `config set`. JSON mode prints the updated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config_set(
        &self,
        key: &str,
        value: &str,
        config: &ZephyrwwConfig,
        tools: &ToolSettings,
        path: &Path,
    ) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_config_set(key, value);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::render_config(config, tools, path),
        }
    }
}
