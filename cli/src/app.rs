//! Application context: unified state passed to every command handler.
//!
//! `AppContext` resolves the installation home once and owns the concrete
//! adapters, so command handlers only pick which service to call.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::application::ports::ConfigStore as _;
use crate::application::services::provision::StepOutput;
use crate::domain::config::ZephyrwwConfig;
use crate::domain::error::InstallError;
use crate::domain::layout::venv_dir;
use crate::domain::step::ToolSettings;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlConfigStore;
use crate::infra::fs::{ProcessWorkingDir, StdFs};
use crate::infra::release::GithubReleaseIndex;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer, TerminalReporter};

/// Directory under the user's home used when no installation home is given.
pub const DEFAULT_HOME_DIRNAME: &str = ".zephyrww";

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Behaviour flags.
pub struct BehaviourFlags {
    /// Skip interactive prompts (also set by `CI` / `ZEPHYRWW_YES` env vars).
    pub yes: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Behaviour options.
    pub behaviour: BehaviourFlags,
    /// Explicit installation home (`--home` / `ZEPHYRWW_HOME`).
    pub home: Option<PathBuf>,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Installation home.
    pub home: PathBuf,
    /// Configuration persistence.
    pub config_store: YamlConfigStore,
    /// Process runner for provisioning steps.
    pub runner: TokioCommandRunner,
    /// Local filesystem adapter.
    pub fs: StdFs,
    /// Process working directory adapter.
    pub workdir: ProcessWorkingDir,
    /// When `true`, skip interactive prompts and use defaults.
    ///
    /// Set when `--yes` / `-y` is passed, or when the `CI` or `ZEPHYRWW_YES`
    /// environment variables are present.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::MissingHome`] if no home was given and the
    /// user's home directory cannot be determined.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let ci_env = std::env::var("CI").is_ok() || std::env::var("ZEPHYRWW_YES").is_ok();
        let non_interactive = flags.behaviour.yes || ci_env;

        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        let home = resolve_home(flags.home.as_deref())?;
        tracing::debug!(home = %home.display(), "resolved installation home");

        Ok(Self {
            // JSON mode keeps stdout for the result object.
            output: OutputContext::new(
                flags.output.no_color,
                flags.output.quiet || flags.output.json,
            ),
            mode,
            config_store: YamlConfigStore::for_home(&home),
            home,
            runner: TokioCommandRunner,
            fs: StdFs,
            workdir: ProcessWorkingDir,
            non_interactive,
        })
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Progress reporter for services.
    #[must_use]
    pub fn terminal_reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }

    /// Whether step output is streamed or captured (quiet and JSON modes).
    #[must_use]
    pub fn step_output(&self) -> StepOutput {
        if self.output.quiet {
            StepOutput::Capture
        } else {
            StepOutput::Inherit
        }
    }

    /// Load the configuration file (defaults when absent).
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn config(&self) -> Result<ZephyrwwConfig> {
        self.config_store.load()
    }

    /// Programs the provisioning steps will invoke.
    #[must_use]
    pub fn tool_settings(&self, config: &ZephyrwwConfig) -> ToolSettings {
        let venv_present = venv_dir(&self.home).is_dir();
        let tools = config.tool_settings(&self.home, venv_present);
        ToolSettings {
            pip: anchor_program(tools.pip),
            west: anchor_program(tools.west),
            ..tools
        }
    }

    /// Release index configured by `release.url`.
    #[must_use]
    pub fn release_index(&self, config: &ZephyrwwConfig) -> GithubReleaseIndex {
        GithubReleaseIndex::new(&config.release.url)
    }

    /// Ask the user for confirmation.
    ///
    /// When `non_interactive` is `true` (CI, `--yes` flag, or `ZEPHYRWW_YES`
    /// env), returns `default` immediately without prompting.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }
}

/// Resolve the installation home: explicit value, else `~/.zephyrww`.
///
/// The result is always absolute, anchored at the current directory, because
/// provisioning runs from inside the installation root.
///
/// # Errors
///
/// Returns [`InstallError::MissingHome`] when neither is available, or the
/// explicit value is empty, and [`InstallError::InvalidHome`] when a relative
/// value cannot be anchored.
pub fn resolve_home(explicit: Option<&Path>) -> Result<PathBuf, InstallError> {
    let home = match explicit {
        Some(p) if p.as_os_str().is_empty() => return Err(InstallError::MissingHome),
        Some(p) => p.to_path_buf(),
        None => dirs::home_dir()
            .map(|h| h.join(DEFAULT_HOME_DIRNAME))
            .ok_or(InstallError::MissingHome)?,
    };
    std::path::absolute(&home).map_err(|e| InstallError::InvalidHome {
        path: home,
        reason: e.to_string(),
    })
}

/// Anchor a relative program path such as `bin/west` at the current
/// directory. Bare names are left for `PATH` lookup.
fn anchor_program(program: String) -> String {
    let path = Path::new(&program);
    if path.is_absolute() || path.components().count() < 2 {
        return program;
    }
    std::path::absolute(path).map_or(program.clone(), |p| p.to_string_lossy().into_owned())
}
