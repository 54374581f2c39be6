//! CLI argument parsing with clap derive

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;

/// Idempotent installer for Zephyr RTOS workspaces and SDKs
#[derive(Parser)]
#[command(
    name = "zephyrww",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Increase diagnostic logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Installation home holding one directory per Zephyr version
    #[arg(long, global = true, env = "ZEPHYRWW_HOME", value_name = "DIR")]
    pub home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Install a Zephyr version unless it is already installed
    #[command(visible_alias = "install")]
    Ensure(commands::ensure::EnsureArgs),

    /// Show the installation state of one version
    Status(commands::status::StatusArgs),

    /// List installed versions
    List,

    /// Show the latest published Zephyr release
    Latest,

    /// Create the installation home and its Python virtual environment
    Setup,

    /// Delete an installed version
    Remove(commands::remove::RemoveArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the installation home cannot be resolved or the
    /// command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            json,
            quiet,
            no_color,
            verbose: _,
            home,
            command,
        } = self;

        let yes = matches!(&command, Command::Remove(args) if args.yes);
        let app = AppContext::new(&AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            behaviour: BehaviourFlags { yes },
            home,
        })?;

        match command {
            Command::Ensure(args) => commands::ensure::run(&app, &args).await,
            Command::Status(args) => commands::status::run(&app, &args),
            Command::List => commands::list::run(&app),
            Command::Latest => commands::latest::run(&app).await,
            Command::Setup => commands::setup::run(&app).await,
            Command::Remove(args) => commands::remove::run(&app, &args),
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Version => commands::version::run(&app),
        }
    }
}
