//! zephyrww - Idempotent installer for Zephyr RTOS workspaces and SDKs

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use zephyrww_cli::cli::Cli;
use zephyrww_cli::domain::InstallError;
use zephyrww_cli::output::json::format_error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let json = cli.json;
    if let Err(e) = cli.run().await {
        report_error(&e, json);
        std::process::exit(1);
    }
}

/// Diagnostic logging on stderr. `RUST_LOG` wins over the flags.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn report_error(e: &anyhow::Error, json: bool) {
    if json {
        let code = e
            .downcast_ref::<InstallError>()
            .map_or("error", InstallError::code);
        match format_error(&format!("{e:#}"), code) {
            Ok(out) => println!("{out}"),
            Err(_) => eprintln!("Error: {e:#}"),
        }
    } else {
        eprintln!("Error: {e:#}");
    }
}
