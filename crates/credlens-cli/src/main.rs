//! # credlens CLI entry point
//!
//! Parses command-line arguments, installs logging and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use credlens_cli::config::CliConfig;
use credlens_cli::export::{run_export, ExportArgs};
use credlens_cli::list::{run_list, ListArgs};
use credlens_cli::show::{run_show, ShowArgs};
use credlens_cli::Session;

/// Browse, inspect and export verifiable execution credentials.
///
/// Connection settings come from `CREDLENS_API_URL`, `CREDLENS_API_TOKEN`
/// and `CREDLENS_TIMEOUT_SECS`, overridden by `--config` and `--api-url`.
#[derive(Parser, Debug)]
#[command(name = "credlens", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the identity service.
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List credentials matching the filters.
    List(ListArgs),

    /// Show one credential in detail.
    Show(ShowArgs),

    /// Export one credential or the filtered set as JSON.
    Export(ExportArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("credlens {} starting", env!("CARGO_PKG_VERSION"));

    let config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };
    let session = Session {
        config,
        api_url: cli.api_url,
    };

    let result = match &cli.command {
        Commands::List(args) => run_list(args, &session).await,
        Commands::Show(args) => run_show(args, &session).await,
        Commands::Export(args) => run_export(args, &session).await,
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
