//! Glissade CLI
//!
//! Command-line entry point for running FLIP transition scenarios.

use anyhow::Result;
use clap::{Parser, Subcommand};
use glissade_cli::{run_loaded_scenario, GlissadeConfig, Scenario};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "glissade")]
#[command(author, version, about = "Run FLIP transition scenarios headlessly")]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario and print its report
    Run {
        /// Scenario JSON file
        scenario: PathBuf,

        /// Config file (defaults to ./glissade.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Also write the report to this relative path
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Print the effective configuration
    Config {
        /// Config file (defaults to ./glissade.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            scenario,
            config,
            report,
        } => cmd_run(&scenario, config.as_deref(), report.as_deref()),
        Commands::Config { config } => {
            let config = GlissadeConfig::resolve(config.as_deref(), Path::new("."))?;
            print!("{}", config.to_toml()?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn cmd_run(scenario: &Path, config: Option<&Path>, report: Option<&Path>) -> Result<ExitCode> {
    let config = GlissadeConfig::resolve(config, Path::new("."))?;
    let loaded = Scenario::from_path(scenario)?;
    info!(
        "running {} ({} items, {} steps)",
        scenario.display(),
        loaded.items.len(),
        loaded.steps.len()
    );

    let outcome = run_loaded_scenario(&loaded, &config);
    outcome.report().write_to_writer(&mut std::io::stdout())?;
    if let Some(path) = report {
        outcome.report().write_to_path(path)?;
        info!("report written to {}", path.display());
    }

    if outcome.is_failed() {
        Ok(ExitCode::FAILURE)
    } else {
        info!("scenario passed");
        Ok(ExitCode::SUCCESS)
    }
}
