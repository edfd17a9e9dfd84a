//! Command-line checker and formatter for Brewery custom event files.
//!
//! # Subcommands
//!
//! - `check [FILE]` -- resolve every event and report the first problem
//! - `format [FILE] [--output PATH] [--format yaml|json]` -- rewrite the
//!   file in canonical form
//!
//! `FILE` defaults to `events.path` from `brewery-config.yaml`.

mod error;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use brewery_events::writer::write_canonical;
use brewery_events::{
    BreweryConfig, BuiltinRegistry, EventRegistry, TextFormat, load_events_file, save_events_file,
    serialize,
};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::error::CliError;

#[derive(Debug, Parser)]
#[command(version, about = "Check and format Brewery custom event files")]
struct Cli {
    /// Configuration file; missing means defaults.
    #[arg(long, default_value = "brewery-config.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve an events file and report problems.
    Check {
        /// Events file to read.
        file: Option<PathBuf>,
    },
    /// Rewrite an events file in canonical form.
    Format {
        /// Events file to read.
        file: Option<PathBuf>,
        /// Where to write; stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output format (yaml or json).
        #[arg(long)]
        format: Option<TextFormat>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&BreweryConfig::default());
            error!(error = %e, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config);
    info!(
        events_path = %config.events.path.display(),
        allow_empty_events = config.events.allow_empty_events,
        output_format = %config.events.output_format,
        "Configuration loaded"
    );

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "brewery-events failed");
            ExitCode::FAILURE
        }
    }
}

/// Load configuration from `path`, falling back to defaults when the file
/// does not exist.
fn load_config(path: &Path) -> Result<BreweryConfig, CliError> {
    if path.exists() {
        Ok(BreweryConfig::from_file(path)?)
    } else {
        let mut config = BreweryConfig::default();
        config.apply_env_overrides_with(|name| std::env::var(name).ok());
        config.normalize();
        Ok(config)
    }
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the
/// configured level.
fn init_logging(config: &BreweryConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    if config.logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn run(command: Command, config: &BreweryConfig) -> Result<(), CliError> {
    match command {
        Command::Check { file } => {
            let path = file.unwrap_or_else(|| config.events.path.clone());
            let registry = load(&path, config)?;
            for event in registry.events() {
                info!(
                    event = %event.key,
                    steps = event.steps.len(),
                    flattened_steps = event.flattened_len(),
                    alcohol = event.alcohol_requirement,
                    toxins = event.toxin_requirement,
                    probability_weight = event.probability_weight,
                    "Event OK"
                );
            }
            info!(path = %path.display(), events = registry.len(), "Check passed");
            Ok(())
        }
        Command::Format {
            file,
            output,
            format,
        } => {
            let path = file.unwrap_or_else(|| config.events.path.clone());
            let format = format.unwrap_or(config.events.output_format);
            let registry = load(&path, config)?;
            match output {
                Some(output) => save_events_file(&registry, &output, format)?,
                None => write_canonical(&serialize(&registry), format, &mut std::io::stdout().lock())?,
            }
            Ok(())
        }
    }
}

fn load(path: &Path, config: &BreweryConfig) -> Result<EventRegistry, CliError> {
    let builtins = BuiltinRegistry::with_defaults();
    Ok(load_events_file(
        path,
        &builtins,
        config.events.resolve_options(),
    )?)
}
