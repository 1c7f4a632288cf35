//! # propgen CLI entry point
//!
//! Parses command-line arguments, loads the generator configuration, and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use propgen_cli::config::GeneratorConfig;
use propgen_cli::inspect::{run_inspect, InspectArgs};
use propgen_cli::resolve::{run_resolve_path, ResolvePathArgs};
use propgen_cli::validate::{run_validate, ValidateArgs};

/// Property tree engine for resource code generation.
///
/// Loads product and resource declarations, resolves defaults, validates
/// every property, filters the tree for a version build, and reports the
/// names, paths, and force-new flags the templates would see.
#[derive(Parser, Debug)]
#[command(name = "propgen", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file. Defaults to `propgen.yaml` if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Prepare every resource for a version build and report violations.
    Validate(ValidateArgs),

    /// Print resolved names, kinds, and force-new flags for a resource.
    Inspect(InspectArgs),

    /// Resolve configuration paths against a resource's current schema.
    ResolvePath(ResolvePathArgs),
}

fn main() -> ExitCode {
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

    tracing::debug!("propgen CLI starting");

    let result = GeneratorConfig::load(cli.config.as_deref()).and_then(|config| {
        match &cli.command {
            Commands::Validate(args) => run_validate(args, &config),
            Commands::Inspect(args) => run_inspect(args, &config),
            Commands::ResolvePath(args) => run_resolve_path(args, &config),
        }
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
