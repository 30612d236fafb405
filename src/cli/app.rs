//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::prelude::*;

use super::output::{Output, OutputFormat};
use super::{classify, config_cmd, design, diagram_cmd, enhance, ideate};
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "archsmith")]
#[command(author, version, about = "Deterministic cloud architecture synthesis from a project description")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Path to the configuration file
    #[arg(long, global = true, env = "ARCHSMITH_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Design an architecture for a project
    Design(design::DesignArgs),

    /// Show the requirement flags detected in a description
    Classify {
        /// Project description
        #[arg(required = true)]
        description: Vec<String>,
    },

    /// Apply the enhancement rules to a saved report
    Enhance(enhance::EnhanceArgs),

    /// Render or validate the diagram of a saved report
    Diagram(diagram_cmd::DiagramArgs),

    /// Generate a project concept brief with an external generator
    Ideate(ideate::IdeateArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(config_cmd::ConfigCommands),
}

/// Installs the stderr log subscriber; `RUST_LOG` takes precedence
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "archsmith=debug" } else { "archsmith=warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let format = cli.format.unwrap_or_else(|| config.default_format.into());
    let output = Output::new(format, cli.verbose);

    output.verbose("archsmith starting");

    match cli.command {
        Commands::Design(args) => design::run(args, &output, &config)?,
        Commands::Classify { description } => classify::run(&description, &output)?,
        Commands::Enhance(args) => enhance::run(args, &output, &config)?,
        Commands::Diagram(args) => diagram_cmd::run(args, &output, &config)?,
        Commands::Ideate(args) => ideate::run(args, &output, &config)?,
        Commands::Config(cmd) => config_cmd::run(cmd, &output, &config, cli.config.as_deref())?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
