//! Configuration commands

use std::path::Path;

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use crate::storage::Config;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(
    cmd: ConfigCommands,
    output: &Output,
    config: &Config,
    explicit: Option<&Path>,
) -> Result<()> {
    match cmd {
        ConfigCommands::Show => {
            if output.is_json() {
                output.data(config);
            } else {
                print!("{}", config.to_toml()?);
            }
        }

        ConfigCommands::Path => {
            let path = Config::resolve_path(explicit)
                .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
            if output.is_json() {
                output.data(&serde_json::json!({
                    "path": path.display().to_string(),
                    "exists": path.exists(),
                }));
            } else {
                println!("{}", path.display());
            }
        }

        ConfigCommands::Init { force } => {
            let path = Config::resolve_path(explicit)
                .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists: {} (use --force to overwrite)",
                    path.display()
                );
            }
            Config::default().save(&path)?;
            output.success(&format!("Wrote default config to {}", path.display()));
        }
    }

    Ok(())
}
