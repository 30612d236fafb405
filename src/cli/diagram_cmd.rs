//! Diagram rendering and validation command

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use super::output::Output;
use crate::domain::compile;
use crate::render::MermaidRenderer;
use crate::storage::{self, Config};

#[derive(Args)]
pub struct DiagramArgs {
    /// Report file (JSON or YAML)
    pub report: PathBuf,

    /// Write the Mermaid text to a file instead of stdout
    #[arg(long, short = 'o', value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Validate the stored diagram instead of rendering
    #[arg(long)]
    pub check: bool,
}

pub fn run(args: DiagramArgs, output: &Output, config: &Config) -> Result<()> {
    let architecture = storage::load_report(&args.report)?;

    if args.check {
        let stats = architecture
            .diagram
            .validate()
            .with_context(|| format!("Invalid diagram in {}", args.report.display()))?;

        if output.is_json() {
            output.data(&stats);
        } else {
            output.success(&format!(
                "Diagram is valid: {} layers, {} nodes, {} edges",
                stats.layers, stats.nodes, stats.edges
            ));
        }
        return Ok(());
    }

    let diagram = compile(&architecture.model);
    let mermaid = MermaidRenderer::new(config.diagram.direction).render(&diagram);

    match &args.out {
        Some(path) => {
            storage::write_file(path, &mermaid)?;
            if output.is_json() {
                output.data(&serde_json::json!({
                    "path": path.display().to_string(),
                    "fingerprint": storage::fingerprint(&mermaid),
                }));
            } else {
                output.success(&format!("Wrote diagram to {}", path.display()));
            }
        }
        None if output.is_json() => output.data(&serde_json::json!({
            "mermaid": mermaid,
            "fingerprint": storage::fingerprint(&mermaid),
        })),
        None => print!("{}", mermaid),
    }

    Ok(())
}
