//! Architecture enhancement command

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::design::write_outputs;
use super::output::Output;
use super::summary;
use crate::domain::Enhancer;
use crate::render::MermaidRenderer;
use crate::storage::{self, Config, Report};

#[derive(Args)]
pub struct EnhanceArgs {
    /// Report file produced by `design --save` (JSON or YAML)
    pub report: PathBuf,

    /// Write the enhanced Mermaid diagram to a file
    #[arg(long, value_name = "FILE")]
    pub diagram_out: Option<PathBuf>,

    /// Save the enhanced report (JSON, or YAML by extension)
    #[arg(long, value_name = "FILE")]
    pub save: Option<PathBuf>,
}

pub fn run(args: EnhanceArgs, output: &Output, config: &Config) -> Result<()> {
    let architecture = storage::load_report(&args.report)?;
    output.verbose_ctx(
        "enhance",
        &format!("Loaded '{}' from {}", architecture.project_name, args.report.display()),
    );

    let (enhanced, changes) = architecture.enhanced(&Enhancer::new(config.enhance.score_bonus));
    output.verbose_ctx("enhance", &format!("Applied {} change(s)", changes.len()));

    if args.save.as_deref() == Some(args.report.as_path()) {
        output.warn(&format!("Overwriting {}", args.report.display()));
    }

    let renderer = MermaidRenderer::new(config.diagram.direction);
    let report = Report::new(&enhanced, &renderer, changes);

    write_outputs(
        output,
        &report,
        args.diagram_out.as_deref(),
        args.save.as_deref(),
    )?;

    if output.is_json() {
        output.data(&report);
    } else {
        summary::print_enhancements(&report.enhancements);
        println!();
        summary::print_report(&report);
        if args.diagram_out.is_none() {
            println!();
            print!("{}", report.mermaid);
        }
    }

    Ok(())
}
