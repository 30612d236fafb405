//! Architecture design command

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use super::output::Output;
use super::summary;
use crate::domain::{self, Enhancer, RequestDraft, ScaleTier};
use crate::render::MermaidRenderer;
use crate::storage::{self, Config, Report};

#[derive(Args)]
pub struct DesignArgs {
    /// Project name
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Scale tier (small, medium, large)
    #[arg(long, short = 's')]
    pub scale: Option<String>,

    /// Project description
    #[arg(long, short = 'd', conflicts_with = "description_file")]
    pub description: Option<String>,

    /// Read the description from a file ("-" for stdin)
    #[arg(long, value_name = "FILE")]
    pub description_file: Option<PathBuf>,

    /// JSON or YAML request file with projectName, scale and description
    #[arg(long, value_name = "FILE")]
    pub request: Option<PathBuf>,

    /// Apply the enhancement rules to the result
    #[arg(long)]
    pub enhance: bool,

    /// Write the Mermaid diagram to a file
    #[arg(long, value_name = "FILE")]
    pub diagram_out: Option<PathBuf>,

    /// Save the report (JSON, or YAML by extension)
    #[arg(long, value_name = "FILE")]
    pub save: Option<PathBuf>,
}

pub fn run(args: DesignArgs, output: &Output, config: &Config) -> Result<()> {
    let draft = collect_draft(&args, config)?;
    let request = draft.build()?;
    request.require_description_len(config.request.min_description_length)?;

    output.verbose_ctx(
        "design",
        &format!(
            "Designing '{}' at {} scale",
            request.project_name(),
            request.scale()
        ),
    );

    let architecture = domain::design(&request);
    let (architecture, changes) = if args.enhance {
        architecture.enhanced(&Enhancer::new(config.enhance.score_bonus))
    } else {
        (architecture, Vec::new())
    };

    let renderer = MermaidRenderer::new(config.diagram.direction);
    let report = Report::new(&architecture, &renderer, changes);

    write_outputs(
        output,
        &report,
        args.diagram_out.as_deref(),
        args.save.as_deref(),
    )?;

    if output.is_json() {
        output.data(&report);
    } else {
        summary::print_report(&report);
        if args.enhance {
            println!();
            summary::print_enhancements(&report.enhancements);
        }
        if args.diagram_out.is_none() {
            println!();
            print!("{}", report.mermaid);
        }
    }

    Ok(())
}

/// Merges flags, request file and config defaults, flags first
fn collect_draft(args: &DesignArgs, config: &Config) -> Result<RequestDraft> {
    let scale = args
        .scale
        .as_deref()
        .map(str::parse::<ScaleTier>)
        .transpose()?;

    let description = match (&args.description, &args.description_file) {
        (Some(text), _) => Some(text.clone()),
        (None, Some(path)) => Some(read_description(path)?),
        (None, None) => None,
    };

    let mut draft = RequestDraft {
        project_name: args.name.clone(),
        scale,
        description,
    };

    if let Some(path) = &args.request {
        draft = draft.or(storage::load_request(path)?);
    }

    Ok(draft.or(RequestDraft {
        scale: config.default_scale,
        ..RequestDraft::default()
    }))
}

fn read_description(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read description from stdin")?;
        return Ok(text);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read description: {}", path.display()))
}

/// Writes the diagram and report files requested on the command line
pub fn write_outputs(
    output: &Output,
    report: &Report,
    diagram_out: Option<&Path>,
    save: Option<&Path>,
) -> Result<()> {
    if let Some(path) = diagram_out {
        storage::write_file(path, &report.mermaid)?;
        output.verbose_ctx("output", &format!("Wrote diagram to {}", path.display()));
    }

    if let Some(path) = save {
        report.save(path)?;
        output.verbose_ctx("output", &format!("Saved report to {}", path.display()));
    }

    Ok(())
}
