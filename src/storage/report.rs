//! Report and request files
//!
//! Reports are written as JSON, or YAML when the path ends in `.yaml` or
//! `.yml`. A report carries the model, its diagram document and the derived
//! Mermaid text. Reading accepts both nested (`model`) and flat layouts so
//! architecture files produced by other tools can be enhanced too.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Architecture, ArchitectureDraft, ArchitectureModel, DiagramDocument, Enhancement, RequestDraft,
};
use crate::render::MermaidRenderer;

/// Name used when a report file carries no project name
const UNNAMED_PROJECT: &str = "Untitled";

/// Serialization format chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            _ => FileFormat::Json,
        }
    }
}

/// Generates a 7-character content hash
pub fn fingerprint(text: &str) -> String {
    let hash = blake3::hash(text.as_bytes());
    let hex = hash.to_hex();
    hex[..7].to_string()
}

/// Serialized form of an architecture
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub project_name: String,
    pub total_cost: u32,
    pub model: ArchitectureModel,
    pub diagram: DiagramDocument,
    pub mermaid: String,
    pub fingerprint: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub enhancements: Vec<Enhancement>,
}

impl Report {
    pub fn new(
        architecture: &Architecture,
        renderer: &MermaidRenderer,
        enhancements: Vec<Enhancement>,
    ) -> Self {
        let mermaid = renderer.render(&architecture.diagram);
        Self {
            project_name: architecture.project_name.clone(),
            total_cost: architecture.model.total_cost(),
            model: architecture.model.clone(),
            diagram: architecture.diagram.clone(),
            fingerprint: fingerprint(&mermaid),
            mermaid,
            enhancements,
        }
    }

    /// Serializes in the given format
    pub fn to_text(&self, format: FileFormat) -> Result<String> {
        match format {
            FileFormat::Json => {
                serde_json::to_string_pretty(self).context("Failed to serialize report")
            }
            FileFormat::Yaml => serde_yaml::to_string(self).context("Failed to serialize report"),
        }
    }

    /// Writes the report, choosing the format from the extension
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_text(FileFormat::from_path(path))?;
        write_file(path, &content)
    }
}

/// Report fields as read back from disk
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReportDraft {
    #[serde(alias = "projectName")]
    project_name: Option<String>,

    model: Option<ArchitectureDraft>,

    diagram: Option<DiagramDocument>,

    #[serde(flatten)]
    inline: ArchitectureDraft,
}

/// Parses a report in the given format
///
/// The stored diagram is kept as is; a report without one gets a freshly
/// compiled diagram.
pub fn parse_report(content: &str, format: FileFormat) -> Result<Architecture> {
    let draft: ReportDraft = match format {
        FileFormat::Json => serde_json::from_str(content).context("Invalid JSON report")?,
        FileFormat::Yaml => serde_yaml::from_str(content).context("Invalid YAML report")?,
    };

    let project_name = draft
        .project_name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| UNNAMED_PROJECT.to_string());
    let model = ArchitectureModel::try_from(draft.model.unwrap_or(draft.inline))?;

    Ok(match draft.diagram {
        Some(diagram) => Architecture {
            project_name,
            model,
            diagram,
        },
        None => {
            tracing::debug!("report has no diagram, compiling from model");
            Architecture::from_model(project_name, model)
        }
    })
}

/// Reads a report file
pub fn load_report(path: &Path) -> Result<Architecture> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read report: {}", path.display()))?;
    parse_report(&content, FileFormat::from_path(path))
        .with_context(|| format!("Failed to load report: {}", path.display()))
}

/// Reads a request file with `projectName`, `scale` and `description`
pub fn load_request(path: &Path) -> Result<RequestDraft> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read request: {}", path.display()))?;
    let draft = match FileFormat::from_path(path) {
        FileFormat::Json => serde_json::from_str(&content).context("Invalid JSON request")?,
        FileFormat::Yaml => serde_yaml::from_str(&content).context("Invalid YAML request")?,
    };
    Ok(draft)
}

/// Writes text to a file, creating parent directories
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}
