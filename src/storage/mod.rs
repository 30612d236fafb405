//! # Storage Layer
//!
//! File input and output for archsmith. Nothing is persisted implicitly;
//! every file is read or written because a command was pointed at it.
//!
//! ## Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Config | TOML | `~/.config/archsmith/config.toml` |
//! | Request | JSON or YAML (by extension) | `--request <file>` |
//! | Report | JSON or YAML (by extension) | `--save <file>` |
//! | Diagram | Mermaid text | `--diagram-out <file>` |
//!
//! ## Key Types
//!
//! - [`Config`] - User configuration
//! - [`Report`] - Serialized architecture with derived Mermaid text

mod config;
mod report;

pub use config::{
    Config, ConfigError, DiagramConfig, EnhanceConfig, IdeationConfig, OutputFormat,
    RequestConfig, CONFIG_ENV,
};
pub use report::{
    fingerprint, load_report, load_request, parse_report, write_file, FileFormat, Report,
};
