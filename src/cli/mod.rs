//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `design` | Synthesize an architecture from name, scale and description |
//! | `classify` | Show the requirement flags found in a description |
//! | `enhance` | Apply the enhancement rules to a saved report |
//! | `diagram` | Re-render or validate the diagram of a saved report |
//! | `ideate` | Generate a concept brief with an external generator |
//! | `config` | Show, locate or initialize the configuration |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output and `archsmith=debug` logs:
//! ```bash
//! archsmith --verbose design --name Pulse --scale medium --description "..."
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod classify;
mod config_cmd;
mod design;
mod diagram_cmd;
mod enhance;
mod ideate;
mod output;
mod summary;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
