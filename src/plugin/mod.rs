//! # Plugin System
//!
//! External text generation for project concept briefs.
//!
//! ## Overview
//!
//! Generators are separate executables that communicate with archsmith via
//! JSON lines over stdin/stdout, so they can be written in any language and
//! wrap any text-generation service.
//!
//! ## Discovery
//!
//! | Source | Pattern |
//! |--------|---------|
//! | `$PATH` | `archsmith-ideate-{name}` |
//! | Config | `[ideation] command = "..."` |
//!
//! ## Protocol
//!
//! ```text
//! CLI                               Generator
//!  │                                    │
//!  ├── Spawn: archsmith-ideate-gemini   │
//!  │                                    │
//!  ├── Stdin: {"operation": "ideate", "params": {"system_instruction": ..., "prompt": ...}}
//!  │                                    │
//!  └── Stdout: {"success": true, "data": {"text": "..."}}   (one or more lines)
//! ```
//!
//! Text chunks from every response line are concatenated in order.
//!
//! ## Key Types
//!
//! - [`PluginLoader`] - Discovers and executes generators
//! - [`Ideation`] - Builds prompts and assembles the generated brief
//! - [`GenerationError`] - Why a generation failed

mod ideation;
mod loader;
mod protocol;

pub use ideation::{
    build_prompt, GenerationError, Ideation, DEFAULT_SYSTEM_INSTRUCTION, RANDOM_IDEA_PROMPT,
};
pub use loader::{PluginInfo, PluginLoader, GENERATOR_PREFIX};
pub use protocol::{IdeateParams, PluginRequest, PluginResponse, IDEATE_OPERATION};
