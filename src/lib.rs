//! archsmith - deterministic cloud architecture synthesis
//!
//! Turns a project name, a scale tier and a free-text description into an
//! architecture: topology style, services, data stores, a cost estimate, a
//! risk score and a layered diagram rendered as Mermaid text. A rule-based
//! enhancement pass adds missing cross-cutting concerns to an existing
//! architecture.

pub mod cli;
pub mod domain;
pub mod plugin;
pub mod render;
pub mod storage;

pub use domain::{design, enhance, Architecture, ArchitectureModel, ArchitectureRequest, ScaleTier};
