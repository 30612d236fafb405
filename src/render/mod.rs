//! Text projections of diagram documents

pub mod mermaid;

pub use mermaid::{render, Direction, MermaidRenderer};
