//! Design facade
//!
//! Runs classification, synthesis and diagram compilation for a request.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::classifier::{classify, FeatureFlags};
use super::compiler::compile;
use super::diagram::DiagramDocument;
use super::enhance::{Enhancement, Enhancer};
use super::model::ArchitectureModel;
use super::request::ArchitectureRequest;
use super::synthesis::synthesize;

/// A named architecture with its diagram
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Architecture {
    pub project_name: String,
    pub model: ArchitectureModel,
    pub diagram: DiagramDocument,
}

impl Architecture {
    /// Pairs a model with its freshly compiled diagram
    pub fn from_model(project_name: impl Into<String>, model: ArchitectureModel) -> Self {
        let diagram = compile(&model);
        Self {
            project_name: project_name.into(),
            model,
            diagram,
        }
    }

    /// Enhanced copy of this architecture and the changes that were applied
    pub fn enhanced(&self, enhancer: &Enhancer) -> (Architecture, Vec<Enhancement>) {
        let result = enhancer.enhance(&self.model, &self.diagram);
        let architecture = Architecture {
            project_name: self.project_name.clone(),
            model: result.model,
            diagram: result.diagram,
        };
        (architecture, result.changes)
    }
}

/// Classifies the description of a request
pub fn requirements(request: &ArchitectureRequest) -> FeatureFlags {
    let flags = classify(request.description());
    debug!(?flags, "classified requirements");
    flags
}

/// Designs the architecture for a validated request
pub fn design(request: &ArchitectureRequest) -> Architecture {
    let flags = requirements(request);
    let model = synthesize(request.scale(), flags);
    Architecture::from_model(request.project_name(), model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::request::ScaleTier;

    #[test]
    fn design_small_todo_app() {
        let request = ArchitectureRequest::new(
            "TodoApp",
            ScaleTier::Small,
            "A simple todo list application for personal use",
        )
        .unwrap();
        let architecture = design(&request);

        assert_eq!(architecture.project_name, "TodoApp");
        assert_eq!(architecture.model.total_cost(), 35);
        assert!(architecture.diagram.validate().is_ok());
    }

    #[test]
    fn design_is_deterministic() {
        let request = ArchitectureRequest::new(
            "Pulse",
            ScaleTier::Medium,
            "Realtime chat with alerts for support teams",
        )
        .unwrap();
        assert_eq!(design(&request), design(&request));
    }

    #[test]
    fn enhanced_keeps_name_and_leaves_original() {
        let request = ArchitectureRequest::new(
            "TodoApp",
            ScaleTier::Small,
            "A simple todo list application for personal use",
        )
        .unwrap();
        let original = design(&request);
        let (enhanced, changes) = original.enhanced(&Enhancer::default());

        assert_eq!(enhanced.project_name, "TodoApp");
        assert_eq!(changes.len(), 4);
        assert_eq!(original.model.score, 85);
        assert_eq!(enhanced.model.score, 90);
    }
}
