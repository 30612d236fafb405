//! Domain models for archsmith
//!
//! Contains the synthesis, diagram and enhancement logic without any I/O
//! concerns. Every operation here is a pure function of its input.

mod architect;
mod classifier;
mod compiler;
mod diagram;
mod enhance;
mod model;
mod request;
mod synthesis;

pub use architect::{design, requirements, Architecture};
pub use classifier::{classify, FeatureFlags};
pub use compiler::compile;
pub use diagram::{
    DiagramDocument, DiagramError, DiagramNode, DiagramStats, Edge, EdgeKind, Layer, LayerKind,
    NodeShape,
};
pub use enhance::{enhance, Enhanced, Enhancement, Enhancer, DEFAULT_SCORE_BONUS};
pub use model::{
    ArchitectureDraft, ArchitectureError, ArchitectureModel, ArchitectureStyle, CostBreakdown,
    RiskLevel, ServiceCategory, ServiceNode, ServiceRole,
};
pub use request::{ArchitectureRequest, RequestDraft, RequestError, ScaleTier};
pub use synthesis::{synthesize, TierTemplate, TIER_TEMPLATES};
