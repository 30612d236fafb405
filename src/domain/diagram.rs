//! Diagram document
//!
//! Structured intermediate form of an architecture diagram: ordered layers
//! of nodes plus an ordered edge list. Rendering to text is a pure
//! projection of this document (see [`crate::render`]), and enhancement
//! patches it structurally instead of splicing text.
//!
//! Edge endpoints are node ids or layer ids. Layer endpoints express
//! aggregate relations such as telemetry flowing from a whole layer.

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DiagramError {
    #[error("Duplicate diagram node id: {0}")]
    DuplicateNode(String),

    #[error("Edge {from} -> {to} references unknown node: {missing}")]
    UnknownEndpoint {
        from: String,
        to: String,
        missing: String,
    },
}

pub const CLIENT_NODE: &str = "client";
pub const EDGE_NODE: &str = "waf";
pub const LOAD_BALANCER_NODE: &str = "lb";
pub const MONOLITH_ENTRY_NODE: &str = "api";
pub const GATEWAY_ENTRY_NODE: &str = "gw";
pub const MONOLITH_REALTIME_NODE: &str = "ws";
pub const GATEWAY_REALTIME_NODE: &str = "rtgw";
pub const DATABASE_NODE: &str = "db";
pub const CACHE_NODE: &str = "cache";

/// The fixed layers of an architecture diagram, in drawing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayerKind {
    Client,
    Application,
    AiAnalytics,
    Data,
    Observability,
}

impl LayerKind {
    /// Subgraph id, usable as an edge endpoint
    pub fn id(&self) -> &'static str {
        match self {
            LayerKind::Client => "Client_Layer",
            LayerKind::Application => "App_Layer",
            LayerKind::AiAnalytics => "AI_Layer",
            LayerKind::Data => "Data_Layer",
            LayerKind::Observability => "Obs_Layer",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            LayerKind::Client => "📱 Client Layer",
            LayerKind::Application => "⚡ Application Layer",
            LayerKind::AiAnalytics => "🧠 AI & Analytics Layer",
            LayerKind::Data => "💾 Data Layer",
            LayerKind::Observability => "📊 Observability Layer",
        }
    }

    /// Style class applied to every node of the layer
    pub fn class(&self) -> &'static str {
        match self {
            LayerKind::Client => "client",
            LayerKind::Application => "app",
            LayerKind::AiAnalytics => "ai",
            LayerKind::Data => "data",
            LayerKind::Observability => "obs",
        }
    }
}

/// Outline of a diagram node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NodeShape {
    #[default]
    Rectangle,
    /// Decision-style outline used for gateways and caches
    Rounded,
    /// Data stores
    Cylinder,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiagramNode {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub shape: NodeShape,
}

impl DiagramNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>, shape: NodeShape) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            shape,
        }
    }

    pub fn rect(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, NodeShape::Rectangle)
    }

    pub fn rounded(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, NodeShape::Rounded)
    }

    pub fn cylinder(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, NodeShape::Cylinder)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    pub kind: LayerKind,
    pub nodes: Vec<DiagramNode>,
}

impl Layer {
    pub fn new(kind: LayerKind) -> Self {
        Self {
            kind,
            nodes: Vec::new(),
        }
    }

    pub fn push(&mut self, node: DiagramNode) {
        self.nodes.push(node);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }
}

/// Relation carried by an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    /// Synchronous request path (solid line)
    SyncCall,
    AsyncEvent,
    PubSub,
    /// Aggregate logs, metrics and health checks
    Telemetry,
}

impl EdgeKind {
    pub fn is_async(&self) -> bool {
        !matches!(self, EdgeKind::SyncCall)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub kind: EdgeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, kind: EdgeKind) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind,
            label: None,
        }
    }

    pub fn sync(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::new(from, to, EdgeKind::SyncCall)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Counts gathered while validating a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiagramStats {
    pub layers: usize,
    pub nodes: usize,
    pub edges: usize,
    pub has_cycles: bool,
}

/// Layered directed graph describing an architecture
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramDocument {
    pub layers: Vec<Layer>,
    pub edges: Vec<Edge>,
}

impl DiagramDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layer(&self, kind: LayerKind) -> Option<&Layer> {
        self.layers.iter().find(|l| l.kind == kind)
    }

    /// Returns the layer, creating it at its canonical position if missing
    pub fn ensure_layer(&mut self, kind: LayerKind) -> &mut Layer {
        let index = match self.layers.iter().position(|l| l.kind == kind) {
            Some(i) => i,
            None => {
                let at = self
                    .layers
                    .iter()
                    .position(|l| l.kind > kind)
                    .unwrap_or(self.layers.len());
                self.layers.insert(at, Layer::new(kind));
                at
            }
        };
        &mut self.layers[index]
    }

    /// All nodes in layer order
    pub fn nodes(&self) -> impl Iterator<Item = &DiagramNode> {
        self.layers.iter().flat_map(|l| l.nodes.iter())
    }

    pub fn node(&self, id: &str) -> Option<&DiagramNode> {
        self.nodes().find(|n| n.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    /// Layer holding the node with the given id
    pub fn layer_of(&self, id: &str) -> Option<LayerKind> {
        self.layers.iter().find(|l| l.contains(id)).map(|l| l.kind)
    }

    /// The node requests enter the application through
    pub fn entry_node(&self) -> Option<&str> {
        [MONOLITH_ENTRY_NODE, GATEWAY_ENTRY_NODE]
            .into_iter()
            .find(|id| self.contains_node(id))
    }

    /// Replaces every node label equal to `old` and returns how many changed
    pub fn relabel(&mut self, old: &str, new: &str) -> usize {
        let mut changed = 0;
        for node in self.layers.iter_mut().flat_map(|l| l.nodes.iter_mut()) {
            if node.label == old {
                node.label = new.to_string();
                changed += 1;
            }
        }
        changed
    }

    pub fn edge_index(&self, from: &str, to: &str) -> Option<usize> {
        self.edges.iter().position(|e| e.from == from && e.to == to)
    }

    pub fn push_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Inserts an edge at `index`, appending when out of range
    pub fn insert_edge(&mut self, index: usize, edge: Edge) {
        let index = index.min(self.edges.len());
        self.edges.insert(index, edge);
    }

    /// Checks that node ids are unique and every edge endpoint exists
    pub fn validate(&self) -> Result<DiagramStats, DiagramError> {
        let mut graph: DiGraph<&str, EdgeKind> = DiGraph::new();
        let mut index: HashMap<&str, NodeIndex> = HashMap::new();

        for layer in &self.layers {
            let idx = graph.add_node(layer.kind.id());
            index.insert(layer.kind.id(), idx);
        }

        for node in self.nodes() {
            if index.contains_key(node.id.as_str()) {
                return Err(DiagramError::DuplicateNode(node.id.clone()));
            }
            let idx = graph.add_node(node.id.as_str());
            index.insert(node.id.as_str(), idx);
        }

        for edge in &self.edges {
            let lookup = |id: &str| {
                index
                    .get(id)
                    .copied()
                    .ok_or_else(|| DiagramError::UnknownEndpoint {
                        from: edge.from.clone(),
                        to: edge.to.clone(),
                        missing: id.to_string(),
                    })
            };
            let from = lookup(&edge.from)?;
            let to = lookup(&edge.to)?;
            graph.add_edge(from, to, edge.kind);
        }

        Ok(DiagramStats {
            layers: self.layers.len(),
            nodes: graph.node_count() - self.layers.len(),
            edges: graph.edge_count(),
            has_cycles: is_cyclic_directed(&graph),
        })
    }
}
