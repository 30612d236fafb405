//! Mermaid flowchart serialization
//!
//! Produces the text form of a [`DiagramDocument`]. Output follows document
//! order exactly, so equal documents render to identical text.

use std::fmt::{self, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{DiagramDocument, DiagramNode, Edge, EdgeKind, LayerKind, NodeShape};

const INDENT: &str = "  ";

/// Fill and font colors shared by every class
const FILL: &str = "#1e293b";
const TEXT: &str = "#f8fafc";

/// Class definitions in emission order, with their stroke colors
const CLASS_STROKES: [(LayerKind, &str); 5] = [
    (LayerKind::Client, "#3b82f6"),
    (LayerKind::Application, "#8b5cf6"),
    (LayerKind::Data, "#10b981"),
    (LayerKind::Observability, "#64748b"),
    (LayerKind::AiAnalytics, "#ec4899"),
];

/// Flowchart direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Top down
    #[default]
    TD,
    /// Left to right
    LR,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::TD => "TD",
            Direction::LR => "LR",
        })
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TD" | "TB" => Ok(Direction::TD),
            "LR" => Ok(Direction::LR),
            other => Err(format!("Unknown diagram direction: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Synchronous,
    Background,
    Monitoring,
}

impl Section {
    fn comment(&self) -> &'static str {
        match self {
            Section::Synchronous => "%% Synchronous flows",
            Section::Background => "%% Asynchronous & Background Processing",
            Section::Monitoring => "%% Monitoring & Metrics",
        }
    }
}

/// Renders diagram documents as Mermaid text
#[derive(Debug, Clone, Copy, Default)]
pub struct MermaidRenderer {
    direction: Direction,
}

impl MermaidRenderer {
    pub fn new(direction: Direction) -> Self {
        Self { direction }
    }

    /// Serializes a document
    pub fn render(&self, doc: &DiagramDocument) -> String {
        let mut out = String::new();
        // writing into a String cannot fail
        let _ = self.write(&mut out, doc);
        out
    }

    fn write(&self, out: &mut String, doc: &DiagramDocument) -> fmt::Result {
        writeln!(out, "graph {}", self.direction)?;
        writeln!(out)?;

        for (kind, stroke) in CLASS_STROKES {
            writeln!(
                out,
                "{INDENT}classDef {} fill:{FILL},stroke:{},stroke-width:2px,color:{TEXT}",
                kind.class(),
                stroke
            )?;
        }
        writeln!(out)?;

        for layer in &doc.layers {
            writeln!(
                out,
                "{INDENT}subgraph {} [\"{}\"]",
                layer.kind.id(),
                layer.kind.title()
            )?;
            for node in &layer.nodes {
                writeln!(out, "{INDENT}{INDENT}{}:::{}", node_shape(node), layer.kind.class())?;
            }
            writeln!(out, "{INDENT}end")?;
            writeln!(out)?;
        }

        let mut section = None;
        for edge in &doc.edges {
            let current = section_of(doc, edge);
            if section != Some(current) {
                writeln!(out, "{INDENT}{}", current.comment())?;
                section = Some(current);
            }
            writeln!(out, "{INDENT}{}", edge_line(edge))?;
        }

        Ok(())
    }
}

/// Renders with the default top-down direction
pub fn render(doc: &DiagramDocument) -> String {
    MermaidRenderer::default().render(doc)
}

fn escape(label: &str) -> String {
    label.replace('"', "#quot;")
}

fn node_shape(node: &DiagramNode) -> String {
    let label = escape(&node.label);
    match node.shape {
        NodeShape::Rectangle => format!("{}[\"{}\"]", node.id, label),
        NodeShape::Rounded => format!("{}{{\"{}\"}}", node.id, label),
        NodeShape::Cylinder => format!("{}[(\"{}\")]", node.id, label),
    }
}

fn edge_line(edge: &Edge) -> String {
    let arrow = if edge.kind.is_async() { "-.->" } else { "-->" };
    match &edge.label {
        Some(label) => format!("{} {} |{}| {}", edge.from, arrow, escape(label), edge.to),
        None => format!("{} {} {}", edge.from, arrow, edge.to),
    }
}

fn section_of(doc: &DiagramDocument, edge: &Edge) -> Section {
    let in_ai = |id: &str| doc.layer_of(id) == Some(LayerKind::AiAnalytics);
    if edge.kind == EdgeKind::Telemetry {
        Section::Monitoring
    } else if in_ai(&edge.from) || in_ai(&edge.to) {
        Section::Background
    } else {
        Section::Synchronous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{compile, synthesize, FeatureFlags, ScaleTier};

    #[test]
    fn node_shapes() {
        assert_eq!(node_shape(&DiagramNode::rect("lb", "Load Balancer")), "lb[\"Load Balancer\"]");
        assert_eq!(node_shape(&DiagramNode::rounded("gw", "API Gateway")), "gw{\"API Gateway\"}");
        assert_eq!(
            node_shape(&DiagramNode::cylinder("db", "PostgreSQL")),
            "db[(\"PostgreSQL\")]"
        );
    }

    #[test]
    fn quotes_are_escaped() {
        let node = DiagramNode::rect("srv0", "The \"Core\" API");
        assert_eq!(node_shape(&node), "srv0[\"The #quot;Core#quot; API\"]");
    }

    #[test]
    fn edge_arrows_follow_kind() {
        assert_eq!(edge_line(&Edge::sync("client", "lb")), "client --> lb");
        assert_eq!(
            edge_line(&Edge::new("ws", "api", EdgeKind::AsyncEvent).with_label("Async Events")),
            "ws -.-> |Async Events| api"
        );
        assert_eq!(
            edge_line(&Edge::new("srv0", "db", EdgeKind::AsyncEvent)),
            "srv0 -.-> db"
        );
    }

    #[test]
    fn direction_parses_case_insensitively() {
        assert_eq!("lr".parse::<Direction>(), Ok(Direction::LR));
        assert_eq!("TD".parse::<Direction>(), Ok(Direction::TD));
        assert!("diagonal".parse::<Direction>().is_err());
    }

    #[test]
    fn left_to_right_header() {
        let doc = compile(&synthesize(ScaleTier::Small, FeatureFlags::default()));
        let text = MermaidRenderer::new(Direction::LR).render(&doc);
        assert!(text.starts_with("graph LR\n\n"));
    }

    #[test]
    fn section_comments_appear_once_in_order() {
        let flags = FeatureFlags {
            heavy_data: true,
            ..Default::default()
        };
        let doc = compile(&synthesize(ScaleTier::Large, flags));
        let text = render(&doc);

        let sync = text.find("%% Synchronous flows").unwrap();
        let background = text.find("%% Asynchronous & Background Processing").unwrap();
        let monitoring = text.find("%% Monitoring & Metrics").unwrap();
        assert!(sync < background && background < monitoring);
        assert_eq!(text.matches("%% ").count(), 3);
        assert!(text.contains("  gw -.-> |Async Streams| srv3\n"));
        assert!(text.contains("  AI_Layer -.-> |Telemetry| srv5\n"));
    }

    #[test]
    fn no_background_section_without_analytics() {
        let doc = compile(&synthesize(ScaleTier::Medium, FeatureFlags::default()));
        assert!(!render(&doc).contains("Background Processing"));
    }
}
