//! Enhancement engine
//!
//! Applies a fixed sequence of improvement rules to an architecture and its
//! diagram. Each rule checks its own precondition and is skipped when the
//! improvement is already present, so enhancing an enhanced architecture
//! changes nothing. Inputs are borrowed and a new pair is returned.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::diagram::{
    DiagramDocument, DiagramNode, Edge, EdgeKind, LayerKind, CACHE_NODE, CLIENT_NODE, DATABASE_NODE,
    EDGE_NODE, LOAD_BALANCER_NODE,
};
use super::model::{ArchitectureModel, ArchitectureStyle, ServiceCategory, ServiceNode, ServiceRole};

pub const DEFAULT_SCORE_BONUS: u8 = 5;

const EDGE_PROTECTION_SERVICE: &str = "WAF & Rate Limiter (Cloudflare)";
const MINIMAL_CACHE: &str = "Redis (Cache)";
const CLUSTER_CACHE: &str = "Redis Cluster (Distributed)";
const SESSION_CACHE: &str = "Redis (Cache + Session Store)";
const MULTI_ZONE_MARKER: &str = "Multi-AZ";
const MULTI_ZONE_CLAUSE: &str = " across Multi-AZ zones for high availability.";
const SINGLE_DATABASE: &str = "PostgreSQL (Relational)";
const REPLICATED_DATABASE: &str = "PostgreSQL (Primary) + Read Replica";

/// One applied improvement and why it was made
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enhancement {
    pub description: String,
    pub rationale: String,
}

impl Enhancement {
    fn new(description: impl Into<String>, rationale: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            rationale: rationale.into(),
        }
    }
}

/// Result of an enhancement pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enhanced {
    pub model: ArchitectureModel,
    pub diagram: DiagramDocument,
    /// Applied changes in rule order
    pub changes: Vec<Enhancement>,
}

impl Enhanced {
    pub fn is_unchanged(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Rule-driven enhancement with a configurable score bonus
#[derive(Debug, Clone, Copy)]
pub struct Enhancer {
    score_bonus: u8,
}

impl Default for Enhancer {
    fn default() -> Self {
        Self {
            score_bonus: DEFAULT_SCORE_BONUS,
        }
    }
}

impl Enhancer {
    pub fn new(score_bonus: u8) -> Self {
        Self { score_bonus }
    }

    /// Runs every rule in order over a copy of the pair
    pub fn enhance(&self, model: &ArchitectureModel, diagram: &DiagramDocument) -> Enhanced {
        let mut model = model.clone();
        let mut diagram = diagram.clone();

        let rules: [(&str, Rule); 4] = [
            ("edge-protection", add_edge_protection),
            ("cache-tier", upgrade_cache),
            ("multi-zone", add_multi_zone),
            ("read-replica", attach_read_replica),
        ];

        let mut changes = Vec::new();
        for (name, rule) in rules {
            match rule(&mut model, &mut diagram) {
                Some(change) => {
                    debug!(rule = name, change = %change.description, "applied enhancement");
                    changes.push(change);
                }
                None => debug!(rule = name, "enhancement already satisfied"),
            }
        }

        if !changes.is_empty() {
            model.score = model.score.saturating_add(self.score_bonus).min(100);
        }

        Enhanced {
            model,
            diagram,
            changes,
        }
    }
}

/// Enhances with the default score bonus
pub fn enhance(model: &ArchitectureModel, diagram: &DiagramDocument) -> Enhanced {
    Enhancer::default().enhance(model, diagram)
}

type Rule = fn(&mut ArchitectureModel, &mut DiagramDocument) -> Option<Enhancement>;

fn add_edge_protection(
    model: &mut ArchitectureModel,
    diagram: &mut DiagramDocument,
) -> Option<Enhancement> {
    let protected = model
        .services
        .iter()
        .any(|s| s.role == ServiceRole::EdgeProtection || s.name.contains("WAF"))
        || diagram.contains_node(EDGE_NODE);
    if protected {
        return None;
    }

    let at = model.insertion_index();
    model.services.insert(
        at,
        ServiceNode::new(
            EDGE_NODE,
            EDGE_PROTECTION_SERVICE,
            ServiceCategory::Application,
            ServiceRole::EdgeProtection,
        ),
    );

    diagram
        .ensure_layer(LayerKind::Application)
        .nodes
        .insert(0, DiagramNode::rect(EDGE_NODE, EDGE_PROTECTION_SERVICE));

    match diagram.edge_index(CLIENT_NODE, LOAD_BALANCER_NODE) {
        Some(i) => {
            diagram.edges[i].to = EDGE_NODE.to_string();
            diagram.insert_edge(i + 1, Edge::sync(EDGE_NODE, LOAD_BALANCER_NODE));
        }
        None => {
            let mut at = 0;
            if diagram.contains_node(CLIENT_NODE) {
                diagram.insert_edge(at, Edge::sync(CLIENT_NODE, EDGE_NODE));
                at += 1;
            }
            if diagram.contains_node(LOAD_BALANCER_NODE) {
                diagram.insert_edge(at, Edge::sync(EDGE_NODE, LOAD_BALANCER_NODE));
            }
        }
    }

    Some(Enhancement::new(
        "Added Web Application Firewall (WAF) & Rate Limiting",
        "Current architecture exposes the load balancer directly. A WAF prevents DDoS and scraping.",
    ))
}

fn upgrade_cache(model: &mut ArchitectureModel, diagram: &mut DiagramDocument) -> Option<Enhancement> {
    let old = model.cache.clone();
    if old.as_deref().is_some_and(|c| c != MINIMAL_CACHE) {
        return None;
    }

    let new = match model.style {
        ArchitectureStyle::Microservices => CLUSTER_CACHE,
        ArchitectureStyle::Monolith => SESSION_CACHE,
    };
    model.cache = Some(new.to_string());

    match old {
        Some(old) => {
            diagram.relabel(&old, new);
        }
        None if !diagram.contains_node(CACHE_NODE) => {
            diagram
                .ensure_layer(LayerKind::Data)
                .push(DiagramNode::rounded(CACHE_NODE, new));
            if let Some(entry) = diagram.entry_node().map(str::to_string) {
                // next to the entry's database edge, else ahead of telemetry
                let at = diagram
                    .edge_index(&entry, DATABASE_NODE)
                    .map(|i| i + 1)
                    .or_else(|| diagram.edges.iter().position(|e| e.kind == EdgeKind::Telemetry))
                    .unwrap_or(diagram.edges.len());
                diagram.insert_edge(at, Edge::sync(entry, CACHE_NODE));
            }
        }
        None => {
            if let Some(node) = diagram
                .layers
                .iter_mut()
                .flat_map(|l| l.nodes.iter_mut())
                .find(|n| n.id == CACHE_NODE)
            {
                node.label = new.to_string();
            }
        }
    }

    Some(Enhancement::new(
        format!("Upgraded Cache to {}", new),
        "Standard memory caching was insufficient or missing. A dedicated Redis tier accelerates read-heavy routes.",
    ))
}

fn add_multi_zone(model: &mut ArchitectureModel, _diagram: &mut DiagramDocument) -> Option<Enhancement> {
    if model.scaling_strategy.contains(MULTI_ZONE_MARKER) {
        return None;
    }

    model.scaling_strategy = if model.scaling_strategy.contains('.') {
        model.scaling_strategy.replacen('.', MULTI_ZONE_CLAUSE, 1)
    } else {
        format!("{}{}", model.scaling_strategy.trim_end(), MULTI_ZONE_CLAUSE)
    };

    Some(Enhancement::new(
        "Enabled Multi-AZ Deployment in Scaling Strategy",
        "Current topology lacked redundancy. Spreading instances across availability zones ensures fault tolerance.",
    ))
}

fn attach_read_replica(
    model: &mut ArchitectureModel,
    diagram: &mut DiagramDocument,
) -> Option<Enhancement> {
    if model.database != SINGLE_DATABASE {
        return None;
    }

    model.database = REPLICATED_DATABASE.to_string();
    diagram.relabel(SINGLE_DATABASE, REPLICATED_DATABASE);

    Some(Enhancement::new(
        "Attached Read Replica to Primary Database",
        "A single database instance creates a heavy I/O bottleneck. Separating read queries improves throughput.",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::classifier::{classify, FeatureFlags};
    use crate::domain::compiler::compile;
    use crate::domain::request::ScaleTier;
    use crate::domain::synthesis::synthesize;
    use proptest::prelude::*;

    fn pair(tier: ScaleTier, description: &str) -> (ArchitectureModel, DiagramDocument) {
        let model = synthesize(tier, classify(description));
        let diagram = compile(&model);
        (model, diagram)
    }

    fn descriptions(enhanced: &Enhanced) -> Vec<&str> {
        enhanced.changes.iter().map(|c| c.description.as_str()).collect()
    }

    #[test]
    fn small_architecture_gets_every_rule() {
        let (model, diagram) = pair(ScaleTier::Small, "a simple todo app");
        let enhanced = enhance(&model, &diagram);

        assert_eq!(
            descriptions(&enhanced),
            vec![
                "Added Web Application Firewall (WAF) & Rate Limiting",
                "Upgraded Cache to Redis (Cache + Session Store)",
                "Enabled Multi-AZ Deployment in Scaling Strategy",
                "Attached Read Replica to Primary Database",
            ]
        );
        assert_eq!(enhanced.model.score, 90);
        assert_eq!(enhanced.model.database, REPLICATED_DATABASE);
        assert_eq!(enhanced.model.cache.as_deref(), Some(SESSION_CACHE));
        assert_eq!(
            enhanced.model.scaling_strategy,
            "Vertical scaling of primary server across Multi-AZ zones for high availability. Basic load balancing."
        );
        // cost is left alone
        assert_eq!(enhanced.model.cost_breakdown, model.cost_breakdown);
        // input pair is untouched
        assert_eq!(model.cache, None);
        assert!(!diagram.contains_node(EDGE_NODE));
    }

    #[test]
    fn edge_protection_rewires_client_edge() {
        let (model, diagram) = pair(ScaleTier::Small, "a simple todo app");
        let enhanced = enhance(&model, &diagram);
        let doc = &enhanced.diagram;

        assert_eq!(doc.edges[0], Edge::sync(CLIENT_NODE, EDGE_NODE));
        assert_eq!(doc.edges[1], Edge::sync(EDGE_NODE, LOAD_BALANCER_NODE));
        assert!(doc.edge_index(CLIENT_NODE, LOAD_BALANCER_NODE).is_none());
        assert_eq!(doc.layer_of(EDGE_NODE), Some(LayerKind::Application));

        // WAF goes before the observability entry, which stays last and unique
        let services = &enhanced.model.services;
        assert_eq!(services[services.len() - 2].id, EDGE_NODE);
        assert_eq!(
            services.last().map(|s| s.category),
            Some(ServiceCategory::Observability)
        );
        assert_eq!(
            services
                .iter()
                .filter(|s| s.category == ServiceCategory::Observability)
                .count(),
            1
        );
    }

    #[test]
    fn edge_protection_without_client_node() {
        let (model, mut diagram) = pair(ScaleTier::Small, "a simple todo app");
        diagram.layers.retain(|l| l.kind != LayerKind::Client);
        diagram.edges.retain(|e| e.from != CLIENT_NODE);

        let enhanced = enhance(&model, &diagram);
        let doc = &enhanced.diagram;

        assert!(doc.edges.iter().all(|e| e.from != CLIENT_NODE));
        assert_eq!(doc.edges[0], Edge::sync(EDGE_NODE, LOAD_BALANCER_NODE));
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn missing_cache_is_added_to_diagram() {
        let (model, diagram) = pair(ScaleTier::Small, "a simple todo app");
        let enhanced = enhance(&model, &diagram);
        let doc = &enhanced.diagram;

        assert_eq!(
            doc.node(CACHE_NODE).map(|n| n.label.as_str()),
            Some(SESSION_CACHE)
        );
        assert_eq!(doc.layer_of(CACHE_NODE), Some(LayerKind::Data));
        let db_edge = doc.edge_index("api", DATABASE_NODE).unwrap();
        assert_eq!(doc.edge_index("api", CACHE_NODE), Some(db_edge + 1));
        assert_eq!(
            doc.node(DATABASE_NODE).map(|n| n.label.as_str()),
            Some(REPLICATED_DATABASE)
        );
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn minimal_cache_is_relabelled() {
        let (model, diagram) = pair(ScaleTier::Medium, "internal crm");
        assert_eq!(model.cache.as_deref(), Some(MINIMAL_CACHE));

        let enhanced = enhance(&model, &diagram);
        assert_eq!(enhanced.model.cache.as_deref(), Some(SESSION_CACHE));
        assert_eq!(
            enhanced.diagram.node(CACHE_NODE).map(|n| n.label.as_str()),
            Some(SESSION_CACHE)
        );
        // medium already has a replica
        assert!(!descriptions(&enhanced).contains(&"Attached Read Replica to Primary Database"));
    }

    #[test]
    fn pubsub_and_cluster_caches_are_kept() {
        let (model, diagram) = pair(ScaleTier::Medium, "realtime chat");
        let enhanced = enhance(&model, &diagram);
        assert_eq!(enhanced.model.cache.as_deref(), Some("Redis (Cache + Pub/Sub)"));

        let (model, diagram) = pair(ScaleTier::Large, "marketplace");
        let enhanced = enhance(&model, &diagram);
        assert_eq!(enhanced.model.cache.as_deref(), Some("Redis Cluster"));
    }

    #[test]
    fn microservices_without_cache_gets_cluster() {
        let (mut model, _) = pair(ScaleTier::Large, "marketplace");
        model.cache = None;
        let diagram = compile(&model);

        let enhanced = enhance(&model, &diagram);
        assert_eq!(enhanced.model.cache.as_deref(), Some(CLUSTER_CACHE));
        let doc = &enhanced.diagram;
        let cache_edge = doc.edge_index("gw", CACHE_NODE).unwrap();
        assert_eq!(doc.edges[cache_edge + 1].kind, EdgeKind::Telemetry);
    }

    #[test]
    fn protected_architecture_with_replica() {
        let (mut model, _) = pair(ScaleTier::Medium, "internal crm");
        let at = model.insertion_index();
        model
            .services
            .insert(at, ServiceNode::infer(at, EDGE_PROTECTION_SERVICE));
        let diagram = compile(&model);
        assert!(diagram.contains_node(EDGE_NODE));

        let enhanced = enhance(&model, &diagram);
        assert_eq!(
            descriptions(&enhanced),
            vec![
                "Upgraded Cache to Redis (Cache + Session Store)",
                "Enabled Multi-AZ Deployment in Scaling Strategy",
            ]
        );
        assert_eq!(enhanced.model.score, 95);
    }

    #[test]
    fn multi_zone_without_period() {
        let (mut model, diagram) = pair(ScaleTier::Small, "todo");
        model.scaling_strategy = "Single VM".into();
        let enhanced = enhance(&model, &diagram);
        assert_eq!(
            enhanced.model.scaling_strategy,
            "Single VM across Multi-AZ zones for high availability."
        );
    }

    #[test]
    fn score_bonus_is_capped() {
        let (mut model, diagram) = pair(ScaleTier::Large, "marketplace");
        model.score = 98;
        let enhanced = Enhancer::new(5).enhance(&model, &diagram);
        assert_eq!(enhanced.model.score, 100);

        let enhanced = Enhancer::new(0).enhance(&model, &diagram);
        assert_eq!(enhanced.model.score, 98);
    }

    #[test]
    fn second_pass_changes_nothing() {
        let (model, diagram) = pair(ScaleTier::Small, "live video alerts");
        let first = enhance(&model, &diagram);
        let second = enhance(&first.model, &first.diagram);

        assert!(second.is_unchanged());
        assert_eq!(second.model, first.model);
        assert_eq!(second.diagram, first.diagram);
    }

    fn any_tier() -> impl Strategy<Value = ScaleTier> {
        prop_oneof![
            Just(ScaleTier::Small),
            Just(ScaleTier::Medium),
            Just(ScaleTier::Large)
        ]
    }

    proptest! {
        #[test]
        fn enhancement_is_idempotent(tier in any_tier(), r in any::<bool>(), h in any::<bool>(), a in any::<bool>()) {
            let model = synthesize(tier, FeatureFlags { realtime: r, heavy_data: h, alerts: a });
            let diagram = compile(&model);

            let first = enhance(&model, &diagram);
            prop_assert!(first.diagram.validate().is_ok());
            prop_assert_eq!(first.model.total_cost(), model.total_cost());

            let second = enhance(&first.model, &first.diagram);
            prop_assert!(second.changes.is_empty());
            prop_assert_eq!(&second.model, &first.model);
            prop_assert_eq!(&second.diagram, &first.diagram);
        }
    }
}
