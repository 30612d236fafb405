//! Topology synthesis
//!
//! Maps a scale tier and feature flags to an architecture model. Each tier
//! is a row of [`TIER_TEMPLATES`]; flags only ever append services and add
//! cost on top of the row, applied in the order heavy data, realtime,
//! alerts. Every architecture ends with a single observability service.

use tracing::debug;

use super::classifier::FeatureFlags;
use super::model::{
    ArchitectureModel, ArchitectureStyle, CostBreakdown, RiskLevel, ServiceCategory, ServiceNode,
    ServiceRole,
};
use super::request::ScaleTier;

/// A service a template can contribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSpec {
    pub name: &'static str,
    pub category: ServiceCategory,
    pub role: ServiceRole,
}

impl ServiceSpec {
    const fn new(name: &'static str, category: ServiceCategory, role: ServiceRole) -> Self {
        Self {
            name,
            category,
            role,
        }
    }

    const fn app(name: &'static str) -> Self {
        Self::new(name, ServiceCategory::Application, ServiceRole::Standard)
    }

    const fn entry(name: &'static str) -> Self {
        Self::new(name, ServiceCategory::Application, ServiceRole::Entry)
    }

    const fn realtime(name: &'static str) -> Self {
        Self::new(name, ServiceCategory::Application, ServiceRole::RealtimeGateway)
    }

    const fn alerting(name: &'static str) -> Self {
        Self::new(name, ServiceCategory::Application, ServiceRole::Alerting)
    }

    fn to_node(self, index: usize) -> ServiceNode {
        ServiceNode::new(
            ServiceNode::positional_id(index),
            self.name,
            self.category,
            self.role,
        )
    }
}

/// Appended last to every architecture
pub const OBSERVABILITY_SERVICE: ServiceSpec = ServiceSpec::new(
    "Metrics & Logs (Prometheus/Grafana)",
    ServiceCategory::Observability,
    ServiceRole::Standard,
);

/// One row of the synthesis table
#[derive(Debug)]
pub struct TierTemplate {
    pub tier: ScaleTier,
    pub style: ArchitectureStyle,
    pub services: &'static [ServiceSpec],
    pub database: &'static str,
    pub cache: Option<&'static str>,
    pub scaling_strategy: &'static str,
    pub cost: CostBreakdown,
    pub risk: RiskLevel,
    pub score: u8,

    pub heavy_data_cost: CostBreakdown,
    pub heavy_data_services: &'static [ServiceSpec],

    pub realtime_gateway: ServiceSpec,
    /// Pub/sub capable cache variant; `None` keeps the base cache
    pub realtime_cache: Option<&'static str>,
    pub realtime_cost: CostBreakdown,

    pub alert_services: &'static [ServiceSpec],
}

pub static TIER_TEMPLATES: [TierTemplate; 3] = [
    TierTemplate {
        tier: ScaleTier::Small,
        style: ArchitectureStyle::Monolith,
        services: &[
            ServiceSpec::app("Web Server (Next.js)"),
            ServiceSpec::entry("Core API Module"),
        ],
        database: "PostgreSQL (Relational)",
        cache: None,
        scaling_strategy: "Vertical scaling of primary server. Basic load balancing.",
        cost: CostBreakdown::new(20, 10, 5),
        risk: RiskLevel::Low,
        score: 85,
        heavy_data_cost: CostBreakdown::new(0, 40, 0),
        heavy_data_services: &[],
        realtime_gateway: ServiceSpec::realtime("WebSocket Gateway"),
        realtime_cache: None,
        realtime_cost: CostBreakdown::new(10, 0, 10),
        alert_services: &[ServiceSpec::alerting("Basic Alert Cronjob")],
    },
    TierTemplate {
        tier: ScaleTier::Medium,
        style: ArchitectureStyle::Monolith,
        services: &[
            ServiceSpec::app("Web Server (Next.js)"),
            ServiceSpec::entry("Core API Module"),
            ServiceSpec::app("Background Worker"),
        ],
        database: "PostgreSQL (Primary) + Read Replica",
        cache: Some("Redis (Cache)"),
        scaling_strategy: "Horizontal scaling behind Load Balancer. Asynchronous task queues.",
        cost: CostBreakdown::new(80, 50, 20),
        risk: RiskLevel::Medium,
        score: 90,
        heavy_data_cost: CostBreakdown::new(0, 100, 0),
        heavy_data_services: &[],
        realtime_gateway: ServiceSpec::realtime("Realtime Gateway (SSE/WS)"),
        realtime_cache: Some("Redis (Cache + Pub/Sub)"),
        realtime_cost: CostBreakdown::new(30, 0, 50),
        alert_services: &[
            ServiceSpec::alerting("Alert Engine (Rule Processor)"),
            ServiceSpec::alerting("Notification Dispatcher"),
        ],
    },
    TierTemplate {
        tier: ScaleTier::Large,
        style: ArchitectureStyle::Microservices,
        services: &[
            ServiceSpec::entry("API Gateway"),
            ServiceSpec::app("Auth Service"),
            ServiceSpec::app("User Service"),
        ],
        database: "PostgreSQL (Cluster) + Document DB",
        cache: Some("Redis Cluster"),
        scaling_strategy: "Kubernetes auto-scaling. Domain-driven micro-databases with event sourcing architecture.",
        cost: CostBreakdown::new(300, 300, 200),
        risk: RiskLevel::High,
        score: 95,
        heavy_data_cost: CostBreakdown::new(100, 300, 0),
        heavy_data_services: &[
            ServiceSpec::new(
                "Data Pipeline (Kafka)",
                ServiceCategory::AiAnalytics,
                ServiceRole::Pipeline,
            ),
            ServiceSpec::new(
                "Analytics Engine",
                ServiceCategory::AiAnalytics,
                ServiceRole::Standard,
            ),
        ],
        realtime_gateway: ServiceSpec::realtime("Realtime Gateway (WS)"),
        realtime_cache: Some("Redis Cluster (Pub/Sub + Edge Caching)"),
        realtime_cost: CostBreakdown::new(50, 0, 150),
        alert_services: &[
            ServiceSpec::alerting("Alert Engine Microservice"),
            ServiceSpec::alerting("Notification Dispatcher"),
        ],
    },
];

impl TierTemplate {
    /// Looks up the template row for a tier
    pub fn for_tier(tier: ScaleTier) -> &'static TierTemplate {
        match tier {
            ScaleTier::Small => &TIER_TEMPLATES[0],
            ScaleTier::Medium => &TIER_TEMPLATES[1],
            ScaleTier::Large => &TIER_TEMPLATES[2],
        }
    }
}

/// Synthesizes the architecture for a tier and its feature flags
pub fn synthesize(scale: ScaleTier, flags: FeatureFlags) -> ArchitectureModel {
    let template = TierTemplate::for_tier(scale);
    debug!(tier = %scale, ?flags, "selected tier template");

    let mut specs: Vec<ServiceSpec> = template.services.to_vec();
    let mut cost = template.cost;
    let mut cache = template.cache;

    if flags.heavy_data {
        cost.add(template.heavy_data_cost);
        specs.extend_from_slice(template.heavy_data_services);
    }

    if flags.realtime {
        specs.push(template.realtime_gateway);
        if let Some(pubsub) = template.realtime_cache {
            cache = Some(pubsub);
        }
        cost.add(template.realtime_cost);
    }

    if flags.alerts {
        specs.extend_from_slice(template.alert_services);
    }

    specs.push(OBSERVABILITY_SERVICE);

    let services: Vec<ServiceNode> = specs
        .into_iter()
        .enumerate()
        .map(|(i, spec)| spec.to_node(i))
        .collect();

    debug!(
        services = services.len(),
        total_cost = cost.total(),
        "synthesized architecture"
    );

    ArchitectureModel {
        style: template.style,
        services,
        database: template.database.to_string(),
        cache: cache.map(str::to_string),
        scaling_strategy: template.scaling_strategy.to_string(),
        cost_breakdown: cost,
        risk: template.risk,
        score: template.score,
    }
}
