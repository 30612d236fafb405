//! Architecture model
//!
//! The structured result of a synthesis: topology style, services, data
//! stores, scaling text, cost breakdown and a qualitative risk score.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ArchitectureError {
    #[error("Malformed architecture: missing {0}")]
    MalformedArchitecture(&'static str),
}

/// Overall topology shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchitectureStyle {
    #[serde(alias = "Modular Monolith")]
    Monolith,
    #[serde(alias = "Microservices")]
    Microservices,
}

impl ArchitectureStyle {
    pub fn display_name(&self) -> &'static str {
        match self {
            ArchitectureStyle::Monolith => "Modular Monolith",
            ArchitectureStyle::Microservices => "Microservices",
        }
    }
}

impl fmt::Display for ArchitectureStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Diagram lane a service is drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceCategory {
    #[default]
    Application,
    AiAnalytics,
    Observability,
}

/// What a service does in the topology, used to wire the diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceRole {
    #[default]
    Standard,
    /// The request entry point (API module or API gateway)
    Entry,
    RealtimeGateway,
    /// Rule evaluation and notification services, fed by events rather than the database
    Alerting,
    /// Streaming ingestion in front of the analytics services
    Pipeline,
    EdgeProtection,
}

/// A named service in the architecture
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceNode {
    /// Stable identifier, also used as the diagram node id
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: ServiceCategory,
    #[serde(default)]
    pub role: ServiceRole,
}

impl ServiceNode {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: ServiceCategory,
        role: ServiceRole,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            role,
        }
    }

    /// Positional identifier for the service at `index`
    pub fn positional_id(index: usize) -> String {
        format!("srv{}", index)
    }

    /// Recovers category and role from a bare service name
    ///
    /// Only used when importing architectures that list services as plain
    /// strings; synthesized services carry their tags from the start.
    pub fn infer(index: usize, name: &str) -> Self {
        let lower = name.to_lowercase();
        let has = |keys: &[&str]| keys.iter().any(|k| lower.contains(k));

        let (category, role) = if has(&["metrics", "log", "trace", "prometheus"]) {
            (ServiceCategory::Observability, ServiceRole::Standard)
        } else if has(&["pipeline", "kafka"]) {
            (ServiceCategory::AiAnalytics, ServiceRole::Pipeline)
        } else if has(&["ai", "analytics"]) {
            (ServiceCategory::AiAnalytics, ServiceRole::Standard)
        } else if name.contains("WAF") || has(&["rate limiter"]) {
            (ServiceCategory::Application, ServiceRole::EdgeProtection)
        } else if has(&["realtime", "websocket"]) {
            (ServiceCategory::Application, ServiceRole::RealtimeGateway)
        } else if has(&["alert", "notification"]) {
            (ServiceCategory::Application, ServiceRole::Alerting)
        } else if has(&["core api module", "api gateway"]) {
            (ServiceCategory::Application, ServiceRole::Entry)
        } else {
            (ServiceCategory::Application, ServiceRole::Standard)
        };

        let id = if role == ServiceRole::EdgeProtection {
            "waf".to_string()
        } else {
            Self::positional_id(index)
        };

        Self::new(id, name, category, role)
    }
}

/// Monthly cost estimate per category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub compute: u32,
    pub database: u32,
    pub network: u32,
}

impl CostBreakdown {
    pub const fn new(compute: u32, database: u32, network: u32) -> Self {
        Self {
            compute,
            database,
            network,
        }
    }

    pub fn total(&self) -> u32 {
        self.compute + self.database + self.network
    }

    /// Adds another breakdown field by field
    pub fn add(&mut self, other: CostBreakdown) {
        self.compute += other.compute;
        self.database += other.database;
        self.network += other.network;
    }
}

/// Qualitative operational risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    #[default]
    #[serde(alias = "Low")]
    Low,
    #[serde(alias = "Medium")]
    Medium,
    #[serde(alias = "High")]
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        })
    }
}

/// A synthesized cloud architecture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchitectureModel {
    pub style: ArchitectureStyle,
    pub services: Vec<ServiceNode>,
    pub database: String,
    /// Cache tier label, `None` when the architecture has no cache
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<String>,
    pub scaling_strategy: String,
    pub cost_breakdown: CostBreakdown,
    pub risk: RiskLevel,
    pub score: u8,
}

impl ArchitectureModel {
    /// Monthly total, always derived from the breakdown
    pub fn total_cost(&self) -> u32 {
        self.cost_breakdown.total()
    }

    /// First service with the given role
    pub fn service_with_role(&self, role: ServiceRole) -> Option<&ServiceNode> {
        self.services.iter().find(|s| s.role == role)
    }

    pub fn has_role(&self, role: ServiceRole) -> bool {
        self.service_with_role(role).is_some()
    }

    /// Services in the given diagram lane, in model order
    pub fn services_in(&self, category: ServiceCategory) -> impl Iterator<Item = &ServiceNode> {
        self.services.iter().filter(move |s| s.category == category)
    }

    /// Position at which new non-observability services are inserted
    ///
    /// Keeps the observability entry last.
    pub fn insertion_index(&self) -> usize {
        self.services
            .iter()
            .position(|s| s.category == ServiceCategory::Observability)
            .unwrap_or(self.services.len())
    }

    /// Display name of the cache tier, "None" when absent
    pub fn cache_label(&self) -> &str {
        self.cache.as_deref().unwrap_or("None")
    }
}

/// A service as written in an architecture file: a tagged node or a bare name
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ServiceEntry {
    Node(ServiceNode),
    Name(String),
}

/// Unvalidated architecture fields, as read from a report file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ArchitectureDraft {
    #[serde(alias = "architectureStyle")]
    pub style: Option<ArchitectureStyle>,
    pub services: Option<Vec<ServiceEntry>>,
    pub database: Option<String>,
    pub cache: Option<String>,
    #[serde(alias = "scalingStrategy")]
    pub scaling_strategy: Option<String>,
    #[serde(alias = "costBreakdown")]
    pub cost_breakdown: Option<CostBreakdown>,
    #[serde(alias = "riskLevel")]
    pub risk: Option<RiskLevel>,
    #[serde(alias = "architectureScore")]
    pub score: Option<u8>,
}

impl TryFrom<ArchitectureDraft> for ArchitectureModel {
    type Error = ArchitectureError;

    fn try_from(draft: ArchitectureDraft) -> Result<Self, Self::Error> {
        let style = draft
            .style
            .ok_or(ArchitectureError::MalformedArchitecture("architecture style"))?;
        let entries = draft
            .services
            .ok_or(ArchitectureError::MalformedArchitecture("services"))?;
        let database = draft
            .database
            .filter(|d| !d.trim().is_empty())
            .ok_or(ArchitectureError::MalformedArchitecture("database"))?;

        let services = entries
            .into_iter()
            .enumerate()
            .map(|(i, entry)| match entry {
                ServiceEntry::Node(node) => node,
                ServiceEntry::Name(name) => ServiceNode::infer(i, &name),
            })
            .collect();

        let cache = draft
            .cache
            .filter(|c| !c.trim().is_empty() && !c.eq_ignore_ascii_case("none"));

        Ok(Self {
            style,
            services,
            database,
            cache,
            scaling_strategy: draft.scaling_strategy.unwrap_or_default(),
            cost_breakdown: draft.cost_breakdown.unwrap_or_default(),
            risk: draft.risk.unwrap_or_default(),
            score: draft.score.unwrap_or(0).min(100),
        })
    }
}
