//! Diagram compiler
//!
//! Turns an [`ArchitectureModel`] into a [`DiagramDocument`]. Services are
//! placed in lanes by their category and wired by their role; display names
//! are never inspected. Nodes and edges are emitted in a fixed order so the
//! same model always yields the same document.

use tracing::debug;

use super::diagram::{
    DiagramDocument, DiagramNode, Edge, EdgeKind, Layer, LayerKind, CACHE_NODE, CLIENT_NODE,
    DATABASE_NODE, EDGE_NODE, GATEWAY_ENTRY_NODE, GATEWAY_REALTIME_NODE, LOAD_BALANCER_NODE,
    MONOLITH_ENTRY_NODE, MONOLITH_REALTIME_NODE,
};
use super::model::{ArchitectureModel, ArchitectureStyle, ServiceCategory, ServiceNode, ServiceRole};

const CLIENT_LABEL: &str = "Client Application";
const LOAD_BALANCER_LABEL: &str = "Load Balancer";
const REALTIME_LABEL: &str = "Realtime Gateway";
const DEFAULT_MONOLITH_ENTRY: &str = "Core API Module";
const DEFAULT_GATEWAY_ENTRY: &str = "API Gateway";

/// Compiles a model into its layered diagram
pub fn compile(model: &ArchitectureModel) -> DiagramDocument {
    let monolith = model.style == ArchitectureStyle::Monolith;
    let (entry, realtime) = if monolith {
        (MONOLITH_ENTRY_NODE, MONOLITH_REALTIME_NODE)
    } else {
        (GATEWAY_ENTRY_NODE, GATEWAY_REALTIME_NODE)
    };
    let has_realtime = model.has_role(ServiceRole::RealtimeGateway);
    let edge_protection = model.service_with_role(ServiceRole::EdgeProtection);

    // Lanes
    let app_services: Vec<&ServiceNode> = model
        .services_in(ServiceCategory::Application)
        .filter(|s| {
            !matches!(
                s.role,
                ServiceRole::Entry | ServiceRole::RealtimeGateway | ServiceRole::EdgeProtection
            )
        })
        .collect();
    let ai_services: Vec<&ServiceNode> = model.services_in(ServiceCategory::AiAnalytics).collect();
    let obs_services: Vec<&ServiceNode> =
        model.services_in(ServiceCategory::Observability).collect();

    let mut doc = DiagramDocument::new();

    // Client layer
    let mut client = Layer::new(LayerKind::Client);
    client.push(DiagramNode::rect(CLIENT_NODE, CLIENT_LABEL));
    doc.layers.push(client);

    // Application layer
    let mut app = Layer::new(LayerKind::Application);
    if let Some(waf) = edge_protection {
        app.push(DiagramNode::rect(EDGE_NODE, waf.name.as_str()));
    }
    app.push(DiagramNode::rect(LOAD_BALANCER_NODE, LOAD_BALANCER_LABEL));
    let entry_service = model.service_with_role(ServiceRole::Entry);
    if monolith {
        let label = entry_service.map_or(DEFAULT_MONOLITH_ENTRY, |s| s.name.as_str());
        app.push(DiagramNode::rect(entry, label));
    } else {
        let label = entry_service.map_or(DEFAULT_GATEWAY_ENTRY, |s| s.name.as_str());
        app.push(DiagramNode::rounded(entry, label));
        if has_realtime {
            app.push(DiagramNode::rounded(realtime, REALTIME_LABEL));
        }
    }
    for service in &app_services {
        app.push(service_node(service));
    }
    if monolith && has_realtime {
        app.push(DiagramNode::rect(realtime, REALTIME_LABEL));
    }
    doc.layers.push(app);

    // AI & analytics layer
    if !ai_services.is_empty() {
        let mut ai = Layer::new(LayerKind::AiAnalytics);
        for service in &ai_services {
            ai.push(service_node(service));
        }
        doc.layers.push(ai);
    }

    // Data layer
    let mut data = Layer::new(LayerKind::Data);
    data.push(DiagramNode::cylinder(DATABASE_NODE, model.database.as_str()));
    if let Some(cache) = &model.cache {
        data.push(DiagramNode::rounded(CACHE_NODE, cache.as_str()));
    }
    doc.layers.push(data);

    // Observability layer
    let mut obs = Layer::new(LayerKind::Observability);
    for service in &obs_services {
        obs.push(service_node(service));
    }
    doc.layers.push(obs);

    // Request path
    if edge_protection.is_some() {
        doc.push_edge(Edge::sync(CLIENT_NODE, EDGE_NODE));
        doc.push_edge(Edge::sync(EDGE_NODE, LOAD_BALANCER_NODE));
    } else {
        doc.push_edge(Edge::sync(CLIENT_NODE, LOAD_BALANCER_NODE));
    }
    doc.push_edge(Edge::sync(LOAD_BALANCER_NODE, entry));

    let has_cache = model.cache.is_some();
    if monolith {
        wire_monolith(&mut doc, &app_services, has_realtime, has_cache);
    } else {
        wire_microservices(&mut doc, &app_services, has_realtime, has_cache);
    }

    if !ai_services.is_empty() {
        wire_analytics(&mut doc, entry, &ai_services);
    }

    if let Some(sink) = obs_services.first() {
        let sink = sink.id.as_str();
        doc.push_edge(telemetry(LayerKind::Application, sink, "Logs & Metrics"));
        doc.push_edge(telemetry(LayerKind::Data, sink, "Health Checks"));
        if !ai_services.is_empty() {
            doc.push_edge(telemetry(LayerKind::AiAnalytics, sink, "Telemetry"));
        }
    }

    debug!(
        layers = doc.layers.len(),
        edges = doc.edges.len(),
        "compiled diagram"
    );

    doc
}

fn service_node(service: &ServiceNode) -> DiagramNode {
    DiagramNode::rect(service.id.as_str(), service.name.as_str())
}

fn telemetry(layer: LayerKind, sink: &str, label: &str) -> Edge {
    Edge::new(layer.id(), sink, EdgeKind::Telemetry).with_label(label)
}

fn wire_monolith(
    doc: &mut DiagramDocument,
    services: &[&ServiceNode],
    has_realtime: bool,
    has_cache: bool,
) {
    let api = MONOLITH_ENTRY_NODE;
    let ws = MONOLITH_REALTIME_NODE;

    if has_realtime {
        doc.push_edge(Edge::sync(LOAD_BALANCER_NODE, ws));
        doc.push_edge(Edge::new(ws, api, EdgeKind::AsyncEvent).with_label("Async Events"));
        if has_cache {
            doc.push_edge(Edge::new(ws, CACHE_NODE, EdgeKind::PubSub).with_label("Pub/Sub"));
        }
    }

    for service in services {
        let id = service.id.as_str();
        doc.push_edge(Edge::new(api, id, EdgeKind::AsyncEvent).with_label("Internal Call"));
        if service.role != ServiceRole::Alerting {
            doc.push_edge(Edge::new(id, DATABASE_NODE, EdgeKind::AsyncEvent));
        }
    }

    doc.push_edge(Edge::sync(api, DATABASE_NODE));
    if has_cache {
        doc.push_edge(Edge::sync(api, CACHE_NODE));
    }
}

fn wire_microservices(
    doc: &mut DiagramDocument,
    services: &[&ServiceNode],
    has_realtime: bool,
    has_cache: bool,
) {
    let gw = GATEWAY_ENTRY_NODE;
    let rtgw = GATEWAY_REALTIME_NODE;

    if has_realtime {
        doc.push_edge(Edge::sync(LOAD_BALANCER_NODE, rtgw));
    }

    for service in services {
        let id = service.id.as_str();
        let alerting = service.role == ServiceRole::Alerting;

        doc.push_edge(Edge::sync(gw, id));
        if !alerting {
            doc.push_edge(Edge::sync(id, DATABASE_NODE));
        }
        if has_cache {
            if alerting {
                doc.push_edge(Edge::new(CACHE_NODE, id, EdgeKind::PubSub).with_label("Pub/Sub"));
            } else {
                doc.push_edge(Edge::sync(id, CACHE_NODE));
            }
        }
    }

    if has_realtime && has_cache {
        doc.push_edge(Edge::new(rtgw, CACHE_NODE, EdgeKind::PubSub).with_label("Pub/Sub"));
    }
}

fn wire_analytics(doc: &mut DiagramDocument, entry: &str, services: &[&ServiceNode]) {
    let pipelines: Vec<&str> = services
        .iter()
        .filter(|s| s.role == ServiceRole::Pipeline)
        .map(|s| s.id.as_str())
        .collect();

    for pipeline in &pipelines {
        doc.push_edge(
            Edge::new(entry, *pipeline, EdgeKind::AsyncEvent).with_label("Async Streams"),
        );
    }

    let feeder = pipelines.first().copied();
    for service in services.iter().filter(|s| Some(s.id.as_str()) != feeder) {
        let id = service.id.as_str();
        doc.push_edge(
            Edge::new(feeder.unwrap_or(entry), id, EdgeKind::AsyncEvent)
                .with_label("Batch Process"),
        );
        doc.push_edge(Edge::new(id, DATABASE_NODE, EdgeKind::AsyncEvent));
    }

    if let Some(pipeline) = feeder {
        doc.push_edge(Edge::new(pipeline, DATABASE_NODE, EdgeKind::AsyncEvent));
    }
}
