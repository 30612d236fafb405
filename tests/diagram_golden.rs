//! Golden file tests for Mermaid output
//!
//! The diagram text is the primary artifact consumed by renderers, so its
//! layout must stay byte-stable for a given architecture.

use std::fs;

use archsmith::domain::{compile, synthesize, FeatureFlags};
use archsmith::render::render;
use archsmith::ScaleTier;
use tempfile::TempDir;

/// Get a command instance for the archsmith binary
fn archsmith_cmd(config_dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("archsmith"));
    cmd.env("ARCHSMITH_CONFIG", config_dir.path().join("config.toml"))
        .env_remove("RUST_LOG");
    cmd
}

const SMALL_TODO: &str = r#"graph TD

  classDef client fill:#1e293b,stroke:#3b82f6,stroke-width:2px,color:#f8fafc
  classDef app fill:#1e293b,stroke:#8b5cf6,stroke-width:2px,color:#f8fafc
  classDef data fill:#1e293b,stroke:#10b981,stroke-width:2px,color:#f8fafc
  classDef obs fill:#1e293b,stroke:#64748b,stroke-width:2px,color:#f8fafc
  classDef ai fill:#1e293b,stroke:#ec4899,stroke-width:2px,color:#f8fafc

  subgraph Client_Layer ["📱 Client Layer"]
    client["Client Application"]:::client
  end

  subgraph App_Layer ["⚡ Application Layer"]
    lb["Load Balancer"]:::app
    api["Core API Module"]:::app
    srv0["Web Server (Next.js)"]:::app
  end

  subgraph Data_Layer ["💾 Data Layer"]
    db[("PostgreSQL (Relational)")]:::data
  end

  subgraph Obs_Layer ["📊 Observability Layer"]
    srv2["Metrics & Logs (Prometheus/Grafana)"]:::obs
  end

  %% Synchronous flows
  client --> lb
  lb --> api
  api -.-> |Internal Call| srv0
  srv0 -.-> db
  api --> db
  %% Monitoring & Metrics
  App_Layer -.-> |Logs & Metrics| srv2
  Data_Layer -.-> |Health Checks| srv2
"#;

const SMALL_TODO_ENHANCED: &str = r#"graph TD

  classDef client fill:#1e293b,stroke:#3b82f6,stroke-width:2px,color:#f8fafc
  classDef app fill:#1e293b,stroke:#8b5cf6,stroke-width:2px,color:#f8fafc
  classDef data fill:#1e293b,stroke:#10b981,stroke-width:2px,color:#f8fafc
  classDef obs fill:#1e293b,stroke:#64748b,stroke-width:2px,color:#f8fafc
  classDef ai fill:#1e293b,stroke:#ec4899,stroke-width:2px,color:#f8fafc

  subgraph Client_Layer ["📱 Client Layer"]
    client["Client Application"]:::client
  end

  subgraph App_Layer ["⚡ Application Layer"]
    waf["WAF & Rate Limiter (Cloudflare)"]:::app
    lb["Load Balancer"]:::app
    api["Core API Module"]:::app
    srv0["Web Server (Next.js)"]:::app
  end

  subgraph Data_Layer ["💾 Data Layer"]
    db[("PostgreSQL (Primary) + Read Replica")]:::data
    cache{"Redis (Cache + Session Store)"}:::data
  end

  subgraph Obs_Layer ["📊 Observability Layer"]
    srv2["Metrics & Logs (Prometheus/Grafana)"]:::obs
  end

  %% Synchronous flows
  client --> waf
  waf --> lb
  lb --> api
  api -.-> |Internal Call| srv0
  srv0 -.-> db
  api --> db
  api --> cache
  %% Monitoring & Metrics
  App_Layer -.-> |Logs & Metrics| srv2
  Data_Layer -.-> |Health Checks| srv2
"#;

#[test]
fn golden_small_without_flags() {
    let model = synthesize(ScaleTier::Small, FeatureFlags::default());
    assert_eq!(render(&compile(&model)), SMALL_TODO);
}

#[test]
fn golden_design_writes_diagram_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("todo.mmd");

    archsmith_cmd(&dir)
        .args([
            "design",
            "--name",
            "TodoApp",
            "--scale",
            "small",
            "--description",
            "A simple todo list for personal use",
            "--diagram-out",
        ])
        .arg(&out)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&out).unwrap(), SMALL_TODO);
}

#[test]
fn golden_enhanced_small() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("todo-enhanced.mmd");

    archsmith_cmd(&dir)
        .args([
            "design",
            "--name",
            "TodoApp",
            "--scale",
            "small",
            "--description",
            "A simple todo list for personal use",
            "--enhance",
            "--diagram-out",
        ])
        .arg(&out)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&out).unwrap(), SMALL_TODO_ENHANCED);
}

#[test]
fn golden_output_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let mut outputs = Vec::new();

    for _ in 0..2 {
        let assert = archsmith_cmd(&dir)
            .args([
                "design",
                "--name",
                "Sensors",
                "--scale",
                "large",
                "--description",
                "Realtime video analytics with threshold alerts",
            ])
            .assert()
            .success();
        outputs.push(assert.get_output().stdout.clone());
    }

    assert_eq!(outputs[0], outputs[1]);
}
