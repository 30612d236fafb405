//! Text rendering of reports

use crate::domain::Enhancement;
use crate::storage::Report;

/// Prints the human-readable summary of a report
pub fn print_report(report: &Report) {
    let model = &report.model;
    let cost = &model.cost_breakdown;

    println!("Project:      {}", report.project_name);
    println!("Style:        {}", model.style.display_name());
    println!("Database:     {}", model.database);
    println!("Cache:        {}", model.cache_label());
    println!("Scaling:      {}", model.scaling_strategy);
    println!(
        "Cost:         ${}/mo (compute ${}, database ${}, network ${})",
        report.total_cost, cost.compute, cost.database, cost.network
    );
    println!("Risk:         {}", model.risk);
    println!("Score:        {}/100", model.score);
    println!("Fingerprint:  {}", report.fingerprint);

    println!();
    println!("Services:");
    for service in &model.services {
        println!("  {:<6} {}", service.id, service.name);
    }
}

/// Prints applied enhancements
pub fn print_enhancements(changes: &[Enhancement]) {
    if changes.is_empty() {
        println!("No enhancements needed; the architecture already has every improvement.");
        return;
    }

    println!("Enhancements:");
    for change in changes {
        println!("  + {}", change.description);
        println!("    {}", change.rationale);
    }
}
