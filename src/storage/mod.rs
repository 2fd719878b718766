//! Results persistence module

use crate::analysis::AnalysisReport;
use crate::error::Result;
use serde_json::{json, to_string_pretty, Value};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Files written by [`save_results`]
pub const REPORT_FILES: [&str; 5] = [
    "summary.json",
    "communities.json",
    "degree_distributions.json",
    "centrality.json",
    "comparison.json",
];

/// Save an analysis report to the specified directory
pub fn save_results(report: &AnalysisReport, output_dir: &str) -> Result<()> {
    log::info!("Saving analysis report to {}", output_dir);

    // Ensure output directory exists
    fs::create_dir_all(output_dir)?;

    save_summary(report, output_dir)?;
    save_communities(report, output_dir)?;
    save_json(
        output_dir,
        "degree_distributions.json",
        &json!(report.degree_distributions),
    )?;
    save_json(output_dir, "centrality.json", &json!(report.centrality))?;
    save_comparison(report, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

fn save_json(output_dir: &str, name: &str, value: &Value) -> Result<()> {
    log::debug!("Writing {}", name);
    let path = Path::new(output_dir).join(name);
    let mut file = File::create(path)?;
    file.write_all(to_string_pretty(value)?.as_bytes())?;
    Ok(())
}

/// Corpus figures plus the structural statistics of both networks
fn save_summary(report: &AnalysisReport, output_dir: &str) -> Result<()> {
    let summary = json!({
        "corpus": report.summary,
        "film_network": report.film_structure,
        "actor_network": report.actor_structure,
        "community_stats": {
            "community_count": report.communities.community_count,
            "modularity": report.communities.modularity,
            "largest_community_size": report.communities.sizes.first().map_or(0, |c| c.size),
            "smallest_community_size": report.communities.sizes.last().map_or(0, |c| c.size),
        }
    });
    save_json(output_dir, "summary.json", &summary)
}

fn save_communities(report: &AnalysisReport, output_dir: &str) -> Result<()> {
    let communities = json!({
        "community_count": report.communities.community_count,
        "modularity": report.communities.modularity,
        "sizes": report.communities.sizes,
        "largest": report.communities.largest,
        "assignments": report.communities.assignments,
        "average_neighbor_degree": report.average_neighbor_degree,
    });
    save_json(output_dir, "communities.json", &communities)
}

/// Flat statistics table with one column per graph
fn save_comparison(report: &AnalysisReport, output_dir: &str) -> Result<()> {
    let comparison = match &report.comparison {
        Some(comparison) => {
            let mut columns = vec!["reference".to_string()];
            columns.extend(comparison.models.iter().map(|m| m.to_string()));

            json!({
                "parameters": comparison.parameters,
                "columns": columns,
                "rows": comparison.rows.iter().map(|row| {
                    let mut values = vec![row.reference];
                    values.extend(row.comparison.iter().copied());
                    json!({ "statistic": row.statistic, "values": values })
                }).collect::<Vec<_>>(),
                "degree_distributions": comparison.degree_distributions,
            })
        }
        None => json!({ "skipped": true }),
    };
    save_json(output_dir, "comparison.json", &comparison)
}
