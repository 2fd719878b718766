//! Community statistics and metrics

use crate::cluster::{CommunitySummary, Partition};
use crate::graph::CompressedGraph;
use crate::stats::degree::histogram_with_bin_count;
use std::collections::HashSet;

/// Modularity of a partition: sum over communities of internal edge share
/// minus the share expected under the configuration null model
///
/// Returns NaN for a graph without edges, where modularity is undefined.
pub fn modularity(graph: &CompressedGraph, partition: &Partition, resolution: f64) -> f64 {
    let m = graph.edge_count() as f64;
    if m == 0.0 {
        return f64::NAN;
    }

    let k = partition.community_count();
    let mut internal = vec![0.0; k];
    let mut degree_sum = vec![0.0; k];

    for node in 0..graph.node_count {
        degree_sum[partition.community_of(node) as usize] += graph.degree(node) as f64;
    }
    for (u, v) in graph.edge_pairs() {
        let cu = partition.community_of(u as usize);
        if cu == partition.community_of(v as usize) {
            internal[cu as usize] += 1.0;
        }
    }

    internal
        .iter()
        .zip(&degree_sum)
        .map(|(&l, &d)| l / m - resolution * (d / (2.0 * m)).powi(2))
        .sum()
}

/// Calculate density (actual edges / potential edges) of a member set
pub fn calculate_density(graph: &CompressedGraph, members: &[u32]) -> f64 {
    let n = members.len();
    if n <= 1 {
        return 1.0; // By convention, singleton communities have density 1
    }

    // Potential edges = n * (n - 1) / 2 for an undirected graph
    let potential_edges = n * (n - 1) / 2;

    let member_set: HashSet<u32> = members.iter().copied().collect();
    let mut actual_edges = 0;

    for &src in members {
        for &dst in graph.neighbors(src as usize) {
            if src < dst && member_set.contains(&dst) {
                actual_edges += 1;
            }
        }
    }

    actual_edges as f64 / potential_edges as f64
}

/// Summaries of the `largest` biggest communities, including box-office figures
pub fn summarize_largest_communities(
    graph: &CompressedGraph,
    partition: &Partition,
    largest: usize,
    bins: usize,
) -> Vec<CommunitySummary> {
    partition
        .largest(largest)
        .into_iter()
        .map(|(id, members)| {
            let revenues: Vec<f64> = members
                .iter()
                .filter_map(|&m| graph.attributes(m as usize).and_then(|a| a.box_office))
                .collect();
            let mean_box_office = if revenues.is_empty() {
                None
            } else {
                Some(revenues.iter().sum::<f64>() / revenues.len() as f64)
            };

            CommunitySummary {
                id,
                size: members.len(),
                density: calculate_density(graph, &members),
                members: members.iter().map(|&m| graph.node_label(m as usize)).collect(),
                mean_box_office,
                box_office_histogram: histogram_with_bin_count(&revenues, bins),
            }
        })
        .collect()
}
