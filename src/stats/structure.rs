//! Structural statistics: assortativity, clustering, path lengths

use crate::error::{AnalysisError, Result};
use crate::graph::algorithms::{connected_components, giant_component, induced_subgraph};
use crate::graph::{CompressedGraph, FilmAttributes};
use ndarray::{Array2, Axis};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::collections::VecDeque;

/// Pearson correlation of the degrees at either end of every edge
///
/// NaN when undefined (no edges, or all endpoint degrees equal).
pub fn degree_assortativity(graph: &CompressedGraph) -> f64 {
    let mut xs = Vec::with_capacity(graph.edges.len());
    let mut ys = Vec::with_capacity(graph.edges.len());
    for (u, v) in graph.edge_pairs() {
        let du = graph.degree(u as usize) as f64;
        let dv = graph.degree(v as usize) as f64;
        // both orientations, so the measure is symmetric
        xs.extend([du, dv]);
        ys.extend([dv, du]);
    }
    if xs.len() < 2 {
        return f64::NAN;
    }

    let covariance = xs.iter().covariance(ys.iter());
    covariance / (xs.iter().std_dev() * ys.iter().std_dev())
}

/// Categorical assortativity from the normalised mixing matrix
///
/// `category` maps a node to its category index below `categories`; edges
/// with an uncategorised endpoint are skipped. NaN when undefined.
pub fn attribute_assortativity<F>(graph: &CompressedGraph, categories: usize, category: F) -> f64
where
    F: Fn(usize) -> Option<usize>,
{
    let mut mixing = Array2::<f64>::zeros((categories, categories));
    for (u, v) in graph.edge_pairs() {
        if let (Some(a), Some(b)) = (category(u as usize), category(v as usize)) {
            mixing[[a, b]] += 1.0;
            mixing[[b, a]] += 1.0;
        }
    }

    let total = mixing.sum();
    if total == 0.0 {
        return f64::NAN;
    }
    mixing /= total;

    let a = mixing.sum_axis(Axis(1));
    let b = mixing.sum_axis(Axis(0));
    let expected = a.dot(&b);
    (mixing.diag().sum() - expected) / (1.0 - expected)
}

fn film_attribute_assortativity<F>(graph: &CompressedGraph, categories: usize, key: F) -> Result<f64>
where
    F: Fn(&FilmAttributes) -> Option<usize>,
{
    if graph.attributes.is_none() {
        return Err(AnalysisError::InvalidCategory(
            "graph carries no film attributes".to_string(),
        ));
    }
    Ok(attribute_assortativity(graph, categories, |n| {
        graph.attributes(n).and_then(&key)
    }))
}

/// Assortativity of the film network by box-office band
pub fn box_office_assortativity(graph: &CompressedGraph) -> Result<f64> {
    film_attribute_assortativity(graph, 5, |a| a.bucket.map(|b| b.index()))
}

/// Assortativity of the film network by community
pub fn community_assortativity(graph: &CompressedGraph) -> Result<f64> {
    if !graph.has_communities() {
        return Err(AnalysisError::InvalidCategory(
            "graph has no community assignment".to_string(),
        ));
    }
    let categories = graph
        .attributes
        .iter()
        .flatten()
        .filter_map(|a| a.community)
        .max()
        .map_or(0, |c| c as usize + 1);
    film_attribute_assortativity(graph, categories, |a| a.community.map(|c| c as usize))
}

/// Size of the intersection of two sorted neighbor lists
fn common_neighbors(a: &[u32], b: &[u32]) -> usize {
    let (mut i, mut j, mut count) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                count += 1;
                i += 1;
                j += 1;
            }
        }
    }
    count
}

/// Local clustering coefficient of every node (0 for degree below 2)
pub fn local_clustering(graph: &CompressedGraph) -> Vec<f64> {
    (0..graph.node_count)
        .into_par_iter()
        .map(|u| {
            let neighbors = graph.neighbors(u);
            let d = neighbors.len();
            if d < 2 {
                return 0.0;
            }
            let links: usize = neighbors
                .iter()
                .map(|&v| common_neighbors(neighbors, graph.neighbors(v as usize)))
                .sum();
            // every link between two neighbors was counted from both of them
            links as f64 / (d * (d - 1)) as f64
        })
        .collect()
}

/// Mean local clustering coefficient, NaN for a graph without nodes
pub fn average_clustering(graph: &CompressedGraph) -> f64 {
    if graph.node_count == 0 {
        return f64::NAN;
    }
    local_clustering(graph).iter().sum::<f64>() / graph.node_count as f64
}

/// Sum of BFS distances from `source` to every reachable node
fn distance_sum(graph: &CompressedGraph, source: usize) -> u64 {
    let mut dist = vec![u32::MAX; graph.node_count];
    let mut queue = VecDeque::from([source]);
    dist[source] = 0;
    let mut total = 0u64;

    while let Some(v) = queue.pop_front() {
        total += dist[v] as u64;
        for &w in graph.neighbors(v) {
            if dist[w as usize] == u32::MAX {
                dist[w as usize] = dist[v] + 1;
                queue.push_back(w as usize);
            }
        }
    }
    total
}

/// Mean shortest-path length over all node pairs of the giant component
///
/// Restricting to the giant component keeps the measure defined on
/// disconnected graphs. A single-node component has length 0.
pub fn average_shortest_path_length(graph: &CompressedGraph) -> Result<f64> {
    let gcc = giant_component(graph)?;
    let n = gcc.node_count;
    if n < 2 {
        return Ok(0.0);
    }

    let total: u64 = (0..n).into_par_iter().map(|s| distance_sum(&gcc, s)).sum();
    Ok(total as f64 / (n * (n - 1)) as f64)
}

/// Mean degree of each node's neighbors (0 for isolated nodes)
pub fn average_neighbor_degree(graph: &CompressedGraph) -> Vec<f64> {
    (0..graph.node_count)
        .map(|u| {
            let neighbors = graph.neighbors(u);
            if neighbors.is_empty() {
                return 0.0;
            }
            let total: usize = neighbors.iter().map(|&v| graph.degree(v as usize)).sum();
            total as f64 / neighbors.len() as f64
        })
        .collect()
}

/// Named structural statistics of one graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralStatistics {
    pub node_count: usize,
    pub edge_count: usize,
    pub average_degree: f64,
    pub max_degree: usize,
    pub component_count: usize,
    pub giant_component_nodes: usize,
    pub giant_component_edges: usize,
    pub degree_assortativity: f64,

    /// Mean local clustering over the giant component
    pub average_clustering: f64,

    /// Mean shortest-path length over the giant component
    pub average_shortest_path: f64,

    /// Mean over nodes of the average neighbor degree
    pub mean_neighbor_degree: f64,
}

impl StructuralStatistics {
    /// Statistics as (name, value) rows in a fixed order
    pub fn rows(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("node_count", self.node_count as f64),
            ("edge_count", self.edge_count as f64),
            ("average_degree", self.average_degree),
            ("max_degree", self.max_degree as f64),
            ("component_count", self.component_count as f64),
            ("giant_component_nodes", self.giant_component_nodes as f64),
            ("giant_component_edges", self.giant_component_edges as f64),
            ("degree_assortativity", self.degree_assortativity),
            ("average_clustering", self.average_clustering),
            ("average_shortest_path", self.average_shortest_path),
            ("mean_neighbor_degree", self.mean_neighbor_degree),
        ]
    }
}

/// Compute the structural statistics of a graph with at least one node
pub fn structural_statistics(graph: &CompressedGraph) -> Result<StructuralStatistics> {
    if graph.node_count == 0 {
        return Err(AnalysisError::EmptyGraph(
            "structural statistics need at least one node".to_string(),
        ));
    }

    let components = connected_components(graph);
    let gcc = induced_subgraph(graph, &components[0]);

    let (average_clustering, average_shortest_path) = rayon::join(
        || average_clustering(&gcc),
        || average_shortest_path_length(&gcc),
    );

    let neighbor_degrees = average_neighbor_degree(graph);

    Ok(StructuralStatistics {
        node_count: graph.node_count,
        edge_count: graph.edge_count(),
        average_degree: graph.average_degree(),
        max_degree: graph.degrees().into_iter().max().unwrap_or(0),
        component_count: components.len(),
        giant_component_nodes: gcc.node_count,
        giant_component_edges: gcc.edge_count(),
        degree_assortativity: degree_assortativity(graph),
        average_clustering,
        average_shortest_path: average_shortest_path?,
        mean_neighbor_degree: neighbor_degrees.iter().sum::<f64>() / graph.node_count as f64,
    })
}
