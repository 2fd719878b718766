//! Centrality measures and top-k rankings
//!
//! - Degree centrality: degree / (n - 1)
//! - Betweenness centrality: Brandes' algorithm, sources processed in parallel
//! - Eigenvector centrality: power iteration on (A + I)
//!
//! Rankings are sorted by descending score; equal scores are ordered by
//! ascending node index so results are reproducible.

use crate::config::Config;
use crate::error::{AnalysisError, Result};
use crate::graph::CompressedGraph;
use crate::stats::degree::slice_genres;
use crate::stats::{round4, top_indices, RankedNode};
use ndarray::Array1;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Fraction of the other nodes each node is adjacent to
pub fn degree_centrality(graph: &CompressedGraph) -> Vec<f64> {
    let n = graph.node_count;
    if n <= 1 {
        return vec![1.0; n];
    }
    let scale = 1.0 / (n - 1) as f64;
    (0..n).map(|node| graph.degree(node) as f64 * scale).collect()
}

/// Add the dependencies of one BFS source to `acc`
fn accumulate_source(graph: &CompressedGraph, source: usize, endpoints: bool, acc: &mut [f64]) {
    let n = graph.node_count;
    let mut sigma = vec![0.0f64; n];
    let mut dist = vec![-1i64; n];
    let mut preds: Vec<Vec<u32>> = vec![Vec::new(); n];
    let mut stack: Vec<usize> = Vec::with_capacity(n);
    let mut queue = VecDeque::new();

    sigma[source] = 1.0;
    dist[source] = 0;
    queue.push_back(source);

    while let Some(v) = queue.pop_front() {
        stack.push(v);
        for &w in graph.neighbors(v) {
            let w = w as usize;
            if dist[w] < 0 {
                dist[w] = dist[v] + 1;
                queue.push_back(w);
            }
            if dist[w] == dist[v] + 1 {
                sigma[w] += sigma[v];
                preds[w].push(v as u32);
            }
        }
    }

    let mut delta = vec![0.0f64; n];
    if endpoints {
        acc[source] += (stack.len() - 1) as f64;
    }
    while let Some(w) = stack.pop() {
        let coeff = (1.0 + delta[w]) / sigma[w];
        for &v in &preds[w] {
            delta[v as usize] += sigma[v as usize] * coeff;
        }
        if w != source {
            acc[w] += if endpoints { delta[w] + 1.0 } else { delta[w] };
        }
    }
}

/// Normalised betweenness centrality
///
/// With `endpoints`, a path also counts towards its own end nodes and scores
/// are scaled by 1/(n(n-1)); otherwise only interior nodes count and scores
/// are scaled by 1/((n-1)(n-2)).
pub fn betweenness_centrality(graph: &CompressedGraph, endpoints: bool) -> Vec<f64> {
    let n = graph.node_count;

    let raw = (0..n)
        .into_par_iter()
        .fold(
            || vec![0.0; n],
            |mut acc, source| {
                accumulate_source(graph, source, endpoints, &mut acc);
                acc
            },
        )
        .reduce(
            || vec![0.0; n],
            |mut a, b| {
                a.iter_mut().zip(b).for_each(|(x, y)| *x += y);
                a
            },
        );

    let scale = match (endpoints, n) {
        (true, n) if n >= 2 => 1.0 / (n * (n - 1)) as f64,
        (false, n) if n > 2 => 1.0 / ((n - 1) * (n - 2)) as f64,
        _ => 1.0,
    };
    raw.into_iter().map(|b| b * scale).collect()
}

/// Eigenvector centrality by power iteration, L2-normalised
///
/// Fails with `Convergence` if the iterate has not stabilised (sum of absolute
/// changes below `n * tolerance`) after `max_iterations` steps.
pub fn eigenvector_centrality(
    graph: &CompressedGraph,
    max_iterations: usize,
    tolerance: f64,
) -> Result<Vec<f64>> {
    let n = graph.node_count;
    if n == 0 || graph.edge_count() == 0 {
        return Err(AnalysisError::EmptyGraph(
            "eigenvector centrality needs at least one edge".to_string(),
        ));
    }

    let mut x = Array1::from_elem(n, 1.0 / n as f64);
    for iteration in 0..max_iterations {
        // (A + I) x keeps the iteration from oscillating on bipartite graphs
        let mut next = x.clone();
        for u in 0..n {
            let neighbor_sum: f64 = graph.neighbors(u).iter().map(|&v| x[v as usize]).sum();
            next[u] += neighbor_sum;
        }

        let norm = next.dot(&next).sqrt();
        next.mapv_inplace(|v| v / norm);

        let change: f64 = (&next - &x).mapv(f64::abs).sum();
        x = next;

        if change < n as f64 * tolerance {
            log::debug!("Eigenvector centrality converged after {} iterations", iteration + 1);
            return Ok(x.to_vec());
        }
    }

    Err(AnalysisError::Convergence {
        iterations: max_iterations,
    })
}

/// Raw centrality scores of every node
#[derive(Debug, Clone)]
pub struct CentralityScores {
    pub degree: Vec<f64>,
    pub betweenness: Vec<f64>,
    pub eigenvector: Vec<f64>,
}

impl CentralityScores {
    /// Compute all three measures for a graph with at least one edge
    pub fn compute(graph: &CompressedGraph, config: &Config) -> Result<Self> {
        log::info!("Computing centrality for {} nodes", graph.node_count);

        let (eigenvector, betweenness) = rayon::join(
            || {
                eigenvector_centrality(
                    graph,
                    config.eigenvector_max_iterations,
                    config.eigenvector_tolerance,
                )
            },
            || betweenness_centrality(graph, config.betweenness_endpoints),
        );

        Ok(Self {
            degree: degree_centrality(graph),
            betweenness,
            eigenvector: eigenvector?,
        })
    }

    /// Top-k rankings over the nodes accepted by `filter`
    pub fn rankings<F>(&self, graph: &CompressedGraph, k: usize, filter: F) -> CentralityRankings
    where
        F: Fn(usize) -> bool,
    {
        let members: Vec<usize> = (0..graph.node_count).filter(|&n| filter(n)).collect();
        let rank = |scores: &[f64]| -> Vec<RankedNode> {
            let subset: Vec<f64> = members.iter().map(|&n| scores[n]).collect();
            top_indices(&subset, k)
                .into_iter()
                .map(|i| RankedNode {
                    node: graph.node_label(members[i]),
                    score: round4(subset[i]),
                })
                .collect()
        };

        CentralityRankings {
            degree: rank(&self.degree),
            betweenness: rank(&self.betweenness),
            eigenvector: rank(&self.eigenvector),
        }
    }
}

/// Top-k nodes by each centrality measure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralityRankings {
    pub degree: Vec<RankedNode>,
    pub betweenness: Vec<RankedNode>,
    pub eigenvector: Vec<RankedNode>,
}

/// Rankings restricted to the films of one genre
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreRankings {
    pub genre: String,
    pub rankings: CentralityRankings,
}

/// Top-k rankings over the whole graph
pub fn centrality_rankings(graph: &CompressedGraph, config: &Config) -> Result<CentralityRankings> {
    let scores = CentralityScores::compute(graph, config)?;
    Ok(scores.rankings(graph, config.top_k, |_| true))
}

/// Top-k rankings among the films of each eligible genre
///
/// Scores are computed once on the whole graph and then filtered by genre.
pub fn centrality_rankings_by_genre(
    graph: &CompressedGraph,
    scores: &CentralityScores,
    config: &Config,
) -> Vec<GenreRankings> {
    slice_genres(graph, config)
        .into_par_iter()
        .map(|genre| {
            let rankings = scores.rankings(graph, config.top_k, |n| {
                graph.attributes(n).is_some_and(|a| a.has_genre(&genre))
            });
            GenreRankings { genre, rankings }
        })
        .collect()
}

/// The `k` nodes with the fewest connections, ties by ascending index
pub fn least_connected(graph: &CompressedGraph, k: usize) -> Vec<RankedNode> {
    let mut order: Vec<usize> = (0..graph.node_count).collect();
    order.sort_by_key(|&n| (graph.degree(n), n));
    order
        .into_iter()
        .take(k)
        .map(|n| RankedNode {
            node: graph.node_label(n),
            score: graph.degree(n) as f64,
        })
        .collect()
}

/// The `k` nodes with the most connections, ties by ascending index
pub fn most_connected(graph: &CompressedGraph, k: usize) -> Vec<RankedNode> {
    let degrees: Vec<f64> = graph.degrees().iter().map(|&d| d as f64).collect();
    top_indices(&degrees, k)
        .into_iter()
        .map(|n| RankedNode {
            node: graph.node_label(n),
            score: degrees[n],
        })
        .collect()
}
