//! Preferential-attachment, small-world and uniform random graph models

use crate::graph::CompressedGraph;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;

/// Grow a graph from a single edge, attaching each new node to one existing node
///
/// The target is drawn uniformly from the endpoint list of all existing
/// edges, so a node is chosen with probability proportional to its degree.
/// The result is a tree with `node_count - 1` edges.
pub fn preferential_attachment(node_count: usize, seed: u64) -> CompressedGraph {
    if node_count < 2 {
        return CompressedGraph::from_edge_list(node_count, &[]);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut edges: Vec<(u32, u32)> = Vec::with_capacity(node_count - 1);
    let mut endpoints: Vec<u32> = Vec::with_capacity(2 * (node_count - 1));

    edges.push((0, 1));
    endpoints.extend([0, 1]);

    for node in 2..node_count as u32 {
        let target = endpoints[rng.gen_range(0..endpoints.len())];
        edges.push((node, target));
        endpoints.extend([node, target]);
    }

    CompressedGraph::from_edge_list(node_count, &edges)
}

/// Ring lattice with random rewiring
///
/// Each node starts linked to its `neighbors / 2` nearest nodes on either side
/// of the ring. Every lattice edge `(u, u + j)` is then, with probability
/// `rewire_probability`, moved to `(u, w)` for a uniformly drawn `w` that is
/// neither `u` nor already adjacent to it. At most `attempts` draws are made
/// per edge; if none succeeds the edge stays in place.
pub fn small_world(
    node_count: usize,
    neighbors: usize,
    rewire_probability: f64,
    attempts: usize,
    seed: u64,
) -> CompressedGraph {
    let n = node_count;
    let half = (neighbors / 2).min(n.saturating_sub(1) / 2);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut adjacency: Vec<BTreeSet<u32>> = vec![BTreeSet::new(); n];

    for j in 1..=half {
        for u in 0..n {
            let v = (u + j) % n;
            adjacency[u].insert(v as u32);
            adjacency[v].insert(u as u32);
        }
    }

    for j in 1..=half {
        for u in 0..n {
            let v = (u + j) % n;
            if rng.gen::<f64>() >= rewire_probability {
                continue;
            }
            if adjacency[u].len() >= n - 1 || !adjacency[u].contains(&(v as u32)) {
                continue;
            }

            for _ in 0..attempts {
                let w = rng.gen_range(0..n);
                if w == u || adjacency[u].contains(&(w as u32)) {
                    continue;
                }
                adjacency[u].remove(&(v as u32));
                adjacency[v].remove(&(u as u32));
                adjacency[u].insert(w as u32);
                adjacency[w].insert(u as u32);
                break;
            }
        }
    }

    CompressedGraph::from_adjacency_lists(
        adjacency.into_iter().map(|set| set.into_iter().collect()).collect(),
    )
}

/// Erdős–Rényi graph: each of the n(n-1)/2 pairs is an edge with probability `p`
pub fn uniform_random(node_count: usize, probability: f64, seed: u64) -> CompressedGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut edges = Vec::new();

    for i in 0..node_count as u32 {
        for j in (i + 1)..node_count as u32 {
            if rng.gen::<f64>() < probability {
                edges.push((i, j));
            }
        }
    }

    CompressedGraph::from_edge_list(node_count, &edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::algorithms::connected_components;

    fn is_simple(graph: &CompressedGraph) -> bool {
        (0..graph.node_count).all(|u| {
            let neighbors = graph.neighbors(u);
            !neighbors.contains(&(u as u32)) && neighbors.windows(2).all(|w| w[0] < w[1])
        })
    }

    fn degree_sum(graph: &CompressedGraph) -> usize {
        graph.degrees().iter().sum()
    }

    #[test]
    fn preferential_attachment_builds_a_tree() {
        let graph = preferential_attachment(200, 1);
        assert_eq!(graph.node_count, 200);
        assert_eq!(graph.edge_count(), 199);
        assert_eq!(connected_components(&graph).len(), 1);
        assert_eq!(degree_sum(&graph), 2 * graph.edge_count());
        assert!(is_simple(&graph));
    }

    #[test]
    fn preferential_attachment_small_sizes() {
        assert_eq!(preferential_attachment(0, 1).node_count, 0);
        assert_eq!(preferential_attachment(1, 1).edge_count(), 0);
        assert_eq!(preferential_attachment(2, 1).edge_count(), 1);
    }

    #[test]
    fn preferential_attachment_grows_hubs() {
        let graph = preferential_attachment(2000, 4);
        let max_degree = graph.degrees().into_iter().max().unwrap();
        assert!(max_degree >= 15, "max degree {}", max_degree);
    }

    #[test]
    fn unrewired_ring_is_regular() {
        let graph = small_world(20, 4, 0.0, 100, 3);
        assert_eq!(graph.edge_count(), 40);
        assert!(graph.degrees().iter().all(|&d| d == 4));
    }

    #[test]
    fn rewiring_keeps_graph_simple() {
        let graph = small_world(100, 6, 0.3, 100, 5);
        assert_eq!(graph.node_count, 100);
        assert!(is_simple(&graph));
        assert_eq!(degree_sum(&graph), 2 * graph.edge_count());
        // rewiring moves edges, it never adds or drops them
        assert_eq!(graph.edge_count(), 300);
    }

    #[test]
    fn dense_lattice_is_clamped() {
        let graph = small_world(5, 10, 0.5, 100, 2);
        assert_eq!(graph.node_count, 5);
        assert!(is_simple(&graph));
        assert_eq!(graph.edge_count(), 10);
    }

    #[test]
    fn uniform_random_extremes() {
        assert_eq!(uniform_random(30, 0.0, 1).edge_count(), 0);
        assert_eq!(uniform_random(30, 1.0, 1).edge_count(), 30 * 29 / 2);
        let graph = uniform_random(60, 0.2, 8);
        assert!(is_simple(&graph));
        assert_eq!(degree_sum(&graph), 2 * graph.edge_count());
    }

    #[test]
    fn seeds_are_reproducible() {
        assert_eq!(uniform_random(40, 0.1, 3).edges, uniform_random(40, 0.1, 3).edges);
        assert_eq!(small_world(40, 4, 0.2, 100, 3).edges, small_world(40, 4, 0.2, 100, 3).edges);
        assert_eq!(preferential_attachment(40, 3).edges, preferential_attachment(40, 3).edges);
    }
}
