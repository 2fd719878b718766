//! Connectivity algorithms: components, giant component, induced subgraphs

use crate::error::{AnalysisError, Result};
use crate::graph::CompressedGraph;
use std::collections::HashMap;

/// Union-Find data structure for connected component analysis
pub struct DisjointSets {
    /// Parent pointers (parent[i] = parent of node i)
    parent: Vec<u32>,

    /// Size of each set, valid at roots (for union by size)
    size: Vec<u32>,
}

impl DisjointSets {
    /// Create a new DisjointSets data structure
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size as u32).collect(),
            size: vec![1; size],
        }
    }

    /// Find the root of the set containing x with path compression
    pub fn find(&mut self, x: u32) -> u32 {
        let mut root = x;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }

        let mut current = x;
        while self.parent[current as usize] != root {
            let next = self.parent[current as usize];
            self.parent[current as usize] = root;
            current = next;
        }
        root
    }

    /// Union the sets containing x and y
    pub fn union(&mut self, x: u32, y: u32) {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return;
        }

        // Attach the smaller tree under the root of the larger one
        if self.size[root_x as usize] >= self.size[root_y as usize] {
            self.parent[root_y as usize] = root_x;
            self.size[root_x as usize] += self.size[root_y as usize];
        } else {
            self.parent[root_x as usize] = root_y;
            self.size[root_y as usize] += self.size[root_x as usize];
        }
    }

    /// Get the size of the set containing x
    pub fn size(&mut self, x: u32) -> u32 {
        let root = self.find(x);
        self.size[root as usize]
    }
}

/// Connected components, largest first
///
/// Members of each component are in ascending index order. Components of
/// equal size are ordered by their lowest member index.
pub fn connected_components(graph: &CompressedGraph) -> Vec<Vec<u32>> {
    let mut sets = DisjointSets::new(graph.node_count);
    for (u, v) in graph.edge_pairs() {
        sets.union(u, v);
    }

    let mut by_root: HashMap<u32, Vec<u32>> = HashMap::new();
    for node in 0..graph.node_count as u32 {
        let root = sets.find(node);
        let size = sets.size(root) as usize;
        by_root
            .entry(root)
            .or_insert_with(|| Vec::with_capacity(size))
            .push(node);
    }

    let mut components: Vec<Vec<u32>> = by_root.into_values().collect();
    components.sort_by(|a, b| b.len().cmp(&a.len()).then(a[0].cmp(&b[0])));
    components
}

/// Members of the giant connected component
pub fn giant_component_members(graph: &CompressedGraph) -> Result<Vec<u32>> {
    connected_components(graph)
        .into_iter()
        .next()
        .ok_or_else(|| AnalysisError::EmptyGraph("giant component of a graph without nodes".to_string()))
}

/// The giant connected component as its own graph
pub fn giant_component(graph: &CompressedGraph) -> Result<CompressedGraph> {
    let members = giant_component_members(graph)?;
    log::debug!(
        "Giant component holds {} of {} nodes",
        members.len(),
        graph.node_count
    );
    Ok(induced_subgraph(graph, &members))
}

/// Subgraph induced by `members`, renumbered in the order given
pub fn induced_subgraph(graph: &CompressedGraph, members: &[u32]) -> CompressedGraph {
    // Create mapping from original to subgraph indices
    let mut orig_to_sub = vec![u32::MAX; graph.node_count];
    for (i, &node) in members.iter().enumerate() {
        orig_to_sub[node as usize] = i as u32;
    }

    let adjacency: Vec<Vec<u32>> = members
        .iter()
        .map(|&node| {
            graph
                .neighbors(node as usize)
                .iter()
                .map(|&target| orig_to_sub[target as usize])
                .filter(|&target| target != u32::MAX)
                .collect()
        })
        .collect();

    let mut subgraph = CompressedGraph::from_adjacency_lists(adjacency);

    // Copy node IDs and attributes if available
    if let Some(node_ids) = &graph.node_ids {
        subgraph.node_ids = Some(members.iter().map(|&n| node_ids[n as usize].clone()).collect());
    }
    if let Some(attributes) = &graph.attributes {
        subgraph.attributes = Some(members.iter().map(|&n| attributes[n as usize].clone()).collect());
    }

    subgraph
}
