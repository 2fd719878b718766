//! Compressed undirected graph with fixed per-node film attributes

use crate::cluster::Partition;
use crate::data::BoxOfficeBucket;
use crate::error::{AnalysisError, Result};
use petgraph::graph::UnGraph;
use serde::{Deserialize, Serialize};

/// Attributes carried by every node of the film network
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilmAttributes {
    /// Normalised genre labels
    pub genres: Vec<String>,

    /// Box-office revenue, if known
    pub box_office: Option<f64>,

    /// Box-office band, if revenue is known
    pub bucket: Option<BoxOfficeBucket>,

    /// Community id, set once a partition has been applied
    pub community: Option<u32>,
}

impl FilmAttributes {
    /// Check genre membership against a normalised genre label
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}

/// Compressed sparse representation of a simple undirected graph
///
/// Every edge `{u, v}` is stored in both adjacency lists, so
/// `edges.len() == 2 * edge_count()`. Adjacency lists are sorted and contain
/// neither self-loops nor duplicates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressedGraph {
    /// Number of nodes in the graph
    pub node_count: usize,

    /// Offset array: offsets[i] to offsets[i+1] is the neighbor range of node i
    pub offsets: Vec<u32>,

    /// Concatenated, sorted neighbor lists
    pub edges: Vec<u32>,

    /// Optional mapping from internal node indices to string identifiers
    pub node_ids: Option<Vec<String>>,

    /// Optional per-node film attributes (film network only)
    pub attributes: Option<Vec<FilmAttributes>>,
}

impl CompressedGraph {
    /// Build a graph from an undirected edge list, dropping self-loops and duplicates
    pub fn from_edge_list(node_count: usize, edge_list: &[(u32, u32)]) -> Self {
        let mut adjacency = vec![Vec::new(); node_count];
        for &(u, v) in edge_list {
            if u == v {
                continue;
            }
            adjacency[u as usize].push(v);
            adjacency[v as usize].push(u);
        }
        Self::from_adjacency_lists(adjacency)
    }

    /// Build a graph from symmetric adjacency lists (sorted and deduplicated here)
    pub fn from_adjacency_lists(mut adjacency: Vec<Vec<u32>>) -> Self {
        let node_count = adjacency.len();
        let mut offsets = Vec::with_capacity(node_count + 1);
        offsets.push(0);

        let mut offset = 0u32;
        for list in adjacency.iter_mut() {
            list.sort_unstable();
            list.dedup();
            offset += list.len() as u32;
            offsets.push(offset);
        }

        let mut edges = Vec::with_capacity(offset as usize);
        for list in &adjacency {
            edges.extend_from_slice(list);
        }

        Self {
            node_count,
            offsets,
            edges,
            node_ids: None,
            attributes: None,
        }
    }

    /// Neighbors of a node
    pub fn neighbors(&self, node: usize) -> &[u32] {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        &self.edges[start..end]
    }

    /// Check if the undirected edge {u, v} exists
    pub fn has_edge(&self, u: usize, v: u32) -> bool {
        self.neighbors(u).binary_search(&v).is_ok()
    }

    /// Degree of a node
    pub fn degree(&self, node: usize) -> usize {
        (self.offsets[node + 1] - self.offsets[node]) as usize
    }

    /// Degrees of all nodes in index order
    pub fn degrees(&self) -> Vec<usize> {
        (0..self.node_count).map(|n| self.degree(n)).collect()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.edges.len() / 2
    }

    /// Mean degree, 0 for an empty graph
    pub fn average_degree(&self) -> f64 {
        if self.node_count == 0 {
            return 0.0;
        }
        self.edges.len() as f64 / self.node_count as f64
    }

    /// Iterate every undirected edge once, as (smaller, larger) index pairs
    pub fn edge_pairs(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..self.node_count).flat_map(move |u| {
            self.neighbors(u)
                .iter()
                .filter(move |&&v| (u as u32) < v)
                .map(move |&v| (u as u32, v))
        })
    }

    /// String identifier of a node, falling back to its index
    pub fn node_label(&self, node: usize) -> String {
        match self.node_ids {
            Some(ref ids) => ids[node].clone(),
            None => node.to_string(),
        }
    }

    /// Look up a node index by identifier
    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.node_ids.as_ref()?.iter().position(|n| n == id)
    }

    /// Film attributes of a node, if this graph carries them
    pub fn attributes(&self, node: usize) -> Option<&FilmAttributes> {
        self.attributes.as_ref().map(|attrs| &attrs[node])
    }

    /// Whether a partition has been applied to the node attributes
    pub fn has_communities(&self) -> bool {
        self.attributes
            .as_ref()
            .is_some_and(|attrs| !attrs.is_empty() && attrs.iter().all(|a| a.community.is_some()))
    }

    /// Return a copy of this graph whose nodes carry the community ids of `partition`
    pub fn with_communities(mut self, partition: &Partition) -> Result<Self> {
        if partition.len() != self.node_count {
            return Err(AnalysisError::Data(format!(
                "partition covers {} nodes but graph has {}",
                partition.len(),
                self.node_count
            )));
        }

        let node_count = self.node_count;
        let attrs = self
            .attributes
            .get_or_insert_with(|| vec![FilmAttributes::default(); node_count]);
        for (node, attr) in attrs.iter_mut().enumerate() {
            attr.community = Some(partition.community_of(node));
        }
        Ok(self)
    }

    /// Convert to a petgraph graph labelled with node identifiers
    pub fn to_petgraph(&self) -> UnGraph<String, ()> {
        let mut graph = UnGraph::with_capacity(self.node_count, self.edge_count());
        let indices: Vec<_> = (0..self.node_count)
            .map(|n| graph.add_node(self.node_label(n)))
            .collect();
        for (u, v) in self.edge_pairs() {
            graph.add_edge(indices[u as usize], indices[v as usize], ());
        }
        graph
    }
}
