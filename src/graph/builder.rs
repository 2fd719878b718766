//! Graph construction module

use crate::error::{AnalysisError, Result};
use crate::graph::compressed::FilmAttributes;
use crate::graph::CompressedGraph;
use std::collections::HashMap;

/// Builder for incrementally constructing an undirected CompressedGraph
pub struct GraphBuilder {
    /// Number of nodes
    node_count: usize,

    /// Mapping from string IDs to node indices
    id_to_index: HashMap<String, u32>,

    /// Node string IDs
    node_ids: Vec<String>,

    /// Adjacency lists for each node (both directions, deduplicated on build)
    adjacency_lists: Vec<Vec<u32>>,

    /// Per-node film attributes, only set for film networks
    attributes: Option<Vec<FilmAttributes>>,
}

impl GraphBuilder {
    /// Create a new graph builder with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            node_count: 0,
            id_to_index: HashMap::with_capacity(capacity),
            node_ids: Vec::with_capacity(capacity),
            adjacency_lists: Vec::with_capacity(capacity),
            attributes: None,
        }
    }

    /// Get or create a node index for the given string ID
    pub fn get_or_create_node(&mut self, id: &str) -> u32 {
        if let Some(&idx) = self.id_to_index.get(id) {
            return idx;
        }

        let idx = self.node_count as u32;
        self.id_to_index.insert(id.to_string(), idx);
        self.node_ids.push(id.to_string());
        self.adjacency_lists.push(Vec::new());
        if let Some(attrs) = self.attributes.as_mut() {
            attrs.push(FilmAttributes::default());
        }
        self.node_count += 1;

        idx
    }

    /// Add a node with film attributes; the ID must not exist yet
    pub fn add_film_node(&mut self, id: &str, attributes: FilmAttributes) -> Result<u32> {
        if self.id_to_index.contains_key(id) {
            return Err(AnalysisError::Data(format!("duplicate film identifier '{}'", id)));
        }

        let node_count = self.node_count;
        self.attributes
            .get_or_insert_with(|| vec![FilmAttributes::default(); node_count]);
        let idx = self.get_or_create_node(id);
        if let Some(attrs) = self.attributes.as_mut() {
            attrs[idx as usize] = attributes;
        }
        Ok(idx)
    }

    /// Add an undirected edge between two existing node indices
    pub fn add_edge_by_index(&mut self, u: u32, v: u32) {
        if u == v {
            return;
        }
        self.adjacency_lists[u as usize].push(v);
        self.adjacency_lists[v as usize].push(u);
    }

    /// Add an undirected edge, creating the endpoints if needed
    pub fn add_edge(&mut self, src_id: &str, dst_id: &str) {
        let src_idx = self.get_or_create_node(src_id);
        let dst_idx = self.get_or_create_node(dst_id);
        self.add_edge_by_index(src_idx, dst_idx);
    }

    /// Build the compressed graph
    pub fn build(self) -> CompressedGraph {
        let mut graph = CompressedGraph::from_adjacency_lists(self.adjacency_lists);
        graph.node_ids = Some(self.node_ids);
        graph.attributes = self.attributes;
        graph
    }
}
