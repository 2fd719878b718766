//! Random comparison graphs matched to a reference graph
//!
//! - **Preferential attachment**: one edge per new node, target drawn from
//!   the endpoints of existing edges
//! - **Small world**: ring lattice with random rewiring
//! - **Uniform random**: every node pair is an edge with probability p

pub mod models;

use crate::config::Config;
use crate::error::{AnalysisError, Result};
use crate::graph::CompressedGraph;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Random graph model used as a comparison baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RandomGraphModel {
    PreferentialAttachment,
    SmallWorld,
    UniformRandom,
}

impl RandomGraphModel {
    pub const ALL: [RandomGraphModel; 3] = [
        RandomGraphModel::PreferentialAttachment,
        RandomGraphModel::SmallWorld,
        RandomGraphModel::UniformRandom,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RandomGraphModel::PreferentialAttachment => "preferential_attachment",
            RandomGraphModel::SmallWorld => "small_world",
            RandomGraphModel::UniformRandom => "uniform_random",
        }
    }
}

impl fmt::Display for RandomGraphModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Generation parameters derived from a reference graph
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchedParameters {
    /// Target node count
    pub node_count: usize,

    /// Average degree of the reference graph
    pub average_degree: f64,

    /// Ring-lattice neighbors for the small-world model
    pub ring_neighbors: usize,

    /// Edge / rewiring probability: average degree divided by node count
    pub probability: f64,
}

impl MatchedParameters {
    /// Match a reference graph's node count and average degree
    pub fn from_reference(reference: &CompressedGraph) -> Result<Self> {
        Self::new(reference.node_count, reference.average_degree())
    }

    pub fn new(node_count: usize, average_degree: f64) -> Result<Self> {
        if node_count == 0 {
            return Err(AnalysisError::EmptyGraph(
                "cannot match a random graph to a graph without nodes".to_string(),
            ));
        }
        Ok(Self {
            node_count,
            average_degree,
            ring_neighbors: average_degree.round() as usize,
            probability: (average_degree / node_count as f64).clamp(0.0, 1.0),
        })
    }
}

/// Generate one comparison graph
pub fn generate(
    model: RandomGraphModel,
    params: &MatchedParameters,
    seed: u64,
    config: &Config,
) -> CompressedGraph {
    log::debug!("Generating {} graph with {:?}", model, params);
    let graph = match model {
        RandomGraphModel::PreferentialAttachment => {
            models::preferential_attachment(params.node_count, seed)
        }
        RandomGraphModel::SmallWorld => models::small_world(
            params.node_count,
            params.ring_neighbors,
            params.probability,
            config.rewire_attempts,
            seed,
        ),
        RandomGraphModel::UniformRandom => {
            models::uniform_random(params.node_count, params.probability, seed)
        }
    };
    log::info!(
        "Generated {} graph with {} nodes and {} edges",
        model,
        graph.node_count,
        graph.edge_count()
    );
    graph
}
