//! Configuration management for the network analysis

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Genres with too few films to give a meaningful per-genre slice
pub const SMALL_GENRES: [&str; 8] = [
    "War",
    "Sport",
    "History",
    "Biography",
    "Music",
    "Musical",
    "Western",
    "Documentary",
];

/// Default configuration for the network analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seed for Louvain node order and the random graph generators
    pub seed: u64,

    /// Length of every centrality ranking
    pub top_k: usize,

    /// Bin count for sliced and comparison degree distributions
    pub comparison_bins: usize,

    /// Communities smaller than this are left out of community slices
    pub min_community_size: usize,

    /// How many of the largest communities get box-office summaries
    pub largest_communities: usize,

    /// Iteration budget for eigenvector power iteration
    pub eigenvector_max_iterations: usize,

    /// Convergence tolerance for eigenvector power iteration
    pub eigenvector_tolerance: f64,

    /// Count path endpoints in betweenness centrality
    pub betweenness_endpoints: bool,

    /// Attempts to find a free target when rewiring a small-world edge
    pub rewire_attempts: usize,

    /// Resolution parameter of the modularity objective
    pub louvain_resolution: f64,

    /// Upper bound on Louvain aggregation levels
    pub louvain_max_levels: usize,

    /// Genres skipped by per-genre slices and rankings
    pub excluded_genres: Vec<String>,

    /// Generate matched random graphs and compare their statistics
    pub compare_random_models: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: 42,
            top_k: 5,
            comparison_bins: 30,
            min_community_size: 50,
            largest_communities: 5,
            eigenvector_max_iterations: 100,
            eigenvector_tolerance: 1e-6,
            betweenness_endpoints: true,
            rewire_attempts: 100,
            louvain_resolution: 1.0,
            louvain_max_levels: 32,
            excluded_genres: SMALL_GENRES.iter().map(|g| g.to_string()).collect(),
            compare_random_models: true,
        }
    }
}

impl Config {
    /// Load a configuration from a JSON file; missing fields keep their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// Create a configuration with a custom seed and otherwise default values
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}
