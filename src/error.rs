//! Error types for the network analysis engine

use thiserror::Error;

/// Errors surfaced by graph construction, community detection and statistics
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Malformed or missing required input fields
    #[error("data error: {0}")]
    Data(String),

    /// The operation needs a non-empty graph
    #[error("empty graph: {0}")]
    EmptyGraph(String),

    /// An iterative algorithm ran out of iterations before stabilising
    #[error("failed to converge within {iterations} iterations")]
    Convergence { iterations: usize },

    /// A requested slice type or value is not present in the data
    #[error("invalid category: {0}")]
    InvalidCategory(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Polars(#[from] polars::prelude::PolarsError),
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, AnalysisError>;
