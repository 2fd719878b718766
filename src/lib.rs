//! Network analysis of top box-office films
//!
//! Builds the film and actor co-occurrence networks from film records,
//! detects communities, and computes degree, centrality and structural
//! statistics alongside matched random-graph baselines.

pub mod analysis;
pub mod cluster;
pub mod config;
pub mod data;
pub mod error;
pub mod generators;
pub mod graph;
pub mod stats;
pub mod storage;

pub use analysis::{run_analysis, AnalysisReport};
pub use config::Config;
pub use error::{AnalysisError, Result};
