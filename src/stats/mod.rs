//! Degree distributions, centrality rankings and structural statistics

pub mod centrality;
pub mod compare;
pub mod degree;
pub mod structure;

use serde::{Deserialize, Serialize};

/// A node and its score in a ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedNode {
    /// Node identifier
    pub node: String,

    /// Score, rounded for display
    pub score: f64,
}

/// Round a statistic to 4 decimal places for display; NaN stays NaN
pub fn round4(value: f64) -> f64 {
    if value.is_finite() {
        (value * 10_000.0).round() / 10_000.0
    } else {
        value
    }
}

/// Indices of the `k` highest scores, ties broken by ascending node index
pub(crate) fn top_indices(scores: &[f64], k: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]).then(a.cmp(&b)));
    order.truncate(k);
    order
}
