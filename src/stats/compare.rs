//! Side-by-side statistics of a reference graph and matched random graphs

use crate::config::Config;
use crate::error::Result;
use crate::generators::{generate, MatchedParameters, RandomGraphModel};
use crate::graph::CompressedGraph;
use crate::stats::degree::{histogram_with_bin_count, histogram_with_edges, DegreeSlice};
use crate::stats::round4;
use crate::stats::structure::{structural_statistics, StructuralStatistics};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One named statistic for the reference and each comparison graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub statistic: String,
    pub reference: f64,

    /// Values in the order of `ModelComparison::models`
    pub comparison: Vec<f64>,
}

/// Statistics table and degree distributions for the reference and its random counterparts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelComparison {
    pub parameters: MatchedParameters,
    pub models: Vec<RandomGraphModel>,
    pub rows: Vec<ComparisonRow>,

    /// Reference first, then one per model, all on the same bin edges
    pub degree_distributions: Vec<DegreeSlice>,
}

/// Generate the three random models for `reference` and compare their statistics
pub fn compare_with_random_models(
    reference: &CompressedGraph,
    config: &Config,
) -> Result<ModelComparison> {
    let parameters = MatchedParameters::from_reference(reference)?;
    log::info!(
        "Comparing against random models with {} nodes, average degree {:.3}",
        parameters.node_count,
        parameters.average_degree
    );

    let models = RandomGraphModel::ALL.to_vec();
    let generated: Vec<CompressedGraph> = models
        .par_iter()
        .enumerate()
        .map(|(i, &model)| generate(model, &parameters, config.seed.wrapping_add(i as u64), config))
        .collect();

    let (reference_stats, model_stats) = rayon::join(
        || structural_statistics(reference),
        || {
            generated
                .par_iter()
                .map(structural_statistics)
                .collect::<Result<Vec<StructuralStatistics>>>()
        },
    );
    let reference_stats = reference_stats?;
    let model_stats = model_stats?;

    let rows = reference_stats
        .rows()
        .into_iter()
        .enumerate()
        .map(|(i, (name, value))| ComparisonRow {
            statistic: name.to_string(),
            reference: round4(value),
            comparison: model_stats.iter().map(|s| round4(s.rows()[i].1)).collect(),
        })
        .collect();

    let graphs: Vec<(&str, &CompressedGraph)> = std::iter::once(("reference", reference))
        .chain(models.iter().map(|m| m.name()).zip(generated.iter()))
        .collect();

    Ok(ModelComparison {
        parameters,
        models,
        rows,
        degree_distributions: shared_degree_histograms(&graphs, config.comparison_bins),
    })
}

/// Degree histograms of several graphs over common, equal-width bins
fn shared_degree_histograms(graphs: &[(&str, &CompressedGraph)], bins: usize) -> Vec<DegreeSlice> {
    let all_degrees: Vec<f64> = graphs
        .iter()
        .flat_map(|(_, g)| g.degrees())
        .map(|d| d as f64)
        .collect();
    let edges = histogram_with_bin_count(&all_degrees, bins).edges;

    graphs
        .iter()
        .map(|(label, graph)| {
            let degrees: Vec<f64> = graph.degrees().into_iter().map(|d| d as f64).collect();
            DegreeSlice {
                label: label.to_string(),
                node_count: graph.node_count,
                histogram: histogram_with_edges(&degrees, &edges),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> CompressedGraph {
        // two loosely joined rings of 30 nodes
        let mut edges = Vec::new();
        for base in [0u32, 30] {
            for i in 0..30 {
                edges.push((base + i, base + (i + 1) % 30));
                edges.push((base + i, base + (i + 2) % 30));
            }
        }
        edges.push((0, 30));
        CompressedGraph::from_edge_list(60, &edges)
    }

    #[test]
    fn table_lines_up_reference_and_models() {
        let comparison = compare_with_random_models(&reference(), &Config::default()).unwrap();
        assert_eq!(comparison.models.len(), 3);
        assert!(comparison.rows.iter().all(|r| r.comparison.len() == 3));

        let nodes = comparison.rows.iter().find(|r| r.statistic == "node_count").unwrap();
        assert_eq!(nodes.reference, 60.0);
        assert_eq!(nodes.comparison, vec![60.0, 60.0, 60.0]);
    }

    #[test]
    fn degree_distributions_share_bins() {
        let comparison = compare_with_random_models(&reference(), &Config::default()).unwrap();
        let dists = &comparison.degree_distributions;
        assert_eq!(dists.len(), 4);
        assert_eq!(dists[0].label, "reference");
        for d in dists {
            assert_eq!(d.histogram.edges, dists[0].histogram.edges);
            assert_eq!(d.histogram.counts.len(), 30);
            assert_eq!(d.histogram.total(), 60);
        }
    }

    #[test]
    fn comparison_is_reproducible() {
        let config = Config::with_seed(17);
        let a = compare_with_random_models(&reference(), &config).unwrap();
        let b = compare_with_random_models(&reference(), &config).unwrap();
        // NaN never equals itself, so compare the finite cells only
        for (ra, rb) in a.rows.iter().zip(&b.rows) {
            for (x, y) in ra.comparison.iter().zip(&rb.comparison) {
                assert!(x == y || (x.is_nan() && y.is_nan()));
            }
        }
    }
}
