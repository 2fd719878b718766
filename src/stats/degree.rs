//! Histograms and degree distributions, overall and sliced by node category

use crate::config::Config;
use crate::data::preprocessing::genre_list;
use crate::data::BoxOfficeBucket;
use crate::error::{AnalysisError, Result};
use crate::graph::CompressedGraph;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Binned counts: `counts[i]` covers `[edges[i], edges[i+1])`, the last bin is closed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Total number of values counted
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Histogram over explicit bin edges; values outside the edges are ignored
pub fn histogram_with_edges(values: &[f64], edges: &[f64]) -> Histogram {
    let bins = edges.len().saturating_sub(1);
    let mut counts = vec![0; bins];

    if bins > 0 {
        let (first, last) = (edges[0], edges[bins]);
        for &v in values {
            if !(first..=last).contains(&v) {
                continue;
            }
            let idx = edges.partition_point(|&e| e <= v).saturating_sub(1).min(bins - 1);
            counts[idx] += 1;
        }
    }

    Histogram {
        edges: edges.to_vec(),
        counts,
    }
}

/// Histogram with a fixed number of equal-width bins spanning the data range
pub fn histogram_with_bin_count(values: &[f64], bins: usize) -> Histogram {
    let bins = bins.max(1);
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();

    let (mut lo, mut hi) = finite
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if finite.is_empty() {
        (lo, hi) = (0.0, 1.0);
    } else if lo == hi {
        (lo, hi) = (lo - 0.5, hi + 0.5);
    }

    let width = (hi - lo) / bins as f64;
    let mut edges: Vec<f64> = (0..bins).map(|i| lo + width * i as f64).collect();
    edges.push(hi);

    histogram_with_edges(&finite, &edges)
}

/// Histogram with one unit-width bin per integer value from 0 to the maximum
pub fn integer_histogram(values: &[usize]) -> Histogram {
    let max = values.iter().copied().max().unwrap_or(0);
    let edges: Vec<f64> = (0..=max + 1).map(|e| e as f64).collect();
    let values: Vec<f64> = values.iter().map(|&v| v as f64).collect();
    histogram_with_edges(&values, &edges)
}

/// Degree distribution of the whole graph, one bin per degree value
pub fn degree_distribution(graph: &CompressedGraph) -> Histogram {
    integer_histogram(&graph.degrees())
}

/// Node attribute used to slice a degree distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SliceBy {
    BoxOffice,
    Genre,
    Community,
}

/// Degree distribution of the nodes in one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegreeSlice {
    /// Category label
    pub label: String,

    /// Nodes in the category
    pub node_count: usize,

    pub histogram: Histogram,
}

fn require_attributes(graph: &CompressedGraph) -> Result<()> {
    if graph.attributes.is_none() {
        return Err(AnalysisError::InvalidCategory(
            "graph carries no film attributes to slice by".to_string(),
        ));
    }
    Ok(())
}

/// Degree slice over the nodes accepted by `filter`
fn slice_where<F>(graph: &CompressedGraph, label: String, bins: usize, filter: F) -> DegreeSlice
where
    F: Fn(usize) -> bool,
{
    let degrees: Vec<f64> = (0..graph.node_count)
        .filter(|&n| filter(n))
        .map(|n| graph.degree(n) as f64)
        .collect();

    DegreeSlice {
        label,
        node_count: degrees.len(),
        histogram: histogram_with_bin_count(&degrees, bins),
    }
}

/// Degree distribution of the films in one box-office band
pub fn degree_distribution_for_bucket(
    graph: &CompressedGraph,
    bucket: BoxOfficeBucket,
    bins: usize,
) -> Result<DegreeSlice> {
    require_attributes(graph)?;
    Ok(slice_where(graph, bucket.label().to_string(), bins, |n| {
        graph.attributes(n).and_then(|a| a.bucket) == Some(bucket)
    }))
}

/// Degree distribution of the films of one genre
pub fn degree_distribution_for_genre(
    graph: &CompressedGraph,
    genre: &str,
    bins: usize,
) -> Result<DegreeSlice> {
    require_attributes(graph)?;
    let present = (0..graph.node_count)
        .any(|n| graph.attributes(n).is_some_and(|a| a.has_genre(genre)));
    if !present {
        return Err(AnalysisError::InvalidCategory(format!("genre '{}' not present", genre)));
    }

    Ok(slice_where(graph, genre.to_string(), bins, |n| {
        graph.attributes(n).is_some_and(|a| a.has_genre(genre))
    }))
}

/// Genres eligible for per-genre slices
pub fn slice_genres(graph: &CompressedGraph, config: &Config) -> Vec<String> {
    let all = graph
        .attributes
        .iter()
        .flatten()
        .flat_map(|a| a.genres.iter());
    genre_list(all, &config.excluded_genres)
}

/// Community ids with at least `min_size` members, ascending
pub fn large_communities(graph: &CompressedGraph, min_size: usize) -> Result<Vec<u32>> {
    if !graph.has_communities() {
        return Err(AnalysisError::InvalidCategory(
            "graph has no community assignment".to_string(),
        ));
    }

    let mut sizes: BTreeMap<u32, usize> = BTreeMap::new();
    for n in 0..graph.node_count {
        if let Some(c) = graph.attributes(n).and_then(|a| a.community) {
            *sizes.entry(c).or_insert(0) += 1;
        }
    }
    Ok(sizes
        .into_iter()
        .filter(|&(_, size)| size >= min_size)
        .map(|(c, _)| c)
        .collect())
}

/// Degree distributions of the film network, one per category of `slice`
///
/// Every slice uses `config.comparison_bins` bins. Community slices skip
/// communities smaller than `config.min_community_size`.
pub fn degree_distribution_by(
    graph: &CompressedGraph,
    slice: SliceBy,
    config: &Config,
) -> Result<Vec<DegreeSlice>> {
    require_attributes(graph)?;
    let bins = config.comparison_bins;

    let slices = match slice {
        SliceBy::BoxOffice => BoxOfficeBucket::ALL
            .par_iter()
            .map(|&bucket| degree_distribution_for_bucket(graph, bucket, bins))
            .collect::<Result<Vec<_>>>()?,
        SliceBy::Genre => slice_genres(graph, config)
            .par_iter()
            .map(|genre| degree_distribution_for_genre(graph, genre, bins))
            .collect::<Result<Vec<_>>>()?,
        SliceBy::Community => large_communities(graph, config.min_community_size)?
            .par_iter()
            .map(|&community| {
                slice_where(graph, community.to_string(), bins, |n| {
                    graph.attributes(n).and_then(|a| a.community) == Some(community)
                })
            })
            .collect(),
    };

    log::debug!("Computed {} degree slices by {:?}", slices.len(), slice);
    Ok(slices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::Partition;
    use crate::graph::FilmAttributes;

    #[test]
    fn explicit_edges_match_known_sequence() {
        let degrees = [0.0, 1.0, 1.0, 2.0, 2.0, 3.0];
        let hist = histogram_with_edges(&degrees, &[0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(hist.counts, vec![1, 2, 2, 1]);
    }

    #[test]
    fn last_bin_is_closed() {
        let hist = histogram_with_edges(&[0.0, 1.0, 2.0, 2.0, 5.0], &[0.0, 1.0, 2.0]);
        assert_eq!(hist.counts, vec![1, 3]);
    }

    #[test]
    fn integer_histogram_has_a_bin_per_degree() {
        let hist = integer_histogram(&[0, 1, 1, 2, 2, 3]);
        assert_eq!(hist.edges, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(hist.counts, vec![1, 2, 2, 1]);
    }

    #[test]
    fn fixed_bins_cover_all_values() {
        let values: Vec<f64> = (0..100).map(|v| v as f64).collect();
        let hist = histogram_with_bin_count(&values, 30);
        assert_eq!(hist.counts.len(), 30);
        assert_eq!(hist.edges.len(), 31);
        assert_eq!(hist.total(), 100);
    }

    #[test]
    fn degenerate_ranges() {
        let constant = histogram_with_bin_count(&[4.0, 4.0], 3);
        assert_eq!(constant.total(), 2);
        assert_eq!(constant.edges[0], 3.5);

        let empty = histogram_with_bin_count(&[], 30);
        assert_eq!(empty.total(), 0);
        assert_eq!(empty.counts.len(), 30);
    }

    fn attributed_graph() -> CompressedGraph {
        let mut graph = CompressedGraph::from_edge_list(4, &[(0, 1), (1, 2), (1, 3)]);
        let genres = [vec!["Drama"], vec!["Drama", "Horror"], vec!["Horror"], vec!["War"]];
        let buckets = [
            Some(BoxOfficeBucket::Low),
            Some(BoxOfficeBucket::VeryHigh),
            None,
            Some(BoxOfficeBucket::Low),
        ];
        graph.attributes = Some(
            genres
                .iter()
                .zip(buckets)
                .map(|(g, bucket)| FilmAttributes {
                    genres: g.iter().map(|s| s.to_string()).collect(),
                    bucket,
                    ..FilmAttributes::default()
                })
                .collect(),
        );
        graph
    }

    #[test]
    fn box_office_slices_cover_all_bands() {
        let slices = degree_distribution_by(&attributed_graph(), SliceBy::BoxOffice, &Config::default()).unwrap();
        assert_eq!(slices.len(), 5);
        assert_eq!(slices[1].label, "low box office");
        assert_eq!(slices[1].node_count, 2);
        assert_eq!(slices[4].node_count, 1);
        assert_eq!(slices[0].histogram.total(), 0);
    }

    #[test]
    fn genre_slices_skip_excluded_genres() {
        let slices = degree_distribution_by(&attributed_graph(), SliceBy::Genre, &Config::default()).unwrap();
        let labels: Vec<&str> = slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Drama", "Horror"]);
        assert!(slices.iter().all(|s| s.histogram.counts.len() == 30));
    }

    #[test]
    fn unknown_genre_is_invalid() {
        let err = degree_distribution_for_genre(&attributed_graph(), "Western", 30).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidCategory(_)));
    }

    #[test]
    fn community_slices_need_assignment_and_size() {
        let graph = attributed_graph();
        let config = Config { min_community_size: 2, ..Config::default() };
        assert!(degree_distribution_by(&graph, SliceBy::Community, &config).is_err());

        let graph = graph
            .with_communities(&Partition::from_assignments(vec![0, 0, 0, 1]))
            .unwrap();
        let slices = degree_distribution_by(&graph, SliceBy::Community, &config).unwrap();
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].label, "0");
        assert_eq!(slices[0].node_count, 3);
    }

    #[test]
    fn plain_graph_cannot_be_sliced() {
        let graph = CompressedGraph::from_edge_list(2, &[(0, 1)]);
        assert!(degree_distribution_by(&graph, SliceBy::BoxOffice, &Config::default()).is_err());
    }
}
