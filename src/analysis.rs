//! End-to-end analysis of a film corpus
//!
//! Builds both networks, detects communities on the film network, and
//! gathers every statistic the presentation layer consumes into one
//! serializable [`AnalysisReport`].

use crate::cluster::detection::LouvainDetector;
use crate::cluster::metrics::summarize_largest_communities;
use crate::cluster::CommunitySummary;
use crate::config::Config;
use crate::data::preprocessing::{assign_box_office_buckets, average_cast_size, box_office_histogram};
use crate::data::FilmRecord;
use crate::error::Result;
use crate::graph::{build_networks, CompressedGraph};
use crate::stats::centrality::{
    centrality_rankings_by_genre, least_connected, most_connected, CentralityRankings,
    CentralityScores, GenreRankings,
};
use crate::stats::compare::{compare_with_random_models, ModelComparison};
use crate::stats::degree::{degree_distribution, degree_distribution_by, DegreeSlice, Histogram, SliceBy};
use crate::stats::structure::{
    average_neighbor_degree, box_office_assortativity, community_assortativity,
    structural_statistics, StructuralStatistics,
};
use crate::stats::{round4, RankedNode};
use serde::Serialize;
use std::collections::BTreeMap;

/// Corpus-level figures
#[derive(Debug, Clone, Serialize)]
pub struct CorpusSummary {
    /// Nodes of the film network
    pub film_count: usize,

    /// Nodes of the actor network
    pub actor_count: usize,

    /// Film pairs sharing at least one actor
    pub film_edges: usize,

    /// Actor pairs sharing at least one film
    pub actor_edges: usize,

    /// Mean credited actors per film
    pub average_cast_size: f64,

    /// Revenue histogram of films with known box office
    pub box_office_histogram: Histogram,

    /// Film network assortativity by box-office band (NaN when undefined)
    pub box_office_assortativity: f64,

    /// Film network assortativity by community (NaN when undefined)
    pub community_assortativity: f64,
}

/// Size of one community of the film network
#[derive(Debug, Clone, Serialize)]
pub struct CommunitySize {
    /// Community id within the partition
    pub id: u32,

    /// Number of member films
    pub size: usize,
}

/// Partition of the film network and its largest communities
#[derive(Debug, Clone, Serialize)]
pub struct CommunityReport {
    pub community_count: usize,
    pub modularity: f64,

    /// Film identifier to community id
    pub assignments: BTreeMap<String, u32>,

    /// Community sizes, largest first
    pub sizes: Vec<CommunitySize>,

    pub largest: Vec<CommunitySummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DegreeDistributions {
    pub film: Histogram,
    pub actor: Histogram,
    pub by_box_office: Vec<DegreeSlice>,
    pub by_genre: Vec<DegreeSlice>,
    pub by_community: Vec<DegreeSlice>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CentralityReport {
    pub overall: CentralityRankings,
    pub by_genre: Vec<GenreRankings>,
    pub most_connected_films: Vec<RankedNode>,
    pub least_connected_films: Vec<RankedNode>,
    pub most_connected_actors: Vec<RankedNode>,
    pub least_connected_actors: Vec<RankedNode>,
}

/// Everything computed in one analysis run
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub summary: CorpusSummary,
    pub communities: CommunityReport,
    pub degree_distributions: DegreeDistributions,
    pub centrality: CentralityReport,
    pub film_structure: StructuralStatistics,
    pub actor_structure: StructuralStatistics,

    /// Average neighbor degree of every film
    pub average_neighbor_degree: BTreeMap<String, f64>,

    /// Absent when random model comparison is disabled
    pub comparison: Option<ModelComparison>,
}

/// Run the full analysis over a set of film records
///
/// Fails if the corpus is empty, if any record lacks an identifier, or if
/// the film network has no edges (eigenvector centrality is undefined).
pub fn run_analysis(records: Vec<FilmRecord>, config: &Config) -> Result<AnalysisReport> {
    log::info!("Analysing {} film records", records.len());
    let records = assign_box_office_buckets(records);
    let cast_size = average_cast_size(&records)?;

    let networks = build_networks(&records)?;
    log::info!(
        "Film network: {} nodes, {} edges; actor network: {} nodes, {} edges",
        networks.film.node_count,
        networks.film.edge_count(),
        networks.actor.node_count,
        networks.actor.edge_count()
    );

    let louvain = LouvainDetector::from_config(config).detect(&networks.film)?;
    log::info!(
        "Detected {} communities with modularity {:.4}",
        louvain.partition.community_count(),
        louvain.modularity
    );
    let partition = louvain.partition;
    let film = networks.film.with_communities(&partition)?;
    let actor = networks.actor;

    let communities = CommunityReport {
        community_count: partition.community_count(),
        modularity: round4(louvain.modularity),
        assignments: partition.to_id_map(&film),
        sizes: partition
            .sizes_descending()
            .into_iter()
            .map(|(id, size)| CommunitySize { id, size })
            .collect(),
        largest: summarize_largest_communities(
            &film,
            &partition,
            config.largest_communities,
            config.comparison_bins,
        ),
    };

    let degree_distributions = DegreeDistributions {
        film: degree_distribution(&film),
        actor: degree_distribution(&actor),
        by_box_office: degree_distribution_by(&film, SliceBy::BoxOffice, config)?,
        by_genre: degree_distribution_by(&film, SliceBy::Genre, config)?,
        by_community: degree_distribution_by(&film, SliceBy::Community, config)?,
    };

    let scores = CentralityScores::compute(&film, config)?;
    let centrality = CentralityReport {
        overall: scores.rankings(&film, config.top_k, |_| true),
        by_genre: centrality_rankings_by_genre(&film, &scores, config),
        most_connected_films: most_connected(&film, config.top_k),
        least_connected_films: least_connected(&film, config.top_k),
        most_connected_actors: most_connected(&actor, config.top_k),
        least_connected_actors: least_connected(&actor, config.top_k),
    };

    let (film_structure, actor_structure) = rayon::join(
        || structural_statistics(&film),
        || structural_statistics(&actor),
    );

    let summary = CorpusSummary {
        film_count: film.node_count,
        actor_count: actor.node_count,
        film_edges: film.edge_count(),
        actor_edges: actor.edge_count(),
        average_cast_size: round4(cast_size),
        box_office_histogram: box_office_histogram(&records, config.comparison_bins),
        box_office_assortativity: round4(box_office_assortativity(&film)?),
        community_assortativity: round4(community_assortativity(&film)?),
    };

    let comparison = if config.compare_random_models {
        Some(compare_with_random_models(&film, config)?)
    } else {
        log::info!("Skipping random model comparison");
        None
    };

    Ok(AnalysisReport {
        summary,
        communities,
        degree_distributions,
        centrality,
        film_structure: film_structure?,
        actor_structure: actor_structure?,
        average_neighbor_degree: neighbor_degree_map(&film),
        comparison,
    })
}

fn neighbor_degree_map(graph: &CompressedGraph) -> BTreeMap<String, f64> {
    average_neighbor_degree(graph)
        .into_iter()
        .enumerate()
        .map(|(n, value)| (graph.node_label(n), round4(value)))
        .collect()
}
