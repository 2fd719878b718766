//! Louvain community detection by greedy modularity optimization

use crate::cluster::metrics::modularity;
use crate::cluster::Partition;
use crate::config::Config;
use crate::error::{AnalysisError, Result};
use crate::graph::CompressedGraph;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashMap;

/// Smallest modularity gain (in edge-weight units) that counts as an improvement
const MIN_GAIN: f64 = 1e-10;

/// Weighted graph handled by a single Louvain level
struct LevelGraph {
    /// Weighted neighbor lists, excluding self-loops
    adjacency: Vec<Vec<(usize, f64)>>,

    /// Self-loop weight per node (internal weight of an aggregated community)
    self_loops: Vec<f64>,

    /// Weighted degree: neighbor weights plus twice the self-loop
    strength: Vec<f64>,

    /// Total edge weight m
    total_weight: f64,
}

impl LevelGraph {
    fn from_graph(graph: &CompressedGraph) -> Self {
        let adjacency: Vec<Vec<(usize, f64)>> = (0..graph.node_count)
            .map(|u| graph.neighbors(u).iter().map(|&v| (v as usize, 1.0)).collect())
            .collect();
        let strength: Vec<f64> = adjacency.iter().map(|n| n.len() as f64).collect();

        Self {
            total_weight: graph.edge_count() as f64,
            self_loops: vec![0.0; graph.node_count],
            adjacency,
            strength,
        }
    }

    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Collapse each community into a single node
    fn aggregate(&self, community: &[usize], community_count: usize) -> Self {
        let mut links: Vec<HashMap<usize, f64>> = vec![HashMap::new(); community_count];
        let mut self_loops = vec![0.0; community_count];
        let mut strength = vec![0.0; community_count];

        for node in 0..self.node_count() {
            let c = community[node];
            strength[c] += self.strength[node];
            self_loops[c] += self.self_loops[node];

            for &(neighbor, weight) in &self.adjacency[node] {
                let d = community[neighbor];
                if c == d {
                    // each internal edge is seen from both ends
                    self_loops[c] += weight / 2.0;
                } else {
                    *links[c].entry(d).or_insert(0.0) += weight;
                }
            }
        }

        let adjacency = links
            .into_iter()
            .map(|map| {
                let mut list: Vec<(usize, f64)> = map.into_iter().collect();
                list.sort_by_key(|&(n, _)| n);
                list
            })
            .collect();

        Self {
            adjacency,
            self_loops,
            strength,
            total_weight: self.total_weight,
        }
    }
}

/// Result of a Louvain run
#[derive(Debug, Clone)]
pub struct LouvainOutcome {
    /// Final partition of the input graph
    pub partition: Partition,

    /// Modularity of the final partition (NaN for a graph without edges)
    pub modularity: f64,

    /// Modularity after each completed level, non-decreasing
    pub level_modularity: Vec<f64>,

    /// Number of accepted node moves over all levels
    pub moves: usize,
}

/// Greedy modularity optimizer with local moves and community aggregation
#[derive(Debug, Clone)]
pub struct LouvainDetector {
    resolution: f64,
    seed: Option<u64>,
    max_levels: usize,
}

impl Default for LouvainDetector {
    fn default() -> Self {
        Self {
            resolution: 1.0,
            seed: None,
            max_levels: 32,
        }
    }
}

impl LouvainDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Detector configured from the analysis configuration (seeded node order)
    pub fn from_config(config: &Config) -> Self {
        Self::new()
            .with_seed(Some(config.seed))
            .with_resolution(config.louvain_resolution)
            .with_max_levels(config.louvain_max_levels)
    }

    /// Seed for shuffling node visit order; `None` visits nodes in index order
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Weight of the null-model term; above 1 favours smaller communities
    pub fn with_resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    /// Cap on aggregation levels, at least one
    pub fn with_max_levels(mut self, max_levels: usize) -> Self {
        self.max_levels = max_levels.max(1);
        self
    }

    /// Partition the graph into communities
    pub fn detect(&self, graph: &CompressedGraph) -> Result<LouvainOutcome> {
        if graph.node_count == 0 {
            return Err(AnalysisError::EmptyGraph(
                "community detection needs at least one node".to_string(),
            ));
        }

        log::info!(
            "Running Louvain on {} nodes and {} edges",
            graph.node_count,
            graph.edge_count()
        );

        if graph.edge_count() == 0 {
            log::info!("Graph has no edges, every node is its own community");
            return Ok(LouvainOutcome {
                partition: Partition::singletons(graph.node_count),
                modularity: f64::NAN,
                level_modularity: Vec::new(),
                moves: 0,
            });
        }

        let mut rng = self.seed.map(StdRng::seed_from_u64);
        let mut level = LevelGraph::from_graph(graph);
        let mut membership: Vec<usize> = (0..graph.node_count).collect();
        let mut level_modularity = Vec::new();
        let mut total_moves = 0;

        for depth in 0..self.max_levels {
            let mut order: Vec<usize> = (0..level.node_count()).collect();
            if let Some(rng) = rng.as_mut() {
                order.shuffle(rng);
            }

            let (community, moves) = self.move_nodes(&level, &order);
            if moves == 0 {
                log::debug!("Level {}: no improving move, stopping", depth);
                break;
            }
            total_moves += moves;

            let (community, community_count) = renumber(&community);
            for m in membership.iter_mut() {
                *m = community[*m];
            }

            level = level.aggregate(&community, community_count);
            let q = self.level_quality(&level);
            log::debug!(
                "Level {}: {} moves, {} communities, modularity {:.6}",
                depth,
                moves,
                community_count,
                q
            );
            level_modularity.push(q);
        }

        let partition = Partition::from_assignments(membership.iter().map(|&c| c as u32).collect());
        let q = modularity(graph, &partition, self.resolution);

        log::info!(
            "Louvain found {} communities with modularity {:.4}",
            partition.community_count(),
            q
        );

        Ok(LouvainOutcome {
            partition,
            modularity: q,
            level_modularity,
            moves: total_moves,
        })
    }

    /// Local moving phase: repeat passes until a pass accepts no move
    ///
    /// Returns the community of every level node and the number of accepted moves.
    fn move_nodes(&self, level: &LevelGraph, order: &[usize]) -> (Vec<usize>, usize) {
        self.move_nodes_observed(level, order, |_| {})
    }

    /// Local moving phase calling `on_move` with the assignment after every accepted move
    fn move_nodes_observed<F>(
        &self,
        level: &LevelGraph,
        order: &[usize],
        mut on_move: F,
    ) -> (Vec<usize>, usize)
    where
        F: FnMut(&[usize]),
    {
        let n = level.node_count();
        let two_m = 2.0 * level.total_weight;
        let mut community: Vec<usize> = (0..n).collect();
        let mut totals: Vec<f64> = level.strength.clone();

        // scratch space for weights towards neighboring communities
        let mut link_weight = vec![0.0; n];
        let mut touched: Vec<usize> = Vec::new();
        let mut total_moves = 0;

        loop {
            let mut moves = 0;

            for &node in order {
                let current = community[node];
                let k = level.strength[node];

                for &(neighbor, weight) in &level.adjacency[node] {
                    let c = community[neighbor];
                    if link_weight[c] == 0.0 {
                        touched.push(c);
                    }
                    link_weight[c] += weight;
                }

                // take the node out of its community
                totals[current] -= k;

                let gain = |c: usize, w: f64| w - self.resolution * totals[c] * k / two_m;
                let mut best = current;
                let mut best_gain = gain(current, link_weight[current]);

                for &c in &touched {
                    let g = gain(c, link_weight[c]);
                    if g > best_gain + MIN_GAIN {
                        best = c;
                        best_gain = g;
                    }
                }

                totals[best] += k;
                community[node] = best;
                if best != current {
                    moves += 1;
                    on_move(&community);
                }

                for &c in &touched {
                    link_weight[c] = 0.0;
                }
                touched.clear();
            }

            total_moves += moves;
            if moves == 0 {
                break;
            }
        }

        (community, total_moves)
    }

    /// Modularity of the singleton partition of an aggregated level
    fn level_quality(&self, level: &LevelGraph) -> f64 {
        let m = level.total_weight;
        (0..level.node_count())
            .map(|c| {
                let share = level.strength[c] / (2.0 * m);
                level.self_loops[c] / m - self.resolution * share * share
            })
            .sum()
    }
}

/// Renumber community labels to 0..k in order of first appearance
fn renumber(community: &[usize]) -> (Vec<usize>, usize) {
    let mut mapping: HashMap<usize, usize> = HashMap::new();
    let renumbered = community
        .iter()
        .map(|c| {
            let next = mapping.len();
            *mapping.entry(*c).or_insert(next)
        })
        .collect();
    (renumbered, mapping.len())
}

/// Detect communities of a graph with the configured seed and resolution
pub fn detect_communities(graph: &CompressedGraph, config: &Config) -> Result<Partition> {
    Ok(LouvainDetector::from_config(config).detect(graph)?.partition)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two 5-cliques joined by a single bridge edge
    fn barbell() -> CompressedGraph {
        let mut edges = Vec::new();
        for base in [0u32, 5] {
            for i in 0..5 {
                for j in (i + 1)..5 {
                    edges.push((base + i, base + j));
                }
            }
        }
        edges.push((4, 5));
        CompressedGraph::from_edge_list(10, &edges)
    }

    #[test]
    fn splits_barbell_into_cliques() {
        let outcome = LouvainDetector::new().detect(&barbell()).unwrap();
        let p = &outcome.partition;
        assert_eq!(p.community_count(), 2);
        for node in 1..5 {
            assert_eq!(p.community_of(node), p.community_of(0));
        }
        for node in 6..10 {
            assert_eq!(p.community_of(node), p.community_of(5));
        }
        assert_ne!(p.community_of(0), p.community_of(5));
    }

    #[test]
    fn modularity_improves_over_singletons() {
        let graph = barbell();
        let outcome = LouvainDetector::new().with_seed(Some(3)).detect(&graph).unwrap();
        let singleton = modularity(&graph, &Partition::singletons(graph.node_count), 1.0);
        assert!(outcome.modularity >= singleton);
        assert!(outcome.moves > 0);
    }

    #[test]
    fn level_modularity_never_decreases() {
        let graph = barbell();
        let outcome = LouvainDetector::new().with_seed(Some(11)).detect(&graph).unwrap();
        for pair in outcome.level_modularity.windows(2) {
            assert!(pair[1] >= pair[0] - 1e-12);
        }
        let last = *outcome.level_modularity.last().unwrap();
        assert!((last - outcome.modularity).abs() < 1e-9);
    }

    #[test]
    fn same_seed_same_partition() {
        let graph = barbell();
        let a = LouvainDetector::new().with_seed(Some(5)).detect(&graph).unwrap();
        let b = LouvainDetector::new().with_seed(Some(5)).detect(&graph).unwrap();
        assert_eq!(a.partition, b.partition);
    }

    #[test]
    fn edgeless_graph_gives_singletons() {
        let graph = CompressedGraph::from_edge_list(4, &[]);
        let outcome = LouvainDetector::new().detect(&graph).unwrap();
        assert_eq!(outcome.partition.community_count(), 4);
        assert!(outcome.modularity.is_nan());
    }

    #[test]
    fn empty_graph_is_an_error() {
        let graph = CompressedGraph::from_edge_list(0, &[]);
        let err = LouvainDetector::new().detect(&graph).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyGraph(_)));
    }

    #[test]
    fn every_accepted_move_raises_modularity() {
        let mut edges = vec![(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 5), (5, 3), (5, 6)];
        edges.extend([(6, 7), (7, 8), (8, 6), (8, 0), (1, 7)]);
        for graph in [barbell(), CompressedGraph::from_edge_list(9, &edges)] {
            let level = LevelGraph::from_graph(&graph);
            let mut order: Vec<usize> = (0..graph.node_count).collect();
            order.shuffle(&mut StdRng::seed_from_u64(9));

            let detector = LouvainDetector::new();
            let mut previous = modularity(&graph, &Partition::singletons(graph.node_count), 1.0);
            let mut observed = 0;
            let (_, moves) = detector.move_nodes_observed(&level, &order, |community| {
                let labels = community.iter().map(|&c| c as u32).collect();
                let q = modularity(&graph, &Partition::from_assignments(labels), 1.0);
                assert!(q > previous, "move lowered modularity: {} -> {}", previous, q);
                previous = q;
                observed += 1;
            });
            assert!(moves > 0);
            assert_eq!(observed, moves);
        }
    }

    #[test]
    fn resolution_controls_community_count() {
        let graph = barbell();
        let count = |resolution: f64| {
            LouvainDetector::new()
                .with_resolution(resolution)
                .detect(&graph)
                .unwrap()
                .partition
                .community_count()
        };
        assert_eq!(count(0.01), 1);
        assert_eq!(count(1.0), 2);
        assert_eq!(count(10.0), 10);
    }

    #[test]
    fn max_levels_caps_aggregation() {
        let outcome = LouvainDetector::new()
            .with_max_levels(1)
            .detect(&barbell())
            .unwrap();
        assert!(outcome.level_modularity.len() <= 1);

        let zero = LouvainDetector::new().with_max_levels(0).detect(&barbell()).unwrap();
        assert_eq!(zero.level_modularity.len(), 1);
    }

    #[test]
    fn config_drives_detector() {
        let config = Config {
            louvain_resolution: 10.0,
            ..Config::default()
        };
        let partition = detect_communities(&barbell(), &config).unwrap();
        assert_eq!(partition.community_count(), 10);
    }

    #[test]
    fn covers_every_node() {
        let graph = CompressedGraph::from_edge_list(7, &[(0, 1), (1, 2), (3, 4)]);
        let partition = detect_communities(&graph, &Config::default()).unwrap();
        assert_eq!(partition.len(), 7);
        let total: usize = partition.communities().iter().map(|c| c.len()).sum();
        assert_eq!(total, 7);
    }
}
