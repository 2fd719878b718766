//! Community detection and community summaries

pub mod detection;
pub mod metrics;

use crate::graph::CompressedGraph;
use crate::stats::degree::Histogram;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Assignment of every node to exactly one community
///
/// Community ids are contiguous, `0..community_count()`, numbered by the
/// first node (in index order) that belongs to each community.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    assignments: Vec<u32>,
    community_count: usize,
}

impl Partition {
    /// Every node in its own community
    pub fn singletons(node_count: usize) -> Self {
        Self {
            assignments: (0..node_count as u32).collect(),
            community_count: node_count,
        }
    }

    /// Build a partition from raw labels, renumbering them contiguously
    pub fn from_assignments(labels: Vec<u32>) -> Self {
        let mut renumbered: HashMap<u32, u32> = HashMap::new();
        let assignments: Vec<u32> = labels
            .iter()
            .map(|label| {
                let next = renumbered.len() as u32;
                *renumbered.entry(*label).or_insert(next)
            })
            .collect();

        Self {
            assignments,
            community_count: renumbered.len(),
        }
    }

    /// Number of nodes covered
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Community id of a node
    pub fn community_of(&self, node: usize) -> u32 {
        self.assignments[node]
    }

    /// Community id of every node, by node index
    pub fn assignments(&self) -> &[u32] {
        &self.assignments
    }

    pub fn community_count(&self) -> usize {
        self.community_count
    }

    /// Members of each community, indexed by community id
    pub fn communities(&self) -> Vec<Vec<u32>> {
        let mut communities = vec![Vec::new(); self.community_count];
        for (node, &community) in self.assignments.iter().enumerate() {
            communities[community as usize].push(node as u32);
        }
        communities
    }

    /// Community sizes, largest first; equal sizes keep ascending id order
    pub fn sizes_descending(&self) -> Vec<(u32, usize)> {
        let mut sizes: Vec<(u32, usize)> = self
            .communities()
            .iter()
            .enumerate()
            .map(|(id, members)| (id as u32, members.len()))
            .collect();
        sizes.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        sizes
    }

    /// The `n` largest communities with their members
    pub fn largest(&self, n: usize) -> Vec<(u32, Vec<u32>)> {
        let mut communities = self.communities();
        self.sizes_descending()
            .into_iter()
            .take(n)
            .map(|(id, _)| (id, std::mem::take(&mut communities[id as usize])))
            .collect()
    }

    /// Node identifier to community id
    pub fn to_id_map(&self, graph: &CompressedGraph) -> BTreeMap<String, u32> {
        self.assignments
            .iter()
            .enumerate()
            .map(|(node, &community)| (graph.node_label(node), community))
            .collect()
    }
}

/// Summary of one community of the film network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunitySummary {
    /// Community id within its partition
    pub id: u32,

    /// Number of member films
    pub size: usize,

    /// Density: actual edges / potential edges
    pub density: f64,

    /// Member identifiers
    pub members: Vec<String>,

    /// Mean revenue of members with known box office
    pub mean_box_office: Option<f64>,

    /// Revenue histogram of members with known box office
    pub box_office_histogram: Histogram,
}
