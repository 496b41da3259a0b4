//! Community detection by greedy modularity optimization
//!
//! A single-level local-move optimizer in the spirit of Louvain, without the
//! aggregation phase. Every node starts in its own community; each pass
//! visits every node and moves it into the neighbouring community with the
//! best strictly positive modularity gain.
//!
//! Modularity is recomputed from scratch for every candidate move, giving
//! `O(passes * n * candidates * n^2)` time, which limits it to small and
//! medium graphs.

use crate::adjacency::Adjacency;
use crate::model::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// Community detection parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommunityConfig {
    /// Upper bound on full passes over the node set
    pub max_passes: usize,
    /// Smallest gain that counts as an improvement
    pub min_gain: f64,
}

impl Default for CommunityConfig {
    fn default() -> Self {
        Self {
            max_passes: 10,
            min_gain: 1e-9,
        }
    }
}

/// Partition found by the optimizer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommunityResult {
    /// Modularity of the final partition
    pub modularity: f64,
    /// Communities, largest first
    pub communities: Vec<Vec<NodeId>>,
}

/// Dense view used by the optimizer
struct ModularityGraph {
    neighbors: Vec<Vec<usize>>,
    neighbor_sets: Vec<HashSet<usize>>,
    degrees: Vec<f64>,
    two_m: f64,
}

impl ModularityGraph {
    fn new(adj: &Adjacency<'_>) -> Self {
        let nodes = adj.nodes();
        let index: HashMap<NodeId, usize> =
            nodes.iter().enumerate().map(|(i, &v)| (v, i)).collect();

        let neighbors: Vec<Vec<usize>> = nodes
            .iter()
            .map(|&v| adj.neighbors(v).iter().map(|w| index[w]).collect())
            .collect();
        let neighbor_sets = neighbors
            .iter()
            .map(|list| list.iter().copied().collect())
            .collect();
        let degrees = neighbors.iter().map(|list| list.len() as f64).collect();

        Self {
            neighbors,
            neighbor_sets,
            degrees,
            two_m: 2.0 * adj.raw_edge_count() as f64,
        }
    }

    /// `Q = (1/2m) * sum over same-community pairs (A_ij - k_i*k_j / 2m)`
    fn modularity(&self, labels: &[usize]) -> f64 {
        if self.two_m == 0.0 {
            return 0.0;
        }

        let n = labels.len();
        let mut sum = 0.0;
        for i in 0..n {
            for j in 0..n {
                if labels[i] != labels[j] {
                    continue;
                }
                let a_ij = if self.neighbor_sets[i].contains(&j) {
                    1.0
                } else {
                    0.0
                };
                sum += a_ij - self.degrees[i] * self.degrees[j] / self.two_m;
            }
        }
        sum / self.two_m
    }
}

/// Modularity of an explicit partition.
///
/// Nodes missing from `communities` are treated as singletons.
pub fn modularity(adj: &Adjacency<'_>, communities: &[Vec<NodeId>]) -> f64 {
    let graph = ModularityGraph::new(adj);
    let mut membership: HashMap<NodeId, usize> = HashMap::new();
    for (label, members) in communities.iter().enumerate() {
        for &node in members {
            membership.insert(node, label);
        }
    }

    let offset = communities.len();
    let labels: Vec<usize> = adj
        .nodes()
        .iter()
        .enumerate()
        .map(|(i, node)| membership.get(node).copied().unwrap_or(offset + i))
        .collect();

    graph.modularity(&labels)
}

/// Detect communities by greedy local moves.
///
/// Stops after a pass without any improving move or after
/// `config.max_passes` passes. A graph without edges yields modularity 0
/// and one singleton per node.
pub fn detect_communities(adj: &Adjacency<'_>, config: &CommunityConfig) -> CommunityResult {
    let nodes = adj.nodes();
    let n = nodes.len();

    if adj.raw_edge_count() == 0 {
        return CommunityResult {
            modularity: 0.0,
            communities: nodes.iter().map(|&node| vec![node]).collect(),
        };
    }

    let graph = ModularityGraph::new(adj);
    let mut labels: Vec<usize> = (0..n).collect();
    let mut passes = 0;

    for pass in 0..config.max_passes {
        passes = pass + 1;
        let mut moves = 0;

        for i in 0..n {
            let current = labels[i];
            let base = graph.modularity(&labels);

            let mut candidates: Vec<usize> = Vec::new();
            for &j in &graph.neighbors[i] {
                let label = labels[j];
                if label != current && !candidates.contains(&label) {
                    candidates.push(label);
                }
            }

            let mut best: Option<(usize, f64)> = None;
            for candidate in candidates {
                labels[i] = candidate;
                let gain = graph.modularity(&labels) - base;
                if gain > config.min_gain && best.is_none_or(|(_, best_gain)| gain > best_gain) {
                    best = Some((candidate, gain));
                }
            }

            labels[i] = match best {
                Some((label, _)) => {
                    moves += 1;
                    label
                }
                None => current,
            };
        }

        trace!(pass, moves, "community pass finished");
        if moves == 0 {
            break;
        }
    }

    let modularity = graph.modularity(&labels);

    // Group by label in order of first appearance, then largest first
    let mut slot_of_label: HashMap<usize, usize> = HashMap::new();
    let mut communities: Vec<Vec<NodeId>> = Vec::new();
    for (i, &node) in nodes.iter().enumerate() {
        let slot = *slot_of_label.entry(labels[i]).or_insert_with(|| {
            communities.push(Vec::new());
            communities.len() - 1
        });
        communities[slot].push(node);
    }
    communities.sort_by(|a, b| b.len().cmp(&a.len()));

    debug!(
        nodes = n,
        passes,
        communities = communities.len(),
        modularity,
        "detected communities"
    );

    CommunityResult {
        modularity,
        communities,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GraphSnapshot;

    fn two_triangles() -> GraphSnapshot {
        // Triangles {1,2,3} and {4,5,6} joined by the bridge 3-4
        GraphSnapshot::from_edge_list(
            &[1, 2, 3, 4, 5, 6],
            &[(1, 2), (2, 3), (3, 1), (4, 5), (5, 6), (6, 4), (3, 4)],
        )
    }

    #[test]
    fn test_no_edges_gives_singletons() {
        let snapshot = GraphSnapshot::from_edge_list(&[1, 2, 3], &[]);
        let adj = Adjacency::build(&snapshot);
        let result = detect_communities(&adj, &CommunityConfig::default());

        assert_eq!(result.modularity, 0.0);
        assert_eq!(result.communities.len(), 3);
        assert!(result.communities.iter().all(|c| c.len() == 1));
    }

    #[test]
    fn test_two_triangles_split() {
        let snapshot = two_triangles();
        let adj = Adjacency::build(&snapshot);
        let result = detect_communities(&adj, &CommunityConfig::default());

        assert_eq!(result.communities.len(), 2);
        let mut first = result.communities[0].clone();
        let mut second = result.communities[1].clone();
        first.sort();
        second.sort();
        let mut found = vec![first, second];
        found.sort();
        assert_eq!(
            found,
            vec![
                vec![NodeId(1), NodeId(2), NodeId(3)],
                vec![NodeId(4), NodeId(5), NodeId(6)],
            ]
        );

        // 2 * (3/7 - (7/14)^2) for two symmetric halves
        let expected = 2.0 * (3.0 / 7.0 - 0.25);
        assert!((result.modularity - expected).abs() < 1e-9);
    }

    #[test]
    fn test_modularity_of_explicit_partition() {
        let snapshot = two_triangles();
        let adj = Adjacency::build(&snapshot);

        let all_in_one = vec![adj.nodes().to_vec()];
        assert!(modularity(&adj, &all_in_one).abs() < 1e-12);

        let singletons: Vec<Vec<NodeId>> = adj.nodes().iter().map(|&n| vec![n]).collect();
        assert!(modularity(&adj, &singletons) < 0.0);
    }

    #[test]
    fn test_result_sorted_by_size() {
        // Triangle plus a separate edge plus an isolated node
        let snapshot = GraphSnapshot::from_edge_list(
            &[1, 2, 3, 4, 5, 6],
            &[(4, 5), (1, 2), (2, 3), (3, 1)],
        );
        let adj = Adjacency::build(&snapshot);
        let result = detect_communities(&adj, &CommunityConfig::default());

        let sizes: Vec<usize> = result.communities.iter().map(|c| c.len()).collect();
        assert_eq!(sizes, vec![3, 2, 1]);
        assert!(result.modularity > 0.0);
    }

    #[test]
    fn test_zero_passes_keeps_singletons() {
        let snapshot = two_triangles();
        let adj = Adjacency::build(&snapshot);
        let config = CommunityConfig {
            max_passes: 0,
            ..Default::default()
        };

        let result = detect_communities(&adj, &config);
        assert_eq!(result.communities.len(), 6);
    }
}
