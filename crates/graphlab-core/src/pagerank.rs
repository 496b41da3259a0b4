//! PageRank by power iteration over the directed view
//!
//! The iteration count is fixed; there is no convergence check. Nodes with
//! no outgoing edges pass nothing on and their mass is not redistributed,
//! so a graph without edges settles at `(1 - damping) / N` for every node
//! after the first iteration rather than `1 / N`.

use crate::adjacency::Adjacency;
use crate::model::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// PageRank parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRankConfig {
    /// Number of power iterations
    pub iterations: usize,
    /// Damping factor
    pub damping: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            iterations: 50,
            damping: 0.85,
        }
    }
}

/// Score of a single node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRankEntry {
    /// Ranked node
    pub node_id: NodeId,
    /// PageRank score
    pub score: f64,
}

/// Calculate PageRank for all nodes.
///
/// Returns entries sorted by score, highest first. Ties keep snapshot order.
pub fn pagerank(adj: &Adjacency<'_>, config: &PageRankConfig) -> Vec<PageRankEntry> {
    let nodes = adj.nodes();
    let n = nodes.len();
    if n == 0 {
        return Vec::new();
    }

    let index: HashMap<NodeId, usize> = nodes.iter().enumerate().map(|(i, &v)| (v, i)).collect();

    // Reverse graph: one entry per incoming edge, parallel edges repeated
    let mut incoming: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut out_degrees: Vec<usize> = vec![0; n];
    for (i, &node) in nodes.iter().enumerate() {
        let links = adj.outgoing(node);
        out_degrees[i] = links.len();
        for link in links {
            incoming[index[&link.target]].push(i);
        }
    }

    let n_f64 = n as f64;
    let damping = config.damping;
    let teleport = (1.0 - damping) / n_f64;
    let mut ranks = vec![1.0 / n_f64; n];
    let mut next = vec![0.0; n];

    for _ in 0..config.iterations {
        for (i, slot) in next.iter_mut().enumerate() {
            let mut inflow = 0.0;
            for &s in &incoming[i] {
                inflow += ranks[s] / out_degrees[s] as f64;
            }
            *slot = teleport + damping * inflow;
        }
        std::mem::swap(&mut ranks, &mut next);
    }

    let mut entries: Vec<PageRankEntry> = nodes
        .iter()
        .zip(ranks)
        .map(|(&node_id, score)| PageRankEntry { node_id, score })
        .collect();
    entries.sort_by(|a, b| b.score.total_cmp(&a.score));

    debug!(
        nodes = n,
        iterations = config.iterations,
        damping,
        "computed pagerank"
    );

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GraphSnapshot;

    fn scores(entries: &[PageRankEntry]) -> HashMap<NodeId, f64> {
        entries.iter().map(|e| (e.node_id, e.score)).collect()
    }

    #[test]
    fn test_pagerank_no_edges_is_teleport_only() {
        let snapshot = GraphSnapshot::from_edge_list(&[1, 2, 3, 4], &[]);
        let adj = Adjacency::build(&snapshot);

        for iterations in [1, 2, 50] {
            let config = PageRankConfig {
                iterations,
                ..Default::default()
            };
            let ranks = pagerank(&adj, &config);
            assert_eq!(ranks.len(), 4);
            for entry in &ranks {
                assert_eq!(entry.score, (1.0 - 0.85) / 4.0);
            }
        }
    }

    #[test]
    fn test_pagerank_zero_iterations_keeps_uniform() {
        let snapshot = GraphSnapshot::from_edge_list(&[1, 2], &[(1, 2)]);
        let adj = Adjacency::build(&snapshot);
        let config = PageRankConfig {
            iterations: 0,
            damping: 0.85,
        };

        for entry in pagerank(&adj, &config) {
            assert_eq!(entry.score, 0.5);
        }
    }

    #[test]
    fn test_pagerank_sink_ranks_highest() {
        let snapshot = GraphSnapshot::from_edge_list(&[1, 2, 3], &[(1, 3), (2, 3)]);
        let adj = Adjacency::build(&snapshot);
        let ranks = pagerank(&adj, &PageRankConfig::default());

        assert_eq!(ranks[0].node_id, NodeId(3));
        let by_node = scores(&ranks);
        let teleport = 0.15 / 3.0;
        assert!((by_node[&NodeId(1)] - teleport).abs() < 1e-12);
        assert!((by_node[&NodeId(3)] - (teleport + 0.85 * 2.0 * teleport)).abs() < 1e-12);
    }

    #[test]
    fn test_pagerank_cycle_is_uniform() {
        let snapshot = GraphSnapshot::from_edge_list(&[1, 2, 3], &[(1, 2), (2, 3), (3, 1)]);
        let adj = Adjacency::build(&snapshot);
        let ranks = pagerank(&adj, &PageRankConfig::default());

        for entry in &ranks {
            assert!((entry.score - 1.0 / 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_pagerank_sorted_descending() {
        let snapshot =
            GraphSnapshot::from_edge_list(&[1, 2, 3, 4], &[(1, 2), (3, 2), (4, 2), (2, 1)]);
        let adj = Adjacency::build(&snapshot);
        let ranks = pagerank(&adj, &PageRankConfig::default());

        for pair in ranks.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        assert_eq!(ranks[0].node_id, NodeId(2));
    }

    #[test]
    fn test_pagerank_empty_graph() {
        let snapshot = GraphSnapshot::default();
        let adj = Adjacency::build(&snapshot);
        assert!(pagerank(&adj, &PageRankConfig::default()).is_empty());
    }
}
