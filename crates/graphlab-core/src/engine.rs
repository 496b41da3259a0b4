//! Analytics engine facade
//!
//! Borrows one snapshot, builds its adjacency once and exposes every
//! analysis as a method. Each call is independent and returns a freshly
//! owned result record.

use crate::adjacency::Adjacency;
use crate::centrality::{self, CentralityOptions, NodeMetrics};
use crate::community::{self, CommunityResult};
use crate::config::AnalyticsConfig;
use crate::metrics::{self, SummaryStats};
use crate::model::{GraphSnapshot, NodeId};
use crate::pagerank::{self, PageRankEntry};
use crate::path::{self, KPathsResult, PathAlgorithm, PathResult};
use crate::Result;

/// Read-only analytics over a borrowed snapshot
#[derive(Debug, Clone)]
pub struct AnalyticsEngine<'a> {
    adjacency: Adjacency<'a>,
    config: AnalyticsConfig,
}

impl<'a> AnalyticsEngine<'a> {
    /// Create an engine with default parameters
    pub fn new(snapshot: &'a GraphSnapshot) -> Self {
        Self::with_config(snapshot, AnalyticsConfig::default())
    }

    /// Create an engine with explicit parameters
    pub fn with_config(snapshot: &'a GraphSnapshot, config: AnalyticsConfig) -> Self {
        Self {
            adjacency: Adjacency::build(snapshot),
            config,
        }
    }

    /// Validate snapshot and parameters before building the engine
    pub fn try_new(snapshot: &'a GraphSnapshot, config: AnalyticsConfig) -> Result<Self> {
        snapshot.validate()?;
        config.validate()?;
        Ok(Self::with_config(snapshot, config))
    }

    /// Adjacency built from the snapshot
    pub fn adjacency(&self) -> &Adjacency<'a> {
        &self.adjacency
    }

    /// Parameters in use
    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Node count, edge count, density, diameter and components
    pub fn summary(&self) -> SummaryStats {
        metrics::summary(&self.adjacency)
    }

    /// Per-node degree metrics plus the requested optional measures
    pub fn node_metrics(&self, options: CentralityOptions) -> Vec<NodeMetrics> {
        centrality::node_metrics(&self.adjacency, options)
    }

    /// Per-node metrics using the configured centrality options
    pub fn default_node_metrics(&self) -> Vec<NodeMetrics> {
        self.node_metrics(self.config.centrality)
    }

    /// PageRank scores, highest first
    pub fn pagerank(&self) -> Vec<PageRankEntry> {
        pagerank::pagerank(&self.adjacency, &self.config.pagerank)
    }

    /// Greedy modularity partition
    pub fn communities(&self) -> CommunityResult {
        community::detect_communities(&self.adjacency, &self.config.community)
    }

    /// Single route using the chosen algorithm
    pub fn shortest_path(
        &self,
        source: NodeId,
        target: NodeId,
        algorithm: PathAlgorithm,
    ) -> Result<PathResult> {
        match algorithm {
            PathAlgorithm::Dijkstra => path::dijkstra(&self.adjacency, source, target),
            PathAlgorithm::AStar => {
                path::astar(&self.adjacency, source, target, self.config.paths.heuristic)
            }
            PathAlgorithm::Bfs => path::bfs_path(&self.adjacency, source, target),
        }
    }

    /// Up to `paths.k` loopless routes, lightest first
    pub fn k_shortest_paths(&self, source: NodeId, target: NodeId) -> Result<KPathsResult> {
        path::k_shortest_paths(&self.adjacency, source, target, self.config.paths.k)
    }

    /// Up to `paths.max_paths` simple routes in DFS order
    pub fn all_paths(&self, source: NodeId, target: NodeId) -> Result<KPathsResult> {
        path::all_paths(
            &self.adjacency,
            source,
            target,
            self.config.paths.max_paths,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Edge, Node};
    use crate::Error;

    #[test]
    fn test_engine_runs_every_analysis() {
        let snapshot = GraphSnapshot::from_edge_list(&[1, 2, 3, 4], &[(1, 2), (2, 3), (3, 4), (4, 1)]);
        let engine = AnalyticsEngine::new(&snapshot);

        assert_eq!(engine.summary().diameter, 2);
        assert_eq!(engine.default_node_metrics().len(), 4);
        assert_eq!(engine.pagerank().len(), 4);
        assert!(!engine.communities().communities.is_empty());

        let route = engine
            .shortest_path(NodeId(1), NodeId(3), PathAlgorithm::Dijkstra)
            .unwrap();
        assert_eq!(route.hop_count(), 2);

        let hops = engine
            .shortest_path(NodeId(1), NodeId(4), PathAlgorithm::Bfs)
            .unwrap();
        assert_eq!(hops.hop_count(), 1);

        assert!(!engine.k_shortest_paths(NodeId(1), NodeId(3)).unwrap().paths.is_empty());
        assert_eq!(engine.all_paths(NodeId(1), NodeId(3)).unwrap().paths.len(), 2);
    }

    #[test]
    fn test_try_new_rejects_malformed_snapshot() {
        let snapshot = GraphSnapshot::default()
            .with_node(Node::new(1))
            .with_node(Node::new(2))
            .with_edge(Edge::weighted(1, 1, 2, f64::NAN));

        assert!(matches!(
            AnalyticsEngine::try_new(&snapshot, AnalyticsConfig::default()),
            Err(Error::InvalidWeight { .. })
        ));
    }

    #[test]
    fn test_try_new_rejects_reused_edge_id() {
        let snapshot = GraphSnapshot::from_edge_list(&[1, 2, 3], &[])
            .with_edge(Edge::weighted(1, 1, 2, 1.0))
            .with_edge(Edge::weighted(1, 2, 3, 5.0))
            .with_edge(Edge::weighted(2, 1, 3, 3.0));

        assert!(matches!(
            AnalyticsEngine::try_new(&snapshot, AnalyticsConfig::default()),
            Err(Error::DuplicateEdge(_))
        ));
    }

    #[test]
    fn test_configured_k() {
        let snapshot = GraphSnapshot::from_edge_list(&[1, 2, 3], &[(1, 2), (2, 3), (1, 3)]);
        let mut config = AnalyticsConfig::default();
        config.paths.k = 1;
        let engine = AnalyticsEngine::with_config(&snapshot, config);

        let result = engine.k_shortest_paths(NodeId(1), NodeId(3)).unwrap();
        assert_eq!(result.paths.len(), 1);
        assert_eq!(result.paths[0].node_ids, vec![NodeId(1), NodeId(3)]);
    }
}
