//! Adjacency construction
//!
//! Turns a snapshot's flat node and edge lists into the two views the
//! algorithms consume:
//! - a directed view (outgoing links, one entry per edge, parallel edges kept)
//! - an undirected view (neighbour ids reachable through either direction,
//!   de-duplicated)
//!
//! Every node of the snapshot is a key of both views, even when isolated.
//! Edges whose source or target is not part of the node set are dropped
//! without error; the number of dropped edges is logged at `debug` level.

use crate::model::{Edge, GraphSnapshot, NodeId, Position};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Outgoing link in the directed view
#[derive(Debug, Clone, Copy)]
pub struct Link<'a> {
    /// Node reached by following the edge
    pub target: NodeId,
    /// Edge that was followed
    pub edge: &'a Edge,
}

impl Link<'_> {
    /// Effective weight of the underlying edge
    pub fn weight(&self) -> f64 {
        self.edge.weight()
    }
}

/// Directed and undirected adjacency over a borrowed snapshot
#[derive(Debug, Clone)]
pub struct Adjacency<'a> {
    snapshot: &'a GraphSnapshot,
    /// Node ids in snapshot order (first occurrence wins on duplicates)
    nodes: Vec<NodeId>,
    /// Key: node_id, Value: outgoing links in edge order
    directed: HashMap<NodeId, Vec<Link<'a>>>,
    /// Key: node_id, Value: distinct neighbours in first-seen order
    undirected: HashMap<NodeId, Vec<NodeId>>,
    positions: HashMap<NodeId, Position>,
    dropped_edges: usize,
}

impl<'a> Adjacency<'a> {
    /// Build both adjacency views for a snapshot
    pub fn build(snapshot: &'a GraphSnapshot) -> Self {
        let mut nodes = Vec::with_capacity(snapshot.nodes.len());
        let mut directed: HashMap<NodeId, Vec<Link<'a>>> =
            HashMap::with_capacity(snapshot.nodes.len());
        let mut undirected: HashMap<NodeId, Vec<NodeId>> =
            HashMap::with_capacity(snapshot.nodes.len());
        let mut positions = HashMap::new();

        for node in &snapshot.nodes {
            if directed.contains_key(&node.id) {
                continue;
            }
            nodes.push(node.id);
            directed.insert(node.id, Vec::new());
            undirected.insert(node.id, Vec::new());
            if let Some(position) = node.position {
                positions.insert(node.id, position);
            }
        }

        let mut seen_pairs: HashSet<(NodeId, NodeId)> = HashSet::new();
        let mut dropped_edges = 0;

        for edge in &snapshot.edges {
            if !directed.contains_key(&edge.source) || !directed.contains_key(&edge.target) {
                dropped_edges += 1;
                continue;
            }

            if let Some(links) = directed.get_mut(&edge.source) {
                links.push(Link {
                    target: edge.target,
                    edge,
                });
            }

            for (from, to) in [(edge.source, edge.target), (edge.target, edge.source)] {
                if seen_pairs.insert((from, to)) {
                    if let Some(neighbors) = undirected.get_mut(&from) {
                        neighbors.push(to);
                    }
                }
            }
        }

        debug!(
            nodes = nodes.len(),
            edges = snapshot.edges.len(),
            dropped_edges,
            "built adjacency"
        );

        Self {
            snapshot,
            nodes,
            directed,
            undirected,
            positions,
            dropped_edges,
        }
    }

    /// Node ids in snapshot order
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Number of distinct nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Edges exactly as supplied, including dropped ones
    pub fn raw_edges(&self) -> &'a [Edge] {
        &self.snapshot.edges
    }

    /// Number of edges as supplied
    pub fn raw_edge_count(&self) -> usize {
        self.snapshot.edges.len()
    }

    /// Number of edges skipped because an endpoint is unknown
    pub fn dropped_edge_count(&self) -> usize {
        self.dropped_edges
    }

    /// Check if a node exists
    pub fn has_node(&self, node: NodeId) -> bool {
        self.directed.contains_key(&node)
    }

    /// Outgoing links of a node, empty for unknown nodes
    pub fn outgoing(&self, node: NodeId) -> &[Link<'a>] {
        self.directed
            .get(&node)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Distinct neighbours in either direction, empty for unknown nodes
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        self.undirected
            .get(&node)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Position of a node, if the snapshot carries one
    pub fn position(&self, node: NodeId) -> Option<Position> {
        self.positions.get(&node).copied()
    }

    /// Directed view keyed by node id
    pub fn directed(&self) -> &HashMap<NodeId, Vec<Link<'a>>> {
        &self.directed
    }

    /// Undirected view keyed by node id
    pub fn undirected(&self) -> &HashMap<NodeId, Vec<NodeId>> {
        &self.undirected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Node;

    #[test]
    fn test_every_node_is_a_key() {
        let snapshot = GraphSnapshot::from_edge_list(&[1, 2, 3], &[(1, 2)]);
        let adj = Adjacency::build(&snapshot);

        for id in [1, 2, 3] {
            assert!(adj.directed().contains_key(&NodeId(id)));
            assert!(adj.undirected().contains_key(&NodeId(id)));
        }
        assert!(adj.neighbors(NodeId(3)).is_empty());
    }

    #[test]
    fn test_directed_and_undirected_views() {
        let snapshot = GraphSnapshot::from_edge_list(&[1, 2], &[(1, 2)]);
        let adj = Adjacency::build(&snapshot);

        assert_eq!(adj.outgoing(NodeId(1)).len(), 1);
        assert_eq!(adj.outgoing(NodeId(1))[0].target, NodeId(2));
        assert!(adj.outgoing(NodeId(2)).is_empty());

        assert_eq!(adj.neighbors(NodeId(1)), &[NodeId(2)]);
        assert_eq!(adj.neighbors(NodeId(2)), &[NodeId(1)]);
    }

    #[test]
    fn test_unknown_endpoint_dropped() {
        let snapshot = GraphSnapshot::from_edge_list(&[1, 2], &[(1, 2), (1, 99), (98, 2)]);
        let adj = Adjacency::build(&snapshot);

        assert_eq!(adj.dropped_edge_count(), 2);
        assert_eq!(adj.raw_edge_count(), 3);
        assert_eq!(adj.outgoing(NodeId(1)).len(), 1);
        assert!(!adj.has_node(NodeId(99)));
    }

    #[test]
    fn test_parallel_edges_dedup_only_undirected() {
        let snapshot = GraphSnapshot::from_edge_list(&[1, 2], &[(1, 2), (1, 2), (2, 1)]);
        let adj = Adjacency::build(&snapshot);

        assert_eq!(adj.outgoing(NodeId(1)).len(), 2);
        assert_eq!(adj.outgoing(NodeId(2)).len(), 1);
        assert_eq!(adj.neighbors(NodeId(1)), &[NodeId(2)]);
        assert_eq!(adj.neighbors(NodeId(2)), &[NodeId(1)]);
    }

    #[test]
    fn test_self_loop_kept() {
        let snapshot = GraphSnapshot::from_edge_list(&[1], &[(1, 1)]);
        let adj = Adjacency::build(&snapshot);

        assert_eq!(adj.outgoing(NodeId(1)).len(), 1);
        assert_eq!(adj.neighbors(NodeId(1)), &[NodeId(1)]);
    }

    #[test]
    fn test_positions_and_duplicate_nodes() {
        let snapshot = GraphSnapshot::default()
            .with_node(Node::at(1, 2.0, 3.0))
            .with_node(Node::new(2))
            .with_node(Node::new(1));
        let adj = Adjacency::build(&snapshot);

        assert_eq!(adj.node_count(), 2);
        assert_eq!(adj.nodes(), &[NodeId(1), NodeId(2)]);
        assert_eq!(adj.position(NodeId(1)), Some(Position::new(2.0, 3.0)));
        assert_eq!(adj.position(NodeId(2)), None);
    }
}
