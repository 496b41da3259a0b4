//! Snapshot data model - NodeId, EdgeId, Node, Edge, GraphSnapshot
//!
//! A snapshot is the read-only view of the editor's graph handed to the
//! engine for a single computation. The engine never mutates it.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Weight used for edges that carry no explicit weight
pub const DEFAULT_EDGE_WEIGHT: f64 = 1.0;

/// A unique identifier for nodes in the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Create a new node ID
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl From<NodeId> for u64 {
    fn from(node_id: NodeId) -> Self {
        node_id.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for edges in the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub u64);

impl EdgeId {
    /// Create a new edge ID
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for EdgeId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl From<EdgeId> for u64 {
    fn from(edge_id: EdgeId) -> Self {
        edge_id.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canvas position of a node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Position {
    /// Create a new position
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A node in the snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier for this node
    pub id: NodeId,
    /// Optional canvas position, only consulted by the A* heuristic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Node {
    /// Create a node without position
    pub fn new(id: u64) -> Self {
        Self {
            id: NodeId(id),
            position: None,
        }
    }

    /// Create a node placed at `(x, y)`
    pub fn at(id: u64, x: f64, y: f64) -> Self {
        Self {
            id: NodeId(id),
            position: Some(Position::new(x, y)),
        }
    }
}

/// A directed edge in the snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier for this edge
    pub id: EdgeId,
    /// Source node
    pub source: NodeId,
    /// Target node
    pub target: NodeId,
    /// Optional weight, [`DEFAULT_EDGE_WEIGHT`] when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl Edge {
    /// Create an unweighted edge
    pub fn new(id: u64, source: u64, target: u64) -> Self {
        Self {
            id: EdgeId(id),
            source: NodeId(source),
            target: NodeId(target),
            weight: None,
        }
    }

    /// Create a weighted edge
    pub fn weighted(id: u64, source: u64, target: u64, weight: f64) -> Self {
        Self {
            weight: Some(weight),
            ..Self::new(id, source, target)
        }
    }

    /// Effective weight of this edge
    pub fn weight(&self) -> f64 {
        self.weight.unwrap_or(DEFAULT_EDGE_WEIGHT)
    }

    /// Whether source and target are the same node
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// Nodes and edges supplied fresh for one computation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Nodes in caller order
    #[serde(default)]
    pub nodes: Vec<Node>,
    /// Edges in caller order
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl GraphSnapshot {
    /// Create a snapshot from owned node and edge lists
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Build an unweighted snapshot from raw ids.
    ///
    /// Edge ids are assigned sequentially from 1 in list order.
    pub fn from_edge_list(nodes: &[u64], edges: &[(u64, u64)]) -> Self {
        Self {
            nodes: nodes.iter().map(|&id| Node::new(id)).collect(),
            edges: edges
                .iter()
                .zip(1u64..)
                .map(|(&(source, target), id)| Edge::new(id, source, target))
                .collect(),
        }
    }

    /// Decode a snapshot from its JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Append a node (builder style)
    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    /// Append an edge (builder style)
    pub fn with_edge(mut self, edge: Edge) -> Self {
        self.edges.push(edge);
        self
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges as supplied, including edges with unknown endpoints
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Node ids in snapshot order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().map(|n| n.id)
    }

    /// Check the snapshot for malformed input.
    ///
    /// Duplicate node or edge ids and negative or non-finite weights are
    /// rejected.
    /// Edges pointing at unknown nodes are accepted; adjacency construction
    /// drops them.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !seen.insert(node.id) {
                return Err(Error::DuplicateNode(node.id));
            }
        }

        let mut seen_edges = HashSet::with_capacity(self.edges.len());
        for edge in &self.edges {
            if !seen_edges.insert(edge.id) {
                return Err(Error::DuplicateEdge(edge.id));
            }
            if let Some(weight) = edge.weight {
                if !weight.is_finite() || weight < 0.0 {
                    return Err(Error::InvalidWeight {
                        edge: edge.id,
                        weight,
                    });
                }
            }
        }

        Ok(())
    }
}
