//! Structural metrics - density, connected components, diameter
//!
//! All traversals here run over the undirected view; density uses the raw
//! directed edge count.

use crate::adjacency::Adjacency;
use crate::model::NodeId;
use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

/// Graph-wide statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    /// Number of nodes
    pub node_count: usize,
    /// Number of edges as supplied
    pub edge_count: usize,
    /// Directed density in `[0, 1]`
    pub density: f64,
    /// Largest finite eccentricity over all nodes
    pub diameter: usize,
    /// Number of connected components
    pub component_count: usize,
    /// Component sizes, largest first
    pub component_sizes: Vec<usize>,
}

/// BFS result containing distances and paths
#[derive(Debug, Clone)]
pub struct BfsResult {
    /// Hop distance from source to each reached node
    pub distances: HashMap<NodeId, usize>,
    /// Parent node for each node in the BFS tree
    pub parents: HashMap<NodeId, NodeId>,
    /// Order of node discovery
    pub discovery_order: Vec<NodeId>,
}

impl BfsResult {
    /// Largest distance to any reached node
    pub fn eccentricity(&self) -> usize {
        self.distances.values().copied().max().unwrap_or(0)
    }
}

/// Breadth-first search over the undirected view.
///
/// An unknown source yields a result that reaches only the source itself.
pub fn bfs(adj: &Adjacency<'_>, source: NodeId) -> BfsResult {
    let mut distances = HashMap::new();
    let mut parents = HashMap::new();
    let mut discovery_order = Vec::new();
    let mut queue = VecDeque::new();

    distances.insert(source, 0);
    queue.push_back(source);
    discovery_order.push(source);

    while let Some(current) = queue.pop_front() {
        let current_distance = distances[&current];

        for &neighbor in adj.neighbors(current) {
            if let std::collections::hash_map::Entry::Vacant(e) = distances.entry(neighbor) {
                e.insert(current_distance + 1);
                parents.insert(neighbor, current);
                queue.push_back(neighbor);
                discovery_order.push(neighbor);
            }
        }
    }

    BfsResult {
        distances,
        parents,
        discovery_order,
    }
}

/// Directed density `m / (n * (n - 1))`.
///
/// Returns 0 for graphs with at most one node. Multigraphs whose edge count
/// exceeds `n * (n - 1)` are clamped to 1.
pub fn density(adj: &Adjacency<'_>) -> f64 {
    let n = adj.node_count();
    if n <= 1 {
        return 0.0;
    }
    let m = adj.raw_edge_count() as f64;
    let possible = (n * (n - 1)) as f64;
    (m / possible).min(1.0)
}

/// Connected components of the undirected view.
///
/// Uses an explicit stack so deep graphs cannot overflow the call stack.
/// Components and their members appear in discovery order.
pub fn connected_components(adj: &Adjacency<'_>) -> Vec<Vec<NodeId>> {
    let mut visited: HashSet<NodeId> = HashSet::with_capacity(adj.node_count());
    let mut components = Vec::new();

    for &start in adj.nodes() {
        if visited.contains(&start) {
            continue;
        }

        let mut component = Vec::new();
        let mut stack = vec![start];
        visited.insert(start);

        while let Some(node) = stack.pop() {
            component.push(node);
            for &neighbor in adj.neighbors(node) {
                if visited.insert(neighbor) {
                    stack.push(neighbor);
                }
            }
        }

        components.push(component);
    }

    components
}

/// Maximum eccentricity over all nodes.
///
/// On a disconnected graph this is the largest eccentricity found inside
/// any single component; unreachable pairs are ignored rather than making
/// the diameter infinite.
pub fn diameter(adj: &Adjacency<'_>) -> usize {
    adj.nodes()
        .iter()
        .map(|&node| bfs(adj, node).eccentricity())
        .max()
        .unwrap_or(0)
}

/// Compute all structural statistics in one call
pub fn summary(adj: &Adjacency<'_>) -> SummaryStats {
    let components = connected_components(adj);
    let mut component_sizes: Vec<usize> = components.iter().map(|c| c.len()).collect();
    component_sizes.sort_unstable_by(|a, b| b.cmp(a));

    let stats = SummaryStats {
        node_count: adj.node_count(),
        edge_count: adj.raw_edge_count(),
        density: density(adj),
        diameter: diameter(adj),
        component_count: components.len(),
        component_sizes,
    };

    debug!(
        nodes = stats.node_count,
        edges = stats.edge_count,
        components = stats.component_count,
        diameter = stats.diameter,
        "computed summary"
    );

    stats
}
