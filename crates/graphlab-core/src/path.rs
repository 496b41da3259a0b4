//! Route finding between two nodes
//!
//! - **Dijkstra**: weighted shortest path over the directed view
//! - **A\***: Dijkstra guided by a positional heuristic
//! - **Yen**: K shortest loopless paths, built on the filtered Dijkstra
//! - **BFS**: fewest hops over the undirected view (node sequence only)
//! - **All paths**: bounded backtracking DFS over the undirected view
//!
//! "No path" is a normal outcome reported with `found == false`. Only a
//! source or target that is not part of the snapshot is an error.

use crate::adjacency::Adjacency;
use crate::metrics::bfs;
use crate::model::{EdgeId, NodeId};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use tracing::{debug, trace};

/// Route between two nodes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathResult {
    /// Whether a route exists
    pub found: bool,
    /// Nodes from source to target
    pub node_ids: Vec<NodeId>,
    /// Edges followed, empty for hop-only searches
    pub edge_ids: Vec<EdgeId>,
    /// Sum of edge weights, absent for hop-only searches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_weight: Option<f64>,
}

impl PathResult {
    /// Result for an unreachable target
    pub fn not_found() -> Self {
        Self {
            found: false,
            node_ids: Vec::new(),
            edge_ids: Vec::new(),
            total_weight: None,
        }
    }

    fn weighted(node_ids: Vec<NodeId>, edge_ids: Vec<EdgeId>, total_weight: f64) -> Self {
        Self {
            found: true,
            node_ids,
            edge_ids,
            total_weight: Some(total_weight),
        }
    }

    fn hops(node_ids: Vec<NodeId>) -> Self {
        Self {
            found: true,
            node_ids,
            edge_ids: Vec::new(),
            total_weight: None,
        }
    }

    /// Number of edges along the route
    pub fn hop_count(&self) -> usize {
        self.node_ids.len().saturating_sub(1)
    }

    /// Whether no node appears twice
    pub fn is_simple(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.node_ids.len());
        self.node_ids.iter().all(|node| seen.insert(*node))
    }
}

/// Several routes between the same two nodes
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KPathsResult {
    /// Routes in the order produced by the algorithm
    pub paths: Vec<PathResult>,
}

/// A* heuristic selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Heuristic {
    /// Straight-line distance between node positions
    #[default]
    Euclidean,
    /// Always 0, equivalent to Dijkstra
    Zero,
}

impl Heuristic {
    /// Resolve a heuristic by name; unknown names fall back to Euclidean
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "zero" | "none" | "dijkstra" => Self::Zero,
            _ => Self::Euclidean,
        }
    }

    /// Canonical name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Euclidean => "euclidean",
            Self::Zero => "zero",
        }
    }

    /// Estimated remaining cost from `node` to `target`.
    ///
    /// Nodes without a position contribute 0.
    pub fn estimate(&self, adj: &Adjacency<'_>, node: NodeId, target: NodeId) -> f64 {
        match self {
            Self::Euclidean => match (adj.position(node), adj.position(target)) {
                (Some(from), Some(to)) => from.distance_to(&to),
                _ => 0.0,
            },
            Self::Zero => 0.0,
        }
    }
}

impl From<String> for Heuristic {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<Heuristic> for String {
    fn from(heuristic: Heuristic) -> Self {
        heuristic.name().to_string()
    }
}

/// Single-route algorithm selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathAlgorithm {
    /// Weighted shortest path
    #[default]
    Dijkstra,
    /// Heuristic-guided weighted shortest path
    AStar,
    /// Fewest hops, undirected
    Bfs,
}

impl PathAlgorithm {
    /// Resolve an algorithm by name
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(Self::Dijkstra),
            "astar" | "a*" => Ok(Self::AStar),
            "bfs" | "unweighted" => Ok(Self::Bfs),
            other => Err(Error::invalid_input(format!(
                "unknown path algorithm '{other}'"
            ))),
        }
    }
}

/// Path query parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Number of routes for K-shortest queries
    pub k: usize,
    /// Cap on routes returned by exhaustive enumeration
    pub max_paths: usize,
    /// Heuristic used by A*
    pub heuristic: Heuristic,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            k: 3,
            max_paths: 10,
            heuristic: Heuristic::Euclidean,
        }
    }
}

fn ensure_endpoints(adj: &Adjacency<'_>, source: NodeId, target: NodeId) -> Result<()> {
    for node in [source, target] {
        if !adj.has_node(node) {
            return Err(Error::NodeNotFound(node));
        }
    }
    Ok(())
}

/// Priority queue item (f_score, g_score, node_id), min-heap on f_score
#[derive(PartialEq)]
struct QueueItem(f64, f64, NodeId);

impl Eq for QueueItem {}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse the comparison for min-heap behavior
        other.0.total_cmp(&self.0)
    }
}

/// Route produced by [`search`], with the weight of every edge followed
#[derive(Debug, Clone, PartialEq)]
struct Route {
    nodes: Vec<NodeId>,
    edges: Vec<EdgeId>,
    weights: Vec<f64>,
}

impl Route {
    /// Left-to-right sum of the edge weights
    fn total_weight(&self) -> f64 {
        self.weights.iter().fold(0.0, |total, weight| total + weight)
    }

    fn into_result(self) -> PathResult {
        let total_weight = self.total_weight();
        PathResult::weighted(self.nodes, self.edges, total_weight)
    }
}

/// Best-first search shared by Dijkstra, A* and Yen's spur searches.
///
/// A link is skipped when `(from, edge_id)` is in `excluded_edges` or its
/// target is in `excluded_nodes`. Returns `None` when the target cannot be
/// reached.
fn search(
    adj: &Adjacency<'_>,
    source: NodeId,
    target: NodeId,
    heuristic: Heuristic,
    excluded_edges: &HashSet<(NodeId, EdgeId)>,
    excluded_nodes: &HashSet<NodeId>,
) -> Option<Route> {
    let mut distances: HashMap<NodeId, f64> = HashMap::new();
    // Key: node_id, Value: (parent, edge followed, edge weight)
    let mut parents: HashMap<NodeId, (NodeId, EdgeId, f64)> = HashMap::new();
    let mut heap = BinaryHeap::new();

    distances.insert(source, 0.0);
    heap.push(QueueItem(
        heuristic.estimate(adj, source, target),
        0.0,
        source,
    ));

    let mut reached = false;
    while let Some(QueueItem(_, g_score, current)) = heap.pop() {
        if current == target {
            reached = true;
            break;
        }

        if g_score > *distances.get(&current).unwrap_or(&f64::INFINITY) {
            continue;
        }

        for link in adj.outgoing(current) {
            if excluded_edges.contains(&(current, link.edge.id))
                || excluded_nodes.contains(&link.target)
            {
                continue;
            }

            let weight = link.weight();
            let tentative_g = g_score + weight;
            if tentative_g < *distances.get(&link.target).unwrap_or(&f64::INFINITY) {
                distances.insert(link.target, tentative_g);
                parents.insert(link.target, (current, link.edge.id, weight));
                let f_score = tentative_g + heuristic.estimate(adj, link.target, target);
                heap.push(QueueItem(f_score, tentative_g, link.target));
            }
        }
    }

    if !reached {
        return None;
    }

    let mut nodes = vec![target];
    let mut edges = Vec::new();
    let mut weights = Vec::new();
    let mut current = target;
    while current != source {
        let (parent, edge, weight) = parents.get(&current).copied()?;
        edges.push(edge);
        weights.push(weight);
        nodes.push(parent);
        current = parent;
    }
    nodes.reverse();
    edges.reverse();
    weights.reverse();

    Some(Route {
        nodes,
        edges,
        weights,
    })
}

/// Weighted shortest path using Dijkstra's algorithm
pub fn dijkstra(adj: &Adjacency<'_>, source: NodeId, target: NodeId) -> Result<PathResult> {
    astar(adj, source, target, Heuristic::Zero)
}

/// Weighted shortest path using the A* algorithm
pub fn astar(
    adj: &Adjacency<'_>,
    source: NodeId,
    target: NodeId,
    heuristic: Heuristic,
) -> Result<PathResult> {
    ensure_endpoints(adj, source, target)?;

    let result = search(
        adj,
        source,
        target,
        heuristic,
        &HashSet::new(),
        &HashSet::new(),
    )
    .map_or_else(PathResult::not_found, Route::into_result);

    debug!(
        %source,
        %target,
        heuristic = heuristic.name(),
        found = result.found,
        hops = result.hop_count(),
        "computed shortest path"
    );

    Ok(result)
}

/// K shortest loopless paths using Yen's algorithm.
///
/// The first route equals the Dijkstra result. Further routes are accepted
/// from a candidate pool in order of total weight (first found wins ties),
/// so the output is non-decreasing in weight. Fewer than `k` routes are
/// returned when the graph runs out of simple paths.
pub fn k_shortest_paths(
    adj: &Adjacency<'_>,
    source: NodeId,
    target: NodeId,
    k: usize,
) -> Result<KPathsResult> {
    ensure_endpoints(adj, source, target)?;

    if k == 0 {
        return Ok(KPathsResult::default());
    }

    let no_edges = HashSet::new();
    let no_nodes = HashSet::new();
    let Some(first) = search(adj, source, target, Heuristic::Zero, &no_edges, &no_nodes) else {
        return Ok(KPathsResult::default());
    };

    let mut accepted: Vec<Route> = vec![first];
    // (total_weight, route) in discovery order
    let mut candidates: Vec<(f64, Route)> = Vec::new();

    while accepted.len() < k {
        let previous = accepted[accepted.len() - 1].clone();

        for i in 0..previous.nodes.len().saturating_sub(1) {
            let spur_node = previous.nodes[i];
            let root_nodes = &previous.nodes[..=i];
            let root_edges = &previous.edges[..i];

            // Remove the next edge of every accepted path sharing this root
            let excluded_edges: HashSet<(NodeId, EdgeId)> = accepted
                .iter()
                .filter(|route| {
                    route.edges.len() > i
                        && route.nodes[..=i] == *root_nodes
                        && route.edges[..i] == *root_edges
                })
                .map(|route| (spur_node, route.edges[i]))
                .collect();
            let excluded_nodes: HashSet<NodeId> = root_nodes[..i].iter().copied().collect();

            let Some(spur) = search(
                adj,
                spur_node,
                target,
                Heuristic::Zero,
                &excluded_edges,
                &excluded_nodes,
            ) else {
                continue;
            };

            let mut candidate = Route {
                nodes: root_nodes[..i].to_vec(),
                edges: root_edges.to_vec(),
                weights: previous.weights[..i].to_vec(),
            };
            candidate.nodes.extend(spur.nodes);
            candidate.edges.extend(spur.edges);
            candidate.weights.extend(spur.weights);

            let known = accepted
                .iter()
                .chain(candidates.iter().map(|(_, route)| route))
                .any(|route| route.nodes == candidate.nodes && route.edges == candidate.edges);
            if !known {
                candidates.push((candidate.total_weight(), candidate));
            }
        }

        let best = candidates
            .iter()
            .enumerate()
            .min_by(|(_, (a, _)), (_, (b, _))| a.total_cmp(b))
            .map(|(index, _)| index);

        match best {
            Some(index) => accepted.push(candidates.remove(index).1),
            None => break,
        }

        trace!(
            accepted = accepted.len(),
            candidates = candidates.len(),
            "yen iteration finished"
        );
    }

    debug!(%source, %target, k, found = accepted.len(), "computed k shortest paths");

    Ok(KPathsResult {
        paths: accepted.into_iter().map(Route::into_result).collect(),
    })
}

/// Fewest-hop path over the undirected view.
///
/// Returns the node sequence only; `edge_ids` is empty and `total_weight`
/// is absent.
pub fn bfs_path(adj: &Adjacency<'_>, source: NodeId, target: NodeId) -> Result<PathResult> {
    ensure_endpoints(adj, source, target)?;

    let result = bfs(adj, source);
    if !result.distances.contains_key(&target) {
        return Ok(PathResult::not_found());
    }

    let mut nodes = vec![target];
    let mut current = target;
    while current != source {
        let Some(&parent) = result.parents.get(&current) else {
            return Ok(PathResult::not_found());
        };
        nodes.push(parent);
        current = parent;
    }
    nodes.reverse();

    debug!(%source, %target, hops = nodes.len() - 1, "computed fewest-hop path");

    Ok(PathResult::hops(nodes))
}

/// Enumerate simple paths with a backtracking DFS over the undirected view.
///
/// Stops once `max_paths` routes are collected. Routes are returned in
/// neighbour exploration order, not sorted by length.
pub fn all_paths(
    adj: &Adjacency<'_>,
    source: NodeId,
    target: NodeId,
    max_paths: usize,
) -> Result<KPathsResult> {
    ensure_endpoints(adj, source, target)?;

    let mut paths = Vec::new();
    if max_paths == 0 {
        return Ok(KPathsResult { paths });
    }
    if source == target {
        paths.push(PathResult::hops(vec![source]));
        return Ok(KPathsResult { paths });
    }

    // Explicit stack: the current path plus a neighbour cursor per level
    let mut path = vec![source];
    let mut cursors = vec![0usize];
    let mut on_path: HashSet<NodeId> = HashSet::from([source]);

    while let (Some(&node), Some(cursor)) = (path.last(), cursors.last_mut()) {
        if paths.len() >= max_paths {
            break;
        }

        let neighbors = adj.neighbors(node);
        if *cursor >= neighbors.len() {
            path.pop();
            cursors.pop();
            on_path.remove(&node);
            continue;
        }

        let next = neighbors[*cursor];
        *cursor += 1;

        if on_path.contains(&next) {
            continue;
        }
        if next == target {
            let mut found = path.clone();
            found.push(next);
            paths.push(PathResult::hops(found));
            continue;
        }

        path.push(next);
        cursors.push(0);
        on_path.insert(next);
    }

    debug!(%source, %target, max_paths, found = paths.len(), "enumerated paths");

    Ok(KPathsResult { paths })
}
