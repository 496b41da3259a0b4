//! Per-node centrality measures
//!
//! - **Degree**: in/out/total counted from the raw edge list, so parallel
//!   edges and self-loops inflate it
//! - **Closeness**: BFS over the undirected view, reachable subgraph only
//! - **Betweenness**: Brandes' algorithm over the undirected view
//!
//! Closeness and betweenness are opt-in because both are super-linear in
//! node count.

use crate::adjacency::Adjacency;
use crate::metrics::bfs;
use crate::model::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// Which optional measures to compute
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CentralityOptions {
    /// Compute closeness centrality
    pub closeness: bool,
    /// Compute betweenness centrality
    pub betweenness: bool,
}

impl CentralityOptions {
    /// Enable every optional measure
    pub fn all() -> Self {
        Self {
            closeness: true,
            betweenness: true,
        }
    }
}

/// Metrics for a single node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeMetrics {
    /// Node these metrics belong to
    pub node_id: NodeId,
    /// Incoming edge count
    pub in_degree: usize,
    /// Outgoing edge count
    pub out_degree: usize,
    /// `in_degree + out_degree`
    pub degree: usize,
    /// `degree / (n - 1)`, 0 for single-node graphs
    pub degree_centrality: f64,
    /// Closeness, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closeness: Option<f64>,
    /// Normalized betweenness, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub betweenness: Option<f64>,
}

/// Raw `(in_degree, out_degree)` for every node.
///
/// Counts come from the edge list as supplied: parallel edges count once
/// each and a self-loop adds one to both directions. An edge whose other
/// endpoint is unknown still counts for the known endpoint.
pub fn degrees(adj: &Adjacency<'_>) -> HashMap<NodeId, (usize, usize)> {
    let mut counts: HashMap<NodeId, (usize, usize)> =
        adj.nodes().iter().map(|&node| (node, (0, 0))).collect();

    for edge in adj.raw_edges() {
        if let Some(entry) = counts.get_mut(&edge.source) {
            entry.1 += 1;
        }
        if let Some(entry) = counts.get_mut(&edge.target) {
            entry.0 += 1;
        }
    }

    counts
}

/// Normalized degree centrality for every node
pub fn degree_centrality(adj: &Adjacency<'_>) -> HashMap<NodeId, f64> {
    let n = adj.node_count();
    degrees(adj)
        .into_iter()
        .map(|(node, (in_degree, out_degree))| {
            (node, normalized_degree(in_degree + out_degree, n))
        })
        .collect()
}

fn normalized_degree(degree: usize, n: usize) -> f64 {
    if n > 1 {
        degree as f64 / (n - 1) as f64
    } else {
        0.0
    }
}

/// Closeness of a single node: `(reachable - 1) / sum_of_distances`.
///
/// `reachable` includes the node itself. Unreachable nodes are excluded
/// from both counts. Returns 0 when nothing else is reachable.
pub fn closeness(adj: &Adjacency<'_>, node: NodeId) -> f64 {
    let result = bfs(adj, node);
    let reachable = result.distances.len();
    if reachable <= 1 {
        return 0.0;
    }

    let total: usize = result.distances.values().sum();
    if total == 0 {
        return 0.0;
    }
    (reachable - 1) as f64 / total as f64
}

/// Closeness centrality for every node
pub fn closeness_centrality(adj: &Adjacency<'_>) -> HashMap<NodeId, f64> {
    adj.nodes()
        .iter()
        .map(|&node| (node, closeness(adj, node)))
        .collect()
}

/// Normalized betweenness centrality (Brandes) for every node.
///
/// Raw dependencies are accumulated from every source, halved because each
/// unordered pair is seen from both ends, then divided by `(n-1)(n-2)`
/// (or by 1 when that product is not positive).
pub fn betweenness_centrality(adj: &Adjacency<'_>) -> HashMap<NodeId, f64> {
    let nodes = adj.nodes();
    let n = nodes.len();
    let index: HashMap<NodeId, usize> = nodes.iter().enumerate().map(|(i, &v)| (v, i)).collect();

    // Neighbour lists translated to dense indices once
    let neighbors: Vec<Vec<usize>> = nodes
        .iter()
        .map(|&v| adj.neighbors(v).iter().map(|w| index[w]).collect())
        .collect();

    let mut centrality = vec![0.0f64; n];

    for s in 0..n {
        let mut stack: Vec<usize> = Vec::with_capacity(n);
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut sigma = vec![0.0f64; n];
        let mut distance: Vec<i64> = vec![-1; n];

        sigma[s] = 1.0;
        distance[s] = 0;

        let mut queue = VecDeque::new();
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            stack.push(v);
            for &w in &neighbors[v] {
                if distance[w] < 0 {
                    distance[w] = distance[v] + 1;
                    queue.push_back(w);
                }
                if distance[w] == distance[v] + 1 {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        let mut delta = vec![0.0f64; n];
        while let Some(w) = stack.pop() {
            for &v in &predecessors[w] {
                delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
            }
            if w != s {
                centrality[w] += delta[w];
            }
        }
    }

    let pairs = (n as f64 - 1.0) * (n as f64 - 2.0);
    let normalization = if pairs > 0.0 { pairs } else { 1.0 };

    nodes
        .iter()
        .zip(centrality)
        .map(|(&node, value)| (node, value / 2.0 / normalization))
        .collect()
}

/// Per-node metrics in snapshot order
pub fn node_metrics(adj: &Adjacency<'_>, options: CentralityOptions) -> Vec<NodeMetrics> {
    let n = adj.node_count();
    let degrees = degrees(adj);
    let closeness = options.closeness.then(|| closeness_centrality(adj));
    let betweenness = options.betweenness.then(|| betweenness_centrality(adj));

    let metrics: Vec<NodeMetrics> = adj
        .nodes()
        .iter()
        .map(|&node| {
            let (in_degree, out_degree) = degrees.get(&node).copied().unwrap_or((0, 0));
            let degree = in_degree + out_degree;
            NodeMetrics {
                node_id: node,
                in_degree,
                out_degree,
                degree,
                degree_centrality: normalized_degree(degree, n),
                closeness: closeness.as_ref().and_then(|c| c.get(&node).copied()),
                betweenness: betweenness.as_ref().and_then(|b| b.get(&node).copied()),
            }
        })
        .collect();

    debug!(
        nodes = n,
        closeness = options.closeness,
        betweenness = options.betweenness,
        "computed node metrics"
    );

    metrics
}
