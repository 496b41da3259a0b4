//! Graphlab Core - Graph Analytics and Pathfinding Engine
//!
//! This crate computes analytics over a snapshot of the editor's graph:
//! - Structural statistics (density, diameter, connected components)
//! - Per-node centrality (degree, closeness, betweenness)
//! - PageRank importance ranking
//! - Community detection by greedy modularity optimization
//! - Routes between nodes (Dijkstra, A*, Yen's K-shortest, BFS, bounded DFS)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              AnalyticsEngine                 │
//! └──────────────┬──────────────────────────────┘
//!                │
//! ┌──────────────┴──────────────────────────────┐
//! │ metrics │ centrality │ pagerank │ community │
//! │                    path                      │
//! └──────────────┬──────────────────────────────┘
//!                │
//! ┌──────────────┴──────────────────────────────┐
//! │        Adjacency (directed + undirected)     │
//! └──────────────┬──────────────────────────────┘
//!                │
//! ┌──────────────┴──────────────────────────────┐
//! │        GraphSnapshot (borrowed, read-only)   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Every computation is synchronous and single-threaded. Results depend only
//! on the snapshot contents and order plus the parameters passed in.
//!
//! # Example
//!
//! ```rust
//! use graphlab_core::{AnalyticsEngine, GraphSnapshot, NodeId, PathAlgorithm};
//!
//! let snapshot = GraphSnapshot::from_edge_list(&[1, 2, 3], &[(1, 2), (2, 3)]);
//! let engine = AnalyticsEngine::new(&snapshot);
//!
//! assert_eq!(engine.summary().diameter, 2);
//!
//! let route = engine
//!     .shortest_path(NodeId(1), NodeId(3), PathAlgorithm::Dijkstra)
//!     .unwrap();
//! assert_eq!(route.node_ids, vec![NodeId(1), NodeId(2), NodeId(3)]);
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod adjacency;
pub mod centrality;
pub mod community;
pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod model;
pub mod pagerank;
pub mod path;

pub use adjacency::{Adjacency, Link};
pub use centrality::{CentralityOptions, NodeMetrics};
pub use community::{CommunityConfig, CommunityResult};
pub use config::AnalyticsConfig;
pub use engine::AnalyticsEngine;
pub use error::{Error, Result};
pub use metrics::SummaryStats;
pub use model::{Edge, EdgeId, GraphSnapshot, Node, NodeId, Position};
pub use pagerank::{PageRankConfig, PageRankEntry};
pub use path::{Heuristic, KPathsResult, PathAlgorithm, PathConfig, PathResult};
