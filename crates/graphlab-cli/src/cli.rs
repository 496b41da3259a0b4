use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line driver for the Graphlab analytics engine
#[derive(Parser, Debug)]
#[command(name = "graphlab")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, env = "GRAPHLAB_CONFIG")]
    pub config: Option<String>,

    /// Verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit log lines as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Node count, edge count, density, diameter and components
    Summary(SnapshotArgs),
    /// Degree, closeness and betweenness per node
    Nodes(NodesArgs),
    /// PageRank scores, highest first
    Pagerank(PageRankArgs),
    /// Greedy modularity communities
    Communities(CommunitiesArgs),
    /// Single route between two nodes
    Path(PathArgs),
    /// K shortest loopless routes (Yen)
    KPaths(KPathsArgs),
    /// Simple routes in DFS order, capped
    AllPaths(AllPathsArgs),
}

#[derive(Args, Debug)]
pub struct SnapshotArgs {
    /// Snapshot file (JSON with `nodes` and `edges`)
    pub snapshot: PathBuf,
}

#[derive(Args, Debug)]
pub struct NodesArgs {
    #[command(flatten)]
    pub input: SnapshotArgs,

    /// Include closeness centrality
    #[arg(long)]
    pub closeness: bool,

    /// Include betweenness centrality
    #[arg(long)]
    pub betweenness: bool,
}

#[derive(Args, Debug)]
pub struct PageRankArgs {
    #[command(flatten)]
    pub input: SnapshotArgs,

    /// Number of power iterations
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Damping factor
    #[arg(long)]
    pub damping: Option<f64>,

    /// Only show the N highest ranked nodes
    #[arg(long)]
    pub top: Option<usize>,
}

#[derive(Args, Debug)]
pub struct CommunitiesArgs {
    #[command(flatten)]
    pub input: SnapshotArgs,

    /// Upper bound on optimization passes
    #[arg(long)]
    pub max_passes: Option<usize>,
}

#[derive(Args, Debug)]
pub struct Endpoints {
    /// Source node id
    #[arg(long)]
    pub from: u64,

    /// Target node id
    #[arg(long)]
    pub to: u64,
}

#[derive(Args, Debug)]
pub struct PathArgs {
    #[command(flatten)]
    pub input: SnapshotArgs,

    #[command(flatten)]
    pub endpoints: Endpoints,

    /// Route algorithm: dijkstra, astar or bfs
    #[arg(long, default_value = "dijkstra")]
    pub algorithm: String,

    /// A* heuristic name (unknown names fall back to euclidean)
    #[arg(long)]
    pub heuristic: Option<String>,
}

#[derive(Args, Debug)]
pub struct KPathsArgs {
    #[command(flatten)]
    pub input: SnapshotArgs,

    #[command(flatten)]
    pub endpoints: Endpoints,

    /// Number of routes
    #[arg(long)]
    pub k: Option<usize>,
}

#[derive(Args, Debug)]
pub struct AllPathsArgs {
    #[command(flatten)]
    pub input: SnapshotArgs,

    #[command(flatten)]
    pub endpoints: Endpoints,

    /// Cap on the number of routes
    #[arg(long)]
    pub max_paths: Option<usize>,
}
