use crate::cli::{
    AllPathsArgs, Commands, CommunitiesArgs, KPathsArgs, NodesArgs, PageRankArgs, PathArgs,
    SnapshotArgs,
};
use crate::config::Config;
use crate::output::OutputContext;
use anyhow::{Context, Result};
use graphlab_core::{
    AnalyticsConfig, AnalyticsEngine, CentralityOptions, GraphSnapshot, Heuristic, NodeId,
    PathAlgorithm,
};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Execute a command and return the rendered output
pub fn run(command: &Commands, config: &Config, output: OutputContext) -> Result<String> {
    match command {
        Commands::Summary(args) => summary(args, config, output),
        Commands::Nodes(args) => nodes(args, config, output),
        Commands::Pagerank(args) => pagerank(args, config, output),
        Commands::Communities(args) => communities(args, config, output),
        Commands::Path(args) => path(args, config, output),
        Commands::KPaths(args) => k_paths(args, config, output),
        Commands::AllPaths(args) => all_paths(args, config, output),
    }
}

/// Read and validate a snapshot file
pub fn load_snapshot(path: &Path) -> Result<GraphSnapshot> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let snapshot = GraphSnapshot::from_json(&content)
        .with_context(|| format!("failed to parse snapshot {}", path.display()))?;
    debug!(
        nodes = snapshot.node_count(),
        edges = snapshot.edge_count(),
        "loaded snapshot {}",
        path.display()
    );
    Ok(snapshot)
}

fn with_engine<T>(
    input: &SnapshotArgs,
    analytics: AnalyticsConfig,
    f: impl FnOnce(&AnalyticsEngine<'_>) -> Result<T>,
) -> Result<T> {
    let snapshot = load_snapshot(&input.snapshot)?;
    let engine = AnalyticsEngine::try_new(&snapshot, analytics)
        .with_context(|| format!("invalid snapshot {}", input.snapshot.display()))?;
    f(&engine)
}

fn summary(args: &SnapshotArgs, config: &Config, output: OutputContext) -> Result<String> {
    with_engine(args, config.analytics, |engine| {
        output.summary(&engine.summary())
    })
}

fn nodes(args: &NodesArgs, config: &Config, output: OutputContext) -> Result<String> {
    let options = CentralityOptions {
        closeness: args.closeness || config.analytics.centrality.closeness,
        betweenness: args.betweenness || config.analytics.centrality.betweenness,
    };
    with_engine(&args.input, config.analytics, |engine| {
        output.node_metrics(&engine.node_metrics(options))
    })
}

fn pagerank(args: &PageRankArgs, config: &Config, output: OutputContext) -> Result<String> {
    let mut analytics = config.analytics;
    if let Some(iterations) = args.iterations {
        analytics.pagerank.iterations = iterations;
    }
    if let Some(damping) = args.damping {
        analytics.pagerank.damping = damping;
    }

    with_engine(&args.input, analytics, |engine| {
        let mut ranks = engine.pagerank();
        if let Some(top) = args.top {
            ranks.truncate(top);
        }
        output.pagerank(&ranks)
    })
}

fn communities(args: &CommunitiesArgs, config: &Config, output: OutputContext) -> Result<String> {
    let mut analytics = config.analytics;
    if let Some(max_passes) = args.max_passes {
        analytics.community.max_passes = max_passes;
    }

    with_engine(&args.input, analytics, |engine| {
        let result = engine.communities();
        info!(
            communities = result.communities.len(),
            modularity = result.modularity,
            "community detection finished"
        );
        output.communities(&result)
    })
}

fn path(args: &PathArgs, config: &Config, output: OutputContext) -> Result<String> {
    let mut analytics = config.analytics;
    if let Some(name) = &args.heuristic {
        analytics.paths.heuristic = Heuristic::from_name(name);
    }
    let algorithm = PathAlgorithm::from_name(&args.algorithm)?;
    let (source, target) = (NodeId(args.endpoints.from), NodeId(args.endpoints.to));

    with_engine(&args.input, analytics, |engine| {
        let result = engine.shortest_path(source, target, algorithm)?;
        output.path(&result)
    })
}

fn k_paths(args: &KPathsArgs, config: &Config, output: OutputContext) -> Result<String> {
    let mut analytics = config.analytics;
    if let Some(k) = args.k {
        analytics.paths.k = k;
    }
    let (source, target) = (NodeId(args.endpoints.from), NodeId(args.endpoints.to));

    with_engine(&args.input, analytics, |engine| {
        output.paths(&engine.k_shortest_paths(source, target)?)
    })
}

fn all_paths(args: &AllPathsArgs, config: &Config, output: OutputContext) -> Result<String> {
    let mut analytics = config.analytics;
    if let Some(max_paths) = args.max_paths {
        analytics.paths.max_paths = max_paths;
    }
    let (source, target) = (NodeId(args.endpoints.from), NodeId(args.endpoints.to));

    with_engine(&args.input, analytics, |engine| {
        output.paths(&engine.all_paths(source, target)?)
    })
}
