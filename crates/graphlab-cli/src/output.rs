use anyhow::Result;
use comfy_table::{Table, presets::UTF8_FULL};
use graphlab_core::{
    CommunityResult, KPathsResult, NodeMetrics, PageRankEntry, PathResult, SummaryStats,
};
use serde::Serialize;

/// Output formatting context
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputContext {
    pub json: bool,
}

impl OutputContext {
    fn render_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    pub fn summary(&self, stats: &SummaryStats) -> Result<String> {
        if self.json {
            return self.render_json(stats);
        }

        let mut table = new_table(&["Metric", "Value"]);
        table.add_row(vec!["Nodes".to_string(), stats.node_count.to_string()]);
        table.add_row(vec!["Edges".to_string(), stats.edge_count.to_string()]);
        table.add_row(vec!["Density".to_string(), format!("{:.4}", stats.density)]);
        table.add_row(vec!["Diameter".to_string(), stats.diameter.to_string()]);
        table.add_row(vec![
            "Components".to_string(),
            stats.component_count.to_string(),
        ]);
        table.add_row(vec![
            "Component sizes".to_string(),
            join(stats.component_sizes.iter()),
        ]);
        Ok(table.to_string())
    }

    pub fn node_metrics(&self, metrics: &[NodeMetrics]) -> Result<String> {
        if self.json {
            return self.render_json(metrics);
        }

        let mut table = new_table(&[
            "Node",
            "In",
            "Out",
            "Degree",
            "Degree centrality",
            "Closeness",
            "Betweenness",
        ]);
        for m in metrics {
            table.add_row(vec![
                m.node_id.to_string(),
                m.in_degree.to_string(),
                m.out_degree.to_string(),
                m.degree.to_string(),
                format!("{:.4}", m.degree_centrality),
                optional(m.closeness),
                optional(m.betweenness),
            ]);
        }
        Ok(table.to_string())
    }

    pub fn pagerank(&self, entries: &[PageRankEntry]) -> Result<String> {
        if self.json {
            return self.render_json(entries);
        }

        let mut table = new_table(&["Rank", "Node", "Score"]);
        for (rank, entry) in entries.iter().enumerate() {
            table.add_row(vec![
                (rank + 1).to_string(),
                entry.node_id.to_string(),
                format!("{:.6}", entry.score),
            ]);
        }
        Ok(table.to_string())
    }

    pub fn communities(&self, result: &CommunityResult) -> Result<String> {
        if self.json {
            return self.render_json(result);
        }

        let mut table = new_table(&["Community", "Size", "Members"]);
        for (index, members) in result.communities.iter().enumerate() {
            table.add_row(vec![
                index.to_string(),
                members.len().to_string(),
                join(members.iter()),
            ]);
        }
        Ok(format!("Modularity: {:.4}\n{table}", result.modularity))
    }

    pub fn path(&self, result: &PathResult) -> Result<String> {
        if self.json {
            return self.render_json(result);
        }
        if !result.found {
            return Ok("No path found".to_string());
        }

        let mut table = paths_table();
        add_path_row(&mut table, 1, result);
        Ok(table.to_string())
    }

    pub fn paths(&self, result: &KPathsResult) -> Result<String> {
        if self.json {
            return self.render_json(result);
        }
        if result.paths.is_empty() {
            return Ok("No path found".to_string());
        }

        let mut table = paths_table();
        for (index, path) in result.paths.iter().enumerate() {
            add_path_row(&mut table, index + 1, path);
        }
        Ok(table.to_string())
    }
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(header.to_vec());
    table
}

fn paths_table() -> Table {
    new_table(&["#", "Hops", "Weight", "Nodes"])
}

fn add_path_row(table: &mut Table, index: usize, path: &PathResult) {
    table.add_row(vec![
        index.to_string(),
        path.hop_count().to_string(),
        optional(path.total_weight),
        path.node_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(" -> "),
    ]);
}

fn optional(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.4}")).unwrap_or_else(|| "-".to_string())
}

fn join<T: ToString>(values: impl Iterator<Item = T>) -> String {
    values.map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
}
