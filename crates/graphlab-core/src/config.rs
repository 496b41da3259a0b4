//! Analytics configuration
//!
//! Every tunable an algorithm reads is passed in explicitly through these
//! structs; the engine keeps no global constants beyond their defaults.

use crate::centrality::CentralityOptions;
use crate::community::CommunityConfig;
use crate::pagerank::PageRankConfig;
use crate::path::PathConfig;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// All analytics parameters in one place
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// PageRank parameters
    pub pagerank: PageRankConfig,
    /// Community detection parameters
    pub community: CommunityConfig,
    /// Path query parameters
    pub paths: PathConfig,
    /// Optional centrality measures
    pub centrality: CentralityOptions,
}

impl AnalyticsConfig {
    /// Reject parameter values the algorithms cannot work with.
    ///
    /// The algorithms themselves assume sane input; callers that accept
    /// user-supplied parameters should run this first.
    pub fn validate(&self) -> Result<()> {
        let damping = self.pagerank.damping;
        if !damping.is_finite() || !(0.0..=1.0).contains(&damping) {
            return Err(Error::config(format!(
                "pagerank.damping must be within [0, 1], got {damping}"
            )));
        }

        if self.community.max_passes == 0 {
            return Err(Error::config("community.max_passes must be at least 1"));
        }

        let min_gain = self.community.min_gain;
        if !min_gain.is_finite() || min_gain < 0.0 {
            return Err(Error::config(format!(
                "community.min_gain must be a non-negative number, got {min_gain}"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Heuristic;

    #[test]
    fn test_defaults() {
        let config = AnalyticsConfig::default();
        assert_eq!(config.pagerank.iterations, 50);
        assert_eq!(config.pagerank.damping, 0.85);
        assert_eq!(config.community.max_passes, 10);
        assert_eq!(config.community.min_gain, 1e-9);
        assert_eq!(config.paths.k, 3);
        assert_eq!(config.paths.max_paths, 10);
        assert_eq!(config.paths.heuristic, Heuristic::Euclidean);
        assert!(!config.centrality.closeness);
        assert!(!config.centrality.betweenness);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AnalyticsConfig::default();
        config.pagerank.damping = 1.5;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = AnalyticsConfig::default();
        config.community.max_passes = 0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = AnalyticsConfig::default();
        config.community.min_gain = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml() {
        let config: AnalyticsConfig = toml::from_str(
            r#"
            [pagerank]
            iterations = 20

            [paths]
            heuristic = "something-else"
            k = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.pagerank.iterations, 20);
        assert_eq!(config.pagerank.damping, 0.85);
        assert_eq!(config.paths.k, 5);
        assert_eq!(config.paths.max_paths, 10);
        assert_eq!(config.paths.heuristic, Heuristic::Euclidean);
        assert_eq!(config.community, CommunityConfig::default());
    }

    #[test]
    fn test_json_round_trip_uses_heuristic_name() {
        let mut config = AnalyticsConfig::default();
        config.paths.heuristic = Heuristic::Zero;

        let json = serde_json::to_value(config).unwrap();
        assert_eq!(json["paths"]["heuristic"], "zero");
    }
}
