use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::enums::EmptyClusterPolicy;

/// Config for a k-means clustering run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Number of clusters to partition the dataset into. Must be positive and must not exceed
    /// the number of data points.
    /// Default: 3
    pub num_clusters: usize,

    /// Number of assign/update rounds. The loop always runs exactly this many rounds, there is
    /// no early exit.
    /// Default: 100
    pub max_iteration: usize,

    /// Seed for the random source used to pick the initial centroids. When unset, the random
    /// source is seeded from the operating system and reruns pick different centroids.
    /// Default: None
    pub seed: Option<u64>,

    /// What to do when an update round finds a cluster with no points.
    /// Default: KeepPrevious
    pub empty_cluster_policy: EmptyClusterPolicy,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            num_clusters: 3,
            max_iteration: 100,
            seed: None,
            empty_cluster_policy: EmptyClusterPolicy::KeepPrevious,
        }
    }
}

impl ClusteringConfig {
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read clustering config {}", path.display()))?;
        let config = serde_yaml::from_str::<ClusteringConfig>(&content)
            .with_context(|| format!("Failed to parse clustering config {}", path.display()))?;
        Ok(config)
    }

    pub fn write_yaml_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path.as_ref(), serde_yaml::to_string(self)?)?;
        Ok(())
    }
}
