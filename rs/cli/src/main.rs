use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use clustering::KMeans;
use config::clustering::ClusteringConfig;
use config::enums::EmptyClusterPolicy;
use log::{info, LevelFilter};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// YAML clustering config. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON file holding an array of points, e.g. [[1.0, 2.0], [3.0, 4.0]].
    /// Uses a small built-in 2-D dataset when unset.
    #[arg(long)]
    input: Option<PathBuf>,

    #[arg(long)]
    num_clusters: Option<usize>,

    #[arg(long)]
    max_iteration: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = false)]
    fail_on_empty_cluster: bool,
}

fn default_points() -> Vec<Vec<f64>> {
    vec![
        vec![1.0, 2.0],
        vec![2.0, 3.0],
        vec![3.0, 1.0],
        vec![4.0, 2.0],
        vec![8.0, 8.0],
        vec![9.0, 1.0],
    ]
}

fn read_points(path: &Path) -> Result<Vec<Vec<f64>>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input {}", path.display()))?;
    let points = serde_json::from_str::<Vec<Vec<f64>>>(&content)
        .with_context(|| format!("Failed to parse points from {}", path.display()))?;
    Ok(points)
}

fn build_config(arg: &Args) -> Result<ClusteringConfig> {
    let mut config = match &arg.config {
        Some(path) => ClusteringConfig::from_yaml_file(path)?,
        None => ClusteringConfig::default(),
    };
    if let Some(num_clusters) = arg.num_clusters {
        config.num_clusters = num_clusters;
    }
    if let Some(max_iteration) = arg.max_iteration {
        config.max_iteration = max_iteration;
    }
    if arg.seed.is_some() {
        config.seed = arg.seed;
    }
    if arg.fail_on_empty_cluster {
        config.empty_cluster_policy = EmptyClusterPolicy::Fail;
    }
    Ok(config)
}

fn format_vector(vector: &[f64]) -> String {
    vector
        .iter()
        .map(|x| x.to_string())
        .collect::<Vec<String>>()
        .join(" ")
}

fn main() -> Result<()> {
    // Configure logging
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .format_timestamp_millis()
        .init();

    let arg = Args::parse();
    let config = build_config(&arg)?;
    let points = match &arg.input {
        Some(path) => read_points(path)?,
        None => default_points(),
    };
    info!("Clustering {} points with {:?}", points.len(), config);

    let mut kmeans =
        KMeans::from_config(&config, points).context("Failed to create k-means engine")?;
    kmeans.run().context("K-means run failed")?;

    for (i, centroid) in kmeans.centroids().iter().enumerate() {
        println!("Cluster {} Centroid: {}", i, format_vector(centroid));
    }
    println!(
        "Labels: {}",
        kmeans
            .labels()
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<String>>()
            .join(" ")
    );
    if let Some(inertia) = kmeans.inertia() {
        println!("Inertia: {:.4}", inertia);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["kmeans"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_build_config_defaults() {
        let config = build_config(&args(&[])).unwrap();
        assert_eq!(config, ClusteringConfig::default());
    }

    #[test]
    fn test_build_config_overrides() {
        let temp_dir = tempdir::TempDir::new("kmeans_cli_config")
            .expect("Failed to create temporary directory");
        let path = temp_dir.path().join("config.yaml");
        ClusteringConfig {
            num_clusters: 4,
            max_iteration: 7,
            seed: Some(1),
            empty_cluster_policy: EmptyClusterPolicy::KeepPrevious,
        }
        .write_yaml_file(&path)
        .unwrap();

        let path_str = path.to_str().unwrap();
        let config = build_config(&args(&[
            "--config",
            path_str,
            "--num-clusters",
            "2",
            "--fail-on-empty-cluster",
        ]))
        .unwrap();
        assert_eq!(config.num_clusters, 2);
        assert_eq!(config.max_iteration, 7);
        assert_eq!(config.seed, Some(1));
        assert_eq!(config.empty_cluster_policy, EmptyClusterPolicy::Fail);
    }

    #[test]
    fn test_read_points() {
        let temp_dir = tempdir::TempDir::new("kmeans_cli_input")
            .expect("Failed to create temporary directory");
        let path = temp_dir.path().join("points.json");
        std::fs::write(&path, "[[1.0, 2.0], [3.5, 4.0]]").unwrap();
        assert_eq!(
            read_points(&path).unwrap(),
            vec![vec![1.0, 2.0], vec![3.5, 4.0]]
        );

        std::fs::write(&path, "not json").unwrap();
        assert!(read_points(&path).is_err());
    }

    #[test]
    fn test_default_points_run() {
        let config = ClusteringConfig {
            seed: Some(0),
            ..ClusteringConfig::default()
        };
        let mut kmeans = KMeans::from_config(&config, default_points()).unwrap();
        kmeans.run().unwrap();
        assert_eq!(kmeans.labels().len(), 6);
        assert_eq!(kmeans.centroids().len(), 3);
    }

    #[test]
    fn test_format_vector() {
        assert_eq!(format_vector(&[1.0, 2.5]), "1 2.5");
    }
}
