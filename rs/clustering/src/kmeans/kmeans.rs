use config::clustering::ClusteringConfig;
use config::enums::EmptyClusterPolicy;
use log::{debug, info, log_enabled, warn, Level};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use utils::distance::l2::L2DistanceCalculator;

use crate::error::{KMeansError, Result};

/// Lloyd's k-means over a fixed dataset.
///
/// `run` picks `num_clusters` distinct data points as the initial centroids, then alternates
/// assignment and update for exactly `max_iteration` rounds. There is no early exit: the last
/// round's labels and centroids are what the caller reads back.
pub struct KMeans<R = StdRng> {
    num_clusters: usize,
    max_iteration: usize,

    // data shape
    dimension: usize,

    // Flattened data points
    data: Vec<f64>,

    // Flattened centroids. Empty until initialized.
    centroids: Vec<f64>,

    // One label per data point. Empty until the first assignment round.
    labels: Vec<usize>,

    empty_cluster_policy: EmptyClusterPolicy,

    // Update rounds completed since the last initialization
    rounds_run: usize,

    rng: R,
}

pub struct KMeansResult {
    // Flattened centroids
    pub centroids: Vec<f64>,
    pub assignments: Vec<usize>,
}

impl KMeans<StdRng> {
    /// Create an engine whose random source is seeded from the operating system.
    pub fn new(num_clusters: usize, max_iteration: usize, points: Vec<Vec<f64>>) -> Result<Self> {
        Self::with_rng(num_clusters, max_iteration, points, StdRng::from_entropy())
    }

    pub fn from_config(config: &ClusteringConfig, points: Vec<Vec<f64>>) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(
            Self::with_rng(config.num_clusters, config.max_iteration, points, rng)?
                .with_empty_cluster_policy(config.empty_cluster_policy),
        )
    }
}

impl<R: Rng> KMeans<R> {
    pub fn with_rng(
        num_clusters: usize,
        max_iteration: usize,
        points: Vec<Vec<f64>>,
        rng: R,
    ) -> Result<Self> {
        let dimension = match points.first() {
            Some(point) => point.len(),
            None => {
                return Err(KMeansError::InvalidConfiguration(
                    "dataset is empty".to_string(),
                ))
            }
        };

        // Validate dimension
        for (i, point) in points.iter().enumerate() {
            if point.len() != dimension {
                return Err(KMeansError::InvalidConfiguration(format!(
                    "Dimension of data point {} is {}, expected {}",
                    i,
                    point.len(),
                    dimension
                )));
            }
        }

        let flattened_data = points.into_iter().flatten().collect();
        Self::from_flattened(num_clusters, max_iteration, dimension, flattened_data, rng)
    }

    pub fn from_flattened(
        num_clusters: usize,
        max_iteration: usize,
        dimension: usize,
        flattened_data: Vec<f64>,
        rng: R,
    ) -> Result<Self> {
        if dimension == 0 {
            return Err(KMeansError::InvalidConfiguration(
                "dimension must be positive".to_string(),
            ));
        }
        if flattened_data.is_empty() {
            return Err(KMeansError::InvalidConfiguration(
                "dataset is empty".to_string(),
            ));
        }
        if flattened_data.len() % dimension != 0 {
            return Err(KMeansError::InvalidConfiguration(format!(
                "Length of flattened data {} is not a multiple of dimension {}",
                flattened_data.len(),
                dimension
            )));
        }
        if num_clusters == 0 {
            return Err(KMeansError::InvalidConfiguration(
                "num_clusters must be positive".to_string(),
            ));
        }
        let num_points = flattened_data.len() / dimension;
        if num_clusters > num_points {
            return Err(KMeansError::InvalidConfiguration(format!(
                "Cannot build {} clusters from {} data points",
                num_clusters, num_points
            )));
        }
        if let Some(position) = flattened_data.iter().position(|x| !x.is_finite()) {
            return Err(KMeansError::InvalidConfiguration(format!(
                "Data point {} has a non-finite value",
                position / dimension
            )));
        }
        let max_magnitude = Self::max_magnitude(dimension);
        if let Some(position) = flattened_data.iter().position(|x| x.abs() > max_magnitude) {
            return Err(KMeansError::InvalidConfiguration(format!(
                "Data point {} has a value with magnitude above {:e}",
                position / dimension,
                max_magnitude
            )));
        }

        Ok(Self {
            num_clusters,
            max_iteration,
            dimension,
            data: flattened_data,
            centroids: vec![],
            labels: vec![],
            empty_cluster_policy: EmptyClusterPolicy::default(),
            rounds_run: 0,
            rng,
        })
    }

    // Largest coordinate magnitude accepted at construction. Centroids stay inside the bounding
    // box of the data, so every squared distance sum and every per-cluster sum stays finite.
    fn max_magnitude(dimension: usize) -> f64 {
        (f64::MAX / dimension as f64).sqrt() / 4.0
    }

    pub fn with_empty_cluster_policy(mut self, policy: EmptyClusterPolicy) -> Self {
        self.empty_cluster_policy = policy;
        self
    }

    /// Pick `num_clusters` distinct data points as centroids.
    ///
    /// The whole index range is shuffled and the first `num_clusters` indices are kept, so the
    /// cost is linear in the number of data points. Clears the labels.
    pub fn initialize_centroids(&mut self) {
        let mut indices = (0..self.num_points()).collect::<Vec<usize>>();
        indices.shuffle(&mut self.rng);

        let mut centroids = Vec::with_capacity(self.num_clusters * self.dimension);
        for &index in indices.iter().take(self.num_clusters) {
            centroids.extend_from_slice(self.point_unchecked(index));
        }

        self.centroids = centroids;
        self.labels.clear();
        self.rounds_run = 0;
    }

    /// Label every data point with its nearest centroid. No-op before initialization.
    pub fn assign_points_to_clusters(&mut self) {
        if self.centroids.is_empty() {
            return;
        }

        let labels = self
            .data
            .chunks_exact(self.dimension)
            .map(|data_point| self.nearest_centroid(data_point))
            .collect::<Vec<usize>>();
        self.labels = labels;
    }

    // Ties go to the lowest centroid index since only a strictly smaller distance replaces the
    // current best.
    fn nearest_centroid(&self, data_point: &[f64]) -> usize {
        let mut min_distance = f64::MAX;
        let mut label = 0;
        for (centroid_id, centroid) in self.centroids.chunks_exact(self.dimension).enumerate() {
            let distance = L2DistanceCalculator::calculate(data_point, centroid);
            if distance < min_distance {
                min_distance = distance;
                label = centroid_id;
            }
        }
        label
    }

    /// Replace every centroid with the mean of the points labelled with it.
    ///
    /// A cluster with no points either keeps its previous centroid or fails the round with
    /// [`KMeansError::DegenerateCluster`], depending on the empty cluster policy. On failure the
    /// centroids are left untouched. No-op before the first assignment round.
    pub fn update_centroids(&mut self) -> Result<()> {
        if self.labels.is_empty() {
            return Ok(());
        }

        let dimension = self.dimension;
        let mut cluster_sizes = vec![0usize; self.num_clusters];
        let mut new_centroids = vec![0.0; self.num_clusters * dimension];
        for (data_point, &label) in self.data.chunks_exact(dimension).zip(self.labels.iter()) {
            cluster_sizes[label] += 1;
            new_centroids[label * dimension..(label + 1) * dimension]
                .iter_mut()
                .zip(data_point.iter())
                .for_each(|(sum, &x)| *sum += x);
        }

        for (cluster, &size) in cluster_sizes.iter().enumerate() {
            let range = cluster * dimension..(cluster + 1) * dimension;
            if size > 0 {
                new_centroids[range]
                    .iter_mut()
                    .for_each(|x| *x /= size as f64);
                continue;
            }

            match self.empty_cluster_policy {
                EmptyClusterPolicy::KeepPrevious => {
                    warn!(
                        "Cluster {} is empty in round {}, keeping its previous centroid",
                        cluster, self.rounds_run
                    );
                    new_centroids[range.clone()].copy_from_slice(&self.centroids[range]);
                }
                EmptyClusterPolicy::Fail => {
                    return Err(KMeansError::DegenerateCluster {
                        cluster,
                        round: self.rounds_run,
                    });
                }
            }
        }

        self.centroids = new_centroids;
        self.rounds_run += 1;
        Ok(())
    }

    /// Initialize, then run exactly `max_iteration` assign/update rounds.
    pub fn run(&mut self) -> Result<()> {
        info!(
            "Running k-means with {} clusters over {} points of dimension {} for {} rounds",
            self.num_clusters,
            self.num_points(),
            self.dimension,
            self.max_iteration
        );
        self.initialize_centroids();
        debug!("Initialization completed.");

        for iteration in 0..self.max_iteration {
            self.assign_points_to_clusters();
            self.update_centroids()?;
            if log_enabled!(Level::Debug) {
                if let Some(inertia) = self.inertia() {
                    debug!("Iteration {} - Inertia: {:.4}", iteration, inertia);
                }
            }
        }

        info!("K-means finished after {} rounds", self.rounds_run);
        Ok(())
    }

    /// Sum of squared distances between every point and its assigned centroid.
    /// `None` until the first assignment round.
    pub fn inertia(&self) -> Option<f64> {
        if self.labels.is_empty() {
            return None;
        }
        Some(
            self.data
                .chunks_exact(self.dimension)
                .zip(self.labels.iter())
                .map(|(data_point, &label)| {
                    L2DistanceCalculator::calculate_squared(
                        data_point,
                        &self.centroids[label * self.dimension..(label + 1) * self.dimension],
                    )
                })
                .sum(),
        )
    }
}

impl<R> KMeans<R> {
    pub fn num_clusters(&self) -> usize {
        self.num_clusters
    }

    pub fn max_iteration(&self) -> usize {
        self.max_iteration
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn num_points(&self) -> usize {
        self.data.len() / self.dimension
    }

    pub fn empty_cluster_policy(&self) -> EmptyClusterPolicy {
        self.empty_cluster_policy
    }

    pub fn rounds_run(&self) -> usize {
        self.rounds_run
    }

    pub fn point(&self, index: usize) -> Option<&[f64]> {
        if index < self.num_points() {
            Some(self.point_unchecked(index))
        } else {
            None
        }
    }

    fn point_unchecked(&self, index: usize) -> &[f64] {
        &self.data[index * self.dimension..(index + 1) * self.dimension]
    }

    /// Current centroids, one slice per cluster. Empty before initialization.
    pub fn centroids(&self) -> Vec<&[f64]> {
        self.centroids.chunks_exact(self.dimension).collect()
    }

    pub fn centroid(&self, cluster: usize) -> Option<&[f64]> {
        self.centroids.chunks_exact(self.dimension).nth(cluster)
    }

    pub fn flattened_centroids(&self) -> &[f64] {
        &self.centroids
    }

    /// Cluster index of every data point, in input order. Empty before the first assignment.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    pub fn result(&self) -> KMeansResult {
        KMeansResult {
            centroids: self.centroids.clone(),
            assignments: self.labels.clone(),
        }
    }
}
