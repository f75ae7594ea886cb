use thiserror::Error;

pub type Result<T> = std::result::Result<T, KMeansError>;

/// Errors reported by the k-means engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KMeansError {
    /// The engine was constructed with parameters or data it cannot cluster.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An update round found a cluster without any assigned point.
    #[error("cluster {cluster} has no assigned points in round {round}")]
    DegenerateCluster { cluster: usize, round: usize },
}
