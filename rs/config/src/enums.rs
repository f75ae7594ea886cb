use serde::{Deserialize, Serialize};

/// What an update round does with a cluster that has no assigned points.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum EmptyClusterPolicy {
    /// Keep the centroid computed in the previous round.
    #[default]
    KeepPrevious,
    /// Stop the run and report the degenerate cluster.
    Fail,
}

impl From<i32> for EmptyClusterPolicy {
    fn from(value: i32) -> Self {
        match value {
            0 => EmptyClusterPolicy::KeepPrevious,
            1 => EmptyClusterPolicy::Fail,
            _ => EmptyClusterPolicy::KeepPrevious, // Default to KeepPrevious for unknown values
        }
    }
}
