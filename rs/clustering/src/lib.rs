pub mod error;
pub mod kmeans;

pub use error::{KMeansError, Result};
pub use kmeans::kmeans::{KMeans, KMeansResult};
