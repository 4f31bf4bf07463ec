use crate::error::Result;

/// Common interface for hard clustering algorithms (one label per row).
pub trait Clustering {
    /// Fit the model and return one cluster label per input row.
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>>;

    /// The configured number of clusters.
    fn n_clusters(&self) -> usize;
}
