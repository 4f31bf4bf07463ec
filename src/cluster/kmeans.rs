//! K-means: k-means++ seeding followed by Lloyd iterations.
//!
//! # Determinism
//!
//! Seeding draws from a `StdRng` built from a fixed seed, and assignment ties
//! go to the lowest centroid index. The same rows in the same order with the
//! same seed always yield the same labels.
//!
//! # Convergence
//!
//! Iteration stops once the summed squared displacement of all centroids is
//! at most `tol`, or after `max_iter` rounds.
//!
//! # Empty clusters
//!
//! A centroid that loses all its points keeps its previous position. The
//! resulting empty cluster is reported as-is; nothing is re-seeded.

use rand::prelude::*;
use tracing::debug;

use super::traits::Clustering;
use super::util::squared_euclidean;
use crate::error::{Error, Result};

/// K-means clustering.
#[derive(Debug, Clone)]
pub struct Kmeans {
    k: usize,
    max_iter: usize,
    tol: f32,
    seed: u64,
}

/// Output of [`Kmeans::fit`].
#[derive(Debug, Clone, PartialEq)]
pub struct KmeansFit {
    /// Final centroids, one per cluster.
    pub centroids: Vec<Vec<f32>>,
    /// Nearest-centroid label per input row.
    pub labels: Vec<usize>,
    /// Within-cluster sum of squared distances.
    pub inertia: f32,
    /// Lloyd rounds performed.
    pub iterations: usize,
}

impl KmeansFit {
    /// Number of rows assigned to each cluster.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.centroids.len()];
        for &l in &self.labels {
            sizes[l] += 1;
        }
        sizes
    }
}

impl Kmeans {
    /// Create a k-means clusterer with `k` clusters, seed 42.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: 300,
            tol: 1e-4,
            seed: 42,
        }
    }

    /// Set the Lloyd iteration cap.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the convergence tolerance.
    pub fn with_tol(mut self, tol: f32) -> Self {
        self.tol = tol;
        self
    }

    /// Set the seeding RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    fn validate(&self, data: &[Vec<f32>]) -> Result<usize> {
        let n = data.len();
        if n == 0 {
            return Err(Error::EmptyInput);
        }
        if self.k == 0 || self.k > n {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_items: n,
            });
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }

        let dim = data[0].len();
        for (i, row) in data.iter().enumerate() {
            if row.len() != dim {
                return Err(Error::DimensionMismatch {
                    expected: dim,
                    found: row.len(),
                });
            }
            if row.iter().any(|x| !x.is_finite()) {
                return Err(Error::ClusteringFailure(format!(
                    "non-finite value in row {i}"
                )));
            }
        }
        Ok(dim)
    }

    /// k-means++ seeding: each next centroid is drawn with probability
    /// proportional to its squared distance from the nearest chosen one.
    fn init_centroids(&self, data: &[Vec<f32>], rng: &mut StdRng) -> Vec<Vec<f32>> {
        let n = data.len();
        let mut centroids: Vec<Vec<f32>> = Vec::with_capacity(self.k);
        centroids.push(data[rng.random_range(0..n)].clone());

        let mut min_dist: Vec<f32> = data
            .iter()
            .map(|x| squared_euclidean(x, &centroids[0]))
            .collect();

        while centroids.len() < self.k {
            let total: f32 = min_dist.iter().sum();
            let next = if total > 0.0 && total.is_finite() {
                weighted_pick(&min_dist, rng.random::<f32>() * total)
            } else {
                // Every row coincides with a chosen centroid.
                rng.random_range(0..n)
            };

            let c = data[next].clone();
            for (d, x) in min_dist.iter_mut().zip(data) {
                *d = d.min(squared_euclidean(x, &c));
            }
            centroids.push(c);
        }

        centroids
    }

    fn nearest(centroids: &[Vec<f32>], x: &[f32]) -> (usize, f32) {
        let mut best = 0;
        let mut best_dist = f32::INFINITY;
        for (j, c) in centroids.iter().enumerate() {
            let d = squared_euclidean(x, c);
            if d < best_dist {
                best = j;
                best_dist = d;
            }
        }
        (best, best_dist)
    }

    /// Fit centroids and label every row.
    pub fn fit(&self, data: &[Vec<f32>]) -> Result<KmeansFit> {
        let dim = self.validate(data)?;
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut centroids = self.init_centroids(data, &mut rng);
        let mut labels = vec![0usize; data.len()];
        let mut iterations = 0;

        while iterations < self.max_iter {
            iterations += 1;

            for (label, x) in labels.iter_mut().zip(data) {
                *label = Self::nearest(&centroids, x).0;
            }

            let mut sums = vec![vec![0.0f32; dim]; self.k];
            let mut counts = vec![0usize; self.k];
            for (x, &l) in data.iter().zip(&labels) {
                counts[l] += 1;
                for (s, v) in sums[l].iter_mut().zip(x) {
                    *s += v;
                }
            }

            let mut shift = 0.0f32;
            for (j, (sum, count)) in sums.into_iter().zip(counts).enumerate() {
                if count == 0 {
                    continue;
                }
                let updated: Vec<f32> = sum.into_iter().map(|s| s / count as f32).collect();
                if updated.iter().any(|v| !v.is_finite()) {
                    return Err(Error::ClusteringFailure(format!(
                        "centroid {j} became non-finite at iteration {iterations}"
                    )));
                }
                shift += squared_euclidean(&centroids[j], &updated);
                centroids[j] = updated;
            }

            if shift <= self.tol {
                break;
            }
        }

        let mut inertia = 0.0f32;
        for (label, x) in labels.iter_mut().zip(data) {
            let (j, d) = Self::nearest(&centroids, x);
            *label = j;
            inertia += d;
        }
        if !inertia.is_finite() {
            return Err(Error::ClusteringFailure("inertia is non-finite".to_string()));
        }

        debug!(k = self.k, iterations, inertia, "k-means finished");

        Ok(KmeansFit {
            centroids,
            labels,
            inertia,
            iterations,
        })
    }
}

/// Index whose bucket in the cumulative `weights` contains `target`.
///
/// Zero-weight rows are never picked. If rounding leaves `target` past the
/// last bucket, the last row with positive weight is returned.
fn weighted_pick(weights: &[f32], mut target: f32) -> usize {
    let mut last_positive = 0;
    for (i, &w) in weights.iter().enumerate() {
        if w <= 0.0 {
            continue;
        }
        if target < w {
            return i;
        }
        target -= w;
        last_positive = i;
    }
    last_positive
}

impl Clustering for Kmeans {
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>> {
        Ok(self.fit(data)?.labels)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}
