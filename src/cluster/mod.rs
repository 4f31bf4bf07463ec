//! Clustering of participant feature rows.
//!
//! ## K-means
//!
//! Assign each point to the nearest centroid, then move each centroid to the
//! mean of its points. Repeat until the centroids stop moving.
//!
//! **Objective**: minimize the within-cluster sum of squares:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! The result is a heuristic partition, not a provably optimal one, and
//! cluster sizes are unconstrained: a requested team size cannot be enforced
//! here.
//!
//! ## Usage
//!
//! ```rust
//! use teamform::cluster::{Clustering, Kmeans};
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![0.1, 0.1],
//!     vec![10.0, 10.0],
//!     vec![10.1, 10.1],
//! ];
//!
//! let labels = Kmeans::new(2).with_seed(42).fit_predict(&data).unwrap();
//! assert_eq!(labels[0], labels[1]);
//! assert_ne!(labels[0], labels[2]);
//! ```

mod kmeans;
mod traits;
mod util;

pub use kmeans::{Kmeans, KmeansFit};
pub use traits::Clustering;
pub use util::squared_euclidean;
