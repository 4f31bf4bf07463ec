use thiserror::Error;

/// Errors returned by team generation.
#[derive(Debug, Error)]
pub enum Error {
    /// Input slice is empty.
    #[error("empty input")]
    EmptyInput,

    /// Not enough participants for the requested team count.
    #[error(
        "invalid configuration: requested {requested} teams, but {n_participants} participants allow at most {} teams",
        .n_participants / 2
    )]
    InvalidConfiguration {
        /// Requested number of teams.
        requested: usize,
        /// Number of participants in the roster.
        n_participants: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Requested cluster count is incompatible with the dataset.
    #[error("invalid cluster count: requested {requested}, but dataset has {n_items} items")]
    InvalidClusterCount {
        /// Requested number of clusters.
        requested: usize,
        /// Number of items in the dataset.
        n_items: usize,
    },

    /// Centroid iteration produced (or was fed) non-finite values.
    #[error("clustering failed: {0}")]
    ClusteringFailure(String),

    /// Rows of a matrix have inconsistent dimensionality.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimensionality.
        expected: usize,
        /// Found dimensionality.
        found: usize,
    },

    /// Roster or parameter JSON could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
