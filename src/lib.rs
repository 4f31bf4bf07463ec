//! Balanced team formation.
//!
//! `teamform` splits a roster of event participants into small teams:
//!
//! 1. [`features`]: encode each participant as a standardized numeric row
//!    (experience, leadership, size preference, role one-hot, TF-IDF over
//!    skills and interests).
//! 2. [`cluster`]: k-means with deterministic k-means++ seeding.
//! 3. [`balance`]: annotate teams per [`BalancePriority`] and move surplus
//!    leaders into leaderless teams.
//! 4. [`team`]: drop empty teams, number them, and summarize each.
//!
//! ```rust
//! use teamform::{generate_teams, MatchParams, Participant};
//!
//! let roster: Vec<Participant> = (0..8)
//!     .map(|i| Participant::new(format!("p{i}")).with_leadership(i % 4 == 0))
//!     .collect();
//!
//! let teams = generate_teams(&roster, &MatchParams::new(2)).unwrap();
//! let placed: usize = teams.iter().map(|t| t.size).sum();
//! assert_eq!(placed, roster.len());
//! ```

#![forbid(unsafe_code)]

pub mod balance;
pub mod cluster;
pub mod config;
pub mod error;
pub mod features;
pub mod matcher;
pub mod participant;
pub mod stats;
pub mod team;

pub use balance::{BalancePriority, BalancedTeams, Balancer, TeamMetric};
pub use cluster::{Clustering, Kmeans, KmeansFit};
pub use config::MatchParams;
pub use error::{Error, Result};
pub use features::{FeatureEncoder, FeatureMatrix, StandardScaler, TfidfVectorizer};
pub use matcher::{generate_teams, TeamMatcher};
pub use participant::{ExperienceLevel, Participant, Role};
pub use team::{Team, TeamFormatter};
