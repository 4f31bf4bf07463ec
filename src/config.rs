//! Generation parameters.

use serde::{Deserialize, Serialize};

use crate::balance::BalancePriority;
use crate::error::{Error, Result};

/// Parameters for one [`generate_teams`](crate::TeamMatcher::generate_teams) call.
///
/// Missing fields take their defaults when loaded from JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchParams {
    /// Requested number of teams. Capped at `n_participants / 2`.
    pub num_teams: usize,

    /// Desired team size. Informational only; actual sizes come out of clustering.
    pub team_size: usize,

    /// Which advisory metric to annotate teams with.
    pub balance_priority: BalancePriority,

    /// Run the leadership pass after clustering.
    pub include_leadership: bool,

    /// Scale applied to skill text features.
    pub weight_skills: f32,

    /// Scale applied to experience, leadership, size preference and role columns.
    pub weight_experience: f32,

    /// Scale applied to interest text features.
    pub weight_interests: f32,

    /// Seed for k-means++ initialization.
    pub seed: u64,

    /// Lloyd iteration cap.
    pub max_iter: usize,

    /// Convergence tolerance on total squared centroid shift.
    pub tolerance: f32,
}

impl Default for MatchParams {
    fn default() -> Self {
        Self {
            num_teams: 4,
            team_size: 4,
            balance_priority: BalancePriority::default(),
            include_leadership: true,
            weight_skills: 0.3,
            weight_experience: 0.3,
            weight_interests: 0.4,
            seed: 42,
            max_iter: 300,
            tolerance: 1e-4,
        }
    }
}

impl MatchParams {
    /// Default parameters requesting `num_teams` teams.
    pub fn new(num_teams: usize) -> Self {
        Self {
            num_teams,
            ..Self::default()
        }
    }

    /// Load parameters from a JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Set the requested number of teams.
    pub fn with_num_teams(mut self, num_teams: usize) -> Self {
        self.num_teams = num_teams;
        self
    }

    /// Set the advisory team size.
    pub fn with_team_size(mut self, team_size: usize) -> Self {
        self.team_size = team_size;
        self
    }

    /// Set the balance priority.
    pub fn with_balance_priority(mut self, priority: BalancePriority) -> Self {
        self.balance_priority = priority;
        self
    }

    /// Enable or disable the leadership pass.
    pub fn with_leadership(mut self, include_leadership: bool) -> Self {
        self.include_leadership = include_leadership;
        self
    }

    /// Set the three encoder weights (skills, experience, interests).
    pub fn with_weights(mut self, skills: f32, experience: f32, interests: f32) -> Self {
        self.weight_skills = skills;
        self.weight_experience = experience;
        self.weight_interests = interests;
        self
    }

    /// Set the clustering seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the iteration cap.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Check weights and k-means knobs.
    pub fn validate(&self) -> Result<()> {
        for (name, w) in [
            ("weight_skills", self.weight_skills),
            ("weight_experience", self.weight_experience),
            ("weight_interests", self.weight_interests),
        ] {
            if !w.is_finite() || w < 0.0 {
                return Err(Error::InvalidParameter {
                    name,
                    message: "must be finite and non-negative",
                });
            }
        }

        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }

        if self.tolerance.is_nan() || self.tolerance <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "tolerance",
                message: "must be positive",
            });
        }

        Ok(())
    }

    /// Team count that would give teams of roughly `team_size` members.
    ///
    /// Convenience for callers that think in sizes; `generate_teams` itself
    /// only reads `num_teams`.
    pub fn num_teams_for_size(n_participants: usize, team_size: usize) -> usize {
        if team_size == 0 {
            return 1;
        }
        let teams = (n_participants as f64 / team_size as f64).round() as usize;
        teams.max(1)
    }
}
