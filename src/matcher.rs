//! The matching pipeline: encode → cluster → balance → format.

use tracing::{debug, error, info};

use crate::balance::Balancer;
use crate::cluster::Kmeans;
use crate::config::MatchParams;
use crate::error::{Error, Result};
use crate::features::FeatureEncoder;
use crate::participant::Participant;
use crate::team::{Team, TeamFormatter};

/// Forms teams from a roster.
///
/// Every call recomputes everything from scratch; nothing is cached between
/// calls. Same roster (same order) and same parameters give the same teams.
#[derive(Debug, Clone, Default)]
pub struct TeamMatcher {
    params: MatchParams,
}

impl TeamMatcher {
    pub fn new(params: MatchParams) -> Self {
        Self { params }
    }

    /// Number of teams actually formed for `n_participants`: the requested
    /// count capped at `n_participants / 2`.
    pub fn effective_team_count(&self, n_participants: usize) -> Result<usize> {
        let k = self.params.num_teams.min(n_participants / 2);
        if k == 0 {
            return Err(Error::InvalidConfiguration {
                requested: self.params.num_teams,
                n_participants,
            });
        }
        Ok(k)
    }

    /// Generate teams for `participants`.
    ///
    /// Either every team is returned or the call fails; there are no partial results.
    pub fn generate_teams(&self, participants: &[Participant]) -> Result<Vec<Team>> {
        self.run(participants).inspect_err(|e| {
            error!(participants = participants.len(), error = %e, "team generation failed");
        })
    }

    fn run(&self, participants: &[Participant]) -> Result<Vec<Team>> {
        let params = &self.params;
        params.validate()?;

        let n = participants.len();
        let k = self.effective_team_count(n)?;
        if k < params.num_teams {
            debug!(
                requested = params.num_teams,
                k, n, "capped team count to participants / 2"
            );
        }

        let features = FeatureEncoder::from_params(params).encode(participants)?;

        let fit = Kmeans::new(k)
            .with_seed(params.seed)
            .with_max_iter(params.max_iter)
            .with_tol(params.tolerance)
            .fit(features.rows())?;
        debug!(sizes = ?fit.cluster_sizes(), "clustered roster");

        let mut clusters: Vec<Vec<usize>> = vec![Vec::new(); k];
        for (i, &label) in fit.labels.iter().enumerate() {
            clusters[label].push(i);
        }

        let balanced = Balancer::new(params.balance_priority, params.include_leadership)
            .balance(participants, clusters);
        let leaders_moved = balanced.leaders_moved;
        let teams = TeamFormatter::new().format(participants, balanced);

        info!(
            teams = teams.len(),
            participants = n,
            priority = %params.balance_priority,
            leaders_moved,
            "generated teams"
        );
        Ok(teams)
    }
}

/// Generate teams with `params`. Shorthand for [`TeamMatcher::generate_teams`].
pub fn generate_teams(participants: &[Participant], params: &MatchParams) -> Result<Vec<Team>> {
    TeamMatcher::new(params.clone()).generate_teams(participants)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_team_count() {
        let m = TeamMatcher::new(MatchParams::new(5));
        assert_eq!(m.effective_team_count(6).unwrap(), 3);
        assert_eq!(m.effective_team_count(20).unwrap(), 5);
        assert!(matches!(
            m.effective_team_count(1),
            Err(Error::InvalidConfiguration {
                requested: 5,
                n_participants: 1
            })
        ));
        assert!(TeamMatcher::new(MatchParams::new(0))
            .effective_team_count(10)
            .is_err());
    }

    #[test]
    fn test_invalid_params_rejected_before_work() {
        let roster: Vec<Participant> = (0..4).map(|i| Participant::new(format!("p{i}"))).collect();
        let params = MatchParams::new(2).with_weights(-1.0, 0.3, 0.4);
        assert!(matches!(
            generate_teams(&roster, &params),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_empty_roster() {
        assert!(matches!(
            generate_teams(&[], &MatchParams::new(2)),
            Err(Error::InvalidConfiguration { .. })
        ));
    }
}
