//! Team balancing.
//!
//! Clustering decides membership. The balancer only moves participants for
//! one reason: to give every team a potential leader. All other policies
//! annotate teams with an advisory [`TeamMetric`], kept in a side-channel
//! parallel to the member lists.
//!
//! ## Leadership pass
//!
//! Teams with no leader-flagged member are *deficient*, empty teams
//! included. In every other team, leaders beyond the first are *surplus*. Surplus leaders are moved (never
//! copied) into deficient teams, one per team, until either side runs out.
//! Teams still without a leader surface as `has_leader = false`.

use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::participant::Participant;
use crate::stats::{mean_experience, most_common};

/// Which advisory metric to attach to each team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BalancePriority {
    #[serde(rename = "Experience Balance")]
    ExperienceBalance,
    #[serde(rename = "Role Diversity")]
    RoleDiversity,
    #[default]
    #[serde(rename = "Skill Diversity")]
    SkillDiversity,
    #[serde(rename = "Interest Alignment")]
    InterestAlignment,
}

impl BalancePriority {
    pub fn as_str(self) -> &'static str {
        match self {
            BalancePriority::ExperienceBalance => "Experience Balance",
            BalancePriority::RoleDiversity => "Role Diversity",
            BalancePriority::SkillDiversity => "Skill Diversity",
            BalancePriority::InterestAlignment => "Interest Alignment",
        }
    }
}

impl FromStr for BalancePriority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "Experience Balance" => Ok(BalancePriority::ExperienceBalance),
            "Role Diversity" => Ok(BalancePriority::RoleDiversity),
            "Skill Diversity" => Ok(BalancePriority::SkillDiversity),
            "Interest Alignment" => Ok(BalancePriority::InterestAlignment),
            _ => Err(Error::InvalidParameter {
                name: "balance_priority",
                message: "expected one of Experience Balance, Role Diversity, Skill Diversity, Interest Alignment",
            }),
        }
    }
}

impl std::fmt::Display for BalancePriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advisory per-team annotation produced by a [`BalancePriority`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamMetric {
    /// Mean experience score.
    AvgExperience(f32),
    /// Distinct roles divided by team size.
    RoleDiversity(f32),
    /// Distinct languages, frameworks and tools.
    TotalSkills(usize),
    /// Top 3 interests by count.
    CommonInterests(Vec<String>),
}

impl TeamMetric {
    /// Compute the metric `priority` asks for.
    pub fn compute(priority: BalancePriority, members: &[&Participant]) -> Self {
        match priority {
            BalancePriority::ExperienceBalance => {
                TeamMetric::AvgExperience(mean_experience(members))
            }
            BalancePriority::RoleDiversity => {
                let ratio = if members.is_empty() {
                    0.0
                } else {
                    let roles: HashSet<_> = members.iter().map(|p| p.role_preference).collect();
                    roles.len() as f32 / members.len() as f32
                };
                TeamMetric::RoleDiversity(ratio)
            }
            BalancePriority::SkillDiversity => {
                let skills: HashSet<&str> = members
                    .iter()
                    .flat_map(|p| {
                        p.programming_langs
                            .iter()
                            .chain(&p.frameworks)
                            .chain(&p.tools)
                            .map(String::as_str)
                    })
                    .collect();
                TeamMetric::TotalSkills(skills.len())
            }
            BalancePriority::InterestAlignment => TeamMetric::CommonInterests(most_common(
                members
                    .iter()
                    .flat_map(|p| p.interests.iter().map(String::as_str)),
                3,
            )),
        }
    }
}

/// Team memberships after balancing, as indices into the roster.
#[derive(Debug, Clone, PartialEq)]
pub struct BalancedTeams {
    /// Roster indices per team, in team order.
    pub members: Vec<Vec<usize>>,
    /// One metric per team, parallel to `members`.
    pub metrics: Vec<TeamMetric>,
    /// Leaders moved by the leadership pass.
    pub leaders_moved: usize,
}

/// Applies a [`BalancePriority`] and, optionally, the leadership pass.
#[derive(Debug, Clone, Copy)]
pub struct Balancer {
    priority: BalancePriority,
    include_leadership: bool,
}

impl Balancer {
    pub fn new(priority: BalancePriority, include_leadership: bool) -> Self {
        Self {
            priority,
            include_leadership,
        }
    }

    /// Balance clustered `teams` (roster indices) drawn from `roster`.
    ///
    /// Metrics describe the clustered membership; leadership moves happen after.
    pub fn balance(&self, roster: &[Participant], mut teams: Vec<Vec<usize>>) -> BalancedTeams {
        let metrics = teams
            .iter()
            .map(|team| {
                let members: Vec<&Participant> = team.iter().map(|&i| &roster[i]).collect();
                TeamMetric::compute(self.priority, &members)
            })
            .collect();

        let leaders_moved = if self.include_leadership {
            ensure_leadership(roster, &mut teams)
        } else {
            0
        };

        BalancedTeams {
            members: teams,
            metrics,
            leaders_moved,
        }
    }
}

/// Move surplus leaders into leaderless teams. Returns the number moved.
pub fn ensure_leadership(roster: &[Participant], teams: &mut [Vec<usize>]) -> usize {
    let deficient: Vec<usize> = teams
        .iter()
        .enumerate()
        .filter(|(_, team)| !team.iter().any(|&i| roster[i].leadership_interest))
        .map(|(t, _)| t)
        .collect();

    // (team, roster index) for every leader after the first in its team.
    let mut surplus: Vec<(usize, usize)> = teams
        .iter()
        .enumerate()
        .flat_map(|(t, team)| {
            team.iter()
                .copied()
                .filter(|&i| roster[i].leadership_interest)
                .skip(1)
                .map(move |i| (t, i))
        })
        .collect();

    let mut moved = 0;
    for &target in &deficient {
        let Some((source, leader)) = surplus.pop() else {
            break;
        };
        teams[source].retain(|&i| i != leader);
        teams[target].push(leader);
        moved += 1;
        debug!(
            leader = %roster[leader].name,
            from = source,
            to = target,
            "moved surplus leader"
        );
    }

    let unmet = deficient.len() - moved;
    if unmet > 0 {
        warn!(
            teams_without_leader = unmet,
            "not enough surplus leaders for every team"
        );
    }

    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::{ExperienceLevel, Role};

    fn person(name: &str, leader: bool) -> Participant {
        Participant::new(name).with_leadership(leader)
    }

    fn count(teams: &[Vec<usize>]) -> usize {
        teams.iter().map(Vec::len).sum()
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!(
            "Role Diversity".parse::<BalancePriority>().unwrap(),
            BalancePriority::RoleDiversity
        );
        assert!("Vibes".parse::<BalancePriority>().is_err());
        assert_eq!(BalancePriority::InterestAlignment.to_string(), "Interest Alignment");
    }

    #[test]
    fn test_leadership_feasible() {
        let roster = vec![
            person("a", true),
            person("b", true),
            person("c", false),
            person("d", false),
            person("e", false),
            person("f", false),
        ];
        let mut teams = vec![vec![0, 1, 2], vec![3, 4, 5]];
        let moved = ensure_leadership(&roster, &mut teams);

        assert_eq!(moved, 1);
        assert_eq!(teams, vec![vec![0, 2], vec![3, 4, 5, 1]]);
        assert_eq!(count(&teams), 6);
    }

    #[test]
    fn test_leadership_infeasible() {
        let roster: Vec<Participant> = (0..6).map(|i| person(&i.to_string(), i == 0)).collect();
        let mut teams = vec![vec![0, 1], vec![2, 3], vec![4, 5]];
        let moved = ensure_leadership(&roster, &mut teams);

        assert_eq!(moved, 0);
        assert_eq!(teams, vec![vec![0, 1], vec![2, 3], vec![4, 5]]);
    }

    #[test]
    fn test_leadership_partial() {
        // Team 0 has three leaders (two surplus); three teams lack one.
        let roster: Vec<Participant> = (0..8).map(|i| person(&i.to_string(), i < 3)).collect();
        let mut teams = vec![vec![0, 1, 2], vec![3, 4], vec![5, 6], vec![7]];
        let moved = ensure_leadership(&roster, &mut teams);

        assert_eq!(moved, 2);
        assert_eq!(teams[0], vec![0]);
        assert_eq!(teams[1], vec![3, 4, 2]);
        assert_eq!(teams[2], vec![5, 6, 1]);
        assert_eq!(teams[3], vec![7]);
        assert_eq!(count(&teams), 8);
    }

    #[test]
    fn test_leadership_counts_empty_teams_as_deficient() {
        let roster = vec![person("a", true), person("b", true), person("c", false)];
        let mut teams = vec![vec![0, 1], vec![], vec![2]];
        assert_eq!(ensure_leadership(&roster, &mut teams), 1);
        assert_eq!(teams, vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn test_metrics_reflect_clustered_membership() {
        let expert = |name: &str, leader: bool| {
            person(name, leader).with_experience(ExperienceLevel::Expert)
        };
        let roster = vec![
            expert("a", true),
            expert("b", true),
            expert("c", false),
            person("d", false),
            person("e", false),
            person("f", false),
        ];
        let balanced = Balancer::new(BalancePriority::ExperienceBalance, true)
            .balance(&roster, vec![vec![0, 1, 2], vec![3, 4, 5]]);

        assert_eq!(balanced.leaders_moved, 1);
        assert_eq!(balanced.members, vec![vec![0, 2], vec![3, 4, 5, 1]]);
        assert_eq!(
            balanced.metrics,
            vec![TeamMetric::AvgExperience(4.0), TeamMetric::AvgExperience(1.0)]
        );
    }

    #[test]
    fn test_metrics() {
        let a = Participant::new("a")
            .with_experience(ExperienceLevel::Expert)
            .with_role(Role::Designer)
            .with_programming_langs(["Rust"])
            .with_frameworks(["Axum"])
            .with_databases(["Postgres"])
            .with_interests(["AI", "Climate"]);
        let b = Participant::new("b")
            .with_role(Role::Designer)
            .with_programming_langs(["Rust", "Go"])
            .with_interests(["Climate", "Health", "Games"]);
        let members = [&a, &b];

        assert_eq!(
            TeamMetric::compute(BalancePriority::ExperienceBalance, &members),
            TeamMetric::AvgExperience(2.5)
        );
        assert_eq!(
            TeamMetric::compute(BalancePriority::RoleDiversity, &members),
            TeamMetric::RoleDiversity(0.5)
        );
        assert_eq!(
            TeamMetric::compute(BalancePriority::SkillDiversity, &members),
            TeamMetric::TotalSkills(3)
        );
        assert_eq!(
            TeamMetric::compute(BalancePriority::InterestAlignment, &members),
            TeamMetric::CommonInterests(vec![
                "Climate".to_string(),
                "AI".to_string(),
                "Health".to_string()
            ])
        );
        assert_eq!(
            TeamMetric::compute(BalancePriority::RoleDiversity, &[]),
            TeamMetric::RoleDiversity(0.0)
        );
    }

    #[test]
    fn test_balance_without_leadership() {
        let roster = vec![person("a", true), person("b", true), person("c", false), person("d", false)];
        let teams = vec![vec![0, 1], vec![2, 3]];
        let balanced = Balancer::new(BalancePriority::ExperienceBalance, false)
            .balance(&roster, teams.clone());
        assert_eq!(balanced.members, teams);
        assert_eq!(balanced.leaders_moved, 0);
        assert_eq!(balanced.metrics.len(), 2);
    }
}
