//! Output teams.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::balance::{BalancedTeams, TeamMetric};
use crate::participant::Participant;
use crate::stats::{mean_experience, most_common};

/// Number of entries in [`Team::common_skills`].
pub const TOP_SKILLS: usize = 5;
/// Number of entries in [`Team::common_interests`].
pub const TOP_INTERESTS: usize = 3;

/// One generated team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// 1-based, sequential in output order.
    pub id: usize,
    pub members: Vec<Participant>,
    pub size: usize,
    /// Mean experience score (1..=4).
    pub avg_experience: f32,
    /// Number of distinct preferred roles.
    pub role_diversity: usize,
    /// Whether any member expressed leadership interest.
    pub has_leader: bool,
    /// Most frequent languages and frameworks, ties in first-seen order.
    pub common_skills: Vec<String>,
    /// Most frequent interests, ties in first-seen order.
    pub common_interests: Vec<String>,
    /// Advisory annotation from the balance priority.
    pub metric: TeamMetric,
}

impl Team {
    /// Members who expressed leadership interest.
    pub fn leaders(&self) -> impl Iterator<Item = &Participant> {
        self.members.iter().filter(|p| p.leadership_interest)
    }

    /// Whether a participant with this name is on the team.
    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|p| p.name == name)
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.members.iter().map(|p| p.name.as_str()).collect();
        write!(
            f,
            "Team {} ({} members, avg experience {:.2}, {} roles{}): {}",
            self.id,
            self.size,
            self.avg_experience,
            self.role_diversity,
            if self.has_leader { ", has leader" } else { "" },
            names.join(", ")
        )?;
        if !self.common_skills.is_empty() {
            write!(f, " | skills: {}", self.common_skills.join(", "))?;
        }
        if !self.common_interests.is_empty() {
            write!(f, " | interests: {}", self.common_interests.join(", "))?;
        }
        Ok(())
    }
}

/// Turns balanced memberships into [`Team`] records.
#[derive(Debug, Clone, Copy, Default)]
pub struct TeamFormatter;

impl TeamFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Build the final team list. Empty teams are dropped, then ids are
    /// assigned 1, 2, 3, ... in team order.
    pub fn format(&self, roster: &[Participant], balanced: BalancedTeams) -> Vec<Team> {
        let total = balanced.members.len();
        let teams: Vec<Team> = balanced
            .members
            .into_iter()
            .zip(balanced.metrics)
            .filter(|(members, _)| !members.is_empty())
            .enumerate()
            .map(|(i, (indices, metric))| {
                let members: Vec<&Participant> = indices.iter().map(|&j| &roster[j]).collect();
                Self::summarize(i + 1, &members, metric)
            })
            .collect();

        if teams.len() < total {
            warn!(
                discarded = total - teams.len(),
                "discarded teams with no members"
            );
        }
        teams
    }

    fn summarize(id: usize, members: &[&Participant], metric: TeamMetric) -> Team {
        let roles: HashSet<_> = members.iter().map(|p| p.role_preference).collect();
        let common_skills = most_common(
            members.iter().flat_map(|p| {
                p.programming_langs
                    .iter()
                    .chain(&p.frameworks)
                    .map(String::as_str)
            }),
            TOP_SKILLS,
        );
        let common_interests = most_common(
            members
                .iter()
                .flat_map(|p| p.interests.iter().map(String::as_str)),
            TOP_INTERESTS,
        );

        Team {
            id,
            members: members.iter().map(|&p| p.clone()).collect(),
            size: members.len(),
            avg_experience: mean_experience(members),
            role_diversity: roles.len(),
            has_leader: members.iter().any(|p| p.leadership_interest),
            common_skills,
            common_interests,
            metric,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::{ExperienceLevel, Role};

    fn roster() -> Vec<Participant> {
        vec![
            Participant::new("ana")
                .with_experience(ExperienceLevel::Advanced)
                .with_role(Role::BackendDeveloper)
                .with_programming_langs(["Go", "Rust"])
                .with_interests(["Fintech"]),
            Participant::new("ben")
                .with_leadership(true)
                .with_programming_langs(["Rust"])
                .with_frameworks(["Go"])
                .with_databases(["Redis"])
                .with_interests(["Games", "Fintech"]),
            Participant::new("cy").with_role(Role::Designer),
        ]
    }

    fn balanced(members: Vec<Vec<usize>>) -> BalancedTeams {
        let metrics = members.iter().map(|_| TeamMetric::TotalSkills(0)).collect();
        BalancedTeams {
            members,
            metrics,
            leaders_moved: 0,
        }
    }

    #[test]
    fn test_format_summary() {
        let roster = roster();
        let teams = TeamFormatter::new().format(&roster, balanced(vec![vec![0, 1, 2]]));
        assert_eq!(teams.len(), 1);

        let t = &teams[0];
        assert_eq!(t.id, 1);
        assert_eq!(t.size, 3);
        assert!((t.avg_experience - 5.0 / 3.0).abs() < 1e-6);
        assert_eq!(t.role_diversity, 3);
        assert!(t.has_leader);
        assert_eq!(t.leaders().count(), 1);
        // Go and Rust tie at 2; Go was seen first. Databases are not counted.
        assert_eq!(t.common_skills, vec!["Go", "Rust"]);
        assert_eq!(t.common_interests, vec!["Fintech", "Games"]);
        assert!(t.contains("cy"));
    }

    #[test]
    fn test_empty_teams_discarded_and_ids_sequential() {
        let roster = roster();
        let teams = TeamFormatter::new().format(&roster, balanced(vec![vec![0], vec![], vec![1, 2]]));
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].id, 1);
        assert_eq!(teams[1].id, 2);
        assert!(teams[1].contains("ben"));
        assert!(!teams[0].has_leader);
    }

    #[test]
    fn test_display() {
        let roster = roster();
        let teams = TeamFormatter::new().format(&roster, balanced(vec![vec![1, 2]]));
        let line = teams[0].to_string();
        assert!(line.starts_with("Team 1 (2 members"));
        assert!(line.contains("has leader"));
        assert!(line.contains("ben, cy"));
    }
}
