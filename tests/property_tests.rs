use proptest::prelude::*;
use teamform::{generate_teams, ExperienceLevel, MatchParams, Participant, Role};

const LEVELS: [ExperienceLevel; 4] = [
    ExperienceLevel::Beginner,
    ExperienceLevel::Intermediate,
    ExperienceLevel::Advanced,
    ExperienceLevel::Expert,
];
const SKILLS: [&str; 6] = ["Rust", "Python", "Go", "React", "Docker", "SQL"];
const INTERESTS: [&str; 4] = ["AI", "Climate", "Health", "Games"];

fn participant(i: usize) -> impl Strategy<Value = Participant> {
    (
        0usize..4,
        any::<bool>(),
        0usize..8,
        prop::collection::vec(0usize..SKILLS.len(), 0..3),
        prop::collection::vec(0usize..INTERESTS.len(), 0..2),
    )
        .prop_map(move |(level, leader, role, skills, interests)| {
            Participant::new(format!("p{i}"))
                .with_experience(LEVELS[level])
                .with_leadership(leader)
                .with_role(Role::ALL[role])
                .with_programming_langs(skills.iter().map(|&s| SKILLS[s]))
                .with_interests(interests.iter().map(|&s| INTERESTS[s]))
        })
}

fn roster() -> impl Strategy<Value = Vec<Participant>> {
    (2usize..24).prop_flat_map(|n| (0..n).map(participant).collect::<Vec<_>>())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_every_participant_placed_once(roster in roster(), k in 1usize..6) {
        let teams = generate_teams(&roster, &MatchParams::new(k)).unwrap();

        prop_assert!(teams.len() <= k.min(roster.len() / 2));
        let mut names: Vec<String> = teams
            .iter()
            .flat_map(|t| t.members.iter().map(|p| p.name.clone()))
            .collect();
        prop_assert_eq!(names.len(), roster.len());
        names.sort();
        names.dedup();
        prop_assert_eq!(names.len(), roster.len());

        for (i, t) in teams.iter().enumerate() {
            prop_assert_eq!(t.id, i + 1);
            prop_assert!(t.size > 0);
            prop_assert!(t.common_skills.len() <= 5);
            prop_assert!(t.common_interests.len() <= 3);
        }
    }

    #[test]
    fn prop_deterministic(roster in roster(), k in 1usize..6) {
        let params = MatchParams::new(k);
        let a = generate_teams(&roster, &params).unwrap();
        let b = generate_teams(&roster, &params).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_leader_present_when_enough_leaders(roster in roster(), k in 1usize..6) {
        let teams = generate_teams(&roster, &MatchParams::new(k)).unwrap();
        // Empty clusters also draw a leader, so compare against the cluster count.
        let clusters = k.min(roster.len() / 2);
        let leaders = roster.iter().filter(|p| p.leadership_interest).count();
        if leaders >= clusters {
            prop_assert!(teams.iter().all(|t| t.has_leader));
        }
    }
}
