//! Form teams from a small hackathon roster and print them.

use teamform::{generate_teams, BalancePriority, MatchParams, Participant};

const ROSTER: &str = r#"[
    {"name": "Asha", "experience_level": "Expert", "leadership_interest": true,
     "role_preference": "ML Engineer", "programming_langs": ["Python"], "frameworks": ["PyTorch"],
     "interests": ["AI", "Healthcare"]},
    {"name": "Bruno", "experience_level": "Beginner", "role_preference": "Designer",
     "tools": ["Figma"], "interests": ["Games"]},
    {"name": "Chen", "experience_level": "Advanced", "leadership_interest": true,
     "role_preference": "Backend Developer", "programming_langs": ["Rust", "Go"],
     "databases": ["Postgres"], "interests": ["Fintech"]},
    {"name": "Dana", "experience_level": "Intermediate", "role_preference": "Frontend Developer",
     "programming_langs": ["TypeScript"], "frameworks": ["React"], "interests": ["Education", "Games"]},
    {"name": "Eli", "experience_level": "Intermediate", "role_preference": "Data Scientist",
     "programming_langs": ["Python", "R"], "interests": ["Healthcare"]},
    {"name": "Fatima", "experience_level": "Expert", "leadership_interest": true,
     "role_preference": "DevOps", "tools": ["Docker", "Kubernetes"], "interests": ["Climate"]},
    {"name": "Gus", "role_preference": "Product Manager", "interests": ["Fintech", "Climate"]},
    {"name": "Hana", "experience_level": "Advanced", "role_preference": "Full Stack Developer",
     "programming_langs": ["TypeScript", "Go"], "frameworks": ["React"], "interests": ["AI"]}
]"#;

fn main() -> teamform::Result<()> {
    let roster = Participant::roster_from_json(ROSTER)?;
    let params = MatchParams::new(MatchParams::num_teams_for_size(roster.len(), 3))
        .with_team_size(3)
        .with_balance_priority(BalancePriority::RoleDiversity);

    let teams = generate_teams(&roster, &params)?;
    println!("=== {} participants, {} teams ===", roster.len(), teams.len());
    for team in &teams {
        println!("{team}");
        println!("  metric: {:?}", team.metric);
    }
    if let Some(team) = teams.iter().find(|t| t.contains("Asha")) {
        println!("Asha is on team {}", team.id);
    }
    Ok(())
}
