//! Participant records.
//!
//! A [`Participant`] is resolved once at ingestion: every field has a declared
//! default, and free-form experience/role strings are mapped onto the closed
//! [`ExperienceLevel`] and [`Role`] vocabularies. Nothing downstream mutates
//! a participant.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Self-reported experience level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum ExperienceLevel {
    /// Score 1.
    #[default]
    Beginner,
    /// Score 2.
    Intermediate,
    /// Score 3.
    Advanced,
    /// Score 4.
    Expert,
}

impl ExperienceLevel {
    /// Ordinal score: Beginner=1 .. Expert=4.
    pub fn score(self) -> u8 {
        match self {
            ExperienceLevel::Beginner => 1,
            ExperienceLevel::Intermediate => 2,
            ExperienceLevel::Advanced => 3,
            ExperienceLevel::Expert => 4,
        }
    }

    /// Parse a level name; unknown names fall back to `Beginner`.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "Intermediate" => ExperienceLevel::Intermediate,
            "Advanced" => ExperienceLevel::Advanced,
            "Expert" => ExperienceLevel::Expert,
            _ => ExperienceLevel::Beginner,
        }
    }
}

impl From<String> for ExperienceLevel {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

/// Preferred role, from a fixed 8-value vocabulary.
///
/// The declaration order is the column order of the one-hot role encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Role {
    #[serde(rename = "Frontend Developer")]
    FrontendDeveloper,
    #[serde(rename = "Backend Developer")]
    BackendDeveloper,
    #[default]
    #[serde(rename = "Full Stack Developer")]
    FullStackDeveloper,
    #[serde(rename = "Data Scientist")]
    DataScientist,
    #[serde(rename = "ML Engineer")]
    MlEngineer,
    Designer,
    #[serde(rename = "Product Manager")]
    ProductManager,
    DevOps,
}

impl Role {
    /// All roles in one-hot column order.
    pub const ALL: [Role; 8] = [
        Role::FrontendDeveloper,
        Role::BackendDeveloper,
        Role::FullStackDeveloper,
        Role::DataScientist,
        Role::MlEngineer,
        Role::Designer,
        Role::ProductManager,
        Role::DevOps,
    ];

    /// Display name, as it appears in roster input.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::FrontendDeveloper => "Frontend Developer",
            Role::BackendDeveloper => "Backend Developer",
            Role::FullStackDeveloper => "Full Stack Developer",
            Role::DataScientist => "Data Scientist",
            Role::MlEngineer => "ML Engineer",
            Role::Designer => "Designer",
            Role::ProductManager => "Product Manager",
            Role::DevOps => "DevOps",
        }
    }

    /// Column of this role in the one-hot encoding.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Parse a role name; unmapped names fall back to `Full Stack Developer`.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .unwrap_or_default()
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_team_size_pref() -> u32 {
    4
}

/// One individual eligible for team placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// Identifier / display name.
    pub name: String,
    #[serde(default)]
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    pub leadership_interest: bool,
    #[serde(default)]
    pub role_preference: Role,
    /// Preferred team size. Advisory only.
    #[serde(default = "default_team_size_pref")]
    pub team_size_pref: u32,
    #[serde(default)]
    pub programming_langs: Vec<String>,
    #[serde(default)]
    pub frameworks: Vec<String>,
    #[serde(default)]
    pub databases: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl Participant {
    /// Create a participant with every other field at its default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            experience_level: ExperienceLevel::default(),
            leadership_interest: false,
            role_preference: Role::default(),
            team_size_pref: default_team_size_pref(),
            programming_langs: Vec::new(),
            frameworks: Vec::new(),
            databases: Vec::new(),
            tools: Vec::new(),
            interests: Vec::new(),
        }
    }

    /// Set the experience level.
    pub fn with_experience(mut self, level: ExperienceLevel) -> Self {
        self.experience_level = level;
        self
    }

    /// Set leadership interest.
    pub fn with_leadership(mut self, leadership_interest: bool) -> Self {
        self.leadership_interest = leadership_interest;
        self
    }

    /// Set the preferred role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role_preference = role;
        self
    }

    /// Set the preferred team size.
    pub fn with_team_size_pref(mut self, size: u32) -> Self {
        self.team_size_pref = size;
        self
    }

    pub fn with_programming_langs<I, S>(mut self, langs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.programming_langs = langs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_frameworks<I, S>(mut self, frameworks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.frameworks = frameworks.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_databases<I, S>(mut self, databases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.databases = databases.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tools = tools.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    /// All skills: languages, frameworks, databases, then tools.
    pub fn skills(&self) -> impl Iterator<Item = &str> {
        self.programming_langs
            .iter()
            .chain(&self.frameworks)
            .chain(&self.databases)
            .chain(&self.tools)
            .map(String::as_str)
    }

    /// Parse a roster from a JSON array of participant objects.
    pub fn roster_from_json(json: &str) -> Result<Vec<Participant>> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_and_index() {
        assert_eq!(Role::parse("ML Engineer"), Role::MlEngineer);
        assert_eq!(Role::parse("Wizard"), Role::FullStackDeveloper);
        for (i, role) in Role::ALL.iter().enumerate() {
            assert_eq!(role.index(), i);
        }
    }

    #[test]
    fn test_experience_scores() {
        assert_eq!(ExperienceLevel::parse("Beginner").score(), 1);
        assert_eq!(ExperienceLevel::parse("Expert").score(), 4);
        assert_eq!(ExperienceLevel::parse("guru"), ExperienceLevel::Beginner);
    }

    #[test]
    fn test_roster_defaults() {
        let json = r#"[
            {"name": "ada"},
            {"name": "bo", "experience_level": "Advanced", "role_preference": "Chef",
             "leadership_interest": true, "programming_langs": ["Rust"], "tools": ["Git"]}
        ]"#;
        let roster = Participant::roster_from_json(json).unwrap();
        assert_eq!(roster.len(), 2);

        let ada = &roster[0];
        assert_eq!(ada.experience_level, ExperienceLevel::Beginner);
        assert_eq!(ada.role_preference, Role::FullStackDeveloper);
        assert_eq!(ada.team_size_pref, 4);
        assert!(!ada.leadership_interest);
        assert!(ada.interests.is_empty());

        let bo = &roster[1];
        assert_eq!(bo.experience_level, ExperienceLevel::Advanced);
        assert_eq!(bo.role_preference, Role::FullStackDeveloper);
        assert!(bo.leadership_interest);
        assert_eq!(bo.skills().collect::<Vec<_>>(), vec!["Rust", "Git"]);
    }

    #[test]
    fn test_roster_parse_error() {
        assert!(Participant::roster_from_json("{not json").is_err());
        assert!(Participant::roster_from_json(r#"[{"experience_level": "Expert"}]"#).is_err());
    }
}
