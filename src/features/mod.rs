//! Participant feature encoding.
//!
//! Each participant becomes one row, concatenated in a fixed order:
//!
//! | columns | source | scaled by |
//! |---|---|---|
//! | 1 | experience score (1..=4) | `weight_experience` |
//! | 1 | leadership flag (0/1) | `weight_experience` |
//! | 1 | team size preference | `weight_experience` |
//! | 8 | one-hot role | `weight_experience` |
//! | ≤ 50 | TF-IDF over skills | `weight_skills` |
//! | ≤ 50 | TF-IDF over interests | `weight_interests` |
//!
//! The whole matrix is then standardized column-wise over the current batch.
//! A degenerate text corpus (all empty, all stop words, or all identical)
//! contributes a single zero column instead of failing.

mod scale;
mod stop_words;
mod tfidf;

pub use scale::StandardScaler;
pub use tfidf::{TfidfMatrix, TfidfVectorizer, EMPTY_DOCUMENT};

use tracing::debug;

use crate::config::MatchParams;
use crate::error::{Error, Result};
use crate::participant::{Participant, Role};

/// Number of structured (non-text) columns.
pub const STRUCTURED_DIM: usize = 3 + Role::ALL.len();

/// Lowercased text views of one participant, derived without touching the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantText {
    /// Space-joined languages, frameworks, databases and tools.
    pub skills: String,
    /// Space-joined interests.
    pub interests: String,
}

impl ParticipantText {
    pub fn from_participant(p: &Participant) -> Self {
        Self {
            skills: p.skills().collect::<Vec<_>>().join(" ").to_lowercase(),
            interests: p.interests.join(" ").to_lowercase(),
        }
    }
}

/// Standardized feature matrix for one matching run.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    rows: Vec<Vec<f32>>,
    skill_terms: Vec<String>,
    interest_terms: Vec<String>,
}

impl FeatureMatrix {
    /// One row per participant, in roster order.
    pub fn rows(&self) -> &[Vec<f32>] {
        &self.rows
    }

    /// Row dimensionality (identical for every row).
    pub fn dim(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Skill vocabulary; empty when the skill corpus was degenerate.
    pub fn skill_terms(&self) -> &[String] {
        &self.skill_terms
    }

    /// Interest vocabulary; empty when the interest corpus was degenerate.
    pub fn interest_terms(&self) -> &[String] {
        &self.interest_terms
    }
}

/// Encodes a roster into a [`FeatureMatrix`].
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    weight_skills: f32,
    weight_experience: f32,
    weight_interests: f32,
    vectorizer: TfidfVectorizer,
}

impl Default for FeatureEncoder {
    fn default() -> Self {
        Self::new(0.3, 0.3, 0.4)
    }
}

impl FeatureEncoder {
    /// Create an encoder. Weights scale relative contribution and need not sum to 1.
    pub fn new(weight_skills: f32, weight_experience: f32, weight_interests: f32) -> Self {
        Self {
            weight_skills,
            weight_experience,
            weight_interests,
            vectorizer: TfidfVectorizer::default(),
        }
    }

    /// Encoder using the weights in `params`.
    pub fn from_params(params: &MatchParams) -> Self {
        Self::new(
            params.weight_skills,
            params.weight_experience,
            params.weight_interests,
        )
    }

    /// Replace the text vectorizer (e.g. to change the vocabulary cap).
    pub fn with_vectorizer(mut self, vectorizer: TfidfVectorizer) -> Self {
        self.vectorizer = vectorizer;
        self
    }

    /// Structured columns for one participant, before weighting.
    pub fn structured_features(p: &Participant) -> [f32; STRUCTURED_DIM] {
        let mut out = [0.0f32; STRUCTURED_DIM];
        out[0] = f32::from(p.experience_level.score());
        out[1] = if p.leadership_interest { 1.0 } else { 0.0 };
        out[2] = p.team_size_pref as f32;
        out[3 + p.role_preference.index()] = 1.0;
        out
    }

    /// Encode and standardize `participants`.
    pub fn encode(&self, participants: &[Participant]) -> Result<FeatureMatrix> {
        if participants.is_empty() {
            return Err(Error::EmptyInput);
        }

        let texts: Vec<ParticipantText> = participants
            .iter()
            .map(ParticipantText::from_participant)
            .collect();
        let skill_docs: Vec<&str> = texts.iter().map(|t| t.skills.as_str()).collect();
        let interest_docs: Vec<&str> = texts.iter().map(|t| t.interests.as_str()).collect();

        let (skill_terms, skill_rows) = self.text_features("skills", &skill_docs);
        let (interest_terms, interest_rows) = self.text_features("interests", &interest_docs);

        let combined: Vec<Vec<f32>> = participants
            .iter()
            .zip(skill_rows)
            .zip(interest_rows)
            .map(|((p, skills), interests)| {
                let mut row = Vec::with_capacity(STRUCTURED_DIM + skills.len() + interests.len());
                row.extend(
                    Self::structured_features(p)
                        .iter()
                        .map(|x| x * self.weight_experience),
                );
                row.extend(skills.iter().map(|x| x * self.weight_skills));
                row.extend(interests.iter().map(|x| x * self.weight_interests));
                row
            })
            .collect();

        let rows = StandardScaler::fit_transform(&combined)?;
        debug!(
            n = rows.len(),
            dim = rows.first().map_or(0, Vec::len),
            skill_terms = skill_terms.len(),
            interest_terms = interest_terms.len(),
            "encoded participant features"
        );

        Ok(FeatureMatrix {
            rows,
            skill_terms,
            interest_terms,
        })
    }

    fn text_features(&self, field: &str, docs: &[&str]) -> (Vec<String>, Vec<Vec<f32>>) {
        match self.vectorizer.fit_transform(docs) {
            Some(TfidfMatrix { vocabulary, rows }) => (vocabulary, rows),
            None => {
                debug!(field, "degenerate text corpus, using a zero column");
                (Vec::new(), vec![vec![0.0]; docs.len()])
            }
        }
    }
}
