//! Term-frequency × inverse-document-frequency text vectorizer.
//!
//! ## Weighting
//!
//! For term `t` in document `d` over a corpus of `n` documents:
//!
//! ```text
//! tfidf(t, d) = count(t, d) · (ln((1 + n) / (1 + df(t))) + 1)
//! ```
//!
//! Each row is then L2-normalized. The vocabulary is capped at
//! `max_features` terms, keeping the most frequent across the corpus
//! (ties broken alphabetically); columns are ordered alphabetically.
//!
//! ## Tokenization
//!
//! Lowercase, split on anything that is not alphanumeric or `_`, keep tokens
//! of at least two characters, drop English stop words.

use std::collections::{BTreeMap, HashMap, HashSet};

use super::stop_words;

/// Placeholder for empty documents.
pub const EMPTY_DOCUMENT: &str = "none";

/// Fitted TF-IDF output.
#[derive(Debug, Clone, PartialEq)]
pub struct TfidfMatrix {
    /// Column terms, alphabetical.
    pub vocabulary: Vec<String>,
    /// One row per input document, `vocabulary.len()` columns each.
    pub rows: Vec<Vec<f32>>,
}

/// TF-IDF vectorizer with a capped vocabulary.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    max_features: usize,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new(50)
    }
}

impl TfidfVectorizer {
    /// Create a vectorizer keeping at most `max_features` terms.
    pub fn new(max_features: usize) -> Self {
        Self { max_features }
    }

    /// Split a document into vocabulary candidates.
    pub fn tokenize(doc: &str) -> Vec<String> {
        doc.to_lowercase()
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|tok| tok.chars().count() >= 2 && !stop_words::is_stop_word(tok))
            .map(str::to_string)
            .collect()
    }

    /// Fit on `docs` and return their weighted rows.
    ///
    /// Empty documents are replaced with [`EMPTY_DOCUMENT`] first. Returns
    /// `None` when the corpus is degenerate: no term survives tokenization,
    /// or every document is identical.
    pub fn fit_transform<S: AsRef<str>>(&self, docs: &[S]) -> Option<TfidfMatrix> {
        if docs.is_empty() || self.max_features == 0 {
            return None;
        }

        let docs: Vec<&str> = docs
            .iter()
            .map(|d| {
                let d = d.as_ref();
                if d.trim().is_empty() {
                    EMPTY_DOCUMENT
                } else {
                    d
                }
            })
            .collect();

        if docs.windows(2).all(|w| w[0] == w[1]) && docs.len() > 1 {
            return None;
        }

        let tokenized: Vec<Vec<String>> = docs.iter().map(|d| Self::tokenize(d)).collect();

        let mut corpus_counts: HashMap<&str, usize> = HashMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for tokens in &tokenized {
            let mut seen: HashSet<&str> = HashSet::new();
            for tok in tokens {
                *corpus_counts.entry(tok.as_str()).or_insert(0) += 1;
                if seen.insert(tok.as_str()) {
                    *doc_freq.entry(tok.as_str()).or_insert(0) += 1;
                }
            }
        }

        if corpus_counts.is_empty() {
            return None;
        }

        let mut ranked: Vec<(&str, usize)> = corpus_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.max_features);

        let mut vocabulary: Vec<String> = ranked.iter().map(|(t, _)| (*t).to_string()).collect();
        vocabulary.sort();
        let column: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, t)| (t.as_str(), i))
            .collect();

        let n = docs.len() as f32;
        let idf: Vec<f32> = vocabulary
            .iter()
            .map(|t| {
                let df = doc_freq.get(t.as_str()).copied().unwrap_or(0) as f32;
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let rows = tokenized
            .iter()
            .map(|tokens| {
                let mut counts: BTreeMap<usize, f32> = BTreeMap::new();
                for tok in tokens {
                    if let Some(&col) = column.get(tok.as_str()) {
                        *counts.entry(col).or_insert(0.0) += 1.0;
                    }
                }
                let mut row = vec![0.0f32; vocabulary.len()];
                for (col, tf) in counts {
                    row[col] = tf * idf[col];
                }
                let norm = row.iter().map(|x| x * x).sum::<f32>().sqrt();
                if norm > 0.0 {
                    for x in &mut row {
                        *x /= norm;
                    }
                }
                row
            })
            .collect();

        Some(TfidfMatrix { vocabulary, rows })
    }
}
