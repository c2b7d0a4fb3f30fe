//! TF-IDF vectorization of soups.
//!
//! ```text
//! tf(t, d)  = count of t in d
//! idf(t)    = ln((1 + n) / (1 + df(t))) + 1
//! w(t, d)   = tf(t, d) * idf(t), then each document is L2-normalized
//! ```
//!
//! With unit-length vectors the dot product of two documents is their cosine
//! similarity, which is what [`SimilarityMatrix`](crate::SimilarityMatrix)
//! relies on.

use crate::config::IndexConfig;
use crate::error::{IndexError, Result};
use crate::filter_pipeline::FilterPipeline;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Column index into the vocabulary
pub type TermId = u32;

/// A document vector holding only its non-zero weights.
///
/// Entries are sorted by term id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(TermId, f32)>,
}

impl SparseVector {
    /// Build from unsorted entries; duplicate ids are not merged.
    pub fn from_entries(mut entries: Vec<(TermId, f32)>) -> Self {
        entries.sort_by_key(|&(term, _)| term);
        Self { entries }
    }

    pub fn entries(&self) -> &[(TermId, f32)] {
        &self.entries
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|&(_, w)| w * w).sum::<f32>().sqrt()
    }

    /// Sparse dot product by merging the two sorted entry lists
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a, wa) = self.entries[i];
            let (b, wb) = other.entries[j];
            match a.cmp(&b) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
    }
}

/// Learns a vocabulary and idf weights, then maps documents to unit vectors.
pub struct TfidfVectorizer {
    analyzer: FilterPipeline,
    max_features: Option<usize>,
    vocabulary: HashMap<String, TermId>,
    idf: Vec<f32>,
    fitted: bool,
}

impl TfidfVectorizer {
    pub fn new(config: &IndexConfig) -> Self {
        Self {
            analyzer: FilterPipeline::from_config(config),
            max_features: config.max_features,
            vocabulary: HashMap::new(),
            idf: Vec::new(),
            fitted: false,
        }
    }

    /// Learn vocabulary and idf from the corpus.
    ///
    /// When `max_features` is set, the most frequent terms across the whole
    /// corpus are kept (ties alphabetical). Kept terms get ids in
    /// alphabetical order so the layout does not depend on hashing.
    pub fn fit<S: AsRef<str> + Sync>(&mut self, documents: &[S]) -> Result<()> {
        if documents.is_empty() {
            return Err(IndexError::EmptyCorpus);
        }
        if self.max_features == Some(0) {
            return Err(IndexError::InvalidConfig(
                "max_features must be at least 1".to_string(),
            ));
        }

        let tokenized: Vec<Vec<String>> = documents
            .par_iter()
            .map(|doc| self.analyzer.analyze(doc.as_ref()))
            .collect();

        let mut term_freq: HashMap<&str, usize> = HashMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for tokens in &tokenized {
            let mut seen: HashSet<&str> = HashSet::new();
            for token in tokens {
                *term_freq.entry(token.as_str()).or_insert(0) += 1;
                if seen.insert(token.as_str()) {
                    *doc_freq.entry(token.as_str()).or_insert(0) += 1;
                }
            }
        }

        let mut ranked: Vec<(&str, usize)> = term_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        if let Some(max_features) = self.max_features {
            ranked.truncate(max_features);
        }

        let mut kept: Vec<&str> = ranked.into_iter().map(|(term, _)| term).collect();
        kept.sort_unstable();

        let n_docs = documents.len() as f32;
        self.idf = kept
            .iter()
            .map(|term| {
                let df = doc_freq.get(term).copied().unwrap_or(0) as f32;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();
        self.vocabulary = kept
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term.to_string(), idx as TermId))
            .collect();
        self.fitted = true;

        debug!(
            documents = documents.len(),
            vocabulary = self.vocabulary.len(),
            "Fitted TF-IDF vocabulary"
        );
        Ok(())
    }

    /// Map one document into the fitted vocabulary space.
    ///
    /// Documents with no in-vocabulary terms come back as the empty vector.
    pub fn transform(&self, document: &str) -> Result<SparseVector> {
        if !self.fitted {
            return Err(IndexError::NotFitted);
        }

        let mut counts: HashMap<TermId, f32> = HashMap::new();
        for token in self.analyzer.analyze(document) {
            if let Some(&term) = self.vocabulary.get(&token) {
                *counts.entry(term).or_insert(0.0) += 1.0;
            }
        }

        let entries = counts
            .into_iter()
            .map(|(term, tf)| (term, tf * self.idf[term as usize]))
            .collect();
        let mut vector = SparseVector::from_entries(entries);
        vector.normalize();
        Ok(vector)
    }

    /// `fit` followed by `transform` of every document, in order.
    pub fn fit_transform<S: AsRef<str> + Sync>(
        &mut self,
        documents: &[S],
    ) -> Result<Vec<SparseVector>> {
        self.fit(documents)?;
        documents
            .par_iter()
            .map(|doc| self.transform(doc.as_ref()))
            .collect()
    }

    pub fn vocabulary(&self) -> &HashMap<String, TermId> {
        &self.vocabulary
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// idf weight of a term, if it is in the vocabulary
    pub fn idf(&self, term: &str) -> Option<f32> {
        self.vocabulary.get(term).map(|&id| self.idf[id as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StopWords;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_fit_excludes_stop_words_and_short_tokens() {
        let mut vectorizer = TfidfVectorizer::new(&IndexConfig::default());
        vectorizer.fit(&["the cat sat on a mat", "the dog"]).unwrap();

        let vocab = vectorizer.vocabulary();
        assert!(vocab.contains_key("cat"));
        assert!(vocab.contains_key("dog"));
        assert!(!vocab.contains_key("the"));
        assert!(!vocab.contains_key("a"));
        assert_eq!(vectorizer.vocabulary_size(), 4);
    }

    #[test]
    fn test_smooth_idf() {
        let config = IndexConfig::default().with_stop_words(StopWords::None);
        let mut vectorizer = TfidfVectorizer::new(&config);
        vectorizer.fit(&["shared rare", "shared"]).unwrap();

        // in every document: ln(3/3) + 1
        assert!(approx(vectorizer.idf("shared").unwrap(), 1.0));
        // in one of two: ln(3/2) + 1
        assert!(approx(vectorizer.idf("rare").unwrap(), (1.5f32).ln() + 1.0));
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let config = IndexConfig::default().with_max_features(Some(2));
        let mut vectorizer = TfidfVectorizer::new(&config);
        vectorizer
            .fit(&["alien alien alien", "robot robot", "zebra", "ape"])
            .unwrap();

        let mut kept: Vec<&String> = vectorizer.vocabulary().keys().collect();
        kept.sort();
        assert_eq!(kept, vec!["alien", "robot"]);
    }

    #[test]
    fn test_max_features_tie_break_is_alphabetical() {
        let config = IndexConfig::default().with_max_features(Some(1));
        let mut vectorizer = TfidfVectorizer::new(&config);
        vectorizer.fit(&["zebra ape"]).unwrap();
        assert!(vectorizer.vocabulary().contains_key("ape"));
    }

    #[test]
    fn test_transform_is_unit_length() {
        let mut vectorizer = TfidfVectorizer::new(&IndexConfig::default());
        let vectors = vectorizer
            .fit_transform(&["space pirates space", "pirates treasure"])
            .unwrap();
        assert!(approx(vectors[0].norm(), 1.0));
        assert!(approx(vectors[0].dot(&vectors[0]), 1.0));
    }

    #[test]
    fn test_transform_unknown_terms_is_empty() {
        let mut vectorizer = TfidfVectorizer::new(&IndexConfig::default());
        vectorizer.fit(&["space pirates"]).unwrap();
        let vector = vectorizer.transform("the and of").unwrap();
        assert!(vector.is_empty());
        assert_eq!(vector.norm(), 0.0);
    }

    #[test]
    fn test_errors() {
        let mut vectorizer = TfidfVectorizer::new(&IndexConfig::default());
        assert_eq!(vectorizer.transform("x"), Err(IndexError::NotFitted));

        let empty: [&str; 0] = [];
        assert_eq!(vectorizer.fit(&empty), Err(IndexError::EmptyCorpus));

        let mut capped = TfidfVectorizer::new(&IndexConfig::default().with_max_features(Some(0)));
        assert!(matches!(capped.fit(&["a"]), Err(IndexError::InvalidConfig(_))));
    }

    #[test]
    fn test_dot_merges_sorted_entries() {
        let a = SparseVector::from_entries(vec![(3, 1.0), (1, 2.0)]);
        let b = SparseVector::from_entries(vec![(1, 0.5), (2, 9.0), (3, 2.0)]);
        assert!(approx(a.dot(&b), 3.0));
        assert_eq!(a.nnz(), 2);
    }
}
