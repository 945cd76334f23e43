//! TF-IDF vectorizer loaded from an exported vocabulary

use crate::error::{CategorizerError, Result};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use unicode_segmentation::UnicodeSegmentation;

/// Sparse feature vector: (column, value) pairs sorted by column
#[derive(Debug, Clone, PartialEq)]
pub struct SparseFeatures {
    pub dimension: usize,
    pub entries: Vec<(usize, f32)>,
}

impl SparseFeatures {
    pub fn squared_norm(&self) -> f32 {
        self.entries.iter().map(|(_, v)| v * v).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub trait Vectorizer: Send + Sync {
    fn transform(&self, text: &str) -> SparseFeatures;

    /// Width of the produced vectors
    fn dimension(&self) -> usize;
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

#[derive(Debug, Deserialize)]
struct TfidfArtifact {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
    #[serde(default = "default_true")]
    lowercase: bool,
    #[serde(default)]
    stop_words: Vec<String>,
    #[serde(default = "default_ngram_range")]
    ngram_range: (usize, usize),
    #[serde(default)]
    sublinear_tf: bool,
    #[serde(default = "default_norm")]
    norm: Option<Norm>,
}

fn default_true() -> bool {
    true
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

/// Word n-gram TF-IDF: tokens are words of at least two characters,
/// term weight is `tf * idf`, and the row is normalized.
#[derive(Debug)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
    lowercase: bool,
    stop_words: HashSet<String>,
    ngram_range: (usize, usize),
    sublinear_tf: bool,
    norm: Option<Norm>,
}

impl TfidfVectorizer {
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CategorizerError::ModelLoading(format!("Failed to read vectorizer '{}': {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let artifact: TfidfArtifact = serde_json::from_str(content)
            .map_err(|e| CategorizerError::ModelLoading(format!("Invalid vectorizer artifact: {}", e)))?;

        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(CategorizerError::ModelLoading(format!(
                "Invalid ngram_range ({}, {})",
                min_n, max_n
            )));
        }

        if let Some((term, column)) = artifact
            .vocabulary
            .iter()
            .find(|(_, column)| **column >= artifact.idf.len())
        {
            return Err(CategorizerError::ModelLoading(format!(
                "Vocabulary term '{}' maps to column {} but idf has {} entries",
                term,
                column,
                artifact.idf.len()
            )));
        }

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            lowercase: artifact.lowercase,
            stop_words: artifact.stop_words.into_iter().collect(),
            ngram_range: artifact.ngram_range,
            sublinear_tf: artifact.sublinear_tf,
            norm: artifact.norm,
        })
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase { text.to_lowercase() } else { text.to_string() };

        text.unicode_words()
            .filter(|word| word.chars().count() >= 2)
            .filter(|word| !self.stop_words.contains(*word))
            .map(str::to_string)
            .collect()
    }

    fn ngrams(&self, tokens: &[String]) -> Vec<String> {
        let (min_n, max_n) = self.ngram_range;
        let mut grams = Vec::new();

        for n in min_n..=max_n {
            if n == 1 {
                grams.extend(tokens.iter().cloned());
            } else {
                grams.extend(tokens.windows(n).map(|window| window.join(" ")));
            }
        }

        grams
    }
}

impl Vectorizer for TfidfVectorizer {
    fn transform(&self, text: &str) -> SparseFeatures {
        let mut counts: HashMap<usize, f32> = HashMap::new();
        for gram in self.ngrams(&self.tokenize(text)) {
            if let Some(&column) = self.vocabulary.get(&gram) {
                *counts.entry(column).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f32)> = counts
            .into_iter()
            .map(|(column, count)| {
                let tf = if self.sublinear_tf { 1.0 + count.ln() } else { count };
                (column, tf * self.idf[column])
            })
            .collect();
        entries.sort_by_key(|(column, _)| *column);

        let norm = match self.norm {
            Some(Norm::L2) => entries.iter().map(|(_, v)| v * v).sum::<f32>().sqrt(),
            Some(Norm::L1) => entries.iter().map(|(_, v)| v.abs()).sum::<f32>(),
            None => 1.0,
        };
        if norm > 0.0 {
            for (_, value) in entries.iter_mut() {
                *value /= norm;
            }
        }

        SparseFeatures {
            dimension: self.idf.len(),
            entries,
        }
    }

    fn dimension(&self) -> usize {
        self.idf.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectorizer() -> TfidfVectorizer {
        TfidfVectorizer::from_json(
            r#"{
                "vocabulary": {"python": 0, "java": 1, "sql": 2, "data science": 3},
                "idf": [1.0, 2.0, 1.0, 3.0],
                "stop_words": ["and"],
                "ngram_range": [1, 2]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_transform_is_l2_normalized() {
        let features = vectorizer().transform("Python python JAVA");
        assert_eq!(features.dimension, 4);
        assert_eq!(features.entries.len(), 2);

        // python: tf 2 * idf 1, java: tf 1 * idf 2 -> equal weights
        let (c0, v0) = features.entries[0];
        let (c1, v1) = features.entries[1];
        assert_eq!((c0, c1), (0, 1));
        assert!((v0 - v1).abs() < 1e-6);
        assert!((features.squared_norm() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_bigrams_and_stop_words() {
        let features = vectorizer().transform("data science and sql");
        let columns: Vec<usize> = features.entries.iter().map(|(c, _)| *c).collect();
        assert_eq!(columns, vec![2, 3]);
    }

    #[test]
    fn test_unknown_text_is_empty() {
        let features = vectorizer().transform("carpentry woodworking a b");
        assert!(features.is_empty());
        assert_eq!(features.dimension, 4);
    }

    #[test]
    fn test_sublinear_without_norm() {
        let vectorizer = TfidfVectorizer::from_json(
            r#"{"vocabulary": {"sql": 0}, "idf": [2.0], "sublinear_tf": true, "norm": null}"#,
        )
        .unwrap();
        let features = vectorizer.transform("sql sql sql");
        let expected = (1.0 + 3.0f32.ln()) * 2.0;
        assert!((features.entries[0].1 - expected).abs() < 1e-5);
    }

    #[test]
    fn test_rejects_out_of_range_vocabulary() {
        let result = TfidfVectorizer::from_json(r#"{"vocabulary": {"sql": 5}, "idf": [1.0]}"#);
        assert!(matches!(result, Err(CategorizerError::ModelLoading(_))));
    }

    #[test]
    fn test_rejects_bad_ngram_range() {
        let result = TfidfVectorizer::from_json(
            r#"{"vocabulary": {}, "idf": [], "ngram_range": [2, 1]}"#,
        );
        assert!(matches!(result, Err(CategorizerError::ModelLoading(_))));
    }
}
