//! Named-entity recognition used for skill discovery

use crate::error::{CategorizerError, Result};
use aho_corasick::{AhoCorasick, MatchKind};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityLabel {
    Organization,
    Product,
    Person,
    Other(String),
}

impl EntityLabel {
    /// Parses the conventional short tags (`ORG`, `PRODUCT`, `PERSON`)
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_uppercase().as_str() {
            "ORG" | "ORGANIZATION" => EntityLabel::Organization,
            "PRODUCT" => EntityLabel::Product,
            "PERSON" => EntityLabel::Person,
            other => EntityLabel::Other(other.to_string()),
        }
    }

    /// Organizations and products are treated as skill candidates
    pub fn is_skill_candidate(&self) -> bool {
        matches!(self, EntityLabel::Organization | EntityLabel::Product)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Surface text as it appears in the document
    pub text: String,
    pub label: EntityLabel,
}

pub trait EntityRecognizer: Send + Sync {
    /// Entities in document order
    fn recognize(&self, text: &str) -> Vec<Entity>;
}

/// Recognizer that never finds anything; used when no gazetteer is configured
pub struct NullRecognizer;

impl EntityRecognizer for NullRecognizer {
    fn recognize(&self, _text: &str) -> Vec<Entity> {
        Vec::new()
    }
}

/// On-disk gazetteer: label tag -> phrases
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct GazetteerFile(BTreeMap<String, Vec<String>>);

/// Dictionary recognizer matching known phrases on word boundaries,
/// ASCII case-insensitively. Overlapping hits resolve leftmost, then longest.
pub struct GazetteerRecognizer {
    matcher: AhoCorasick,
    labels: Vec<EntityLabel>,
}

impl GazetteerRecognizer {
    pub fn new(entries: Vec<(EntityLabel, String)>) -> Result<Self> {
        let entries: Vec<(EntityLabel, String)> = entries
            .into_iter()
            .map(|(label, phrase)| (label, phrase.trim().to_string()))
            .filter(|(_, phrase)| !phrase.is_empty())
            .collect();

        let patterns: Vec<&str> = entries.iter().map(|(_, phrase)| phrase.as_str()).collect();
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::Standard)
            .build(&patterns)
            .map_err(|e| CategorizerError::ModelLoading(format!("Failed to build entity gazetteer: {}", e)))?;

        Ok(Self {
            matcher,
            labels: entries.into_iter().map(|(label, _)| label).collect(),
        })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CategorizerError::ModelLoading(format!("Failed to read gazetteer '{}': {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let file: GazetteerFile = serde_json::from_str(content)
            .map_err(|e| CategorizerError::ModelLoading(format!("Invalid gazetteer: {}", e)))?;

        let entries = file
            .0
            .into_iter()
            .flat_map(|(tag, phrases)| {
                let label = EntityLabel::parse(&tag);
                phrases.into_iter().map(move |phrase| (label.clone(), phrase))
            })
            .collect();

        Self::new(entries)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl EntityRecognizer for GazetteerRecognizer {
    fn recognize(&self, text: &str) -> Vec<Entity> {
        // Boundaries are checked before overlaps are resolved, so a phrase
        // running into the next word does not hide a shorter valid one.
        let mut candidates: Vec<_> = self
            .matcher
            .find_overlapping_iter(text)
            .filter(|mat| {
                let before = text[..mat.start()].chars().next_back();
                let after = text[mat.end()..].chars().next();
                !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
            })
            .collect();
        candidates.sort_by(|a, b| a.start().cmp(&b.start()).then(b.end().cmp(&a.end())));

        let mut entities = Vec::new();
        let mut covered_until = 0;
        for mat in candidates {
            if mat.start() < covered_until {
                continue;
            }
            covered_until = mat.end();
            entities.push(Entity {
                text: text[mat.start()..mat.end()].to_string(),
                label: self.labels[mat.pattern().as_usize()].clone(),
            });
        }
        entities
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recognizer() -> GazetteerRecognizer {
        GazetteerRecognizer::from_json(
            r#"{
                "ORG": ["Google", "Google Cloud", "Infosys"],
                "PRODUCT": ["Power BI", "Salesforce"],
                "PERSON": ["Ada Lovelace"]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_label_parsing() {
        assert_eq!(EntityLabel::parse("org"), EntityLabel::Organization);
        assert_eq!(EntityLabel::parse("PRODUCT"), EntityLabel::Product);
        assert_eq!(EntityLabel::parse("GPE"), EntityLabel::Other("GPE".to_string()));
        assert!(EntityLabel::Product.is_skill_candidate());
        assert!(!EntityLabel::Person.is_skill_candidate());
    }

    #[test]
    fn test_finds_entities_in_document_order() {
        let entities = recognizer().recognize("Built dashboards in power bi at Infosys, then Salesforce.");
        let texts: Vec<&str> = entities.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["power bi", "Infosys", "Salesforce"]);
        assert_eq!(entities[0].label, EntityLabel::Product);
        assert_eq!(entities[1].label, EntityLabel::Organization);
    }

    #[test]
    fn test_prefers_longest_phrase() {
        let entities = recognizer().recognize("Deployed on Google Cloud.");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].text, "Google Cloud");
    }

    #[test]
    fn test_shorter_phrase_survives_when_longer_runs_on() {
        let entities = recognizer().recognize("Worked at Google Cloudy Labs");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].text, "Google");
        assert_eq!(entities[0].label, EntityLabel::Organization);
    }

    #[test]
    fn test_respects_word_boundaries() {
        let entities = recognizer().recognize("Googlers and SalesforceDX are not matches");
        assert!(entities.is_empty());
    }

    #[test]
    fn test_null_recognizer() {
        assert!(NullRecognizer.recognize("Google").is_empty());
    }

    #[test]
    fn test_invalid_gazetteer_is_model_error() {
        let result = GazetteerRecognizer::from_json("[1, 2, 3]");
        assert!(matches!(result, Err(CategorizerError::ModelLoading(_))));
    }
}
