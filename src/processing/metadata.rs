//! Candidate metadata extraction from raw resume text

use crate::error::{CategorizerError, Result};
use crate::processing::document::Contact;
use crate::processing::entities::EntityRecognizer;
use aho_corasick::{AhoCorasick, MatchKind};
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;

/// Skill terms looked for in every resume
pub const DEFAULT_SKILLS: [&str; 23] = [
    "Java", "Python", "C++", "SQL", "HTML", "CSS", "JavaScript", "Excel", "Tableau", "Pandas",
    "Numpy", "Matplotlib", "React", "Node.js", "AWS", "Azure", "Docker", "Kubernetes", "Git",
    "Jenkins", "TensorFlow", "PyTorch", "Scala",
];

#[derive(Debug, Clone, PartialEq)]
pub struct CandidateMetadata {
    pub name: String,
    pub contact: Contact,
    pub skills: String,
}

pub struct MetadataExtractor {
    recognizer: Arc<dyn EntityRecognizer>,
    skill_dictionary: Vec<String>,
    skill_matcher: AhoCorasick,
    phone_regex: Regex,
    email_regex: Regex,
    name_prefix_regex: Regex,
    skill_cleanup_regex: Regex,
}

impl MetadataExtractor {
    pub fn new(recognizer: Arc<dyn EntityRecognizer>) -> Result<Self> {
        Self::with_custom_skills(recognizer, Vec::new())
    }

    /// Extend the built-in dictionary; duplicates (ignoring case) are dropped
    pub fn with_custom_skills(
        recognizer: Arc<dyn EntityRecognizer>,
        additional_skills: Vec<String>,
    ) -> Result<Self> {
        let mut skill_dictionary: Vec<String> = DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect();
        let mut seen: HashSet<String> = skill_dictionary.iter().map(|s| s.to_lowercase()).collect();
        for skill in additional_skills {
            let skill = skill.trim().to_string();
            if !skill.is_empty() && seen.insert(skill.to_lowercase()) {
                skill_dictionary.push(skill);
            }
        }

        // Overlapping search so "Java" is still reported inside "JavaScript"
        let skill_matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::Standard)
            .build(&skill_dictionary)
            .map_err(|e| CategorizerError::Processing(format!("Failed to build skill matcher: {}", e)))?;

        Ok(Self {
            recognizer,
            skill_dictionary,
            skill_matcher,
            phone_regex: Regex::new(r"\b\d{10}\b").expect("Invalid phone regex"),
            email_regex: Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
                .expect("Invalid email regex"),
            name_prefix_regex: Regex::new(r"(?i)^name:").expect("Invalid name prefix regex"),
            skill_cleanup_regex: Regex::new(r"[^a-zA-Z0-9\s]").expect("Invalid skill cleanup regex"),
        })
    }

    pub fn extract(&self, text: &str) -> CandidateMetadata {
        CandidateMetadata {
            name: self.extract_name(text),
            contact: self.extract_contact(text),
            skills: self.extract_skills(text),
        }
    }

    /// First non-empty line, without a leading `Name:`, cut at the first comma.
    ///
    /// A heuristic: resumes that do not open with the candidate's name yield
    /// whatever their first line is.
    pub fn extract_name(&self, text: &str) -> String {
        let first_line = text
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or("");

        let without_prefix = self.name_prefix_regex.replace(first_line, "");
        without_prefix
            .split(',')
            .next()
            .unwrap_or("")
            .trim()
            .to_string()
    }

    /// First ten-digit number and first email address; missing parts are empty
    pub fn extract_contact(&self, text: &str) -> Contact {
        let phone = self
            .phone_regex
            .find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        let email = self
            .email_regex
            .find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        Contact { phone, email }
    }

    /// Organization/product entities, then dictionary hits, cleaned and
    /// deduplicated in first-seen order, joined with ", ".
    pub fn extract_skills(&self, text: &str) -> String {
        let entity_candidates = self
            .recognizer
            .recognize(text)
            .into_iter()
            .filter(|entity| entity.label.is_skill_candidate())
            .map(|entity| entity.text);

        let mut found = vec![false; self.skill_dictionary.len()];
        for mat in self.skill_matcher.find_overlapping_iter(text) {
            found[mat.pattern().as_usize()] = true;
        }
        let dictionary_candidates = self
            .skill_dictionary
            .iter()
            .zip(found)
            .filter(|(_, hit)| *hit)
            .map(|(skill, _)| skill.clone());

        let mut seen = HashSet::new();
        let mut skills = Vec::new();
        for candidate in entity_candidates.chain(dictionary_candidates) {
            let cleaned = self
                .skill_cleanup_regex
                .replace_all(candidate.trim(), "")
                .into_owned();
            if !cleaned.is_empty() && seen.insert(cleaned.clone()) {
                skills.push(cleaned);
            }
        }

        skills.join(", ")
    }

    pub fn skill_dictionary(&self) -> &[String] {
        &self.skill_dictionary
    }
}
