//! Batch report: the filtered view of a batch handed to formatters

use crate::processing::document::{BatchOutcome, CandidateRecord, DocumentFailure};
use crate::processing::filter::filter_by_skills;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    pub output_dir: String,
    pub skills_filter: Option<String>,
    /// Records categorized before filtering
    pub categorized_count: usize,
    /// Records matching the skill filter, in upload order
    pub records: Vec<CandidateRecord>,
    pub category_counts: BTreeMap<String, usize>,
    pub failures: Vec<DocumentFailure>,
    pub skipped: Vec<String>,
}

/// One row of the two-column preview
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewRow {
    pub filename: String,
    pub category: String,
}

impl BatchReport {
    pub fn new(outcome: &BatchOutcome, skills: Option<&str>, output_dir: &Path) -> Self {
        let records: Vec<CandidateRecord> = filter_by_skills(&outcome.records, skills)
            .into_iter()
            .cloned()
            .collect();

        let mut category_counts = BTreeMap::new();
        for record in &records {
            *category_counts.entry(record.category.label().to_string()).or_insert(0) += 1;
        }

        let skills_filter = skills
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Self {
            generated_at: outcome.generated_at,
            output_dir: output_dir.display().to_string(),
            skills_filter,
            categorized_count: outcome.records.len(),
            records,
            category_counts,
            failures: outcome.failures.clone(),
            skipped: outcome.skipped.clone(),
        }
    }

    pub fn preview(&self) -> Vec<PreviewRow> {
        self.records
            .iter()
            .map(|record| PreviewRow {
                filename: record.filename.clone(),
                category: record.category.label().to_string(),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
