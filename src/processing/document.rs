//! Document and record structures for one categorization batch

use crate::input::file_detector::FileType;
use crate::processing::category::Category;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// One submitted file, as received from the form or read from disk
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    pub fn file_type(&self) -> FileType {
        FileType::from_filename(&self.filename)
    }
}

/// A PDF upload after text extraction and normalization
#[derive(Debug, Clone)]
pub struct ResumeDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub raw_text: String,
    pub normalized_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Contact {
    pub phone: String,
    pub email: String,
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.phone, self.email)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateRecord {
    pub name: String,
    pub contact: Contact,
    pub skills: String,
    pub category: Category,
    pub filename: String,
    /// Kept for skill filtering; not exported
    #[serde(skip)]
    pub normalized_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    Extraction,
    Sorting,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureStage::Extraction => write!(f, "text extraction"),
            FailureStage::Sorting => write!(f, "file sorting"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentFailure {
    pub filename: String,
    pub stage: FailureStage,
    pub code: String,
    pub message: String,
}

/// What happened to a single upload
#[derive(Debug, Clone)]
pub enum DocumentOutcome {
    Processed(CandidateRecord),
    Skipped(String),
    Failed(DocumentFailure),
}

impl DocumentOutcome {
    pub fn filename(&self) -> &str {
        match self {
            DocumentOutcome::Processed(record) => &record.filename,
            DocumentOutcome::Skipped(filename) => filename,
            DocumentOutcome::Failed(failure) => &failure.filename,
        }
    }
}

/// Everything one batch produced, in upload order
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub records: Vec<CandidateRecord>,
    pub failures: Vec<DocumentFailure>,
    pub skipped: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl BatchOutcome {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            failures: Vec::new(),
            skipped: Vec::new(),
            generated_at: Utc::now(),
        }
    }

    pub fn push(&mut self, outcome: DocumentOutcome) {
        match outcome {
            DocumentOutcome::Processed(record) => self.records.push(record),
            DocumentOutcome::Skipped(filename) => self.skipped.push(filename),
            DocumentOutcome::Failed(failure) => self.failures.push(failure),
        }
    }
}

impl Default for BatchOutcome {
    fn default() -> Self {
        Self::new()
    }
}
