//! Batch orchestration: one pass over the uploads of a single request

use crate::config::Config;
use crate::error::{CategorizerError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{DocumentTextExtractor, PdfExtractor};
use crate::processing::classifier::CategoryClassifier;
use crate::processing::document::{
    BatchOutcome, CandidateRecord, DocumentFailure, DocumentOutcome, FailureStage, ResumeDocument,
    UploadedDocument,
};
use crate::processing::entities::{EntityRecognizer, GazetteerRecognizer, NullRecognizer};
use crate::processing::metadata::MetadataExtractor;
use crate::processing::normalizer::TextNormalizer;
use crate::processing::sorter::FileSorter;
use log::{debug, info, warn};
use std::path::Path;
use std::sync::Arc;

pub const MISSING_INPUT_MESSAGE: &str = "Please upload files and specify the output directory.";

/// Runs extraction, normalization, classification, sorting and metadata
/// extraction for every upload, in order.
///
/// All collaborators are injected and read-only, so one orchestrator can be
/// shared between requests.
pub struct BatchOrchestrator {
    extractor: Box<dyn DocumentTextExtractor>,
    normalizer: TextNormalizer,
    classifier: CategoryClassifier,
    metadata: MetadataExtractor,
    sorter: FileSorter,
}

impl BatchOrchestrator {
    pub fn new(
        extractor: Box<dyn DocumentTextExtractor>,
        classifier: CategoryClassifier,
        metadata: MetadataExtractor,
    ) -> Self {
        Self {
            extractor,
            normalizer: TextNormalizer::new(),
            classifier,
            metadata,
            sorter: FileSorter::new(),
        }
    }

    /// Load models and the optional gazetteer named in the configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let classifier = CategoryClassifier::from_config(&config.models)?;

        let recognizer: Arc<dyn EntityRecognizer> = match &config.models.entity_gazetteer_path {
            Some(path) => {
                let gazetteer = GazetteerRecognizer::from_path(path)?;
                info!("Loaded {} gazetteer entries from {}", gazetteer.len(), path.display());
                Arc::new(gazetteer)
            }
            None => {
                debug!("No entity gazetteer configured");
                Arc::new(NullRecognizer)
            }
        };
        let metadata =
            MetadataExtractor::with_custom_skills(recognizer, config.processing.additional_skills.clone())?;

        Ok(Self::new(Box::new(PdfExtractor), classifier, metadata))
    }

    pub fn run(&self, uploads: &[UploadedDocument], output_dir: &Path) -> Result<BatchOutcome> {
        self.run_with_observer(uploads, output_dir, |_| {})
    }

    /// Like [`run`](Self::run), reporting each document outcome as it lands
    pub fn run_with_observer<F>(
        &self,
        uploads: &[UploadedDocument],
        output_dir: &Path,
        mut observer: F,
    ) -> Result<BatchOutcome>
    where
        F: FnMut(&DocumentOutcome),
    {
        if uploads.is_empty() || output_dir.as_os_str().is_empty() {
            return Err(CategorizerError::InvalidInput(MISSING_INPUT_MESSAGE.to_string()));
        }

        self.sorter.ensure_root(output_dir)?;
        info!("Categorizing {} uploads into {}", uploads.len(), output_dir.display());

        let mut outcome = BatchOutcome::new();
        for upload in uploads {
            let document_outcome = self.process_document(upload, output_dir);
            observer(&document_outcome);
            outcome.push(document_outcome);
        }

        info!(
            "Batch finished: {} categorized, {} failed, {} skipped",
            outcome.records.len(),
            outcome.failures.len(),
            outcome.skipped.len()
        );
        Ok(outcome)
    }

    pub fn process_document(&self, upload: &UploadedDocument, output_dir: &Path) -> DocumentOutcome {
        if upload.file_type() != FileType::Pdf {
            debug!("Skipping non-PDF upload: {}", upload.filename);
            return DocumentOutcome::Skipped(upload.filename.clone());
        }

        let document = match self.prepare(upload) {
            Ok(document) => document,
            Err(e) => return failure(&upload.filename, FailureStage::Extraction, e),
        };

        let category = self.classifier.categorize(&document.normalized_text);

        if let Err(e) = self
            .sorter
            .store(output_dir, &category, &document.filename, &document.bytes)
        {
            return failure(&upload.filename, FailureStage::Sorting, e);
        }

        let metadata = self.metadata.extract(&document.raw_text);
        info!("{} -> {}", document.filename, category);

        DocumentOutcome::Processed(CandidateRecord {
            name: metadata.name,
            contact: metadata.contact,
            skills: metadata.skills,
            category,
            filename: document.filename,
            normalized_text: document.normalized_text,
        })
    }

    fn prepare(&self, upload: &UploadedDocument) -> Result<ResumeDocument> {
        let raw_text = self.extractor.extract(&upload.bytes)?;
        let normalized_text = self.normalizer.normalize(&raw_text);

        Ok(ResumeDocument {
            filename: upload.filename.clone(),
            bytes: upload.bytes.clone(),
            raw_text,
            normalized_text,
        })
    }
}

fn failure(filename: &str, stage: FailureStage, error: CategorizerError) -> DocumentOutcome {
    warn!("{} failed during {}: {}", filename, stage, error);
    DocumentOutcome::Failed(DocumentFailure {
        filename: filename.to_string(),
        stage,
        code: error.code().to_string(),
        message: error.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::classifier::classifier_from_json;
    use crate::models::vectorizer::TfidfVectorizer;
    use crate::processing::category::Category;
    use tempfile::TempDir;

    /// Treats the upload bytes as UTF-8 text; `FAIL` simulates a broken PDF
    struct Utf8Extractor;

    impl DocumentTextExtractor for Utf8Extractor {
        fn extract(&self, bytes: &[u8]) -> Result<String> {
            let text = String::from_utf8_lossy(bytes).into_owned();
            if text == "FAIL" {
                return Err(CategorizerError::PdfExtraction("corrupt".to_string()));
            }
            Ok(text)
        }
    }

    fn orchestrator() -> BatchOrchestrator {
        let vectorizer = TfidfVectorizer::from_json(
            r#"{"vocabulary": {"python": 0, "java": 1}, "idf": [1.0, 1.0]}"#,
        )
        .unwrap();
        let classifier = classifier_from_json(
            r#"{"kind": "linear", "classes": [20, 15], "coef": [[1.0, 0.0], [0.0, 1.0]], "intercept": [0.0, 0.0]}"#,
        )
        .unwrap();
        let classifier = CategoryClassifier::new(Box::new(vectorizer), classifier).unwrap();
        let metadata = MetadataExtractor::new(Arc::new(NullRecognizer)).unwrap();

        BatchOrchestrator::new(Box::new(Utf8Extractor), classifier, metadata)
    }

    #[test]
    fn test_missing_input_has_no_side_effects() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("out");

        let result = orchestrator().run(&[], &root);
        assert!(matches!(result, Err(CategorizerError::InvalidInput(_))));
        assert!(!root.exists());

        let uploads = vec![UploadedDocument::new("a.pdf", b"python".to_vec())];
        let result = orchestrator().run(&uploads, Path::new(""));
        assert!(matches!(result, Err(CategorizerError::InvalidInput(_))));
    }

    #[test]
    fn test_processes_in_upload_order() {
        let dir = TempDir::new().unwrap();
        let uploads = vec![
            UploadedDocument::new("java.pdf", b"Ann Lee\nJava java engineer".to_vec()),
            UploadedDocument::new("notes.docx", b"python".to_vec()),
            UploadedDocument::new("py.pdf", b"Bob Roy\nPython developer 5551234567".to_vec()),
        ];

        let outcome = orchestrator().run(&uploads, dir.path()).unwrap();

        let files: Vec<&str> = outcome.records.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(files, vec!["java.pdf", "py.pdf"]);
        assert_eq!(outcome.records[0].category, Category::JavaDeveloper);
        assert_eq!(outcome.records[1].category, Category::PythonDeveloper);
        assert_eq!(outcome.records[1].name, "Bob Roy");
        assert_eq!(outcome.records[1].contact.phone, "5551234567");
        assert_eq!(outcome.skipped, vec!["notes.docx".to_string()]);
        assert!(outcome.failures.is_empty());

        assert!(dir.path().join("Java Developer").join("java.pdf").is_file());
        assert!(dir.path().join("Python Developer").join("py.pdf").is_file());
        assert!(!dir.path().join("Python Developer").join("notes.docx").exists());
    }

    #[test]
    fn test_extraction_failure_is_per_document() {
        let dir = TempDir::new().unwrap();
        let uploads = vec![
            UploadedDocument::new("broken.pdf", b"FAIL".to_vec()),
            UploadedDocument::new("ok.pdf", b"python".to_vec()),
        ];

        let mut seen = Vec::new();
        let outcome = orchestrator()
            .run_with_observer(&uploads, dir.path(), |o| seen.push(o.filename().to_string()))
            .unwrap();

        assert_eq!(seen, vec!["broken.pdf", "ok.pdf"]);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].stage, FailureStage::Extraction);
        assert_eq!(outcome.failures[0].code, "PDF_EXTRACTION_ERROR");
    }

    #[test]
    fn test_sorting_failure_is_per_document() {
        let dir = TempDir::new().unwrap();
        // A file where the category folder should go
        std::fs::write(dir.path().join("Java Developer"), b"blocker").unwrap();
        let uploads = vec![
            UploadedDocument::new("java.pdf", b"java".to_vec()),
            UploadedDocument::new("py.pdf", b"python".to_vec()),
        ];

        let outcome = orchestrator().run(&uploads, dir.path()).unwrap();

        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].filename, "java.pdf");
        assert_eq!(outcome.failures[0].stage, FailureStage::Sorting);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].filename, "py.pdf");
    }

    #[test]
    fn test_duplicate_filenames_are_kept() {
        let dir = TempDir::new().unwrap();
        let uploads = vec![
            UploadedDocument::new("cv.pdf", b"python first".to_vec()),
            UploadedDocument::new("cv.pdf", b"python second".to_vec()),
        ];

        let outcome = orchestrator().run(&uploads, dir.path()).unwrap();

        assert_eq!(outcome.records.len(), 2);
        let stored = std::fs::read(dir.path().join("Python Developer").join("cv.pdf")).unwrap();
        assert_eq!(stored, b"python second".to_vec());
    }
}
