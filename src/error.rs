//! Error handling for the resume categorizer

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CategorizerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Model loading error: {0}")]
    ModelLoading(String),

    #[error("Classification error: {0}")]
    Classification(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to write {}: {source}", path.display())]
    FileSorting {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, CategorizerError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for CategorizerError {
    fn from(err: anyhow::Error) -> Self {
        CategorizerError::Processing(err.to_string())
    }
}

impl From<askama::Error> for CategorizerError {
    fn from(err: askama::Error) -> Self {
        CategorizerError::OutputFormatting(err.to_string())
    }
}

impl CategorizerError {
    /// Short machine-readable tag used in reports and HTTP error bodies
    pub fn code(&self) -> &'static str {
        match self {
            CategorizerError::Io(_) => "IO_ERROR",
            CategorizerError::PdfExtraction(_) => "PDF_EXTRACTION_ERROR",
            CategorizerError::ModelLoading(_) => "MODEL_LOADING_ERROR",
            CategorizerError::Classification(_) => "CLASSIFICATION_ERROR",
            CategorizerError::Configuration(_) => "CONFIGURATION_ERROR",
            CategorizerError::Serialization(_) => "SERIALIZATION_ERROR",
            CategorizerError::Csv(_) => "CSV_ERROR",
            CategorizerError::InvalidInput(_) => "INVALID_INPUT",
            CategorizerError::FileSorting { .. } => "FILE_SORTING_ERROR",
            CategorizerError::Processing(_) => "PROCESSING_ERROR",
            CategorizerError::OutputFormatting(_) => "OUTPUT_FORMATTING_ERROR",
        }
    }
}
