//! Text extraction from uploaded documents

use crate::error::{CategorizerError, Result};
use std::panic::{self, AssertUnwindSafe};

/// Turns raw document bytes into plain text
pub trait DocumentTextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

/// PDF extraction backed by `pdf-extract`.
///
/// Pages are extracted individually and concatenated in page order. The
/// underlying library can panic on malformed fonts or streams, so the call is
/// wrapped in `catch_unwind` and a panic becomes a `PdfExtraction` error.
pub struct PdfExtractor;

impl DocumentTextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        if bytes.is_empty() {
            return Err(CategorizerError::PdfExtraction("Document is empty".to_string()));
        }

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        }));

        match result {
            Ok(Ok(pages)) => Ok(pages.concat()),
            Ok(Err(e)) => Err(CategorizerError::PdfExtraction(format!(
                "Failed to extract text from PDF: {}",
                e
            ))),
            Err(_) => Err(CategorizerError::PdfExtraction(
                "PDF extraction panicked (malformed document)".to_string(),
            )),
        }
    }
}
