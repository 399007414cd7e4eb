//! PDF text extraction.
//!
//! Pages are read in ascending order and their text is concatenated as-is, with no separator
//! normalisation. Documents without a text layer (scanned images) produce an empty string,
//! which is not an error at this level.

use std::path::Path;

use tracing::debug;

use crate::errors::AppError;

/// Produces the plain text of a document, in page order.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<String, AppError>;
}

/// `TextExtractor` backed by the `pdf-extract` crate.
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, path: &Path) -> Result<String, AppError> {
        let open_error = |reason: String| AppError::DocumentOpen {
            path: path.display().to_string(),
            reason,
        };

        // The bytes are the only handle on the document and are dropped on every return path.
        let bytes = std::fs::read(path).map_err(|e| open_error(e.to_string()))?;
        let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes)
            .map_err(|e| open_error(e.to_string()))?;

        debug!("Extracted {} pages from {}", pages.len(), path.display());
        Ok(concat_pages(pages))
    }
}

/// Concatenates page texts in the order given. Zero pages yield an empty string.
pub fn concat_pages<I, S>(pages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    pages.into_iter().fold(String::new(), |mut text, page| {
        text.push_str(page.as_ref());
        text
    })
}
