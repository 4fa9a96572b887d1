//! PDF text extraction.
//!
//! `pdf_extract` gives the best text for well-formed files but fails the whole
//! document on one bad page, and can panic on malformed input. When it does,
//! the document is re-read with `lopdf` page by page so a single unreadable
//! page only costs its own text.

use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;
use tracing::{debug, warn};

/// The uploaded document could not be parsed as a PDF at all.
#[derive(Debug, Error)]
#[error("Could not read the uploaded resume: {0}")]
pub struct DocumentReadError(pub String);

/// Turns an uploaded resume into plain text.
pub trait ResumeExtractor: Send + Sync {
    fn extract(&self, document: &[u8]) -> Result<String, DocumentReadError>;
}

/// Default extractor for PDF uploads.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl ResumeExtractor for PdfTextExtractor {
    fn extract(&self, document: &[u8]) -> Result<String, DocumentReadError> {
        match extract_pages_fast(document) {
            Ok(pages) => {
                debug!("Extracted {} page(s) with pdf-extract", pages.len());
                Ok(pages.concat())
            }
            Err(reason) => {
                warn!("pdf-extract failed ({reason}); falling back to per-page extraction");
                extract_pages_tolerant(document).map(|pages| pages.concat())
            }
        }
    }
}

fn extract_pages_fast(document: &[u8]) -> Result<Vec<String>, String> {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(document)
    }));
    match result {
        Ok(Ok(pages)) => Ok(pages),
        Ok(Err(e)) => Err(e.to_string()),
        Err(_) => Err("extractor panicked on malformed input".to_string()),
    }
}

/// Loads the document structure, then extracts each page on its own.
/// A page that fails contributes an empty string.
fn extract_pages_tolerant(document: &[u8]) -> Result<Vec<String>, DocumentReadError> {
    let doc = lopdf::Document::load_mem(document)
        .map_err(|e| DocumentReadError(e.to_string()))?;

    let pages = doc
        .get_pages()
        .into_keys()
        .map(|page_number| {
            let result = panic::catch_unwind(AssertUnwindSafe(|| doc.extract_text(&[page_number])));
            match result {
                Ok(Ok(text)) => text,
                Ok(Err(e)) => {
                    warn!("Page {page_number} yielded no text: {e}");
                    String::new()
                }
                Err(_) => {
                    warn!("Page {page_number} yielded no text: extractor panicked");
                    String::new()
                }
            }
        })
        .collect();

    Ok(pages)
}
