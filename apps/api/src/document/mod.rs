//! Resume document handling: text extraction from uploads.

pub mod extract;

pub use extract::{DocumentReadError, PdfTextExtractor, ResumeExtractor};
