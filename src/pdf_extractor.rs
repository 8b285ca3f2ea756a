//! PDF text extraction wrapper
//!
//! Wraps the pdf-extract crate with error handling for:
//! - Encrypted or corrupted PDFs (library error or panic)
//! - Scanned/image-only PDFs (no text layer)
//!
//! Pages are concatenated in order with no boundary marker.

use crate::error::{Form16Error, Result};
use std::path::Path;

/// Extract the full text of a PDF held in memory
pub fn extract_text_from_pdf(pdf_bytes: &[u8]) -> Result<String> {
    let result = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(pdf_bytes));

    let text = match result {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => return Err(Form16Error::Pdf(e.to_string())),
        Err(_) => return Err(Form16Error::Pdf("malformed PDF".to_string())),
    };

    if text.trim().is_empty() {
        return Err(Form16Error::EmptyDocument);
    }

    tracing::debug!(bytes = pdf_bytes.len(), chars = text.len(), "PDF text extracted");
    Ok(text)
}

/// Read a PDF from disk and extract its text
pub fn extract_text_from_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    extract_text_from_pdf(&bytes)
}
