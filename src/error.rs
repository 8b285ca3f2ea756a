//! Error types shared by the extraction engine, the PDF collaborator and the binaries

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Form16Error {
    /// The PDF could not be parsed (corrupt, encrypted, unsupported)
    #[error("Failed to extract text from PDF: {0}")]
    Pdf(String),

    /// The PDF parsed but carried no text layer (scanned/image-only)
    #[error("PDF contains no extractable text")]
    EmptyDocument,

    /// Employer email is the one field whose absence fails the whole request
    #[error("No employer email address found in document")]
    MissingEmail,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, Form16Error>;
