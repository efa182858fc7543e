//! Error types for docrank.

use std::io;
use thiserror::Error;

/// Result type alias for docrank operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting outlines or ranking sections.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input bytes are not in a format the source understands.
    #[error("Unknown file format: {0}")]
    UnknownFormat(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Malformed JSON input (request file or span dump).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The request is missing required fields.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A requested document does not exist.
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// No registered source handles the document's extension.
    #[error("No document source for: {0}")]
    UnsupportedSource(String),

    /// None of the requested documents could be processed.
    #[error("No valid documents processed")]
    NoDocuments,

    /// The embedding collaborator failed or returned a malformed response.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Error during output serialization.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}
