//! Error types for docrank.

use std::io;
use thiserror::Error;

/// Result type alias for docrank operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting, scoring and ranking sections.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input record or output record could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input record is structurally valid JSON but unusable.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error extracting text content.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// No document produced a single section, so there is nothing to fit.
    #[error("Empty corpus: no sections were extracted from any document")]
    EmptyCorpus,

    /// Every token in the corpus was a stop word.
    #[error("Empty vocabulary: corpus contains only stop words")]
    EmptyVocabulary,
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
