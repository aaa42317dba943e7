//! Error types for the fakt-core library.

use thiserror::Error;

/// Main error type for the fakt library.
#[derive(Error, Debug)]
pub enum FaktError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// A region points at a page the document does not have.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors from field extraction and tenant-share derivation.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The anchor phrase locating a field was absent from the region text.
    #[error("anchor {0:?} not found")]
    AnchorNotFound(String),

    /// The value pattern was absent from the search window.
    #[error("no {0} found")]
    NoMatch(&'static str),

    /// A pattern matched but could not be parsed into a value.
    #[error("invalid {kind}: {value:?}")]
    Malformed { kind: &'static str, value: String },

    /// Share derivation needs both totals parsed and a positive total usage.
    #[error("total usage and cost must be parsed, with usage above zero, before splitting")]
    MissingTotals,
}

/// Result type for the fakt library.
pub type Result<T> = std::result::Result<T, FaktError>;
