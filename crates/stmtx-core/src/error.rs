//! Error types for the stmtx-core library.

use thiserror::Error;

/// Main error type for the stmtx library.
#[derive(Error, Debug)]
pub enum StmtxError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Layout recognition error.
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to opening and reading a statement document.
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

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors raised inside a layout recognizer.
///
/// The dispatcher absorbs these; they only surface when a caller drives a
/// recognizer directly or configures the registry.
#[derive(Error, Debug)]
pub enum LayoutError {
    /// A page could not be read while the recognizer was running.
    #[error("document access failed: {0}")]
    Document(#[from] PdfError),

    /// The recognizer panicked on unexpected document structure.
    #[error("recognizer '{layout}' panicked: {message}")]
    Panicked { layout: String, message: String },

    /// The requested layout is not registered.
    #[error("unknown layout: {0}")]
    UnknownLayout(String),
}

/// Result type for the stmtx library.
pub type Result<T> = std::result::Result<T, StmtxError>;
