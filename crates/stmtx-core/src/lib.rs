//! Core library for bank statement extraction.
//!
//! This crate provides:
//! - Document access (PDF text lines and reconstructed table grids)
//! - Layout recognizers for six bank statement formats
//! - A priority-ordered dispatcher that picks the first matching layout
//! - Completeness metrics for an extraction

pub mod error;
pub mod models;
pub mod pdf;
pub mod statement;

pub use error::{LayoutError, PdfError, Result, StmtxError};
pub use models::config::{CompletenessPolicy, StmtxConfig};
pub use models::ledger::{ExtractionReport, Ledger, SettlementEntry, Transaction};
pub use pdf::{Grid, MemoryDocument, PageSelector, PdfDocument, StatementDocument};
pub use statement::rules::amounts::parse_amount;
pub use statement::{
    extract, extract_with_metrics, LayoutRecognizer, Registry, StatementExtractor,
};
