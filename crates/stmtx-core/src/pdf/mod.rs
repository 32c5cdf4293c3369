//! Document access: raw text lines and reconstructed table grids.

mod extractor;
mod grid;
mod memory;

pub use extractor::PdfDocument;
pub use grid::{Grid, GridBuilder};
pub use memory::MemoryDocument;

use crate::error::PdfError;

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Which pages a grid request covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSelector {
    /// Every page of the document.
    All,
    /// A single page (1-indexed).
    Page(u32),
}

impl PageSelector {
    /// Expand into page numbers for a document with `page_count` pages.
    pub fn pages(self, page_count: u32) -> Vec<u32> {
        match self {
            PageSelector::All => (1..=page_count).collect(),
            PageSelector::Page(page) => vec![page],
        }
    }
}

/// Capabilities the recognizers need from a statement document.
pub trait StatementDocument {
    /// Get the number of pages.
    fn page_count(&self) -> u32;

    /// Text lines of one page (1-indexed), top to bottom.
    fn extract_lines(&self, page: u32) -> Result<Vec<String>>;

    /// Page-level grids (rows of cell strings) for the selected pages.
    fn extract_grids(&self, pages: PageSelector) -> Result<Vec<Grid>>;
}
