//! PDF text and grid extraction using lopdf and pdf-extract.

use std::path::Path;

use lopdf::Document;
use tracing::debug;

use super::{Grid, GridBuilder, PageSelector, Result, StatementDocument};
use crate::error::PdfError;
use crate::models::config::StmtxConfig;

/// A loaded PDF statement.
///
/// The handle owns the parsed document and its page texts; everything is
/// released when it is dropped.
pub struct PdfDocument {
    document: Option<Document>,
    pages: Vec<String>,
    grid: GridBuilder,
    max_pages: usize,
    try_empty_password: bool,
}

impl PdfDocument {
    /// Create an empty document handle with default settings.
    pub fn new() -> Self {
        Self::with_config(&StmtxConfig::default())
    }

    /// Create an empty document handle from configuration.
    pub fn with_config(config: &StmtxConfig) -> Self {
        Self {
            document: None,
            pages: Vec::new(),
            grid: GridBuilder::from_config(&config.grid),
            max_pages: config.pdf.max_pages,
            try_empty_password: config.pdf.try_empty_password,
        }
    }

    /// Open and load a PDF file.
    pub fn open(path: &Path, config: &StmtxConfig) -> crate::Result<Self> {
        let data = std::fs::read(path)?;
        let mut doc = Self::with_config(config);
        doc.load(&data)?;
        Ok(doc)
    }

    /// Load a PDF from bytes and extract its page texts.
    pub fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        let text_source = if doc.is_encrypted() {
            if !self.try_empty_password || doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract needs the decrypted bytes
            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            decrypted
        } else {
            data.to_vec()
        };

        let mut page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }
        if self.max_pages > 0 && page_count > self.max_pages {
            debug!("Limiting PDF from {} to {} pages", page_count, self.max_pages);
            page_count = self.max_pages;
        }

        let mut pages = pdf_extract::extract_text_from_mem_by_pages(&text_source)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        pages.truncate(page_count);
        self.pages = pages;

        debug!(
            "Loaded PDF with {} pages, {} chars of text",
            self.pages.len(),
            self.pages.iter().map(String::len).sum::<usize>()
        );
        self.document = Some(doc);
        Ok(())
    }

    fn page_text(&self, page: u32) -> Result<&str> {
        if self.document.is_none() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }
        page.checked_sub(1)
            .and_then(|idx| self.pages.get(idx as usize))
            .map(String::as_str)
            .ok_or(PdfError::InvalidPage(page))
    }
}

impl Default for PdfDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementDocument for PdfDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn extract_lines(&self, page: u32) -> Result<Vec<String>> {
        Ok(self.page_text(page)?.lines().map(str::to_string).collect())
    }

    fn extract_grids(&self, pages: PageSelector) -> Result<Vec<Grid>> {
        let mut grids = Vec::new();
        for page in pages.pages(self.page_count()) {
            let lines = self.extract_lines(page)?;
            if let Some(grid) = self.grid.build(page, &lines) {
                grids.push(grid);
            }
        }
        Ok(grids)
    }
}
