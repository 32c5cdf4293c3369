//! In-memory statement documents.

use super::{Grid, GridBuilder, PageSelector, Result, StatementDocument};
use crate::error::PdfError;

#[derive(Debug, Clone, Default)]
struct MemoryPage {
    lines: Vec<String>,
    grid_rows: Option<Vec<Vec<String>>>,
}

/// A statement document held in memory.
///
/// Pages carry text lines and, optionally, an explicit grid. Pages without
/// an explicit grid get one reconstructed from their lines.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    pages: Vec<MemoryPage>,
    grid: GridBuilder,
}

impl MemoryDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from extracted text, one page per form-feed section.
    pub fn from_text(text: &str) -> Self {
        let mut doc = Self::new();
        let mut sections: Vec<&str> = text.split('\u{000C}').collect();
        if sections.len() > 1 && sections.last().is_some_and(|s| s.trim().is_empty()) {
            sections.pop();
        }
        for section in sections {
            doc = doc.with_page(section.lines());
        }
        doc
    }

    /// Use a custom grid builder for pages without explicit grids.
    pub fn with_grid_builder(mut self, grid: GridBuilder) -> Self {
        self.grid = grid;
        self
    }

    /// Append a page of text lines.
    pub fn with_page<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pages.push(MemoryPage {
            lines: lines.into_iter().map(Into::into).collect(),
            grid_rows: None,
        });
        self
    }

    /// Append a page defined by an explicit grid. Its text lines are the
    /// rows with cells joined by two spaces.
    pub fn with_grid_page<R, C, S>(mut self, rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|r| r.into_iter().map(Into::into).collect())
            .collect();
        let lines = rows
            .iter()
            .map(|r| {
                r.iter()
                    .filter(|c| !c.is_empty())
                    .cloned()
                    .collect::<Vec<_>>()
                    .join("  ")
            })
            .collect();
        self.pages.push(MemoryPage {
            lines,
            grid_rows: Some(rows),
        });
        self
    }
}

impl StatementDocument for MemoryDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn extract_lines(&self, page: u32) -> Result<Vec<String>> {
        page.checked_sub(1)
            .and_then(|idx| self.pages.get(idx as usize))
            .map(|p| p.lines.clone())
            .ok_or(PdfError::InvalidPage(page))
    }

    fn extract_grids(&self, pages: PageSelector) -> Result<Vec<Grid>> {
        let mut grids = Vec::new();
        for page in pages.pages(self.page_count()) {
            let data = page
                .checked_sub(1)
                .and_then(|idx| self.pages.get(idx as usize))
                .ok_or(PdfError::InvalidPage(page))?;

            match &data.grid_rows {
                Some(rows) if !rows.is_empty() => grids.push(Grid::new(page, rows.clone())),
                Some(_) => {}
                None => grids.extend(self.grid.build(page, &data.lines)),
            }
        }
        Ok(grids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_text_splits_pages() {
        let doc = MemoryDocument::from_text("one\ntwo\u{000C}three\u{000C}");
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.extract_lines(2).unwrap(), vec!["three".to_string()]);
    }

    #[test]
    fn test_explicit_grid_is_returned_verbatim() {
        let doc = MemoryDocument::new().with_grid_page([["A", ""], ["B", "C"]]);
        let grids = doc.extract_grids(PageSelector::All).unwrap();
        assert_eq!(grids.len(), 1);
        assert_eq!(grids[0].rows[0], vec!["A".to_string(), String::new()]);
        assert_eq!(doc.extract_lines(1).unwrap(), vec!["A".to_string(), "B  C".to_string()]);
    }

    #[test]
    fn test_custom_grid_builder() {
        let doc = MemoryDocument::new()
            .with_grid_builder(GridBuilder::new().with_min_column_gap(1))
            .with_page(["05 FEB PAGO"]);
        let grids = doc.extract_grids(PageSelector::All).unwrap();
        assert_eq!(grids[0].num_cols(), 3);

        let doc = MemoryDocument::new().with_page(["05 FEB PAGO"]);
        let grids = doc.extract_grids(PageSelector::All).unwrap();
        assert_eq!(grids[0].num_cols(), 1);
    }

    #[test]
    fn test_invalid_page() {
        let doc = MemoryDocument::new().with_page(["x"]);
        assert!(matches!(doc.extract_lines(0), Err(PdfError::InvalidPage(0))));
        assert!(matches!(
            doc.extract_grids(PageSelector::Page(4)),
            Err(PdfError::InvalidPage(4))
        ));
    }
}
