//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::statement::DEFAULT_LAYOUT_ORDER;

/// Main configuration for the stmtx pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StmtxConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Grid reconstruction configuration.
    pub grid: GridConfig,

    /// Layout dispatch and metrics configuration.
    pub extraction: ExtractionConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to read (0 = unlimited).
    pub max_pages: usize,

    /// Try to decrypt encrypted PDFs with an empty password.
    pub try_empty_password: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_pages: 0,
            try_empty_password: true,
        }
    }
}

/// Whitespace-stream grid reconstruction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Minimum run of spaces that separates two cells.
    pub min_column_gap: usize,

    /// Lines with fewer cells than this are left out of the grid. Values
    /// below 1 are treated as 1, so blank lines never become rows.
    pub min_row_cells: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            min_column_gap: 2,
            min_row_cells: 1,
        }
    }
}

/// How the metrics estimator sets the expected row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletenessPolicy {
    /// Expected count equals the extracted count (100% whenever anything
    /// was extracted).
    #[default]
    Extracted,
    /// Expected count is the number of raw lines matching the layout's
    /// transaction-line pattern.
    LineCount,
}

/// Layout dispatch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Layout names in priority order.
    pub layouts: Vec<String>,

    /// Completeness baseline policy.
    pub completeness: CompletenessPolicy,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            layouts: DEFAULT_LAYOUT_ORDER.iter().map(|s| s.to_string()).collect(),
            completeness: CompletenessPolicy::default(),
        }
    }
}

impl StmtxConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
