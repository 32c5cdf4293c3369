//! Stream-style grid reconstruction from whitespace-aligned page text.
//!
//! Each line is cut into cells on runs of spaces; the line with the most
//! cells fixes the column anchors and every other line's cells are snapped
//! to the nearest anchor column. The output is always rectangular.

use tracing::trace;

use crate::models::config::GridConfig;

/// A page-level table of cell strings.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Page number (1-indexed) this grid came from.
    pub page: u32,
    /// Rows of cells, top to bottom.
    pub rows: Vec<Vec<String>>,
}

impl Grid {
    /// Create a grid from rows.
    pub fn new(page: u32, rows: Vec<Vec<String>>) -> Self {
        Self { page, rows }
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Widest row length.
    pub fn num_cols(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Cell content, or an empty string when the cell does not exist.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Whether the grid has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A run of text within a line, in character positions.
#[derive(Debug, Clone)]
struct Segment {
    start: usize,
    end: usize,
    text: String,
}

impl Segment {
    fn center(&self) -> f64 {
        (self.start + self.end) as f64 / 2.0
    }
}

/// Builds grids from page lines.
#[derive(Debug, Clone)]
pub struct GridBuilder {
    min_column_gap: usize,
    min_row_cells: usize,
}

impl GridBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self::from_config(&GridConfig::default())
    }

    /// Create a builder from configuration.
    pub fn from_config(config: &GridConfig) -> Self {
        Self {
            min_column_gap: 1,
            min_row_cells: 1,
        }
        .with_min_column_gap(config.min_column_gap)
        .with_min_row_cells(config.min_row_cells)
    }

    /// Set the minimum whitespace run that separates cells.
    pub fn with_min_column_gap(mut self, gap: usize) -> Self {
        self.min_column_gap = gap.max(1);
        self
    }

    /// Leave out lines with fewer than `cells` cells.
    pub fn with_min_row_cells(mut self, cells: usize) -> Self {
        self.min_row_cells = cells.max(1);
        self
    }

    /// Reconstruct a grid for one page. Returns `None` when no line has
    /// enough cells.
    pub fn build<S: AsRef<str>>(&self, page: u32, lines: &[S]) -> Option<Grid> {
        let segmented: Vec<Vec<Segment>> = lines
            .iter()
            .map(|l| self.segments(l.as_ref()))
            .filter(|segs| segs.len() >= self.min_row_cells)
            .collect();

        // First line with the most cells wins ties.
        let anchor = segmented.iter().rev().max_by_key(|segs| segs.len())?;
        let centers: Vec<f64> = anchor.iter().map(Segment::center).collect();
        let num_cols = centers.len();

        let rows: Vec<Vec<String>> = segmented
            .iter()
            .map(|segs| {
                if segs.len() == num_cols {
                    return segs.iter().map(|s| s.text.clone()).collect();
                }

                let mut cells = vec![String::new(); num_cols];
                let mut floor = 0;
                for seg in segs {
                    let col = nearest_column(&centers, seg.center()).max(floor);
                    if !cells[col].is_empty() {
                        cells[col].push(' ');
                    }
                    cells[col].push_str(&seg.text);
                    floor = col;
                }
                cells
            })
            .collect();

        let grid = Grid::new(page, rows);
        trace!(
            "Page {}: reconstructed {} rows x {} columns",
            page,
            grid.num_rows(),
            grid.num_cols()
        );
        Some(grid)
    }

    fn segments(&self, line: &str) -> Vec<Segment> {
        let gap = self.min_column_gap;
        let chars: Vec<char> = line
            .chars()
            .flat_map(|c| {
                let n = if c == '\t' { gap } else { 1 };
                std::iter::repeat_n(if c.is_whitespace() { ' ' } else { c }, n)
            })
            .collect();

        let mut out = Vec::new();
        let mut i = 0;
        while i < chars.len() {
            if chars[i] == ' ' {
                i += 1;
                continue;
            }

            let start = i;
            let mut last = i;
            let mut spaces = 0;
            while i < chars.len() {
                if chars[i] == ' ' {
                    spaces += 1;
                    if spaces >= gap {
                        break;
                    }
                } else {
                    spaces = 0;
                    last = i;
                }
                i += 1;
            }

            out.push(Segment {
                start,
                end: last + 1,
                text: chars[start..=last].iter().collect(),
            });
        }
        out
    }
}

impl Default for GridBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn nearest_column(centers: &[f64], x: f64) -> usize {
    centers
        .iter()
        .enumerate()
        .min_by(|a, b| {
            (a.1 - x)
                .abs()
                .partial_cmp(&(b.1 - x).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i)
        .unwrap_or(0)
}
