//! Column addressing and cell helpers for grid rows.

/// A column position, either from the left or counted from the right end of
/// the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRef {
    /// Zero-based index from the left.
    At(usize),
    /// One-based offset from the right (`FromEnd(1)` is the last cell).
    FromEnd(usize),
}

impl ColumnRef {
    /// Resolve to an index in a row of `len` cells.
    pub fn resolve(self, len: usize) -> Option<usize> {
        match self {
            ColumnRef::At(i) if i < len => Some(i),
            ColumnRef::FromEnd(k) if k > 0 && k <= len => Some(len - k),
            _ => None,
        }
    }

    /// Exclusive slice end in a row of `len` cells, clamped to the row.
    pub fn slice_end(self, len: usize) -> usize {
        match self {
            ColumnRef::At(i) => i.min(len),
            ColumnRef::FromEnd(k) => len.saturating_sub(k),
        }
    }

    /// Cell content at this position, empty when out of range.
    pub fn cell(self, row: &[String]) -> &str {
        self.resolve(row.len())
            .map(|i| row[i].trim())
            .unwrap_or("")
    }
}

/// Trimmed cell content at `idx`, empty when out of range.
pub fn cell_at(row: &[String], idx: usize) -> &str {
    row.get(idx).map(|c| c.trim()).unwrap_or("")
}

/// Normalize a header cell: trimmed, upper-cased, Spanish vowel accents
/// removed (`Ñ` is kept).
pub fn fold_header(cell: &str) -> String {
    cell.trim()
        .to_uppercase()
        .chars()
        .map(|c| match c {
            'Á' => 'A',
            'É' => 'E',
            'Í' => 'I',
            'Ó' => 'O',
            'Ú' | 'Ü' => 'U',
            other => other,
        })
        .collect()
}

/// Split a string after `n` characters.
pub fn split_chars(s: &str, n: usize) -> (&str, &str) {
    match s.char_indices().nth(n) {
        Some((idx, _)) => s.split_at(idx),
        None => (s, ""),
    }
}

/// Join trimmed, non-empty fragments with single spaces.
pub fn join_fragments<'a, I>(parts: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_column_ref_resolve() {
        assert_eq!(ColumnRef::At(1).resolve(3), Some(1));
        assert_eq!(ColumnRef::At(3).resolve(3), None);
        assert_eq!(ColumnRef::FromEnd(1).resolve(3), Some(2));
        assert_eq!(ColumnRef::FromEnd(3).resolve(3), Some(0));
        assert_eq!(ColumnRef::FromEnd(4).resolve(3), None);
    }

    #[test]
    fn test_slice_end_clamps() {
        assert_eq!(ColumnRef::FromEnd(3).slice_end(5), 2);
        assert_eq!(ColumnRef::FromEnd(3).slice_end(2), 0);
        assert_eq!(ColumnRef::At(9).slice_end(4), 4);
    }

    #[test]
    fn test_cells() {
        let r = row(&[" a ", "b"]);
        assert_eq!(cell_at(&r, 0), "a");
        assert_eq!(cell_at(&r, 7), "");
        assert_eq!(ColumnRef::FromEnd(1).cell(&r), "b");
    }

    #[test]
    fn test_fold_header() {
        assert_eq!(fold_header(" Depósitos "), "DEPOSITOS");
        assert_eq!(fold_header("descripción"), "DESCRIPCION");
        assert_eq!(fold_header("Año"), "AÑO");
    }

    #[test]
    fn test_split_chars_respects_char_boundaries() {
        assert_eq!(split_chars("01-ENE-24 PAGO", 9), ("01-ENE-24", " PAGO"));
        assert_eq!(split_chars("ÁÉ", 1), ("Á", "É"));
        assert_eq!(split_chars("short", 9), ("short", ""));
    }

    #[test]
    fn test_join_fragments() {
        assert_eq!(join_fragments(["", " PAGO ", "SPEI", "  "]), "PAGO SPEI");
        assert_eq!(join_fragments(Vec::<&str>::new()), "");
    }
}
