//! BanBajío statements.
//!
//! Each page is read from its grid first. Pages whose grid yields nothing
//! fall back to splitting the raw text lines on wide gaps.

use tracing::debug;

use super::standard_ledger;
use crate::models::ledger::{Ledger, Transaction};
use crate::pdf::{Grid, PageSelector, StatementDocument};
use crate::statement::rules::patterns::{DATE_DAY_MONTH_PREFIX, LINE_DAY_MONTH, WIDE_GAP};
use crate::statement::rules::{cell_at, fold_header, parse_amount};
use crate::statement::{LayoutRecognizer, Result};

#[derive(Debug, Default, Clone, Copy)]
struct ColumnMap {
    date: Option<usize>,
    reference: Option<usize>,
    description: Option<usize>,
    deposit: Option<usize>,
    withdrawal: Option<usize>,
    balance: Option<usize>,
}

/// Resolved columns; every field but the reference is required.
#[derive(Debug, Clone, Copy)]
struct Columns {
    date: usize,
    reference: Option<usize>,
    description: usize,
    deposit: usize,
    withdrawal: usize,
    balance: usize,
}

impl ColumnMap {
    fn from_header(header: &[String]) -> Self {
        let mut map = Self::default();
        for (j, h) in header.iter().enumerate() {
            if h == "FECHA" {
                map.date = Some(j);
            } else if h.contains("REF") {
                map.reference = Some(j);
            } else if h.contains("DESCRIPCION") {
                map.description = Some(j);
            } else if h.contains("DEPOSITOS") {
                map.deposit = Some(j);
            } else if h.contains("RETIROS") {
                map.withdrawal = Some(j);
            } else if h.contains("SALDO") {
                map.balance = Some(j);
            }
        }
        map
    }

    fn complete(self) -> Option<Columns> {
        Some(Columns {
            date: self.date?,
            reference: self.reference,
            description: self.description?,
            deposit: self.deposit?,
            withdrawal: self.withdrawal?,
            balance: self.balance?,
        })
    }
}

fn is_header(folded: &[String]) -> bool {
    folded.iter().any(|h| h == "FECHA")
        && folded.iter().any(|h| h.contains("DESCRIPCION"))
        && folded.iter().any(|h| h == "SALDO")
}

fn grid_rows(grid: &Grid) -> Vec<Transaction> {
    let header = grid.rows.iter().enumerate().find_map(|(i, row)| {
        let folded: Vec<String> = row.iter().map(|c| fold_header(c)).collect();
        is_header(&folded).then_some((i, folded))
    });
    let Some((header_idx, folded)) = header else {
        return Vec::new();
    };
    let Some(columns) = ColumnMap::from_header(&folded).complete() else {
        debug!("banbajio: page {} header is missing columns", grid.page);
        return Vec::new();
    };

    // The row below the header is a sub-heading
    grid.rows
        .iter()
        .skip(header_idx + 2)
        .map(|row| {
            let tx = Transaction::new(
                cell_at(row, columns.date),
                cell_at(row, columns.description),
                parse_amount(cell_at(row, columns.deposit)),
                parse_amount(cell_at(row, columns.withdrawal)),
                parse_amount(cell_at(row, columns.balance)),
            );
            match columns.reference.map(|r| cell_at(row, r)) {
                Some(reference) if !reference.is_empty() => tx.with_reference(reference),
                _ => tx,
            }
        })
        .collect()
}

fn text_rows(lines: &[String]) -> Vec<Transaction> {
    let mut rows = Vec::new();
    for line in lines {
        let line = line.trim();
        if !DATE_DAY_MONTH_PREFIX.is_match(line) {
            continue;
        }
        let parts: Vec<&str> = WIDE_GAP.split(line).collect();
        if parts.len() < 5 {
            continue;
        }

        let (date, reference, description) = (parts[0], parts[1], parts[2]);
        let amount_text = parts[parts.len() - 2];
        let amount = parse_amount(amount_text).abs();
        let (deposit, withdrawal) = if amount_text.contains('-') || amount_text.contains('(') {
            (0.0, amount)
        } else {
            (amount, 0.0)
        };
        let balance = parse_amount(parts[parts.len() - 1]);

        let tx = Transaction::new(date, description, deposit, withdrawal, balance);
        let is_numeric = !reference.is_empty() && reference.chars().all(|c| c.is_ascii_digit());
        rows.push(if is_numeric { tx.with_reference(reference) } else { tx });
    }
    rows
}

/// BanBajío layout with a per-page text fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct Banbajio;

impl LayoutRecognizer for Banbajio {
    fn name(&self) -> &'static str {
        "banbajio"
    }

    fn description(&self) -> &'static str {
        "BanBajío, FECHA/REF/DESCRIPCION/DEPOSITOS/RETIROS/SALDO table or wide-gap text"
    }

    fn recognize(&self, document: &dyn StatementDocument) -> Result<Ledger> {
        let mut records = Vec::new();

        for page in 1..=document.page_count() {
            let block: Vec<Transaction> = document
                .extract_grids(PageSelector::Page(page))?
                .iter()
                .flat_map(grid_rows)
                .collect();

            if block.is_empty() {
                let lines = document.extract_lines(page)?;
                let fallback = text_rows(&lines);
                debug!("banbajio: page {} text fallback found {} rows", page, fallback.len());
                records.extend(fallback);
            } else {
                records.extend(block);
            }
        }

        Ok(standard_ledger(self.name(), records))
    }

    fn is_transaction_line(&self, line: &str) -> bool {
        LINE_DAY_MONTH.is_match(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::MemoryDocument;
    use pretty_assertions::assert_eq;

    fn transactions(ledger: Ledger) -> Vec<Transaction> {
        ledger.transactions().unwrap_or_default().to_vec()
    }

    #[test]
    fn test_grid_skips_subheading_and_keeps_reference() {
        let doc = MemoryDocument::new().with_grid_page([
            ["FECHA", "NO. REF.", "DESCRIPCIÓN DE LA OPERACIÓN", "DEPOSITOS", "RETIROS", "SALDO"],
            ["", "", "SALDO INICIAL", "", "", "1,000.00"],
            ["2 ENE", "8812", "DEPOSITO SPEI", "500.00", "", "1,500.00"],
            ["3 ENE", "", "COMISION", "", "15.00", "1,485.00"],
        ]);

        let rows = transactions(Banbajio.recognize(&doc).unwrap());

        assert_eq!(
            rows,
            vec![
                Transaction::new("2 ENE", "DEPOSITO SPEI", 500.0, 0.0, 1500.0)
                    .with_reference("8812"),
                Transaction::new("3 ENE", "COMISION", 0.0, 15.0, 1485.0),
            ]
        );
    }

    #[test]
    fn test_text_fallback() {
        let doc = MemoryDocument::new().with_page([
            "ESTADO DE CUENTA",
            "5 ENE  123456  PAGO PROVEEDOR  -2,000.00  8,000.00",
            "6 ENE  SPEI  TRANSFERENCIA RECIBIDA  1,500.00  9,500.00",
            "7 ENE  CORTO  1.00",
        ]);

        let rows = transactions(Banbajio.recognize(&doc).unwrap());

        assert_eq!(
            rows,
            vec![
                Transaction::new("5 ENE", "PAGO PROVEEDOR", 0.0, 2000.0, 8000.0)
                    .with_reference("123456"),
                Transaction::new("6 ENE", "TRANSFERENCIA RECIBIDA", 1500.0, 0.0, 9500.0),
            ]
        );
    }

    #[test]
    fn test_incomplete_header_falls_back_to_text() {
        let doc = MemoryDocument::new().with_grid_page([
            ["FECHA", "DESCRIPCION", "SALDO"],
            ["", "", ""],
            ["9 ENE", "CARGO", "100.00"],
        ]);
        assert!(Banbajio.recognize(&doc).unwrap().is_empty());
    }

    #[test]
    fn test_parenthesized_amount_is_withdrawal() {
        let rows = text_rows(&["10 FEB  X  CARGO  (75.00)  25.00".to_string()]);
        assert_eq!(rows[0].withdrawal, 75.0);
        assert_eq!(rows[0].deposit, 0.0);
        assert_eq!(rows[0].reference, None);
    }
}
