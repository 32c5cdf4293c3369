//! Banorte statements: grid rows opening with a `DD-MON-YY` date.
//!
//! `banorte0` reads fixed trailing columns and ignores rows without a date.
//! `banorte1` resolves columns from the header row and stitches rows without
//! a date onto the previous movement's description.

use tracing::trace;

use super::standard_ledger;
use crate::models::ledger::{Ledger, Transaction};
use crate::pdf::{PageSelector, StatementDocument};
use crate::statement::rules::patterns::{DATE_DD_MON_YY, LINE_DD_MON_YY};
use crate::statement::rules::{
    cell_at, fold_header, join_fragments, parse_amount, split_chars, ColumnRef,
};
use crate::statement::{LayoutRecognizer, Result};

const DATE_LEN: usize = 9;

/// Split a `DD-MON-YY` prefix off a cell, returning the date and the trailing
/// description fragment.
fn split_date(cell: &str) -> Option<(&str, &str)> {
    let (date, tail) = split_chars(cell, DATE_LEN);
    DATE_DD_MON_YY
        .is_match(date)
        .then(|| (date, tail.trim()))
}

fn is_heading(cell: &str) -> bool {
    fold_header(cell).starts_with("FECHA")
}

/// Banorte layout with fixed deposit/withdrawal/balance columns at the end
/// of each row.
#[derive(Debug, Clone, Copy, Default)]
pub struct Banorte0;

impl LayoutRecognizer for Banorte0 {
    fn name(&self) -> &'static str {
        "banorte0"
    }

    fn description(&self) -> &'static str {
        "Banorte, DD-MON-YY rows with deposit/withdrawal/balance as the last three columns"
    }

    fn recognize(&self, document: &dyn StatementDocument) -> Result<Ledger> {
        let grids = document.extract_grids(PageSelector::All)?;
        let mut records = Vec::new();

        for grid in &grids {
            for row in &grid.rows {
                let first = cell_at(row, 0);
                if is_heading(first) {
                    continue;
                }
                let Some((date, tail)) = split_date(first) else {
                    trace!("banorte0: page {} skipping row {:?}", grid.page, first);
                    continue;
                };

                let middle_end = ColumnRef::FromEnd(3).slice_end(row.len());
                let middle = row.get(1..middle_end).unwrap_or_default();
                let description =
                    join_fragments(std::iter::once(tail).chain(middle.iter().map(String::as_str)));

                records.push(Transaction::new(
                    date,
                    description,
                    parse_amount(ColumnRef::FromEnd(3).cell(row)),
                    parse_amount(ColumnRef::FromEnd(2).cell(row)),
                    parse_amount(ColumnRef::FromEnd(1).cell(row)),
                ));
            }
        }

        Ok(standard_ledger(self.name(), records))
    }

    fn is_transaction_line(&self, line: &str) -> bool {
        LINE_DD_MON_YY.is_match(line)
    }
}

/// Column positions resolved from a Banorte header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeaderColumns {
    date: usize,
    deposit: ColumnRef,
    withdrawal: ColumnRef,
    balance: ColumnRef,
}

impl HeaderColumns {
    fn resolve(header: &[String]) -> Self {
        let folded: Vec<String> = header.iter().map(|h| fold_header(h)).collect();
        let find = |pred: fn(&str) -> bool| folded.iter().position(|h| pred(h.as_str()));

        Self {
            date: find(|h| h == "FECHA").unwrap_or(0),
            deposit: find(|h| h.contains("DEPOSITO"))
                .map(ColumnRef::At)
                .unwrap_or(ColumnRef::FromEnd(3)),
            withdrawal: find(|h| h.contains("RETIRO"))
                .map(ColumnRef::At)
                .unwrap_or(ColumnRef::FromEnd(2)),
            balance: find(|h| h == "SALDO")
                .map(ColumnRef::At)
                .unwrap_or(ColumnRef::FromEnd(1)),
        }
    }

    /// Exclusive end of the text cells: the leftmost amount column.
    fn text_end(&self, len: usize) -> usize {
        [self.deposit, self.withdrawal, self.balance]
            .iter()
            .map(|c| c.slice_end(len))
            .min()
            .unwrap_or(len)
    }

    /// Cells between the date column and the first amount column.
    fn middle<'a>(&self, row: &'a [String]) -> &'a [String] {
        row.get(self.date + 1..self.text_end(row.len()))
            .unwrap_or_default()
    }

    /// Text cells from the date column up to the first amount column.
    fn text_cells<'a>(&self, row: &'a [String]) -> &'a [String] {
        row.get(self.date..self.text_end(row.len()))
            .unwrap_or_default()
    }
}

/// Banorte layout with header-resolved columns and wrapped descriptions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Banorte1;

impl LayoutRecognizer for Banorte1 {
    fn name(&self) -> &'static str {
        "banorte1"
    }

    fn description(&self) -> &'static str {
        "Banorte, header-resolved columns with descriptions wrapping onto undated rows"
    }

    fn recognize(&self, document: &dyn StatementDocument) -> Result<Ledger> {
        let grids = document.extract_grids(PageSelector::All)?;
        let mut records: Vec<Transaction> = Vec::new();

        for grid in &grids {
            let Some(header_idx) = grid.rows.iter().position(|r| is_heading(cell_at(r, 0))) else {
                continue;
            };
            let columns = HeaderColumns::resolve(&grid.rows[header_idx]);
            trace!("banorte1: page {} columns {:?}", grid.page, columns);

            for row in &grid.rows[header_idx + 1..] {
                let date_cell = cell_at(row, columns.date);
                let Some((date, tail)) = split_date(date_cell) else {
                    // Wrapped description line
                    if let Some(last) = records.last_mut() {
                        let text =
                            join_fragments(columns.text_cells(row).iter().map(String::as_str));
                        last.append_description(&text);
                    }
                    continue;
                };

                let description = join_fragments(
                    std::iter::once(tail)
                        .chain(columns.middle(row).iter().map(String::as_str)),
                );

                records.push(Transaction::new(
                    date,
                    description,
                    parse_amount(columns.deposit.cell(row)),
                    parse_amount(columns.withdrawal.cell(row)),
                    parse_amount(columns.balance.cell(row)),
                ));
            }
        }

        Ok(standard_ledger(self.name(), records))
    }

    fn is_transaction_line(&self, line: &str) -> bool {
        LINE_DD_MON_YY.is_match(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::MemoryDocument;
    use pretty_assertions::assert_eq;

    const HEADER: [&str; 5] = ["FECHA", "DESCRIPCION", "DEPOSITOS", "RETIROS", "SALDO"];

    fn transactions(ledger: Ledger) -> Vec<Transaction> {
        match ledger {
            Ledger::Standard(rows) => rows,
            other => panic!("unexpected ledger {:?}", other),
        }
    }

    #[test]
    fn test_banorte0_single_row() {
        let doc = MemoryDocument::new().with_grid_page([
            HEADER,
            ["01-JAN-24", "PAYMENT", "1,000.00", "0.00", "1,000.00"],
        ]);

        let rows = transactions(Banorte0.recognize(&doc).unwrap());

        assert_eq!(
            rows,
            vec![Transaction::new("01-JAN-24", "PAYMENT", 1000.0, 0.0, 1000.0)]
        );
    }

    #[test]
    fn test_banorte0_description_from_date_tail_and_middle_cells() {
        let doc = MemoryDocument::new().with_grid_page([
            ["01-ENE-24 SPEI", "ENVIADO", "REF 99", "", "250.00", "750.00"],
            ["SALDO ANTERIOR", "", "", "", "", "1,000.00"],
        ]);

        let rows = transactions(Banorte0.recognize(&doc).unwrap());

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, "SPEI ENVIADO REF 99");
        assert_eq!(rows[0].withdrawal, 250.0);
        assert_eq!(rows[0].balance, 750.0);
    }

    #[test]
    fn test_banorte0_no_dates_is_empty() {
        let doc = MemoryDocument::new().with_grid_page([HEADER, ["TOTAL", "", "1.00", "", ""]]);
        assert!(Banorte0.recognize(&doc).unwrap().is_empty());
    }

    #[test]
    fn test_banorte1_continuation_row_extends_description() {
        let doc = MemoryDocument::new().with_grid_page([
            HEADER,
            ["02-FEB-24", "TRANSFERENCIA", "", "300.00", "700.00"],
            ["", "A CUENTA 1234", "", "", ""],
        ]);

        let rows = transactions(Banorte1.recognize(&doc).unwrap());

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, "TRANSFERENCIA A CUENTA 1234");
        assert_eq!(rows[0].withdrawal, 300.0);
        assert_eq!(rows[0].balance, 700.0);
    }

    #[test]
    fn test_banorte1_continuation_in_date_column() {
        let doc = MemoryDocument::new().with_grid_page([
            HEADER,
            ["02-FEB-24 PAGO", "", "100.00", "", "800.00"],
            ["SERVICIO LUZ", "", "", "", ""],
        ]);

        let rows = transactions(Banorte1.recognize(&doc).unwrap());
        assert_eq!(rows[0].description, "PAGO SERVICIO LUZ");
        assert_eq!(rows[0].deposit, 100.0);
    }

    #[test]
    fn test_banorte1_resolves_reordered_columns() {
        let doc = MemoryDocument::new().with_grid_page([
            ["Fecha", "Concepto", "Saldo", "Retiros", "Depósitos"],
            ["03-MAR-24", "NOMINA", "5,000.00", "", "2,000.00"],
        ]);

        let rows = transactions(Banorte1.recognize(&doc).unwrap());

        assert_eq!(
            rows,
            vec![Transaction::new("03-MAR-24", "NOMINA", 2000.0, 0.0, 5000.0)]
        );
    }

    #[test]
    fn test_banorte1_requires_heading() {
        let doc = MemoryDocument::new()
            .with_grid_page([["02-FEB-24", "PAGO", "1.00", "", "1.00"]]);
        assert!(Banorte1.recognize(&doc).unwrap().is_empty());
    }

    #[test]
    fn test_banorte1_continuation_before_first_record_is_dropped() {
        let doc = MemoryDocument::new().with_grid_page([
            HEADER,
            ["", "HUERFANO", "", "", ""],
            ["04-ABR-24", "CARGO", "", "10.00", "90.00"],
        ]);

        let rows = transactions(Banorte1.recognize(&doc).unwrap());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, "CARGO");
    }
}
