//! BBVA statements, reported in the settlement schema.

use crate::models::ledger::{Ledger, SettlementEntry};
use crate::pdf::{PageSelector, StatementDocument};
use crate::statement::rules::patterns::LINE_DAY_MONTH;
use crate::statement::rules::{cell_at, fold_header, parse_amount};
use crate::statement::{LayoutRecognizer, Result};

fn is_header(row: &[String]) -> bool {
    let folded: Vec<String> = row.iter().map(|c| fold_header(c)).collect();
    ["OPER", "CARGOS", "ABONOS"]
        .iter()
        .all(|key| folded.iter().any(|h| h == key))
}

/// BBVA layout with operation and settlement columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bbva;

impl LayoutRecognizer for Bbva {
    fn name(&self) -> &'static str {
        "bbva"
    }

    fn description(&self) -> &'static str {
        "BBVA, OPER/LIQ/DESCRIPCION/CARGOS/ABONOS/OPERACION/LIQUIDACION table"
    }

    fn schema(&self) -> &'static str {
        "settlement"
    }

    fn recognize(&self, document: &dyn StatementDocument) -> Result<Ledger> {
        let grids = document.extract_grids(PageSelector::All)?;
        let mut entries = Vec::new();

        for grid in &grids {
            let Some(header_idx) = grid.rows.iter().position(|r| is_header(r)) else {
                continue;
            };

            for row in &grid.rows[header_idx + 1..] {
                let operation_date = cell_at(row, 0);
                if operation_date.is_empty() {
                    continue;
                }

                let (settlement_date, description) = cell_at(row, 1)
                    .split_once(char::is_whitespace)
                    .map(|(d, rest)| (d, rest.trim()))
                    .unwrap_or((cell_at(row, 1), ""));

                entries.push(SettlementEntry {
                    operation_date: operation_date.to_string(),
                    settlement_date: settlement_date.to_string(),
                    description: description.to_string(),
                    charges: parse_amount(cell_at(row, 2)),
                    credits: parse_amount(cell_at(row, 3)),
                    operation_balance: parse_amount(cell_at(row, 4)),
                    settlement_balance: parse_amount(cell_at(row, 5)),
                });
            }
        }

        Ok(Ledger::Settlement(entries))
    }

    fn is_transaction_line(&self, line: &str) -> bool {
        LINE_DAY_MONTH.is_match(line)
    }
}
