//! Citibanamex statements.
//!
//! `citibanamex0` reads a tabular layout with a FECHA/CONCEPTO/RETIROS/
//! DEPOSITOS/SALDO header. `citibanamex1` reads the raw text layout where a
//! movement opens with a `D MONTH` line and closes with a `HORA` line
//! carrying the amount and balance.

use tracing::trace;

use super::standard_ledger;
use crate::models::ledger::{Ledger, Transaction};
use crate::pdf::{PageSelector, StatementDocument};
use crate::statement::rules::patterns::{
    DATE_DAY_MONTH_LINE, DATE_DD_MON_CELL, DEPOSIT_KEYWORDS, LINE_DAY_MONTH, LINE_DD_MON,
    NOISE_LINE, TRAILING_AMOUNT_PAIR,
};
use crate::statement::rules::{
    cell_at, fold_header, join_fragments, parse_amount, parse_loose_number,
};
use crate::statement::{LayoutRecognizer, Result};

const HEADER_KEYS: [&str; 5] = ["FECHA", "CONCEPTO", "RETIROS", "DEPOSITOS", "SALDO"];

#[derive(Debug, Clone, Copy)]
struct TableColumns {
    date: usize,
    concept: usize,
    withdrawal: usize,
    deposit: usize,
    balance: usize,
}

impl TableColumns {
    fn from_header(row: &[String]) -> Option<Self> {
        let folded: Vec<String> = row.iter().map(|c| fold_header(c)).collect();
        let idx = |key: &str| folded.iter().position(|h| h == key);
        Some(Self {
            date: idx(HEADER_KEYS[0])?,
            concept: idx(HEADER_KEYS[1])?,
            withdrawal: idx(HEADER_KEYS[2])?,
            deposit: idx(HEADER_KEYS[3])?,
            balance: idx(HEADER_KEYS[4])?,
        })
    }
}

/// Citibanamex tabular layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct Citibanamex0;

impl LayoutRecognizer for Citibanamex0 {
    fn name(&self) -> &'static str {
        "citibanamex0"
    }

    fn description(&self) -> &'static str {
        "Citibanamex, FECHA/CONCEPTO/RETIROS/DEPOSITOS/SALDO table"
    }

    fn recognize(&self, document: &dyn StatementDocument) -> Result<Ledger> {
        let grids = document.extract_grids(PageSelector::All)?;
        let mut records: Vec<Transaction> = Vec::new();

        for grid in &grids {
            let Some((header_idx, columns)) = grid
                .rows
                .iter()
                .enumerate()
                .find_map(|(i, row)| TableColumns::from_header(row).map(|c| (i, c)))
            else {
                continue;
            };

            for row in &grid.rows[header_idx + 1..] {
                let concept = cell_at(row, columns.concept);
                if concept.is_empty() {
                    continue;
                }

                let withdrawal = parse_loose_number(cell_at(row, columns.withdrawal));
                let deposit = parse_loose_number(cell_at(row, columns.deposit));
                let balance = parse_loose_number(cell_at(row, columns.balance));

                let raw_date = cell_at(row, columns.date);
                let date = if DATE_DD_MON_CELL.is_match(raw_date) {
                    raw_date.to_string()
                } else if withdrawal != 0.0 || deposit != 0.0 || balance != 0.0 {
                    // Same-day movement listed without its date
                    match records.last() {
                        Some(prev) => prev.date.clone(),
                        None => continue,
                    }
                } else {
                    if let Some(prev) = records.last_mut() {
                        prev.append_description(concept);
                    } else {
                        trace!("citibanamex0: page {} dropping {:?}", grid.page, concept);
                    }
                    continue;
                };

                records.push(Transaction::new(date, concept, deposit, withdrawal, balance));
            }
        }

        Ok(standard_ledger(self.name(), records))
    }

    fn is_transaction_line(&self, line: &str) -> bool {
        LINE_DD_MON.is_match(line)
    }
}

/// Text scanning state for one page.
enum Scan {
    SeekingDate,
    Accumulating { date: String, parts: Vec<String> },
}

/// Citibanamex free-text layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct Citibanamex1;

impl Citibanamex1 {
    fn scan_page(lines: &[String], records: &mut Vec<Transaction>) {
        let mut state = Scan::SeekingDate;

        for line in lines {
            let trimmed = line.trim();

            if trimmed.to_uppercase().starts_with("HORA") {
                if let Some(caps) = TRAILING_AMOUNT_PAIR.captures(line.trim_end()) {
                    match &mut state {
                        Scan::Accumulating { date, parts } => {
                            let description = join_fragments(parts.iter().map(String::as_str));
                            let amount = parse_amount(&caps[1]);
                            let balance = parse_amount(&caps[2]);
                            let (deposit, withdrawal) = if DEPOSIT_KEYWORDS.is_match(&description) {
                                (amount, 0.0)
                            } else {
                                (0.0, amount)
                            };
                            records.push(Transaction::new(
                                date.clone(),
                                description,
                                deposit,
                                withdrawal,
                                balance,
                            ));
                            // the window runs back to the date line, earlier anchors included
                            parts.push(trimmed.to_string());
                        }
                        Scan::SeekingDate => {
                            trace!("citibanamex1: anchor without date {:?}", trimmed);
                        }
                    }
                    continue;
                }
            }

            if let Some(caps) = DATE_DAY_MONTH_LINE.captures(trimmed) {
                let first = caps[2].trim();
                state = Scan::Accumulating {
                    date: caps[1].to_string(),
                    parts: if first.is_empty() {
                        Vec::new()
                    } else {
                        vec![first.to_string()]
                    },
                };
                continue;
            }

            if trimmed.is_empty() || NOISE_LINE.is_match(trimmed) {
                continue;
            }
            if let Scan::Accumulating { parts, .. } = &mut state {
                parts.push(trimmed.to_string());
            }
        }
    }
}

impl LayoutRecognizer for Citibanamex1 {
    fn name(&self) -> &'static str {
        "citibanamex1"
    }

    fn description(&self) -> &'static str {
        "Citibanamex, free text with HORA lines carrying amount and balance"
    }

    fn recognize(&self, document: &dyn StatementDocument) -> Result<Ledger> {
        let mut records = Vec::new();
        for page in 1..=document.page_count() {
            let lines = document.extract_lines(page)?;
            Self::scan_page(&lines, &mut records);
        }
        Ok(standard_ledger(self.name(), records))
    }

    fn is_transaction_line(&self, line: &str) -> bool {
        LINE_DAY_MONTH.is_match(line)
    }
}
