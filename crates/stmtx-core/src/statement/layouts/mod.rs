//! Bank-specific layout recognizers.

mod banbajio;
mod banorte;
mod bbva;
mod citibanamex;

pub use banbajio::Banbajio;
pub use banorte::{Banorte0, Banorte1};
pub use bbva::Bbva;
pub use citibanamex::{Citibanamex0, Citibanamex1};

use tracing::debug;

use super::LayoutRecognizer;
use crate::models::ledger::{Ledger, Transaction};

/// Registry priority order. More specific layouts come first.
pub const DEFAULT_LAYOUT_ORDER: [&str; 6] = [
    "banorte0",
    "citibanamex0",
    "banorte1",
    "citibanamex1",
    "banbajio",
    "bbva",
];

/// Look up a built-in recognizer by name.
pub fn layout_by_name(name: &str) -> Option<Box<dyn LayoutRecognizer>> {
    let recognizer: Box<dyn LayoutRecognizer> = match name {
        "banorte0" => Box::new(Banorte0),
        "citibanamex0" => Box::new(Citibanamex0),
        "banorte1" => Box::new(Banorte1),
        "citibanamex1" => Box::new(Citibanamex1),
        "banbajio" => Box::new(Banbajio),
        "bbva" => Box::new(Bbva),
        _ => return None,
    };
    Some(recognizer)
}

/// Drop records without a date or description and wrap the rest.
fn standard_ledger(layout: &str, mut records: Vec<Transaction>) -> Ledger {
    let before = records.len();
    records.retain(Transaction::is_well_formed);
    if records.len() < before {
        debug!(
            "{}: dropped {} records without date or description",
            layout,
            before - records.len()
        );
    }
    Ledger::Standard(records)
}
