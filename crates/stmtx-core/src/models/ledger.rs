//! Normalized ledger records produced by the layout recognizers.

use serde::{Deserialize, Serialize};

/// A single statement transaction in the shared schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Date as printed by the issuer (not reparsed).
    pub date: String,

    /// Free-text description, possibly stitched from several lines.
    pub description: String,

    /// Deposit amount (0.0 when this is not a deposit).
    pub deposit: f64,

    /// Withdrawal amount (0.0 when this is not a withdrawal).
    pub withdrawal: f64,

    /// Running balance as printed.
    pub balance: f64,

    /// Issuer reference number, for layouts that expose one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl Transaction {
    /// Create a transaction without a reference.
    pub fn new(
        date: impl Into<String>,
        description: impl Into<String>,
        deposit: f64,
        withdrawal: f64,
        balance: f64,
    ) -> Self {
        Self {
            date: date.into(),
            description: description.into(),
            deposit,
            withdrawal,
            balance,
            reference: None,
        }
    }

    /// Attach a reference number.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Append a wrapped description fragment, separated by a single space.
    pub fn append_description(&mut self, fragment: &str) {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return;
        }
        if !self.description.is_empty() {
            self.description.push(' ');
        }
        self.description.push_str(fragment);
    }

    /// A record must carry both a date and a description to be emitted.
    pub fn is_well_formed(&self) -> bool {
        !self.date.trim().is_empty() && !self.description.trim().is_empty()
    }
}

/// A row of the settlement layout, which reports operation and settlement
/// dates and balances side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementEntry {
    /// Operation date.
    pub operation_date: String,

    /// Settlement (liquidation) date.
    pub settlement_date: String,

    /// Free-text description.
    pub description: String,

    /// Charges column.
    pub charges: f64,

    /// Credits column.
    pub credits: f64,

    /// Running balance by operation date.
    pub operation_balance: f64,

    /// Running balance by settlement date.
    pub settlement_balance: f64,
}

/// Ordered output of one recognizer, in document reading order.
///
/// Callers must match on the variant (or on the winning layout name) to know
/// which schema they received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "schema", content = "records", rename_all = "snake_case")]
pub enum Ledger {
    /// Shared date/description/deposit/withdrawal/balance schema.
    Standard(Vec<Transaction>),
    /// Operation/settlement schema.
    Settlement(Vec<SettlementEntry>),
}

impl Ledger {
    /// An empty ledger, the "did not match" signal.
    pub fn empty() -> Self {
        Ledger::Standard(Vec::new())
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        match self {
            Ledger::Standard(rows) => rows.len(),
            Ledger::Settlement(rows) => rows.len(),
        }
    }

    /// Whether the ledger has no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Schema name used in serialized output.
    pub fn schema(&self) -> &'static str {
        match self {
            Ledger::Standard(_) => "standard",
            Ledger::Settlement(_) => "settlement",
        }
    }

    /// Standard records, if this ledger uses the shared schema.
    pub fn transactions(&self) -> Option<&[Transaction]> {
        match self {
            Ledger::Standard(rows) => Some(rows),
            Ledger::Settlement(_) => None,
        }
    }

    /// Settlement records, if this ledger uses the settlement schema.
    pub fn settlements(&self) -> Option<&[SettlementEntry]> {
        match self {
            Ledger::Settlement(rows) => Some(rows),
            Ledger::Standard(_) => None,
        }
    }

    /// Column headers for tabular output.
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            Ledger::Standard(_) => &[
                "date",
                "description",
                "deposit",
                "withdrawal",
                "balance",
                "reference",
            ],
            Ledger::Settlement(_) => &[
                "operation_date",
                "settlement_date",
                "description",
                "charges",
                "credits",
                "operation_balance",
                "settlement_balance",
            ],
        }
    }

    /// Records as rows of display strings, matching [`Ledger::headers`].
    pub fn rows(&self) -> Vec<Vec<String>> {
        match self {
            Ledger::Standard(rows) => rows
                .iter()
                .map(|t| {
                    vec![
                        t.date.clone(),
                        t.description.clone(),
                        format!("{:.2}", t.deposit),
                        format!("{:.2}", t.withdrawal),
                        format!("{:.2}", t.balance),
                        t.reference.clone().unwrap_or_default(),
                    ]
                })
                .collect(),
            Ledger::Settlement(rows) => rows
                .iter()
                .map(|s| {
                    vec![
                        s.operation_date.clone(),
                        s.settlement_date.clone(),
                        s.description.clone(),
                        format!("{:.2}", s.charges),
                        format!("{:.2}", s.credits),
                        format!("{:.2}", s.operation_balance),
                        format!("{:.2}", s.settlement_balance),
                    ]
                })
                .collect(),
        }
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::empty()
    }
}

/// Outcome of one extraction call with completeness metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionReport {
    /// Winning layout name, absent when nothing matched.
    pub layout: Option<String>,

    /// Extracted records.
    pub ledger: Ledger,

    /// Baseline number of rows the document is expected to contain.
    pub expected_count: usize,

    /// Number of rows actually extracted.
    pub extracted_count: usize,

    /// Extraction completeness, 0.0 - 100.0 (may exceed 100.0 under the
    /// line-count policy when lines under-count rows).
    pub completeness_pct: f64,
}

impl ExtractionReport {
    /// The "no layout matched" report.
    pub fn no_match() -> Self {
        Self {
            layout: None,
            ledger: Ledger::empty(),
            expected_count: 0,
            extracted_count: 0,
            completeness_pct: 0.0,
        }
    }

    /// Whether any layout matched.
    pub fn is_match(&self) -> bool {
        self.layout.is_some()
    }
}
