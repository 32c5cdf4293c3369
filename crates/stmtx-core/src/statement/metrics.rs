//! Completeness metrics for a finished extraction.

use tracing::{debug, warn};

use super::LayoutRecognizer;
use crate::models::config::CompletenessPolicy;
use crate::models::ledger::{ExtractionReport, Ledger};
use crate::pdf::StatementDocument;

/// Builds an [`ExtractionReport`] for the winning layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsEstimator {
    policy: CompletenessPolicy,
}

impl MetricsEstimator {
    pub fn new(policy: CompletenessPolicy) -> Self {
        Self { policy }
    }

    /// Policy used to set the expected row count.
    pub fn policy(&self) -> CompletenessPolicy {
        self.policy
    }

    /// Build the report for `ledger`, produced by `recognizer`.
    ///
    /// With no recognizer the report is the "no match" report.
    pub fn estimate(
        &self,
        document: &dyn StatementDocument,
        recognizer: Option<&dyn LayoutRecognizer>,
        ledger: Ledger,
    ) -> ExtractionReport {
        let Some(recognizer) = recognizer else {
            return ExtractionReport::no_match();
        };

        let extracted_count = ledger.len();
        let expected_count = match self.policy {
            CompletenessPolicy::Extracted => extracted_count,
            CompletenessPolicy::LineCount => count_transaction_lines(document, recognizer),
        };
        let completeness_pct = completeness(expected_count, extracted_count);

        debug!(
            "{}: expected {} extracted {} ({:.1}%)",
            recognizer.name(),
            expected_count,
            extracted_count,
            completeness_pct
        );

        ExtractionReport {
            layout: Some(recognizer.name().to_string()),
            ledger,
            expected_count,
            extracted_count,
            completeness_pct,
        }
    }
}

/// Count raw text lines the recognizer considers transaction lines, across
/// every page. Unreadable pages count as zero lines.
pub fn count_transaction_lines(
    document: &dyn StatementDocument,
    recognizer: &dyn LayoutRecognizer,
) -> usize {
    (1..=document.page_count())
        .map(|page| match document.extract_lines(page) {
            Ok(lines) => lines
                .iter()
                .filter(|l| recognizer.is_transaction_line(l))
                .count(),
            Err(e) => {
                warn!("Skipping page {} while counting lines: {}", page, e);
                0
            }
        })
        .sum()
}

fn completeness(expected: usize, extracted: usize) -> f64 {
    if expected == 0 {
        if extracted > 0 { 100.0 } else { 0.0 }
    } else {
        extracted as f64 / expected as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ledger::Transaction;
    use crate::pdf::MemoryDocument;
    use crate::statement::layouts::Banorte0;
    use pretty_assertions::assert_eq;

    fn ledger(n: usize) -> Ledger {
        Ledger::Standard(
            (0..n)
                .map(|_| Transaction::new("01-ENE-24", "X", 1.0, 0.0, 1.0))
                .collect(),
        )
    }

    fn doc() -> MemoryDocument {
        MemoryDocument::new()
            .with_page([
                "FECHA  DESCRIPCION  SALDO",
                "01-ENE-24 PAGO  1,000.00  2,000.00",
                "02-ENE-24 CARGO  50.00  1,950.00",
            ])
            .with_page(["03-ENE-24 COMISION  5.00  1,945.00", "03-ENE-24 sin monto"])
    }

    #[test]
    fn test_extracted_policy_is_always_complete() {
        let report = MetricsEstimator::default().estimate(&doc(), Some(&Banorte0), ledger(2));
        assert_eq!(report.layout.as_deref(), Some("banorte0"));
        assert_eq!(report.expected_count, 2);
        assert_eq!(report.extracted_count, 2);
        assert_eq!(report.completeness_pct, 100.0);
    }

    #[test]
    fn test_line_count_policy() {
        let estimator = MetricsEstimator::new(CompletenessPolicy::LineCount);
        let report = estimator.estimate(&doc(), Some(&Banorte0), ledger(2));

        assert_eq!(report.expected_count, 3);
        assert_eq!(report.extracted_count, 2);
        assert!((report.completeness_pct - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_no_lines_but_records() {
        let estimator = MetricsEstimator::new(CompletenessPolicy::LineCount);
        let report = estimator.estimate(&MemoryDocument::new(), Some(&Banorte0), ledger(1));
        assert_eq!(report.expected_count, 0);
        assert_eq!(report.completeness_pct, 100.0);
    }

    #[test]
    fn test_no_match() {
        let report = MetricsEstimator::default().estimate(&doc(), None, Ledger::empty());
        assert!(!report.is_match());
        assert_eq!(report.completeness_pct, 0.0);
        assert!(report.ledger.is_empty());
    }
}
