//! Statement extraction: layout recognizers, dispatch and metrics.

pub mod layouts;
mod metrics;
mod registry;
pub mod rules;

pub use layouts::{layout_by_name, DEFAULT_LAYOUT_ORDER};
pub use metrics::{count_transaction_lines, MetricsEstimator};
pub use registry::Registry;

use std::path::Path;
use std::time::Instant;

use tracing::info;

use crate::error::LayoutError;
use crate::models::config::{CompletenessPolicy, StmtxConfig};
use crate::models::ledger::{ExtractionReport, Ledger};
use crate::pdf::{PdfDocument, StatementDocument};

/// Result type for recognizer operations.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// A bank-specific layout recognizer.
///
/// A recognizer returns an empty ledger when the document is not in its
/// layout. Errors and panics are absorbed by the [`Registry`].
pub trait LayoutRecognizer: Send + Sync {
    /// Unique layout name.
    fn name(&self) -> &'static str;

    /// Human-readable description.
    fn description(&self) -> &'static str;

    /// Output schema of the produced ledger.
    fn schema(&self) -> &'static str {
        "standard"
    }

    /// Extract records in reading order.
    fn recognize(&self, document: &dyn StatementDocument) -> Result<Ledger>;

    /// Whether a raw text line looks like one of this layout's transactions
    /// (date prefix plus an amount later on the line).
    fn is_transaction_line(&self, line: &str) -> bool;
}

/// Dispatches documents through a registry and reports completeness.
#[derive(Debug)]
pub struct StatementExtractor {
    registry: Registry,
    metrics: MetricsEstimator,
    config: StmtxConfig,
}

impl StatementExtractor {
    /// Extractor with every built-in layout and default settings.
    pub fn new() -> Self {
        Self {
            registry: Registry::standard(),
            metrics: MetricsEstimator::default(),
            config: StmtxConfig::default(),
        }
    }

    /// Extractor using the configured layout order and completeness policy.
    pub fn from_config(config: StmtxConfig) -> crate::Result<Self> {
        let registry = Registry::from_names(&config.extraction.layouts)?;
        Ok(Self {
            registry,
            metrics: MetricsEstimator::new(config.extraction.completeness),
            config,
        })
    }

    /// Replace the recognizer registry.
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// Set the completeness policy.
    pub fn with_completeness(mut self, policy: CompletenessPolicy) -> Self {
        self.metrics = MetricsEstimator::new(policy);
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Completeness policy used for reports.
    pub fn completeness(&self) -> CompletenessPolicy {
        self.metrics.policy()
    }

    /// Records from the first matching layout, empty when nothing matched.
    pub fn extract(&self, document: &dyn StatementDocument) -> Ledger {
        self.registry
            .select_and_extract(document)
            .map(|(_, ledger)| ledger)
            .unwrap_or_default()
    }

    /// Records plus the winning layout and completeness figures.
    pub fn extract_with_metrics(&self, document: &dyn StatementDocument) -> ExtractionReport {
        match self.registry.select_and_extract(document) {
            Some((recognizer, ledger)) => self.metrics.estimate(document, Some(recognizer), ledger),
            None => self.metrics.estimate(document, None, Ledger::empty()),
        }
    }

    /// Open a PDF and extract it with metrics.
    ///
    /// Only open and read failures are returned as errors. The document is
    /// released before this returns.
    pub fn extract_file(&self, path: &Path) -> crate::Result<ExtractionReport> {
        let start = Instant::now();
        let document = PdfDocument::open(path, &self.config)?;
        info!(
            "Loaded {} ({} pages)",
            path.display(),
            document.page_count()
        );

        let report = self.extract_with_metrics(&document);
        info!(
            "Extracted {} records from {} in {}ms ({:?} completeness)",
            report.extracted_count,
            path.display(),
            start.elapsed().as_millis(),
            self.completeness()
        );
        Ok(report)
    }
}

impl Default for StatementExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract records with the built-in registry.
pub fn extract(document: &dyn StatementDocument) -> Ledger {
    StatementExtractor::new().extract(document)
}

/// Extract records and completeness figures with the built-in registry.
pub fn extract_with_metrics(document: &dyn StatementDocument) -> ExtractionReport {
    StatementExtractor::new().extract_with_metrics(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ledger::Transaction;
    use crate::pdf::MemoryDocument;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_grid_statement_end_to_end() {
        let doc = MemoryDocument::new().with_grid_page([
            ["FECHA", "DESCRIPCION", "DEPOSITOS", "RETIROS", "SALDO"],
            ["01-JAN-24", "PAYMENT", "1,000.00", "0.00", "1,000.00"],
        ]);

        let report = extract_with_metrics(&doc);

        assert_eq!(report.layout.as_deref(), Some("banorte0"));
        assert_eq!(
            report.ledger,
            Ledger::Standard(vec![Transaction::new("01-JAN-24", "PAYMENT", 1000.0, 0.0, 1000.0)])
        );
        assert_eq!(report.extracted_count, 1);
        assert_eq!(report.completeness_pct, 100.0);
    }

    #[test]
    fn test_text_statement_end_to_end() {
        let doc = MemoryDocument::new()
            .with_page(["05 ENE PAGO RECIBIDO", "HORA 10:00 500.00 1,500.00"]);

        let report = extract_with_metrics(&doc);

        assert_eq!(report.layout.as_deref(), Some("citibanamex1"));
        assert_eq!(
            report.ledger,
            Ledger::Standard(vec![Transaction::new(
                "05 ENE",
                "PAGO RECIBIDO",
                500.0,
                0.0,
                1500.0
            )])
        );
    }

    #[test]
    fn test_unrecognized_document() {
        let doc = MemoryDocument::new()
            .with_page(["Estimado cliente", "Gracias por su preferencia"])
            .with_page(Vec::<String>::new());

        assert!(extract(&doc).is_empty());

        let report = extract_with_metrics(&doc);
        assert_eq!(report.layout, None);
        assert_eq!(report.extracted_count, 0);
        assert_eq!(report.completeness_pct, 0.0);
    }

    #[test]
    fn test_settlement_schema_passes_through() {
        let doc = MemoryDocument::new().with_grid_page([
            ["OPER", "LIQ", "DESCRIPCION", "CARGOS", "ABONOS", "SALDO"],
            ["10/ENE", "10/ENE PAGO", "", "100.00", "", "900.00"],
        ]);

        let ledger = extract(&doc);

        assert_eq!(ledger.schema(), "settlement");
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_configured_order_and_policy() {
        let mut config = StmtxConfig::default();
        config.extraction.layouts = vec!["banorte1".into()];
        config.extraction.completeness = CompletenessPolicy::LineCount;
        let extractor = StatementExtractor::from_config(config).unwrap();
        assert_eq!(extractor.completeness(), CompletenessPolicy::LineCount);

        let doc = MemoryDocument::new().with_grid_page([
            ["FECHA", "DESCRIPCION", "DEPOSITOS", "RETIROS", "SALDO"],
            ["01-JAN-24", "PAYMENT", "1,000.00", "0.00", "1,000.00"],
        ]);
        let report = extractor.extract_with_metrics(&doc);

        assert_eq!(report.layout.as_deref(), Some("banorte1"));
        assert_eq!(report.expected_count, 1);
        assert_eq!(report.completeness_pct, 100.0);
    }

    #[test]
    fn test_with_completeness_replaces_policy() {
        let extractor = StatementExtractor::new();
        assert_eq!(extractor.completeness(), CompletenessPolicy::Extracted);

        let extractor = extractor.with_completeness(CompletenessPolicy::LineCount);
        assert_eq!(extractor.completeness(), CompletenessPolicy::LineCount);
    }

    #[test]
    fn test_unknown_configured_layout() {
        let mut config = StmtxConfig::default();
        config.extraction.layouts = vec!["nope".into()];
        assert!(StatementExtractor::from_config(config).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result =
            StatementExtractor::new().extract_file(Path::new("/nonexistent/statement.pdf"));
        assert!(result.is_err());
    }
}
