//! Extract command - pull transactions from a single statement.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use stmtx_core::{ExtractionReport, Registry, StatementExtractor, StmtxConfig};

/// Rows shown by the text preview.
const PREVIEW_ROWS: usize = 10;

/// UTF-8 byte order mark, so spreadsheet tools detect the encoding.
const UTF8_BOM: &str = "\u{FEFF}";

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input PDF statement
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Only try this layout
    #[arg(short, long)]
    layout: Option<String>,

    /// Show layout and completeness figures
    #[arg(long)]
    show_metrics: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON report
    Json,
    /// CSV table
    Csv,
    /// Plain text preview
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let extractor = build_extractor(config, args.layout.as_deref())?;
    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.set_message("Extracting transactions...");

    let input = args.input.clone();
    let report = tokio::task::spawn_blocking(move || extractor.extract_file(&input)).await??;

    pb.finish_and_clear();

    if !report.is_match() {
        eprintln!(
            "{} No layout matched {}",
            style("⚠").yellow(),
            args.input.display()
        );
    }

    let output = format_report(&report, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_metrics {
        eprintln!();
        for line in metrics_lines(&report) {
            eprintln!("{} {}", style("ℹ").blue(), line);
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Extractor for the configured registry, optionally narrowed to one layout.
pub fn build_extractor(
    config: StmtxConfig,
    layout: Option<&str>,
) -> anyhow::Result<StatementExtractor> {
    let extractor = StatementExtractor::from_config(config)?;
    Ok(match layout {
        Some(name) => extractor.with_registry(Registry::from_names(&[name])?),
        None => extractor,
    })
}

pub fn format_report(report: &ExtractionReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => format_csv(report),
        OutputFormat::Text => Ok(format_text(report)),
    }
}

fn format_csv(report: &ExtractionReport) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(report.ledger.headers())?;
    for row in report.ledger.rows() {
        wtr.write_record(&row)?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(format!("{}{}", UTF8_BOM, data))
}

fn metrics_lines(report: &ExtractionReport) -> Vec<String> {
    vec![
        format!("Layout: {}", report.layout.as_deref().unwrap_or("none")),
        format!("Possible rows: {}", report.expected_count),
        format!("Extracted rows: {}", report.extracted_count),
        format!("Accuracy: {:.1}%", report.completeness_pct),
    ]
}

fn format_text(report: &ExtractionReport) -> String {
    let mut output = metrics_lines(report).join("\n");
    output.push_str("\n\n");

    if report.ledger.is_empty() {
        output.push_str("No transactions extracted.\n");
        return output;
    }

    output.push_str(&report.ledger.headers().join(" | "));
    output.push('\n');
    for row in report.ledger.rows().into_iter().take(PREVIEW_ROWS) {
        output.push_str(&row.join(" | "));
        output.push('\n');
    }
    if report.ledger.len() > PREVIEW_ROWS {
        output.push_str(&format!(
            "... {} more rows\n",
            report.ledger.len() - PREVIEW_ROWS
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use stmtx_core::{Ledger, Transaction};

    fn report(rows: usize) -> ExtractionReport {
        let ledger = Ledger::Standard(
            (0..rows)
                .map(|i| Transaction::new("01-ENE-24", format!("PAGO {}", i), 0.0, 10.0, 90.0))
                .collect(),
        );
        ExtractionReport {
            layout: Some("banorte0".into()),
            ledger,
            expected_count: rows,
            extracted_count: rows,
            completeness_pct: 100.0,
        }
    }

    #[test]
    fn test_csv_has_bom_and_header() {
        let csv = format_report(&report(1), OutputFormat::Csv).unwrap();
        assert!(csv.starts_with("\u{FEFF}date,description,deposit"));
        assert!(csv.contains("01-ENE-24,PAGO 0,0.00,10.00,90.00,"));
    }

    #[test]
    fn test_text_preview_is_truncated() {
        let text = format_report(&report(12), OutputFormat::Text).unwrap();
        assert!(text.starts_with(
            "Layout: banorte0\nPossible rows: 12\nExtracted rows: 12\nAccuracy: 100.0%"
        ));
        assert!(text.contains("PAGO 9"));
        assert!(!text.contains("PAGO 10"));
        assert!(text.contains("... 2 more rows"));
    }

    #[test]
    fn test_json_carries_schema() {
        let json = format_report(&report(1), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["layout"], "banorte0");
        assert_eq!(value["ledger"]["schema"], "standard");
        assert_eq!(value["ledger"]["records"][0]["withdrawal"], 10.0);
    }

    #[test]
    fn test_unknown_layout_is_rejected() {
        assert!(build_extractor(StmtxConfig::default(), Some("nope")).is_err());
        assert!(build_extractor(StmtxConfig::default(), Some("bbva")).is_ok());
    }
}
