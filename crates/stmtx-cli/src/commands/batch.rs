//! Batch command - extract many statements concurrently.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

use stmtx_core::ExtractionReport;

use super::extract::{build_extractor, format_report, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern for input PDFs
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Only try this layout
    #[arg(short, long)]
    layout: Option<String>,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    report: Option<ExtractionReport>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let extractor = Arc::new(build_extractor(config, args.layout.as_deref())?);
    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));

    // Each file is an independent invocation with its own document handle
    let handles: Vec<_> = files
        .into_iter()
        .map(|path| {
            let extractor = Arc::clone(&extractor);
            let semaphore = Arc::clone(&semaphore);
            let pb = overall_pb.clone();
            tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await?;
                let file_start = Instant::now();
                let task_path = path.clone();
                let result =
                    tokio::task::spawn_blocking(move || extractor.extract_file(&task_path)).await?;
                pb.inc(1);
                let (report, error) = match result {
                    Ok(report) => (Some(report), None),
                    Err(e) => (None, Some(e.to_string())),
                };
                Ok::<_, anyhow::Error>(FileResult {
                    path,
                    report,
                    error,
                    processing_time_ms: file_start.elapsed().as_millis() as u64,
                })
            })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        let result = handle.await??;
        if let Some(error_msg) = &result.error {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", result.path.display(), error_msg);
            } else {
                error!("Failed to process {}: {}", result.path.display(), error_msg);
                overall_pb.abandon();
                anyhow::bail!("Processing failed: {}", error_msg);
            }
        }
        results.push(result);
    }

    overall_pb.finish_with_message("Complete");

    if let Some(output_dir) = &args.output_dir {
        for result in &results {
            if let Some(report) = &result.report {
                let output_path = output_path(output_dir, &result.path, args.format);
                fs::write(&output_path, format_report(report, args.format)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let matched = results
        .iter()
        .filter(|r| r.report.as_ref().is_some_and(ExtractionReport::is_match))
        .count();
    let unmatched = results
        .iter()
        .filter(|r| r.report.as_ref().is_some_and(|rep| !rep.is_match()))
        .count();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} matched, {} without a layout, {} failed",
        style(matched).green(),
        style(unmatched).yellow(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn output_path(output_dir: &Path, input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("statement");
    output_dir.join(format!("{}.{}", stem, format.extension()))
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "layout",
        "expected_rows",
        "extracted_rows",
        "completeness_pct",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        match &result.report {
            Some(report) => {
                let status = if report.is_match() { "success" } else { "no_match" };
                wtr.write_record([
                    filename,
                    status,
                    report.layout.as_deref().unwrap_or(""),
                    &report.expected_count.to_string(),
                    &report.extracted_count.to_string(),
                    &format!("{:.1}", report.completeness_pct),
                    &result.processing_time_ms.to_string(),
                    "",
                ])?;
            }
            None => {
                wtr.write_record([
                    filename,
                    "error",
                    "",
                    "",
                    "",
                    "",
                    &result.processing_time_ms.to_string(),
                    result.error.as_deref().unwrap_or(""),
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
