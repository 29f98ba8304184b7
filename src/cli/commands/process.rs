//! Process command implementation
//!
//! Loads the layered configuration, runs the pipeline on a blocking worker and
//! follows its status channel until the run finishes, then prints the report.

use super::shared::{create_progress_bar, load_configuration, setup_logging};
use crate::app::models::StatusEvent;
use crate::app::services::pipeline::{PipelineRunner, RunStats, status_channel};
use crate::cli::args::{OutputFormat, ProcessArgs};
use crate::constants::STATUS_POLL_INTERVAL_MS;
use crate::{Error, Result};
use colored::*;
use indicatif::{HumanDuration, ProgressBar};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, warn};

/// Process command runner
///
/// 1. Set up logging and configuration
/// 2. Run the pipeline on a blocking worker
/// 3. Follow status events until the finished sentinel
/// 4. Print the final report
pub async fn run_process(args: ProcessArgs) -> Result<RunStats> {
    setup_logging(args.get_log_level(), args.quiet)?;

    info!("Starting stream data processor");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let config = load_configuration(&args)?;
    debug!("Loaded configuration: {:?}", config);

    let runner = PipelineRunner::new(config);

    if args.dry_run {
        return run_dry_run(&runner, &args);
    }

    let (status, events) = status_channel();
    let worker = tokio::task::spawn_blocking(move || runner.run(&status));

    let progress = args
        .show_progress()
        .then(|| create_progress_bar(0, "Scanning input directory"));
    follow_status(events, progress.as_ref()).await;

    let stats = worker
        .await
        .map_err(|e| Error::processing_interrupted(format!("Pipeline worker failed: {}", e)))??;

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    generate_final_report(&args, &stats)?;
    Ok(stats)
}

/// Drain status events until the finished sentinel or a closed channel
async fn follow_status(mut events: UnboundedReceiver<StatusEvent>, progress: Option<&ProgressBar>) {
    let poll_interval = Duration::from_millis(STATUS_POLL_INTERVAL_MS);

    loop {
        match tokio::time::timeout(poll_interval, events.recv()).await {
            Ok(Some(event)) => {
                let finished = matches!(event, StatusEvent::Finished { .. });
                show_event(&event, progress);
                if finished {
                    break;
                }
            }
            Ok(None) => break,
            Err(_) => {
                if let Some(pb) = progress {
                    pb.tick();
                }
            }
        }
    }
}

fn show_event(event: &StatusEvent, progress: Option<&ProgressBar>) {
    debug!("{}", event);
    let Some(pb) = progress else {
        return;
    };

    match event {
        StatusEvent::FileStarted { total, file, .. } => {
            pb.set_length(*total as u64);
            pb.set_message(file.clone());
        }
        StatusEvent::FileCompleted { .. } => pb.inc(1),
        StatusEvent::FileRejected { file, reason } => {
            pb.inc(1);
            pb.println(format!("{} {}: {}", "rejected".yellow(), file, reason));
        }
        StatusEvent::Message(message) => pb.set_message(message.clone()),
        StatusEvent::Finished { .. } => pb.set_message("done"),
    }
}

/// List the files a run would process
fn run_dry_run(runner: &PipelineRunner, args: &ProcessArgs) -> Result<RunStats> {
    info!("Performing dry run - no files will be created");

    let files = runner.dry_run()?;
    let stats = RunStats {
        files_discovered: files.len(),
        ..RunStats::default()
    };

    if args.output_format == OutputFormat::Human && !args.quiet {
        println!(
            "Would process {} {} files from {}:",
            files.len(),
            runner.config().processing.mode,
            runner.config().input_dir()?.display()
        );
        for file in &files {
            println!(
                "   • {} ({})",
                file.path.display(),
                RunStats::format_size(file.size_bytes)
            );
        }
        println!("Would create: {}", runner.summary_path().display());
    } else {
        generate_final_report(args, &stats)?;
    }

    Ok(stats)
}

/// Generate final processing report
fn generate_final_report(args: &ProcessArgs, stats: &RunStats) -> Result<()> {
    if stats.some_files_failed() {
        warn!("{} files were rejected", stats.files_failed);
    }

    match args.output_format {
        OutputFormat::Human => generate_human_report(stats),
        OutputFormat::Json => generate_json_report(stats),
        OutputFormat::Csv => generate_csv_report(stats),
    }
}

/// Generate human-readable report
fn generate_human_report(stats: &RunStats) -> Result<()> {
    println!("\n{}", "Stream Data Processing Complete".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Processing Summary:");
    println!(
        "   • Files processed: {}/{}",
        stats.files_processed, stats.files_discovered
    );
    println!("   • Sites reported: {}", stats.sites_seen);
    println!("   • Summary rows: {}", stats.rows_written);
    println!("   • Event rows skipped: {}", stats.blank_rows_skipped);
    println!("   • Readings aggregated: {}", stats.readings_recorded);
    println!("   • Median rows: {}", stats.medians_written);
    if stats.regulatory_rows_written > 0 {
        println!(
            "   • Regulatory export rows: {}",
            stats.regulatory_rows_written
        );
    }
    if stats.unknown_cells > 0 {
        println!("   • Unknown cells: {}", stats.unknown_cells);
    }
    println!(
        "   • Total output size: {}",
        RunStats::format_size(stats.total_output_size())
    );
    println!("   • Processing time: {}", HumanDuration(stats.duration));

    if stats.some_files_failed() {
        println!(
            "\n{}",
            format!("Some files failed ({}):", stats.files_failed)
                .yellow()
                .bold()
        );
        for (file, reason) in &stats.failed_files {
            println!("   • {}: {}", file.yellow(), reason);
        }
    }

    if !stats.output_sizes.is_empty() {
        println!("\nOutput Files:");
        for (filename, size) in &stats.output_sizes {
            println!("   • {}: {}", filename, RunStats::format_size(*size));
        }
    }

    println!();
    Ok(())
}

/// Generate JSON report for machine consumption
fn generate_json_report(stats: &RunStats) -> Result<()> {
    let json_stats = serde_json::json!({
        "files_discovered": stats.files_discovered,
        "files_processed": stats.files_processed,
        "files_failed": stats.files_failed,
        "some_files_failed": stats.some_files_failed(),
        "rows_written": stats.rows_written,
        "blank_rows_skipped": stats.blank_rows_skipped,
        "unknown_cells": stats.unknown_cells,
        "readings_recorded": stats.readings_recorded,
        "medians_written": stats.medians_written,
        "regulatory_rows_written": stats.regulatory_rows_written,
        "sites_seen": stats.sites_seen,
        "processing_time_seconds": stats.duration.as_secs_f64(),
        "total_output_size_bytes": stats.total_output_size(),
        "failed_files": stats.failed_files.iter().map(|(file, reason)| {
            serde_json::json!({ "file": file, "reason": reason })
        }).collect::<Vec<_>>(),
        "output_files": stats.output_sizes.iter().map(|(name, size)| {
            serde_json::json!({ "filename": name, "size_bytes": size })
        }).collect::<Vec<_>>()
    });

    let rendered = serde_json::to_string_pretty(&json_stats)
        .map_err(|e| Error::data_validation(format!("Cannot render JSON report: {}", e)))?;
    println!("{}", rendered);
    Ok(())
}

/// Generate CSV report for data analysis
fn generate_csv_report(stats: &RunStats) -> Result<()> {
    println!("metric,value");
    println!("files_discovered,{}", stats.files_discovered);
    println!("files_processed,{}", stats.files_processed);
    println!("files_failed,{}", stats.files_failed);
    println!("some_files_failed,{}", stats.some_files_failed());
    println!("rows_written,{}", stats.rows_written);
    println!("blank_rows_skipped,{}", stats.blank_rows_skipped);
    println!("unknown_cells,{}", stats.unknown_cells);
    println!("readings_recorded,{}", stats.readings_recorded);
    println!("medians_written,{}", stats.medians_written);
    println!("regulatory_rows_written,{}", stats.regulatory_rows_written);
    println!("sites_seen,{}", stats.sites_seen);
    println!("processing_time_seconds,{}", stats.duration.as_secs_f64());
    println!("total_output_size_bytes,{}", stats.total_output_size());

    Ok(())
}
