//! Batch pipeline driver
//!
//! Scans the input tree, normalizes each file in a fixed order through the
//! reader for the configured instrument mode, then writes the median section,
//! the regulatory export and the site report. A file-level error rejects only
//! that file; failures on the output sinks abort the run.

use super::context::{FileContext, FileOutcome};
use super::site_registry::SiteRegistry;
use super::stats::RunStats;
use super::status::StatusSender;
use crate::app::models::{InstrumentMode, StatusEvent};
use crate::app::services::aggregation::AggregationIndex;
use crate::app::services::file_scanner::{DiscoveredFile, FileScanner};
use crate::app::services::output_writer::{
    DiagnosticLog, DiagnosticSink, ReadingSink, RegulatoryWriter, SummaryWriter,
    TemperatureExports,
};
use crate::app::services::site_resolver::SiteResolver;
use crate::app::services::temperature_csv::process_temperature_file;
use crate::app::services::workbook::process_workbook_file;
use crate::config::Config;
use crate::constants::{
    DIAGNOSTIC_LOG_FILE, LOGGER_SUMMARY_FILE, REGULATORY_EXPORT_FILE, TEMPERATURE_SUMMARY_FILE,
};
use crate::{Error, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Open output files for one run
struct RunOutputs {
    summary: SummaryWriter<BufWriter<File>>,
    diagnostics: DiagnosticLog<BufWriter<File>>,
    median_export: Option<RegulatoryWriter<BufWriter<File>>>,
    reading_exports: Option<TemperatureExports>,
}

impl RunOutputs {
    /// Record a fatal error in the diagnostic log and flush what was written
    fn record_abort(&mut self, error: &Error) {
        let logged = self
            .diagnostics
            .diagnostic(&format!("Run aborted: {}", error))
            .and_then(|_| self.diagnostics.flush());
        if let Err(e) = logged {
            warn!("Cannot record the abort in the diagnostic log: {}", e);
        }
        if let Err(e) = self.summary.flush() {
            warn!("Cannot flush the summary after the abort: {}", e);
        }
    }
}

/// Runs the pipeline for one configuration
pub struct PipelineRunner {
    config: Config,
    resolver: SiteResolver,
}

impl PipelineRunner {
    /// Create a runner; the alias extensions in the configuration are applied here
    pub fn new(config: Config) -> Self {
        let resolver = SiteResolver::new().with_extensions(&config.aliases);
        Self { config, resolver }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Path of the summary file for the configured mode
    pub fn summary_path(&self) -> PathBuf {
        let name = match self.config.processing.mode {
            InstrumentMode::Logger => LOGGER_SUMMARY_FILE,
            InstrumentMode::Temperature => TEMPERATURE_SUMMARY_FILE,
        };
        self.config.processing.output_dir.join(name)
    }

    /// Path of the diagnostic log
    pub fn diagnostic_log_path(&self) -> PathBuf {
        self.config.processing.output_dir.join(DIAGNOSTIC_LOG_FILE)
    }

    /// Path of the median regulatory export for logger runs
    pub fn regulatory_export_path(&self) -> PathBuf {
        self.config.processing.output_dir.join(REGULATORY_EXPORT_FILE)
    }

    /// List the files a run would process without writing anything
    pub fn dry_run(&self) -> Result<Vec<DiscoveredFile>> {
        let input_dir = self.config.input_dir()?;
        let files = FileScanner::from_config(&self.config)?.scan(input_dir)?;
        info!("Dry run: {} files would be processed", files.len());
        Ok(files)
    }

    /// Run the full pipeline
    ///
    /// The status sender always receives a final [`StatusEvent::Finished`],
    /// including when the run aborts.
    pub fn run(&self, status: &StatusSender) -> Result<RunStats> {
        let result = self.run_inner(status);
        let success = matches!(&result, Ok(stats) if !stats.some_files_failed());
        if let Err(e) = &result {
            status.message(format!("Run aborted: {}", e));
        }
        status.send(StatusEvent::Finished { success });
        result
    }

    fn run_inner(&self, status: &StatusSender) -> Result<RunStats> {
        let start_time = Instant::now();
        let mode = self.config.processing.mode;
        let input_dir = self.config.input_dir()?;

        let files = FileScanner::from_config(&self.config)?.scan(input_dir)?;
        info!("Found {} {} files to process", files.len(), mode);
        status.message(format!("Found {} files", files.len()));

        let mut outputs = self.open_outputs()?;
        let mut stats = match self.process_batch(&files, &mut outputs, status) {
            Ok(stats) => stats,
            Err(e) => {
                outputs.record_abort(&e);
                return Err(e);
            }
        };

        stats.duration = start_time.elapsed();
        stats.output_sizes = self.output_sizes();

        info!(
            "Processed {}/{} files in {:.2}s",
            stats.files_processed,
            stats.files_discovered,
            stats.duration.as_secs_f64()
        );
        Ok(stats)
    }

    /// Normalize every file, then write the median section, exports and site report
    fn process_batch(
        &self,
        files: &[DiscoveredFile],
        outputs: &mut RunOutputs,
        status: &StatusSender,
    ) -> Result<RunStats> {
        let mut index = AggregationIndex::new();
        let mut registry = SiteRegistry::new();
        let mut stats = RunStats {
            files_discovered: files.len(),
            ..RunStats::default()
        };

        let total = files.len();
        for (position, file) in files.iter().enumerate() {
            let file_name = file.filename();
            status.send(StatusEvent::FileStarted {
                index: position + 1,
                total,
                file: file_name.clone(),
            });
            outputs.diagnostics.banner(&file_name)?;

            match self.process_file(&file.path, &mut index, outputs) {
                Ok(outcome) => {
                    debug!(
                        "{}: {} rows, {} readings",
                        file_name, outcome.rows_written, outcome.readings_recorded
                    );
                    stats.absorb(&outcome);
                    status.send(StatusEvent::FileCompleted {
                        file: file_name,
                        rows: outcome.rows_written,
                    });
                    registry.register(outcome.site, outcome.metadata);
                }
                Err(e) if e.is_file_level() => {
                    let reason = e.to_string();
                    outputs
                        .diagnostics
                        .diagnostic(&format!("Error processing {}: {}", file_name, reason))?;
                    stats.record_failure(&file_name, &reason);
                    status.send(StatusEvent::FileRejected {
                        file: file_name,
                        reason,
                    });
                }
                Err(e) => return Err(e),
            }
        }

        outputs.summary.begin_median_section()?;
        stats.medians_written = index.emit_summary(&mut outputs.summary)?;
        info!("Wrote {} median rows", stats.medians_written);

        if let Some(mut export) = outputs.median_export.take() {
            stats.regulatory_rows_written = index.emit_regulatory_export(&mut export)?;
            let label = self.regulatory_export_path().display().to_string();
            export
                .into_inner()?
                .flush()
                .map_err(|e| Error::output_sink(label, "flush failed", Some(e)))?;
        }
        if let Some(exports) = outputs.reading_exports.take() {
            stats.regulatory_rows_written = exports.rows_written();
            let closed = exports.finish()?;
            info!("Wrote {} per-site temperature exports", closed);
        }

        let report = registry.report();
        outputs.diagnostics.append_block(&report)?;
        outputs.summary.flush()?;
        outputs.diagnostics.flush()?;

        stats.sites_seen = registry.site_count();
        Ok(stats)
    }

    fn process_file(
        &self,
        path: &Path,
        index: &mut AggregationIndex,
        outputs: &mut RunOutputs,
    ) -> Result<FileOutcome> {
        let readings = outputs
            .reading_exports
            .as_mut()
            .map(|exports| exports as &mut dyn ReadingSink);
        let mut ctx = FileContext {
            resolver: &self.resolver,
            index,
            rows: &mut outputs.summary,
            diagnostics: &mut outputs.diagnostics,
            readings,
        };

        match self.config.processing.mode {
            InstrumentMode::Logger => process_workbook_file(path, &mut ctx),
            InstrumentMode::Temperature => process_temperature_file(path, &mut ctx),
        }
    }

    fn open_outputs(&self) -> Result<RunOutputs> {
        let output_dir = &self.config.processing.output_dir;
        fs::create_dir_all(output_dir).map_err(|e| {
            Error::output_sink(
                output_dir.display().to_string(),
                "cannot create output directory",
                Some(e),
            )
        })?;

        let summary_path = self.summary_path();
        let summary = SummaryWriter::new(
            create_output(&summary_path)?,
            self.config.processing.mode,
            summary_path.display().to_string(),
        )?;

        let log_path = self.diagnostic_log_path();
        let diagnostics = DiagnosticLog::new(
            create_output(&log_path)?,
            log_path.display().to_string(),
        );

        let export_enabled = self.config.processing.regulatory_export;
        let (median_export, reading_exports) = match (self.config.processing.mode, export_enabled)
        {
            (InstrumentMode::Logger, true) => {
                let path = self.regulatory_export_path();
                let writer = RegulatoryWriter::new(
                    create_output(&path)?,
                    self.config.regulatory.clone(),
                    path.display().to_string(),
                )?;
                (Some(writer), None)
            }
            (InstrumentMode::Temperature, true) => (
                None,
                Some(TemperatureExports::new(
                    output_dir,
                    self.config.regulatory.clone(),
                )),
            ),
            (_, false) => (None, None),
        };

        Ok(RunOutputs {
            summary,
            diagnostics,
            median_export,
            reading_exports,
        })
    }

    fn output_sizes(&self) -> Vec<(String, u64)> {
        let Ok(entries) = fs::read_dir(&self.config.processing.output_dir) else {
            return Vec::new();
        };
        let mut sizes: Vec<(String, u64)> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let metadata = entry.metadata().ok()?;
                metadata
                    .is_file()
                    .then(|| (entry.file_name().to_string_lossy().into_owned(), metadata.len()))
            })
            .collect();
        sizes.sort();
        sizes
    }
}

fn create_output(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        Error::output_sink(path.display().to_string(), "cannot create file", Some(e))
    })?;
    Ok(BufWriter::new(file))
}
