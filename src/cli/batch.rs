//! Batch command handler.
//!
//! Implements the `batch` subcommand: many bundles audited in parallel, one
//! report file per account.

use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::NaiveDate;

use crate::audit::AuditEngine;
use crate::config::AuditConfig;
use crate::pipeline::{
    exit_codes, load_bundles, should_use_color, threshold_exit_code, write_reports, OutputTarget,
};
use crate::reports::{ReportSink, SummarySink};

/// Batch command configuration
pub struct BatchCommand {
    pub bundle_paths: Vec<PathBuf>,
    pub date: NaiveDate,
    pub summary: bool,
    pub no_color: bool,
    pub quiet: bool,
}

/// Run the batch command, returning the desired exit code.
///
/// Bundles that fail to load, and reports the sink refuses, are logged and
/// skipped; the run still reports every other account and then exits with
/// [`exit_codes::ERROR`].
pub fn run_batch(config: &AuditConfig, command: BatchCommand) -> Result<i32> {
    let Some(out_dir) = config.output.out_dir.clone() else {
        bail!("batch mode needs an output directory (--out-dir or output.out_dir in the config file)");
    };

    let engine = AuditEngine::validated(config.clone())?;
    let loaded = load_bundles(&command.bundle_paths, command.quiet);
    let reports = engine.audit_all(&loaded.bundles, command.date);

    let outcome = write_reports(
        &reports,
        &OutputTarget::Directory(out_dir),
        config.output.pretty,
    );

    if !command.quiet {
        tracing::info!(
            "Audited {} of {} accounts, wrote {} reports",
            reports.len(),
            command.bundle_paths.len(),
            outcome.written.len()
        );
    }

    if command.summary {
        let mut sink = SummarySink::stderr();
        if !should_use_color(command.no_color) {
            sink = sink.no_color();
        }
        sink.accept_all(&reports)?;
    }

    if !loaded.failures.is_empty() {
        tracing::error!("{} bundles failed to load", loaded.failures.len());
        return Ok(exit_codes::ERROR);
    }
    if !outcome.failures.is_empty() {
        tracing::error!("{} reports could not be written", outcome.failures.len());
        return Ok(exit_codes::ERROR);
    }

    Ok(threshold_exit_code(&reports, config.output.min_score))
}
