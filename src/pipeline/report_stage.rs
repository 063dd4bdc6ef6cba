//! Report output stage.
//!
//! Writes finished audits to their destination and maps scores onto exit
//! codes.

use std::path::PathBuf;

use anyhow::Result;

use super::{exit_codes, OutputTarget, PipelineError};
use crate::model::AuditReport;
use crate::reports::ReportSink;

/// Write reports to the target as JSON, returning the files written
pub fn output_reports(
    reports: &[AuditReport],
    target: &OutputTarget,
    pretty: bool,
) -> Result<Vec<PathBuf>> {
    let mut sink = target.json_sink(pretty);
    sink.accept_all(reports)
        .map_err(|e| PipelineError::ReportFailed { source: e.into() })?;
    Ok(sink.written().to_vec())
}

/// Reports written for a batch run
#[derive(Debug, Default)]
pub struct WrittenReports {
    /// Files written, in report order
    pub written: Vec<PathBuf>,
    /// Reports the sink refused or failed to write
    pub failures: Vec<PipelineError>,
}

/// Write every report to the target as JSON.
///
/// A report that cannot be written is recorded and does not stop the others.
pub fn write_reports(reports: &[AuditReport], target: &OutputTarget, pretty: bool) -> WrittenReports {
    let mut sink = target.json_sink(pretty);
    let mut failures = Vec::new();
    for report in reports {
        if let Err(e) = sink.accept(report) {
            let err = PipelineError::ReportFailed { source: e.into() };
            tracing::error!("{err:#}");
            failures.push(err);
        }
    }
    WrittenReports {
        written: sink.written().to_vec(),
        failures,
    }
}

/// Accounts scoring below the minimum
pub fn below_threshold<'a>(
    reports: &'a [AuditReport],
    min_score: Option<u32>,
) -> impl Iterator<Item = &'a AuditReport> + 'a {
    reports
        .iter()
        .filter(move |r| min_score.is_some_and(|min| r.health_score() < min))
}

/// Exit code for a finished run
#[must_use]
pub fn threshold_exit_code(reports: &[AuditReport], min_score: Option<u32>) -> i32 {
    let mut failing = 0usize;
    for report in below_threshold(reports, min_score) {
        tracing::warn!(
            account = %report.account(),
            health_score = report.health_score(),
            "health score below minimum of {}",
            min_score.unwrap_or_default()
        );
        failing += 1;
    }
    if failing > 0 {
        exit_codes::BELOW_THRESHOLD
    } else {
        exit_codes::SUCCESS
    }
}
