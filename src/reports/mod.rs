//! Report sinks for finished audits.
//!
//! - JSON: the structured report, one document per account
//! - Summary: a compact, human-readable digest for terminals

mod json;
mod summary;

pub use json::{report_path, JsonReportSink};
pub use summary::SummarySink;

use crate::error::Result;
use crate::model::AuditReport;

/// Downstream consumer of audit reports
pub trait ReportSink {
    /// Accept one finished report
    fn accept(&mut self, report: &AuditReport) -> Result<()>;

    /// Accept reports in order, stopping at the first failure
    fn accept_all(&mut self, reports: &[AuditReport]) -> Result<()> {
        reports.iter().try_for_each(|report| self.accept(report))
    }
}
