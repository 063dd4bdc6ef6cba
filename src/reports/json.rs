//! JSON report sink.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::ReportSink;
use crate::error::{AuditError, ErrorContext, ReportErrorKind, Result};
use crate::model::{AccountIdentity, AuditReport};

enum Destination {
    Writer(Box<dyn Write + Send>),
    File(PathBuf),
    Directory(PathBuf),
}

/// Writes each report as a JSON document.
///
/// Directory destinations receive one file per account and run date at
/// `<dir>/<account-slug>/<date>.json`. When another account already took
/// that path in this run, the slug is qualified by the customer id. A second
/// report for the same account and date is rejected.
pub struct JsonReportSink {
    destination: Destination,
    pretty: bool,
    written: Vec<PathBuf>,
    owners: HashMap<PathBuf, AccountIdentity>,
}

impl JsonReportSink {
    /// Write to stdout
    #[must_use]
    pub fn stdout() -> Self {
        Self::writer(io::stdout())
    }

    /// Write to an arbitrary writer, one document per line when compact
    #[must_use]
    pub fn writer(writer: impl Write + Send + 'static) -> Self {
        Self::with_destination(Destination::Writer(Box::new(writer)))
    }

    /// Write to a single file, replaced on each report
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::with_destination(Destination::File(path.into()))
    }

    /// Write under a report directory
    #[must_use]
    pub fn directory(dir: impl Into<PathBuf>) -> Self {
        Self::with_destination(Destination::Directory(dir.into()))
    }

    fn with_destination(destination: Destination) -> Self {
        Self {
            destination,
            pretty: true,
            written: Vec::new(),
            owners: HashMap::new(),
        }
    }

    /// Set pretty printing
    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Files written so far
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Serialize a report the way this sink writes it
    pub fn render(&self, report: &AuditReport) -> Result<String> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        };
        rendered.map_err(|e| {
            AuditError::report(
                format!("serializing report for {}", report.account()),
                ReportErrorKind::JsonSerializationError(e.to_string()),
            )
        })
    }

    fn write_file(&mut self, path: PathBuf, content: &str) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| AuditError::io(parent, e))?;
        }
        fs::write(&path, content)
            .map_err(|e| AuditError::io(&path, e))
            .context("writing JSON report")?;
        tracing::info!("Report written to {:?}", path);
        self.written.push(path);
        Ok(())
    }
}

/// Location of a report under `dir`
#[must_use]
pub fn report_path(dir: &Path, report: &AuditReport) -> PathBuf {
    dated_path(dir, &report.identity().slug(), report)
}

fn dated_path(dir: &Path, slug: &str, report: &AuditReport) -> PathBuf {
    dir.join(slug)
        .join(format!("{}.json", report.date().format("%Y-%m-%d")))
}

impl ReportSink for JsonReportSink {
    fn accept(&mut self, report: &AuditReport) -> Result<()> {
        let content = self.render(report)?;
        match &mut self.destination {
            Destination::Writer(writer) => {
                writeln!(writer, "{content}")?;
                writer.flush()?;
                Ok(())
            }
            Destination::File(path) => {
                let path = path.clone();
                self.write_file(path, &content)
            }
            Destination::Directory(dir) => {
                let identity = report.identity();
                let mut path = report_path(dir, report);
                if let Some(owner) = self.owners.get(&path) {
                    if *owner != identity {
                        path = dated_path(dir, &identity.qualified_slug(), report);
                        tracing::warn!(
                            account = %report.account(),
                            "report path shared with another account, writing to {:?}",
                            path
                        );
                    }
                }
                if self.owners.contains_key(&path) {
                    return Err(AuditError::report(
                        format!("writing report for {}", report.account()),
                        ReportErrorKind::SinkRejected(format!(
                            "{} was already written in this run",
                            path.display()
                        )),
                    ));
                }
                self.owners.insert(path.clone(), identity);
                self.write_file(path, &content)
            }
        }
    }
}
