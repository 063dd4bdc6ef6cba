//! Audit command handler.
//!
//! Implements the `audit` subcommand for a single account bundle.

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;

use crate::audit::AuditEngine;
use crate::config::AuditConfig;
use crate::pipeline::{
    load_bundle_with_context, output_reports, should_use_color, threshold_exit_code, OutputTarget,
};
use crate::reports::{ReportSink, SummarySink};

/// Audit command configuration
pub struct AuditCommand {
    pub bundle_path: PathBuf,
    pub output_file: Option<PathBuf>,
    pub date: NaiveDate,
    pub summary: bool,
    pub no_color: bool,
    pub quiet: bool,
}

/// Run the audit command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_audit(config: &AuditConfig, command: AuditCommand) -> Result<i32> {
    let engine = AuditEngine::validated(config.clone())?;
    let bundle = load_bundle_with_context(&command.bundle_path, command.quiet)?;

    let report = engine.audit_source(&bundle, command.date);
    let reports = vec![report];

    let target = OutputTarget::from_options(command.output_file, config.output.out_dir.clone());
    output_reports(&reports, &target, config.output.pretty)?;

    if command.summary {
        let mut sink = SummarySink::stderr();
        if !should_use_color(command.no_color) {
            sink = sink.no_color();
        }
        sink.accept_all(&reports)?;
    }

    Ok(threshold_exit_code(&reports, config.output.min_score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::exit_codes;
    use std::fs;

    const BUNDLE: &str = r#"{
        "account": { "name": "Acme Widgets", "customerId": "123-456-7890" },
        "datasets": {
            "campaigns": {
                "columns": ["campaign.id", "campaign.name", "campaign.status", "campaign.advertising_channel_type"],
                "data": [["1", "Acme Brand", "ENABLED", "SEARCH"]]
            }
        }
    }"#;

    fn command(dir: &std::path::Path) -> AuditCommand {
        let bundle_path = dir.join("acme.json");
        fs::write(&bundle_path, BUNDLE).unwrap();
        AuditCommand {
            bundle_path,
            output_file: Some(dir.join("report.json")),
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            summary: false,
            no_color: true,
            quiet: true,
        }
    }

    #[test]
    fn test_run_audit_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let code = run_audit(&AuditConfig::default(), command(dir.path())).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);

        let content = fs::read_to_string(dir.path().join("report.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["account"], "Acme Widgets");
        assert_eq!(value["customerId"], "123-456-7890");
    }

    #[test]
    fn test_run_audit_below_min_score() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AuditConfig::default();
        config.output.min_score = Some(100);
        let code = run_audit(&config, command(dir.path())).unwrap();
        assert_eq!(code, exit_codes::BELOW_THRESHOLD);
    }

    #[test]
    fn test_run_audit_rejects_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AuditConfig::default();
        config.scoring.grade_bands.a = 10.0;
        assert!(run_audit(&config, command(dir.path())).is_err());
    }
}
