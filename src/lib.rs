//! **A rule-based audit engine for advertising accounts.**
//!
//! `ads-audit` takes the query results fetched for an ad account, runs them
//! through a fixed catalog of checks, and produces a scored report: category
//! grades, an overall health score, quick wins and a three-phase action plan.
//!
//! The engine is synchronous and does no I/O of its own. Data arrives through
//! the [`ingest::DatasetSource`] seam and finished reports leave through
//! [`reports::ReportSink`].
//!
//! ## Core Concepts & Modules
//!
//! - **[`ingest`]**: Normalizes columnar query results into
//!   [`NormalizedRow`]s and loads account bundle files.
//! - **[`model`]**: The [`AccountDataset`] consumed by the audit and the
//!   [`AuditReport`] it produces.
//! - **[`audit`]**: The [`AuditEngine`], the check catalog, the [`Scorer`],
//!   snapshot and product analysis, quick wins and recommendations.
//! - **[`config`]**: Scoring tables and rule thresholds, loadable from YAML.
//! - **[`reports`]**: JSON and terminal summary sinks.
//! - **[`pipeline`]**: Load → audit → report stages shared by the CLI.
//!
//! ## Getting Started: Auditing a Bundle
//!
//! ```no_run
//! use std::path::Path;
//! use ads_audit::{load_bundle, AuditEngine};
//! use chrono::NaiveDate;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bundle = load_bundle(Path::new("bundles/acme.json"))?;
//!     let engine = AuditEngine::default();
//!     let date = NaiveDate::from_ymd_opt(2026, 3, 1).ok_or("bad date")?;
//!     let report = engine.audit_source(&bundle, date);
//!
//!     println!(
//!         "{}: {}/100 ({})",
//!         report.account(),
//!         report.health_score(),
//!         report.grade()
//!     );
//!     for win in report.quick_wins() {
//!         println!("  [{}] {} ({})", win.check, win.action, win.time);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Auditing In-Memory Data
//!
//! ```
//! use ads_audit::{AccountDataset, AccountIdentity, AuditEngine, DatasetKind};
//! use ads_audit::ingest::normalize_dataset;
//! use chrono::NaiveDate;
//! use serde_json::json;
//!
//! let campaigns = json!({
//!     "columns": ["campaign.id", "campaign.name", "campaign.status"],
//!     "data": [["1", "Acme Brand", "ENABLED"]]
//! });
//! let dataset = AccountDataset::new()
//!     .with_rows(DatasetKind::Campaigns, normalize_dataset(DatasetKind::Campaigns, &campaigns));
//!
//! let report = AuditEngine::default().audit(
//!     &AccountIdentity::new("Acme", "123-456-7890"),
//!     &dataset,
//!     NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
//! );
//! assert_eq!(report.categories().len(), 6);
//! assert_eq!(report.recommendations().len(), 3);
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Counts are converted to f64 for percentages; values are bounded in practice
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Check evaluators read best as one function per rule
    clippy::too_many_lines,
    clippy::struct_excessive_bools,
    clippy::similar_names
)]

pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod ingest;
pub mod model;
pub mod pipeline;
pub mod reports;
pub mod utils;

pub use audit::{AuditEngine, Scorer};
pub use config::{AuditConfig, ConfigError, Validatable};
pub use error::{AuditError, ErrorContext, Result};
pub use ingest::{load_bundle, AccountBundle, DatasetSource};
pub use model::{
    AccountDataset, AccountIdentity, AuditReport, Category, CategoryKind, Check, CheckResult,
    DatasetKind, Grade, Industry, NormalizedRow, QueryOutcome, Severity,
};
pub use reports::{JsonReportSink, ReportSink, SummarySink};
