//! Pipeline orchestration for audit runs.
//!
//! Shared load → audit → report logic for the CLI command handlers.

mod load;
mod output;
mod report_stage;

pub use load::{load_bundle_with_context, load_bundles, LoadedBundles};
pub use output::{should_use_color, OutputTarget};
pub use report_stage::{
    below_threshold, output_reports, threshold_exit_code, write_reports, WrittenReports,
};

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to read or parse an account bundle
    #[error("Load failed for {path}: {source}")]
    LoadFailed {
        path: String,
        source: anyhow::Error,
    },

    /// Report generation or output failed
    #[error("Report failed: {source}")]
    ReportFailed {
        #[source]
        source: anyhow::Error,
    },
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Every account audited at or above the minimum score
    pub const SUCCESS: i32 = 0;
    /// At least one account scored below `--min-score`
    pub const BELOW_THRESHOLD: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
