//! Configuration module for ads-audit.
//!
//! This module provides the injected configuration of the audit engine:
//! - Scoring tables (severity weights, result values, grade bands, category weights)
//! - Rule thresholds for every check
//! - Output settings
//! - YAML config file loading and discovery
//! - Validation
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use ads_audit::config::{AuditConfig, Validatable};
//!
//! let config = AuditConfig::default();
//! assert!(config.is_valid());
//!
//! use ads_audit::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.ads-audit.yaml` file in the working directory or `~/.config/ads-audit/`:
//!
//! ```yaml
//! scoring:
//!   grade_bands:
//!     a: 92
//! thresholds:
//!   ads:
//!     ctr_pass: 5.0
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    CONFIG_DIR_NAME, SEVERITY_WEIGHT_CRITICAL, SEVERITY_WEIGHT_HIGH, SEVERITY_WEIGHT_LOW,
    SEVERITY_WEIGHT_MEDIUM, WEIGHT_SUM_TOLERANCE,
};
pub use types::{
    AdThresholds, AuditConfig, CategoryWeights, ConversionThresholds, GradeBands,
    KeywordThresholds, OutputConfig, PlanThresholds, ProductThresholds, ResultValues,
    ScoringConfig, SettingsThresholds, SeverityWeights, StructureThresholds, Thresholds,
    WastedSpendThresholds,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    ConfigFileError, CONFIG_FILE_NAMES,
};

/// Generate a JSON Schema for the `AuditConfig` configuration format.
///
/// The schema documents every option that can be set in `.ads-audit.yaml`
/// and can be used by editors for validation and autocompletion.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AuditConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
