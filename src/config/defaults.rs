//! Default values for ads-audit configuration.

// ============================================================================
// Scoring Defaults
// ============================================================================

/// Weight of a Critical check
pub const SEVERITY_WEIGHT_CRITICAL: f64 = 5.0;

/// Weight of a High check
pub const SEVERITY_WEIGHT_HIGH: f64 = 3.0;

/// Weight of a Medium check
pub const SEVERITY_WEIGHT_MEDIUM: f64 = 1.5;

/// Weight of a Low check
pub const SEVERITY_WEIGHT_LOW: f64 = 0.5;

/// Tolerance when checking that category weights sum to 1.0
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.001;

// ============================================================================
// File Defaults
// ============================================================================

/// Directory name under the user config directory
pub const CONFIG_DIR_NAME: &str = "ads-audit";
