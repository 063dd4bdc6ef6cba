//! Configuration validation for ads-audit.
//!
//! Provides validation traits and implementations for all configuration types.

use super::defaults::WEIGHT_SUM_TOLERANCE;
use super::types::*;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// `pass` must not be stricter than `warn` in the "higher is better" direction
fn check_descending(errors: &mut Vec<ConfigError>, field: &str, pass: f64, warn: f64) {
    if pass < warn {
        errors.push(ConfigError::new(
            field,
            format!("pass cut point {pass} must be >= warning cut point {warn}"),
        ));
    }
}

/// `pass` must not exceed `warn` in the "lower is better" direction
fn check_ascending(errors: &mut Vec<ConfigError>, field: &str, pass: f64, warn: f64) {
    if pass > warn {
        errors.push(ConfigError::new(
            field,
            format!("pass cut point {pass} must be <= warning cut point {warn}"),
        ));
    }
}

fn check_percent(errors: &mut Vec<ConfigError>, field: &str, value: f64) {
    if !(0.0..=100.0).contains(&value) {
        errors.push(ConfigError::new(
            field,
            format!("Percentage must be between 0 and 100, got {value}"),
        ));
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AuditConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.scoring.validate());
        errors.extend(self.thresholds.validate());
        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for ScoringConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let severity = &self.severity_weights;
        for (name, weight) in [
            ("critical", severity.critical),
            ("high", severity.high),
            ("medium", severity.medium),
            ("low", severity.low),
        ] {
            if weight <= 0.0 || !weight.is_finite() {
                errors.push(ConfigError::new(
                    &format!("scoring.severity_weights.{name}"),
                    format!("Weight must be positive, got {weight}"),
                ));
            }
        }

        let values = &self.result_values;
        for (name, value) in [
            ("pass", values.pass),
            ("warning", values.warning),
            ("fail", values.fail),
        ] {
            if !(0.0..=1.0).contains(&value) {
                errors.push(ConfigError::new(
                    &format!("scoring.result_values.{name}"),
                    format!("Value must be between 0.0 and 1.0, got {value}"),
                ));
            }
        }

        let bands = &self.grade_bands;
        let ordered = [bands.a, bands.b, bands.c, bands.d];
        if ordered.iter().any(|b| !(0.0..=100.0).contains(b)) {
            errors.push(ConfigError::new(
                "scoring.grade_bands",
                "Grade bands must lie within 0..=100",
            ));
        }
        if ordered.windows(2).any(|pair| pair[0] <= pair[1]) {
            errors.push(ConfigError::new(
                "scoring.grade_bands",
                format!(
                    "Grade bands must be strictly descending (a > b > c > d), got {} / {} / {} / {}",
                    bands.a, bands.b, bands.c, bands.d
                ),
            ));
        }

        let weights = &self.category_weights;
        for kind in crate::model::CategoryKind::all() {
            if weights.weight(*kind) <= 0.0 {
                errors.push(ConfigError::new(
                    "scoring.category_weights",
                    format!("Weight of '{kind}' must be positive"),
                ));
            }
        }
        let total = weights.total();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            errors.push(ConfigError::new(
                "scoring.category_weights",
                format!("Category weights must sum to 1.0, got {total:.3}"),
            ));
        }

        errors
    }
}

impl Validatable for Thresholds {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        check_percent(
            &mut errors,
            "thresholds.conversion.value_share_pass",
            self.conversion.value_share_pass,
        );

        let ws = &self.wasted_spend;
        check_ascending(
            &mut errors,
            "thresholds.wasted_spend.keyword_waste",
            ws.keyword_waste_pass,
            ws.keyword_waste_warn,
        );
        check_ascending(
            &mut errors,
            "thresholds.wasted_spend.product_waste",
            ws.product_waste_pass,
            ws.product_waste_warn,
        );
        check_percent(
            &mut errors,
            "thresholds.wasted_spend.campaign_waste_warn",
            ws.campaign_waste_warn,
        );

        let st = &self.structure;
        check_descending(&mut errors, "thresholds.structure.naming", st.naming_pass, st.naming_warn);
        check_ascending(&mut errors, "thresholds.structure.paused", st.paused_pass, st.paused_warn);
        check_ascending(
            &mut errors,
            "thresholds.structure.top_share",
            st.top_share_pass,
            st.top_share_warn,
        );
        check_ascending(
            &mut errors,
            "thresholds.structure.keywords_per_group",
            st.keywords_per_group_pass,
            st.keywords_per_group_warn,
        );

        let kw = &self.keywords;
        check_descending(
            &mut errors,
            "thresholds.keywords.avg_quality",
            kw.avg_quality_pass,
            kw.avg_quality_warn,
        );
        check_ascending(
            &mut errors,
            "thresholds.keywords.low_quality",
            kw.low_quality_pass,
            kw.low_quality_warn,
        );
        check_ascending(&mut errors, "thresholds.keywords.broad", kw.broad_pass, kw.broad_warn);
        if kw.coverage_pass < kw.coverage_warn {
            errors.push(ConfigError::new(
                "thresholds.keywords.coverage",
                "coverage_pass must be >= coverage_warn",
            ));
        }
        check_ascending(
            &mut errors,
            "thresholds.keywords.non_serving",
            kw.non_serving_pass,
            kw.non_serving_warn,
        );

        let ads = &self.ads;
        check_descending(&mut errors, "thresholds.ads.multi_ad", ads.multi_ad_pass, ads.multi_ad_warn);
        check_descending(&mut errors, "thresholds.ads.strength", ads.strength_pass, ads.strength_warn);
        check_descending(
            &mut errors,
            "thresholds.ads.headlines",
            ads.headlines_pass,
            ads.headlines_warn,
        );
        check_descending(&mut errors, "thresholds.ads.ctr", ads.ctr_pass, ads.ctr_warn);

        let settings = &self.settings;
        check_ascending(
            &mut errors,
            "thresholds.settings.budget_lost",
            settings.budget_lost_pass,
            settings.budget_lost_warn,
        );
        check_percent(
            &mut errors,
            "thresholds.settings.presence_interest_warn",
            settings.presence_interest_warn,
        );
        check_percent(
            &mut errors,
            "thresholds.settings.display_network_warn",
            settings.display_network_warn,
        );

        if self.products.wasted_min_spend < 0.0 {
            errors.push(ConfigError::new(
                "thresholds.products.wasted_min_spend",
                "Minimum spend must not be negative",
            ));
        }
        if self.plan.quick_win_limit == 0 {
            errors.push(ConfigError::new(
                "thresholds.plan.quick_win_limit",
                "At least one quick win must be allowed",
            ));
        }

        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(min_score) = self.min_score {
            if min_score > 100 {
                errors.push(ConfigError::new(
                    "output.min_score",
                    format!("Minimum score must be between 0 and 100, got {min_score}"),
                ));
            }
        }
        errors
    }
}
