//! Configuration types for ads-audit.
//!
//! Every constant table the audit depends on (severity weights, result
//! values, grade bands, category weights, rule thresholds) lives here so it
//! can be injected into the engine and overridden from a config file.

use crate::model::{CategoryKind, CheckResult, Grade, Severity};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults;

// ============================================================================
// Top-level Configuration
// ============================================================================

/// Complete audit configuration.
///
/// `AuditConfig::default()` reproduces the standard scoring contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AuditConfig {
    /// Scoring tables (weights, result values, grade bands)
    pub scoring: ScoringConfig,
    /// Rule cut points
    pub thresholds: Thresholds,
    /// Output settings
    pub output: OutputConfig,
}

impl AuditConfig {
    /// Create an `AuditConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// Scoring
// ============================================================================

/// Scoring tables used by the scorer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScoringConfig {
    /// Weight of each severity level
    pub severity_weights: SeverityWeights,
    /// Credit earned by each check result
    pub result_values: ResultValues,
    /// Minimum score for each letter grade
    pub grade_bands: GradeBands,
    /// Contribution of each category to the health score
    pub category_weights: CategoryWeights,
}

/// Severity weight table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SeverityWeights {
    pub critical: f64,
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl Default for SeverityWeights {
    fn default() -> Self {
        Self {
            critical: defaults::SEVERITY_WEIGHT_CRITICAL,
            high: defaults::SEVERITY_WEIGHT_HIGH,
            medium: defaults::SEVERITY_WEIGHT_MEDIUM,
            low: defaults::SEVERITY_WEIGHT_LOW,
        }
    }
}

impl SeverityWeights {
    /// Weight for a severity
    #[must_use]
    pub const fn weight(&self, severity: Severity) -> f64 {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }
}

/// Credit table for check results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ResultValues {
    #[schemars(range(min = 0.0, max = 1.0))]
    pub pass: f64,
    #[schemars(range(min = 0.0, max = 1.0))]
    pub warning: f64,
    #[schemars(range(min = 0.0, max = 1.0))]
    pub fail: f64,
}

impl Default for ResultValues {
    fn default() -> Self {
        Self {
            pass: 1.0,
            warning: 0.5,
            fail: 0.0,
        }
    }
}

impl ResultValues {
    /// Credit for a result, `None` for N/A
    #[must_use]
    pub const fn value(&self, result: CheckResult) -> Option<f64> {
        match result {
            CheckResult::Pass => Some(self.pass),
            CheckResult::Warning => Some(self.warning),
            CheckResult::Fail => Some(self.fail),
            CheckResult::NotApplicable => None,
        }
    }
}

/// Lower bounds (inclusive) of each grade band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GradeBands {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Default for GradeBands {
    fn default() -> Self {
        Self {
            a: 90.0,
            b: 75.0,
            c: 60.0,
            d: 40.0,
        }
    }
}

impl GradeBands {
    /// Map a score onto a letter grade
    #[must_use]
    pub fn grade(&self, score: f64) -> Grade {
        if score >= self.a {
            Grade::A
        } else if score >= self.b {
            Grade::B
        } else if score >= self.c {
            Grade::C
        } else if score >= self.d {
            Grade::D
        } else {
            Grade::F
        }
    }
}

/// Category weights; must sum to 1.0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CategoryWeights {
    pub conversion_tracking: f64,
    pub wasted_spend: f64,
    pub account_structure: f64,
    pub keywords: f64,
    pub ads_and_assets: f64,
    pub settings_and_bidding: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            conversion_tracking: 0.25,
            wasted_spend: 0.20,
            account_structure: 0.15,
            keywords: 0.15,
            ads_and_assets: 0.15,
            settings_and_bidding: 0.10,
        }
    }
}

impl CategoryWeights {
    /// Weight of one category
    #[must_use]
    pub const fn weight(&self, kind: CategoryKind) -> f64 {
        match kind {
            CategoryKind::ConversionTracking => self.conversion_tracking,
            CategoryKind::WastedSpend => self.wasted_spend,
            CategoryKind::AccountStructure => self.account_structure,
            CategoryKind::Keywords => self.keywords,
            CategoryKind::AdsAndAssets => self.ads_and_assets,
            CategoryKind::SettingsAndBidding => self.settings_and_bidding,
        }
    }

    /// Sum of all weights
    #[must_use]
    pub fn total(&self) -> f64 {
        CategoryKind::all().iter().map(|k| self.weight(*k)).sum()
    }

    /// Weight rendered as a whole percentage, e.g. `"25%"`
    #[must_use]
    pub fn label(&self, kind: CategoryKind) -> String {
        format!("{:.0}%", self.weight(kind) * 100.0)
    }
}

// ============================================================================
// Rule Thresholds
// ============================================================================

/// Cut points for every rule, grouped by category.
///
/// Percentages are expressed on a 0-100 scale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Thresholds {
    pub conversion: ConversionThresholds,
    pub wasted_spend: WastedSpendThresholds,
    pub structure: StructureThresholds,
    pub keywords: KeywordThresholds,
    pub ads: AdThresholds,
    pub settings: SettingsThresholds,
    pub products: ProductThresholds,
    pub plan: PlanThresholds,
}

/// Conversion tracking cut points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ConversionThresholds {
    /// Share of primary actions carrying a value needed to pass (G49)
    pub value_share_pass: f64,
}

impl Default for ConversionThresholds {
    fn default() -> Self {
        Self {
            value_share_pass: 80.0,
        }
    }
}

/// Wasted spend cut points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct WastedSpendThresholds {
    /// Negative keyword lists needed to pass (G14)
    pub negative_lists_pass: usize,
    /// Keyword spend share without conversions (G16)
    pub keyword_waste_pass: f64,
    pub keyword_waste_warn: f64,
    /// Campaign spend share without conversions (G17)
    pub campaign_waste_warn: f64,
    /// Shopping spend share on zero-conversion products (G-WS1)
    pub product_waste_pass: f64,
    pub product_waste_warn: f64,
}

impl Default for WastedSpendThresholds {
    fn default() -> Self {
        Self {
            negative_lists_pass: 3,
            keyword_waste_pass: 10.0,
            keyword_waste_warn: 25.0,
            campaign_waste_warn: 20.0,
            product_waste_pass: 15.0,
            product_waste_warn: 30.0,
        }
    }
}

/// Account structure cut points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct StructureThresholds {
    /// Share of enabled campaigns following a naming convention (G01)
    pub naming_pass: f64,
    pub naming_warn: f64,
    /// Paused share of all campaigns (G04)
    pub paused_pass: f64,
    pub paused_warn: f64,
    /// Conversions at which missing PMax is a failure (G06)
    pub pmax_min_conversions: f64,
    /// Top campaign spend share (G08)
    pub top_share_pass: f64,
    pub top_share_warn: f64,
    /// Keywords per ad group (G09)
    pub keywords_per_group_pass: f64,
    pub keywords_per_group_warn: f64,
}

impl Default for StructureThresholds {
    fn default() -> Self {
        Self {
            naming_pass: 80.0,
            naming_warn: 50.0,
            paused_pass: 50.0,
            paused_warn: 80.0,
            pmax_min_conversions: 30.0,
            top_share_pass: 70.0,
            top_share_warn: 90.0,
            keywords_per_group_pass: 20.0,
            keywords_per_group_warn: 30.0,
        }
    }
}

/// Keyword cut points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct KeywordThresholds {
    /// Mean Quality Score (G20)
    pub avg_quality_pass: f64,
    pub avg_quality_warn: f64,
    /// Quality Score at or below which a keyword counts as low (G21)
    pub low_quality_max: f64,
    /// Share of low Quality Score keywords (G21)
    pub low_quality_pass: f64,
    pub low_quality_warn: f64,
    /// Share of BROAD match keywords (G-KW1)
    pub broad_pass: f64,
    pub broad_warn: f64,
    /// Enabled keyword count (G-KW2)
    pub coverage_pass: usize,
    pub coverage_warn: usize,
    /// Share of keywords without impressions (G22)
    pub non_serving_pass: f64,
    pub non_serving_warn: f64,
}

impl Default for KeywordThresholds {
    fn default() -> Self {
        Self {
            avg_quality_pass: 7.0,
            avg_quality_warn: 5.0,
            low_quality_max: 3.0,
            low_quality_pass: 10.0,
            low_quality_warn: 25.0,
            broad_pass: 50.0,
            broad_warn: 80.0,
            coverage_pass: 20,
            coverage_warn: 5,
            non_serving_pass: 30.0,
            non_serving_warn: 60.0,
        }
    }
}

/// Ads and assets cut points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AdThresholds {
    /// Share of ad groups with two or more enabled ads (G26)
    pub multi_ad_pass: f64,
    pub multi_ad_warn: f64,
    /// GOOD/EXCELLENT ad strength share (G27)
    pub strength_pass: f64,
    pub strength_warn: f64,
    /// Mean headlines per responsive search ad (G28)
    pub headlines_pass: f64,
    pub headlines_warn: f64,
    /// Click-through rate in percent (G-AD2)
    pub ctr_pass: f64,
    pub ctr_warn: f64,
    /// Sitelink count (G50)
    pub sitelinks_pass: usize,
    /// Callout count (G51)
    pub callouts_pass: usize,
}

impl Default for AdThresholds {
    fn default() -> Self {
        Self {
            multi_ad_pass: 80.0,
            multi_ad_warn: 50.0,
            strength_pass: 70.0,
            strength_warn: 40.0,
            headlines_pass: 10.0,
            headlines_warn: 5.0,
            ctr_pass: 6.0,
            ctr_warn: 2.0,
            sitelinks_pass: 4,
            callouts_pass: 4,
        }
    }
}

/// Settings and bidding cut points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SettingsThresholds {
    /// Share of campaigns targeting presence or interest (G11)
    pub presence_interest_warn: f64,
    /// Max budget-lost impression share (G39)
    pub budget_lost_pass: f64,
    pub budget_lost_warn: f64,
    /// Share of search campaigns on the display network (G12)
    pub display_network_warn: f64,
}

impl Default for SettingsThresholds {
    fn default() -> Self {
        Self {
            presence_interest_warn: 50.0,
            budget_lost_pass: 10.0,
            budget_lost_warn: 30.0,
            display_network_warn: 50.0,
        }
    }
}

/// Product analyzer cut points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ProductThresholds {
    /// Minimum spend for a zero-conversion product to count as wasted
    pub wasted_min_spend: f64,
    /// Length of the top wasted list
    pub top_wasted: usize,
    /// Length of the top performing list
    pub top_performing: usize,
}

impl Default for ProductThresholds {
    fn default() -> Self {
        Self {
            wasted_min_spend: 10.0,
            top_wasted: 8,
            top_performing: 5,
        }
    }
}

/// Quick win and remediation plan cut points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PlanThresholds {
    /// Maximum number of quick wins
    pub quick_win_limit: usize,
    /// Impression share below which scaling starts with budgets and bids
    pub impression_share_scale: f64,
    /// Conversion count above which the volume paragraph is added
    pub conversion_volume: f64,
}

impl Default for PlanThresholds {
    fn default() -> Self {
        Self {
            quick_win_limit: 7,
            impression_share_scale: 50.0,
            conversion_volume: 15.0,
        }
    }
}

// ============================================================================
// Output
// ============================================================================

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving `<slug>/<date>.json` reports (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Exit with a non-zero code when a health score falls below this value
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0, max = 100))]
    pub min_score: Option<u32>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            out_dir: None,
            pretty: true,
            min_score: None,
        }
    }
}
