//! Audit report data model.
//!
//! These types form the downstream contract: they serialize to the fixed
//! camelCase JSON shape consumed by report writers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::dataset::AccountIdentity;

/// How serious a failing check is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Whether a failure at this severity qualifies as a quick win
    #[must_use]
    pub const fn is_high_impact(&self) -> bool {
        matches!(self, Self::Critical | Self::High)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckResult {
    #[serde(rename = "PASS")]
    Pass,
    #[serde(rename = "WARNING")]
    Warning,
    #[serde(rename = "FAIL")]
    Fail,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl CheckResult {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Warning => "WARNING",
            Self::Fail => "FAIL",
            Self::NotApplicable => "N/A",
        }
    }

    #[must_use]
    pub const fn is_applicable(&self) -> bool {
        !matches!(self, Self::NotApplicable)
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One evaluated business rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Check {
    /// Rule id, unique within its category
    pub id: String,
    pub name: String,
    pub severity: Severity,
    pub result: CheckResult,
    /// Evidence-bearing explanation; never empty
    pub finding: String,
}

impl Check {
    pub fn new(
        id: &str,
        name: &str,
        severity: Severity,
        result: CheckResult,
        finding: impl Into<String>,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            severity,
            result,
            finding: finding.into(),
        }
    }
}

/// Letter grade, or N/A for a category with no applicable checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl Grade {
    #[must_use]
    pub const fn letter(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
            Self::NotApplicable => "N/A",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

/// The six audit categories, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CategoryKind {
    ConversionTracking,
    WastedSpend,
    AccountStructure,
    Keywords,
    AdsAndAssets,
    SettingsAndBidding,
}

impl CategoryKind {
    /// All categories in report order
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::ConversionTracking,
            Self::WastedSpend,
            Self::AccountStructure,
            Self::Keywords,
            Self::AdsAndAssets,
            Self::SettingsAndBidding,
        ]
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ConversionTracking => "Conversion Tracking",
            Self::WastedSpend => "Wasted Spend / Negatives",
            Self::AccountStructure => "Account Structure",
            Self::Keywords => "Keywords & Quality Score",
            Self::AdsAndAssets => "Ads & Assets",
            Self::SettingsAndBidding => "Settings & Targeting + Bidding",
        }
    }

    /// Position in report order
    #[must_use]
    pub const fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scored group of checks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    #[serde(skip)]
    pub kind: CategoryKind,
    pub name: String,
    /// Contribution weight rendered as a percentage, e.g. `"25%"`
    pub weight: String,
    /// Score 0-100 with one decimal, `None` when every check is N/A
    pub score: Option<f64>,
    pub grade: Grade,
    pub checks: Vec<Check>,
}

/// Flat KPI summary of the account
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub total_campaigns: usize,
    pub enabled_campaigns: usize,
    pub active_campaigns_with_spend: usize,
    pub total_ad_groups: Option<usize>,
    pub total_keywords: Option<usize>,
    #[serde(rename = "spend30d")]
    pub spend_30d: f64,
    #[serde(rename = "impressions30d")]
    pub impressions_30d: f64,
    #[serde(rename = "clicks30d")]
    pub clicks_30d: f64,
    pub ctr: f64,
    pub avg_cpc: f64,
    #[serde(rename = "conversions30d")]
    pub conversions_30d: f64,
    #[serde(rename = "conversionValue30d")]
    pub conversion_value_30d: f64,
    pub roas: f64,
    pub cpa: f64,
    /// Percentage 0-100; `None` when no metric row reports it
    pub search_impression_share: Option<f64>,
    pub daily_budget: Option<f64>,
    pub avg_daily_spend: f64,
}

/// A ranked product line item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductEntry {
    pub product: String,
    pub spend: f64,
    pub conversions: f64,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roas: Option<f64>,
}

/// A high-impact failing check turned into a short action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickWin {
    pub action: String,
    pub impact: Severity,
    pub time: String,
    /// Originating rule id
    pub check: String,
}

/// One phase of the remediation plan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationPhase {
    pub phase: String,
    pub items: Vec<String>,
}

/// Industry label assigned to an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Industry {
    #[serde(rename = "E-commerce")]
    Ecommerce,
    #[serde(rename = "Local Services")]
    LocalServices,
    Legal,
    #[serde(rename = "B2B SaaS")]
    B2bSaas,
    Healthcare,
    Finance,
    #[serde(rename = "Real Estate")]
    RealEstate,
    Education,
    Travel,
    General,
}

impl Industry {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Ecommerce => "E-commerce",
            Self::LocalServices => "Local Services",
            Self::Legal => "Legal",
            Self::B2bSaas => "B2B SaaS",
            Self::Healthcare => "Healthcare",
            Self::Finance => "Finance",
            Self::RealEstate => "Real Estate",
            Self::Education => "Education",
            Self::Travel => "Travel",
            Self::General => "General",
        }
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Complete audit result for one account and run date.
///
/// Built once by [`crate::audit::AuditEngine`]; only read accessors are
/// exposed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[must_use]
pub struct AuditReport {
    account: String,
    customer_id: String,
    date: NaiveDate,
    industry: Industry,
    health_score: u32,
    grade: Grade,
    verdict: String,
    snapshot: Snapshot,
    categories: Vec<Category>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    top_wasted_products: Vec<ProductEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    top_performing_products: Vec<ProductEntry>,
    quick_wins: Vec<QuickWin>,
    recommendations: Vec<RecommendationPhase>,
}

/// Parts assembled by the engine into an [`AuditReport`]
#[derive(Debug, Clone)]
pub(crate) struct ReportParts {
    pub identity: AccountIdentity,
    pub date: NaiveDate,
    pub industry: Industry,
    pub health_score: u32,
    pub grade: Grade,
    pub verdict: String,
    pub snapshot: Snapshot,
    pub categories: Vec<Category>,
    pub top_wasted_products: Vec<ProductEntry>,
    pub top_performing_products: Vec<ProductEntry>,
    pub quick_wins: Vec<QuickWin>,
    pub recommendations: Vec<RecommendationPhase>,
}

impl AuditReport {
    pub(crate) fn from_parts(parts: ReportParts) -> Self {
        Self {
            account: parts.identity.name,
            customer_id: parts.identity.customer_id,
            date: parts.date,
            industry: parts.industry,
            health_score: parts.health_score,
            grade: parts.grade,
            verdict: parts.verdict,
            snapshot: parts.snapshot,
            categories: parts.categories,
            top_wasted_products: parts.top_wasted_products,
            top_performing_products: parts.top_performing_products,
            quick_wins: parts.quick_wins,
            recommendations: parts.recommendations,
        }
    }

    #[must_use]
    pub fn account(&self) -> &str {
        &self.account
    }

    #[must_use]
    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    /// Identity of the audited account
    pub fn identity(&self) -> AccountIdentity {
        AccountIdentity::new(self.account.clone(), self.customer_id.clone())
    }

    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub const fn industry(&self) -> Industry {
        self.industry
    }

    #[must_use]
    pub const fn health_score(&self) -> u32 {
        self.health_score
    }

    #[must_use]
    pub const fn grade(&self) -> Grade {
        self.grade
    }

    #[must_use]
    pub fn verdict(&self) -> &str {
        &self.verdict
    }

    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a category by kind
    #[must_use]
    pub fn category(&self, kind: CategoryKind) -> Option<&Category> {
        self.categories.iter().find(|c| c.kind == kind)
    }

    /// Look up a check by rule id across all categories
    #[must_use]
    pub fn check(&self, id: &str) -> Option<&Check> {
        self.categories
            .iter()
            .flat_map(|c| c.checks.iter())
            .find(|check| check.id == id)
    }

    #[must_use]
    pub fn top_wasted_products(&self) -> &[ProductEntry] {
        &self.top_wasted_products
    }

    #[must_use]
    pub fn top_performing_products(&self) -> &[ProductEntry] {
        &self.top_performing_products
    }

    #[must_use]
    pub fn quick_wins(&self) -> &[QuickWin] {
        &self.quick_wins
    }

    #[must_use]
    pub fn recommendations(&self) -> &[RecommendationPhase] {
        &self.recommendations
    }
}
