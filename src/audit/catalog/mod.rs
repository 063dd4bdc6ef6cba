//! The check catalog.
//!
//! Six evaluators, one per [`CategoryKind`]. Each is a pure function over an
//! [`AccountDataset`] that always returns its complete, fixed list of checks
//! in rule order, falling back to N/A when the data a rule needs is absent.

pub mod ads;
pub mod conversion;
pub mod keywords;
pub mod settings;
pub mod structure;
pub mod wasted_spend;

use std::sync::LazyLock;

use regex::Regex;

use crate::config::Thresholds;
use crate::model::{AccountDataset, CategoryKind, Check, CheckResult, DatasetKind, NormalizedRow};

/// Evaluate every rule of one category
#[must_use]
pub fn evaluate(kind: CategoryKind, dataset: &AccountDataset, thresholds: &Thresholds) -> Vec<Check> {
    match kind {
        CategoryKind::ConversionTracking => conversion::evaluate(dataset, thresholds),
        CategoryKind::WastedSpend => wasted_spend::evaluate(dataset, thresholds),
        CategoryKind::AccountStructure => structure::evaluate(dataset, thresholds),
        CategoryKind::Keywords => keywords::evaluate(dataset, thresholds),
        CategoryKind::AdsAndAssets => ads::evaluate(dataset, thresholds),
        CategoryKind::SettingsAndBidding => settings::evaluate(dataset, thresholds),
    }
}

/// Rule ids of a category, in evaluation order
#[must_use]
pub const fn rule_ids(kind: CategoryKind) -> &'static [&'static str] {
    match kind {
        CategoryKind::ConversionTracking => conversion::RULE_IDS,
        CategoryKind::WastedSpend => wasted_spend::RULE_IDS,
        CategoryKind::AccountStructure => structure::RULE_IDS,
        CategoryKind::Keywords => keywords::RULE_IDS,
        CategoryKind::AdsAndAssets => ads::RULE_IDS,
        CategoryKind::SettingsAndBidding => settings::RULE_IDS,
    }
}

// ============================================================================
// Shared row predicates
// ============================================================================

const STATUS_ENABLED: &str = "ENABLED";
const STATUS_PAUSED: &str = "PAUSED";

fn campaigns(dataset: &AccountDataset) -> &[NormalizedRow] {
    dataset.rows(DatasetKind::Campaigns)
}

fn is_enabled_campaign(row: &NormalizedRow) -> bool {
    row.is("campaign.status", STATUS_ENABLED)
}

fn enabled_campaigns(dataset: &AccountDataset) -> Vec<&NormalizedRow> {
    campaigns(dataset)
        .iter()
        .filter(|row| is_enabled_campaign(row))
        .collect()
}

fn is_search_campaign(row: &NormalizedRow) -> bool {
    row.is("campaign.advertising_channel_type", "SEARCH")
}

fn is_pmax_campaign(row: &NormalizedRow) -> bool {
    row.is("campaign.advertising_channel_type", "PERFORMANCE_MAX")
}

/// Brand campaigns mention "brand" but are not explicitly non-brand
fn is_brand_name(name: &str) -> bool {
    static NON_BRAND: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"non[- ]?brand").expect("static regex"));
    let lower = name.to_lowercase();
    lower.contains("brand") && !NON_BRAND.is_match(&lower)
}

fn campaign_name(row: &NormalizedRow) -> &str {
    row.str_at("campaign.name").unwrap_or_default()
}

// ============================================================================
// Grading helpers
// ============================================================================

/// Higher is better: `>= pass` passes, `>= warn` warns
fn at_least(value: f64, pass: f64, warn: f64) -> CheckResult {
    if value >= pass {
        CheckResult::Pass
    } else if value >= warn {
        CheckResult::Warning
    } else {
        CheckResult::Fail
    }
}

/// Lower is better, inclusive: `<= pass` passes, `<= warn` warns
fn at_most(value: f64, pass: f64, warn: f64) -> CheckResult {
    if value <= pass {
        CheckResult::Pass
    } else if value <= warn {
        CheckResult::Warning
    } else {
        CheckResult::Fail
    }
}

/// Lower is better, exclusive: `< pass` passes, `< warn` warns
fn below(value: f64, pass: f64, warn: f64) -> CheckResult {
    if value < pass {
        CheckResult::Pass
    } else if value < warn {
        CheckResult::Warning
    } else {
        CheckResult::Fail
    }
}

/// `"1 campaign"` / `"3 campaigns"`
fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::model::NormalizedRow;
    use serde_json::Value;

    /// Build a row from `(path, value)` pairs
    pub fn row(fields: &[(&str, Value)]) -> NormalizedRow {
        let mut row = NormalizedRow::new();
        for (path, value) in fields {
            row.insert_path(path, value.clone());
        }
        row
    }
}
