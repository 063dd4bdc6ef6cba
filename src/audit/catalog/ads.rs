//! Ads & Assets checks.

use indexmap::IndexMap;
use serde_json::Value;

use super::{at_least, enabled_campaigns, plural, STATUS_ENABLED};
use crate::audit::totals::AccountTotals;
use crate::config::Thresholds;
use crate::model::{AccountDataset, Check, CheckResult, DatasetKind, NormalizedRow, Severity};
use crate::utils::{count, pct, percent, ratio};

pub const RULE_IDS: &[&str] = &["G26", "G27", "G28", "G-AD2", "G50", "G51", "G52"];

const HEADLINES_PATH: &str = "ad_group_ad.ad.responsive_search_ad.headlines";

/// Ad strength values that are not an actual rating
const UNRATED_STRENGTH: &[&str] = &["UNSPECIFIED", "UNKNOWN", "PENDING", "NO_ADS"];

fn is_enabled_ad(row: &NormalizedRow) -> bool {
    row.is("ad_group_ad.status", STATUS_ENABLED)
}

/// Headline count from either an array of headlines or a plain number
fn headline_count(row: &NormalizedRow) -> Option<f64> {
    match row.value_at(HEADLINES_PATH)? {
        Value::Array(items) => Some(items.len() as f64),
        _ => row.f64_at(HEADLINES_PATH),
    }
}

fn ad_strength(row: &NormalizedRow) -> Option<&str> {
    row.str_at("ad_group_ad.ad_strength")
        .filter(|s| !s.is_empty() && !UNRATED_STRENGTH.iter().any(|u| u.eq_ignore_ascii_case(s)))
}

/// Number of active assets serving as the given extension type
fn asset_count(dataset: &AccountDataset, field_type: &str) -> usize {
    dataset
        .rows(DatasetKind::Assets)
        .iter()
        .filter(|row| !row.is("campaign_asset.status", "REMOVED"))
        .filter(|row| {
            row.str_at("campaign_asset.field_type")
                .or_else(|| row.str_at("asset.type"))
                .is_some_and(|t| t.eq_ignore_ascii_case(field_type))
        })
        .count()
}

#[must_use]
pub fn evaluate(dataset: &AccountDataset, thresholds: &Thresholds) -> Vec<Check> {
    let ads = dataset.rows(DatasetKind::Ads);
    let has_enabled_campaigns = !enabled_campaigns(dataset).is_empty();

    vec![
        check_ads_per_group(ads, thresholds),
        check_ad_strength(ads, thresholds),
        check_headlines(ads, thresholds),
        check_ctr(dataset, thresholds),
        check_extension(
            dataset,
            has_enabled_campaigns,
            ExtensionRule {
                id: "G50",
                name: "Sitelink extensions",
                severity: Severity::High,
                field_type: "SITELINK",
                label: "sitelink",
                pass: thresholds.ads.sitelinks_pass,
            },
        ),
        check_extension(
            dataset,
            has_enabled_campaigns,
            ExtensionRule {
                id: "G51",
                name: "Callout extensions",
                severity: Severity::Medium,
                field_type: "CALLOUT",
                label: "callout",
                pass: thresholds.ads.callouts_pass,
            },
        ),
        check_structured_snippets(dataset, has_enabled_campaigns),
    ]
}

fn check_ads_per_group(ads: &[NormalizedRow], thresholds: &Thresholds) -> Check {
    let mut per_group: IndexMap<String, usize> = IndexMap::new();
    for ad in ads {
        let Some(group) = ad.id_at("ad_group.id") else {
            continue;
        };
        let enabled = per_group.entry(group).or_default();
        if is_enabled_ad(ad) {
            *enabled += 1;
        }
    }

    if per_group.is_empty() {
        return Check::new(
            "G26",
            "RSA ad count per ad group",
            Severity::High,
            CheckResult::NotApplicable,
            "No ad groups with ads",
        );
    }

    let covered = per_group.values().filter(|n| **n >= 2).count();
    let share = percent(covered as f64, per_group.len() as f64);
    let limits = &thresholds.ads;
    let result = at_least(share, limits.multi_ad_pass, limits.multi_ad_warn);
    let finding = format!(
        "{covered} of {} ({}) run two or more enabled ads",
        plural(per_group.len(), "ad group"),
        pct(share)
    );
    Check::new("G26", "RSA ad count per ad group", Severity::High, result, finding)
}

fn check_ad_strength(ads: &[NormalizedRow], thresholds: &Thresholds) -> Check {
    let rated: Vec<&str> = ads.iter().filter_map(ad_strength).collect();
    if rated.is_empty() {
        return Check::new(
            "G27",
            "Ad strength",
            Severity::Medium,
            CheckResult::NotApplicable,
            "No ads report an ad strength rating",
        );
    }

    let strong = rated
        .iter()
        .filter(|s| s.eq_ignore_ascii_case("GOOD") || s.eq_ignore_ascii_case("EXCELLENT"))
        .count();
    let share = percent(strong as f64, rated.len() as f64);
    let limits = &thresholds.ads;
    let result = at_least(share, limits.strength_pass, limits.strength_warn);
    let finding = format!(
        "{strong} of {} ({}) rated Good or Excellent",
        plural(rated.len(), "rated ad"),
        pct(share)
    );
    Check::new("G27", "Ad strength", Severity::Medium, result, finding)
}

fn check_headlines(ads: &[NormalizedRow], thresholds: &Thresholds) -> Check {
    let counts: Vec<f64> = ads.iter().filter_map(headline_count).collect();
    if counts.is_empty() {
        return Check::new(
            "G28",
            "RSA headline count",
            Severity::Medium,
            CheckResult::NotApplicable,
            "No responsive search ads with headline data",
        );
    }

    let mean = ratio(counts.iter().sum(), counts.len() as f64);
    let limits = &thresholds.ads;
    let result = at_least(mean, limits.headlines_pass, limits.headlines_warn);
    let finding = format!(
        "Responsive search ads average {mean:.1} headlines across {} (15 allowed)",
        plural(counts.len(), "ad")
    );
    Check::new("G28", "RSA headline count", Severity::Medium, result, finding)
}

fn check_ctr(dataset: &AccountDataset, thresholds: &Thresholds) -> Check {
    let totals = AccountTotals::from_dataset(dataset);
    if totals.impressions <= 0.0 {
        return Check::new(
            "G-AD2",
            "CTR vs industry benchmark",
            Severity::High,
            CheckResult::NotApplicable,
            "No impressions in the last 30 days",
        );
    }

    let ctr = totals.ctr();
    let limits = &thresholds.ads;
    let result = at_least(ctr, limits.ctr_pass, limits.ctr_warn);
    let verdict = match result {
        CheckResult::Pass => "excellent",
        CheckResult::Warning => "acceptable",
        _ => "below threshold",
    };
    let finding = format!(
        "CTR is {} ({} clicks from {} impressions): {verdict}",
        pct(ctr),
        count(totals.clicks),
        count(totals.impressions)
    );
    Check::new("G-AD2", "CTR vs industry benchmark", Severity::High, result, finding)
}

struct ExtensionRule {
    id: &'static str,
    name: &'static str,
    severity: Severity,
    field_type: &'static str,
    label: &'static str,
    pass: usize,
}

fn check_extension(dataset: &AccountDataset, has_enabled_campaigns: bool, rule: ExtensionRule) -> Check {
    if !has_enabled_campaigns {
        return Check::new(
            rule.id,
            rule.name,
            rule.severity,
            CheckResult::NotApplicable,
            "No enabled campaigns to attach extensions to",
        );
    }

    let found = asset_count(dataset, rule.field_type);
    let result = if found >= rule.pass {
        CheckResult::Pass
    } else if found > 0 {
        CheckResult::Warning
    } else {
        CheckResult::Fail
    };
    let finding = format!(
        "{} active (at least {} recommended)",
        plural(found, rule.label),
        rule.pass
    );
    Check::new(rule.id, rule.name, rule.severity, result, finding)
}

fn check_structured_snippets(dataset: &AccountDataset, has_enabled_campaigns: bool) -> Check {
    if !has_enabled_campaigns {
        return Check::new(
            "G52",
            "Structured snippets",
            Severity::Low,
            CheckResult::NotApplicable,
            "No enabled campaigns to attach extensions to",
        );
    }

    let found = asset_count(dataset, "STRUCTURED_SNIPPET");
    let (result, finding) = if found > 0 {
        (
            CheckResult::Pass,
            format!("{} active", plural(found, "structured snippet")),
        )
    } else {
        (
            CheckResult::Warning,
            "No structured snippets; they add free ad real estate".to_string(),
        )
    };
    Check::new("G52", "Structured snippets", Severity::Low, result, finding)
}
