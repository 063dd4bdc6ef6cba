//! Account Structure checks.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use super::{
    at_least, at_most, campaign_name, campaigns, enabled_campaigns, is_brand_name,
    is_pmax_campaign, plural, STATUS_PAUSED,
};
use crate::audit::totals::{spend_of, AccountTotals};
use crate::config::Thresholds;
use crate::model::{AccountDataset, Check, CheckResult, DatasetKind, NormalizedRow, Severity};
use crate::utils::{count, money, pct, percent, ratio};

pub const RULE_IDS: &[&str] = &["G01", "G04", "G05", "G06", "G08", "G09"];

/// Separators that indicate a structured campaign name
static NAME_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" - |[|_:]").expect("static regex"));

#[must_use]
pub fn evaluate(dataset: &AccountDataset, thresholds: &Thresholds) -> Vec<Check> {
    let enabled = enabled_campaigns(dataset);
    vec![
        check_naming(&enabled, thresholds),
        check_paused_share(campaigns(dataset), thresholds),
        check_brand_separation(&enabled),
        check_pmax(dataset, &enabled, thresholds),
        check_budget_concentration(dataset, thresholds),
        check_keywords_per_group(dataset, thresholds),
    ]
}

fn check_naming(enabled: &[&NormalizedRow], thresholds: &Thresholds) -> Check {
    if enabled.is_empty() {
        return Check::new(
            "G01",
            "Campaign naming convention",
            Severity::Medium,
            CheckResult::NotApplicable,
            "No enabled campaigns to review",
        );
    }

    let structured = enabled
        .iter()
        .filter(|row| NAME_DELIMITER.is_match(campaign_name(row)))
        .count();
    let share = percent(structured as f64, enabled.len() as f64);
    let limits = &thresholds.structure;
    let result = at_least(share, limits.naming_pass, limits.naming_warn);
    let finding = format!(
        "{structured} of {} ({}) follow a delimited naming convention",
        plural(enabled.len(), "enabled campaign"),
        pct(share)
    );
    Check::new("G01", "Campaign naming convention", Severity::Medium, result, finding)
}

fn check_paused_share(all: &[NormalizedRow], thresholds: &Thresholds) -> Check {
    if all.is_empty() {
        return Check::new(
            "G04",
            "Campaign count per objective",
            Severity::High,
            CheckResult::NotApplicable,
            "No campaigns in the account",
        );
    }

    let paused = all.iter().filter(|r| r.is("campaign.status", STATUS_PAUSED)).count();
    let share = percent(paused as f64, all.len() as f64);
    let limits = &thresholds.structure;
    let result = at_most(share, limits.paused_pass, limits.paused_warn);
    let finding = format!(
        "{paused} of {} are paused ({})",
        plural(all.len(), "campaign"),
        pct(share)
    );
    Check::new("G04", "Campaign count per objective", Severity::High, result, finding)
}

fn check_brand_separation(enabled: &[&NormalizedRow]) -> Check {
    if enabled.is_empty() {
        return Check::new(
            "G05",
            "Brand vs Non-Brand separation",
            Severity::Critical,
            CheckResult::NotApplicable,
            "No enabled campaigns to review",
        );
    }

    let brand: Vec<&str> = enabled
        .iter()
        .map(|row| campaign_name(row))
        .filter(|name| is_brand_name(name))
        .collect();
    let others = enabled.len() - brand.len();

    let (result, finding) = if brand.is_empty() {
        (
            CheckResult::Fail,
            format!(
                "None of the {} is a brand campaign; branded searches compete with generic traffic",
                plural(enabled.len(), "enabled campaign")
            ),
        )
    } else if others == 0 {
        (
            CheckResult::Warning,
            format!("Only brand campaigns are enabled ({})", brand.join(", ")),
        )
    } else {
        (
            CheckResult::Pass,
            format!(
                "Brand campaign ({}) runs separately from {}",
                brand.join(", "),
                plural(others, "other enabled campaign")
            ),
        )
    };
    Check::new("G05", "Brand vs Non-Brand separation", Severity::Critical, result, finding)
}

fn check_pmax(dataset: &AccountDataset, enabled: &[&NormalizedRow], thresholds: &Thresholds) -> Check {
    if enabled.is_empty() {
        return Check::new(
            "G06",
            "PMax present for eligible accounts",
            Severity::High,
            CheckResult::NotApplicable,
            "No enabled campaigns to review",
        );
    }

    let pmax = enabled.iter().filter(|r| is_pmax_campaign(r)).count();
    let conversions = AccountTotals::from_dataset(dataset).conversions;
    let min_conversions = thresholds.structure.pmax_min_conversions;

    let (result, finding) = if pmax > 0 {
        (
            CheckResult::Pass,
            format!("{} running", plural(pmax, "Performance Max campaign")),
        )
    } else if conversions >= min_conversions {
        (
            CheckResult::Fail,
            format!(
                "No Performance Max campaign despite {} conversions in 30 days (eligible from {})",
                count(conversions),
                count(min_conversions)
            ),
        )
    } else {
        (
            CheckResult::Warning,
            format!(
                "No Performance Max campaign; {} conversions in 30 days is below the {} needed to train it well",
                count(conversions),
                count(min_conversions)
            ),
        )
    };
    Check::new("G06", "PMax present for eligible accounts", Severity::High, result, finding)
}

/// Spend per campaign, keyed by id (or name when the id is missing)
fn spend_by_campaign(rows: &[NormalizedRow]) -> IndexMap<String, (String, f64)> {
    let mut spend: IndexMap<String, (String, f64)> = IndexMap::new();
    for row in rows {
        let name = campaign_name(row).to_string();
        let key = row.id_at("campaign.id").unwrap_or_else(|| name.clone());
        let entry = spend.entry(key).or_insert_with(|| (name, 0.0));
        entry.1 += spend_of(row);
    }
    spend
}

fn check_budget_concentration(dataset: &AccountDataset, thresholds: &Thresholds) -> Check {
    let spend = spend_by_campaign(dataset.rows(DatasetKind::CampaignMetrics));
    let total: f64 = spend.values().map(|(_, s)| s).sum();

    if total <= 0.0 {
        return Check::new(
            "G08",
            "Budget allocation matches priority",
            Severity::High,
            CheckResult::NotApplicable,
            "No campaign spend in the last 30 days",
        );
    }

    let spending = spend.values().filter(|(_, s)| *s > 0.0).count();
    let (top_name, top_spend) = spend
        .values()
        .fold(("", 0.0_f64), |best, (name, s)| {
            if *s > best.1 {
                (name.as_str(), *s)
            } else {
                best
            }
        });
    let share = percent(top_spend, total);

    let (result, finding) = if spending == 1 {
        (
            CheckResult::Warning,
            format!(
                "All {} spend sits in a single campaign ({top_name})",
                money(total)
            ),
        )
    } else {
        let limits = &thresholds.structure;
        (
            at_most(share, limits.top_share_pass, limits.top_share_warn),
            format!(
                "Top campaign {top_name} takes {} of {} spread across {}",
                pct(share),
                money(total),
                plural(spending, "spending campaign")
            ),
        )
    };
    Check::new("G08", "Budget allocation matches priority", Severity::High, result, finding)
}

fn check_keywords_per_group(dataset: &AccountDataset, thresholds: &Thresholds) -> Check {
    let ad_groups = dataset.rows(DatasetKind::AdGroups).len();
    if ad_groups == 0 {
        return Check::new(
            "G09",
            "Keywords per ad group",
            Severity::Medium,
            CheckResult::NotApplicable,
            "No ad groups in the account",
        );
    }

    let keywords = dataset.rows(DatasetKind::Keywords).len();
    let per_group = ratio(keywords as f64, ad_groups as f64);
    let limits = &thresholds.structure;
    let result = at_most(per_group, limits.keywords_per_group_pass, limits.keywords_per_group_warn);
    let finding = format!(
        "{} across {} ({per_group:.1} per ad group)",
        plural(keywords, "keyword"),
        plural(ad_groups, "ad group")
    );
    Check::new("G09", "Keywords per ad group", Severity::Medium, result, finding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::catalog::test_support::row;
    use serde_json::json;

    fn campaign(name: &str, status: &str, channel: &str) -> NormalizedRow {
        row(&[
            ("campaign.name", json!(name)),
            ("campaign.status", json!(status)),
            ("campaign.advertising_channel_type", json!(channel)),
        ])
    }

    fn campaign_spend(id: &str, name: &str, cost: f64) -> NormalizedRow {
        row(&[
            ("campaign.id", json!(id)),
            ("campaign.name", json!(name)),
            ("metrics.cost_micros", json!(cost * 1_000_000.0)),
        ])
    }

    fn find<'a>(checks: &'a [Check], id: &str) -> &'a Check {
        checks.iter().find(|c| c.id == id).unwrap()
    }

    #[test]
    fn test_brand_separation() {
        let dataset = AccountDataset::new().with_rows(
            DatasetKind::Campaigns,
            vec![
                campaign("Brand - Exact", "ENABLED", "SEARCH"),
                campaign("Non-Brand - Roofing", "ENABLED", "SEARCH"),
            ],
        );
        let checks = evaluate(&dataset, &Thresholds::default());
        assert_eq!(find(&checks, "G05").result, CheckResult::Pass);
        assert_eq!(find(&checks, "G01").result, CheckResult::Pass);

        let dataset = AccountDataset::new().with_rows(
            DatasetKind::Campaigns,
            vec![campaign("Roofing", "ENABLED", "SEARCH")],
        );
        let checks = evaluate(&dataset, &Thresholds::default());
        assert_eq!(find(&checks, "G05").result, CheckResult::Fail);
        assert_eq!(find(&checks, "G01").result, CheckResult::Fail);
    }

    #[test]
    fn test_paused_share() {
        let dataset = AccountDataset::new().with_rows(
            DatasetKind::Campaigns,
            vec![
                campaign("A", "PAUSED", "SEARCH"),
                campaign("B", "PAUSED", "SEARCH"),
                campaign("C", "PAUSED", "SEARCH"),
                campaign("D", "ENABLED", "SEARCH"),
            ],
        );
        let checks = evaluate(&dataset, &Thresholds::default());
        // 75% paused
        assert_eq!(find(&checks, "G04").result, CheckResult::Warning);
    }

    #[test]
    fn test_pmax_rule_uses_conversion_volume() {
        let campaigns = vec![campaign("Search", "ENABLED", "SEARCH")];
        let busy = row(&[("metrics.conversions", json!(45))]);
        let dataset = AccountDataset::new()
            .with_rows(DatasetKind::Campaigns, campaigns.clone())
            .with_rows(DatasetKind::AccountMetrics, vec![busy]);
        let checks = evaluate(&dataset, &Thresholds::default());
        assert_eq!(find(&checks, "G06").result, CheckResult::Fail);

        let dataset = AccountDataset::new().with_rows(DatasetKind::Campaigns, campaigns);
        let checks = evaluate(&dataset, &Thresholds::default());
        assert_eq!(find(&checks, "G06").result, CheckResult::Warning);
    }

    #[test]
    fn test_budget_concentration() {
        let dataset = AccountDataset::new().with_rows(
            DatasetKind::CampaignMetrics,
            vec![campaign_spend("1", "Main", 950.0), campaign_spend("2", "Side", 50.0)],
        );
        let checks = evaluate(&dataset, &Thresholds::default());
        let g08 = find(&checks, "G08");
        assert_eq!(g08.result, CheckResult::Fail);
        assert!(g08.finding.contains("Main"));

        let dataset = AccountDataset::new().with_rows(
            DatasetKind::CampaignMetrics,
            vec![campaign_spend("1", "Main", 950.0), campaign_spend("2", "Idle", 0.0)],
        );
        let checks = evaluate(&dataset, &Thresholds::default());
        assert_eq!(find(&checks, "G08").result, CheckResult::Warning);
    }

    #[test]
    fn test_keywords_per_group() {
        let dataset = AccountDataset::new()
            .with_rows(DatasetKind::AdGroups, vec![NormalizedRow::new(); 2])
            .with_rows(DatasetKind::Keywords, vec![NormalizedRow::new(); 50]);
        let checks = evaluate(&dataset, &Thresholds::default());
        // 25 per group
        assert_eq!(find(&checks, "G09").result, CheckResult::Warning);
    }
}
