//! Settings & Targeting + Bidding checks.

use super::{below, enabled_campaigns, is_search_campaign, plural};
use crate::config::Thresholds;
use crate::model::{AccountDataset, Check, CheckResult, DatasetKind, NormalizedRow, Severity};
use crate::utils::{pct, percent};

pub const RULE_IDS: &[&str] = &["G11", "G36", "G39", "G12", "G57"];

const GEO_TYPE_PATH: &str = "campaign.geo_target_type_setting.positive_geo_target_type";

/// Bidding strategies that are not automated
const MANUAL_STRATEGIES: &[&str] = &["MANUAL_CPC", "MANUAL_CPM", "MANUAL_CPV", "ENHANCED_CPC"];

fn is_manual_bidding(row: &NormalizedRow) -> bool {
    row.str_at("campaign.bidding_strategy_type")
        .is_some_and(|s| MANUAL_STRATEGIES.iter().any(|m| m.eq_ignore_ascii_case(s)))
}

#[must_use]
pub fn evaluate(dataset: &AccountDataset, thresholds: &Thresholds) -> Vec<Check> {
    let enabled = enabled_campaigns(dataset);
    vec![
        check_geo_targeting(&enabled, thresholds),
        check_smart_bidding(&enabled),
        check_budget_constrained(dataset, thresholds),
        check_display_network(&enabled, thresholds),
        check_audience_lists(dataset),
    ]
}

fn check_geo_targeting(enabled: &[&NormalizedRow], thresholds: &Thresholds) -> Check {
    let typed: Vec<&str> = enabled.iter().filter_map(|r| r.str_at(GEO_TYPE_PATH)).collect();
    if typed.is_empty() {
        return Check::new(
            "G11",
            "Geographic targeting accuracy",
            Severity::Critical,
            CheckResult::NotApplicable,
            "No enabled campaigns report a location targeting type",
        );
    }

    let loose = typed
        .iter()
        .filter(|t| t.eq_ignore_ascii_case("PRESENCE_OR_INTEREST"))
        .count();
    let share = percent(loose as f64, typed.len() as f64);
    let result = if loose == 0 {
        CheckResult::Pass
    } else if share <= thresholds.settings.presence_interest_warn {
        CheckResult::Warning
    } else {
        CheckResult::Fail
    };
    let finding = if loose == 0 {
        format!(
            "All {} target people located in the chosen areas",
            plural(typed.len(), "campaign")
        )
    } else {
        format!(
            "{loose} of {} ({}) use \"Presence or interest\", serving ads to people outside the target area",
            plural(typed.len(), "campaign"),
            pct(share)
        )
    };
    Check::new("G11", "Geographic targeting accuracy", Severity::Critical, result, finding)
}

fn check_smart_bidding(enabled: &[&NormalizedRow]) -> Check {
    if enabled.is_empty() {
        return Check::new(
            "G36",
            "Smart bidding strategy active",
            Severity::High,
            CheckResult::NotApplicable,
            "No enabled campaigns to review",
        );
    }

    let manual = enabled.iter().filter(|r| is_manual_bidding(r)).count();
    let result = if manual == 0 {
        CheckResult::Pass
    } else if manual < enabled.len() {
        CheckResult::Warning
    } else {
        CheckResult::Fail
    };
    let finding = if manual == 0 {
        format!(
            "All {} use automated bidding",
            plural(enabled.len(), "enabled campaign")
        )
    } else {
        format!(
            "{manual} of {} still use manual or enhanced CPC bidding",
            plural(enabled.len(), "enabled campaign")
        )
    };
    Check::new("G36", "Smart bidding strategy active", Severity::High, result, finding)
}

fn check_budget_constrained(dataset: &AccountDataset, thresholds: &Thresholds) -> Check {
    let lost: Vec<f64> = dataset
        .rows(DatasetKind::CampaignMetrics)
        .iter()
        .chain(dataset.rows(DatasetKind::AccountMetrics))
        .filter_map(|r| r.f64_at("metrics.search_budget_lost_impression_share"))
        .map(|share| share * 100.0)
        .collect();

    if lost.is_empty() {
        return Check::new(
            "G39",
            "Budget constrained campaigns",
            Severity::High,
            CheckResult::NotApplicable,
            "No budget-lost impression share reported",
        );
    }

    let worst = lost.iter().copied().fold(0.0_f64, f64::max);
    let limits = &thresholds.settings;
    let result = below(worst, limits.budget_lost_pass, limits.budget_lost_warn);
    let finding = format!(
        "Up to {} of eligible search impressions are lost to budget",
        pct(worst)
    );
    Check::new("G39", "Budget constrained campaigns", Severity::High, result, finding)
}

fn check_display_network(enabled: &[&NormalizedRow], thresholds: &Thresholds) -> Check {
    let search: Vec<&&NormalizedRow> = enabled.iter().filter(|r| is_search_campaign(r)).collect();
    if search.is_empty() {
        return Check::new(
            "G12",
            "Display network on search campaigns",
            Severity::Medium,
            CheckResult::NotApplicable,
            "No enabled search campaigns",
        );
    }

    let on_display = search
        .iter()
        .filter(|r| r.bool_at("campaign.network_settings.target_content_network") == Some(true))
        .count();
    let share = percent(on_display as f64, search.len() as f64);
    let result = if on_display == 0 {
        CheckResult::Pass
    } else if share <= thresholds.settings.display_network_warn {
        CheckResult::Warning
    } else {
        CheckResult::Fail
    };
    let finding = format!(
        "{on_display} of {} ({}) also serve on the Display Network",
        plural(search.len(), "enabled search campaign"),
        pct(share)
    );
    Check::new(
        "G12",
        "Display network on search campaigns",
        Severity::Medium,
        result,
        finding,
    )
}

fn check_audience_lists(dataset: &AccountDataset) -> Check {
    let lists = dataset.rows(DatasetKind::UserLists);
    let crm = lists.iter().filter(|r| r.is("user_list.type", "CRM_BASED")).count();

    let (result, finding) = if crm > 0 {
        (
            CheckResult::Pass,
            format!(
                "{} available among {}",
                plural(crm, "Customer Match list"),
                plural(lists.len(), "audience list")
            ),
        )
    } else if !lists.is_empty() {
        (
            CheckResult::Warning,
            format!(
                "{} but no Customer Match list",
                plural(lists.len(), "audience list")
            ),
        )
    } else {
        (
            CheckResult::Fail,
            "No audience lists; first-party data is not being used".to_string(),
        )
    };
    Check::new("G57", "Customer Match / audience lists", Severity::High, result, finding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::catalog::test_support::row;
    use serde_json::json;

    fn campaign(bidding: &str, geo: &str, display: bool) -> NormalizedRow {
        row(&[
            ("campaign.status", json!("ENABLED")),
            ("campaign.advertising_channel_type", json!("SEARCH")),
            ("campaign.bidding_strategy_type", json!(bidding)),
            (GEO_TYPE_PATH, json!(geo)),
            ("campaign.network_settings.target_content_network", json!(display)),
        ])
    }

    fn find<'a>(checks: &'a [Check], id: &str) -> &'a Check {
        checks.iter().find(|c| c.id == id).unwrap()
    }

    #[test]
    fn test_campaign_settings() {
        let dataset = AccountDataset::new().with_rows(
            DatasetKind::Campaigns,
            vec![
                campaign("MANUAL_CPC", "PRESENCE_OR_INTEREST", true),
                campaign("MAXIMIZE_CONVERSIONS", "PRESENCE", false),
                campaign("TARGET_CPA", "PRESENCE", false),
            ],
        );
        let checks = evaluate(&dataset, &Thresholds::default());

        assert_eq!(find(&checks, "G11").result, CheckResult::Warning);
        assert_eq!(find(&checks, "G36").result, CheckResult::Warning);
        assert_eq!(find(&checks, "G12").result, CheckResult::Warning);
    }

    #[test]
    fn test_all_manual_and_all_display_fail() {
        let dataset = AccountDataset::new().with_rows(
            DatasetKind::Campaigns,
            vec![campaign("ENHANCED_CPC", "PRESENCE_OR_INTEREST", true)],
        );
        let checks = evaluate(&dataset, &Thresholds::default());
        assert_eq!(find(&checks, "G11").result, CheckResult::Fail);
        assert_eq!(find(&checks, "G36").result, CheckResult::Fail);
        assert_eq!(find(&checks, "G12").result, CheckResult::Fail);
    }

    #[test]
    fn test_budget_lost_share() {
        let dataset = AccountDataset::new().with_rows(
            DatasetKind::CampaignMetrics,
            vec![
                row(&[("metrics.search_budget_lost_impression_share", json!(0.05))]),
                row(&[("metrics.search_budget_lost_impression_share", json!(0.25))]),
            ],
        );
        let checks = evaluate(&dataset, &Thresholds::default());
        assert_eq!(find(&checks, "G39").result, CheckResult::Warning);
    }

    #[test]
    fn test_audience_lists() {
        let rule_based = row(&[("user_list.type", json!("RULE_BASED"))]);
        let crm = row(&[("user_list.type", json!("CRM_BASED"))]);

        let dataset = AccountDataset::new().with_rows(DatasetKind::UserLists, vec![rule_based.clone()]);
        let checks = evaluate(&dataset, &Thresholds::default());
        assert_eq!(find(&checks, "G57").result, CheckResult::Warning);

        let dataset = AccountDataset::new().with_rows(DatasetKind::UserLists, vec![rule_based, crm]);
        let checks = evaluate(&dataset, &Thresholds::default());
        assert_eq!(find(&checks, "G57").result, CheckResult::Pass);

        let checks = evaluate(&AccountDataset::new(), &Thresholds::default());
        assert_eq!(find(&checks, "G57").result, CheckResult::Fail);
    }
}
