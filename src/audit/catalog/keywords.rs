//! Keywords & Quality Score checks.

use super::{at_least, at_most, enabled_campaigns, is_search_campaign, plural, STATUS_ENABLED};
use crate::config::Thresholds;
use crate::model::{AccountDataset, Check, CheckResult, DatasetKind, NormalizedRow, Severity};
use crate::utils::{pct, percent, ratio};

pub const RULE_IDS: &[&str] = &["G20", "G21", "G-KW1", "G-KW2", "G22"];

fn quality_score(row: &NormalizedRow) -> Option<f64> {
    row.f64_at("ad_group_criterion.quality_info.quality_score")
        .filter(|qs| *qs > 0.0)
}

fn is_enabled_keyword(row: &NormalizedRow) -> bool {
    row.is("ad_group_criterion.status", STATUS_ENABLED)
}

#[must_use]
pub fn evaluate(dataset: &AccountDataset, thresholds: &Thresholds) -> Vec<Check> {
    let keywords = dataset.rows(DatasetKind::Keywords);
    let scores: Vec<f64> = keywords.iter().filter_map(quality_score).collect();
    let enabled: Vec<&NormalizedRow> = keywords.iter().filter(|r| is_enabled_keyword(r)).collect();
    let has_search = enabled_campaigns(dataset).iter().any(|r| is_search_campaign(r));

    vec![
        check_average_quality(&scores, thresholds),
        check_low_quality(&scores, thresholds),
        check_match_types(&enabled, thresholds),
        check_coverage(keywords, &enabled, has_search, thresholds),
        check_non_serving(&enabled, thresholds),
    ]
}

fn check_average_quality(scores: &[f64], thresholds: &Thresholds) -> Check {
    if scores.is_empty() {
        return Check::new(
            "G20",
            "Average Quality Score",
            Severity::High,
            CheckResult::NotApplicable,
            "No keywords report a Quality Score",
        );
    }

    let mean = ratio(scores.iter().sum(), scores.len() as f64);
    let limits = &thresholds.keywords;
    let result = at_least(mean, limits.avg_quality_pass, limits.avg_quality_warn);
    let finding = format!(
        "Average Quality Score is {mean:.1} across {}",
        plural(scores.len(), "scored keyword")
    );
    Check::new("G20", "Average Quality Score", Severity::High, result, finding)
}

fn check_low_quality(scores: &[f64], thresholds: &Thresholds) -> Check {
    if scores.is_empty() {
        return Check::new(
            "G21",
            "Low Quality Score keywords",
            Severity::Medium,
            CheckResult::NotApplicable,
            "No keywords report a Quality Score",
        );
    }

    let limits = &thresholds.keywords;
    let low = scores.iter().filter(|qs| **qs <= limits.low_quality_max).count();
    let share = percent(low as f64, scores.len() as f64);
    let result = at_most(share, limits.low_quality_pass, limits.low_quality_warn);
    let finding = format!(
        "{low} of {} ({}) have a Quality Score of {:.0} or lower",
        plural(scores.len(), "scored keyword"),
        pct(share),
        limits.low_quality_max
    );
    Check::new("G21", "Low Quality Score keywords", Severity::Medium, result, finding)
}

fn check_match_types(enabled: &[&NormalizedRow], thresholds: &Thresholds) -> Check {
    if enabled.is_empty() {
        return Check::new(
            "G-KW1",
            "Match type distribution",
            Severity::Medium,
            CheckResult::NotApplicable,
            "No enabled keywords",
        );
    }

    let count_of = |match_type: &str| {
        enabled
            .iter()
            .filter(|r| r.is("ad_group_criterion.keyword.match_type", match_type))
            .count()
    };
    let broad = count_of("BROAD");
    let phrase = count_of("PHRASE");
    let exact = count_of("EXACT");
    let share = percent(broad as f64, enabled.len() as f64);
    let limits = &thresholds.keywords;
    let result = at_most(share, limits.broad_pass, limits.broad_warn);
    let finding = format!(
        "Broad {broad}, phrase {phrase}, exact {exact}; broad match is {} of enabled keywords",
        pct(share)
    );
    Check::new("G-KW1", "Match type distribution", Severity::Medium, result, finding)
}

fn check_coverage(
    keywords: &[NormalizedRow],
    enabled: &[&NormalizedRow],
    has_search: bool,
    thresholds: &Thresholds,
) -> Check {
    if !has_search && keywords.is_empty() {
        return Check::new(
            "G-KW2",
            "Keyword coverage",
            Severity::High,
            CheckResult::NotApplicable,
            "No enabled search campaigns and no keywords",
        );
    }

    let limits = &thresholds.keywords;
    let result = at_least(
        enabled.len() as f64,
        limits.coverage_pass as f64,
        limits.coverage_warn as f64,
    );
    let finding = format!(
        "{} enabled (target at least {})",
        plural(enabled.len(), "keyword"),
        limits.coverage_pass
    );
    Check::new("G-KW2", "Keyword coverage", Severity::High, result, finding)
}

fn check_non_serving(enabled: &[&NormalizedRow], thresholds: &Thresholds) -> Check {
    if enabled.is_empty() {
        return Check::new(
            "G22",
            "Non-serving keywords",
            Severity::Low,
            CheckResult::NotApplicable,
            "No enabled keywords",
        );
    }

    let idle = enabled
        .iter()
        .filter(|r| r.f64_or_zero("metrics.impressions") <= 0.0)
        .count();
    let share = percent(idle as f64, enabled.len() as f64);
    let limits = &thresholds.keywords;
    let result = at_most(share, limits.non_serving_pass, limits.non_serving_warn);
    let finding = format!(
        "{idle} of {} ({}) had no impressions in 30 days",
        plural(enabled.len(), "enabled keyword"),
        pct(share)
    );
    Check::new("G22", "Non-serving keywords", Severity::Low, result, finding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::catalog::test_support::row;
    use serde_json::json;

    fn keyword(match_type: &str, qs: Option<i64>, impressions: i64) -> NormalizedRow {
        let mut kw = row(&[
            ("ad_group_criterion.status", json!("ENABLED")),
            ("ad_group_criterion.keyword.match_type", json!(match_type)),
            ("metrics.impressions", json!(impressions)),
        ]);
        if let Some(qs) = qs {
            kw.insert_path("ad_group_criterion.quality_info.quality_score", json!(qs));
        }
        kw
    }

    fn find<'a>(checks: &'a [Check], id: &str) -> &'a Check {
        checks.iter().find(|c| c.id == id).unwrap()
    }

    #[test]
    fn test_quality_score_rules() {
        let dataset = AccountDataset::new().with_rows(
            DatasetKind::Keywords,
            vec![
                keyword("EXACT", Some(8), 100),
                keyword("PHRASE", Some(6), 50),
                keyword("BROAD", Some(2), 0),
                keyword("EXACT", None, 10),
            ],
        );
        let checks = evaluate(&dataset, &Thresholds::default());

        // mean of 8, 6, 2 is 5.3
        assert_eq!(find(&checks, "G20").result, CheckResult::Warning);
        assert!(find(&checks, "G20").finding.contains("5.3"));
        // 1 of 3 is low: 33.3%
        assert_eq!(find(&checks, "G21").result, CheckResult::Fail);
        // 1 of 4 broad
        assert_eq!(find(&checks, "G-KW1").result, CheckResult::Pass);
        // 4 enabled keywords is below the warning floor of 5
        assert_eq!(find(&checks, "G-KW2").result, CheckResult::Fail);
        // 1 of 4 idle
        assert_eq!(find(&checks, "G22").result, CheckResult::Pass);
    }

    #[test]
    fn test_average_quality_score_boundaries() {
        let average = |scores: &[i64]| {
            let keywords = scores.iter().map(|qs| keyword("EXACT", Some(*qs), 10)).collect();
            let dataset = AccountDataset::new().with_rows(DatasetKind::Keywords, keywords);
            find(&evaluate(&dataset, &Thresholds::default()), "G20").clone()
        };

        let check = average(&[7, 7]);
        assert_eq!(check.result, CheckResult::Pass);
        assert!(check.finding.contains("is 7.0"));

        let check = average(&[5, 5]);
        assert_eq!(check.result, CheckResult::Warning);
        assert!(check.finding.contains("is 5.0"));

        // nine 5s and one 4
        let check = average(&[5, 5, 5, 5, 5, 5, 5, 5, 5, 4]);
        assert_eq!(check.result, CheckResult::Fail);
        assert!(check.finding.contains("is 4.9 across 10 scored keywords"));
    }

    #[test]
    fn test_coverage_applies_to_search_accounts_without_keywords() {
        let dataset = AccountDataset::new().with_rows(
            DatasetKind::Campaigns,
            vec![row(&[
                ("campaign.status", json!("ENABLED")),
                ("campaign.advertising_channel_type", json!("SEARCH")),
            ])],
        );
        let checks = evaluate(&dataset, &Thresholds::default());
        assert_eq!(find(&checks, "G-KW2").result, CheckResult::Fail);
        assert_eq!(find(&checks, "G20").result, CheckResult::NotApplicable);

        let checks = evaluate(&AccountDataset::new(), &Thresholds::default());
        assert_eq!(find(&checks, "G-KW2").result, CheckResult::NotApplicable);
    }
}
