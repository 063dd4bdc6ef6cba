//! Wasted Spend / Negatives checks.

use super::{below, plural};
use crate::audit::totals::spend_of;
use crate::config::Thresholds;
use crate::model::{AccountDataset, Check, CheckResult, DatasetKind, NormalizedRow, Severity};
use crate::utils::{money, pct, percent};

pub const RULE_IDS: &[&str] = &["G13", "G14", "G16", "G17", "G-WS1"];

fn conversions_of(row: &NormalizedRow) -> f64 {
    row.f64_or_zero("metrics.conversions")
}

/// Total spend and the part spent by rows matching `wasted`
fn spend_split<'a>(
    rows: impl IntoIterator<Item = &'a NormalizedRow>,
    wasted: impl Fn(&NormalizedRow, f64) -> bool,
) -> (f64, f64, usize) {
    rows.into_iter().fold((0.0, 0.0, 0), |(total, waste, n), row| {
        let spend = spend_of(row);
        if wasted(row, spend) {
            (total + spend, waste + spend, n + 1)
        } else {
            (total + spend, waste, n)
        }
    })
}

#[must_use]
pub fn evaluate(dataset: &AccountDataset, thresholds: &Thresholds) -> Vec<Check> {
    vec![
        Check::new(
            "G13",
            "Search term audit recency",
            Severity::Critical,
            CheckResult::NotApplicable,
            "Search term review cadence cannot be determined from the reporting data",
        ),
        check_negative_lists(dataset, thresholds),
        check_keyword_waste(dataset, thresholds),
        check_campaign_waste(dataset, thresholds),
        check_product_waste(dataset, thresholds),
    ]
}

fn check_negative_lists(dataset: &AccountDataset, thresholds: &Thresholds) -> Check {
    let lists = dataset
        .rows(DatasetKind::NegativeLists)
        .iter()
        .filter(|row| row.is("shared_set.type", "NEGATIVE_KEYWORDS"))
        .count();

    let pass = thresholds.wasted_spend.negative_lists_pass;
    let (result, finding) = if lists >= pass {
        (
            CheckResult::Pass,
            format!("{} in place", plural(lists, "shared negative keyword list")),
        )
    } else if lists > 0 {
        (
            CheckResult::Warning,
            format!(
                "Only {} found; at least {pass} are recommended",
                plural(lists, "shared negative keyword list")
            ),
        )
    } else {
        (
            CheckResult::Fail,
            "No shared negative keyword lists; irrelevant searches are not being blocked"
                .to_string(),
        )
    };
    Check::new("G14", "Negative keyword lists exist", Severity::Critical, result, finding)
}

fn check_keyword_waste(dataset: &AccountDataset, thresholds: &Thresholds) -> Check {
    let (total, waste, wasted) = spend_split(dataset.rows(DatasetKind::Keywords), |row, spend| {
        spend > 0.0 && conversions_of(row) <= 0.0
    });

    if total <= 0.0 {
        return Check::new(
            "G16",
            "Wasted spend on non-converting keywords",
            Severity::Critical,
            CheckResult::NotApplicable,
            "No keyword spend in the last 30 days",
        );
    }

    let share = percent(waste, total);
    let limits = &thresholds.wasted_spend;
    let result = below(share, limits.keyword_waste_pass, limits.keyword_waste_warn);
    let finding = format!(
        "{} of {} keyword spend ({}) went to {} with no conversions",
        money(waste),
        money(total),
        pct(share),
        plural(wasted, "keyword")
    );
    Check::new(
        "G16",
        "Wasted spend on non-converting keywords",
        Severity::Critical,
        result,
        finding,
    )
}

fn check_campaign_waste(dataset: &AccountDataset, thresholds: &Thresholds) -> Check {
    let (total, waste, wasted) = spend_split(
        dataset.rows(DatasetKind::CampaignMetrics),
        |row, spend| spend > 0.0 && conversions_of(row) <= 0.0,
    );

    if total <= 0.0 {
        return Check::new(
            "G17",
            "Non-converting campaigns",
            Severity::High,
            CheckResult::NotApplicable,
            "No campaign spend in the last 30 days",
        );
    }

    let share = percent(waste, total);
    let result = if wasted == 0 {
        CheckResult::Pass
    } else if share < thresholds.wasted_spend.campaign_waste_warn {
        CheckResult::Warning
    } else {
        CheckResult::Fail
    };
    let finding = if wasted == 0 {
        format!("Every spending campaign converted ({} total spend)", money(total))
    } else {
        format!(
            "{} spent {} ({} of campaign spend) without a conversion",
            plural(wasted, "campaign"),
            money(waste),
            pct(share)
        )
    };
    Check::new("G17", "Non-converting campaigns", Severity::High, result, finding)
}

fn check_product_waste(dataset: &AccountDataset, thresholds: &Thresholds) -> Check {
    let min_spend = thresholds.products.wasted_min_spend;
    let (total, waste, wasted) = spend_split(
        dataset.rows(DatasetKind::ShoppingPerformance),
        |row, spend| spend > min_spend && conversions_of(row) <= 0.0,
    );

    if total <= 0.0 {
        return Check::new(
            "G-WS1",
            "Zero-conversion products",
            Severity::High,
            CheckResult::NotApplicable,
            "No shopping product spend in the last 30 days",
        );
    }

    let share = percent(waste, total);
    let limits = &thresholds.wasted_spend;
    let result = below(share, limits.product_waste_pass, limits.product_waste_warn);
    let finding = format!(
        "{} with over {} spend and no conversions used {} ({} of shopping spend)",
        plural(wasted, "product"),
        money(min_spend),
        money(waste),
        pct(share)
    );
    Check::new("G-WS1", "Zero-conversion products", Severity::High, result, finding)
}
