//! Three-phase action plan built from failed checks and the snapshot.

use crate::config::PlanThresholds;
use crate::model::{Category, Check, CheckResult, RecommendationPhase, Severity, Snapshot};
use crate::utils::{money, quantity};

pub const PHASE_FOUNDATION: &str = "Phase 1: Fix the Foundation (Week 1)";
pub const PHASE_OPTIMIZE: &str = "Phase 2: Optimize (Weeks 2-3)";
pub const PHASE_SCALE: &str = "Phase 3: Scale (Month 2+)";

/// Phase 1 item when no Critical check failed
pub const FOUNDATION_FALLBACK: &str =
    "No critical failures found. Review the WARNING items in each category and resolve them first.";

/// Conversion tracking rules reported as one item
const TRACKING_CLUSTER: &[&str] = &["G42", "G-CT1", "G-CT2"];

const TRACKING_ITEM: &str = "Rebuild conversion tracking: keep one primary action per business \
outcome, remove duplicates, and confirm every tag is firing before changing bids";

/// Critical rules that open Phase 1, after the tracking cluster
const FOUNDATION_RULES: &[(&str, &str)] = &[
    (
        "G43",
        "Turn on enhanced conversions (or offline conversion import) so bidding sees the full conversion picture",
    ),
    (
        "G05",
        "Split brand terms into a dedicated brand search campaign to protect brand traffic and report on it separately",
    ),
    (
        "G14",
        "Build shared negative keyword lists (competitors, jobs, free/DIY, irrelevant products) and attach them to every search campaign",
    ),
    (
        "G11",
        "Change location targeting to \"Presence: people in or regularly in your targeted locations\" to stop paying for out-of-area clicks",
    ),
];

/// High rules that open Phase 2
const OPTIMIZE_RULES: &[(&str, &str)] = &[
    (
        "G36",
        "Move from manual CPC to Maximize Conversions, then to a Target CPA or Target ROAS once conversion data is clean",
    ),
    (
        "G57",
        "Upload Customer Match lists and add remarketing audiences in observation mode to inform bidding",
    ),
    (
        "G06",
        "Launch a Performance Max campaign alongside search to reach Shopping, YouTube, Display and Discover inventory",
    ),
];

const CREATIVE_REFRESH_ITEM: &str = "Refresh ad creative: rewrite the weakest headlines, pin only \
what must be pinned, and add image and sitelink assets to every campaign";

const DEMAND_GEN_ITEM: &str =
    "Test a Demand Gen campaign on YouTube and Discover to build upper-funnel demand";

const SERVER_SIDE_ITEM: &str =
    "Implement server-side tracking to recover conversions lost to browsers and consent banners";

/// Build the three phases for an audited account
#[must_use]
pub fn build_recommendations(
    categories: &[Category],
    snapshot: &Snapshot,
    limits: &PlanThresholds,
) -> Vec<RecommendationPhase> {
    vec![
        RecommendationPhase {
            phase: PHASE_FOUNDATION.to_string(),
            items: foundation_items(categories),
        },
        RecommendationPhase {
            phase: PHASE_OPTIMIZE.to_string(),
            items: optimize_items(categories),
        },
        RecommendationPhase {
            phase: PHASE_SCALE.to_string(),
            items: scale_items(snapshot, limits),
        },
    ]
}

fn foundation_items(categories: &[Category]) -> Vec<String> {
    let mut items = Vec::new();
    if TRACKING_CLUSTER
        .iter()
        .any(|id| failed_with(categories, id, Severity::Critical))
    {
        items.push(TRACKING_ITEM.to_string());
    }
    items.extend(triggered(categories, FOUNDATION_RULES, Severity::Critical));

    if items.is_empty() {
        items.push(FOUNDATION_FALLBACK.to_string());
    }
    items
}

fn optimize_items(categories: &[Category]) -> Vec<String> {
    let mut items: Vec<String> = triggered(categories, OPTIMIZE_RULES, Severity::High).collect();
    items.push(CREATIVE_REFRESH_ITEM.to_string());
    items
}

fn scale_items(snapshot: &Snapshot, limits: &PlanThresholds) -> Vec<String> {
    let mut items = Vec::new();

    match snapshot.search_impression_share {
        Some(share) if share < limits.impression_share_scale => items.push(format!(
            "Search impression share is {share:.1}%: raise budgets or bids on profitable campaigns \
             to capture more of the eligible auctions"
        )),
        _ => items.push(format!(
            "Scale budgets gradually (about 20% per week) from the current {} per day on campaigns \
             that hold their CPA or ROAS targets",
            money(snapshot.avg_daily_spend)
        )),
    }

    if snapshot.conversions_30d > limits.conversion_volume {
        items.push(format!(
            "With {} conversions in the last 30 days, there is enough volume for value-based \
             bidding and broad match tests",
            quantity(snapshot.conversions_30d)
        ));
    }

    items.push(DEMAND_GEN_ITEM.to_string());
    items.push(SERVER_SIDE_ITEM.to_string());
    items
}

fn triggered<'a>(
    categories: &'a [Category],
    rules: &'a [(&'a str, &'a str)],
    severity: Severity,
) -> impl Iterator<Item = String> + 'a {
    rules
        .iter()
        .filter(move |(id, _)| failed_with(categories, id, severity))
        .map(|(_, item)| (*item).to_string())
}

fn failed_with(categories: &[Category], id: &str, severity: Severity) -> bool {
    categories
        .iter()
        .flat_map(|c| c.checks.iter())
        .any(|check: &Check| {
            check.id == id && check.result == CheckResult::Fail && check.severity == severity
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CategoryKind, Grade};

    fn category(checks: Vec<Check>) -> Category {
        Category {
            kind: CategoryKind::ConversionTracking,
            name: String::new(),
            weight: String::new(),
            score: None,
            grade: Grade::NotApplicable,
            checks,
        }
    }

    fn check(id: &str, severity: Severity, result: CheckResult) -> Check {
        Check::new(id, "name", severity, result, "finding")
    }

    #[test]
    fn test_fallback_without_critical_failures() {
        let categories = vec![category(vec![
            check("G42", Severity::Critical, CheckResult::Warning),
            check("G47", Severity::High, CheckResult::Fail),
        ])];
        let phases = build_recommendations(
            &categories,
            &Snapshot::default(),
            &PlanThresholds::default(),
        );
        assert_eq!(phases.len(), 3);
        assert_eq!(phases[0].phase, PHASE_FOUNDATION);
        assert_eq!(phases[0].items, vec![FOUNDATION_FALLBACK.to_string()]);
    }

    #[test]
    fn test_tracking_cluster_is_one_item() {
        let categories = vec![category(vec![
            check("G42", Severity::Critical, CheckResult::Fail),
            check("G-CT1", Severity::Critical, CheckResult::Fail),
            check("G-CT2", Severity::Critical, CheckResult::Fail),
            check("G11", Severity::Critical, CheckResult::Fail),
        ])];
        let items = foundation_items(&categories);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], TRACKING_ITEM);
        assert!(items[1].contains("Presence"));
    }

    #[test]
    fn test_optimize_always_ends_with_creative_refresh() {
        let categories = vec![category(vec![
            check("G06", Severity::High, CheckResult::Fail),
            check("G36", Severity::High, CheckResult::Fail),
        ])];
        let items = optimize_items(&categories);
        assert_eq!(items.len(), 3);
        assert!(items[0].contains("Maximize Conversions"));
        assert!(items[1].contains("Performance Max"));
        assert_eq!(items[2], CREATIVE_REFRESH_ITEM);

        assert_eq!(optimize_items(&[]), vec![CREATIVE_REFRESH_ITEM.to_string()]);
    }

    #[test]
    fn test_scale_with_low_impression_share() {
        let snapshot = Snapshot {
            search_impression_share: Some(42.3),
            conversions_30d: 40.0,
            ..Snapshot::default()
        };
        let items = scale_items(&snapshot, &PlanThresholds::default());
        assert_eq!(items.len(), 4);
        assert!(items[0].starts_with("Search impression share is 42.3%:"));
        assert!(items[1].starts_with("With 40 conversions in the last 30 days"));
        assert_eq!(items[2], DEMAND_GEN_ITEM);
        assert_eq!(items[3], SERVER_SIDE_ITEM);
    }

    #[test]
    fn test_scale_cites_fractional_conversions() {
        let snapshot = Snapshot {
            search_impression_share: Some(80.0),
            conversions_30d: 15.4,
            ..Snapshot::default()
        };
        let items = scale_items(&snapshot, &PlanThresholds::default());
        assert_eq!(items.len(), 4);
        assert!(items[1].starts_with("With 15.4 conversions in the last 30 days"));
    }

    #[test]
    fn test_scale_without_impression_share() {
        let snapshot = Snapshot {
            avg_daily_spend: 54.73,
            conversions_30d: 15.0,
            ..Snapshot::default()
        };
        let items = scale_items(&snapshot, &PlanThresholds::default());
        assert_eq!(items.len(), 3);
        assert!(items[0].contains("$55 per day"));
    }
}
