//! Quick win selection.
//!
//! Failing Critical/High checks become short, time-boxed actions.

use crate::model::{Category, CheckResult, QuickWin};

/// Time estimate for rules without a specific entry
pub const DEFAULT_TIME: &str = "15 min";

/// Rule id → (action, time estimate)
const ACTIONS: &[(&str, &str, &str)] = &[
    ("G42", "Create a primary conversion action for the main business outcome", "15 min"),
    ("G43", "Enable enhanced conversions or import offline conversions", "30 min"),
    ("G-CT1", "Consolidate duplicate conversion actions so each outcome is counted once", "10 min"),
    ("G-CT2", "Verify conversion tags fire on the thank-you page and in tag diagnostics", "30 min"),
    ("G47", "Set micro conversions (add to cart, page views, engagement) to Secondary", "5 min"),
    ("G49", "Assign conversion values to primary conversion actions", "10 min"),
    ("G14", "Create shared negative keyword lists and apply them to all search campaigns", "20 min"),
    ("G16", "Pause or add negatives for keywords spending without converting", "15 min"),
    ("G17", "Review or pause campaigns spending without conversions", "10 min"),
    ("G-WS1", "Exclude zero-conversion products from shopping campaigns", "15 min"),
    ("G04", "Archive paused campaigns to reduce account clutter", "5 min"),
    ("G05", "Launch a dedicated brand search campaign", "30 min"),
    ("G06", "Test a Performance Max campaign with the existing conversion data", "30 min"),
    ("G08", "Rebalance budget away from the dominant campaign toward efficient ones", "5 min"),
    ("G20", "Improve ad relevance and landing pages for low Quality Score keywords", "30 min"),
    ("G-KW2", "Expand keyword coverage with high-intent terms", "30 min"),
    ("G26", "Add a second responsive search ad to every ad group", "20 min"),
    ("G-AD2", "Rewrite ad copy to lift CTR above the 2% threshold", "20 min"),
    ("G50", "Add at least four sitelink extensions", "10 min"),
    ("G11", "Switch location targeting to \"Presence\" only", "2 min"),
    ("G36", "Move campaigns to a smart bidding strategy", "5 min"),
    ("G39", "Raise budgets on budget-limited campaigns with good CPA", "2 min"),
    ("G57", "Upload a Customer Match list from the customer database", "15 min"),
];

fn lookup(id: &str) -> Option<(&'static str, &'static str)> {
    ACTIONS
        .iter()
        .find(|(rule, _, _)| *rule == id)
        .map(|(_, action, time)| (*action, *time))
}

/// Pick up to `limit` quick wins.
///
/// Ordered by category position, then by check position within it.
#[must_use]
pub fn select_quick_wins(categories: &[Category], limit: usize) -> Vec<QuickWin> {
    let mut candidates: Vec<((usize, usize), QuickWin)> = categories
        .iter()
        .flat_map(|category| {
            category
                .checks
                .iter()
                .enumerate()
                .filter(|(_, check)| {
                    check.result == CheckResult::Fail && check.severity.is_high_impact()
                })
                .map(move |(index, check)| {
                    let (action, time) = lookup(&check.id)
                        .map_or((check.finding.as_str(), DEFAULT_TIME), |(a, t)| (a, t));
                    (
                        (category.kind.index(), index),
                        QuickWin {
                            action: action.to_string(),
                            impact: check.severity,
                            time: time.to_string(),
                            check: check.id.clone(),
                        },
                    )
                })
        })
        .collect();

    candidates.sort_by_key(|(key, _)| *key);
    candidates.into_iter().take(limit).map(|(_, win)| win).collect()
}
