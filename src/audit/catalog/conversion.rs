//! Conversion Tracking checks.

use super::{plural, STATUS_ENABLED};
use crate::audit::totals::AccountTotals;
use crate::config::Thresholds;
use crate::model::{AccountDataset, Check, CheckResult, DatasetKind, NormalizedRow, Severity};
use crate::utils::{count, money, pct, percent};

pub const RULE_IDS: &[&str] = &["G42", "G43", "G-CT1", "G-CT2", "G47", "G49", "G-CT3", "G-CT4"];

/// Conversion action types that imply offline or imported conversion data
const UPLOAD_TYPES: &[&str] = &[
    "UPLOAD_CLICKS",
    "UPLOAD_CALLS",
    "GOOGLE_ANALYTICS_4_PURCHASE",
    "GOOGLE_ANALYTICS_4_CUSTOM",
];

/// Categories that measure engagement rather than business outcomes
const MICRO_CATEGORIES: &[&str] = &[
    "ADD_TO_CART",
    "BEGIN_CHECKOUT",
    "PAGE_VIEW",
    "ENGAGEMENT",
    "GET_DIRECTIONS",
    "OUTBOUND_CLICK",
];

/// Name fragments that suggest two actions count the same outcome
const DUPLICATE_KEYWORDS: &[&str] = &[
    "purchase", "buy", "order", "phone", "call", "lead", "form", "submit", "contact",
];

/// Find keywords shared by more than one conversion action name.
///
/// Returns `(keyword, count)` pairs in keyword-list order.
#[must_use]
pub fn detect_duplicate_patterns<S: AsRef<str>>(names: &[S]) -> Vec<(&'static str, usize)> {
    let lowered: Vec<String> = names.iter().map(|n| n.as_ref().to_lowercase()).collect();
    DUPLICATE_KEYWORDS
        .iter()
        .filter_map(|keyword| {
            let hits = lowered.iter().filter(|name| name.contains(keyword)).count();
            (hits > 1).then_some((*keyword, hits))
        })
        .collect()
}

/// Grade a duplicate pattern list: none passes, one warns, more fail
#[must_use]
pub const fn grade_duplicates(patterns: usize) -> CheckResult {
    match patterns {
        0 => CheckResult::Pass,
        1 => CheckResult::Warning,
        _ => CheckResult::Fail,
    }
}

fn is_enabled(row: &NormalizedRow) -> bool {
    row.is("conversion_action.status", STATUS_ENABLED)
}

fn is_primary(row: &NormalizedRow) -> bool {
    row.bool_at("conversion_action.primary_for_goal") == Some(true)
}

fn action_name(row: &NormalizedRow) -> &str {
    row.str_at("conversion_action.name").unwrap_or("unnamed action")
}

fn has_value(row: &NormalizedRow) -> bool {
    row.is("conversion_action.category", "PURCHASE")
        || row.f64_or_zero("conversion_action.value_settings.default_value") > 0.0
}

#[must_use]
pub fn evaluate(dataset: &AccountDataset, thresholds: &Thresholds) -> Vec<Check> {
    let actions = dataset.rows(DatasetKind::ConversionActions);
    let enabled: Vec<&NormalizedRow> = actions.iter().filter(|r| is_enabled(r)).collect();
    let primary: Vec<&NormalizedRow> = enabled.iter().copied().filter(|r| is_primary(r)).collect();
    let totals = AccountTotals::from_dataset(dataset);

    vec![
        check_primary_defined(actions, &enabled, &primary),
        check_enhanced_conversions(actions, &enabled),
        check_duplicates(actions),
        check_conversions_recorded(&totals),
        check_micro_separation(&enabled, &primary),
        check_value_assignment(&primary, thresholds),
        Check::new(
            "G-CT3",
            "Consent mode configured",
            Severity::Medium,
            CheckResult::NotApplicable,
            "Consent mode status is not exposed by the reporting data; verify in the tag configuration",
        ),
        Check::new(
            "G-CT4",
            "Attribution model",
            Severity::Medium,
            CheckResult::NotApplicable,
            "Attribution model settings are not available from the reporting data; verify in conversion settings",
        ),
    ]
}

fn check_primary_defined(
    actions: &[NormalizedRow],
    enabled: &[&NormalizedRow],
    primary: &[&NormalizedRow],
) -> Check {
    let (result, finding) = if !primary.is_empty() {
        let names: Vec<&str> = primary.iter().map(|r| action_name(r)).collect();
        (
            CheckResult::Pass,
            format!(
                "{} of {} enabled marked primary: {}",
                plural(primary.len(), "primary conversion action"),
                enabled.len(),
                names.join(", ")
            ),
        )
    } else if !enabled.is_empty() {
        (
            CheckResult::Warning,
            format!(
                "{} enabled but none is marked primary for a goal; bidding has no target outcome",
                plural(enabled.len(), "conversion action")
            ),
        )
    } else if actions.is_empty() {
        (
            CheckResult::Fail,
            "No conversion actions are defined; the account cannot measure results".to_string(),
        )
    } else {
        (
            CheckResult::Fail,
            format!(
                "{} defined but none is enabled; the account cannot measure results",
                plural(actions.len(), "conversion action")
            ),
        )
    };
    Check::new("G42", "Conversion actions defined", Severity::Critical, result, finding)
}

fn check_enhanced_conversions(actions: &[NormalizedRow], enabled: &[&NormalizedRow]) -> Check {
    let upload = enabled.iter().find_map(|row| {
        row.str_at("conversion_action.type")
            .filter(|t| UPLOAD_TYPES.iter().any(|u| u.eq_ignore_ascii_case(t)))
    });

    let (result, finding) = if actions.is_empty() {
        (
            CheckResult::Fail,
            "No conversion actions exist, so enhanced or offline conversions cannot be in place"
                .to_string(),
        )
    } else if let Some(kind) = upload {
        (
            CheckResult::Pass,
            format!("Imported or uploaded conversions are active ({kind})"),
        )
    } else {
        (
            CheckResult::Warning,
            format!(
                "Enhanced conversions cannot be confirmed for a tag-only setup ({})",
                plural(enabled.len(), "enabled tag-based action")
            ),
        )
    };
    Check::new("G43", "Enhanced conversions enabled", Severity::Critical, result, finding)
}

fn check_duplicates(actions: &[NormalizedRow]) -> Check {
    let names: Vec<&str> = actions.iter().map(action_name).collect();
    let patterns = detect_duplicate_patterns(names.as_slice());
    let result = grade_duplicates(patterns.len());

    let finding = if patterns.is_empty() {
        format!(
            "No overlapping conversion action names across {}",
            plural(names.len(), "action")
        )
    } else {
        let evidence: Vec<String> = patterns
            .iter()
            .map(|(keyword, hits)| format!("\"{keyword}\" x{hits}"))
            .collect();
        format!(
            "Conversion actions likely count the same outcome more than once: {}",
            evidence.join(", ")
        )
    };
    Check::new("G-CT1", "No duplicate counting", Severity::Critical, result, finding)
}

fn check_conversions_recorded(totals: &AccountTotals) -> Check {
    let (result, finding) = if totals.spend <= 0.0 {
        (
            CheckResult::NotApplicable,
            "No spend in the last 30 days, so conversion recording cannot be assessed".to_string(),
        )
    } else if totals.conversions > 0.0 {
        (
            CheckResult::Pass,
            format!(
                "{} conversions recorded on {} spend in the last 30 days",
                count(totals.conversions),
                money(totals.spend)
            ),
        )
    } else {
        (
            CheckResult::Fail,
            format!(
                "{} spent in the last 30 days with zero conversions recorded",
                money(totals.spend)
            ),
        )
    };
    Check::new("G-CT2", "Conversions recorded", Severity::Critical, result, finding)
}

fn check_micro_separation(enabled: &[&NormalizedRow], primary: &[&NormalizedRow]) -> Check {
    if enabled.is_empty() {
        return Check::new(
            "G47",
            "Micro vs macro separation",
            Severity::High,
            CheckResult::NotApplicable,
            "No enabled conversion actions to classify",
        );
    }

    let micro: Vec<&str> = primary
        .iter()
        .filter(|row| {
            row.str_at("conversion_action.category")
                .is_some_and(|c| MICRO_CATEGORIES.iter().any(|m| m.eq_ignore_ascii_case(c)))
        })
        .map(|row| action_name(row))
        .collect();

    let result = match micro.len() {
        0 => CheckResult::Pass,
        1 => CheckResult::Warning,
        _ => CheckResult::Fail,
    };
    let finding = if micro.is_empty() {
        "Only macro conversions are set as primary".to_string()
    } else {
        format!(
            "{} set as primary: {}",
            plural(micro.len(), "micro conversion"),
            micro.join(", ")
        )
    };
    Check::new("G47", "Micro vs macro separation", Severity::High, result, finding)
}

fn check_value_assignment(primary: &[&NormalizedRow], thresholds: &Thresholds) -> Check {
    if primary.is_empty() {
        return Check::new(
            "G49",
            "Conversion value assignment",
            Severity::High,
            CheckResult::NotApplicable,
            "No enabled primary conversion actions to assess for values",
        );
    }

    let valued = primary.iter().filter(|r| has_value(r)).count();
    let share = percent(valued as f64, primary.len() as f64);
    let result = if share >= thresholds.conversion.value_share_pass {
        CheckResult::Pass
    } else if valued > 0 {
        CheckResult::Warning
    } else {
        CheckResult::Fail
    };
    let finding = format!(
        "{valued} of {} ({}) carry a conversion value",
        plural(primary.len(), "primary action"),
        pct(share)
    );
    Check::new("G49", "Conversion value assignment", Severity::High, result, finding)
}
