//! Industry classification from account data and name.

use crate::model::{AccountDataset, DatasetKind, Industry};

const LEGAL_KEYWORDS: &[&str] = &["law", "legal", "attorney", "lawyer", "solicitor", "litigation"];

const LOCAL_SERVICE_KEYWORDS: &[&str] = &[
    "roof",
    "plumb",
    "contract",
    "remodel",
    "hvac",
    "electric",
    "landscap",
    "cleaning",
    "construction",
    "commercial",
    "repair",
    "pest",
];

const HEALTH_KEYWORDS: &[&str] = &[
    "health", "spa", "clinic", "dental", "medical", "wellness", "diet", "skin", "therapy",
];

const TRAVEL_KEYWORDS: &[&str] = &[
    "travel",
    "tour",
    "hotel",
    "resort",
    "vacation",
    "station",
    "waterfall",
];

/// Checked after every other name table
const SECONDARY_LOCAL_SERVICE_KEYWORDS: &[&str] = &["engineering", "tree"];

const ECOMMERCE_CONVERSION_CATEGORIES: &[&str] = &["PURCHASE", "ADD_TO_CART"];

const ECOMMERCE_CHANNELS: &[&str] = &["SHOPPING", "PERFORMANCE_MAX"];

/// Name tables in match order
const NAME_RULES: &[(&[&str], Industry)] = &[
    (LEGAL_KEYWORDS, Industry::Legal),
    (LOCAL_SERVICE_KEYWORDS, Industry::LocalServices),
    (HEALTH_KEYWORDS, Industry::Healthcare),
    (TRAVEL_KEYWORDS, Industry::Travel),
    (SECONDARY_LOCAL_SERVICE_KEYWORDS, Industry::LocalServices),
];

/// Classify an account; the first matching rule wins.
#[must_use]
pub fn classify(account_name: &str, dataset: &AccountDataset) -> Industry {
    if has_ecommerce_signals(dataset) {
        return Industry::Ecommerce;
    }

    let name = account_name.to_lowercase();
    NAME_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| name.contains(k)))
        .map_or(Industry::General, |(_, industry)| *industry)
}

fn has_ecommerce_signals(dataset: &AccountDataset) -> bool {
    if !dataset.is_empty(DatasetKind::ShoppingPerformance) {
        return true;
    }

    let sells_online = dataset.rows(DatasetKind::ConversionActions).iter().any(|row| {
        ECOMMERCE_CONVERSION_CATEGORIES
            .iter()
            .any(|c| row.is("conversion_action.category", c))
    });
    if sells_online {
        return true;
    }

    dataset.rows(DatasetKind::Campaigns).iter().any(|row| {
        ECOMMERCE_CHANNELS
            .iter()
            .any(|c| row.is("campaign.advertising_channel_type", c))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NormalizedRow;
    use serde_json::json;

    fn single(path: &str, value: &str) -> NormalizedRow {
        let mut row = NormalizedRow::new();
        row.insert_path(path, json!(value));
        row
    }

    #[test]
    fn test_name_rules_in_order() {
        let empty = AccountDataset::new();
        assert_eq!(classify("Smith Law Group", &empty), Industry::Legal);
        assert_eq!(classify("Apex Roofing", &empty), Industry::LocalServices);
        assert_eq!(classify("Bright Dental Clinic", &empty), Industry::Healthcare);
        assert_eq!(classify("Blue Lagoon Resort", &empty), Industry::Travel);
        assert_eq!(classify("Kyle Dynamic Tree Solutions", &empty), Industry::LocalServices);
        assert_eq!(classify("Acme Widgets", &empty), Industry::General);
    }

    #[test]
    fn test_legal_beats_trade_keywords() {
        // "contract" would match local services, but legal is checked first
        let empty = AccountDataset::new();
        assert_eq!(classify("Contract Law Partners", &empty), Industry::Legal);
    }

    #[test]
    fn test_data_signals_beat_name() {
        let shopping = AccountDataset::new().with_rows(
            DatasetKind::ShoppingPerformance,
            vec![single("segments.product_title", "Widget")],
        );
        assert_eq!(classify("Smith Law Group", &shopping), Industry::Ecommerce);

        let purchase = AccountDataset::new().with_rows(
            DatasetKind::ConversionActions,
            vec![single("conversion_action.category", "PURCHASE")],
        );
        assert_eq!(classify("Acme", &purchase), Industry::Ecommerce);

        let pmax = AccountDataset::new().with_rows(
            DatasetKind::Campaigns,
            vec![single("campaign.advertising_channel_type", "PERFORMANCE_MAX")],
        );
        assert_eq!(classify("Acme", &pmax), Industry::Ecommerce);
    }
}
