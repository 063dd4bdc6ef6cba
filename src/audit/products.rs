//! Product (shopping line item) ranking.

use std::cmp::Ordering;

use super::totals::spend_of;
use crate::config::ProductThresholds;
use crate::model::{AccountDataset, DatasetKind, NormalizedRow, ProductEntry};
use crate::utils::round2;

/// Smallest spend used as a ROAS denominator
const MIN_ROAS_SPEND: f64 = 0.01;

/// Ranked product lists
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductRanking {
    /// Non-converting products above the spend floor, by spend
    pub top_wasted: Vec<ProductEntry>,
    /// Converting products, by ROAS
    pub top_performing: Vec<ProductEntry>,
}

struct ProductLine {
    name: String,
    spend: f64,
    conversions: f64,
    value: f64,
}

impl ProductLine {
    fn from_row(row: &NormalizedRow) -> Self {
        let name = row
            .str_at("segments.product_title")
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .or_else(|| row.id_at("segments.product_item_id"))
            .unwrap_or_else(|| "Unknown product".to_string());
        Self {
            name,
            spend: spend_of(row),
            conversions: row.f64_or_zero("metrics.conversions"),
            value: row.f64_or_zero("metrics.conversions_value"),
        }
    }

    fn roas(&self) -> f64 {
        self.value / self.spend.max(MIN_ROAS_SPEND)
    }

    fn entry(&self, with_roas: bool) -> ProductEntry {
        ProductEntry {
            product: self.name.clone(),
            spend: round2(self.spend),
            conversions: self.conversions,
            value: round2(self.value),
            roas: with_roas.then(|| round2(self.roas())),
        }
    }
}

/// Rank the shopping rows of an account.
///
/// Both lists are empty when there is no shopping data.
#[must_use]
pub fn analyze_products(dataset: &AccountDataset, limits: &ProductThresholds) -> ProductRanking {
    let rows = dataset.rows(DatasetKind::ShoppingPerformance);
    if rows.is_empty() {
        return ProductRanking::default();
    }

    let lines: Vec<ProductLine> = rows.iter().map(ProductLine::from_row).collect();

    let mut wasted: Vec<&ProductLine> = lines
        .iter()
        .filter(|p| p.conversions <= 0.0 && p.spend > limits.wasted_min_spend)
        .collect();
    // sort_by is stable, so ties keep input order
    wasted.sort_by(|a, b| b.spend.partial_cmp(&a.spend).unwrap_or(Ordering::Equal));

    let mut performing: Vec<&ProductLine> = lines.iter().filter(|p| p.conversions > 0.0).collect();
    performing.sort_by(|a, b| b.roas().partial_cmp(&a.roas()).unwrap_or(Ordering::Equal));

    ProductRanking {
        top_wasted: wasted
            .into_iter()
            .take(limits.top_wasted)
            .map(|p| p.entry(false))
            .collect(),
        top_performing: performing
            .into_iter()
            .take(limits.top_performing)
            .map(|p| p.entry(true))
            .collect(),
    }
}
