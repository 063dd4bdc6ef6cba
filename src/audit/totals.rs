//! Account-level performance totals shared by checks and the snapshot.

use crate::model::{AccountDataset, DatasetKind, NormalizedRow};

/// 30-day totals for an account.
///
/// Sourced from `account_metrics` rows when present, otherwise summed over
/// `campaign_metrics` rows.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AccountTotals {
    pub spend: f64,
    pub impressions: f64,
    pub clicks: f64,
    pub conversions: f64,
    pub conversion_value: f64,
    /// Search impression share on a 0-100 scale
    pub search_impression_share: Option<f64>,
}

impl AccountTotals {
    #[must_use]
    pub fn from_dataset(dataset: &AccountDataset) -> Self {
        let account_rows = dataset.rows(DatasetKind::AccountMetrics);
        let campaign_rows = dataset.rows(DatasetKind::CampaignMetrics);
        let source = if account_rows.is_empty() {
            campaign_rows
        } else {
            account_rows
        };

        let mut totals = source.iter().fold(Self::default(), |mut acc, row| {
            acc.spend += spend_of(row);
            acc.impressions += row.f64_or_zero("metrics.impressions");
            acc.clicks += row.f64_or_zero("metrics.clicks");
            acc.conversions += row.f64_or_zero("metrics.conversions");
            acc.conversion_value += row.f64_or_zero("metrics.conversions_value");
            acc
        });

        totals.search_impression_share = account_rows
            .iter()
            .chain(campaign_rows)
            .find_map(|row| row.f64_at("metrics.search_impression_share"))
            .map(|share| share * 100.0);

        totals
    }

    /// Click-through rate in percent
    #[must_use]
    pub fn ctr(&self) -> f64 {
        crate::utils::percent(self.clicks, self.impressions)
    }
}

/// Spend of one metric row in currency units
#[must_use]
pub fn spend_of(row: &NormalizedRow) -> f64 {
    row.micros_at("metrics.cost_micros")
}
