//! Flat KPI snapshot of an account.

use std::collections::HashSet;

use super::totals::{spend_of, AccountTotals};
use crate::model::{AccountDataset, DatasetKind, Snapshot};
use crate::utils::{percent, ratio, round1, round2};

/// Days covered by the metric window
pub const METRIC_WINDOW_DAYS: f64 = 30.0;

/// Build the snapshot for an account
#[must_use]
pub fn build_snapshot(dataset: &AccountDataset) -> Snapshot {
    let campaigns = dataset.rows(DatasetKind::Campaigns);
    let totals = AccountTotals::from_dataset(dataset);

    let enabled_campaigns = campaigns
        .iter()
        .filter(|r| r.is("campaign.status", "ENABLED"))
        .count();

    let active_campaigns_with_spend = dataset
        .rows(DatasetKind::CampaignMetrics)
        .iter()
        .filter(|r| spend_of(r) > 0.0)
        .filter_map(|r| r.id_at("campaign.id"))
        .collect::<HashSet<_>>()
        .len();

    let count_or_none = |kind: DatasetKind| {
        let rows = dataset.rows(kind);
        (!rows.is_empty()).then_some(rows.len())
    };

    let budgets = dataset.rows(DatasetKind::CampaignBudgets);
    let daily_budget = (!budgets.is_empty()).then(|| {
        round2(
            budgets
                .iter()
                .filter(|r| r.is("campaign_budget.status", "ENABLED"))
                .map(|r| r.micros_at("campaign_budget.amount_micros"))
                .sum(),
        )
    });

    Snapshot {
        total_campaigns: campaigns.len(),
        enabled_campaigns,
        active_campaigns_with_spend,
        total_ad_groups: count_or_none(DatasetKind::AdGroups),
        total_keywords: count_or_none(DatasetKind::Keywords),
        spend_30d: round2(totals.spend),
        impressions_30d: totals.impressions,
        clicks_30d: totals.clicks,
        ctr: round2(percent(totals.clicks, totals.impressions)),
        avg_cpc: round2(ratio(totals.spend, totals.clicks)),
        conversions_30d: round2(totals.conversions),
        conversion_value_30d: round2(totals.conversion_value),
        roas: round2(ratio(totals.conversion_value, totals.spend)),
        cpa: round2(ratio(totals.spend, totals.conversions)),
        search_impression_share: totals.search_impression_share.map(round1),
        daily_budget,
        avg_daily_spend: round2(totals.spend / METRIC_WINDOW_DAYS),
    }
}
