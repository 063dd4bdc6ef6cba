//! Field schema of every upstream dataset.
//!
//! Each dataset has a fixed list of dotted column paths the audit reads.
//! Columns outside this list are ignored by the schema-aware normalizer.

use super::dataset::DatasetKind;

const CAMPAIGNS: &[&str] = &[
    "campaign.id",
    "campaign.name",
    "campaign.status",
    "campaign.advertising_channel_type",
    "campaign.bidding_strategy_type",
    "campaign.campaign_budget",
    "campaign.network_settings.target_search_network",
    "campaign.network_settings.target_content_network",
    "campaign.network_settings.target_partner_search_network",
    "campaign.geo_target_type_setting.positive_geo_target_type",
];

const CAMPAIGN_BUDGETS: &[&str] = &[
    "campaign_budget.id",
    "campaign_budget.name",
    "campaign_budget.status",
    "campaign_budget.amount_micros",
    "campaign_budget.explicitly_shared",
];

const ACCOUNT_METRICS: &[&str] = &[
    "customer.id",
    "customer.descriptive_name",
    "customer.currency_code",
    "metrics.cost_micros",
    "metrics.impressions",
    "metrics.clicks",
    "metrics.conversions",
    "metrics.conversions_value",
    "metrics.search_impression_share",
    "metrics.search_budget_lost_impression_share",
    "metrics.search_rank_lost_impression_share",
];

const CAMPAIGN_METRICS: &[&str] = &[
    "campaign.id",
    "campaign.name",
    "campaign.status",
    "campaign.advertising_channel_type",
    "metrics.cost_micros",
    "metrics.impressions",
    "metrics.clicks",
    "metrics.conversions",
    "metrics.conversions_value",
    "metrics.search_impression_share",
    "metrics.search_budget_lost_impression_share",
    "metrics.search_rank_lost_impression_share",
];

const CONVERSION_ACTIONS: &[&str] = &[
    "conversion_action.id",
    "conversion_action.name",
    "conversion_action.status",
    "conversion_action.type",
    "conversion_action.category",
    "conversion_action.primary_for_goal",
    "conversion_action.counting_type",
    "conversion_action.include_in_conversions_metric",
    "conversion_action.value_settings.default_value",
    "conversion_action.value_settings.always_use_default_value",
];

const AD_GROUPS: &[&str] = &[
    "ad_group.id",
    "ad_group.name",
    "ad_group.status",
    "ad_group.type",
    "campaign.id",
];

const KEYWORDS: &[&str] = &[
    "ad_group_criterion.criterion_id",
    "ad_group_criterion.status",
    "ad_group_criterion.keyword.text",
    "ad_group_criterion.keyword.match_type",
    "ad_group_criterion.quality_info.quality_score",
    "ad_group.id",
    "campaign.id",
    "metrics.cost_micros",
    "metrics.impressions",
    "metrics.clicks",
    "metrics.conversions",
];

const ADS: &[&str] = &[
    "ad_group_ad.ad.id",
    "ad_group_ad.ad.type",
    "ad_group_ad.status",
    "ad_group_ad.ad_strength",
    "ad_group_ad.ad.responsive_search_ad.headlines",
    "ad_group_ad.ad.responsive_search_ad.descriptions",
    "ad_group.id",
    "campaign.id",
    "metrics.impressions",
    "metrics.clicks",
];

const ASSETS: &[&str] = &[
    "asset.id",
    "asset.name",
    "asset.type",
    "campaign_asset.field_type",
    "campaign_asset.status",
    "campaign.id",
];

const GEO_TARGETING: &[&str] = &[
    "campaign_criterion.criterion_id",
    "campaign_criterion.type",
    "campaign_criterion.negative",
    "campaign_criterion.location.geo_target_constant",
    "campaign.id",
];

const SHOPPING_PERFORMANCE: &[&str] = &[
    "segments.product_item_id",
    "segments.product_title",
    "campaign.id",
    "metrics.cost_micros",
    "metrics.impressions",
    "metrics.clicks",
    "metrics.conversions",
    "metrics.conversions_value",
];

const NEGATIVE_LISTS: &[&str] = &[
    "shared_set.id",
    "shared_set.name",
    "shared_set.type",
    "shared_set.status",
    "shared_set.member_count",
];

const USER_LISTS: &[&str] = &[
    "user_list.id",
    "user_list.name",
    "user_list.type",
    "user_list.membership_status",
    "user_list.size_for_search",
];

/// The column paths a dataset is expected to carry
#[must_use]
pub const fn fields(kind: DatasetKind) -> &'static [&'static str] {
    match kind {
        DatasetKind::Campaigns => CAMPAIGNS,
        DatasetKind::CampaignBudgets => CAMPAIGN_BUDGETS,
        DatasetKind::AccountMetrics => ACCOUNT_METRICS,
        DatasetKind::CampaignMetrics => CAMPAIGN_METRICS,
        DatasetKind::ConversionActions => CONVERSION_ACTIONS,
        DatasetKind::AdGroups => AD_GROUPS,
        DatasetKind::Keywords => KEYWORDS,
        DatasetKind::Ads => ADS,
        DatasetKind::Assets => ASSETS,
        DatasetKind::GeoTargeting => GEO_TARGETING,
        DatasetKind::ShoppingPerformance => SHOPPING_PERFORMANCE,
        DatasetKind::NegativeLists => NEGATIVE_LISTS,
        DatasetKind::UserLists => USER_LISTS,
    }
}

/// Whether `column` belongs to the schema of `kind`
#[must_use]
pub fn is_known_field(kind: DatasetKind, column: &str) -> bool {
    fields(kind).contains(&column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_dataset_has_fields() {
        for kind in DatasetKind::all() {
            assert!(!fields(*kind).is_empty(), "{kind} has no schema");
        }
    }

    #[test]
    fn test_known_field_lookup() {
        assert!(is_known_field(DatasetKind::Campaigns, "campaign.status"));
        assert!(!is_known_field(DatasetKind::Campaigns, "campaign.labels"));
        assert!(is_known_field(
            DatasetKind::ShoppingPerformance,
            "segments.product_title"
        ));
    }
}
