//! Performance benchmarks for the audit engine.
//!
//! Run with: cargo bench --bench audit_benchmark
//!
//! Accounts are generated synthetically with a configurable number of
//! campaigns; keywords, ads and products scale with the campaign count.

use ads_audit::ingest::normalize_dataset;
use ads_audit::{
    AccountBundle, AccountDataset, AccountIdentity, AuditEngine, DatasetKind, DatasetSource,
    QueryOutcome,
};
use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use indexmap::IndexMap;
use serde_json::{json, Value};
use std::hint::black_box;

const KEYWORDS_PER_CAMPAIGN: usize = 40;
const ADS_PER_CAMPAIGN: usize = 6;
const PRODUCTS_PER_CAMPAIGN: usize = 20;

const MATCH_TYPES: [&str; 3] = ["EXACT", "PHRASE", "BROAD"];
const AD_STRENGTHS: [&str; 4] = ["EXCELLENT", "GOOD", "AVERAGE", "POOR"];

fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
}

/// Columnar results for one synthetic account
fn generate_results(campaigns: usize) -> Vec<(DatasetKind, Value)> {
    let campaign_rows: Vec<Value> = (0..campaigns)
        .map(|i| {
            let name = if i == 0 {
                "Brand | Exact".to_string()
            } else {
                format!("Search | Service {i}")
            };
            let status = if i % 7 == 0 { "PAUSED" } else { "ENABLED" };
            let channel = if i % 5 == 0 { "PERFORMANCE_MAX" } else { "SEARCH" };
            let bidding = if i % 3 == 0 { "MANUAL_CPC" } else { "TARGET_CPA" };
            let geo = if i % 4 == 0 { "PRESENCE_OR_INTEREST" } else { "PRESENCE" };
            json!([i.to_string(), name, status, channel, bidding, geo, (i % 6 == 0).to_string()])
        })
        .collect();

    let metric_rows: Vec<Value> = (0..campaigns)
        .map(|i| {
            let conversions = (i % 4) as f64 * 2.5;
            json!([i.to_string(), (i + 1) * 25_000_000, (i + 1) * 900, (i + 1) * 30, conversions, 0.42])
        })
        .collect();

    let keyword_rows: Vec<Value> = (0..campaigns * KEYWORDS_PER_CAMPAIGN)
        .map(|i| {
            let match_type = MATCH_TYPES[i % MATCH_TYPES.len()];
            let ad_group = (i / KEYWORDS_PER_CAMPAIGN).to_string();
            let conversions = (i % 5) as f64 * 0.5;
            json!([
                i.to_string(),
                "ENABLED",
                format!("service keyword {i}"),
                match_type,
                (i % 10) + 1,
                ad_group,
                (i % 9) * 1_500_000,
                i % 500,
                i % 40,
                conversions
            ])
        })
        .collect();

    let ad_rows: Vec<Value> = (0..campaigns * ADS_PER_CAMPAIGN)
        .map(|i| {
            let strength = AD_STRENGTHS[i % AD_STRENGTHS.len()];
            let parent = (i / ADS_PER_CAMPAIGN).to_string();
            json!([
                i.to_string(),
                "RESPONSIVE_SEARCH_AD",
                "ENABLED",
                strength,
                parent,
                parent,
                1000 + i,
                40 + i % 60
            ])
        })
        .collect();

    let product_rows: Vec<Value> = (0..campaigns * PRODUCTS_PER_CAMPAIGN)
        .map(|i| {
            let conversions = (i % 3) as f64;
            json!([
                format!("SKU-{i}"),
                format!("Product {i}"),
                (i % 13) * 4_000_000,
                conversions,
                conversions * 45.0
            ])
        })
        .collect();

    vec![
        (
            DatasetKind::Campaigns,
            json!({
                "columns": [
                    "campaign.id",
                    "campaign.name",
                    "campaign.status",
                    "campaign.advertising_channel_type",
                    "campaign.bidding_strategy_type",
                    "campaign.geo_target_type_setting.positive_geo_target_type",
                    "campaign.network_settings.target_content_network"
                ],
                "data": campaign_rows
            }),
        ),
        (
            DatasetKind::CampaignMetrics,
            json!({
                "columns": [
                    "campaign.id",
                    "metrics.cost_micros",
                    "metrics.impressions",
                    "metrics.clicks",
                    "metrics.conversions",
                    "metrics.search_impression_share"
                ],
                "data": metric_rows
            }),
        ),
        (
            DatasetKind::Keywords,
            json!({
                "columns": [
                    "ad_group_criterion.criterion_id",
                    "ad_group_criterion.status",
                    "ad_group_criterion.keyword.text",
                    "ad_group_criterion.keyword.match_type",
                    "ad_group_criterion.quality_info.quality_score",
                    "ad_group.id",
                    "metrics.cost_micros",
                    "metrics.impressions",
                    "metrics.clicks",
                    "metrics.conversions"
                ],
                "data": keyword_rows
            }),
        ),
        (
            DatasetKind::Ads,
            json!({
                "columns": [
                    "ad_group_ad.ad.id",
                    "ad_group_ad.ad.type",
                    "ad_group_ad.status",
                    "ad_group_ad.ad_strength",
                    "ad_group.id",
                    "campaign.id",
                    "metrics.impressions",
                    "metrics.clicks"
                ],
                "data": ad_rows
            }),
        ),
        (
            DatasetKind::ShoppingPerformance,
            json!({
                "columns": [
                    "segments.product_item_id",
                    "segments.product_title",
                    "metrics.cost_micros",
                    "metrics.conversions",
                    "metrics.conversions_value"
                ],
                "data": product_rows
            }),
        ),
    ]
}

fn generate_dataset(campaigns: usize) -> AccountDataset {
    generate_results(campaigns)
        .into_iter()
        .fold(AccountDataset::new(), |dataset, (kind, result)| {
            dataset.with_rows(kind, normalize_dataset(kind, &result))
        })
}

fn generate_bundle(index: usize, campaigns: usize) -> AccountBundle {
    let outcomes: IndexMap<DatasetKind, QueryOutcome> = generate_results(campaigns)
        .into_iter()
        .map(|(kind, result)| (kind, QueryOutcome::Rows(normalize_dataset(kind, &result))))
        .collect();
    AccountBundle::new(
        AccountIdentity::new(format!("Account {index}"), format!("100-000-{index:04}")),
        outcomes,
    )
}

fn bench_normalize(c: &mut Criterion) {
    let results = generate_results(50);
    let (kind, keywords) = &results[2];

    c.bench_function("normalize_2000_keywords", |b| {
        b.iter(|| black_box(normalize_dataset(*kind, black_box(keywords))));
    });
}

fn bench_audit(c: &mut Criterion) {
    let mut group = c.benchmark_group("audit_account");
    let engine = AuditEngine::default();
    let identity = AccountIdentity::new("Bench Roofing", "123-456-7890");

    for campaigns in [10, 50, 200] {
        let dataset = generate_dataset(campaigns);
        group.bench_with_input(BenchmarkId::from_parameter(campaigns), &dataset, |b, dataset| {
            b.iter(|| black_box(engine.audit(&identity, black_box(dataset), run_date())));
        });
    }
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let engine = AuditEngine::default();
    let bundles: Vec<AccountBundle> = (0..32).map(|i| generate_bundle(i, 25)).collect();
    // sanity check outside the timed loop
    assert_eq!(bundles[0].collect().failed_count(), 0);

    c.bench_function("audit_all_32_accounts", |b| {
        b.iter(|| black_box(engine.audit_all(black_box(&bundles), run_date())));
    });
}

criterion_group!(benches, bench_normalize, bench_audit, bench_batch);
criterion_main!(benches);
