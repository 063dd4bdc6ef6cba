//! Audit orchestrator.

use chrono::NaiveDate;
use rayon::prelude::*;

use super::catalog;
use super::industry::classify;
use super::products::analyze_products;
use super::quick_wins::select_quick_wins;
use super::recommendations::build_recommendations;
use super::scorer::{verdict, Scorer};
use super::snapshot::build_snapshot;
use crate::config::{AuditConfig, Validatable};
use crate::error::{AuditError, Result};
use crate::ingest::DatasetSource;
use crate::model::{
    AccountDataset, AccountIdentity, AuditReport, Category, CategoryKind, ReportParts,
};

/// Runs the full audit of an account against an immutable configuration.
///
/// The engine holds no per-run state, so one instance can audit many
/// accounts concurrently.
#[derive(Debug, Clone, Default)]
pub struct AuditEngine {
    config: AuditConfig,
}

impl AuditEngine {
    /// Create an engine with the given configuration
    #[must_use]
    pub fn new(config: AuditConfig) -> Self {
        Self { config }
    }

    /// Create an engine, rejecting an invalid configuration
    pub fn validated(config: AuditConfig) -> Result<Self> {
        let errors = config.validate();
        if errors.is_empty() {
            return Ok(Self::new(config));
        }
        let message = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(AuditError::config(message))
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Audit one account.
    ///
    /// Never fails: absent or failed datasets read as empty and the checks
    /// depending on them degrade to N/A or their default result.
    pub fn audit(
        &self,
        identity: &AccountIdentity,
        dataset: &AccountDataset,
        date: NaiveDate,
    ) -> AuditReport {
        for (kind, reason) in dataset.failed() {
            tracing::warn!(
                account = %identity.name,
                dataset = %kind,
                "dataset unavailable, auditing without it: {reason}"
            );
        }

        let industry = classify(&identity.name, dataset);
        let snapshot = build_snapshot(dataset);
        let categories = self.evaluate_categories(dataset);

        let scorer = Scorer::new(&self.config.scoring);
        let (health_score, grade) = scorer.health(&categories);

        let plan = &self.config.thresholds.plan;
        let products = analyze_products(dataset, &self.config.thresholds.products);
        let quick_wins = select_quick_wins(&categories, plan.quick_win_limit);
        let recommendations = build_recommendations(&categories, &snapshot, plan);

        tracing::info!(
            account = %identity.name,
            %industry,
            health_score,
            %grade,
            quick_wins = quick_wins.len(),
            "audited account"
        );

        AuditReport::from_parts(ReportParts {
            identity: identity.clone(),
            date,
            industry,
            health_score,
            grade,
            verdict: verdict(grade).to_string(),
            snapshot,
            categories,
            top_wasted_products: products.top_wasted,
            top_performing_products: products.top_performing,
            quick_wins,
            recommendations,
        })
    }

    /// Collect every dataset from a source and audit it
    pub fn audit_source(&self, source: &dyn DatasetSource, date: NaiveDate) -> AuditReport {
        let dataset = source.collect();
        self.audit(&source.identity(), &dataset, date)
    }

    /// Audit many accounts in parallel; output order matches input order
    pub fn audit_all<S>(&self, sources: &[S], date: NaiveDate) -> Vec<AuditReport>
    where
        S: DatasetSource + Sync,
    {
        sources
            .par_iter()
            .map(|source| self.audit_source(source, date))
            .collect()
    }

    fn evaluate_categories(&self, dataset: &AccountDataset) -> Vec<Category> {
        let scorer = Scorer::new(&self.config.scoring);
        CategoryKind::all()
            .iter()
            .map(|&kind| {
                let checks = catalog::evaluate(kind, dataset, &self.config.thresholds);
                scorer.score_category(kind, checks)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CheckResult, DatasetKind, Grade, Industry, QueryOutcome};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AuditEngine>();
    }

    #[test]
    fn test_empty_account_still_has_full_report() {
        let engine = AuditEngine::default();
        let identity = AccountIdentity::new("Acme Widgets", "123-456-7890");
        let report = engine.audit(&identity, &AccountDataset::new(), date());

        assert_eq!(report.account(), "Acme Widgets");
        assert_eq!(report.industry(), Industry::General);
        assert_eq!(report.categories().len(), 6);
        assert_eq!(report.recommendations().len(), 3);
        assert!(report.quick_wins().len() <= 7);
        assert!(report.top_wasted_products().is_empty());
        for category in report.categories() {
            assert!(!category.checks.is_empty());
        }
    }

    #[test]
    fn test_failed_dataset_reads_as_empty() {
        let mut dataset = AccountDataset::new();
        dataset.record(
            DatasetKind::Keywords,
            QueryOutcome::QueryFailed {
                reason: "PERMISSION_DENIED".to_string(),
            },
        );
        let report = AuditEngine::default().audit(
            &AccountIdentity::new("Acme", "1"),
            &dataset,
            date(),
        );
        assert_eq!(report.snapshot().total_keywords, None);
        let g20 = report.check("G20").unwrap();
        assert_eq!(g20.result, CheckResult::NotApplicable);
    }

    #[test]
    fn test_validated_rejects_bad_weights() {
        let mut config = AuditConfig::default();
        config.scoring.category_weights.conversion_tracking = 0.9;
        assert!(AuditEngine::validated(config).is_err());
        assert!(AuditEngine::validated(AuditConfig::default()).is_ok());
    }

    #[test]
    fn test_health_grade_is_consistent() {
        let report = AuditEngine::default().audit(
            &AccountIdentity::new("Acme", "1"),
            &AccountDataset::new(),
            date(),
        );
        let expected = AuditConfig::default()
            .scoring
            .grade_bands
            .grade(f64::from(report.health_score()));
        if report.health_score() > 0 {
            assert_eq!(report.grade(), expected);
        } else {
            assert!(matches!(report.grade(), Grade::F));
        }
    }
}
