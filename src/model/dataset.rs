//! Per-account datasets as delivered by the upstream reporting collaborator.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::row::NormalizedRow;

/// The fixed set of datasets fetched for every account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    Campaigns,
    CampaignBudgets,
    AccountMetrics,
    CampaignMetrics,
    ConversionActions,
    AdGroups,
    Keywords,
    Ads,
    Assets,
    GeoTargeting,
    ShoppingPerformance,
    NegativeLists,
    UserLists,
}

impl DatasetKind {
    /// All dataset kinds in canonical order
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Campaigns,
            Self::CampaignBudgets,
            Self::AccountMetrics,
            Self::CampaignMetrics,
            Self::ConversionActions,
            Self::AdGroups,
            Self::Keywords,
            Self::Ads,
            Self::Assets,
            Self::GeoTargeting,
            Self::ShoppingPerformance,
            Self::NegativeLists,
            Self::UserLists,
        ]
    }

    /// Dataset name as used by upstream bundles
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Campaigns => "campaigns",
            Self::CampaignBudgets => "campaign_budgets",
            Self::AccountMetrics => "account_metrics",
            Self::CampaignMetrics => "campaign_metrics",
            Self::ConversionActions => "conversion_actions",
            Self::AdGroups => "ad_groups",
            Self::Keywords => "keywords",
            Self::Ads => "ads",
            Self::Assets => "assets",
            Self::GeoTargeting => "geo_targeting",
            Self::ShoppingPerformance => "shopping_performance",
            Self::NegativeLists => "negative_lists",
            Self::UserLists => "user_lists",
        }
    }

    /// Parse a dataset name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of one upstream query.
///
/// Keeps "the query returned no rows" apart from "the query failed", so a
/// failed fetch is visible to the caller even though the audit treats it as
/// an empty dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// Query succeeded (possibly with zero rows)
    Rows(Vec<NormalizedRow>),
    /// Query failed upstream
    QueryFailed { reason: String },
}

impl QueryOutcome {
    /// Whether this outcome is a failure
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::QueryFailed { .. })
    }
}

/// Identity of the audited account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountIdentity {
    /// Display name
    pub name: String,
    /// Customer id, e.g. `123-456-7890`
    pub customer_id: String,
}

impl AccountIdentity {
    pub fn new(name: impl Into<String>, customer_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            customer_id: customer_id.into(),
        }
    }

    /// Digits of the customer id, `1234567890` for `123-456-7890`
    #[must_use]
    pub fn customer_digits(&self) -> String {
        self.customer_id
            .chars()
            .filter(char::is_ascii_digit)
            .collect()
    }

    /// Slug qualified by the customer id, distinct for accounts sharing a name
    #[must_use]
    pub fn qualified_slug(&self) -> String {
        let slug = self.slug();
        let digits = self.customer_digits();
        if digits.is_empty() || slug.ends_with(&digits) {
            slug
        } else {
            format!("{slug}-{digits}")
        }
    }

    /// Filesystem-friendly slug derived from the account name.
    ///
    /// Names without ASCII letters or digits fall back to the customer id.
    #[must_use]
    pub fn slug(&self) -> String {
        let mut slug = String::with_capacity(self.name.len());
        let mut pending_dash = false;
        for ch in self.name.chars() {
            if ch.is_ascii_alphanumeric() {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                pending_dash = false;
                slug.push(ch.to_ascii_lowercase());
            } else {
                pending_dash = true;
            }
        }
        if !slug.is_empty() {
            return slug;
        }
        let digits = self.customer_digits();
        if digits.is_empty() {
            "account".to_string()
        } else {
            format!("account-{digits}")
        }
    }
}

/// All datasets for one account.
///
/// Every kind is readable: absent or failed datasets read as empty slices.
#[derive(Debug, Clone, Default)]
pub struct AccountDataset {
    rows: IndexMap<DatasetKind, Vec<NormalizedRow>>,
    failed: IndexMap<DatasetKind, String>,
}

impl AccountDataset {
    /// Create an empty dataset
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for the rows of one dataset
    #[must_use]
    pub fn with_rows(mut self, kind: DatasetKind, rows: Vec<NormalizedRow>) -> Self {
        self.set_rows(kind, rows);
        self
    }

    /// Replace the rows of one dataset
    pub fn set_rows(&mut self, kind: DatasetKind, rows: Vec<NormalizedRow>) {
        self.failed.shift_remove(&kind);
        self.rows.insert(kind, rows);
    }

    /// Record the outcome of an upstream query
    pub fn record(&mut self, kind: DatasetKind, outcome: QueryOutcome) {
        match outcome {
            QueryOutcome::Rows(rows) => self.set_rows(kind, rows),
            QueryOutcome::QueryFailed { reason } => {
                self.rows.shift_remove(&kind);
                self.failed.insert(kind, reason);
            }
        }
    }

    /// Rows of a dataset (empty when absent or failed)
    #[must_use]
    pub fn rows(&self, kind: DatasetKind) -> &[NormalizedRow] {
        self.rows.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether a dataset has no rows
    #[must_use]
    pub fn is_empty(&self, kind: DatasetKind) -> bool {
        self.rows(kind).is_empty()
    }

    /// Datasets whose upstream query failed, with the failure reason
    pub fn failed(&self) -> impl Iterator<Item = (DatasetKind, &str)> + '_ {
        self.failed.iter().map(|(kind, reason)| (*kind, reason.as_str()))
    }

    /// Number of failed datasets
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_names_roundtrip() {
        assert_eq!(DatasetKind::all().len(), 13);
        for kind in DatasetKind::all() {
            assert_eq!(DatasetKind::from_name(kind.name()), Some(*kind));
        }
        assert_eq!(DatasetKind::from_name("search_terms"), None);
    }

    #[test]
    fn test_absent_dataset_reads_empty() {
        let dataset = AccountDataset::new();
        assert!(dataset.rows(DatasetKind::Keywords).is_empty());
        assert_eq!(dataset.failed_count(), 0);
    }

    #[test]
    fn test_failed_query_is_distinguished_from_empty() {
        let mut dataset = AccountDataset::new();
        dataset.record(DatasetKind::Ads, QueryOutcome::Rows(Vec::new()));
        dataset.record(
            DatasetKind::Keywords,
            QueryOutcome::QueryFailed {
                reason: "PERMISSION_DENIED".to_string(),
            },
        );

        assert!(dataset.is_empty(DatasetKind::Ads));
        assert!(dataset.is_empty(DatasetKind::Keywords));
        let failed: Vec<_> = dataset.failed().collect();
        assert_eq!(failed, vec![(DatasetKind::Keywords, "PERMISSION_DENIED")]);
    }

    #[test]
    fn test_slug() {
        let id = AccountIdentity::new("Kyle Dynamic Tree Solutions", "1");
        assert_eq!(id.slug(), "kyle-dynamic-tree-solutions");
        let id = AccountIdentity::new("  Service D'Agent / Agustine ", "1");
        assert_eq!(id.slug(), "service-d-agent-agustine");
        assert_eq!(AccountIdentity::new("!!", "").slug(), "account");
    }

    #[test]
    fn test_slug_falls_back_to_customer_id() {
        let tokyo = AccountIdentity::new("東京歯科", "111-111-1111");
        let osaka = AccountIdentity::new("大阪歯科", "222-222-2222");
        assert_eq!(tokyo.slug(), "account-1111111111");
        assert_ne!(tokyo.slug(), osaka.slug());
    }

    #[test]
    fn test_qualified_slug() {
        let acme = AccountIdentity::new("Acme Co.", "123-456-7890");
        assert_eq!(acme.qualified_slug(), "acme-co-1234567890");
        // already carries the digits
        let unnamed = AccountIdentity::new("東京歯科", "111-111-1111");
        assert_eq!(unnamed.qualified_slug(), "account-1111111111");
        assert_eq!(AccountIdentity::new("Acme", "").qualified_slug(), "acme");
    }
}
