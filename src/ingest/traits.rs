//! Upstream collaborator seam.

use crate::model::{AccountDataset, AccountIdentity, DatasetKind, QueryOutcome};

/// Supplier of per-account query results.
///
/// Implementations wrap whatever transport fetched the data; the audit only
/// sees tagged outcomes per dataset.
pub trait DatasetSource {
    /// Identity of the account these datasets belong to
    fn identity(&self) -> AccountIdentity;

    /// Outcome of the query behind one dataset
    fn fetch(&self, kind: DatasetKind) -> QueryOutcome;

    /// Fetch every dataset into an [`AccountDataset`].
    ///
    /// Failed queries are kept as failures; they read as empty. The engine
    /// logs them when it audits the dataset.
    fn collect(&self) -> AccountDataset {
        let mut dataset = AccountDataset::new();
        for &kind in DatasetKind::all() {
            dataset.record(kind, self.fetch(kind));
        }
        dataset
    }
}
