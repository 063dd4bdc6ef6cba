//! Account bundle files.
//!
//! A bundle carries one account identity plus the raw columnar result (or
//! failure) of each upstream query:
//!
//! ```json
//! { "account": { "name": "Acme", "customerId": "123-456-7890" },
//!   "datasets": {
//!     "campaigns": { "columns": ["campaign.id"], "data": [["1"]] },
//!     "keywords": { "error": "PERMISSION_DENIED" } } }
//! ```

use indexmap::IndexMap;
use serde_json::Value;
use std::path::Path;

use super::normalize::normalize_dataset;
use super::traits::DatasetSource;
use crate::error::{AuditError, ErrorContext, IngestErrorKind, Result};
use crate::model::{AccountIdentity, DatasetKind, QueryOutcome};

/// A parsed account bundle
#[derive(Debug, Clone)]
pub struct AccountBundle {
    identity: AccountIdentity,
    outcomes: IndexMap<DatasetKind, QueryOutcome>,
}

impl AccountBundle {
    /// Build a bundle from already-normalized outcomes
    #[must_use]
    pub fn new(identity: AccountIdentity, outcomes: IndexMap<DatasetKind, QueryOutcome>) -> Self {
        Self { identity, outcomes }
    }

    /// Account the bundle belongs to
    #[must_use]
    pub const fn account(&self) -> &AccountIdentity {
        &self.identity
    }

    /// Number of datasets present in the bundle
    #[must_use]
    pub fn dataset_count(&self) -> usize {
        self.outcomes.len()
    }
}

impl DatasetSource for AccountBundle {
    fn identity(&self) -> AccountIdentity {
        self.identity.clone()
    }

    fn fetch(&self, kind: DatasetKind) -> QueryOutcome {
        self.outcomes
            .get(&kind)
            .cloned()
            .unwrap_or(QueryOutcome::Rows(Vec::new()))
    }
}

/// Parse a bundle from JSON text
pub fn parse_bundle_str(content: &str) -> Result<AccountBundle> {
    let root: Value = serde_json::from_str(content)?;
    parse_bundle_value(&root)
}

/// Parse a bundle from a JSON value
pub fn parse_bundle_value(root: &Value) -> Result<AccountBundle> {
    let account = root
        .get("account")
        .ok_or_else(|| AuditError::missing_field("account", "bundle"))?;
    let name = account
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| AuditError::missing_field("name", "account"))?;
    let customer_id = match account.get("customerId") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => {
            return Err(AuditError::ingest(
                "account identity",
                IngestErrorKind::InvalidValue {
                    field: "customerId".to_string(),
                    message: format!("expected a string, got {other}"),
                },
            ))
        }
    };
    let identity = AccountIdentity::new(name, customer_id);

    let mut outcomes = IndexMap::new();
    if let Some(datasets) = root.get("datasets").and_then(Value::as_object) {
        for (dataset_name, result) in datasets {
            let Some(kind) = DatasetKind::from_name(dataset_name) else {
                tracing::warn!(account = %identity.name, dataset = %dataset_name, "ignoring unknown dataset");
                continue;
            };
            outcomes.insert(kind, outcome_of(kind, result));
        }
    }

    Ok(AccountBundle::new(identity, outcomes))
}

fn outcome_of(kind: DatasetKind, result: &Value) -> QueryOutcome {
    match result.get("error") {
        Some(Value::String(reason)) => QueryOutcome::QueryFailed {
            reason: reason.clone(),
        },
        Some(Value::Null) | None => QueryOutcome::Rows(normalize_dataset(kind, result)),
        Some(other) => QueryOutcome::QueryFailed {
            reason: other.to_string(),
        },
    }
}

/// Load a bundle file from disk
pub fn load_bundle(path: &Path) -> Result<AccountBundle> {
    let content = std::fs::read_to_string(path).map_err(|e| AuditError::io(path, e))?;
    parse_bundle_str(&content).with_context(|| format!("loading bundle {}", path.display()))
}
