//! Upstream data ingestion.
//!
//! Raw columnar query results are normalized into [`crate::model::NormalizedRow`]s
//! and gathered per account through the [`DatasetSource`] seam. Account
//! bundle files are the file-based source used by the CLI.

mod bundle;
mod normalize;
mod traits;

pub use bundle::{load_bundle, parse_bundle_str, parse_bundle_value, AccountBundle};
pub use normalize::{normalize_dataset, normalize_query_result};
pub use traits::DatasetSource;
