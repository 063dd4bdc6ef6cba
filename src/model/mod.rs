//! Data model shared by the ingest layer, the audit engine and report sinks.
//!
//! - [`AccountDataset`] holds the thirteen upstream datasets of one account as
//!   [`NormalizedRow`]s, together with the datasets whose fetch failed.
//! - [`schema`] lists the column paths each dataset is expected to carry.
//! - [`AuditReport`] and its parts are the downstream contract.

mod dataset;
mod report;
mod row;
pub mod schema;

pub use dataset::*;
pub use report::*;
pub use row::*;
