//! Account audit: check catalog, scoring and action planning.
//!
//! [`AuditEngine`] ties the pieces together:
//!
//! 1. [`industry::classify`] labels the account.
//! 2. [`catalog::evaluate`] runs the six category rule sets.
//! 3. [`Scorer`] turns checks into category scores, a health score and a grade.
//! 4. [`snapshot::build_snapshot`] and [`products::analyze_products`] summarize
//!    the raw numbers.
//! 5. [`quick_wins::select_quick_wins`] and
//!    [`recommendations::build_recommendations`] build the action plan.

pub mod catalog;
mod engine;
pub mod industry;
pub mod products;
pub mod quick_wins;
pub mod recommendations;
mod scorer;
pub mod snapshot;
mod totals;

pub use engine::AuditEngine;
pub use industry::classify;
pub use products::{analyze_products, ProductRanking};
pub use quick_wins::select_quick_wins;
pub use recommendations::build_recommendations;
pub use scorer::{verdict, Scorer};
pub use snapshot::build_snapshot;
pub use totals::AccountTotals;
