//! Shared utilities.

mod format;

pub use format::{count, money, pct, percent, quantity, ratio, round1, round2, round_to};
