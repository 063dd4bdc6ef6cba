//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod audit;
mod batch;
mod config;

pub use audit::{run_audit, AuditCommand};
pub use batch::{run_batch, BatchCommand};
pub use config::{describe_config_paths, init_config, show_config, write_schema};
