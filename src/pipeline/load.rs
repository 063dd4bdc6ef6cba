//! Account bundle loading stage.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;

use super::PipelineError;
use crate::ingest::{load_bundle, AccountBundle};

/// Load an account bundle with context for error messages
pub fn load_bundle_with_context(path: &Path, quiet: bool) -> Result<AccountBundle> {
    if !quiet {
        tracing::info!("Loading account bundle: {:?}", path);
    }

    let bundle = load_bundle(path)
        .with_context(|| format!("Failed to load account bundle: {}", path.display()))?;

    if !quiet {
        tracing::info!(
            "Loaded {} datasets for {}",
            bundle.dataset_count(),
            bundle.account().name
        );
    }

    Ok(bundle)
}

/// Bundles loaded for a batch run
#[derive(Debug, Default)]
pub struct LoadedBundles {
    /// Successfully loaded bundles, in input order
    pub bundles: Vec<AccountBundle>,
    /// Failures, in input order
    pub failures: Vec<PipelineError>,
}

/// Load many bundles in parallel.
///
/// A bundle that fails to load is recorded and does not stop the others.
pub fn load_bundles(paths: &[PathBuf], quiet: bool) -> LoadedBundles {
    let results: Vec<_> = paths
        .par_iter()
        .map(|path| {
            load_bundle_with_context(path, quiet).map_err(|source| PipelineError::LoadFailed {
                path: path.display().to_string(),
                source,
            })
        })
        .collect();

    let mut loaded = LoadedBundles::default();
    for result in results {
        match result {
            Ok(bundle) => loaded.bundles.push(bundle),
            Err(err) => {
                tracing::error!("{err:#}");
                loaded.failures.push(err);
            }
        }
    }
    loaded
}
