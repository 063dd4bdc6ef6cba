#![no_main]
use ads_audit::ingest::{normalize_dataset, normalize_query_result};
use ads_audit::DatasetKind;
use libfuzzer_sys::fuzz_target;

/// Fuzz columnar result normalization.
///
/// Any JSON value is a possible upstream payload; the normalizer must drop
/// malformed parts rather than panic, for every dataset schema.
fuzz_target!(|data: &[u8]| {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) {
        let _ = normalize_query_result(&value);
        for kind in DatasetKind::all() {
            let _ = normalize_dataset(*kind, &value);
        }
    }
});
