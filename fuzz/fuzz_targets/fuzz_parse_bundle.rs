#![no_main]
use ads_audit::ingest::parse_bundle_str;
use ads_audit::{AuditEngine, DatasetSource};
use libfuzzer_sys::fuzz_target;

/// Fuzz bundle parsing and the audit that follows it.
///
/// Bundles that parse must audit cleanly whatever their datasets contain.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(bundle) = parse_bundle_str(s) {
            let date = chrono::NaiveDate::default();
            let _ = AuditEngine::default().audit(&bundle.identity(), &bundle.collect(), date);
        }
    }
});
