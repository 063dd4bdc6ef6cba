//! Pipeline and CLI integration tests.
//!
//! These tests exercise the load → audit → report pipeline and the CLI
//! command handlers with real fixture files.

use ads_audit::cli::{run_audit, run_batch, AuditCommand, BatchCommand};
use ads_audit::config::AuditConfig;
use ads_audit::pipeline::{
    exit_codes, load_bundle_with_context, load_bundles, output_reports, OutputTarget,
};
use ads_audit::reports::report_path;
use ads_audit::AuditEngine;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join("bundles").join(name)
}

fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
}

fn config_with_out_dir(dir: &Path) -> AuditConfig {
    let mut config = AuditConfig::default();
    config.output.out_dir = Some(dir.to_path_buf());
    config
}

// ============================================================================
// Load Stage Tests
// ============================================================================

mod load_stage {
    use super::*;

    #[test]
    fn load_fixture_bundle() {
        let bundle = load_bundle_with_context(&fixture_path("pet_store_ecommerce.json"), true)
            .expect("load should succeed");
        assert_eq!(bundle.account().name, "Paws & Co Pet Supplies");
        // the unknown search_terms dataset is dropped
        assert_eq!(bundle.dataset_count(), 8);
    }

    #[test]
    fn load_missing_file_names_the_path() {
        let err = load_bundle_with_context(Path::new("/nonexistent/acme.json"), true).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/acme.json"));
    }

    #[test]
    fn load_many_keeps_failures_apart() {
        let paths = vec![
            fixture_path("roofing_broken.json"),
            PathBuf::from("/nonexistent/missing.json"),
            fixture_path("pet_store_ecommerce.json"),
        ];
        let loaded = load_bundles(&paths, true);
        assert_eq!(loaded.bundles.len(), 2);
        assert_eq!(loaded.failures.len(), 1);
    }
}

// ============================================================================
// Report Stage Tests
// ============================================================================

mod report_stage {
    use super::*;

    #[test]
    fn directory_target_writes_one_file_per_account() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_bundles(
            &[
                fixture_path("roofing_broken.json"),
                fixture_path("pet_store_ecommerce.json"),
            ],
            true,
        );
        let reports = AuditEngine::default().audit_all(&loaded.bundles, run_date());

        let written = output_reports(
            &reports,
            &OutputTarget::Directory(dir.path().to_path_buf()),
            true,
        )
        .unwrap();

        assert_eq!(written.len(), 2);
        let roofing = dir.path().join("apex-roofing-co").join("2026-03-01.json");
        let pets = dir.path().join("paws-co-pet-supplies").join("2026-03-01.json");
        assert!(roofing.exists());
        assert!(pets.exists());
        assert_eq!(report_path(dir.path(), &reports[0]), roofing);
    }

    #[test]
    fn file_target_holds_parseable_json() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("report.json");
        let bundle = load_bundle_with_context(&fixture_path("roofing_broken.json"), true).unwrap();
        let report = AuditEngine::default().audit_source(&bundle, run_date());

        output_reports(&[report], &OutputTarget::File(file.clone()), false).unwrap();

        let text = std::fs::read_to_string(&file).unwrap();
        assert!(!text.contains("\n  "), "compact output expected");
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["account"], "Apex Roofing Co");
        assert_eq!(json["categories"].as_array().unwrap().len(), 6);
    }
}

// ============================================================================
// CLI Handler Tests
// ============================================================================

mod cli_handlers {
    use super::*;

    fn audit_command(bundle: &str, output_file: PathBuf) -> AuditCommand {
        AuditCommand {
            bundle_path: fixture_path(bundle),
            output_file: Some(output_file),
            date: run_date(),
            summary: false,
            no_color: true,
            quiet: true,
        }
    }

    #[test]
    fn audit_succeeds_without_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.json");
        let code = run_audit(
            &AuditConfig::default(),
            audit_command("roofing_broken.json", output.clone()),
        )
        .unwrap();

        assert_eq!(code, exit_codes::SUCCESS);
        assert!(output.exists());
    }

    #[test]
    fn audit_below_min_score() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AuditConfig::default();
        config.output.min_score = Some(60);

        let code = run_audit(
            &config,
            audit_command("roofing_broken.json", dir.path().join("out.json")),
        )
        .unwrap();
        assert_eq!(code, exit_codes::BELOW_THRESHOLD);
    }

    #[test]
    fn audit_missing_bundle_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = run_audit(
            &AuditConfig::default(),
            audit_command("does-not-exist.json", dir.path().join("out.json")),
        );
        assert!(result.is_err());
    }

    #[test]
    fn batch_writes_reports_and_flags_load_failures() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_out_dir(dir.path());
        let command = BatchCommand {
            bundle_paths: vec![
                fixture_path("pet_store_ecommerce.json"),
                fixture_path("missing.json"),
            ],
            date: run_date(),
            summary: false,
            no_color: true,
            quiet: true,
        };

        let code = run_batch(&config, command).unwrap();
        assert_eq!(code, exit_codes::ERROR);
        assert!(dir
            .path()
            .join("paws-co-pet-supplies")
            .join("2026-03-01.json")
            .exists());
    }

    #[test]
    fn batch_keeps_accounts_with_the_same_slug_apart() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = |name: &str, customer_id: &str| {
            let path = dir.path().join(format!("{customer_id}.json"));
            let content = serde_json::json!({
                "account": { "name": name, "customerId": customer_id },
                "datasets": {}
            });
            std::fs::write(&path, content.to_string()).unwrap();
            path
        };
        let paths = vec![
            bundle("東京歯科", "111-111-1111"),
            bundle("大阪歯科", "222-222-2222"),
            bundle("Acme Co.", "333-333-3333"),
            bundle("Acme Co", "444-444-4444"),
        ];

        let out = dir.path().join("out");
        let command = BatchCommand {
            bundle_paths: paths,
            date: run_date(),
            summary: false,
            no_color: true,
            quiet: true,
        };
        let code = run_batch(&config_with_out_dir(&out), command).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);

        for slug in [
            "account-1111111111",
            "account-2222222222",
            "acme-co",
            "acme-co-4444444444",
        ] {
            assert!(
                out.join(slug).join("2026-03-01.json").exists(),
                "missing report for {slug}"
            );
        }
    }

    #[test]
    fn batch_flags_the_same_account_twice() {
        let dir = tempfile::tempdir().unwrap();
        let command = BatchCommand {
            bundle_paths: vec![
                fixture_path("pet_store_ecommerce.json"),
                fixture_path("pet_store_ecommerce.json"),
            ],
            date: run_date(),
            summary: false,
            no_color: true,
            quiet: true,
        };

        let code = run_batch(&config_with_out_dir(dir.path()), command).unwrap();
        assert_eq!(code, exit_codes::ERROR);
        assert!(dir
            .path()
            .join("paws-co-pet-supplies")
            .join("2026-03-01.json")
            .exists());
    }

    #[test]
    fn batch_needs_an_output_directory() {
        let command = BatchCommand {
            bundle_paths: vec![fixture_path("pet_store_ecommerce.json")],
            date: run_date(),
            summary: false,
            no_color: true,
            quiet: true,
        };
        assert!(run_batch(&AuditConfig::default(), command).is_err());
    }
}
