//! Integration test: every property holds against the exported symbols.
//!
//! Run: cargo test -p fortify-shim-harness --test properties_test

use fortify_shim_harness::config::HarnessConfig;
use fortify_shim_harness::properties::{Property, run_all, run_property};
use fortify_shim_harness::report::VerificationReport;
use fortify_shim_harness::structured_log::Outcome;

fn quick_config() -> HarnessConfig {
    HarnessConfig {
        trials: 64,
        max_region_len: 128,
        wait_timeout_ms: 20,
        tolerance_ms: 2_000,
        ..HarnessConfig::default()
    }
}

#[test]
fn all_properties_pass() {
    let results = run_all(&quick_config());
    assert_eq!(results.len(), Property::ALL.len());
    for result in &results {
        assert!(
            result.passed(),
            "{} failed: {}",
            result.property.id(),
            result.detail
        );
        assert!(result.cases >= 1);
    }
    let report = VerificationReport::new("test-run", &quick_config(), results);
    assert!(report.all_passed());
}

#[test]
fn randomized_properties_pass_across_seeds() {
    for seed in [0u64, 1, 0xDEAD_BEEF, u64::MAX] {
        let config = HarnessConfig {
            seed,
            ..quick_config()
        };
        for property in Property::ALL.into_iter().filter(|p| p.randomized()) {
            let result = run_property(property, &config);
            assert!(
                result.passed(),
                "seed={seed:#x} {}: {}",
                property.id(),
                result.detail
            );
        }
    }
}

#[test]
fn declared_size_property_counts_every_declaration() {
    let config = HarnessConfig {
        trials: 10,
        ..quick_config()
    };
    let result = run_property(Property::DeclaredSizeIgnored, &config);
    assert_eq!(result.outcome, Outcome::Pass);
    assert_eq!(result.cases, 60);
}

#[test]
fn empty_wait_honours_configured_timeout() {
    let config = HarnessConfig {
        wait_timeout_ms: 30,
        ..quick_config()
    };
    let result = run_property(Property::EmptyWaitTimesOut, &config);
    assert!(result.passed(), "{}", result.detail);
    assert!(result.duration_ms >= 30);
}

#[test]
fn failure_sentinel_records_errno() {
    let result = run_property(Property::WaitFailureSentinel, &quick_config());
    assert!(result.passed(), "{}", result.detail);
    assert_eq!(result.errno, Some(libc::EINVAL));
}
