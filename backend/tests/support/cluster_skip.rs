//! Skip policy for suites that need the embedded PostgreSQL cluster.
//!
//! Setup failures fail the suite unless `SKIP_TEST_CLUSTER` is set, so a
//! broken cluster never shows up as a passing run.

const SKIP_TEST_CLUSTER_ENV: &str = "SKIP_TEST_CLUSTER";

/// Returns true when `SKIP_TEST_CLUSTER` is "1", "true" or "yes" (any case).
pub fn should_skip_test_cluster() -> bool {
    std::env::var(SKIP_TEST_CLUSTER_ENV)
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Returns `None` after printing a skip marker when skipping is allowed;
/// panics otherwise.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set {SKIP_TEST_CLUSTER_ENV}=1 to skip.");
    }
}
