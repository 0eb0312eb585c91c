//! Shared helpers for integration suites.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! helpers they share live here and are pulled in with `mod support;`.

pub mod cluster_skip;
pub mod embedded_postgres;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{provision_database, shared_cluster};
