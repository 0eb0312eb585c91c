//! Embedded PostgreSQL for integration suites.
//!
//! One cluster is shared per test binary. Each test gets its own database
//! cloned from a template that already has `migrations/` applied; the
//! template name carries a hash of the migrations directory so schema edits
//! produce a fresh template instead of reusing a stale one.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pg_embedded_setup_unpriv::test_support::{hash_directory, shared_cluster_handle};
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use uuid::Uuid;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const TEMPLATE_NAME_PREFIX: &str = "admin_api_template";
const SETUP_RETRIES: usize = 5;
const SETUP_RETRY_DELAY: Duration = Duration::from_millis(500);

fn migrations_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations")
}

fn template_database_name() -> Result<String, String> {
    let hash = hash_directory(migrations_dir()).map_err(|err| format!("hash migrations: {err}"))?;
    let short_hash = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_NAME_PREFIX}_{short_hash}"))
}

fn retry<T>(mut attempt: impl FnMut(usize) -> Result<T, String>) -> Result<T, String> {
    let mut last_error = String::from("no attempt made");
    for number in 1..=SETUP_RETRIES {
        match attempt(number) {
            Ok(value) => return Ok(value),
            Err(error) => last_error = error,
        }
        if number < SETUP_RETRIES {
            std::thread::sleep(SETUP_RETRY_DELAY);
        }
    }
    Err(last_error)
}

/// Start, or reuse, the cluster shared by every test in this binary.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    retry(|_| shared_cluster_handle().map_err(|err| format!("start cluster: {err:?}")))
}

/// Run every pending migration against `url`.
pub fn migrate_schema(url: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(url).map_err(|err| format!("connect: {err:?}"))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| format!("migration: {err:?}"))?;
    Ok(())
}

fn ensure_template_database(cluster: &ClusterHandle) -> Result<String, String> {
    let template_name = template_database_name()?;
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(template_name.as_str())
        .map_err(|err| format!("template check: {err:?}"))?;
    if !exists {
        cluster
            .create_database(template_name.as_str())
            .map_err(|err| format!("create template: {err:?}"))?;
        migrate_schema(&cluster.connection().database_url(&template_name))?;
    }
    Ok(template_name)
}

/// Create a migrated database for one test; it is dropped with the handle.
pub fn provision_database(cluster: &ClusterHandle) -> Result<TemporaryDatabase, String> {
    retry(|attempt| {
        let template_name = ensure_template_database(cluster)
            .map_err(|err| format!("attempt {attempt}/{SETUP_RETRIES}: {err}"))?;
        let db_name = format!("test_{}", Uuid::new_v4().simple());
        cluster
            .temporary_database_from_template(db_name.as_str(), template_name.as_str())
            .map_err(|err| {
                format!("create database from template: attempt {attempt}/{SETUP_RETRIES}: {err:?}")
            })
    })
}
