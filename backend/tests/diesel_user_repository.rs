//! Integration tests for `DieselUserRepository` against embedded PostgreSQL.
//!
//! Every test runs on its own migrated database cloned from a shared
//! template. Cluster setup failures fail the suite unless
//! `SKIP_TEST_CLUSTER=1` is set.
//!
//! Cluster provisioning blocks, so the tests are synchronous and drive the
//! repository through a runtime owned by the test context.

use admin_api::domain::ports::{UserPersistenceError, UserRepository};
use admin_api::domain::{NewUser, User, UserId};
use admin_api::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
use futures_util::future::join_all;
use pg_embedded_setup_unpriv::TemporaryDatabase;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;
use uuid::Uuid;

mod support;

use support::{handle_cluster_setup_failure, provision_database, shared_cluster};

const CONCURRENT_CALLERS: usize = 8;

// Field order is drop order: the pool closes before the runtime and the
// database is dropped last, once nothing is connected to it.
struct TestContext {
    repository: DieselUserRepository,
    runtime: Runtime,
    _database: TemporaryDatabase,
}

fn setup_test_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster()?;
    let database = provision_database(cluster)?;
    let config = PoolConfig::new(database.url()).with_max_size(CONCURRENT_CALLERS as u32);
    let pool = runtime
        .block_on(DbPool::connect(config))
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        repository: DieselUserRepository::new(pool),
        runtime,
        _database: database,
    })
}

#[fixture]
fn context() -> Option<TestContext> {
    match setup_test_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

#[fixture]
fn fresh_user() -> User {
    let id = Uuid::new_v4().to_string();
    User::new(
        UserId::new(id.clone()),
        "Diesel Test User",
        format!("{id}@acme.com"),
    )
}

#[rstest]
fn find_or_create_inserts_once(context: Option<TestContext>, fresh_user: User) {
    let Some(ctx) = context else {
        return;
    };
    let repo = &ctx.repository;

    let ((first, created_first), (second, created_second)) = ctx.runtime.block_on(async {
        let first = repo.find_or_create_user(&fresh_user).await.expect("first call");
        let second = repo.find_or_create_user(&fresh_user).await.expect("second call");
        (first, second)
    });

    assert!(created_first);
    assert!(!created_second);
    assert_eq!(first, second);
    assert_eq!(first.name(), fresh_user.name());
}

#[rstest]
fn concurrent_find_or_create_inserts_exactly_once(
    context: Option<TestContext>,
    fresh_user: User,
) {
    let Some(ctx) = context else {
        return;
    };

    let outcomes = ctx.runtime.block_on(async {
        let calls = (0..CONCURRENT_CALLERS).map(|_| {
            let repo = ctx.repository.clone();
            let candidate = fresh_user.clone();
            tokio::spawn(async move { repo.find_or_create_user(&candidate).await })
        });
        join_all(calls).await
    });

    let mut inserted = 0;
    for outcome in outcomes {
        match outcome.expect("caller task completes") {
            Ok((user, created)) => {
                assert_eq!(user.id(), fresh_user.id());
                assert_eq!(user.name(), fresh_user.name());
                if created {
                    inserted += 1;
                }
            }
            // A caller that loses the insert race reports the unique violation.
            Err(UserPersistenceError::Conflict { .. }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(inserted, 1);

    let stored = ctx
        .runtime
        .block_on(ctx.repository.get_all())
        .expect("get_all");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id(), fresh_user.id());
}

#[rstest]
fn lookups_return_none_for_unknown_rows(context: Option<TestContext>) {
    let Some(ctx) = context else {
        return;
    };
    let unknown = Uuid::new_v4().to_string();

    let (by_id, by_email) = ctx.runtime.block_on(async {
        let by_id = ctx
            .repository
            .find_by_id(&UserId::new(unknown.clone()))
            .await
            .expect("find_by_id");
        let by_email = ctx
            .repository
            .find_by_email(&format!("{unknown}@nowhere.test"))
            .await
            .expect("find_by_email");
        (by_id, by_email)
    });

    assert_eq!(by_id, None);
    assert_eq!(by_email, None);
}

#[rstest]
fn empty_store_lists_nothing(context: Option<TestContext>) {
    let Some(ctx) = context else {
        return;
    };

    let users = ctx
        .runtime
        .block_on(ctx.repository.get_all())
        .expect("get_all");

    assert!(users.is_empty());
}

#[rstest]
fn created_user_is_listed_and_found_by_email(context: Option<TestContext>) {
    let Some(ctx) = context else {
        return;
    };
    let repo = &ctx.repository;
    let email = format!("{}@acme.com", Uuid::new_v4());

    let (created, listed, found) = ctx.runtime.block_on(async {
        let created = repo
            .create(&NewUser::new("Ada", email.clone()))
            .await
            .expect("create");
        let listed = repo.get_all().await.expect("get_all");
        let found = repo.find_by_email(&email).await.expect("find_by_email");
        (created, listed, found)
    });

    assert!(!created.id().as_ref().is_empty());
    assert_eq!(listed, vec![created.clone()]);
    let found = found.expect("user present");
    assert_eq!(found.id(), created.id());
    assert_eq!(found.password(), "");
}

#[rstest]
fn update_and_delete_report_absence(context: Option<TestContext>, fresh_user: User) {
    let Some(ctx) = context else {
        return;
    };

    let (updated, deleted) = ctx.runtime.block_on(async {
        let updated = ctx.repository.update(&fresh_user).await.expect("update");
        let deleted = ctx
            .repository
            .delete(fresh_user.id())
            .await
            .expect("delete");
        (updated, deleted)
    });

    assert_eq!(updated, None);
    assert!(!deleted);
}

#[rstest]
fn update_overwrites_stored_fields(context: Option<TestContext>, fresh_user: User) {
    let Some(ctx) = context else {
        return;
    };
    let repo = &ctx.repository;
    let renamed = User::new(fresh_user.id().clone(), "Renamed", fresh_user.email());

    let (updated, reloaded, deleted, after_delete) = ctx.runtime.block_on(async {
        repo.find_or_create_user(&fresh_user).await.expect("seed");
        let updated = repo.update(&renamed).await.expect("update");
        let reloaded = repo.find_by_id(fresh_user.id()).await.expect("find_by_id");
        let deleted = repo.delete(fresh_user.id()).await.expect("delete");
        let after_delete = repo.find_by_id(fresh_user.id()).await.expect("find_by_id");
        (updated, reloaded, deleted, after_delete)
    });

    assert_eq!(updated, Some(renamed.clone()));
    assert_eq!(reloaded.expect("user present").name(), "Renamed");
    assert!(deleted);
    assert_eq!(after_delete, None);
}
