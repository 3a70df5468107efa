use docket::connection::MemoryConnection;
use docket::docket::Docket;
use docket::errors::ErrorKind;
use docket::repository::EntityRepository;
use docket::store::IndexDescriptor;
use docket_int_test::test_util::{cleanup, create_test_context, run_test, TestContext};

use crate::repository::{named_user, Follow, User};

#[test]
fn test_first_repository_bootstraps_schema() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.db().store();
            assert!(!store.has_collection("User")?);

            let _: EntityRepository<User> = ctx.db().repository()?;
            assert!(store.has_collection("User")?);

            let users = store.open_collection("User")?;
            assert!(users.has_index(&IndexDescriptor::single("UserName"))?);
            assert!(users.has_index(&IndexDescriptor::single("Email"))?);
            assert!(users.has_index(&IndexDescriptor::single("DisplayName"))?);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_relation_schema_gets_pair_index() {
    run_test(
        create_test_context,
        |ctx| {
            ctx.db().relation_repository::<Follow>()?;

            let follows = ctx.db().store().open_collection("Follow")?;
            assert!(follows.has_index(&IndexDescriptor::composite("OwnerId", "FollowerId"))?);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_bootstrap_is_idempotent() {
    run_test(
        create_test_context,
        |ctx| {
            let first: EntityRepository<User> = ctx.db().repository()?;
            first.create(&named_user("alice"))?;

            // a second repository request must not disturb existing data
            let second: EntityRepository<User> = ctx.db().repository()?;
            assert_eq!(second.size()?, 1);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_auto_create_disabled_is_fatal_for_missing_schema() {
    let db = Docket::builder()
        .auto_create_schema(false)
        .open(MemoryConnection::new())
        .unwrap();

    let error = db.repository::<User>().unwrap_err();
    assert_eq!(error.kind(), &ErrorKind::SchemaMissing);
    db.close().unwrap();
}

#[test]
fn test_auto_create_disabled_accepts_prebuilt_schema() {
    let connection = MemoryConnection::new();

    let bootstrap = Docket::builder().open(connection.clone()).unwrap();
    bootstrap.repository::<User>().unwrap();

    let db = Docket::builder()
        .auto_create_schema(false)
        .open(connection)
        .unwrap();
    let users = db.repository::<User>().unwrap();
    users.create(&named_user("alice")).unwrap();
    db.close().unwrap();
}

#[test]
fn test_clear_rebuilds_registered_schemas() {
    run_test(
        create_test_context,
        |ctx: TestContext| {
            let users: EntityRepository<User> = ctx.db().repository()?;
            users.create(&named_user("alice"))?;

            ctx.db().clear()?;

            let store = ctx.db().store();
            assert!(store.has_collection("User")?);
            let collection = store.open_collection("User")?;
            assert_eq!(collection.size()?, 0);
            assert!(collection.has_index(&IndexDescriptor::single("UserName"))?);
            Ok(())
        },
        cleanup,
    )
}
