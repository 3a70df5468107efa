use docket::common::{SortOrder, Value};
use docket::errors::ErrorKind;
use docket::filter::{all, field};
use docket::find_options::FindOptions;
use docket::repository::EntityRepository;
use docket_int_test::test_util::{cleanup, create_test_context, run_test};

use crate::repository::{generate_user, named_user, User};

// =============================================================================
// CREATE
// =============================================================================

#[test]
fn test_create_returns_post_write_image() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: EntityRepository<User> = ctx.db().repository()?;
            assert_eq!(repo.size()?, 0);

            let created = repo.create(&named_user("alice"))?;

            assert_eq!(created.id, Some(1));
            assert_eq!(created.user_name, "alice");
            assert_eq!(repo.size()?, 1);

            let stored = repo.get(&Value::from(1i64))?.unwrap();
            assert_eq!(stored, created);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_create_stamps_both_timestamps() {
    use docket_int_test::test_util::now;

    run_test(
        create_test_context,
        |ctx| {
            let repo: EntityRepository<User> = ctx.db().repository()?;

            let before = now();
            let created = repo.create(&named_user("alice"))?;
            let after = now();

            let users = ctx.db().store().open_collection("User")?;
            let document = users.get(&Value::from(created.id.unwrap()))?.unwrap();
            let created_date = document.created_date().unwrap();
            assert!(before <= created_date && created_date <= after);
            assert_eq!(document.created_date(), document.modified_date());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_restamps_only_modified_date() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: EntityRepository<User> = ctx.db().repository()?;
            let created = repo.create(&named_user("alice"))?;

            let users = ctx.db().store().open_collection("User")?;
            let id = Value::from(created.id.unwrap());
            let original = users.get(&id)?.unwrap();

            std::thread::sleep(std::time::Duration::from_millis(5));
            let mut changed = created.clone();
            changed.display_name = "Alice A.".to_string();
            repo.update(&changed)?;

            let updated = users.get(&id)?.unwrap();
            assert_eq!(updated.created_date(), original.created_date());
            assert!(updated.modified_date() >= original.modified_date());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_create_with_explicit_id_keeps_it() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: EntityRepository<User> = ctx.db().repository()?;

            let mut user = named_user("alice");
            user.id = Some(42);
            let created = repo.create(&user)?;
            assert_eq!(created.id, Some(42));

            // sequence is untouched by explicit ids
            let next = repo.create(&named_user("bob"))?;
            assert_eq!(next.id, Some(1));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_create_duplicate_user_name_fails() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: EntityRepository<User> = ctx.db().repository()?;
            repo.create(&named_user("alice"))?;

            let mut duplicate = named_user("alice");
            duplicate.email = "different@example.com".to_string();
            let error = repo.create(&duplicate).unwrap_err();
            assert!(matches!(error.kind(), ErrorKind::DuplicateValue { .. }));
            assert_eq!(repo.size()?, 1);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_create_duplicate_email_fails() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: EntityRepository<User> = ctx.db().repository()?;
            repo.create(&named_user("alice"))?;

            let mut duplicate = named_user("bob");
            duplicate.email = "alice@example.com".to_string();
            let error = repo.create(&duplicate).unwrap_err();
            match error.kind() {
                ErrorKind::DuplicateValue { field, .. } => assert_eq!(field, "Email"),
                other => panic!("unexpected error kind: {:?}", other),
            }
            Ok(())
        },
        cleanup,
    )
}

// =============================================================================
// UPDATE
// =============================================================================

#[test]
fn test_update_replaces_mutable_fields() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: EntityRepository<User> = ctx.db().repository()?;
            let created = repo.create(&named_user("alice"))?;

            let mut changed = created.clone();
            changed.display_name = "Alice A.".to_string();
            let updated = repo.update(&changed)?;

            assert_eq!(updated.id, created.id);
            assert_eq!(updated.display_name, "Alice A.");
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_never_overwrites_guarded_fields() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: EntityRepository<User> = ctx.db().repository()?;
            let created = repo.create(&named_user("alice"))?;

            let mut tampered = created.clone();
            tampered.password_hash = "attacker".to_string();
            let updated = repo.update(&tampered)?;
            assert_eq!(updated.password_hash, "hash");

            let stored = repo.get(&Value::from(created.id.unwrap()))?.unwrap();
            assert_eq!(stored.password_hash, "hash");
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_own_unique_values_pass() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: EntityRepository<User> = ctx.db().repository()?;
            let created = repo.create(&named_user("alice"))?;

            // keeping one's own unique values is not a collision
            let updated = repo.update(&created)?;
            assert_eq!(updated.user_name, "alice");
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_to_taken_unique_value_fails() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: EntityRepository<User> = ctx.db().repository()?;
            repo.create(&named_user("alice"))?;
            let bob = repo.create(&named_user("bob"))?;

            let mut changed = bob.clone();
            changed.user_name = "alice".to_string();
            let error = repo.update(&changed).unwrap_err();
            assert!(matches!(error.kind(), ErrorKind::DuplicateValue { .. }));

            // bob is unchanged
            let stored = repo.get(&Value::from(bob.id.unwrap()))?.unwrap();
            assert_eq!(stored.user_name, "bob");
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_missing_entity_fails() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: EntityRepository<User> = ctx.db().repository()?;
            let mut ghost = named_user("ghost");
            ghost.id = Some(404);
            let error = repo.update(&ghost).unwrap_err();
            assert_eq!(error.kind(), &ErrorKind::NotFound);
            Ok(())
        },
        cleanup,
    )
}

// =============================================================================
// DELETE / GET
// =============================================================================

#[test]
fn test_delete_then_get_is_none() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: EntityRepository<User> = ctx.db().repository()?;
            let created = repo.create(&named_user("alice"))?;
            let id = Value::from(created.id.unwrap());

            assert!(repo.delete(&id)?);
            assert!(repo.get(&id)?.is_none());
            assert!(!repo.delete(&id)?);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_deleted_unique_value_is_reusable() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: EntityRepository<User> = ctx.db().repository()?;
            let created = repo.create(&named_user("alice"))?;
            repo.delete(&Value::from(created.id.unwrap()))?;

            let recreated = repo.create(&named_user("alice"))?;
            assert_eq!(recreated.user_name, "alice");
            assert_ne!(recreated.id, created.id);
            Ok(())
        },
        cleanup,
    )
}

// =============================================================================
// FIND
// =============================================================================

#[test]
fn test_find_with_filters() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: EntityRepository<User> = ctx.db().repository()?;
            for name in ["alice", "anna", "bob"] {
                repo.create(&named_user(name))?;
            }

            let a_users = repo.find(field("UserName").starts_with("a"))?;
            assert_eq!(a_users.len(), 2);

            let combined = repo.find(
                field("UserName")
                    .starts_with("a")
                    .and(field("UserName").ne("anna")),
            )?;
            assert_eq!(combined.len(), 1);
            assert_eq!(combined[0].user_name, "alice");
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_find_pagination_window() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: EntityRepository<User> = ctx.db().repository()?;
            for i in 0..10 {
                let mut user = generate_user();
                user.followers_count = i;
                repo.create(&user)?;
            }

            let options = FindOptions::new()
                .order_by("FollowersCount", SortOrder::Ascending)
                .skip(2)
                .limit(3);
            let page = repo.find_with_options(all(), options)?;
            let counts: Vec<i64> = page.iter().map(|u| u.followers_count).collect();
            assert_eq!(counts, vec![2, 3, 4]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_find_descending_sort() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: EntityRepository<User> = ctx.db().repository()?;
            for i in 0..5 {
                let mut user = generate_user();
                user.followers_count = i;
                repo.create(&user)?;
            }

            let options = FindOptions::new().order_by("FollowersCount", SortOrder::Descending);
            let sorted = repo.find_with_options(all(), options)?;
            let counts: Vec<i64> = sorted.iter().map(|u| u.followers_count).collect();
            assert_eq!(counts, vec![4, 3, 2, 1, 0]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_find_respects_explicit_limit_over_ceiling() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: EntityRepository<User> = ctx.db().repository()?;
            for _ in 0..20 {
                repo.create(&generate_user())?;
            }

            let limited = repo.find_with_options(all(), FindOptions::new().limit(5))?;
            assert_eq!(limited.len(), 5);

            let unlimited = repo.find(all())?;
            assert_eq!(unlimited.len(), 20);
            Ok(())
        },
        cleanup,
    )
}
