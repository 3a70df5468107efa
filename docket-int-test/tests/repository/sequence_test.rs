use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use docket::repository::EntityRepository;
use docket_int_test::test_util::{cleanup, create_test_context, run_test};

use crate::repository::{generate_user, User};

#[test]
fn test_ids_are_sequential_from_one() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: EntityRepository<User> = ctx.db().repository()?;
            for expected in 1..=5i64 {
                let created = repo.create(&generate_user())?;
                assert_eq!(created.id, Some(expected));
            }
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_sequence_survives_clear() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: EntityRepository<User> = ctx.db().repository()?;
            let first = repo.create(&generate_user())?;
            assert_eq!(first.id, Some(1));

            ctx.db().clear()?;

            let repo: EntityRepository<User> = ctx.db().repository()?;
            assert_eq!(repo.size()?, 0);
            let next = repo.create(&generate_user())?;
            assert_eq!(next.id, Some(2));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_deleted_ids_are_never_reissued() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: EntityRepository<User> = ctx.db().repository()?;
            let first = repo.create(&generate_user())?;
            repo.delete(&docket::common::Value::from(first.id.unwrap()))?;

            let next = repo.create(&generate_user())?;
            assert_eq!(next.id, Some(2));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_sequences_are_independent_per_entity() {
    use crate::repository::Follow;
    use docket::repository::SequenceAllocator;

    run_test(
        create_test_context,
        |ctx| {
            let users: EntityRepository<User> = ctx.db().repository()?;
            users.create(&generate_user())?;
            users.create(&generate_user())?;

            // relations have no sequence; a manually seeded one starts fresh
            let _ = ctx.db().relation_repository::<Follow>()?;
            let allocator: SequenceAllocator = ctx.db().sequence_allocator();
            assert_eq!(allocator.current("User")?, 2);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_concurrent_creates_get_unique_ids() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: EntityRepository<User> = ctx.db().repository()?;
            let ids = Arc::new(Mutex::new(HashSet::new()));
            let mut handles = Vec::new();

            for _ in 0..8 {
                let repo = repo.clone();
                let ids = Arc::clone(&ids);
                handles.push(std::thread::spawn(move || {
                    for _ in 0..25 {
                        let created = repo.create(&generate_user()).unwrap();
                        assert!(ids.lock().unwrap().insert(created.id.unwrap()));
                    }
                }));
            }
            for handle in handles {
                handle.join().unwrap();
            }

            assert_eq!(ids.lock().unwrap().len(), 200);
            assert_eq!(repo.size()?, 200);
            Ok(())
        },
        cleanup,
    )
}
