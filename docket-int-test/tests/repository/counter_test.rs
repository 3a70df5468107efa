use docket::common::Value;
use docket::errors::ErrorKind;
use docket::repository::{CounterMaintainer, EntityRepository, RelationRepository};
use docket_int_test::test_util::{cleanup, create_test_context, run_test};

use crate::repository::{named_user, Follow, User};

#[test]
fn test_counter_follows_relation_lifecycle() {
    run_test(
        create_test_context,
        |ctx| {
            let users: EntityRepository<User> = ctx.db().repository()?;
            let follows: RelationRepository<Follow> = ctx.db().relation_repository()?;
            let counters: CounterMaintainer<User> = ctx.db().counter_maintainer()?;

            let alice = users.create(&named_user("alice"))?;
            let bob = users.create(&named_user("bob"))?;
            let alice_id = alice.id.unwrap();

            let relation = Follow {
                owner_id: alice_id,
                follower_id: bob.id.unwrap(),
            };
            follows.create(&relation)?;
            assert_eq!(counters.record_insert(&relation)?, 1);

            let reloaded = users.get(&Value::from(alice_id))?.unwrap();
            assert_eq!(reloaded.followers_count, 1);

            follows.delete_pair(
                &Value::from(relation.owner_id),
                &Value::from(relation.follower_id),
            )?;
            assert_eq!(counters.record_remove(&relation)?, 0);

            let reloaded = users.get(&Value::from(alice_id))?.unwrap();
            assert_eq!(reloaded.followers_count, 0);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_counter_is_never_adjusted_implicitly() {
    run_test(
        create_test_context,
        |ctx| {
            let users: EntityRepository<User> = ctx.db().repository()?;
            let follows: RelationRepository<Follow> = ctx.db().relation_repository()?;

            let alice = users.create(&named_user("alice"))?;
            let bob = users.create(&named_user("bob"))?;

            // creating or deleting a relation without the maintainer leaves the
            // counter untouched
            let relation = Follow {
                owner_id: alice.id.unwrap(),
                follower_id: bob.id.unwrap(),
            };
            follows.create(&relation)?;
            follows.delete_pair(
                &Value::from(relation.owner_id),
                &Value::from(relation.follower_id),
            )?;

            let reloaded = users.get(&Value::from(alice.id.unwrap()))?.unwrap();
            assert_eq!(reloaded.followers_count, 0);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_adjust_missing_parent_fails() {
    run_test(
        create_test_context,
        |ctx| {
            let counters: CounterMaintainer<User> = ctx.db().counter_maintainer()?;
            let error = counters
                .adjust(&Value::from(404i64), "FollowersCount", 1)
                .unwrap_err();
            assert_eq!(error.kind(), &ErrorKind::NotFound);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_concurrent_counter_adjustments() {
    run_test(
        create_test_context,
        |ctx| {
            let users: EntityRepository<User> = ctx.db().repository()?;
            let counters: CounterMaintainer<User> = ctx.db().counter_maintainer()?;
            let alice = users.create(&named_user("alice"))?;
            let alice_id = alice.id.unwrap();

            let mut handles = Vec::new();
            for _ in 0..8 {
                let counters = counters.clone();
                handles.push(std::thread::spawn(move || {
                    for _ in 0..50 {
                        counters
                            .adjust(&Value::from(alice_id), "FollowersCount", 1)
                            .unwrap();
                    }
                }));
            }
            for handle in handles {
                handle.join().unwrap();
            }

            let reloaded = users.get(&Value::from(alice_id))?.unwrap();
            assert_eq!(reloaded.followers_count, 400);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_counter_update_does_not_disturb_other_fields() {
    run_test(
        create_test_context,
        |ctx| {
            let users: EntityRepository<User> = ctx.db().repository()?;
            let counters: CounterMaintainer<User> = ctx.db().counter_maintainer()?;
            let alice = users.create(&named_user("alice"))?;

            counters.adjust(&Value::from(alice.id.unwrap()), "FollowersCount", 3)?;

            let reloaded = users.get(&Value::from(alice.id.unwrap()))?.unwrap();
            assert_eq!(reloaded.followers_count, 3);
            assert_eq!(reloaded.user_name, "alice");
            assert_eq!(reloaded.password_hash, "hash");
            Ok(())
        },
        cleanup,
    )
}
