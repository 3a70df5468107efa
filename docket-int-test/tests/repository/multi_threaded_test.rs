use std::sync::Arc;

use docket::common::Value;
use docket::errors::ErrorKind;
use docket::filter::field;
use docket::repository::{CounterMaintainer, EntityRepository, RelationRepository};
use docket_int_test::test_util::{cleanup, create_test_context, run_test};
use rand::Rng;

use crate::repository::{generate_user, named_user, Follow, User};

#[test]
fn test_mixed_workload_across_threads() {
    run_test(
        create_test_context,
        |ctx| {
            let users: EntityRepository<User> = ctx.db().repository()?;
            let follows: RelationRepository<Follow> = ctx.db().relation_repository()?;
            let counters: CounterMaintainer<User> = ctx.db().counter_maintainer()?;

            let celebrity = users.create(&named_user("celebrity"))?;
            let celebrity_id = celebrity.id.unwrap();

            let users = Arc::new(users);
            let follows = Arc::new(follows);
            let counters = Arc::new(counters);
            let mut handles = Vec::new();

            for _ in 0..8 {
                let users = Arc::clone(&users);
                let follows = Arc::clone(&follows);
                let counters = Arc::clone(&counters);
                handles.push(std::thread::spawn(move || {
                    for _ in 0..25 {
                        let fan = users.create(&generate_user()).unwrap();
                        let relation = Follow {
                            owner_id: celebrity_id,
                            follower_id: fan.id.unwrap(),
                        };
                        follows.create(&relation).unwrap();
                        counters.record_insert(&relation).unwrap();

                        if rand::rng().random_bool(0.5) {
                            std::thread::yield_now();
                        }
                    }
                }));
            }
            for handle in handles {
                handle.join().unwrap();
            }

            // every relation landed exactly once and every insert was counted
            assert_eq!(follows.size()?, 200);
            let celebrity = users.get(&Value::from(celebrity_id))?.unwrap();
            assert_eq!(celebrity.followers_count, 200);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_racing_duplicate_relations_land_once() {
    run_test(
        create_test_context,
        |ctx| {
            let users: EntityRepository<User> = ctx.db().repository()?;
            let follows: RelationRepository<Follow> = ctx.db().relation_repository()?;

            let alice = users.create(&named_user("alice"))?;
            let follows = Arc::new(follows);

            // repeated rounds so losers hit both failure paths: the pair-index
            // check and the occupant read behind it
            for round in 0..50u64 {
                let fan = users.create(&generate_user())?;
                let relation = Follow {
                    owner_id: alice.id.unwrap(),
                    follower_id: fan.id.unwrap(),
                };

                let mut handles = Vec::new();
                for _ in 0..4 {
                    let follows = Arc::clone(&follows);
                    let relation = relation.clone();
                    handles.push(std::thread::spawn(move || follows.create(&relation)));
                }

                let mut successes = 0;
                for handle in handles {
                    match handle.join().unwrap() {
                        Ok(_) => successes += 1,
                        Err(error) => {
                            // a racing loser of the same pair always sees a
                            // duplicate, never a collision error
                            assert!(matches!(error.kind(), ErrorKind::DuplicateRelation { .. }))
                        }
                    }
                }

                // the composite id pins racing writers to one slot: duplicates
                // fail one of the two checks, they never multiply
                assert!(successes >= 1);
                assert_eq!(follows.size()?, round + 1);
            }
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_concurrent_finds_during_writes() {
    run_test(
        create_test_context,
        |ctx| {
            let users: EntityRepository<User> = ctx.db().repository()?;
            let users = Arc::new(users);

            let writer = {
                let users = Arc::clone(&users);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        users.create(&generate_user()).unwrap();
                    }
                })
            };

            let reader = {
                let users = Arc::clone(&users);
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        // reads see a consistent snapshot of each document
                        let found = users.find(field("DisplayName").eq("Someone")).unwrap();
                        for user in found {
                            assert!(!user.user_name.is_empty());
                        }
                    }
                })
            };

            writer.join().unwrap();
            reader.join().unwrap();

            assert_eq!(users.size()?, 100);
            Ok(())
        },
        cleanup,
    )
}
