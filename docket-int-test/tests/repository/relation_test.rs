use docket::common::Value;
use docket::errors::ErrorKind;
use docket::filter::field;
use docket::repository::RelationRepository;
use docket_int_test::test_util::{cleanup, create_test_context, run_test};

use crate::repository::Follow;

fn follow(owner_id: i64, follower_id: i64) -> Follow {
    Follow {
        owner_id,
        follower_id,
    }
}

#[test]
fn test_create_and_get_pair() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: RelationRepository<Follow> = ctx.db().relation_repository()?;
            repo.create(&follow(1, 2))?;

            let found = repo.get_pair(&Value::from(1i64), &Value::from(2i64))?.unwrap();
            assert_eq!(found, follow(1, 2));

            // the pair is directional
            assert!(repo.get_pair(&Value::from(2i64), &Value::from(1i64))?.is_none());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_duplicate_pair_is_rejected() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: RelationRepository<Follow> = ctx.db().relation_repository()?;
            repo.create(&follow(1, 2))?;

            let error = repo.create(&follow(1, 2)).unwrap_err();
            assert!(matches!(error.kind(), ErrorKind::DuplicateRelation { .. }));
            assert_eq!(repo.size()?, 1);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_delete_pair_then_recreate() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: RelationRepository<Follow> = ctx.db().relation_repository()?;
            repo.create(&follow(1, 2))?;

            assert!(repo.delete_pair(&Value::from(1i64), &Value::from(2i64))?);
            assert!(!repo.delete_pair(&Value::from(1i64), &Value::from(2i64))?);
            assert_eq!(repo.size()?, 0);

            repo.create(&follow(1, 2))?;
            assert_eq!(repo.size()?, 1);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_find_by_either_side() {
    run_test(
        create_test_context,
        |ctx| {
            let repo: RelationRepository<Follow> = ctx.db().relation_repository()?;
            repo.create(&follow(1, 2))?;
            repo.create(&follow(1, 3))?;
            repo.create(&follow(2, 3))?;

            let following_one = repo.find(field("OwnerId").eq(1i64))?;
            assert_eq!(following_one.len(), 2);

            let followers_of_three = repo.find(field("FollowerId").eq(3i64))?;
            assert_eq!(followers_of_three.len(), 2);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_string_pair_separator_collision_is_rejected() {
    use docket::doc;
    use docket::document::Document;
    use docket::errors::DocketResult;
    use docket::repository::{Entity, Persistable, RelationEntity};

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Link {
        from: String,
        to: String,
    }

    impl Persistable for Link {
        fn to_document(&self) -> DocketResult<Document> {
            Ok(doc! {
                FromKey: (self.from.clone()),
                ToKey: (self.to.clone()),
            })
        }

        fn from_document(document: &Document) -> DocketResult<Self> {
            Ok(Link {
                from: document.get("FromKey").as_str().unwrap_or_default().to_string(),
                to: document.get("ToKey").as_str().unwrap_or_default().to_string(),
            })
        }
    }

    impl Entity for Link {
        fn entity_name(&self) -> String {
            "Link".to_string()
        }

        fn sequence_name(&self) -> Option<String> {
            None
        }
    }

    impl RelationEntity for Link {
        fn source_field(&self) -> String {
            "FromKey".to_string()
        }

        fn target_field(&self) -> String {
            "ToKey".to_string()
        }
    }

    run_test(
        create_test_context,
        |ctx| {
            let repo: RelationRepository<Link> = ctx.db().relation_repository()?;
            repo.create(&Link {
                from: "a".to_string(),
                to: "b-c".to_string(),
            })?;

            // ("a-b", "c") joins to the same composite id as ("a", "b-c")
            let error = repo
                .create(&Link {
                    from: "a-b".to_string(),
                    to: "c".to_string(),
                })
                .unwrap_err();
            assert_eq!(error.kind(), &ErrorKind::InvalidOperation);

            let original = repo
                .get_pair(&Value::from("a"), &Value::from("b-c"))?
                .unwrap();
            assert_eq!(original.to, "b-c");
            Ok(())
        },
        cleanup,
    )
}
