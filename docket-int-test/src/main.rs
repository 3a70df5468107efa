use docket::doc;
use docket::document::Document;
use docket::errors::DocketResult;
use docket::filter::field;
use docket::find_options::FindOptions;
use docket::repository::{Entity, EntityRepository, Persistable};
use docket_int_test::test_util::{cleanup, create_test_context};

#[derive(Debug, Default)]
pub struct StressRecord {
    pub id: Option<i64>,
    pub name: String,
    pub processed: bool,
}

impl Persistable for StressRecord {
    fn to_document(&self) -> DocketResult<Document> {
        let mut document = doc! {
            Name: (self.name.clone()),
            Processed: (self.processed),
        };
        if let Some(id) = self.id {
            document.put("Id", id)?;
        }
        Ok(document)
    }

    fn from_document(document: &Document) -> DocketResult<Self> {
        Ok(StressRecord {
            id: document.get("Id").as_i64(),
            name: document.get("Name").as_str().unwrap_or_default().to_string(),
            processed: document.get("Processed").as_bool().unwrap_or_default(),
        })
    }
}

impl Entity for StressRecord {
    fn entity_name(&self) -> String {
        "StressRecord".to_string()
    }
}

fn main() -> DocketResult<()> {
    println!("Starting stress test...");
    let ctx = create_test_context()?;

    let count = 100_000;
    let repo: EntityRepository<StressRecord> = ctx.db().repository()?;

    let start = std::time::Instant::now();
    for _ in 0..count {
        let record = StressRecord {
            id: None,
            name: uuid::Uuid::new_v4().to_string(),
            processed: false,
        };
        repo.create(&record)?;
    }
    let elapsed = start.elapsed();
    println!("Created {} records in {:?}", count, elapsed);

    let start = std::time::Instant::now();
    let pending = repo.find_with_options(
        field("Processed").eq(false),
        FindOptions::new().limit(count as u64),
    )?;
    println!("Found {} pending records in {:?}", pending.len(), start.elapsed());

    let start = std::time::Instant::now();
    for record in &pending {
        let mut record = StressRecord {
            id: record.id,
            name: record.name.clone(),
            processed: true,
        };
        record = repo.update(&record)?;
        debug_assert!(record.processed);
    }
    println!("Updated {} records in {:?}", pending.len(), start.elapsed());

    cleanup(ctx)
}
