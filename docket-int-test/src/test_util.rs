use chrono::Utc;
use docket::connection::MemoryConnection;
use docket::docket::Docket;
use docket::errors::DocketResult;

/// Runs a test with setup and teardown around it.
/// Teardown runs even when the test body fails, so stores never leak between tests.
pub fn run_test<B, T, A>(before: B, test: T, after: A)
where
    B: Fn() -> DocketResult<TestContext>,
    T: Fn(TestContext) -> DocketResult<()>,
    A: Fn(TestContext) -> DocketResult<()>,
{
    let ctx = match before() {
        Ok(ctx) => ctx,
        Err(e) => panic!("Before run failed: {:?}", e),
    };

    let result = test(ctx.clone());
    if let Err(e) = after(ctx) {
        panic!("After run failed: {:?}", e);
    }
    if let Err(e) = result {
        panic!("Test failed: {:?}", e);
    }
}

#[derive(Clone)]
pub struct TestContext {
    db: Docket,
}

impl TestContext {
    pub fn new(db: Docket) -> Self {
        Self { db }
    }

    pub fn db(&self) -> Docket {
        self.db.clone()
    }
}

pub fn create_test_context() -> DocketResult<TestContext> {
    let db = Docket::builder().open(MemoryConnection::new())?;
    Ok(TestContext::new(db))
}

pub fn cleanup(ctx: TestContext) -> DocketResult<()> {
    ctx.db().close()
}

/// Current time in epoch milliseconds, matching the repository's timestamp fields.
pub fn now() -> i64 {
    Utc::now().timestamp_millis()
}

/// A random name, unique enough to never collide across test runs.
pub fn random_name(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4())
}
