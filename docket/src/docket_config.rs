//! Database configuration.

use std::sync::Arc;

/// Immutable configuration of a [Docket](crate::docket::Docket) database.
///
/// Built by [DocketBuilder](crate::docket_builder::DocketBuilder) and shared by every
/// repository handle of the database.
#[derive(Clone)]
pub struct DocketConfig {
    inner: Arc<DocketConfigInner>,
}

struct DocketConfigInner {
    auto_create_schema: bool,
}

impl DocketConfig {
    pub(crate) fn new(auto_create_schema: bool) -> DocketConfig {
        DocketConfig {
            inner: Arc::new(DocketConfigInner { auto_create_schema }),
        }
    }

    /// Whether missing collections, indexes, and sequence rows are created on first
    /// use of an entity type. When `false`, a missing schema is a fatal error.
    pub fn auto_create_schema(&self) -> bool {
        self.inner.auto_create_schema
    }
}

impl Default for DocketConfig {
    fn default() -> Self {
        DocketConfig::new(true)
    }
}
