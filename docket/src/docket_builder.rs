//! Builder for opening a database.

use crate::connection::ConnectionProvider;
use crate::docket::Docket;
use crate::docket_config::DocketConfig;
use crate::errors::DocketResult;

/// Builder for a [Docket] database.
///
/// Configuration methods are chainable; [open](Self::open) consumes the builder,
/// connects through the given [ConnectionProvider], and hands back the database
/// facade.
///
/// # Examples
///
/// ```rust,ignore
/// use docket::docket::Docket;
/// use docket::connection::MemoryConnection;
///
/// let db = Docket::builder()
///     .auto_create_schema(true)
///     .open(MemoryConnection::new())?;
/// ```
pub struct DocketBuilder {
    auto_create_schema: bool,
}

impl DocketBuilder {
    pub(crate) fn new() -> DocketBuilder {
        DocketBuilder {
            auto_create_schema: true,
        }
    }

    /// Controls schema bootstrap on first use of an entity type. Defaults to `true`;
    /// when disabled, requesting a repository whose schema does not exist fails with
    /// `SchemaMissing`.
    pub fn auto_create_schema(mut self, enabled: bool) -> DocketBuilder {
        self.auto_create_schema = enabled;
        self
    }

    /// Connects through the provider and opens the database.
    pub fn open<C: ConnectionProvider>(self, connection: C) -> DocketResult<Docket> {
        let store = connection.connect()?;
        let config = DocketConfig::new(self.auto_create_schema);
        Docket::open_with(store, config)
    }
}

impl Default for DocketBuilder {
    fn default() -> Self {
        DocketBuilder::new()
    }
}
