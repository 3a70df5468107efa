//! The database facade.

use crate::docket_builder::DocketBuilder;
use crate::docket_config::DocketConfig;
use crate::errors::{DocketError, DocketResult, ErrorKind};
use crate::repository::{
    CounterMaintainer, Entity, EntityRepository, EntitySchema, RelationEntity,
    RelationRepository, SchemaManager, SequenceAllocator,
};
use crate::store::DocumentStore;
use dashmap::DashMap;
use std::sync::Arc;

/// The main facade of a docket database.
///
/// # Purpose
///
/// `Docket` hands out typed repositories and owns the cross-cutting machinery they
/// share: the store handle, the sequence allocator, and the schema managers of every
/// entity type seen so far. Clones are cheap and address the same database.
///
/// # Schema bootstrap
///
/// The first request for a repository of an entity type bootstraps its schema when
/// `auto_create_schema` is on (the default). With it off, a missing schema fails the
/// request with `SchemaMissing`; nothing is created implicitly.
///
/// # Examples
///
/// ```rust,ignore
/// let db = Docket::builder().open(MemoryConnection::new())?;
/// let users = db.repository::<User>()?;
/// let alice = users.create(&User::named("alice"))?;
/// ```
#[derive(Clone)]
pub struct Docket {
    inner: Arc<DocketInner>,
}

struct DocketInner {
    store: DocumentStore,
    config: DocketConfig,
    sequence: SequenceAllocator,
    schemas: DashMap<String, SchemaManager>,
}

impl std::fmt::Debug for Docket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Docket").finish_non_exhaustive()
    }
}

impl Docket {
    /// Starts building a database.
    pub fn builder() -> DocketBuilder {
        DocketBuilder::new()
    }

    pub(crate) fn open_with(store: DocumentStore, config: DocketConfig) -> DocketResult<Docket> {
        let sequence = SequenceAllocator::new(&store)?;
        log::info!("Opened docket database");
        Ok(Docket {
            inner: Arc::new(DocketInner {
                store,
                config,
                sequence,
                schemas: DashMap::new(),
            }),
        })
    }

    /// Returns the typed repository of an entity, bootstrapping its schema per the
    /// database configuration.
    pub fn repository<T: Entity>(&self) -> DocketResult<EntityRepository<T>> {
        let schema = self.prepare(EntitySchema::of::<T>())?;
        EntityRepository::new(&self.inner.store, schema, self.inner.sequence.clone())
    }

    /// Returns the typed repository of a relation entity.
    pub fn relation_repository<R: RelationEntity>(&self) -> DocketResult<RelationRepository<R>> {
        let schema = self.prepare(EntitySchema::of_relation::<R>())?;
        RelationRepository::new(&self.inner.store, schema)
    }

    /// Returns a counter maintainer over the parent entity's collection.
    pub fn counter_maintainer<P: Entity>(&self) -> DocketResult<CounterMaintainer<P>> {
        let schema = self.prepare(EntitySchema::of::<P>())?;
        CounterMaintainer::new(&self.inner.store, &schema)
    }

    /// The allocator behind every entity sequence of this database.
    pub fn sequence_allocator(&self) -> SequenceAllocator {
        self.inner.sequence.clone()
    }

    /// The underlying store handle.
    pub fn store(&self) -> DocumentStore {
        self.inner.store.clone()
    }

    /// Drops and recreates the collections of every entity type this database has
    /// handed a repository for. Sequence counters are preserved, so ids never repeat.
    pub fn clear(&self) -> DocketResult<()> {
        for entry in self.inner.schemas.iter() {
            entry.value().drop_and_recreate_tables()?;
        }
        log::info!("Cleared all registered collections");
        Ok(())
    }

    /// Returns `true` if the underlying store has been closed.
    pub fn is_closed(&self) -> DocketResult<bool> {
        self.inner.store.is_closed()
    }

    /// Closes the underlying store; every handle of this database becomes unusable.
    pub fn close(&self) -> DocketResult<()> {
        log::info!("Closing docket database");
        self.inner.store.close()
    }

    fn prepare(&self, schema: EntitySchema) -> DocketResult<EntitySchema> {
        let manager = self
            .inner
            .schemas
            .entry(schema.name().to_string())
            .or_insert_with(|| SchemaManager::new(self.inner.store.clone(), schema.clone()))
            .clone();

        if self.inner.config.auto_create_schema() {
            manager.create_tables()?;
        } else if !manager.tables_exist()? {
            log::error!("Schema for {} does not exist", schema.name());
            return Err(DocketError::new(
                &format!(
                    "Schema for {} does not exist and auto creation is disabled",
                    schema.name()
                ),
                ErrorKind::SchemaMissing,
            ));
        }
        Ok(schema)
    }
}
