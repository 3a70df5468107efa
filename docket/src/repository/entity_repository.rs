//! Typed repository over a single entity collection.

use crate::common::{current_time_millis, SortOrder, Value, DOC_CREATED_DATE, DOC_ID, DOC_MODIFIED_DATE};
use crate::document::Document;
use crate::errors::{DocketError, DocketResult, ErrorKind};
use crate::filter::Filter;
use crate::find_options::FindOptions;
use crate::repository::entity::{Entity, EntitySchema};
use crate::repository::sequence::SequenceAllocator;
use crate::repository::uniqueness::UniquenessGuard;
use crate::store::{Collection, DocumentStore};
use itertools::Itertools;
use std::marker::PhantomData;
use std::sync::Arc;

/// A typed repository of [Entity] values backed by one collection.
///
/// # Purpose
///
/// `EntityRepository` is the main read/write surface of the database: it converts
/// entities to documents and back, allocates surrogate ids, stamps `CreatedDate` and
/// `ModifiedDate`, enforces unique fields, and runs filtered finds with sorting and
/// pagination.
///
/// # Write semantics
///
/// - `create` allocates an id from the entity's sequence when the entity carries none,
///   stamps both timestamps, and returns the post-write image
/// - `update` rereads the stored document first; the stored `Id`, `CreatedDate`, and
///   all guarded fields win over whatever the caller passes in
/// - Both fail with `DuplicateValue` when a unique field collides with another
///   document
pub struct EntityRepository<T: Entity> {
    inner: Arc<EntityRepositoryInner>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Entity> std::fmt::Debug for EntityRepository<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityRepository").finish_non_exhaustive()
    }
}

impl<T: Entity> Clone for EntityRepository<T> {
    fn clone(&self) -> Self {
        EntityRepository {
            inner: Arc::clone(&self.inner),
            _marker: PhantomData,
        }
    }
}

struct EntityRepositoryInner {
    collection: Collection,
    schema: EntitySchema,
    sequence: SequenceAllocator,
    guard: UniquenessGuard,
}

impl<T: Entity> EntityRepository<T> {
    pub(crate) fn new(
        store: &DocumentStore,
        schema: EntitySchema,
        sequence: SequenceAllocator,
    ) -> DocketResult<EntityRepository<T>> {
        if !store.has_collection(schema.name())? {
            log::error!("Collection {} does not exist", schema.name());
            return Err(DocketError::new(
                &format!("Collection {} does not exist", schema.name()),
                ErrorKind::CollectionNotFound,
            ));
        }
        let collection = store.open_collection(schema.name())?;
        let guard = UniquenessGuard::new(collection.clone(), schema.unique_fields().to_vec());
        Ok(EntityRepository {
            inner: Arc::new(EntityRepositoryInner {
                collection,
                schema,
                sequence,
                guard,
            }),
            _marker: PhantomData,
        })
    }

    /// The name of the backing collection.
    pub fn name(&self) -> &str {
        self.inner.schema.name()
    }

    /// Inserts an entity and returns its post-write image.
    ///
    /// An entity without an id gets the next value of its sequence. The image carries
    /// the allocated id and both timestamps, so callers always observe what was
    /// stored.
    pub fn create(&self, entity: &T) -> DocketResult<T> {
        let mut document = entity.to_document()?;

        let id = if document.has_id() {
            document.id()
        } else {
            let sequence = self.inner.schema.sequence_name().ok_or_else(|| {
                log::error!("Entity {} has no id and no sequence", self.name());
                DocketError::new(
                    &format!("Entity {} has no id and no sequence", self.name()),
                    ErrorKind::InvalidId,
                )
            })?;
            let allocated = Value::from(self.inner.sequence.increment(sequence)?);
            document.put(DOC_ID, allocated.clone())?;
            allocated
        };

        let now = current_time_millis();
        if document.created_date().is_none() {
            document.put(DOC_CREATED_DATE, now)?;
        }
        document.put(DOC_MODIFIED_DATE, now)?;

        self.inner.guard.ensure_unique(&document, Some(&id))?;
        let stored = self.inner.collection.put(id, document)?;
        T::from_document(&stored)
    }

    /// Replaces a stored entity and returns the post-write image.
    ///
    /// The stored document's `Id`, `CreatedDate`, and guarded fields are carried
    /// over; only `ModifiedDate` is restamped. Fails with `NotFound` when no
    /// document exists at the entity's id.
    pub fn update(&self, entity: &T) -> DocketResult<T> {
        let mut document = entity.to_document()?;
        let id = document.id();
        if id.is_null() {
            log::error!("Cannot update {} without an id", self.name());
            return Err(DocketError::new(
                &format!("Cannot update {} without an id", self.name()),
                ErrorKind::InvalidId,
            ));
        }

        let stored = self.inner.collection.get(&id)?.ok_or_else(|| {
            log::error!("No {} with id {} to update", self.name(), id);
            DocketError::new(
                &format!("No {} with id {} to update", self.name(), id),
                ErrorKind::NotFound,
            )
        })?;

        document.put(DOC_ID, id.clone())?;
        document.put(DOC_CREATED_DATE, stored.get(DOC_CREATED_DATE))?;
        for field in self.inner.schema.guarded_fields() {
            match stored.get(field) {
                Value::Null => {
                    document.remove(field);
                }
                value => document.put(field, value)?,
            }
        }
        document.put(DOC_MODIFIED_DATE, current_time_millis())?;

        self.inner.guard.ensure_unique(&document, Some(&id))?;
        let written = self.inner.collection.put(id, document)?;
        T::from_document(&written)
    }

    /// Deletes by id, returning `true` when a document was removed.
    pub fn delete(&self, id: &Value) -> DocketResult<bool> {
        Ok(self.inner.collection.remove(id)?.is_some())
    }

    /// Point lookup by id.
    pub fn get(&self, id: &Value) -> DocketResult<Option<T>> {
        match self.inner.collection.get(id)? {
            Some(document) => Ok(Some(T::from_document(&document)?)),
            None => Ok(None),
        }
    }

    /// Finds all entities matching a filter, with the entity's default sort and
    /// find ceiling.
    pub fn find(&self, filter: Filter) -> DocketResult<Vec<T>> {
        self.find_with_options(filter, FindOptions::new())
    }

    /// Finds matching entities with explicit sorting and pagination.
    ///
    /// Unset options fall back to the entity's defaults; the result is never larger
    /// than the requested limit or, absent one, the entity's find ceiling.
    pub fn find_with_options(&self, filter: Filter, options: FindOptions) -> DocketResult<Vec<T>> {
        let documents =
            execute_find(&self.inner.collection, &self.inner.schema, &filter, &options)?;
        let mut entities = Vec::new();
        for document in documents {
            entities.push(T::from_document(&document)?);
        }
        Ok(entities)
    }

    /// Finds the first entity matching a filter under the entity's default sort.
    pub fn find_one(&self, filter: Filter) -> DocketResult<Option<T>> {
        let mut results = self.find_with_options(filter, FindOptions::new().limit(1))?;
        Ok(results.pop())
    }

    /// The number of documents in the backing collection.
    pub fn size(&self) -> DocketResult<u64> {
        self.inner.collection.size()
    }

    pub(crate) fn raw_get(&self, id: &Value) -> DocketResult<Option<Document>> {
        self.inner.collection.get(id)
    }
}

/// Runs a filtered find over a collection: scan, filter, sort, then paginate.
///
/// Unset options fall back to the schema's default sort, skip 0, and the schema's
/// find ceiling.
pub(crate) fn execute_find(
    collection: &Collection,
    schema: &EntitySchema,
    filter: &Filter,
    options: &FindOptions,
) -> DocketResult<Vec<Document>> {
    let mut matched = Vec::new();
    for document in collection.scan()? {
        if filter.apply(&document)? {
            matched.push(document);
        }
    }

    let (sort_field, sort_order) = options
        .order_by
        .clone()
        .unwrap_or_else(|| schema.default_sort().clone());
    let skip = options.skip.unwrap_or(0) as usize;
    let limit = options.limit.unwrap_or(schema.find_ceiling()) as usize;

    Ok(matched
        .into_iter()
        .sorted_by(|a, b| {
            let ordering = a.get(&sort_field).cmp(&b.get(&sort_field));
            match sort_order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        })
        .skip(skip)
        .take(limit)
        .collect())
}
