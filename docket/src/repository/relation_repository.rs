//! Repository for relation entities keyed by composite ids.

use crate::common::{
    current_time_millis, Value, COMPOSITE_KEY_SEPARATOR, DOC_CREATED_DATE, DOC_ID,
    DOC_MODIFIED_DATE,
};
use crate::document::Document;
use crate::errors::{DocketError, DocketResult, ErrorKind};
use crate::filter::Filter;
use crate::find_options::FindOptions;
use crate::repository::entity::{EntitySchema, RelationEntity};
use crate::repository::entity_repository::execute_find;
use crate::store::{Collection, DocumentStore, IndexDescriptor};
use std::marker::PhantomData;
use std::sync::Arc;

/// A typed repository of [RelationEntity] values.
///
/// # Purpose
///
/// Relations link two documents and are identified by the pair, not by a sequence.
/// The repository derives the document id from the source and target values joined
/// with a separator, so the same pair always maps to the same id and a second create
/// of an existing pair is rejected rather than duplicated.
///
/// # Composite id caveat
///
/// The id is a string join, so distinct pairs can collide when a key value itself
/// contains the separator: `("a", "b-c")` and `("a-b", "c")` both map to `a-b-c`.
/// Duplicate detection goes through the pair index and is exact; a create whose id
/// is occupied by a different pair fails with `InvalidOperation` instead of
/// overwriting it.
pub struct RelationRepository<R: RelationEntity> {
    inner: Arc<RelationRepositoryInner>,
    _marker: PhantomData<fn() -> R>,
}

impl<R: RelationEntity> Clone for RelationRepository<R> {
    fn clone(&self) -> Self {
        RelationRepository {
            inner: Arc::clone(&self.inner),
            _marker: PhantomData,
        }
    }
}

struct RelationRepositoryInner {
    collection: Collection,
    schema: EntitySchema,
    source_field: String,
    target_field: String,
}

impl<R: RelationEntity> RelationRepository<R> {
    pub(crate) fn new(store: &DocumentStore, schema: EntitySchema) -> DocketResult<RelationRepository<R>> {
        if !store.has_collection(schema.name())? {
            log::error!("Collection {} does not exist", schema.name());
            return Err(DocketError::new(
                &format!("Collection {} does not exist", schema.name()),
                ErrorKind::CollectionNotFound,
            ));
        }
        let collection = store.open_collection(schema.name())?;
        let prototype = R::default();
        Ok(RelationRepository {
            inner: Arc::new(RelationRepositoryInner {
                collection,
                schema,
                source_field: prototype.source_field(),
                target_field: prototype.target_field(),
            }),
            _marker: PhantomData,
        })
    }

    /// The name of the backing collection.
    pub fn name(&self) -> &str {
        self.inner.schema.name()
    }

    /// The composite document id of a pair.
    pub fn composite_id(source: &Value, target: &Value) -> Value {
        Value::from(format!(
            "{}{}{}",
            source, COMPOSITE_KEY_SEPARATOR, target
        ))
    }

    /// Inserts a relation and returns its post-write image.
    ///
    /// Fails with `DuplicateRelation` when the pair already exists, and with
    /// `InvalidOperation` when the composite id is occupied by a different pair.
    pub fn create(&self, relation: &R) -> DocketResult<R> {
        let mut document = relation.to_document()?;
        let source = document.get(&self.inner.source_field);
        let target = document.get(&self.inner.target_field);
        if source.is_null() || target.is_null() {
            log::error!(
                "Relation {} requires both {} and {}",
                self.name(),
                self.inner.source_field,
                self.inner.target_field
            );
            return Err(DocketError::new(
                &format!(
                    "Relation {} requires both {} and {}",
                    self.name(),
                    self.inner.source_field,
                    self.inner.target_field
                ),
                ErrorKind::InvalidId,
            ));
        }

        let hits = self.inner.collection.index_lookup(
            &self.pair_descriptor(),
            &[source.clone(), target.clone()],
        )?;
        if !hits.is_empty() {
            log::error!(
                "Relation ({}, {}) already exists in {}",
                source,
                target,
                self.name()
            );
            return Err(DocketError::duplicate_relation(
                &source.to_string(),
                &target.to_string(),
            ));
        }

        let id = Self::composite_id(&source, &target);
        if let Some(occupant) = self.inner.collection.get(&id)? {
            return Err(self.occupied_id_error(&id, &occupant, &source, &target));
        }

        let now = current_time_millis();
        document.put(DOC_ID, id.clone())?;
        if document.created_date().is_none() {
            document.put(DOC_CREATED_DATE, now)?;
        }
        document.put(DOC_MODIFIED_DATE, now)?;

        let stored = self.inner.collection.put(id, document)?;
        R::from_document(&stored)
    }

    /// Looks up a relation by its pair.
    pub fn get_pair(&self, source: &Value, target: &Value) -> DocketResult<Option<R>> {
        let hits = self.inner.collection.index_lookup(
            &self.pair_descriptor(),
            &[source.clone(), target.clone()],
        )?;
        match hits.first() {
            Some(id) => match self.inner.collection.get(id)? {
                Some(document) => Ok(Some(R::from_document(&document)?)),
                None => Ok(None),
            },
            None => Ok(None),
        }
    }

    /// Deletes a relation by its pair, returning `true` when one was removed.
    pub fn delete_pair(&self, source: &Value, target: &Value) -> DocketResult<bool> {
        let hits = self.inner.collection.index_lookup(
            &self.pair_descriptor(),
            &[source.clone(), target.clone()],
        )?;
        match hits.first() {
            Some(id) => Ok(self.inner.collection.remove(id)?.is_some()),
            None => Ok(false),
        }
    }

    /// Finds all relations matching a filter, with the entity's default sort and
    /// find ceiling.
    pub fn find(&self, filter: Filter) -> DocketResult<Vec<R>> {
        self.find_with_options(filter, FindOptions::new())
    }

    /// Finds matching relations with explicit sorting and pagination.
    pub fn find_with_options(&self, filter: Filter, options: FindOptions) -> DocketResult<Vec<R>> {
        let documents =
            execute_find(&self.inner.collection, &self.inner.schema, &filter, &options)?;
        let mut relations = Vec::new();
        for document in documents {
            relations.push(R::from_document(&document)?);
        }
        Ok(relations)
    }

    /// The number of relations in the backing collection.
    pub fn size(&self) -> DocketResult<u64> {
        self.inner.collection.size()
    }

    fn pair_descriptor(&self) -> IndexDescriptor {
        IndexDescriptor::composite(&self.inner.source_field, &self.inner.target_field)
    }

    /// Classifies a create that found a document already at the composite id after
    /// the pair index reported a miss. The occupant carrying the same pair is a
    /// duplicate that raced past the index check; a different pair is a separator
    /// collision. Neither is ever overwritten.
    fn occupied_id_error(
        &self,
        id: &Value,
        occupant: &Document,
        source: &Value,
        target: &Value,
    ) -> DocketError {
        let occupant_source = occupant.get(&self.inner.source_field);
        let occupant_target = occupant.get(&self.inner.target_field);
        if &occupant_source == source && &occupant_target == target {
            log::error!(
                "Relation ({}, {}) already exists in {}",
                source,
                target,
                self.name()
            );
            return DocketError::duplicate_relation(&source.to_string(), &target.to_string());
        }

        log::error!(
            "Composite id {} of {} is occupied by ({}, {})",
            id,
            self.name(),
            occupant_source,
            occupant_target
        );
        DocketError::new(
            &format!("Composite id {} is occupied by another pair", id),
            ErrorKind::InvalidOperation,
        )
    }
}
