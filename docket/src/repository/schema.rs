//! Schema bootstrap for entity collections.

use crate::common::{Value, SEQUENCE_COLLECTION, SEQUENCE_DOC_ID, DOC_ID};
use crate::document::Document;
use crate::errors::DocketResult;
use crate::repository::entity::EntitySchema;
use crate::store::{DocumentStore, IndexDescriptor};

/// Creates and verifies the storage structures an entity needs.
///
/// # Purpose
///
/// `SchemaManager` turns an [EntitySchema] into concrete store state: the backing
/// collection, one secondary index per declared [EntityIndex](super::EntityIndex), one
/// single-field index per unique field, and the entity's row in the shared sequence
/// document. Bootstrap is idempotent, so it can run on every startup.
///
/// # Sequence seeding
///
/// All sequences live in one well-known document of the `Sequences` collection, one
/// integer field per sequence. Seeding adds the entity's field at zero only when the
/// field is absent; existing counters are never reset.
#[derive(Clone)]
pub struct SchemaManager {
    store: DocumentStore,
    schema: EntitySchema,
}

impl SchemaManager {
    pub fn new(store: DocumentStore, schema: EntitySchema) -> SchemaManager {
        SchemaManager { store, schema }
    }

    /// The entity metadata this manager bootstraps.
    pub fn schema(&self) -> &EntitySchema {
        &self.schema
    }

    /// Returns `true` if the entity's collection already exists.
    pub fn tables_exist(&self) -> DocketResult<bool> {
        self.store.has_collection(self.schema.name())
    }

    /// Creates the entity's collection, indexes, and sequence row.
    ///
    /// Safe to call repeatedly; existing structures are left untouched.
    pub fn create_tables(&self) -> DocketResult<()> {
        let collection = self.store.open_collection(self.schema.name())?;

        for index in self.schema.indexes() {
            collection.ensure_index(&index.to_descriptor())?;
        }
        for field in self.schema.unique_fields() {
            collection.ensure_index(&IndexDescriptor::single(field))?;
        }

        if let Some(sequence) = self.schema.sequence_name() {
            self.seed_sequence(sequence)?;
        }

        log::debug!("Bootstrapped schema for {}", self.schema.name());
        Ok(())
    }

    /// Drops the entity's collection and rebuilds it empty.
    ///
    /// The entity's sequence counter is left at its current value, so ids never
    /// repeat across a recreate.
    pub fn drop_and_recreate_tables(&self) -> DocketResult<()> {
        self.store.drop_collection(self.schema.name())?;
        self.create_tables()
    }

    fn seed_sequence(&self, sequence: &str) -> DocketResult<()> {
        let sequences = self.store.open_collection(SEQUENCE_COLLECTION)?;
        let id = Value::from(SEQUENCE_DOC_ID);

        if sequences.get(&id)?.is_none() {
            // A racing bootstrap can replace this document before the increment
            // below runs; only zero-valued fields can be lost, and
            // increment_field treats an absent field as zero.
            let mut fresh = Document::new();
            fresh.put(DOC_ID, id.clone())?;
            sequences.put(id.clone(), fresh)?;
        }

        // Field-level add of zero: creates an absent counter at zero and leaves
        // an existing counter untouched.
        sequences.increment_field(&id, sequence, 0)?;
        Ok(())
    }
}
