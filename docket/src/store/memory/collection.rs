use crate::common::Value;
use crate::document::Document;
use crate::errors::{DocketError, DocketResult, ErrorKind};
use crate::store::{CollectionProvider, IndexDescriptor};
use crossbeam_skiplist::SkipMap;
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use smallvec::SmallVec;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Composite key of a secondary index entry: the indexed field values, in order.
type IndexKey = SmallVec<[Value; 2]>;

/// In-memory collection implementation using a concurrent skip list.
///
/// # Purpose
/// `InMemoryCollection` stores documents ordered by primary key and maintains equality
/// indexes over declared fields. It backs exactly one entity type's collection.
///
/// # Characteristics
/// - **Thread-Safe**: can be cloned and shared across threads
/// - **Serialized Mutations**: a per-collection mutex serializes `put`, `remove`, and
///   `increment_field`, making the field increment a true store-side atomic
/// - **Indexed**: equality lookup over single-field and composite indexes
/// - **Lifecycle Management**: closed/dropped flags are checked on every operation
#[derive(Clone)]
pub struct InMemoryCollection {
    inner: Arc<InMemoryCollectionInner>,
}

impl InMemoryCollection {
    /// Creates a new empty in-memory collection.
    pub fn new(name: &str) -> Self {
        InMemoryCollection {
            inner: Arc::new(InMemoryCollectionInner::new(name)),
        }
    }
}

impl CollectionProvider for InMemoryCollection {
    fn name(&self) -> DocketResult<String> {
        Ok(self.inner.name.clone())
    }

    fn size(&self) -> DocketResult<u64> {
        self.inner.check_opened()?;
        Ok(self.inner.backing.len() as u64)
    }

    fn get(&self, id: &Value) -> DocketResult<Option<Document>> {
        self.inner.check_opened()?;
        Ok(self.inner.backing.get(id).map(|entry| entry.value().clone()))
    }

    fn put(&self, id: Value, document: Document) -> DocketResult<Document> {
        self.inner.check_opened()?;
        let _guard = self.inner.mutation_lock.lock();
        self.inner.put_locked(id, document)
    }

    fn remove(&self, id: &Value) -> DocketResult<Option<Document>> {
        self.inner.check_opened()?;
        let _guard = self.inner.mutation_lock.lock();
        self.inner.remove_locked(id)
    }

    fn scan(&self) -> DocketResult<Vec<Document>> {
        self.inner.check_opened()?;
        Ok(self
            .inner
            .backing
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    fn ensure_index(&self, descriptor: &IndexDescriptor) -> DocketResult<()> {
        self.inner.check_opened()?;
        let _guard = self.inner.mutation_lock.lock();
        self.inner.ensure_index_locked(descriptor)
    }

    fn has_index(&self, descriptor: &IndexDescriptor) -> DocketResult<bool> {
        self.inner.check_opened()?;
        Ok(self.inner.indexes.contains_key(&descriptor.name()))
    }

    fn drop_index(&self, descriptor: &IndexDescriptor) -> DocketResult<()> {
        self.inner.check_opened()?;
        let _guard = self.inner.mutation_lock.lock();
        self.inner.indexes.remove(&descriptor.name());
        Ok(())
    }

    fn list_indexes(&self) -> DocketResult<Vec<IndexDescriptor>> {
        self.inner.check_opened()?;
        Ok(self
            .inner
            .indexes
            .iter()
            .map(|entry| entry.value().descriptor.clone())
            .collect())
    }

    fn index_lookup(&self, descriptor: &IndexDescriptor, values: &[Value]) -> DocketResult<Vec<Value>> {
        self.inner.check_opened()?;
        self.inner.index_lookup(descriptor, values)
    }

    fn increment_field(&self, id: &Value, field: &str, delta: i64) -> DocketResult<i64> {
        self.inner.check_opened()?;
        let _guard = self.inner.mutation_lock.lock();
        self.inner.increment_field_locked(id, field, delta)
    }

    fn clear(&self) -> DocketResult<()> {
        self.inner.check_opened()?;
        let _guard = self.inner.mutation_lock.lock();
        self.inner.clear_locked();
        Ok(())
    }

    fn dispose(&self) -> DocketResult<()> {
        let _guard = self.inner.mutation_lock.lock();
        self.inner.clear_locked();
        self.inner.indexes.clear();
        self.inner.dropped.store(true, Ordering::Relaxed);
        self.inner.closed.store(true, Ordering::Relaxed);
        Ok(())
    }

    fn is_dropped(&self) -> DocketResult<bool> {
        Ok(self.inner.dropped.load(Ordering::Relaxed))
    }
}

struct CollectionIndex {
    descriptor: IndexDescriptor,
    entries: RwLock<BTreeMap<IndexKey, BTreeSet<Value>>>,
}

impl CollectionIndex {
    fn new(descriptor: IndexDescriptor) -> Self {
        CollectionIndex {
            descriptor,
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Builds the index key for a document, or `None` when any indexed field is
    /// null or absent. Documents without the indexed fields are simply not indexed.
    fn key_for(&self, document: &Document) -> Option<IndexKey> {
        let mut key = IndexKey::new();
        for field in self.descriptor.fields() {
            let value = document.get(field);
            if value.is_null() {
                return None;
            }
            key.push(value);
        }
        Some(key)
    }

    fn add(&self, document: &Document) {
        if let Some(key) = self.key_for(document) {
            let mut entries = self.entries.write();
            entries.entry(key).or_default().insert(document.id());
        }
    }

    fn delete(&self, document: &Document) {
        if let Some(key) = self.key_for(document) {
            let mut entries = self.entries.write();
            if let Some(ids) = entries.get_mut(&key) {
                ids.remove(&document.id());
                if ids.is_empty() {
                    entries.remove(&key);
                }
            }
        }
    }

    fn lookup(&self, values: &[Value]) -> Vec<Value> {
        let key: IndexKey = values.iter().cloned().collect();
        let entries = self.entries.read();
        entries
            .get(&key)
            .map(|ids| ids.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn clear(&self) {
        self.entries.write().clear();
    }
}

struct InMemoryCollectionInner {
    name: String,
    backing: SkipMap<Value, Document>,
    // Serializes all mutations so replace-at-id and increment_field behave as
    // store-side atomics. Reads go through the skip list without this lock.
    mutation_lock: Mutex<()>,
    indexes: DashMap<String, CollectionIndex>,
    closed: AtomicBool,
    dropped: AtomicBool,
}

impl InMemoryCollectionInner {
    fn new(name: &str) -> Self {
        InMemoryCollectionInner {
            name: name.to_string(),
            backing: SkipMap::new(),
            mutation_lock: Mutex::new(()),
            indexes: DashMap::new(),
            closed: AtomicBool::from(false),
            dropped: AtomicBool::from(false),
        }
    }

    fn check_opened(&self) -> DocketResult<()> {
        if self.closed.load(Ordering::Relaxed) {
            log::error!("Collection {} is closed", self.name);
            return Err(DocketError::new(
                &format!("Collection {} is closed", self.name),
                ErrorKind::InvalidOperation,
            ));
        }

        if self.dropped.load(Ordering::Relaxed) {
            log::error!("Collection {} is dropped", self.name);
            return Err(DocketError::new(
                &format!("Collection {} is dropped", self.name),
                ErrorKind::InvalidOperation,
            ));
        }

        Ok(())
    }

    fn put_locked(&self, id: Value, document: Document) -> DocketResult<Document> {
        if id.is_null() {
            log::error!("Cannot put a document with a null id in {}", self.name);
            return Err(DocketError::new(
                "Cannot put a document with a null id",
                ErrorKind::InvalidId,
            ));
        }

        if let Some(prev) = self.backing.get(&id) {
            let prev_doc = prev.value().clone();
            for index in self.indexes.iter() {
                index.value().delete(&prev_doc);
            }
        }

        self.backing.insert(id, document.clone());
        for index in self.indexes.iter() {
            index.value().add(&document);
        }

        Ok(document)
    }

    fn remove_locked(&self, id: &Value) -> DocketResult<Option<Document>> {
        if let Some(entry) = self.backing.remove(id) {
            let document = entry.value().clone();
            for index in self.indexes.iter() {
                index.value().delete(&document);
            }
            Ok(Some(document))
        } else {
            Ok(None)
        }
    }

    fn ensure_index_locked(&self, descriptor: &IndexDescriptor) -> DocketResult<()> {
        if self.indexes.contains_key(&descriptor.name()) {
            return Ok(());
        }

        let index = CollectionIndex::new(descriptor.clone());
        // backfill from existing documents
        for entry in self.backing.iter() {
            index.add(entry.value());
        }
        self.indexes.insert(descriptor.name(), index);
        Ok(())
    }

    fn index_lookup(&self, descriptor: &IndexDescriptor, values: &[Value]) -> DocketResult<Vec<Value>> {
        match self.indexes.get(&descriptor.name()) {
            Some(index) => Ok(index.value().lookup(values)),
            None => {
                log::error!(
                    "Index {} does not exist on collection {}",
                    descriptor.name(),
                    self.name
                );
                Err(DocketError::new(
                    &format!("Index {} does not exist", descriptor.name()),
                    ErrorKind::IndexNotFound,
                ))
            }
        }
    }

    fn increment_field_locked(&self, id: &Value, field: &str, delta: i64) -> DocketResult<i64> {
        let entry = self.backing.get(id).ok_or_else(|| {
            log::error!("No document with id {} in {}", id, self.name);
            DocketError::new(
                &format!("No document with id {} in {}", id, self.name),
                ErrorKind::NotFound,
            )
        })?;

        let mut document = entry.value().clone();
        let current = match document.get(field) {
            Value::Null => 0,
            other => other.as_i64().ok_or_else(|| {
                log::error!("Field {} of {} is not an integer", field, self.name);
                DocketError::new(
                    &format!("Field {} is not an integer", field),
                    ErrorKind::InvalidDataType,
                )
            })?,
        };

        let next = current + delta;
        document.put(field, next)?;
        self.put_locked(id.clone(), document)?;
        Ok(next)
    }

    fn clear_locked(&self) {
        // SkipMap has no bulk clear; drain through removal.
        for entry in self.backing.iter() {
            self.backing.remove(entry.key());
        }
        for index in self.indexes.iter() {
            index.value().clear();
        }
    }
}
