use crate::common::Value;
use crate::document::Document;
use crate::errors::DocketResult;
use crate::store::IndexDescriptor;
use std::ops::Deref;
use std::sync::Arc;

/// A trait for implementing the per-collection operations of a storage backend.
///
/// # Purpose
///
/// `CollectionProvider` defines everything a backend must supply for one collection of
/// documents: point reads and writes keyed by the `Id` value, ordered scans, secondary
/// index maintenance and lookup, and the two store-side atomics the repository layer
/// leans on (`put` as replace-at-id, `increment_field` as a single-document atomic add).
///
/// # Contract
///
/// - `put` is an upsert-style replace: it creates the document when the id is absent
///   and fully replaces it when present, returning the **post-write image**
/// - `increment_field` performs its read-modify-write under the backend's own
///   serialization, never the caller's, so concurrent increments never lose an update
/// - All operations fail with `InvalidOperation` once the collection is closed or
///   dropped
pub trait CollectionProvider: Send + Sync {
    /// Returns the collection name.
    fn name(&self) -> DocketResult<String>;

    /// Returns the number of documents in the collection.
    fn size(&self) -> DocketResult<u64>;

    /// Point lookup by primary key. Absent ids yield `Ok(None)`.
    fn get(&self, id: &Value) -> DocketResult<Option<Document>>;

    /// Upsert-style replace-at-id write, returning the post-write document image.
    fn put(&self, id: Value, document: Document) -> DocketResult<Document>;

    /// Removes a document, returning the prior image if one existed.
    fn remove(&self, id: &Value) -> DocketResult<Option<Document>>;

    /// Returns all documents in primary-key order.
    fn scan(&self) -> DocketResult<Vec<Document>>;

    /// Ensures a secondary index exists, backfilling it from existing documents.
    /// Safe to call when the index already exists.
    fn ensure_index(&self, descriptor: &IndexDescriptor) -> DocketResult<()>;

    /// Returns `true` if the described index exists.
    fn has_index(&self, descriptor: &IndexDescriptor) -> DocketResult<bool>;

    /// Drops a secondary index if it exists.
    fn drop_index(&self, descriptor: &IndexDescriptor) -> DocketResult<()>;

    /// Lists the descriptors of all secondary indexes on this collection.
    fn list_indexes(&self) -> DocketResult<Vec<IndexDescriptor>>;

    /// Equality lookup through a secondary index: returns the ids of all documents
    /// whose indexed fields equal `values`, in id order.
    ///
    /// Fails with `IndexNotFound` when no such index exists.
    fn index_lookup(&self, descriptor: &IndexDescriptor, values: &[Value]) -> DocketResult<Vec<Value>>;

    /// Atomically adds `delta` to an integer field of one document, returning the
    /// post-mutation value. Absent or null fields count as zero.
    ///
    /// Fails with `NotFound` when no document exists at `id`.
    fn increment_field(&self, id: &Value, field: &str, delta: i64) -> DocketResult<i64>;

    /// Removes all documents, keeping indexes declared but empty.
    fn clear(&self) -> DocketResult<()>;

    /// Drops the collection: clears data, removes indexes, and marks it unusable.
    fn dispose(&self) -> DocketResult<()>;

    /// Returns `true` if the collection has been dropped.
    fn is_dropped(&self) -> DocketResult<bool>;
}

/// Facade over a [CollectionProvider] implementation.
///
/// `Collection` wraps a backend provider behind an `Arc`, so clones are cheap and all
/// clones address the same underlying collection. The repository layer holds exactly
/// one `Collection` per entity type.
#[derive(Clone)]
pub struct Collection {
    inner: Arc<dyn CollectionProvider>,
}

impl std::fmt::Debug for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection").finish_non_exhaustive()
    }
}

impl Collection {
    /// Creates a facade over the given provider.
    pub fn new<P: CollectionProvider + 'static>(provider: P) -> Self {
        Collection {
            inner: Arc::new(provider),
        }
    }
}

impl Deref for Collection {
    type Target = dyn CollectionProvider;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref()
    }
}
