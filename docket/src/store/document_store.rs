use crate::errors::DocketResult;
use crate::store::Collection;
use std::collections::HashSet;
use std::ops::Deref;
use std::sync::Arc;

/// A trait for implementing a document-store backend.
///
/// # Purpose
///
/// `DocumentStoreProvider` defines the store-wide surface a backend must supply:
/// collection lifecycle (open, drop, enumerate) and store lifecycle (close). One
/// collection exists per entity type, named after the type.
///
/// # Contract
///
/// - `open_collection` creates the collection when absent; `has_collection` does not
/// - The store never provides multi-document transactions; all atomicity the
///   repository layer relies on is scoped to one document of one collection
/// - After `close`, every operation fails with `StoreClosed`
pub trait DocumentStoreProvider: Send + Sync {
    /// Opens a collection by name, creating it if it does not exist.
    fn open_collection(&self, name: &str) -> DocketResult<Collection>;

    /// Returns `true` if a collection with this name exists.
    fn has_collection(&self, name: &str) -> DocketResult<bool>;

    /// Drops a collection and all of its documents and indexes. A no-op when the
    /// collection does not exist.
    fn drop_collection(&self, name: &str) -> DocketResult<()>;

    /// Returns the names of all existing collections.
    fn collection_names(&self) -> DocketResult<HashSet<String>>;

    /// Returns `true` if the store has been closed.
    fn is_closed(&self) -> DocketResult<bool>;

    /// Closes the store and all of its collections.
    fn close(&self) -> DocketResult<()>;
}

/// Facade over a [DocumentStoreProvider] implementation.
///
/// `DocumentStore` is what a [ConnectionProvider](crate::connection::ConnectionProvider)
/// hands out: a cheap-clone handle through which all repositories of one database reach
/// the backend. Reconnection and backoff are the connection provider's concern; the
/// store facade assumes a healthy backend when invoked.
#[derive(Clone)]
pub struct DocumentStore {
    inner: Arc<dyn DocumentStoreProvider>,
}

impl DocumentStore {
    /// Creates a facade over the given provider.
    pub fn new<P: DocumentStoreProvider + 'static>(provider: P) -> Self {
        DocumentStore {
            inner: Arc::new(provider),
        }
    }
}

impl Deref for DocumentStore {
    type Target = dyn DocumentStoreProvider;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref()
    }
}
