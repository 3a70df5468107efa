use crate::errors::{DocketError, DocketResult, ErrorKind};
use crate::store::memory::InMemoryCollection;
use crate::store::{Collection, CollectionProvider, DocumentStoreProvider};
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// In-memory implementation of a document store.
///
/// # Purpose
/// `InMemoryStore` provides a complete store implementation suitable for testing,
/// temporary data, and embedded scenarios where persistence is not required. Each
/// collection lives in a concurrent registry keyed by its name.
///
/// # Characteristics
/// - **Thread-Safe**: fully concurrent with safe sharing across threads
/// - **Registry Management**: one [InMemoryCollection] per entity type
/// - **No Persistence**: all data is lost when the store is closed
///
/// # Usage
/// Usually reached through [MemoryConnection](crate::connection::MemoryConnection):
/// ```text
/// let db = Docket::builder().open(MemoryConnection::new())?;
/// ```
#[derive(Clone)]
pub struct InMemoryStore {
    inner: Arc<InMemoryStoreInner>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        InMemoryStore {
            inner: Arc::new(InMemoryStoreInner::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStoreProvider for InMemoryStore {
    fn open_collection(&self, name: &str) -> DocketResult<Collection> {
        self.inner.check_opened()?;
        if name.is_empty() {
            log::error!("Collection name cannot be empty");
            return Err(DocketError::new(
                "Collection name cannot be empty",
                ErrorKind::InvalidOperation,
            ));
        }

        let collection = self
            .inner
            .collections
            .entry(name.to_string())
            .or_insert_with(|| InMemoryCollection::new(name))
            .clone();
        Ok(Collection::new(collection))
    }

    fn has_collection(&self, name: &str) -> DocketResult<bool> {
        self.inner.check_opened()?;
        Ok(self.inner.collections.contains_key(name))
    }

    fn drop_collection(&self, name: &str) -> DocketResult<()> {
        self.inner.check_opened()?;
        if let Some((_, collection)) = self.inner.collections.remove(name) {
            collection.dispose()?;
            log::info!("Dropped collection {}", name);
        }
        Ok(())
    }

    fn collection_names(&self) -> DocketResult<HashSet<String>> {
        self.inner.check_opened()?;
        Ok(self
            .inner
            .collections
            .iter()
            .map(|entry| entry.key().clone())
            .collect())
    }

    fn is_closed(&self) -> DocketResult<bool> {
        Ok(self.inner.closed.load(Ordering::Relaxed))
    }

    fn close(&self) -> DocketResult<()> {
        if self.inner.closed.swap(true, Ordering::Relaxed) {
            return Ok(());
        }

        for entry in self.inner.collections.iter() {
            entry.value().dispose()?;
        }
        self.inner.collections.clear();
        log::info!("In-memory store closed");
        Ok(())
    }
}

struct InMemoryStoreInner {
    collections: DashMap<String, InMemoryCollection>,
    closed: AtomicBool,
}

impl InMemoryStoreInner {
    fn new() -> Self {
        InMemoryStoreInner {
            collections: DashMap::new(),
            closed: AtomicBool::from(false),
        }
    }

    fn check_opened(&self) -> DocketResult<()> {
        if self.closed.load(Ordering::Relaxed) {
            log::error!("Store is closed");
            return Err(DocketError::new("Store is closed", ErrorKind::StoreClosed));
        }
        Ok(())
    }
}
