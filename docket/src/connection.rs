//! Connection provider abstraction.
//!
//! A connection provider supplies a live [DocumentStore] handle to the repository
//! layer. Reconnection and backoff policy live entirely behind this trait; the
//! repository layer always assumes a healthy connection when invoked and surfaces a
//! transient `BackendError` when the provider cannot supply one.

use crate::errors::DocketResult;
use crate::store::memory::InMemoryStore;
use crate::store::DocumentStore;

/// A trait for supplying a connected document-store handle.
///
/// Implementations own the transport concern (sockets, retries, backoff); the
/// repository layer only calls [`connect`](ConnectionProvider::connect) once when the
/// database is opened.
pub trait ConnectionProvider: Send + Sync {
    /// Returns a connected store handle.
    ///
    /// # Errors
    ///
    /// Returns a `BackendError` when no connection can be established. The repository
    /// layer never retries; retry policy belongs to the provider.
    fn connect(&self) -> DocketResult<DocumentStore>;
}

/// The bundled reference connection: wraps the in-memory store.
///
/// # Examples
///
/// ```rust,ignore
/// let db = Docket::builder().open(MemoryConnection::new())?;
/// ```
#[derive(Clone)]
pub struct MemoryConnection {
    store: DocumentStore,
}

impl MemoryConnection {
    /// Creates a connection backed by a fresh in-memory store.
    pub fn new() -> Self {
        MemoryConnection {
            store: DocumentStore::new(InMemoryStore::new()),
        }
    }
}

impl Default for MemoryConnection {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionProvider for MemoryConnection {
    fn connect(&self) -> DocketResult<DocumentStore> {
        Ok(self.store.clone())
    }
}
