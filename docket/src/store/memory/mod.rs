//! The bundled in-memory storage backend.
//!
//! Suitable for tests and embedded use. All coordination the repository layer relies
//! on (replace-at-id writes, single-document atomic field increments) is serialized by
//! a per-collection mutation lock, so the backend honors the same atomicity contract a
//! remote document store would.

mod collection;
mod store;

pub use collection::InMemoryCollection;
pub use store::InMemoryStore;
