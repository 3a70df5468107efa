//! Storage backend abstractions.
//!
//! The store layer follows a trait + facade pattern: [DocumentStoreProvider] and
//! [CollectionProvider] define what a backend must supply, while [DocumentStore] and
//! [Collection] are the cheap-clone facades the repository layer works against. The
//! bundled [memory] backend is the reference implementation.

mod collection;
mod descriptor;
mod document_store;
pub mod memory;

pub use collection::*;
pub use descriptor::*;
pub use document_store::*;
