//! # Docket - Typed Repository Layer over a Schemaless Document Store
//!
//! Docket is an embedded document-store repository layer written in Rust. It supplies,
//! on top of bare CRUD, the four persistence patterns a schemaless store does not
//! provide natively:
//!
//! - **Sequence allocation**: unique, monotonically increasing surrogate ids per entity
//!   type, produced by a single atomic store-side increment
//! - **Composite-key repositories**: relation entities keyed by a deterministic id
//!   derived from the related pair, making retried creates naturally idempotent
//! - **Uniqueness enforcement**: application-level "no two documents share this field
//!   value" checks over declared unique fields
//! - **Counter maintenance**: atomic increment/decrement of denormalized roll-up
//!   fields on parent documents
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docket::connection::MemoryConnection;
//! use docket::docket::Docket;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Docket::builder().open(MemoryConnection::new())?;
//!
//! let users = db.repository::<User>()?;
//! let alice = users.create(User::named("alice"))?;
//!
//! let found = users.get(&alice.id())?;
//!
//! db.close()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Design Pattern
//!
//! Docket uses the **PIMPL (Pointer To IMPLementation)** design pattern throughout:
//! public facades (`Docket`, `DocumentStore`, `Collection`, `EntityRepository`) wrap
//! an `Arc` to a hidden implementation, providing:
//!
//! - **Encapsulation**: implementation details are completely hidden
//! - **Thread Safety**: all clones share the same underlying state
//! - **API Stability**: the public interface can evolve independently
//!
//! ## Module Organization
//!
//! - [`common`] - Common types, constants, and utilities
//! - [`connection`] - Connection provider abstraction and the bundled memory connection
//! - [`docket`] - Core database facade
//! - [`docket_builder`] - Builder for opening a database
//! - [`docket_config`] - Database configuration
//! - [`document`] - Schemaless document type and the `doc!` macro
//! - [`errors`] - Error types and result definitions
//! - [`filter`] - Query filters and the fluent filter builder
//! - [`find_options`] - Sorting and pagination options
//! - [`repository`] - Typed entity and relation repositories
//! - [`store`] - Storage backend abstractions and the in-memory store

pub mod common;
pub mod connection;
pub mod docket;
pub mod docket_builder;
pub mod docket_config;
pub mod document;
pub mod errors;
pub mod filter;
pub mod find_options;
pub mod repository;
pub mod store;

pub use common::{Value, SortOrder};

// It will take effect during test, project wide
#[cfg(test)]
#[ctor::ctor]
fn init() {
    colog::init();
}
