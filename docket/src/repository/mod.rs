//! Typed repositories over document collections.
//!
//! Repositories provide an object-mapped view of collections: entities declare their
//! collection name, indexes, uniqueness rules, and id sequence through the [`Entity`]
//! trait, and the repository handles id allocation, timestamp stamping, uniqueness
//! checks, and find queries on top of the raw collection.

mod counter;
mod entity;
mod entity_repository;
mod relation_repository;
mod schema;
mod sequence;
mod uniqueness;

pub use counter::CounterMaintainer;
pub use entity::{Countable, Entity, EntityIndex, EntitySchema, Persistable, RelationEntity};
pub use entity_repository::EntityRepository;
pub use relation_repository::RelationRepository;
pub use schema::SchemaManager;
pub use sequence::SequenceAllocator;
pub use uniqueness::UniquenessGuard;
