//! Entity traits mapping Rust types to documents.

use crate::common::{
    Value, SortOrder, DEFAULT_FIND_CEILING, DOC_CREATED_DATE,
};
use crate::document::Document;
use crate::errors::DocketResult;
use crate::store::IndexDescriptor;

/// Conversion between a Rust type and its document form.
///
/// Implementations decide which fields are persisted and how they map to document
/// fields. Conversion errors surface as `ObjectMappingError`.
pub trait Persistable: Sized {
    /// Converts the value into a document.
    fn to_document(&self) -> DocketResult<Document>;

    /// Reconstructs the value from a document.
    fn from_document(document: &Document) -> DocketResult<Self>;
}

/// An index declared by an entity, created when the schema is bootstrapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityIndex {
    fields: Vec<String>,
}

impl EntityIndex {
    /// Creates an index over the given fields. A single field yields a plain index,
    /// multiple fields a composite one.
    pub fn new(fields: Vec<&str>) -> EntityIndex {
        EntityIndex {
            fields: fields.into_iter().map(|f| f.to_string()).collect(),
        }
    }

    /// The indexed field names, in declaration order.
    pub fn field_names(&self) -> &[String] {
        &self.fields
    }

    pub(crate) fn to_descriptor(&self) -> IndexDescriptor {
        let fields: Vec<&str> = self.fields.iter().map(|f| f.as_str()).collect();
        IndexDescriptor::new(&fields)
    }
}

/// A type stored and retrieved through an [`EntityRepository`](super::EntityRepository).
///
/// Entities describe their own persistence metadata. The repository reads the metadata
/// from `T::default()`, so the metadata methods must not depend on field values.
///
/// # Examples
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct User {
///     id: Option<i64>,
///     user_name: String,
///     email: String,
/// }
///
/// impl Entity for User {
///     fn entity_name(&self) -> String {
///         "User".to_string()
///     }
///
///     fn unique_fields(&self) -> Vec<String> {
///         vec!["UserName".to_string(), "Email".to_string()]
///     }
/// }
/// ```
pub trait Entity: Persistable + Default {
    /// The collection name backing this entity.
    fn entity_name(&self) -> String;

    /// Indexes to create for this entity during schema bootstrap.
    fn entity_indexes(&self) -> Vec<EntityIndex> {
        Vec::new()
    }

    /// Fields whose values must be unique across the collection.
    fn unique_fields(&self) -> Vec<String> {
        Vec::new()
    }

    /// Fields that updates never overwrite; the stored value always wins.
    fn guarded_fields(&self) -> Vec<String> {
        Vec::new()
    }

    /// The sequence that allocates ids for this entity, or `None` when ids are
    /// assigned by the caller.
    fn sequence_name(&self) -> Option<String> {
        Some(self.entity_name())
    }

    /// The sort applied to finds when no explicit ordering is given.
    fn default_sort(&self) -> (String, SortOrder) {
        (DOC_CREATED_DATE.to_string(), SortOrder::Descending)
    }

    /// Upper bound on results returned by an unbounded find.
    fn find_ceiling(&self) -> u64 {
        DEFAULT_FIND_CEILING
    }
}

/// An entity keyed by a pair of foreign ids rather than a surrogate sequence.
///
/// Relation entities get a composite id derived from the source and target field
/// values, which makes creates naturally idempotent per pair.
pub trait RelationEntity: Entity {
    /// The field holding the owning side of the relation.
    fn source_field(&self) -> String;

    /// The field holding the referenced side of the relation.
    fn target_field(&self) -> String;
}

/// A relation whose existence is mirrored by a counter field on a parent entity.
///
/// Implementing `Countable` ties the relation to the parent type at compile time,
/// so counter updates cannot target the wrong collection or field.
pub trait Countable: RelationEntity {
    /// The entity carrying the counter field.
    type Parent: Entity;

    /// The parent document id this instance counts towards.
    fn parent_id(&self) -> Value;

    /// The counter field on the parent document.
    fn count_field(&self) -> String;
}

/// Immutable snapshot of an entity's persistence metadata.
///
/// Captured once from `T::default()` and shared by the schema manager and
/// repositories, so metadata is read in one place.
#[derive(Debug, Clone)]
pub struct EntitySchema {
    name: String,
    indexes: Vec<EntityIndex>,
    unique_fields: Vec<String>,
    guarded_fields: Vec<String>,
    sequence_name: Option<String>,
    default_sort: (String, SortOrder),
    find_ceiling: u64,
}

impl EntitySchema {
    /// Captures the metadata of `T` from its default instance.
    pub fn of<T: Entity>() -> EntitySchema {
        let prototype = T::default();
        EntitySchema {
            name: prototype.entity_name(),
            indexes: prototype.entity_indexes(),
            unique_fields: prototype.unique_fields(),
            guarded_fields: prototype.guarded_fields(),
            sequence_name: prototype.sequence_name(),
            default_sort: prototype.default_sort(),
            find_ceiling: prototype.find_ceiling(),
        }
    }

    /// Captures relation metadata in addition to the base entity metadata, and adds
    /// a composite index over the source and target fields when not already declared.
    pub fn of_relation<R: RelationEntity>() -> EntitySchema {
        let prototype = R::default();
        let mut schema = EntitySchema::of::<R>();
        let pair = EntityIndex::new(vec![
            prototype.source_field().as_str(),
            prototype.target_field().as_str(),
        ]);
        if !schema.indexes.contains(&pair) {
            schema.indexes.push(pair);
        }
        schema
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn indexes(&self) -> &[EntityIndex] {
        &self.indexes
    }

    pub fn unique_fields(&self) -> &[String] {
        &self.unique_fields
    }

    pub fn guarded_fields(&self) -> &[String] {
        &self.guarded_fields
    }

    pub fn sequence_name(&self) -> Option<&str> {
        self.sequence_name.as_deref()
    }

    pub fn default_sort(&self) -> &(String, SortOrder) {
        &self.default_sort
    }

    pub fn find_ceiling(&self) -> u64 {
        self.find_ceiling
    }
}
