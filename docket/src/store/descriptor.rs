use crate::common::INDEX_NAME_SEPARATOR;
use smallvec::SmallVec;
use std::fmt::{Display, Formatter};

/// Describes a secondary index over one or more document fields.
///
/// # Purpose
/// Declares an equality/sort index on a collection. Single-field descriptors back the
/// uniqueness guard's lookups; two-field descriptors back the composite-key lookups of
/// relation repositories.
///
/// # Naming
/// An index is named by concatenating its constituent field names with an underscore,
/// e.g. `OwnerId_FollowerId`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexDescriptor {
    fields: SmallVec<[String; 2]>,
}

impl IndexDescriptor {
    /// Creates a descriptor over the given fields, in order.
    ///
    /// The field order is significant: a composite index on `(OwnerId, FollowerId)` is
    /// distinct from one on `(FollowerId, OwnerId)`.
    pub fn new(fields: &[&str]) -> Self {
        IndexDescriptor {
            fields: fields.iter().map(|field| field.to_string()).collect(),
        }
    }

    /// Creates a descriptor over a single field.
    pub fn single(field: &str) -> Self {
        IndexDescriptor::new(&[field])
    }

    /// Creates a descriptor over an ordered pair of fields.
    pub fn composite(first: &str, second: &str) -> Self {
        IndexDescriptor::new(&[first, second])
    }

    /// Returns the indexed field names in order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Returns the index name: the field names joined with an underscore.
    pub fn name(&self) -> String {
        self.fields.join(INDEX_NAME_SEPARATOR)
    }

    /// Returns `true` if this descriptor spans more than one field.
    pub fn is_composite(&self) -> bool {
        self.fields.len() > 1
    }
}

impl Display for IndexDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
