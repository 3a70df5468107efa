//! Application-enforced unique fields.

use crate::common::Value;
use crate::document::Document;
use crate::errors::{DocketError, DocketResult};
use crate::store::{Collection, IndexDescriptor};

/// Checks a document's unique fields against the collection before a write.
///
/// # Purpose
///
/// The store has no unique-index primitive, so uniqueness is enforced here: for each
/// declared unique field, an index lookup finds documents carrying the same value, and
/// any hit belonging to a different document fails the write with `DuplicateValue`.
///
/// # Window
///
/// The check and the subsequent write are two separate store operations. Two writers
/// racing the same value can both pass the check and both land; callers that need a
/// hard guarantee must serialize their own writes.
#[derive(Clone)]
pub struct UniquenessGuard {
    collection: Collection,
    unique_fields: Vec<String>,
}

impl UniquenessGuard {
    /// Creates a guard over the given fields. The schema bootstrap has already
    /// created a single-field index for each of them.
    pub fn new(collection: Collection, unique_fields: Vec<String>) -> UniquenessGuard {
        UniquenessGuard {
            collection,
            unique_fields,
        }
    }

    /// Fails with `DuplicateValue` when any unique field of `document` collides with
    /// a document other than `exclude`.
    ///
    /// `exclude` is the id of the document being written, so an update that keeps its
    /// own values passes. Null and absent unique fields are never treated as
    /// collisions.
    pub fn ensure_unique(
        &self,
        document: &Document,
        exclude: Option<&Value>,
    ) -> DocketResult<()> {
        for field in &self.unique_fields {
            let value = document.get(field);
            if value.is_null() {
                continue;
            }

            let descriptor = IndexDescriptor::single(field);
            let sample = std::slice::from_ref(&value);
            let hits = self.collection.index_lookup(&descriptor, sample)?;
            let collides = hits
                .iter()
                .any(|hit| exclude.map_or(true, |own| hit != own));
            if collides {
                log::error!("Duplicate value '{}' for unique field {}", value, field);
                return Err(DocketError::duplicate_value(field, &value.to_string()));
            }
        }
        Ok(())
    }
}
