//! Named sequence counters for surrogate id allocation.

use crate::common::{Value, SEQUENCE_COLLECTION, SEQUENCE_DOC_ID};
use crate::errors::{DocketError, DocketResult, ErrorKind};
use crate::store::{Collection, DocumentStore};

/// Allocates monotonically increasing ids from named sequences.
///
/// # Purpose
///
/// All sequences share one well-known document in the `Sequences` collection, one
/// integer field per sequence name. Allocation is a single atomic increment of that
/// field through the store, so two concurrent allocations of the same sequence can
/// never observe the same value.
///
/// # Limitation
///
/// Every allocation, for every sequence, contends on the same document. That is
/// acceptable at this write volume; a backend under heavier load would shard the
/// counters into one document per sequence.
#[derive(Clone)]
pub struct SequenceAllocator {
    sequences: Collection,
}

impl SequenceAllocator {
    /// Opens the allocator over the store's sequence collection.
    pub fn new(store: &DocumentStore) -> DocketResult<SequenceAllocator> {
        Ok(SequenceAllocator {
            sequences: store.open_collection(SEQUENCE_COLLECTION)?,
        })
    }

    /// Atomically increments a sequence and returns the new value.
    ///
    /// The first allocation of a seeded sequence returns 1. Fails with
    /// `SchemaMissing` when the sequence document was never seeded; store
    /// lifecycle failures keep their own kind.
    pub fn increment(&self, sequence: &str) -> DocketResult<i64> {
        let id = Value::from(SEQUENCE_DOC_ID);
        self.sequences
            .increment_field(&id, sequence, 1)
            .map_err(|cause| {
                if matches!(cause.kind(), ErrorKind::NotFound) {
                    log::error!("Sequence {} is not seeded", sequence);
                    return DocketError::new_with_cause(
                        &format!("Sequence {} is not seeded", sequence),
                        ErrorKind::SchemaMissing,
                        cause,
                    );
                }
                cause
            })
    }

    /// Returns the last value handed out by a sequence without consuming one.
    pub fn current(&self, sequence: &str) -> DocketResult<i64> {
        let id = Value::from(SEQUENCE_DOC_ID);
        match self.sequences.get(&id)? {
            Some(document) => Ok(document.get(sequence).as_i64().unwrap_or(0)),
            None => Ok(0),
        }
    }
}
