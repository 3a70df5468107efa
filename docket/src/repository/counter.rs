//! Denormalized counter maintenance on parent documents.

use crate::common::Value;
use crate::errors::{DocketError, DocketResult, ErrorKind};
use crate::repository::entity::{Countable, Entity, EntitySchema};
use crate::store::{Collection, DocumentStore};
use std::marker::PhantomData;
use std::sync::Arc;

/// Maintains denormalized count fields on documents of a parent collection.
///
/// # Purpose
///
/// A relation is often mirrored by a counter on one of its endpoints, such as a
/// follower count on a user. `CounterMaintainer` adjusts those counters through the
/// store's atomic field increment, so concurrent adjustments never lose an update.
///
/// # Contract
///
/// Counter maintenance is explicit: the caller adjusts the counter alongside the
/// relation write, and deleting a relation without [record_remove](Self::record_remove)
/// leaves the counter stale. The [Countable] bound ties a relation type to its parent
/// at compile time, so an adjustment cannot target the wrong collection.
pub struct CounterMaintainer<P: Entity> {
    inner: Arc<CounterMaintainerInner>,
    _marker: PhantomData<fn() -> P>,
}

impl<P: Entity> Clone for CounterMaintainer<P> {
    fn clone(&self) -> Self {
        CounterMaintainer {
            inner: Arc::clone(&self.inner),
            _marker: PhantomData,
        }
    }
}

struct CounterMaintainerInner {
    collection: Collection,
    name: String,
}

impl<P: Entity> CounterMaintainer<P> {
    pub(crate) fn new(store: &DocumentStore, schema: &EntitySchema) -> DocketResult<CounterMaintainer<P>> {
        if !store.has_collection(schema.name())? {
            log::error!("Collection {} does not exist", schema.name());
            return Err(DocketError::new(
                &format!("Collection {} does not exist", schema.name()),
                ErrorKind::CollectionNotFound,
            ));
        }
        Ok(CounterMaintainer {
            inner: Arc::new(CounterMaintainerInner {
                collection: store.open_collection(schema.name())?,
                name: schema.name().to_string(),
            }),
            _marker: PhantomData,
        })
    }

    /// Atomically adds `delta` to a counter field of one parent document and returns
    /// the post-adjustment value.
    ///
    /// Absent and null fields count as zero. Fails with `NotFound` when no parent
    /// document exists at `parent_id`.
    pub fn adjust(&self, parent_id: &Value, field: &str, delta: i64) -> DocketResult<i64> {
        let adjusted = self.inner.collection.increment_field(parent_id, field, delta)?;
        log::debug!(
            "Adjusted {}.{} of {} by {} to {}",
            self.inner.name,
            field,
            parent_id,
            delta,
            adjusted
        );
        Ok(adjusted)
    }

    /// Bumps the counter mirroring a freshly created relation.
    pub fn record_insert<C: Countable<Parent = P>>(&self, relation: &C) -> DocketResult<i64> {
        self.adjust(&relation.parent_id(), &relation.count_field(), 1)
    }

    /// Drops the counter mirroring a freshly deleted relation.
    pub fn record_remove<C: Countable<Parent = P>>(&self, relation: &C) -> DocketResult<i64> {
        self.adjust(&relation.parent_id(), &relation.count_field(), -1)
    }
}
