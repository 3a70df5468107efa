use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;

pub type Atomic<T> = Arc<RwLock<T>>;

#[inline]
pub fn atomic<T>(t: T) -> Atomic<T> {
    Arc::new(RwLock::new(t))
}

/// Returns the current UTC wall-clock time as milliseconds since the Unix epoch.
///
/// All repository timestamps (`CreatedDate`, `ModifiedDate`) are stamped with this
/// value; caller-supplied timestamps are never trusted on write paths.
#[inline]
pub fn current_time_millis() -> i64 {
    Utc::now().timestamp_millis()
}
