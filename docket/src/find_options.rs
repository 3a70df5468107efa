//! Sorting and pagination options for find operations.

use crate::common::SortOrder;

/// Options for controlling find operations on a repository.
///
/// `FindOptions` specifies sorting and pagination for query results. Fields left unset
/// fall back to the entity's declared defaults when the repository executes the find:
/// the entity's default sort (typically `CreatedDate` descending), `skip = 0`, and
/// `limit = ` the entity's find ceiling.
///
/// # Examples
///
/// ```rust,ignore
/// use docket::find_options::{order_by, FindOptions};
/// use docket::SortOrder;
///
/// let options = FindOptions::new()
///     .order_by("CreatedDate", SortOrder::Ascending)
///     .skip(10)
///     .limit(20);
///
/// // Or through the convenience constructors
/// let options = order_by("UserName", SortOrder::Ascending).limit(100);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    pub(crate) order_by: Option<(String, SortOrder)>,
    pub(crate) skip: Option<u64>,
    pub(crate) limit: Option<u64>,
}

/// Creates `FindOptions` sorted by a field.
///
/// # Arguments
///
/// * `field_name` - The field to sort by
/// * `sort_order` - The sort order (Ascending or Descending)
pub fn order_by(field_name: &str, sort_order: SortOrder) -> FindOptions {
    FindOptions::new().order_by(field_name, sort_order)
}

/// Creates `FindOptions` that skips a number of results.
///
/// Useful for pagination: skip the first N results and process the remaining.
pub fn skip_by(skip: u64) -> FindOptions {
    FindOptions::new().skip(skip)
}

/// Creates `FindOptions` that limits the number of results.
///
/// Combined with skip for pagination: `skip(10).limit(20)` returns results 11-30.
pub fn limit_to(limit: u64) -> FindOptions {
    FindOptions::new().limit(limit)
}

impl FindOptions {
    /// Creates a new `FindOptions` with no explicit settings; entity defaults apply.
    pub fn new() -> FindOptions {
        FindOptions::default()
    }

    /// Sets the sort field and direction.
    pub fn order_by(mut self, field_name: &str, sort_order: SortOrder) -> FindOptions {
        self.order_by = Some((field_name.to_string(), sort_order));
        self
    }

    /// Sets the number of documents to skip from the beginning.
    pub fn skip(mut self, skip: u64) -> FindOptions {
        self.skip = Some(skip);
        self
    }

    /// Sets the maximum number of documents to return.
    pub fn limit(mut self, limit: u64) -> FindOptions {
        self.limit = Some(limit);
        self
    }
}
