/// Specifies the direction for sorting documents.
///
/// # Purpose
/// Defines whether documents should be sorted in ascending (low to high) or descending
/// (high to low) order. Used in query options to control result ordering, and as the
/// default sort direction declared per entity type.
///
/// # Usage
/// Used with `order_by()` when querying a repository:
/// ```text
/// let options = order_by("CreatedDate", SortOrder::Ascending);
/// let results = repository.find_with_options(filter, options)?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Sort in ascending order (smallest to largest, A-Z, oldest to newest)
    Ascending,
    /// Sort in descending order (largest to smallest, Z-A, newest to oldest)
    Descending,
}
