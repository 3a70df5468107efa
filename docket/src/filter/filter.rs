use crate::document::Document;
use crate::errors::DocketResult;
use crate::filter::{AllFilter, AndFilter, NotFilter, OrFilter};
use std::any::Any;
use std::fmt::Display;
use std::ops::Deref;
use std::sync::Arc;

/// Trait for implementing filter predicates.
///
/// A `FilterProvider` decides whether a document matches a condition. Implementations
/// are composed into trees through the logical filters and evaluated per document
/// during a find.
pub trait FilterProvider: Any + Send + Sync + Display {
    /// Applies the filter to a document and returns whether it matches.
    ///
    /// # Arguments
    ///
    /// * `entry` - The document to evaluate
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the document matches the filter, `Ok(false)` otherwise
    fn apply(&self, entry: &Document) -> DocketResult<bool>;

    /// Gets the field name this filter operates on, if it targets a single field.
    fn field_name(&self) -> Option<&str> {
        None
    }
}

/// Facade over a [FilterProvider] implementation.
///
/// `Filter` wraps a predicate behind an `Arc` so filters compose and clone cheaply.
/// Use the fluent [field](crate::filter::field) builder to create leaf filters and the
/// combinators here to build trees:
///
/// ```text
/// let filter = field("UserName").eq("alice")
///     .and(field("CreatedDate").gt(since));
/// ```
#[derive(Clone)]
pub struct Filter {
    inner: Arc<dyn FilterProvider>,
}

impl Filter {
    /// Creates a facade over the given predicate.
    pub fn new<P: FilterProvider + 'static>(provider: P) -> Self {
        Filter {
            inner: Arc::new(provider),
        }
    }

    /// Combines this filter with another; both must match.
    pub fn and(self, other: Filter) -> Filter {
        Filter::new(AndFilter::new(vec![self, other]))
    }

    /// Combines this filter with another; either may match.
    pub fn or(self, other: Filter) -> Filter {
        Filter::new(OrFilter::new(vec![self, other]))
    }

    /// Negates this filter.
    pub fn not(self) -> Filter {
        Filter::new(NotFilter::new(self))
    }
}

impl Deref for Filter {
    type Target = dyn FilterProvider;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref()
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

/// Returns a filter matching every document.
pub fn all() -> Filter {
    Filter::new(AllFilter)
}

/// Returns the negation of a filter.
pub fn not(filter: Filter) -> Filter {
    filter.not()
}

/// Returns a filter matching documents that satisfy every given filter.
pub fn and(filters: Vec<Filter>) -> Filter {
    Filter::new(AndFilter::new(filters))
}

/// Returns a filter matching documents that satisfy any given filter.
pub fn or(filters: Vec<Filter>) -> Filter {
    Filter::new(OrFilter::new(filters))
}
