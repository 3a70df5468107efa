use crate::document::Document;
use crate::errors::DocketResult;
use crate::filter::{Filter, FilterProvider};
use std::fmt::{Display, Formatter};

/// Matches documents that satisfy every child filter.
pub struct AndFilter {
    filters: Vec<Filter>,
}

impl AndFilter {
    pub fn new(filters: Vec<Filter>) -> Self {
        AndFilter { filters }
    }
}

impl FilterProvider for AndFilter {
    fn apply(&self, entry: &Document) -> DocketResult<bool> {
        for filter in &self.filters {
            if !filter.apply(entry)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl Display for AndFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, filter) in self.filters.iter().enumerate() {
            if i > 0 {
                write!(f, " && ")?;
            }
            write!(f, "{}", filter)?;
        }
        write!(f, ")")
    }
}

/// Matches documents that satisfy at least one child filter.
pub struct OrFilter {
    filters: Vec<Filter>,
}

impl OrFilter {
    pub fn new(filters: Vec<Filter>) -> Self {
        OrFilter { filters }
    }
}

impl FilterProvider for OrFilter {
    fn apply(&self, entry: &Document) -> DocketResult<bool> {
        for filter in &self.filters {
            if filter.apply(entry)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl Display for OrFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, filter) in self.filters.iter().enumerate() {
            if i > 0 {
                write!(f, " || ")?;
            }
            write!(f, "{}", filter)?;
        }
        write!(f, ")")
    }
}

/// Matches documents that do not satisfy the child filter.
pub struct NotFilter {
    filter: Filter,
}

impl NotFilter {
    pub fn new(filter: Filter) -> Self {
        NotFilter { filter }
    }
}

impl FilterProvider for NotFilter {
    fn apply(&self, entry: &Document) -> DocketResult<bool> {
        Ok(!self.filter.apply(entry)?)
    }
}

impl Display for NotFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "!({})", self.filter)
    }
}
