use crate::common::Value;
use crate::document::Document;
use crate::errors::DocketResult;
use crate::filter::FilterProvider;
use std::fmt::{Display, Formatter};

/// Matches every document. The identity element of filter composition.
pub struct AllFilter;

impl FilterProvider for AllFilter {
    fn apply(&self, _entry: &Document) -> DocketResult<bool> {
        Ok(true)
    }
}

impl Display for AllFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "(all)")
    }
}

/// Matches documents whose field equals a value.
///
/// Uses [Value]'s cross-width numeric equality, so `eq(5i32)` matches a stored
/// `I64(5)`.
pub struct EqualsFilter {
    field: String,
    value: Value,
}

impl EqualsFilter {
    pub fn new(field: String, value: Value) -> Self {
        EqualsFilter { field, value }
    }
}

impl FilterProvider for EqualsFilter {
    fn apply(&self, entry: &Document) -> DocketResult<bool> {
        Ok(entry.get(&self.field) == self.value)
    }

    fn field_name(&self) -> Option<&str> {
        Some(&self.field)
    }
}

impl Display for EqualsFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} == {})", self.field, self.value)
    }
}

/// Matches documents whose field does not equal a value.
pub struct NotEqualsFilter {
    field: String,
    value: Value,
}

impl NotEqualsFilter {
    pub fn new(field: String, value: Value) -> Self {
        NotEqualsFilter { field, value }
    }
}

impl FilterProvider for NotEqualsFilter {
    fn apply(&self, entry: &Document) -> DocketResult<bool> {
        Ok(entry.get(&self.field) != self.value)
    }

    fn field_name(&self) -> Option<&str> {
        Some(&self.field)
    }
}

impl Display for NotEqualsFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} != {})", self.field, self.value)
    }
}

/// Comparison direction for [ComparisonFilter].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonMode {
    Greater,
    GreaterEqual,
    Lesser,
    LesserEqual,
}

/// Matches documents whose field compares against a bound, used for range queries
/// such as greater-than on dates.
///
/// Null and absent fields never match a comparison.
pub struct ComparisonFilter {
    field: String,
    bound: Value,
    mode: ComparisonMode,
}

impl ComparisonFilter {
    pub fn new(field: String, bound: Value, mode: ComparisonMode) -> Self {
        ComparisonFilter { field, bound, mode }
    }
}

impl FilterProvider for ComparisonFilter {
    fn apply(&self, entry: &Document) -> DocketResult<bool> {
        let value = entry.get(&self.field);
        if value.is_null() {
            return Ok(false);
        }

        Ok(match self.mode {
            ComparisonMode::Greater => value > self.bound,
            ComparisonMode::GreaterEqual => value >= self.bound,
            ComparisonMode::Lesser => value < self.bound,
            ComparisonMode::LesserEqual => value <= self.bound,
        })
    }

    fn field_name(&self) -> Option<&str> {
        Some(&self.field)
    }
}

impl Display for ComparisonFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let op = match self.mode {
            ComparisonMode::Greater => ">",
            ComparisonMode::GreaterEqual => ">=",
            ComparisonMode::Lesser => "<",
            ComparisonMode::LesserEqual => "<=",
        };
        write!(f, "({} {} {})", self.field, op, self.bound)
    }
}

/// Matches documents whose string field starts with a prefix.
///
/// Non-string and absent fields never match.
pub struct StartsWithFilter {
    field: String,
    prefix: String,
}

impl StartsWithFilter {
    pub fn new(field: String, prefix: String) -> Self {
        StartsWithFilter { field, prefix }
    }
}

impl FilterProvider for StartsWithFilter {
    fn apply(&self, entry: &Document) -> DocketResult<bool> {
        Ok(entry
            .get(&self.field)
            .as_str()
            .map(|s| s.starts_with(&self.prefix))
            .unwrap_or(false))
    }

    fn field_name(&self) -> Option<&str> {
        Some(&self.field)
    }
}

impl Display for StartsWithFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} starts_with {})", self.field, self.prefix)
    }
}
