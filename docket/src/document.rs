//! The schemaless document type stored in collections.

use crate::common::{Value, DOC_CREATED_DATE, DOC_ID, DOC_META, DOC_MODIFIED_DATE};
use crate::errors::{DocketError, DocketResult, ErrorKind};
use im::OrdMap;
use std::fmt::{Debug, Display, Formatter};

/// A schemaless record stored in a [Collection](crate::store::Collection).
///
/// # Purpose
/// `Document` is the wire-level unit of persistence: an ordered map from string field
/// names to [Value]s. Entity repositories convert typed entities to and from this
/// representation; the store only ever sees documents.
///
/// # Characteristics
/// - **Persistent map**: backed by an immutable ordered map, so cloning a document is
///   cheap and a stored document is never aliased by later caller mutation
/// - **Fixed repository fields**: `Id`, `CreatedDate`, and `ModifiedDate` are ordinary
///   fields with fixed names, stamped by the repository layer
/// - **Open attributes**: the `Meta` field holds a nested document for loosely-typed
///   attributes not promoted to first-class fields
///
/// # Usage
/// ```text
/// let mut doc = doc! {
///     UserName: "alice",
///     FollowersCount: 0i64,
///     Meta: { locale: "en" }
/// };
/// doc.put("Email", "alice@example.com")?;
/// let name = doc.get("UserName");
/// ```
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    fields: OrdMap<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Document {
            fields: OrdMap::new(),
        }
    }

    /// Returns `true` if the document holds no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the number of fields in the document.
    pub fn size(&self) -> usize {
        self.fields.len()
    }

    /// Puts a field into the document, replacing any previous value.
    ///
    /// # Arguments
    ///
    /// * `key` - The field name; must be non-empty
    /// * `value` - Any value convertible into [Value]
    ///
    /// # Errors
    ///
    /// Returns an `InvalidFieldName` error when the key is empty.
    pub fn put<T: Into<Value>>(&mut self, key: &str, value: T) -> DocketResult<()> {
        if key.is_empty() {
            log::error!("Field name cannot be empty");
            return Err(DocketError::new(
                "Field name cannot be empty",
                ErrorKind::InvalidFieldName,
            ));
        }
        self.fields.insert(key.to_string(), value.into());
        Ok(())
    }

    /// Gets the value of a field, or [Value::Null] when the field is absent.
    ///
    /// Absent and explicitly-null fields are indistinguishable on read, matching the
    /// store's treatment of missing fields in filters and indexes.
    pub fn get(&self, key: &str) -> Value {
        self.fields.get(key).cloned().unwrap_or(Value::Null)
    }

    /// Removes a field from the document, returning its previous value if present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    /// Returns `true` if the document contains the given field.
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Returns the primary key of this document: the value of its `Id` field.
    pub fn id(&self) -> Value {
        self.get(DOC_ID)
    }

    /// Returns `true` if this document carries a non-null `Id` field.
    pub fn has_id(&self) -> bool {
        !self.id().is_null()
    }

    /// Returns the `CreatedDate` timestamp in epoch milliseconds, if stamped.
    pub fn created_date(&self) -> Option<i64> {
        self.get(DOC_CREATED_DATE).as_i64()
    }

    /// Returns the `ModifiedDate` timestamp in epoch milliseconds, if stamped.
    pub fn modified_date(&self) -> Option<i64> {
        self.get(DOC_MODIFIED_DATE).as_i64()
    }

    /// Returns the nested `Meta` document, or `None` when absent or not a document.
    pub fn meta(&self) -> Option<Document> {
        match self.get(DOC_META) {
            Value::Document(doc) => Some(doc),
            _ => None,
        }
    }

    /// Returns an iterator over the fields in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// Returns all field names in order.
    pub fn field_names(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        write!(f, "}}")
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

/// Strips surrounding quotes from a stringified `doc!` key so that both identifier and
/// string-literal keys produce the same field name.
pub fn normalize(value: &str) -> String {
    value.trim_matches('"').to_string()
}

/// Creates a [Document] from field/value pairs.
///
/// Keys can be identifiers or string literals; values can be expressions, nested
/// `{ .. }` documents, or `[ .. ]` arrays.
///
/// # Examples
///
/// ```rust,ignore
/// let user = doc! {
///     UserName: "alice",
///     FollowersCount: 0i64,
///     Meta: { locale: "en", tags: ["beta", "staff"] }
/// };
/// ```
#[macro_export]
macro_rules! doc {
    // match an empty document
    () => {
        $crate::document::Document::new()
    };

    // match a document with key value pairs
    ($($key:tt : $value:tt),* $(,)?) => {
        {
            #[allow(unused_imports)]
            use $crate::doc_value;

            let mut doc = $crate::document::Document::new();
            $(
                doc.put(&$crate::document::normalize(stringify!($key)), $crate::doc_value!($value))
                .expect(&format!("Failed to put value {} in document", stringify!($value)));
            )*
            doc
        }
    };
}

/// Helper macro to convert values for the doc! macro.
/// Handles nested documents, arrays, and expressions.
#[macro_export]
macro_rules! doc_value {
    // match a nested document
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        {
            $crate::common::Value::Document($crate::doc!{ $($key : $value),* })
        }
    };

    // match an array of values
    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::doc_value!($value)),*])
    };

    // match an expression (variable, function call, literal, etc.)
    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}
