use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::common::{atomic, Atomic};

/// Error kinds for Docket operations
///
/// This enum represents all possible error types that can occur during repository
/// operations. Each error kind describes a specific category of failure, enabling
/// precise error handling.
///
/// Three broad classes exist:
///
/// - **Configuration-fatal** ([`ErrorKind::SchemaMissing`]): raised once at repository
///   construction when schema auto-creation is disabled and the backing collections or
///   indexes are absent; never retried.
/// - **Validation/business** ([`ErrorKind::DuplicateValue`], [`ErrorKind::DuplicateRelation`],
///   [`ErrorKind::NotFound`]): always caller-recoverable, carrying the offending
///   field/value pair.
/// - **Store lifecycle/infrastructure** ([`ErrorKind::StoreClosed`], [`ErrorKind::BackendError`]):
///   the store handle is unusable; reconnect policy lives with the connection provider,
///   outside this layer.
///
/// # Examples
///
/// ```rust,ignore
/// use docket::errors::{DocketError, ErrorKind, DocketResult};
///
/// fn example() -> DocketResult<()> {
///     Err(DocketError::new("Index not found", ErrorKind::IndexNotFound))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Schema Errors - actively used at repository construction
    /// Required collections or indexes are absent and auto-creation is disabled
    SchemaMissing,
    /// Collection does not exist
    CollectionNotFound,
    /// Index does not exist
    IndexNotFound,

    // Validation/Business Errors - always caller-recoverable
    /// A declared unique field already holds this value on another document
    DuplicateValue {
        /// The unique field that clashed
        field: String,
        /// The value already present on another document
        value: String,
    },
    /// A relation for this foreign-id pair already exists
    DuplicateRelation {
        /// Source side of the relation pair
        source: String,
        /// Target side of the relation pair
        target: String,
    },
    /// The requested entity was not found
    NotFound,

    // Data and Usage Errors
    /// The operation is not valid in the current context
    InvalidOperation,
    /// The provided ID is invalid
    InvalidId,
    /// Invalid data type for operation
    InvalidDataType,
    /// Invalid field name
    InvalidFieldName,
    /// Error mapping entity to/from document
    ObjectMappingError,

    // Store Lifecycle and Infrastructure Errors
    /// Store has already been closed
    StoreClosed,
    /// Error from storage backend
    BackendError,

    // Generic/Internal Errors - used as fallback
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::SchemaMissing => write!(f, "Schema missing"),
            ErrorKind::CollectionNotFound => write!(f, "Collection not found"),
            ErrorKind::IndexNotFound => write!(f, "Index not found"),
            ErrorKind::DuplicateValue { field, value } => {
                write!(f, "Duplicate value '{}' for unique field '{}'", value, field)
            }
            ErrorKind::DuplicateRelation { source, target } => {
                write!(f, "Duplicate relation ({}, {})", source, target)
            }
            ErrorKind::NotFound => write!(f, "Not found"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::InvalidId => write!(f, "Invalid ID"),
            ErrorKind::InvalidDataType => write!(f, "Invalid data type"),
            ErrorKind::InvalidFieldName => write!(f, "Invalid field name"),
            ErrorKind::ObjectMappingError => write!(f, "Object mapping error"),
            ErrorKind::StoreClosed => write!(f, "Store already closed"),
            ErrorKind::BackendError => write!(f, "Backend error"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom Docket error type.
///
/// `DocketError` encapsulates error information including the error message, kind, and
/// optional cause. It supports error chaining and backtraces for debugging.
///
/// # Examples
///
/// ```rust,ignore
/// use docket::errors::{DocketError, ErrorKind};
///
/// // Create a simple error
/// let err = DocketError::new("Collection not found", ErrorKind::CollectionNotFound);
///
/// // Create an error with a cause
/// let cause = DocketError::new("Store closed", ErrorKind::StoreClosed);
/// let err = DocketError::new_with_cause("Create failed", ErrorKind::BackendError, cause);
/// ```
///
/// # Type alias
///
/// The `DocketResult<T>` type alias is equivalent to `Result<T, DocketError>` and is
/// used throughout the codebase for operations that can fail.
#[derive(Clone)]
pub struct DocketError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<DocketError>>,
    backtrace: Atomic<Backtrace>,
}

impl DocketError {
    /// Creates a new `DocketError` with the specified message and error kind.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of the error
    /// * `error_kind` - The category of error
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        DocketError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Creates a new `DocketError` with a cause error.
    ///
    /// This creates an error chain where the cause error is preserved for debugging.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of the error
    /// * `error_kind` - The category of error
    /// * `cause` - The underlying error that caused this error
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: DocketError) -> Self {
        DocketError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Creates a `DuplicateValue` error naming the offending field and value.
    pub fn duplicate_value(field: &str, value: &str) -> Self {
        DocketError::new(
            &format!("A document with {} '{}' already exists", field, value),
            ErrorKind::DuplicateValue {
                field: field.to_string(),
                value: value.to_string(),
            },
        )
    }

    /// Creates a `DuplicateRelation` error naming the offending pair.
    pub fn duplicate_relation(source: &str, target: &str) -> Self {
        DocketError::new(
            &format!("A relation ({}, {}) already exists", source, target),
            ErrorKind::DuplicateRelation {
                source: source.to_string(),
                target: target.to_string(),
            },
        )
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&Box<DocketError>> {
        self.cause.as_ref()
    }
}

impl Display for DocketError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for DocketError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace.read()),
        }
    }
}

impl Error for DocketError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for Docket operations.
///
/// `DocketResult<T>` is shorthand for `Result<T, DocketError>`.
/// All fallible Docket operations return this type.
pub type DocketResult<T> = Result<T, DocketError>;

#[cfg(feature = "serde")]
impl serde::de::Error for DocketError {
    fn custom<T: Display>(msg: T) -> Self {
        DocketError::new(&msg.to_string(), ErrorKind::ObjectMappingError)
    }
}

#[cfg(feature = "serde")]
impl serde::ser::Error for DocketError {
    fn custom<T: Display>(msg: T) -> Self {
        DocketError::new(&msg.to_string(), ErrorKind::ObjectMappingError)
    }
}

// From trait implementations for automatic error conversion
impl From<std::io::Error> for DocketError {
    fn from(err: std::io::Error) -> Self {
        DocketError::new(&format!("IO error: {}", err), ErrorKind::BackendError)
    }
}

impl From<std::num::ParseIntError> for DocketError {
    fn from(err: std::num::ParseIntError) -> Self {
        DocketError::new(
            &format!("Integer parsing error: {}", err),
            ErrorKind::InvalidDataType,
        )
    }
}

impl From<String> for DocketError {
    fn from(msg: String) -> Self {
        DocketError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for DocketError {
    fn from(msg: &str) -> Self {
        DocketError::new(msg, ErrorKind::InternalError)
    }
}
