//! Error types for schema-class collection operations.
//!
//! Local validation failures (empty names, unbound classes, duplicates, bad
//! indices) are raised before any directory call is made. Failures reported
//! by the directory layer are translated into [`SchemaError`] values that
//! carry the operation and the directory context they happened in.

use crate::context::DirectoryContext;
use crate::directory::DirectoryError;
use std::fmt;

/// Main error type for schema-class collection operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// A required value was missing or empty
    #[error("Value for '{parameter}' cannot be null or empty")]
    NullArgument { parameter: &'static str },

    /// A value was malformed or otherwise unusable
    #[error("Invalid argument '{parameter}': {message}")]
    InvalidArgument {
        parameter: &'static str,
        message: String,
    },

    /// The class is already part of the collection
    #[error("'{name}' already exists in the collection")]
    DuplicateEntry { name: String },

    /// Index outside of the collection bounds
    #[error("Index {index} is out of range for a collection of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// The schema object has not been committed to the directory yet
    #[error("Schema object '{name}' has not been committed to the directory")]
    NotCommitted { name: String },

    /// The schema object has already been committed to the directory
    #[error("Schema object '{name}' has already been committed to the directory")]
    AlreadyCommitted { name: String },

    /// The class is not part of the collection
    #[error("'{name}' was not found in the collection")]
    NotFound { name: String },

    /// The value exists in the collection but not in the directory attribute,
    /// typically because it was inherited from a superior class
    #[error("Value '{value}' of property '{property}' cannot be modified")]
    ValueCannotBeModified { property: String, value: String },

    /// The directory object backing the collection does not exist
    #[error("Directory object not found during {operation} on {target}")]
    ObjectNotFound {
        operation: WriteOperation,
        target: String,
        #[source]
        source: DirectoryError,
    },

    /// The directory server could not be contacted
    #[error("Directory server {target} is not available for {operation}")]
    ServerUnavailable {
        operation: WriteOperation,
        target: String,
        #[source]
        source: DirectoryError,
    },

    /// The caller lacks the rights for the directory operation
    #[error("Access denied while performing {operation} on {target}")]
    AccessDenied {
        operation: WriteOperation,
        target: String,
        #[source]
        source: DirectoryError,
    },

    /// Any other failure reported by the directory layer
    #[error("Directory operation {operation} failed on {target} (0x{code:08X}): {source}")]
    DirectoryOperation {
        operation: WriteOperation,
        target: String,
        code: u32,
        #[source]
        source: DirectoryError,
    },
}

/// Broad classification of [`SchemaError`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NullArgument,
    InvalidArgument,
    InvalidState,
    NotFound,
    DirectoryOperation,
}

/// Directory operations performed on behalf of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteOperation {
    /// Acquire the directory entry backing the owning schema class
    Bind,
    /// Read attribute values
    Read,
    /// Append a value to the attribute
    AddValue,
    /// Remove a value from the attribute
    RemoveValue,
    /// Remove every value of the attribute
    ClearValues,
    /// Create a new schema class entry
    CreateEntry,
}

impl fmt::Display for WriteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WriteOperation::Bind => "bind",
            WriteOperation::Read => "read",
            WriteOperation::AddValue => "add-value",
            WriteOperation::RemoveValue => "remove-value",
            WriteOperation::ClearValues => "clear-values",
            WriteOperation::CreateEntry => "create-entry",
        };
        f.write_str(name)
    }
}

impl SchemaError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SchemaError::NullArgument { .. } => ErrorKind::NullArgument,
            SchemaError::InvalidArgument { .. }
            | SchemaError::DuplicateEntry { .. }
            | SchemaError::IndexOutOfRange { .. } => ErrorKind::InvalidArgument,
            SchemaError::NotCommitted { .. } | SchemaError::AlreadyCommitted { .. } => {
                ErrorKind::InvalidState
            }
            SchemaError::NotFound { .. } => ErrorKind::NotFound,
            SchemaError::ValueCannotBeModified { .. }
            | SchemaError::ObjectNotFound { .. }
            | SchemaError::ServerUnavailable { .. }
            | SchemaError::AccessDenied { .. }
            | SchemaError::DirectoryOperation { .. } => ErrorKind::DirectoryOperation,
        }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(parameter: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            parameter,
            message: message.into(),
        }
    }

    /// Create a not-committed error for the named schema object.
    pub fn not_committed(name: impl fmt::Display) -> Self {
        Self::NotCommitted {
            name: name.to_string(),
        }
    }

    /// Create a duplicate entry error.
    pub fn duplicate(name: impl fmt::Display) -> Self {
        Self::DuplicateEntry {
            name: name.to_string(),
        }
    }

    /// Create a not-found error.
    pub fn not_found(name: impl fmt::Display) -> Self {
        Self::NotFound {
            name: name.to_string(),
        }
    }

    /// Translate a provider failure into a domain error.
    ///
    /// The directory context supplies the target reported in the message; the
    /// operation records what the collection was doing when the call failed.
    pub fn from_directory_error(
        context: &DirectoryContext,
        operation: WriteOperation,
        error: DirectoryError,
    ) -> Self {
        let target = context.target().to_string();
        match error {
            source @ DirectoryError::NoSuchObject { .. } => SchemaError::ObjectNotFound {
                operation,
                target,
                source,
            },
            source @ DirectoryError::ServerDown => SchemaError::ServerUnavailable {
                operation,
                target,
                source,
            },
            source @ DirectoryError::AccessDenied => SchemaError::AccessDenied {
                operation,
                target,
                source,
            },
            source => SchemaError::DirectoryOperation {
                operation,
                target,
                code: source.code(),
                source,
            },
        }
    }

    /// The directory operation that failed, for errors raised by the
    /// directory layer.
    pub fn operation(&self) -> Option<WriteOperation> {
        match self {
            SchemaError::ObjectNotFound { operation, .. }
            | SchemaError::ServerUnavailable { operation, .. }
            | SchemaError::AccessDenied { operation, .. }
            | SchemaError::DirectoryOperation { operation, .. } => Some(*operation),
            _ => None,
        }
    }

    /// The provider code of the underlying directory failure, if any.
    pub fn directory_code(&self) -> Option<u32> {
        match self {
            SchemaError::ObjectNotFound { source, .. }
            | SchemaError::ServerUnavailable { source, .. }
            | SchemaError::AccessDenied { source, .. }
            | SchemaError::DirectoryOperation { source, .. } => Some(source.code()),
            _ => None,
        }
    }
}

/// Result type for schema-class collection operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::DirectoryContextType;

    fn server_context() -> DirectoryContext {
        DirectoryContext::builder(DirectoryContextType::DirectoryServer)
            .name("dc01.corp.example.com")
            .build()
            .unwrap()
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            SchemaError::NullArgument { parameter: "name" }.kind(),
            ErrorKind::NullArgument
        );
        assert_eq!(
            SchemaError::duplicate("user").kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            SchemaError::IndexOutOfRange { index: 3, len: 1 }.kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            SchemaError::not_committed("user").kind(),
            ErrorKind::InvalidState
        );
        assert_eq!(SchemaError::not_found("user").kind(), ErrorKind::NotFound);
        assert_eq!(
            SchemaError::ValueCannotBeModified {
                property: "possSuperiors".to_string(),
                value: "top".to_string(),
            }
            .kind(),
            ErrorKind::DirectoryOperation
        );
    }

    #[test]
    fn test_translate_well_known_failures() {
        let context = server_context();

        let error = SchemaError::from_directory_error(
            &context,
            WriteOperation::Bind,
            DirectoryError::NoSuchObject {
                object: "CN=contoso-Widget".to_string(),
            },
        );
        assert!(matches!(
            error,
            SchemaError::ObjectNotFound { ref target, .. } if target == "dc01.corp.example.com"
        ));
        assert_eq!(error.operation(), Some(WriteOperation::Bind));
        assert_eq!(error.directory_code(), Some(0x8007_2030));

        let error = SchemaError::from_directory_error(
            &context,
            WriteOperation::AddValue,
            DirectoryError::ServerDown,
        );
        assert!(matches!(error, SchemaError::ServerUnavailable { .. }));
        assert!(error.to_string().contains("add-value"));

        let error = SchemaError::from_directory_error(
            &context,
            WriteOperation::RemoveValue,
            DirectoryError::AccessDenied,
        );
        assert!(matches!(
            error,
            SchemaError::AccessDenied {
                operation: WriteOperation::RemoveValue,
                ..
            }
        ));
    }

    #[test]
    fn test_translate_provider_failure_keeps_code() {
        let context = server_context();
        let error = SchemaError::from_directory_error(
            &context,
            WriteOperation::ClearValues,
            DirectoryError::Provider {
                code: 0x8007_2035,
                message: "The server is unwilling to process the request".to_string(),
            },
        );

        match &error {
            SchemaError::DirectoryOperation {
                operation, code, ..
            } => {
                assert_eq!(*operation, WriteOperation::ClearValues);
                assert_eq!(*code, 0x8007_2035);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(error.to_string().contains("clear-values"));
        assert!(error.to_string().contains("0x80072035"));
        assert!(error.to_string().contains("unwilling to process"));
    }

    #[test]
    fn test_translated_error_keeps_source() {
        use std::error::Error;

        let error = SchemaError::from_directory_error(
            &server_context(),
            WriteOperation::RemoveValue,
            DirectoryError::ServerDown,
        );

        let source = error
            .source()
            .and_then(|s| s.downcast_ref::<DirectoryError>())
            .expect("directory error as source");
        assert_eq!(*source, DirectoryError::ServerDown);
        assert!(SchemaError::not_found("user").source().is_none());
        assert_eq!(SchemaError::not_found("user").operation(), None);
    }
}
