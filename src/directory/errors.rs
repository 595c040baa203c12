//! Provider-level directory failures.
//!
//! These errors are what a directory backend reports. They know nothing about
//! collections or schema semantics; [`SchemaError::from_directory_error`]
//! turns them into domain errors.
//!
//! [`SchemaError::from_directory_error`]: crate::error::SchemaError::from_directory_error

/// `E_FAIL`, used for failures without a more specific code.
pub const E_FAIL: u32 = 0x8000_4005;

/// Errors raised by a directory backend.
///
/// Every variant maps to the HRESULT a directory provider would return for
/// it; see [`DirectoryError::code`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    /// The object does not exist in the directory
    #[error("There is no such object on the server: {object}")]
    NoSuchObject { object: String },

    /// The server cannot be reached
    #[error("The server is not operational")]
    ServerDown,

    /// Insufficient access rights
    #[error("Access is denied")]
    AccessDenied,

    /// The value is already present in the attribute
    #[error("The specified value already exists in '{property}': {value}")]
    AttributeOrValueExists { property: String, value: String },

    /// The attribute or the value is not present
    #[error("The attribute or value '{value}' does not exist in '{property}'")]
    NoSuchAttribute { property: String, value: String },

    /// The change violates a schema constraint
    #[error("A constraint violation occurred: {message}")]
    ConstraintViolation { message: String },

    /// Provider specific failure
    #[error("{message}")]
    Provider { code: u32, message: String },
}

impl DirectoryError {
    /// HRESULT style code of the failure.
    pub fn code(&self) -> u32 {
        match self {
            DirectoryError::NoSuchObject { .. } => 0x8007_2030,
            DirectoryError::ServerDown => 0x8007_203A,
            DirectoryError::AccessDenied => 0x8007_0005,
            DirectoryError::AttributeOrValueExists { .. } => 0x8007_200D,
            DirectoryError::NoSuchAttribute { .. } => 0x8007_200A,
            DirectoryError::ConstraintViolation { .. } => 0x8007_202F,
            DirectoryError::Provider { code, .. } => *code,
        }
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        DirectoryError::Provider {
            code: E_FAIL,
            message: message.into(),
        }
    }
}
