//! Error types for SED-ML reading, writing and tree manipulation
//!
//! Two families of failure live here:
//!
//! - [`Error`] covers fatal I/O and serializer failures. Problems inside a
//!   document never surface as `Error`; they are recorded in the document's
//!   [`ErrorLog`](crate::diagnostics::ErrorLog) instead.
//! - [`OperationError`] is the status taxonomy returned by setters, typed
//!   adds and collection operations.
//!
//! # Error Codes
//!
//! - `E1001`: I/O error reading or writing a file
//! - `E2001`: XML serialization error
//! - `E2002`: Content is not valid UTF-8

use std::io;
use thiserror::Error;

/// Result type for SED-ML I/O operations
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors raised by file and stream entry points
#[derive(Error, Debug)]
pub enum Error {
    /// IO error occurred while reading or writing
    ///
    /// **Error Code**: E1001
    #[error("[E1001] I/O error: {0}")]
    Io(#[from] io::Error),

    /// The XML serializer failed
    ///
    /// **Error Code**: E2001
    #[error("[E2001] XML write error: {0}")]
    XmlWrite(String),

    /// Serialized output or file content was not UTF-8
    ///
    /// **Error Code**: E2002
    #[error("[E2002] UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl Error {
    /// Create an XML write error
    pub fn xml_write(msg: impl Into<String>) -> Self {
        Error::XmlWrite(msg.into())
    }
}

/// Status returned by mutating operations on the object model
///
/// Each variant maps onto the classic integer status code through
/// [`OperationError::code`], so flat callers can branch on numbers.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationError {
    /// An index was outside the bounds of a collection
    #[error("index exceeds collection size")]
    IndexExceedsSize,
    /// The attribute is not defined for this element kind
    #[error("unexpected attribute")]
    UnexpectedAttribute,
    /// The operation could not be carried out
    #[error("operation failed")]
    OperationFailed,
    /// The value is not acceptable for the attribute
    #[error("invalid attribute value")]
    InvalidAttributeValue,
    /// The object is incomplete or of the wrong kind for the target
    #[error("invalid object")]
    InvalidObject,
    /// An object with the same identifier already exists
    #[error("duplicate object id")]
    DuplicateObjectId,
    /// The object's level differs from the target's level
    #[error("level mismatch")]
    LevelMismatch,
    /// The object's version differs from the target's version
    #[error("version mismatch")]
    VersionMismatch,
    /// The XML operation is not valid here
    #[error("invalid XML operation")]
    InvalidXmlOperation,
    /// The object's declared namespaces conflict with the target's
    #[error("namespaces mismatch")]
    NamespacesMismatch,
}

impl OperationError {
    /// Classic integer status code for this failure
    pub fn code(self) -> i32 {
        match self {
            OperationError::IndexExceedsSize => -1,
            OperationError::UnexpectedAttribute => -2,
            OperationError::OperationFailed => -3,
            OperationError::InvalidAttributeValue => -4,
            OperationError::InvalidObject => -5,
            OperationError::DuplicateObjectId => -6,
            OperationError::LevelMismatch => -7,
            OperationError::VersionMismatch => -8,
            OperationError::InvalidXmlOperation => -9,
            OperationError::NamespacesMismatch => -10,
        }
    }
}

/// Outcome of a mutating operation
pub type OperationResult = std::result::Result<(), OperationError>;

/// Success status code
pub const OPERATION_SUCCESS: i32 = 0;

/// Collapse an [`OperationResult`] into its integer status code
pub fn status_code(result: &OperationResult) -> i32 {
    match result {
        Ok(()) => OPERATION_SUCCESS,
        Err(e) => e.code(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_in_messages() {
        let err = Error::xml_write("boom");
        assert!(err.to_string().starts_with("[E2001]"));

        let err: Error = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(err.to_string().contains("[E1001]"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(status_code(&Ok(())), 0);
        assert_eq!(status_code(&Err(OperationError::OperationFailed)), -3);
        assert_eq!(status_code(&Err(OperationError::InvalidAttributeValue)), -4);
        assert_eq!(status_code(&Err(OperationError::InvalidObject)), -5);
        assert_eq!(status_code(&Err(OperationError::NamespacesMismatch)), -10);
    }
}
