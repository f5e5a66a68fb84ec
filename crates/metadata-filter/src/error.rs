//! Error types for filter construction and application.

use thiserror::Error;

/// Errors raised while validating, merging, or applying filters.
///
/// Every public operation validates its arguments eagerly, so an error always
/// means the operation was rejected as a whole and no value was produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// A required argument was absent.
    #[error("No {what} is specified!")]
    MissingArgument { what: &'static str },

    /// A value had the wrong runtime shape.
    #[error("Invalid {subject}: expected '{expected}', got '{actual}'")]
    TypeMismatch {
        subject: &'static str,
        expected: &'static str,
        actual: String,
    },

    /// A sequence that must not be empty was empty.
    #[error("Invalid {subject}: received an empty array")]
    EmptyCollection { subject: String },

    /// A string that must not be empty was empty.
    #[error("Invalid {subject}: expected 'string', got an empty string")]
    EmptyString { subject: &'static str },

    /// The field was never registered.
    #[error("Invalid filter field: {0}")]
    UnknownField(String),
}

/// Failure class of a [`FilterError`], for callers that only branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingArgument,
    TypeMismatch,
    EmptyCollection,
    EmptyString,
    UnknownField,
}

impl FilterError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingArgument { .. } => ErrorKind::MissingArgument,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::EmptyCollection { .. } => ErrorKind::EmptyCollection,
            Self::EmptyString { .. } => ErrorKind::EmptyString,
            Self::UnknownField(_) => ErrorKind::UnknownField,
        }
    }

    pub(crate) fn type_mismatch(
        subject: &'static str,
        expected: &'static str,
        actual: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            subject,
            expected,
            actual: actual.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;
