use criteria_core::error::{ErrorClass, ErrorOrigin as CoreErrorOrigin, InternalError};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }
}

impl From<InternalError> for Error {
    fn from(err: InternalError) -> Self {
        Self::new(err.class.into(), err.origin.into(), err.message)
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    /// The input uses a construct the translator does not lower.
    UnsupportedShape,

    /// Comparator, sign or value combination is not allowed.
    InvalidOperator,

    /// Argument count, index or folded constant out of range.
    OutOfRange,

    /// Evaluation of a sign over these value types is undefined.
    NotImplemented,

    /// Entity or member is not registered.
    UnknownMember,

    /// The caller cannot remediate this.
    Internal,

    Config,
}

impl From<ErrorClass> for ErrorKind {
    fn from(class: ErrorClass) -> Self {
        match class {
            ErrorClass::UnsupportedExpressionShape => Self::UnsupportedShape,
            ErrorClass::InvalidOperatorUsage => Self::InvalidOperator,
            ErrorClass::ArgumentOutOfRange => Self::OutOfRange,
            ErrorClass::NotImplemented => Self::NotImplemented,
            ErrorClass::UnknownMember => Self::UnknownMember,
            ErrorClass::Serialize => Self::Internal,
            ErrorClass::Config => Self::Config,
        }
    }
}

///
/// ErrorOrigin
/// Public origin taxonomy for callers.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Translate,
    Canonicalize,
    Evaluate,
    Model,
    Serialize,
    Config,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Translate => Self::Translate,
            CoreErrorOrigin::Canonicalize => Self::Canonicalize,
            CoreErrorOrigin::Evaluate => Self::Evaluate,
            CoreErrorOrigin::Model => Self::Model,
            CoreErrorOrigin::Serialize => Self::Serialize,
            CoreErrorOrigin::Config => Self::Config,
        }
    }
}
