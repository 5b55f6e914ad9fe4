use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured runtime error with a stable internal classification.
/// Every failure in this crate is fatal to the tree being built or evaluated;
/// nothing here is retried and no partial result is returned.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl InternalError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }

    /// The input uses a construct outside the supported grammar.
    /// `expr` is the canonical text of the offending subexpression.
    pub(crate) fn unsupported_shape(expr: impl fmt::Display) -> Self {
        Self::new(
            ErrorClass::UnsupportedExpressionShape,
            ErrorOrigin::Translate,
            format!("unsupported expression shape: {expr}"),
        )
    }

    /// A sign/value/comparator combination violates the tree rules.
    pub(crate) fn invalid_operator(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::InvalidOperatorUsage, origin, message.into())
    }

    pub(crate) fn out_of_range(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::ArgumentOutOfRange, origin, message.into())
    }

    /// An evaluator sign/type combination with no defined semantics.
    pub(crate) fn not_implemented(canonical: impl fmt::Display) -> Self {
        Self::new(
            ErrorClass::NotImplemented,
            ErrorOrigin::Evaluate,
            format!("not implemented: {canonical}"),
        )
    }

    pub(crate) fn unknown_member(origin: ErrorOrigin, owner: &str, member: &str) -> Self {
        Self::new(
            ErrorClass::UnknownMember,
            origin,
            format!("unknown member '{member}' on '{owner}'"),
        )
    }

    pub(crate) fn serialize(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Serialize, ErrorOrigin::Serialize, message.into())
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    UnsupportedExpressionShape,
    InvalidOperatorUsage,
    ArgumentOutOfRange,
    NotImplemented,
    UnknownMember,
    Serialize,
    Config,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::UnsupportedExpressionShape => "unsupported_expression_shape",
            Self::InvalidOperatorUsage => "invalid_operator_usage",
            Self::ArgumentOutOfRange => "argument_out_of_range",
            Self::NotImplemented => "not_implemented",
            Self::UnknownMember => "unknown_member",
            Self::Serialize => "serialize",
            Self::Config => "config",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Internal origin taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Translate,
    Canonicalize,
    Evaluate,
    Model,
    Serialize,
    Config,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Translate => "translate",
            Self::Canonicalize => "canonicalize",
            Self::Evaluate => "evaluate",
            Self::Model => "model",
            Self::Serialize => "serialize",
            Self::Config => "config",
        };
        write!(f, "{label}")
    }
}
