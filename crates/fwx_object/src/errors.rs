//! Error types for message dispatch.
//!
//! `EvalErrorKind` carries the structured category; the factory functions
//! below (`no_such_method`, `wrong_arg_count`, ...) are the public way to
//! build errors so messages stay consistent across crates.

use crate::value::Value;
use std::fmt;

/// Result of sending a message.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Dispatch
    UndefinedMethod {
        method: String,
        type_name: String,
    },
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    /// Nested sends went past the depth limit.
    StackOverflow {
        depth: usize,
    },

    // Access
    KeyNotFound {
        key: String,
    },
    TypeMismatch {
        expected: String,
        got: String,
    },

    // Method installation
    SingletonUnsupported {
        type_name: String,
    },

    /// Errors raised by user-defined method bodies.
    Custom {
        message: String,
    },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndefinedMethod { method, type_name } => {
                write!(f, "no method '{method}' on type {type_name}")
            }
            Self::ArityMismatch {
                name,
                expected,
                got,
            } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                if name.is_empty() {
                    write!(f, "expected {expected} {arg_word}, got {got}")
                } else {
                    write!(f, "{name} expects {expected} {arg_word}, got {got}")
                }
            }
            Self::StackOverflow { depth } => {
                write!(f, "maximum recursion depth exceeded (limit: {depth})")
            }
            Self::KeyNotFound { key } => write!(f, "key not found: {key}"),
            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            Self::SingletonUnsupported { type_name } => {
                write!(f, "can't define singleton method on {type_name}")
            }
            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Error raised while dispatching or running a method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    kind: EvalErrorKind,
}

impl EvalError {
    /// Create an uncategorized error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_kind(EvalErrorKind::Custom {
            message: message.into(),
        })
    }

    pub fn from_kind(kind: EvalErrorKind) -> Self {
        EvalError { kind }
    }

    pub fn kind(&self) -> &EvalErrorKind {
        &self.kind
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

impl std::error::Error for EvalError {}

// Dispatch Errors

/// Method lookup failed on every table, built-in and `method_missing`.
#[cold]
pub fn no_such_method(method: &str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedMethod {
        method: method.to_string(),
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn wrong_arg_count(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

/// Maximum send depth exceeded.
#[cold]
pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth: limit })
}

// Access Errors

#[cold]
pub fn key_not_found(key: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::KeyNotFound {
        key: key.to_string(),
    })
}

#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

// Installation Errors

/// Only types and instances own method tables.
#[cold]
pub fn singleton_unsupported(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::SingletonUnsupported {
        type_name: type_name.to_string(),
    })
}
