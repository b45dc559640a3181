//! Error types for value access, parsing and source reading.

use std::path::PathBuf;

use thiserror::Error;

use crate::value::Kind;

/// Errors produced by `Value` operations and by the parser.
#[derive(Error, Debug)]
pub enum JsonError {
    /// An accessor, mutator or conversion was called on a value with an
    /// incompatible tag.
    #[error("{op}: type error, expected {expected} but found {found}")]
    TypeMismatch {
        op: &'static str,
        expected: &'static str,
        found: Kind,
    },

    /// A positional array operation used an index outside `[0, len)`.
    #[error("{op}: index {index} out of range for array of length {len}")]
    OutOfRange {
        op: &'static str,
        index: usize,
        len: usize,
    },

    /// The input violates the JSON grammar at `offset` (byte position).
    #[error("syntax error at byte {offset}: {message}")]
    Syntax { offset: usize, message: String },

    /// The input ended while more tokens were expected.
    #[error("unexpected end of json at byte {offset}")]
    UnexpectedEnd { offset: usize },

    /// The external text source could not be read.
    #[error("{}", source_message(.path))]
    SourceUnavailable {
        #[source]
        source: std::io::Error,
        path: Option<PathBuf>,
    },
}

/// Fieldless category of a [`JsonError`], convenient for matching in callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    TypeMismatch,
    OutOfRange,
    Syntax,
    UnexpectedEnd,
    SourceUnavailable,
}

impl JsonError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            JsonError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            JsonError::OutOfRange { .. } => ErrorKind::OutOfRange,
            JsonError::Syntax { .. } => ErrorKind::Syntax,
            JsonError::UnexpectedEnd { .. } => ErrorKind::UnexpectedEnd,
            JsonError::SourceUnavailable { .. } => ErrorKind::SourceUnavailable,
        }
    }

    /// Byte offset of a parse error, `None` for every other category.
    pub fn offset(&self) -> Option<usize> {
        match self {
            JsonError::Syntax { offset, .. } | JsonError::UnexpectedEnd { offset } => {
                Some(*offset)
            }
            _ => None,
        }
    }

    pub(crate) fn type_mismatch(op: &'static str, expected: &'static str, found: Kind) -> Self {
        JsonError::TypeMismatch {
            op,
            expected,
            found,
        }
    }

    pub(crate) fn syntax(offset: usize, message: impl Into<String>) -> Self {
        JsonError::Syntax {
            offset,
            message: message.into(),
        }
    }
}

fn source_message(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!("source is not available: {}", path.display()),
        None => "source is not available".to_string(),
    }
}

/// Convenience alias used throughout tagged-json.
pub type Result<T> = std::result::Result<T, JsonError>;
