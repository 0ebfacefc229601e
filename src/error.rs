//! Error handling types and utilities.

use std::path::PathBuf;
use thiserror::Error;

/// A specialized Result type for application-level operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the codebase. Library-level loading uses
/// [`LoadError`] directly so callers can match on the failure.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when loading a search index fails.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The payload does not have the `{"docs": [...]}` shape.
    #[error("malformed search index ({origin}): {reason}")]
    Malformed {
        /// Where the payload came from (a file path, or `<input>` for in-memory data)
        origin: String,
        /// The first structural violation found
        reason: MalformedReason,
    },
    /// No index file at the given path.
    #[error("search index not found at {}", path.display())]
    NotFound { path: PathBuf },
    /// Reading the index file failed for another reason.
    #[error("failed to read search index at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    /// Returns the structural violation if this is a malformed-index error.
    pub const fn malformed_reason(&self) -> Option<&MalformedReason> {
        match self {
            Self::Malformed { reason, .. } => Some(reason),
            _ => None,
        }
    }

    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}

/// The structural violation that made a payload unloadable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("payload is not valid UTF-8")]
    NotUtf8,
    #[error("no JSON payload after the script assignment")]
    EmptyPayload,
    #[error("invalid JSON: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
    #[error("top-level value is not an object")]
    RootNotObject,
    #[error("missing top-level \"docs\" key")]
    MissingDocs,
    #[error("duplicate key \"{0}\"")]
    DuplicateKey(String),
    #[error("unexpected top-level key \"{0}\"")]
    UnexpectedRootKey(String),
    #[error("\"docs\" is not an array")]
    DocsNotArray,
    #[error("docs[{index}] is not an object")]
    EntryNotObject { index: usize },
    #[error("docs[{index}]: missing field \"{field}\"")]
    MissingField { index: usize, field: &'static str },
    #[error("docs[{index}]: field \"{field}\" is not a string")]
    FieldNotString { index: usize, field: &'static str },
    #[error("docs[{index}]: duplicate field \"{field}\"")]
    DuplicateField { index: usize, field: String },
    #[error("docs[{index}]: unexpected field \"{field}\"")]
    UnexpectedField { index: usize, field: String },
}

/// Error returned when a script variable name is not a valid identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid script variable name '{0}': expected an identifier like documenterSearchIndex")]
pub struct InvalidVariableName(pub String);
