//! Error taxonomy shared by the codec, the records and the collection.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = AnimGroupError> = std::result::Result<T, E>;

/// Failure reported by a host property store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct StoreError(pub String);

impl StoreError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Coarse classification of [`AnimGroupError`] for callers that only need to
/// tell malformed data from unreadable fields from access failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Format,
    Parse,
    Io,
}

#[derive(Debug, Error)]
pub enum AnimGroupError {
    #[error(
        "invalid character(s) in animation name '{name}': spaces, equal signs and the separator ';' are not allowed"
    )]
    InvalidName { name: String },
    #[error("expected at least 4 ';'-separated fields, found {found}")]
    FieldCount { found: usize },
    #[error("invalid animation group id '{key}'")]
    InvalidId { key: String },
    #[error("failed to parse {field} from '{value}'")]
    InvalidTick { field: &'static str, value: String },
    #[error("failed to parse {failed} node handle(s)")]
    MemberHandles { failed: usize },
    #[error("portable json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("property store: {0}")]
    Store(#[from] StoreError),
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AnimGroupError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnimGroupError::InvalidName { .. } | AnimGroupError::FieldCount { .. } => {
                ErrorKind::Format
            }
            AnimGroupError::InvalidId { .. }
            | AnimGroupError::InvalidTick { .. }
            | AnimGroupError::MemberHandles { .. }
            | AnimGroupError::Json(_) => ErrorKind::Parse,
            AnimGroupError::Store(_) | AnimGroupError::Io { .. } => ErrorKind::Io,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnimGroupError::Io {
            path: path.into(),
            source,
        }
    }
}
