//! Error taxonomy for container reads and writes

use std::path::PathBuf;

use linmat_core::{FormatError, StorageKind};
use thiserror::Error;

/// Access mode a container was opened with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    Read,
    Write,
}

impl std::fmt::Display for AccessMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessMode::Read => write!(f, "reading"),
            AccessMode::Write => write!(f, "writing"),
        }
    }
}

/// Errors reported by read, write and identification operations
#[derive(Debug, Error)]
pub enum Error {
    /// Container could not be opened for the requested access
    #[error("cannot open {} for {mode}: {reason}", path.display())]
    FileOpenFailure {
        path: PathBuf,
        mode: AccessMode,
        reason: String,
    },

    /// No candidate kind accepted any object in the container
    #[error("no vector, matrix, symmetric or sparse matrix found in {}", path.display())]
    AmbiguousOrUnknownObject { path: PathBuf },

    /// An object matched coarsely but failed a structural check
    #[error("malformed content: expected {expected}")]
    MalformedContent { expected: &'static str },

    /// Column pointers violate the compressed-column invariants
    #[error("malformed sparse layout in {}", path.display())]
    MalformedSparseLayout { path: PathBuf },

    /// No codec exists for this dimension and storage kind
    #[error("no codec for {dimension}-dimensional {kind} storage")]
    UnsupportedStorageKind { dimension: u8, kind: StorageKind },

    /// Container framing is corrupt
    #[error("corrupt container {}: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    /// I/O failure on an already opened container
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for linmat operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failures local to one kind codec
///
/// The session attaches the container path when turning these into [`Error`].
#[derive(Debug, Error)]
pub enum CodecError {
    /// Structural check failed for the named kind
    #[error("malformed content: expected {expected}")]
    Malformed { expected: &'static str },

    /// Column pointers are not a valid compressed-column layout
    #[error("invalid compressed-column layout")]
    SparseLayout,

    /// Codec was handed an operator of another kind
    #[error("operator of kind {found} given to the {expected} codec")]
    WrongKind {
        expected: linmat_core::OperatorKind,
        found: linmat_core::OperatorKind,
    },

    #[error(transparent)]
    Format(#[from] FormatError),
}

impl CodecError {
    /// Attach the container path
    pub fn into_error(self, path: impl Into<PathBuf>) -> Error {
        match self {
            CodecError::Malformed { expected } => Error::MalformedContent { expected },
            CodecError::SparseLayout | CodecError::Format(FormatError::SparseLayout) => {
                Error::MalformedSparseLayout { path: path.into() }
            }
            CodecError::WrongKind { found, .. } => Error::UnsupportedStorageKind {
                dimension: found.dimension(),
                kind: found.storage_kind(),
            },
            CodecError::Format(source) => Error::Format {
                path: path.into(),
                source,
            },
        }
    }
}
