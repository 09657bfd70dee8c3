//! Error types for PLY decoding and file conversion.

use std::path::PathBuf;
use thiserror::Error;

/// Broad classification of a [`FormatError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatErrorKind {
    /// The file is valid PLY but uses a feature this reader does not handle.
    Unsupported,
    /// The file is not valid PLY or is inconsistent with its own header.
    Malformed,
}

/// Errors raised while parsing a PLY header or decoding its vertex data.
#[derive(Debug, Error, PartialEq)]
pub enum FormatError {
    #[error("Unsupported PLY feature: {0}")]
    Unsupported(String),

    #[error("Malformed PLY header: {0}")]
    Malformed(String),

    #[error("PLY header is truncated: no end_header line found")]
    TruncatedHeader,

    #[error("PLY file has no vertex element")]
    MissingVertexElement,

    #[error("Missing required vertex property '{0}'")]
    MissingProperty(&'static str),

    #[error("Truncated vertex data: expected {expected} bytes, found {found}")]
    TruncatedData { expected: usize, found: usize },

    #[error("Expected {expected} vertex rows, found {found}")]
    MissingRows { expected: usize, found: usize },

    #[error("Invalid vertex row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },
}

impl FormatError {
    /// Whether this error stems from an unsupported feature or a malformed file.
    pub fn kind(&self) -> FormatErrorKind {
        match self {
            FormatError::Unsupported(_) => FormatErrorKind::Unsupported,
            _ => FormatErrorKind::Malformed,
        }
    }
}

/// Errors that can occur while converting a single file or a directory.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{}: {source}", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    #[error("{}: IO error: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),
}

impl ConvertError {
    pub(crate) fn format(path: impl Into<PathBuf>, source: FormatError) -> Self {
        ConvertError::Format {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }

    /// The file or directory the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            ConvertError::Format { path, .. }
            | ConvertError::Io { path, .. }
            | ConvertError::NotADirectory(path) => path,
        }
    }
}
