//! Error types for the command-line front end.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that end the program with a nonzero exit status.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{} does not exist", .0.display())]
    InputNotFound(PathBuf),

    #[error(transparent)]
    Convert(#[from] splat_data::ConvertError),

    #[error("{failed} of {total} files failed to convert")]
    BatchFailed { failed: usize, total: usize },
}
