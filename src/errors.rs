use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for all operations in the `pathmig` application.
///
/// Only run-level failures surface through this type. Failures while rewriting a
/// single file are captured as `RewriteOutcome::Errored` and never abort a walk.
#[derive(Error, Debug)]
pub enum Error {
    /// An error related to file system I/O.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An error related to JSON serialization.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A general configuration-related error.
    #[error("{0}")]
    Config(String),

    /// The target directory does not exist or is not a directory.
    #[error("Directory '{}' does not exist", .0.display())]
    DirectoryNotFound(PathBuf),
}

/// A convenient type alias for `Result<T, pathmig::errors::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Config(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Config(s.to_string())
    }
}
