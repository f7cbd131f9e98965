//! Archive extraction error taxonomy.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("invalid file path: {0}")]
    InvalidFilePath(String),

    #[error("{0} exceeds maximum size")]
    ExceedsMaximumSize(String),

    #[error("absolute symlink target: {0}")]
    AbsoluteSymlink(String),

    #[error("symlink escapes destination: {0}")]
    SymlinkEscapesDestination(String),

    #[error("invalid gzip stream: {0}")]
    InvalidGzip(String),

    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ArchiveError {
    fn from(e: std::io::Error) -> Self {
        ArchiveError::Io(e.to_string())
    }
}
