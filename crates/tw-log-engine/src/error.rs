//! Engine error types.

use std::path::Path;

use thiserror::Error;

/// Errors that can occur while tailing, paging or locating in a log file.
#[derive(Debug, Error)]
pub enum LogError {
    /// The file is missing or cannot be stat'ed, or the log name is unknown.
    #[error("source not found: {0}")]
    NotFound(String),

    /// A caller-supplied value cannot be used. Raised before any file I/O.
    #[error("malformed input: {0}")]
    Malformed(String),

    #[error("invalid regex pattern: {0}")]
    Regex(String),

    #[error("I/O error: {0}")]
    Io(String),

    /// A read failed part-way through a scan. `partial` holds everything
    /// accumulated up to `offset`, the last fully consumed byte position.
    #[error("read interrupted at offset {offset}: {message}")]
    Interrupted {
        offset: u64,
        partial: Vec<u8>,
        message: String,
    },
}

impl LogError {
    /// Map a failure opening or reading `path`.
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            LogError::NotFound(path.display().to_string())
        } else {
            LogError::Io(format!("{}: {err}", path.display()))
        }
    }

    /// Map a failure to stat `path`. Any stat failure counts as not found.
    pub fn from_stat(path: &Path, err: std::io::Error) -> Self {
        LogError::NotFound(format!("{}: {err}", path.display()))
    }
}

impl From<tw_protocol::ProtocolError> for LogError {
    fn from(err: tw_protocol::ProtocolError) -> Self {
        LogError::Malformed(err.to_string())
    }
}

/// Convenience alias for engine results.
pub type LogResult<T> = Result<T, LogError>;
