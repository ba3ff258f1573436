/// Error types for wipe runs
///
/// Per-file failures never escape a walk: they are turned into `Error` log
/// entries by the algorithm. Only failures that prevent a run from starting
/// (bad root, bad config, failed credential check) surface as `Err`.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes used by the binary.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 1;
    pub const PARTIAL_FAILURE: i32 = 2;
    pub const AUTH_FAILURE: i32 = 3;
    pub const CONFIG_ERROR: i32 = 4;
}

#[derive(Error, Debug)]
pub enum WipeError {
    #[error("failed to open for read-write: {0}")]
    Open(#[source] io::Error),

    #[error("failed to read file size: {0}")]
    Metadata(#[source] io::Error),

    #[error("failed to seek to offset {offset}: {source}")]
    Seek { offset: u64, source: io::Error },

    #[error("write failed at offset {offset}: {source}")]
    Write { offset: u64, source: io::Error },

    #[error("sync failed at offset {offset}: {source}")]
    Sync { offset: u64, source: io::Error },

    #[error("failed to remove file: {0}")]
    Remove(#[source] io::Error),

    #[error("target does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("target is not accessible: {}: {source}", path.display())]
    RootInaccessible { path: PathBuf, source: io::Error },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("failed to write certificate {}: {source}", path.display())]
    Certificate { path: PathBuf, source: io::Error },

    /// Operator declined, or a precondition refused the run
    #[error("{0}")]
    Aborted(String),
}

impl WipeError {
    pub fn exit_code(&self) -> i32 {
        match self {
            WipeError::Config(_) => exit_codes::CONFIG_ERROR,
            WipeError::Auth(_) => exit_codes::AUTH_FAILURE,
            _ => exit_codes::USER_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, WipeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_keep_os_message() {
        let err = WipeError::Write {
            offset: 4096,
            source: io::Error::new(io::ErrorKind::Other, "No space left on device"),
        };
        let text = err.to_string();
        assert!(text.contains("4096"));
        assert!(text.contains("No space left on device"));
    }

    #[test]
    fn exit_codes_by_kind() {
        assert_eq!(WipeError::Config("x".into()).exit_code(), exit_codes::CONFIG_ERROR);
        assert_eq!(WipeError::Auth("x".into()).exit_code(), exit_codes::AUTH_FAILURE);
        assert_eq!(
            WipeError::RootNotFound(PathBuf::from("/nope")).exit_code(),
            exit_codes::USER_ERROR
        );
    }
}
