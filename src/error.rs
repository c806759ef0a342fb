//! Error types for kb
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, unknown task/project, bad filter value)
//! - 4: Operation failed (IO, lock contention, corrupt store)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the kb CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for kb operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Lock acquisition failed: {0}")]
    LockFailed(PathBuf),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::TaskNotFound(_)
            | Error::ProjectNotFound(_)
            | Error::InvalidArgument(_)
            | Error::InvalidSettings(_) => exit_codes::USER_ERROR,

            Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::LockFailed(_)
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }
}

/// Result type alias for kb operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_errors_map_to_exit_code_2() {
        assert_eq!(
            Error::TaskNotFound("t1".to_string()).exit_code(),
            exit_codes::USER_ERROR
        );
        assert_eq!(
            Error::InvalidArgument("bad".to_string()).exit_code(),
            exit_codes::USER_ERROR
        );
    }

    #[test]
    fn operation_errors_map_to_exit_code_4() {
        assert_eq!(
            Error::OperationFailed("boom".to_string()).exit_code(),
            exit_codes::OPERATION_FAILED
        );
        assert_eq!(
            Error::LockFailed(PathBuf::from("x.lock")).exit_code(),
            exit_codes::OPERATION_FAILED
        );
    }
}
