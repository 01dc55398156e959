//! Host command errors

use thiserror::Error;

/// Errors that can occur when running a host command or preparing a mount target
#[derive(Debug, Error)]
pub enum CmdError {
    /// The command or filesystem operation could not be executed at all
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// The command ran but exited non-zero; stdout/stderr are captured so
    /// callers can surface them in user-facing errors
    #[error("'{command}' exited with code {code:?}, stdout: {stdout}, stderr: {stderr}")]
    Output {
        /// The command line that was executed
        command: String,
        /// Exit code, if the process exited normally
        code: Option<i32>,
        /// Captured standard output
        stdout: String,
        /// Captured standard error
        stderr: String,
    },
}
