//! HostRunner trait for mocking
//!
//! This trait abstracts host command execution and mount-target filesystem
//! operations so reconciler unit tests can script the host. The concrete
//! [`crate::HostCmd`] implements it against the real system; tests use
//! [`crate::MockHostRunner`] (feature `test-util`).

use std::path::Path;

use crate::error::CmdError;

/// Trait for host command execution and mount-target preparation
///
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait HostRunner: Send + Sync {
    /// Run a command to completion and return its stdout.
    ///
    /// A non-zero exit is an error carrying the captured stdout/stderr; an
    /// `Ok` return always means the command succeeded.
    async fn checked_output(&self, program: &str, args: &[&str]) -> Result<String, CmdError>;

    /// Create a directory and all of its parents. Succeeds if the directory
    /// already exists.
    async fn create_dir_all(&self, path: &Path) -> Result<(), CmdError>;

    /// Create an empty file, truncating any existing content
    async fn create_file(&self, path: &Path) -> Result<(), CmdError>;

    /// Remove a file or an empty directory
    async fn remove_path(&self, path: &Path) -> Result<(), CmdError>;
}
