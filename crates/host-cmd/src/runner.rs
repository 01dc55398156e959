//! Real host runner backed by tokio

use std::path::Path;

use tokio::process::Command;
use tracing::debug;

use crate::error::CmdError;
use crate::host_trait::HostRunner;

/// Runs commands and filesystem operations against the live host
#[derive(Debug, Clone, Default)]
pub struct HostCmd;

impl HostCmd {
    /// Create a new host runner
    pub fn new() -> Self {
        Self
    }
}

fn command_line(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

#[async_trait::async_trait]
impl HostRunner for HostCmd {
    async fn checked_output(&self, program: &str, args: &[&str]) -> Result<String, CmdError> {
        let command = command_line(program, args);
        debug!("Running '{}'", command);

        let output = Command::new(program).args(args).output().await?;
        debug!("'{}' exited with {}", command, output.status);

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(CmdError::Output {
                command,
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }

    async fn create_dir_all(&self, path: &Path) -> Result<(), CmdError> {
        debug!("Creating directory {}", path.display());
        tokio::fs::create_dir_all(path).await?;
        Ok(())
    }

    async fn create_file(&self, path: &Path) -> Result<(), CmdError> {
        debug!("Creating file {}", path.display());
        tokio::fs::write(path, b"").await?;
        Ok(())
    }

    async fn remove_path(&self, path: &Path) -> Result<(), CmdError> {
        debug!("Removing {}", path.display());
        let metadata = tokio::fs::metadata(path).await?;
        if metadata.is_dir() {
            tokio::fs::remove_dir(path).await?;
        } else {
            tokio::fs::remove_file(path).await?;
        }
        Ok(())
    }
}
