//! Mock HostRunner for unit testing
//!
//! This module provides a mock implementation of HostRunner that can be used
//! in unit tests without touching the host. Every invocation is recorded in
//! order, and stdout, command failures, and filesystem failures can all be
//! scripted per command line or path.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::CmdError;
use crate::host_trait::HostRunner;

/// Mock HostRunner for testing
///
/// The mock records command invocations and filesystem operations in memory
/// and can be configured to return specific outputs or failures for testing
/// different scenarios.
#[derive(Debug, Clone, Default)]
pub struct MockHostRunner {
    // Every checked_output invocation, in order, as "program arg1 arg2 ..."
    invocations: Arc<Mutex<Vec<String>>>,
    // Scripted stdout per command line
    outputs: Arc<Mutex<HashMap<String, String>>>,
    // Scripted failure stderr per command line
    failures: Arc<Mutex<HashMap<String, String>>>,
    created_dirs: Arc<Mutex<Vec<PathBuf>>>,
    created_files: Arc<Mutex<Vec<PathBuf>>>,
    removed_paths: Arc<Mutex<Vec<PathBuf>>>,
    failing_creations: Arc<Mutex<HashSet<PathBuf>>>,
    failing_removals: Arc<Mutex<HashSet<PathBuf>>>,
}

fn command_line(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

impl MockHostRunner {
    /// Create a new mock runner with no scripted behavior
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the stdout returned for a command line (for test setup)
    pub fn set_output(&self, command: &str, stdout: &str) {
        self.outputs
            .lock()
            .unwrap()
            .insert(command.to_string(), stdout.to_string());
    }

    /// Script a non-zero exit with the given stderr for a command line
    pub fn fail_command(&self, command: &str, stderr: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(command.to_string(), stderr.to_string());
    }

    /// Script a failure for target creation at the given path
    pub fn fail_creation(&self, path: impl Into<PathBuf>) {
        self.failing_creations.lock().unwrap().insert(path.into());
    }

    /// Script a failure for path removal at the given path
    pub fn fail_removal(&self, path: impl Into<PathBuf>) {
        self.failing_removals.lock().unwrap().insert(path.into());
    }

    /// All recorded command invocations, in execution order
    pub fn invocations(&self) -> Vec<String> {
        self.invocations.lock().unwrap().clone()
    }

    /// Number of times the exact command line was invoked
    pub fn invocation_count(&self, command: &str) -> usize {
        self.invocations
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == command)
            .count()
    }

    /// Directories created through the runner
    pub fn created_dirs(&self) -> Vec<PathBuf> {
        self.created_dirs.lock().unwrap().clone()
    }

    /// Files created through the runner
    pub fn created_files(&self) -> Vec<PathBuf> {
        self.created_files.lock().unwrap().clone()
    }

    /// Paths removed through the runner
    pub fn removed_paths(&self) -> Vec<PathBuf> {
        self.removed_paths.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl HostRunner for MockHostRunner {
    async fn checked_output(&self, program: &str, args: &[&str]) -> Result<String, CmdError> {
        let command = command_line(program, args);
        self.invocations.lock().unwrap().push(command.clone());

        if let Some(stderr) = self.failures.lock().unwrap().get(&command) {
            return Err(CmdError::Output {
                command,
                code: Some(1),
                stdout: String::new(),
                stderr: stderr.clone(),
            });
        }

        Ok(self
            .outputs
            .lock()
            .unwrap()
            .get(&command)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_dir_all(&self, path: &Path) -> Result<(), CmdError> {
        if self.failing_creations.lock().unwrap().contains(path) {
            return Err(CmdError::Io(std::io::Error::other(format!(
                "mock: cannot create {}",
                path.display()
            ))));
        }
        self.created_dirs.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    async fn create_file(&self, path: &Path) -> Result<(), CmdError> {
        if self.failing_creations.lock().unwrap().contains(path) {
            return Err(CmdError::Io(std::io::Error::other(format!(
                "mock: cannot create {}",
                path.display()
            ))));
        }
        self.created_files.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    async fn remove_path(&self, path: &Path) -> Result<(), CmdError> {
        if self.failing_removals.lock().unwrap().contains(path) {
            return Err(CmdError::Io(std::io::Error::other(format!(
                "mock: cannot remove {}",
                path.display()
            ))));
        }
        self.removed_paths.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}
