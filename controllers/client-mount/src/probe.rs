//! Mount-state prober.
//!
//! Determines whether a path is currently mounted by inspecting the live
//! mount table.

use host_cmd::HostRunner;

use crate::error::MountError;

// Whitespace-delimited column of the mount table carrying the target path
const TARGET_FIELD: usize = 2;

/// Check whether a file system is mounted at `mount_path`.
///
/// Matches on exact target path equality. A path absent from the table is
/// not an error; it is simply not mounted. Only a failed table query is an
/// error.
pub async fn is_mounted(runner: &dyn HostRunner, mount_path: &str) -> Result<bool, MountError> {
    let table = runner
        .checked_output("mount", &[])
        .await
        .map_err(MountError::Probe)?;

    Ok(table
        .lines()
        .any(|line| line.split_whitespace().nth(TARGET_FIELD) == Some(mount_path)))
}
