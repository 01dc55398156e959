//! Mount executor.
//!
//! Converges a single mount entry: resolves the backing device, prepares the
//! mount target, and performs the mount or unmount, skipping work that is
//! already satisfied.

use std::path::Path;

use crds::{ClientMountDevice, ClientMountInfo, MountTargetType};
use host_cmd::HostRunner;
use tracing::{info, warn};

use crate::device;
use crate::error::MountError;
use crate::lvm;
use crate::probe;

async fn create_target(runner: &dyn HostRunner, info: &ClientMountInfo) -> Result<(), MountError> {
    let path = Path::new(&info.mount_path);
    let target_creation = |source| MountError::TargetCreation {
        path: info.mount_path.clone(),
        source,
    };

    match info.target_type {
        MountTargetType::Directory => {
            runner.create_dir_all(path).await.map_err(target_creation)?;
        }
        MountTargetType::File => {
            // Parent directory first, then the empty target file
            if let Some(parent) = path.parent() {
                runner.create_dir_all(parent).await.map_err(target_creation)?;
            }
            runner.create_file(path).await.map_err(target_creation)?;
        }
    }

    Ok(())
}

/// Mount a single mount entry.
///
/// A target that is already mounted is a no-op. Otherwise the device is
/// resolved (activating a backing volume when needed), the mount target is
/// created, and the mount invocation runs with the entry's file system type
/// and options. The first failing step is returned and later steps are not
/// attempted.
pub async fn mount(runner: &dyn HostRunner, info: &ClientMountInfo) -> Result<(), MountError> {
    if probe::is_mounted(runner, &info.mount_path).await? {
        info!("{} already mounted", info.mount_path);
        return Ok(());
    }

    let device = device::resolve(runner, info).await?;

    create_target(runner, info).await?;

    let mut args = vec!["-t", info.fs_type.as_str(), device.as_str(), info.mount_path.as_str()];
    if let Some(options) = info.options.as_deref() {
        if !options.is_empty() {
            args.push("-o");
            args.push(options);
        }
    }

    runner
        .checked_output("mount", &args)
        .await
        .map_err(|e| MountError::MountOperation {
            operation: "mount",
            path: info.mount_path.clone(),
            source: e,
        })?;

    info!("Mounted {} on {}", device, info.mount_path);
    Ok(())
}

/// Unmount a single mount entry.
///
/// The backing volume is deactivated even when the file system was not
/// mounted beforehand. Removing the mount target afterwards is best effort:
/// a failure there is logged and never propagated.
pub async fn unmount(runner: &dyn HostRunner, info: &ClientMountInfo) -> Result<(), MountError> {
    if probe::is_mounted(runner, &info.mount_path).await? {
        runner
            .checked_output("umount", &[info.mount_path.as_str()])
            .await
            .map_err(|e| MountError::MountOperation {
                operation: "unmount",
                path: info.mount_path.clone(),
                source: e,
            })?;
    }

    if let ClientMountDevice::Lvm(lvm_device) = &info.device {
        lvm::set_active(runner, lvm_device, false, info.is_clustered()).await?;
    }

    // The mount target is disposable
    if let Err(e) = runner.remove_path(Path::new(&info.mount_path)).await {
        warn!("Unable to remove mount target {}: {}", info.mount_path, e);
    }

    info!("Unmounted {}", info.mount_path);
    Ok(())
}
