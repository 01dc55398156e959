//! Device resolver.
//!
//! Maps a mount entry's device descriptor to the concrete device string used
//! in the mount invocation, activating the backing logical volume when the
//! descriptor is volume-backed.

use crds::{ClientMountDevice, ClientMountInfo};
use host_cmd::HostRunner;

use crate::error::MountError;
use crate::lvm;

// Device-mapper root under which activated logical volumes appear
const DEV_ROOT: &str = "/dev";

/// Resolve the device string for a mount entry.
///
/// Resolving an LVM-backed entry activates the volume as a side effect,
/// shared when the entry's file system type is clustered.
pub async fn resolve(runner: &dyn HostRunner, info: &ClientMountInfo) -> Result<String, MountError> {
    match &info.device {
        ClientMountDevice::Lustre(lustre) => Ok(format!(
            "{}:/{}",
            lustre.mgs_addresses, lustre.file_system_name
        )),
        ClientMountDevice::Lvm(lvm_device) => {
            lvm::set_active(runner, lvm_device, true, info.is_clustered()).await?;

            Ok(format!(
                "{}/{}/{}",
                DEV_ROOT, lvm_device.volume_group, lvm_device.logical_volume
            ))
        }
        // Reference devices are control-plane bookkeeping; the node agent
        // cannot mount them
        ClientMountDevice::Reference(_) => Err(MountError::InvalidDeviceType),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use host_cmd::MockHostRunner;

    #[tokio::test]
    async fn test_lustre_device_needs_no_activation() {
        let runner = MockHostRunner::new();
        let info = lustre_info("/mnt/lustre", "10.0.0.1@tcp", "testfs");

        let device = resolve(&runner, &info).await.unwrap();
        assert_eq!(device, "10.0.0.1@tcp:/testfs");
        assert!(runner.invocations().is_empty());
    }

    #[tokio::test]
    async fn test_lvm_device_activates_then_resolves() {
        let runner = MockHostRunner::new();
        runner.set_output("lvs --noheadings", &lvs_line("lv0", "vg0", "-wi-------"));
        let info = lvm_info("/mnt/a", "xfs", "vg0", "lv0");

        let device = resolve(&runner, &info).await.unwrap();
        assert_eq!(device, "/dev/vg0/lv0");
        assert_eq!(runner.invocation_count("vgchange --activate y vg0"), 1);
    }

    #[tokio::test]
    async fn test_clustered_fs_type_activates_shared() {
        let runner = MockHostRunner::new();
        runner.set_output("lvs --noheadings", &lvs_line("lv0", "vg0", "-wi-------"));
        let info = lvm_info("/mnt/a", "gfs2", "vg0", "lv0");

        resolve(&runner, &info).await.unwrap();
        assert_eq!(runner.invocation_count("vgchange --lockstart vg0"), 1);
        assert_eq!(runner.invocation_count("vgchange --activate sy vg0"), 1);
    }

    #[tokio::test]
    async fn test_reference_device_is_rejected() {
        let runner = MockHostRunner::new();
        let info = reference_info("/mnt/a");

        let result = resolve(&runner, &info).await;
        assert!(matches!(result, Err(MountError::InvalidDeviceType)));
        assert!(runner.invocations().is_empty());
    }
}
