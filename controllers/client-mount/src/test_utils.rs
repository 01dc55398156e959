//! Test utilities for unit testing the client mount reconciler
//!
//! This module provides helpers for creating test data and setting up test
//! scenarios.

use crds::{
    ClientMount, ClientMountDevice, ClientMountDeviceLustre, ClientMountDeviceLvm,
    ClientMountDeviceReference, ClientMountInfo, ClientMountSpec, MountState, MountTargetType,
    StorageResourceReference,
};

/// Helper to create a directory-target mount entry backed by an LVM volume
pub fn lvm_info(
    mount_path: &str,
    fs_type: &str,
    volume_group: &str,
    logical_volume: &str,
) -> ClientMountInfo {
    ClientMountInfo {
        mount_path: mount_path.to_string(),
        target_type: MountTargetType::Directory,
        fs_type: fs_type.to_string(),
        options: None,
        device: ClientMountDevice::Lvm(ClientMountDeviceLvm {
            volume_group: volume_group.to_string(),
            logical_volume: logical_volume.to_string(),
        }),
    }
}

/// Helper to create a directory-target mount entry backed by a Lustre file system
pub fn lustre_info(mount_path: &str, mgs_addresses: &str, file_system_name: &str) -> ClientMountInfo {
    ClientMountInfo {
        mount_path: mount_path.to_string(),
        target_type: MountTargetType::Directory,
        fs_type: "lustre".to_string(),
        options: None,
        device: ClientMountDevice::Lustre(ClientMountDeviceLustre {
            mgs_addresses: mgs_addresses.to_string(),
            file_system_name: file_system_name.to_string(),
        }),
    }
}

/// Helper to create a mount entry with a reference device, which the node
/// agent cannot resolve
pub fn reference_info(mount_path: &str) -> ClientMountInfo {
    ClientMountInfo {
        mount_path: mount_path.to_string(),
        target_type: MountTargetType::Directory,
        fs_type: "xfs".to_string(),
        options: None,
        device: ClientMountDevice::Reference(ClientMountDeviceReference {
            reference: StorageResourceReference::new(
                "storageops.microscaler.io".to_string(),
                "Storage".to_string(),
                "storage-0".to_string(),
            ),
            device_index: 0,
        }),
    }
}

/// Helper to create a test ClientMount resource
pub fn client_mount(
    name: &str,
    desired_state: MountState,
    mounts: Vec<ClientMountInfo>,
) -> ClientMount {
    ClientMount::new(
        name,
        ClientMountSpec {
            node: "compute-01".to_string(),
            desired_state,
            mounts,
        },
    )
}

/// One `lvs --noheadings` record. Active volumes carry `a` at attribute
/// index 4, e.g. `-wi-a-----`; inactive ones `-wi-------`.
pub fn lvs_line(logical_volume: &str, volume_group: &str, attrs: &str) -> String {
    format!("  {} {} {} 46.59g", logical_volume, volume_group, attrs)
}
