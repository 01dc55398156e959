//! ClientMount CRD
//!
//! Describes which file systems should be mounted (or unmounted) on a
//! single compute node. The control plane creates and updates the spec;
//! the node-local client-mount controller converges the node against it
//! and reports per-mount readiness in the status.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::references::StorageResourceReference;

/// File system type that is mountable from multiple nodes concurrently and
/// therefore needs a shared volume-group lock around LVM activation.
pub const CLUSTERED_FS_TYPE: &str = "gfs2";

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "storageops.microscaler.io",
    version = "v1alpha1",
    kind = "ClientMount",
    namespaced,
    status = "ClientMountStatus"
)]
#[serde(rename_all = "camelCase")]
pub struct ClientMountSpec {
    /// Name of the compute node that must perform the mounts. Each node's
    /// controller watches the namespace named after its node.
    pub node: String,

    /// Desired state for every entry in `mounts`
    pub desired_state: MountState,

    /// Mount points to manage. Order is significant: `status.mounts` is
    /// index-aligned with this list.
    pub mounts: Vec<ClientMountInfo>,
}

/// One desired mount point
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientMountInfo {
    /// Absolute path of the mount target on the node
    pub mount_path: String,

    /// Whether the mount target is pre-created as a file or a directory
    pub target_type: MountTargetType,

    /// File system type, passed verbatim to the mount invocation
    pub fs_type: String,

    /// Mount options, appended verbatim via `-o` when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,

    /// Backing device for the mount
    pub device: ClientMountDevice,
}

impl ClientMountInfo {
    /// True when this mount's file system type requires shared-lock
    /// coordination around volume activation.
    pub fn is_clustered(&self) -> bool {
        self.fs_type == CLUSTERED_FS_TYPE
    }
}

/// Device backing a mount point
///
/// Adding a device kind here is a compile-time-checked change: the device
/// resolver in the client-mount controller matches exhaustively.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMountDevice {
    /// Lustre file system reached over the network
    Lustre(ClientMountDeviceLustre),

    /// LVM logical volume local to the node
    Lvm(ClientMountDeviceLvm),

    /// Pointer to a control-plane storage resource. Used by the
    /// orchestrator for server-side bookkeeping; not mountable by the
    /// node agent.
    Reference(ClientMountDeviceReference),
}

/// Lustre device description
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientMountDeviceLustre {
    /// MGS NID list, e.g. "10.0.0.1@tcp:10.0.0.2@tcp"
    pub mgs_addresses: String,

    /// Lustre file system name
    pub file_system_name: String,
}

/// LVM volume group / logical volume pair
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientMountDeviceLvm {
    /// Volume group name
    pub volume_group: String,

    /// Logical volume name
    pub logical_volume: String,
}

/// Reference to a control-plane storage resource backing a mount
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientMountDeviceReference {
    /// Referenced storage resource
    pub reference: StorageResourceReference,

    /// Index into the referenced resource's device list
    #[serde(default)]
    pub device_index: i32,
}

/// Mount state of a single entry, and the desired state for all entries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "PascalCase")]
pub enum MountState {
    /// File system is not mounted
    #[default]
    Unmounted,

    /// File system is mounted
    Mounted,
}

/// Kind of mount target to pre-create
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MountTargetType {
    /// Target is a directory (created with full parents)
    Directory,

    /// Target is a file (parent directory created, then an empty file)
    File,
}

/// Status of a ClientMount resource, owned by the client-mount controller
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientMountStatus {
    /// Per-entry status, index-aligned with `spec.mounts`
    pub mounts: Vec<ClientMountInfoStatus>,

    /// First error encountered during the most recent reconciliation pass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Status of a single mount entry
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientMountInfoStatus {
    /// State this entry is converging toward (mirrors `spec.desiredState`
    /// once accepted)
    pub state: MountState,

    /// True only if the most recent attempt for this entry succeeded
    pub ready: bool,

    /// Human-readable cause of the most recent failure, cleared on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
