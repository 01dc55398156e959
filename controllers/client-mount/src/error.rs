//! Controller-specific error types.
//!
//! This module defines the error types for the Client Mount Controller:
//! per-entry mount errors and controller-level errors.

use host_cmd::CmdError;
use thiserror::Error;

/// Errors from converging a single mount entry.
///
/// Every failure is treated as transient by the reconciler and retried on a
/// fixed delay; there is no terminal failure state. Cleanup failures after a
/// successful unmount are logged in place and never cross this boundary.
#[derive(Debug, Error)]
pub enum MountError {
    /// Mount table query failed
    #[error("Mount table query failed: {0}")]
    Probe(#[source] CmdError),

    /// Volume manager operation failed (fatal, user-facing)
    #[error("{message}: {source}")]
    Activation {
        /// User-facing description of what the client could not do
        message: String,
        /// Failing volume manager invocation
        #[source]
        source: CmdError,
    },

    /// Volume group / logical volume pair not known to the volume manager
    #[error("Could not find VG/LV pair {volume_group}/{logical_volume}")]
    VolumeNotFound {
        /// Volume group that was searched for
        volume_group: String,
        /// Logical volume that was searched for
        logical_volume: String,
    },

    /// Volume listing output did not have the expected shape
    #[error("Unexpected volume listing output: {0}")]
    VolumeListFormat(String),

    /// Device kind that the node agent cannot mount
    #[error("Invalid device type")]
    InvalidDeviceType,

    /// mount/umount invocation failed
    #[error("Could not {operation} {path}: {source}")]
    MountOperation {
        /// "mount" or "unmount"
        operation: &'static str,
        /// Mount path the operation targeted
        path: String,
        /// Failing invocation with captured output
        #[source]
        source: CmdError,
    },

    /// Mount target could not be created
    #[error("Could not create mount target {path}: {source}")]
    TargetCreation {
        /// Mount path whose target could not be created
        path: String,
        /// Failing filesystem operation
        #[source]
        source: CmdError,
    },
}

/// Errors that can occur in the Client Mount Controller.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// Kubernetes API error
    #[error("Kubernetes error: {0}")]
    Kube(#[from] kube::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Status serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Resource watch failed
    #[error("Resource watch failed: {0}")]
    Watch(String),
}
