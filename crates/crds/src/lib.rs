//! StorageOps CRD Definitions
//!
//! Kubernetes Custom Resource Definitions for StorageOps controllers.

pub mod client_mount;
pub mod references;

pub use client_mount::*;
pub use references::*;
