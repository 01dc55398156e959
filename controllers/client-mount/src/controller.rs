//! Main controller implementation.
//!
//! This module contains the `Controller` struct that wires the reconciler
//! and resource watching for the Client Mount Controller.

use crate::error::ControllerError;
use crate::reconciler::Reconciler;
use crate::watcher;
use crds::ClientMount;
use host_cmd::{HostCmd, HostRunner};
use kube::{Api, Client};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// Main controller for node-local client mount management.
pub struct Controller {
    client_mount_watcher: JoinHandle<Result<(), ControllerError>>,
}

impl Controller {
    /// Creates a new controller instance.
    ///
    /// Each node's ClientMount resources live in the namespace named after
    /// the node, so the controller watches that namespace unless an explicit
    /// override is given.
    pub async fn new(node_name: String, namespace: Option<String>) -> Result<Self, ControllerError> {
        info!("Initializing Client Mount Controller for node {}", node_name);

        // Create Kubernetes client
        let kube_client = Client::try_default().await?;

        let ns = namespace.unwrap_or_else(|| node_name.clone());
        let client_mount_api: Api<ClientMount> = Api::namespaced(kube_client, &ns);

        // All mount, unmount, and volume manager operations go through the
        // HostRunner seam
        let runner: Arc<dyn HostRunner> = Arc::new(HostCmd::new());
        let reconciler = Arc::new(Reconciler::new(client_mount_api.clone(), runner));

        // Start watcher in a background task
        let client_mount_watcher = tokio::spawn(async move {
            watcher::watch_client_mounts(client_mount_api, reconciler).await
        });

        Ok(Self {
            client_mount_watcher,
        })
    }

    /// Runs the controller until shutdown.
    pub async fn run(self) -> Result<(), ControllerError> {
        info!("Client Mount Controller running");

        self.client_mount_watcher
            .await
            .map_err(|e| ControllerError::Watch(format!("ClientMount watcher panicked: {}", e)))?
            .map_err(|e| ControllerError::Watch(format!("ClientMount watcher error: {}", e)))?;

        Ok(())
    }
}
