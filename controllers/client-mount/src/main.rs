//! Client Mount Controller
//!
//! Node-local agent that reconciles `ClientMount` resources: activates or
//! deactivates backing logical volumes and mounts or unmounts file systems
//! so the node matches the desired state published by the control plane.
//!
//! Each compute node runs one instance of this controller, watching the
//! namespace named after the node.

mod controller;
mod device;
mod error;
mod lvm;
mod mount;
mod probe;
mod reconciler;
mod watcher;

mod lvm_test;
#[cfg(test)]
mod test_utils;

use controller::Controller;
use crate::error::ControllerError;
use tracing::info;
use std::env;

#[tokio::main]
async fn main() -> Result<(), ControllerError> {
    tracing_subscriber::fmt::init();

    info!("Starting Client Mount Controller");

    // Load configuration from environment variables
    let node_name = env::var("NODE_NAME")
        .map_err(|_| ControllerError::InvalidConfig(
            "NODE_NAME environment variable is required".to_string()
        ))?;
    let namespace = env::var("WATCH_NAMESPACE").ok();

    info!("Configuration:");
    info!("  Node: {}", node_name);
    info!("  Namespace: {}", namespace.as_deref().unwrap_or("<node name>"));

    // Initialize and run controller
    let controller = Controller::new(node_name, namespace).await?;
    controller.run().await?;

    Ok(())
}
