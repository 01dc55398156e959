//! ClientMount resource watcher.
//!
//! Runs the reconcile loop for ClientMount resources using
//! `kube_runtime::Controller`, which handles automatic reconnection and
//! serializes reconciliation passes per object while letting different
//! resources reconcile concurrently.

use crate::error::ControllerError;
use crate::reconciler::{RETRY_DELAY, Reconciler};
use crds::ClientMount;
use futures::StreamExt;
use kube::Api;
use kube_runtime::{Controller, controller::Action, watcher};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Starts watching ClientMount resources until the controller stream ends.
pub async fn watch_client_mounts(
    api: Api<ClientMount>,
    reconciler: Arc<Reconciler>,
) -> Result<(), ControllerError> {
    info!("Starting ClientMount watcher");

    // Error policy: infrastructure failures requeue on the same fixed delay
    // as failed mount passes; everything is assumed transient
    let error_policy = |obj: Arc<ClientMount>, error: &ControllerError, _ctx: Arc<Reconciler>| {
        error!(
            "Reconciliation error for ClientMount {:?}: {}",
            obj.metadata.name, error
        );
        Action::requeue(RETRY_DELAY)
    };

    let reconcile = |obj: Arc<ClientMount>, ctx: Arc<Reconciler>| async move {
        debug!("Reconciling ClientMount {:?}", obj.metadata.name);
        ctx.reconcile(&obj).await
    };

    Controller::new(api, watcher::Config::default())
        .run(reconcile, error_policy, reconciler)
        .for_each(|res| async move {
            if let Err(e) = res {
                error!("Controller error for ClientMount: {}", e);
            }
        })
        .await;

    Ok(())
}
