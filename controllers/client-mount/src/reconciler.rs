//! Reconciliation logic for ClientMount CRDs.
//!
//! One reconciliation pass converges every mount entry of a `ClientMount`
//! resource toward the spec's desired state and writes per-entry readiness
//! back to the status subresource at the end of the pass. Entries are
//! isolated: one entry's failure never stops the remaining entries, and the
//! first error encountered becomes the resource-level error.

use std::sync::Arc;
use std::time::Duration;

use crds::{
    ClientMount, ClientMountInfo, ClientMountInfoStatus, ClientMountSpec, ClientMountStatus,
    MountState,
};
use host_cmd::HostRunner;
use kube::api::{Api, Patch, PatchParams, PostParams};
use kube_runtime::controller::Action;
use tracing::{debug, info, warn};

use crate::error::{ControllerError, MountError};
use crate::mount;

/// Finalizer ensuring every entry is unmounted before the resource goes away
pub const FINALIZER: &str = "storageops.microscaler.io/client-mount";

/// Fixed delay before a failed pass is retried
pub const RETRY_DELAY: Duration = Duration::from_secs(10);

/// Reconciles ClientMount resources against the node's live mount state.
pub struct Reconciler {
    client_mount_api: Api<ClientMount>,
    runner: Arc<dyn HostRunner>,
}

impl Reconciler {
    /// Creates a new reconciler instance.
    pub fn new(client_mount_api: Api<ClientMount>, runner: Arc<dyn HostRunner>) -> Self {
        Self {
            client_mount_api,
            runner,
        }
    }

    /// Runs one reconciliation pass for a ClientMount resource.
    ///
    /// State machine:
    /// 1. Resource being deleted: unmount everything, then drop the finalizer.
    /// 2. Status out of step with the spec (length mismatch or desired-state
    ///    change): rebuild the status and do no mount work this pass.
    /// 3. Finalizer missing: attach it before the first mount operation.
    /// 4. Steady: converge every entry and record the outcome.
    pub async fn reconcile(&self, client_mount: &ClientMount) -> Result<Action, ControllerError> {
        let name = client_mount.metadata.name.as_ref().ok_or_else(|| {
            ControllerError::InvalidConfig("ClientMount missing name".to_string())
        })?;
        let namespace = client_mount.metadata.namespace.as_deref().unwrap_or("default");

        info!("Reconciling ClientMount {}/{}", namespace, name);

        // Handle cleanup if the resource is being deleted
        if client_mount.metadata.deletion_timestamp.is_some() {
            return self.finalize(client_mount, name, namespace).await;
        }

        // Rebuild the status section when it was never initialized, its
        // length no longer matches the spec, or the desired state moved.
        // No mount work happens in the same pass as a reset, so status never
        // reports readiness carried over from a previous desired state.
        if needs_status_reset(client_mount) {
            info!("Initializing status for ClientMount {}/{}", namespace, name);
            self.update_status_if_changed(client_mount, name, initial_status(&client_mount.spec))
                .await?;
            return Ok(Action::await_change());
        }

        // Attach the finalizer before any mount work begins
        if !has_finalizer(client_mount) {
            self.add_finalizer(client_mount, name).await?;
            return Ok(Action::await_change());
        }

        let desired = client_mount.spec.desired_state;
        let (mounts, first_error) =
            apply_all(self.runner.as_ref(), &client_mount.spec.mounts, desired).await;

        let error = first_error.map(|e| match desired {
            MountState::Mounted => format!("Mount failed: {}", e),
            MountState::Unmounted => format!("Unmount failed: {}", e),
        });
        let failed = error.is_some();
        if let Some(e) = &error {
            info!("ClientMount {}/{}: {}", namespace, name, e);
        }

        self.update_status_if_changed(client_mount, name, ClientMountStatus { mounts, error })
            .await?;

        if failed {
            Ok(Action::requeue(RETRY_DELAY))
        } else {
            Ok(Action::await_change())
        }
    }

    /// Unmounts every entry before allowing the resource to be removed.
    ///
    /// Unmount failures block removal and are retried; the finalizer is only
    /// dropped once every entry unmounted cleanly.
    async fn finalize(
        &self,
        client_mount: &ClientMount,
        name: &str,
        namespace: &str,
    ) -> Result<Action, ControllerError> {
        if !has_finalizer(client_mount) {
            return Ok(Action::await_change());
        }

        info!(
            "Unmounting all file systems due to resource deletion for ClientMount {}/{}",
            namespace, name
        );
        let (mounts, first_error) = apply_all(
            self.runner.as_ref(),
            &client_mount.spec.mounts,
            MountState::Unmounted,
        )
        .await;

        if let Some(e) = first_error {
            warn!(
                "Unmount during deletion of ClientMount {}/{} failed: {}",
                namespace, name, e
            );
            let status = ClientMountStatus {
                mounts,
                error: Some(format!("Unmount failed: {}", e)),
            };
            self.update_status_if_changed(client_mount, name, status).await?;
            return Ok(Action::requeue(RETRY_DELAY));
        }

        self.remove_finalizer(client_mount, name).await?;
        Ok(Action::await_change())
    }

    /// Writes the status subresource when it changed.
    ///
    /// Compare-and-write semantics: no-op writes are skipped, and a write
    /// conflict is dropped on the floor; the next trigger re-derives status
    /// from fresh state.
    async fn update_status_if_changed(
        &self,
        client_mount: &ClientMount,
        name: &str,
        status: ClientMountStatus,
    ) -> Result<(), ControllerError> {
        if client_mount.status.as_ref() == Some(&status) {
            debug!(
                "ClientMount {} already has correct status, skipping update",
                name
            );
            return Ok(());
        }

        let mut updated = client_mount.clone();
        updated.status = Some(status);

        match self
            .client_mount_api
            .replace_status(name, &PostParams::default(), serde_json::to_vec(&updated)?)
            .await
        {
            Ok(_) => Ok(()),
            Err(kube::Error::Api(e)) if e.code == 409 => {
                debug!("Conflicting status update for ClientMount {}, dropping", name);
                Ok(())
            }
            Err(e) => Err(ControllerError::Kube(e)),
        }
    }

    async fn add_finalizer(
        &self,
        client_mount: &ClientMount,
        name: &str,
    ) -> Result<(), ControllerError> {
        let mut finalizers = client_mount.metadata.finalizers.clone().unwrap_or_default();
        finalizers.push(FINALIZER.to_string());
        self.patch_finalizers(name, finalizers).await
    }

    async fn remove_finalizer(
        &self,
        client_mount: &ClientMount,
        name: &str,
    ) -> Result<(), ControllerError> {
        let finalizers: Vec<String> = client_mount
            .metadata
            .finalizers
            .clone()
            .unwrap_or_default()
            .into_iter()
            .filter(|f| f != FINALIZER)
            .collect();
        self.patch_finalizers(name, finalizers).await
    }

    async fn patch_finalizers(
        &self,
        name: &str,
        finalizers: Vec<String>,
    ) -> Result<(), ControllerError> {
        let patch = serde_json::json!({ "metadata": { "finalizers": finalizers } });
        self.client_mount_api
            .patch(name, &PatchParams::default(), &Patch::Merge(&patch))
            .await?;
        Ok(())
    }
}

/// True when the resource carries this controller's finalizer.
pub(crate) fn has_finalizer(client_mount: &ClientMount) -> bool {
    client_mount
        .metadata
        .finalizers
        .as_ref()
        .is_some_and(|f| f.iter().any(|x| x == FINALIZER))
}

/// True when the status section must be rebuilt before any mount work: it
/// was never written, its entry count no longer matches the spec, or an
/// entry still records a previous desired state.
pub(crate) fn needs_status_reset(client_mount: &ClientMount) -> bool {
    let desired = client_mount.spec.desired_state;
    match &client_mount.status {
        None => true,
        Some(status) => {
            status.mounts.len() != client_mount.spec.mounts.len()
                || status.mounts.iter().any(|m| m.state != desired)
        }
    }
}

/// Status with every entry reset for the spec's desired state: not ready,
/// no message, no resource-level error.
pub(crate) fn initial_status(spec: &ClientMountSpec) -> ClientMountStatus {
    ClientMountStatus {
        mounts: spec
            .mounts
            .iter()
            .map(|_| ClientMountInfoStatus {
                state: spec.desired_state,
                ready: false,
                message: None,
            })
            .collect(),
        error: None,
    }
}

/// Converge every entry toward `desired`, in spec order.
///
/// An explicit fold: each entry's outcome is recorded independently, a
/// failure never short-circuits the remaining entries, and the first error
/// is kept for the resource-level status.
pub(crate) async fn apply_all(
    runner: &dyn HostRunner,
    mounts: &[ClientMountInfo],
    desired: MountState,
) -> (Vec<ClientMountInfoStatus>, Option<MountError>) {
    let mut statuses = Vec::with_capacity(mounts.len());
    let mut first_error = None;

    for info in mounts {
        let result = match desired {
            MountState::Mounted => mount::mount(runner, info).await,
            MountState::Unmounted => mount::unmount(runner, info).await,
        };

        match result {
            Ok(()) => statuses.push(ClientMountInfoStatus {
                state: desired,
                ready: true,
                message: None,
            }),
            Err(e) => {
                warn!("Could not reach desired state for {}: {}", info.mount_path, e);
                statuses.push(ClientMountInfoStatus {
                    state: desired,
                    ready: false,
                    message: Some(e.to_string()),
                });
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    (statuses, first_error)
}
