//! Volume activator.
//!
//! Brings LVM logical volumes up before mount and down after unmount. For
//! clustered file systems the volume-group lock is started before shared
//! activation and stopped only after deactivation.

use crds::ClientMountDeviceLvm;
use host_cmd::{CmdError, HostRunner};
use tracing::{debug, info};

use crate::error::MountError;

// `lvs` attribute character carrying the activation state ('a' = active)
const ACTIVATION_ATTR_INDEX: usize = 4;

fn activation_error(message: &str, source: CmdError) -> MountError {
    MountError::Activation {
        message: message.to_string(),
        source,
    }
}

/// Bring a logical volume to the requested activation state.
///
/// Idempotent: when the volume is already in the target state no mutating
/// invocation is made. Failures while acquiring storage surface as
/// "Client could not access storage", failures while releasing it as
/// "Client could not release storage"; both are fatal for the entry and no
/// further steps are attempted.
pub async fn set_active(
    runner: &dyn HostRunner,
    lvm: &ClientMountDeviceLvm,
    active: bool,
    shared: bool,
) -> Result<(), MountError> {
    let listing = runner
        .checked_output("lvs", &["--noheadings"])
        .await
        .map_err(|e| activation_error("Could not query logical volumes", e))?;

    // Each record is `{lv} {vg} {attrs} {size} ...`
    for line in listing.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        // Headings and malformed lines
        if fields.len() < 3 {
            continue;
        }
        if fields[0] != lvm.logical_volume || fields[1] != lvm.volume_group {
            continue;
        }

        // The activation state sits at a fixed position in the attribute
        // field; refuse to guess when the field is too short to carry it
        let Some(state) = fields[2].chars().nth(ACTIVATION_ATTR_INDEX) else {
            return Err(MountError::VolumeListFormat(line.to_string()));
        };
        let is_active = state == 'a';

        let vg = lvm.volume_group.as_str();
        if active && !is_active {
            if shared {
                // Lock start must precede shared activation
                runner
                    .checked_output("vgchange", &["--lockstart", vg])
                    .await
                    .map_err(|e| activation_error("Client could not access storage", e))?;
            }

            let activate_flag = if shared { "sy" } else { "y" };
            runner
                .checked_output("vgchange", &["--activate", activate_flag, vg])
                .await
                .map_err(|e| activation_error("Client could not access storage", e))?;

            info!("Activated logical volume {}/{}", vg, lvm.logical_volume);
        } else if !active && is_active {
            runner
                .checked_output("vgchange", &["--activate", "n", vg])
                .await
                .map_err(|e| activation_error("Client could not release storage", e))?;

            if shared {
                // Lock stop only after deactivation
                runner
                    .checked_output("vgchange", &["--lockstop", vg])
                    .await
                    .map_err(|e| activation_error("Client could not release storage", e))?;
            }

            info!("Deactivated logical volume {}/{}", vg, lvm.logical_volume);
        } else {
            debug!(
                "Logical volume {}/{} already in requested state",
                vg, lvm.logical_volume
            );
        }

        return Ok(());
    }

    Err(MountError::VolumeNotFound {
        volume_group: lvm.volume_group.clone(),
        logical_volume: lvm.logical_volume.clone(),
    })
}
