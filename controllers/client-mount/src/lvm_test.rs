//! Unit tests for the volume activator

#[cfg(test)]
mod tests {
    use crate::error::MountError;
    use crate::lvm::set_active;
    use crate::test_utils::lvs_line;
    use crds::ClientMountDeviceLvm;
    use host_cmd::MockHostRunner;

    const LVS: &str = "lvs --noheadings";

    fn lvm() -> ClientMountDeviceLvm {
        ClientMountDeviceLvm {
            volume_group: "vg0".to_string(),
            logical_volume: "lv0".to_string(),
        }
    }

    #[tokio::test]
    async fn test_activate_inactive_volume() {
        let runner = MockHostRunner::new();
        runner.set_output(LVS, &lvs_line("lv0", "vg0", "-wi-------"));

        set_active(&runner, &lvm(), true, false).await.unwrap();

        assert_eq!(
            runner.invocations(),
            vec![LVS.to_string(), "vgchange --activate y vg0".to_string()]
        );
    }

    #[tokio::test]
    async fn test_activation_is_idempotent() {
        let runner = MockHostRunner::new();
        runner.set_output(LVS, &lvs_line("lv0", "vg0", "-wi-a-----"));

        set_active(&runner, &lvm(), true, false).await.unwrap();
        set_active(&runner, &lvm(), true, false).await.unwrap();

        // Only the listing calls; no mutating vgchange invocation
        assert_eq!(runner.invocations(), vec![LVS.to_string(), LVS.to_string()]);
    }

    #[tokio::test]
    async fn test_shared_activation_starts_lock_first() {
        let runner = MockHostRunner::new();
        runner.set_output(LVS, &lvs_line("lv0", "vg0", "-wi-------"));

        set_active(&runner, &lvm(), true, true).await.unwrap();

        assert_eq!(
            runner.invocations(),
            vec![
                LVS.to_string(),
                "vgchange --lockstart vg0".to_string(),
                "vgchange --activate sy vg0".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_shared_deactivation_stops_lock_last() {
        let runner = MockHostRunner::new();
        runner.set_output(LVS, &lvs_line("lv0", "vg0", "-wi-a-----"));

        set_active(&runner, &lvm(), false, true).await.unwrap();

        assert_eq!(
            runner.invocations(),
            vec![
                LVS.to_string(),
                "vgchange --activate n vg0".to_string(),
                "vgchange --lockstop vg0".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_deactivation_is_idempotent() {
        let runner = MockHostRunner::new();
        runner.set_output(LVS, &lvs_line("lv0", "vg0", "-wi-------"));

        set_active(&runner, &lvm(), false, true).await.unwrap();

        assert_eq!(runner.invocations(), vec![LVS.to_string()]);
    }

    #[tokio::test]
    async fn test_missing_volume_is_fatal() {
        let runner = MockHostRunner::new();
        runner.set_output(LVS, &lvs_line("other", "vg1", "-wi-a-----"));

        let result = set_active(&runner, &lvm(), true, false).await;
        match result {
            Err(MountError::VolumeNotFound {
                volume_group,
                logical_volume,
            }) => {
                assert_eq!(volume_group, "vg0");
                assert_eq!(logical_volume, "lv0");
            }
            other => panic!("expected VolumeNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_short_lines_are_skipped() {
        let runner = MockHostRunner::new();
        let listing = format!("  lv0 vg0\n{}\n", lvs_line("lv0", "vg0", "-wi-------"));
        runner.set_output(LVS, &listing);

        set_active(&runner, &lvm(), true, false).await.unwrap();

        assert_eq!(runner.invocation_count("vgchange --activate y vg0"), 1);
    }

    #[tokio::test]
    async fn test_truncated_attributes_fail_loudly() {
        let runner = MockHostRunner::new();
        runner.set_output(LVS, &lvs_line("lv0", "vg0", "-wi"));

        let result = set_active(&runner, &lvm(), true, false).await;
        assert!(matches!(result, Err(MountError::VolumeListFormat(_))));
        // No mutating invocation on a listing we could not parse
        assert_eq!(runner.invocations(), vec![LVS.to_string()]);
    }

    #[tokio::test]
    async fn test_lock_start_failure_aborts_activation() {
        let runner = MockHostRunner::new();
        runner.set_output(LVS, &lvs_line("lv0", "vg0", "-wi-------"));
        runner.fail_command("vgchange --lockstart vg0", "lockspace start failed");

        let result = set_active(&runner, &lvm(), true, true).await;
        match result {
            Err(e @ MountError::Activation { .. }) => {
                assert!(e.to_string().contains("Client could not access storage"));
            }
            other => panic!("expected Activation, got {:?}", other),
        }

        // Activation itself was never attempted
        assert_eq!(runner.invocation_count("vgchange --activate sy vg0"), 0);
    }

    #[tokio::test]
    async fn test_deactivation_failure_is_fatal() {
        let runner = MockHostRunner::new();
        runner.set_output(LVS, &lvs_line("lv0", "vg0", "-wi-a-----"));
        runner.fail_command("vgchange --activate n vg0", "volume busy");

        let result = set_active(&runner, &lvm(), false, true).await;
        match result {
            Err(e @ MountError::Activation { .. }) => {
                assert!(e.to_string().contains("Client could not release storage"));
            }
            other => panic!("expected Activation, got {:?}", other),
        }

        // Lock stays held when deactivation fails
        assert_eq!(runner.invocation_count("vgchange --lockstop vg0"), 0);
    }

    #[tokio::test]
    async fn test_listing_failure_is_an_activation_error() {
        let runner = MockHostRunner::new();
        runner.fail_command(LVS, "lvm: command not found");

        let result = set_active(&runner, &lvm(), true, false).await;
        assert!(matches!(result, Err(MountError::Activation { .. })));
    }
}
