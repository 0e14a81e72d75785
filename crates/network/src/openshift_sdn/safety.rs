//! Change-safety analysis for the OpenShift SDN backend.

use sdn_crds::NetworkConfigSpec;
use tracing::warn;

use crate::error::UnsafeChange;

/// Reports whether moving from `prev` to `next` is allowed on a live overlay.
///
/// Both configs must already be defaulted. Any difference in the backend
/// block (mode, VXLAN port, MTU, openvswitch ownership) would desynchronize
/// established tunnels, so all of them collapse into one error.
pub fn is_change_safe(prev: &NetworkConfigSpec, next: &NetworkConfigSpec) -> Vec<UnsafeChange> {
    let before = prev.default_network.openshift_sdn();
    let after = next.default_network.openshift_sdn();
    if before == after {
        return Vec::new();
    }

    warn!("Rejecting openshift-sdn change: {:?} -> {:?}", before, after);
    vec![UnsafeChange::OpenShiftSdnConfig]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openshift_sdn::fill_defaults;
    use crate::test_utils::openshift_sdn_spec;
    use sdn_crds::SdnMode;

    fn defaulted() -> NetworkConfigSpec {
        let mut conf = openshift_sdn_spec();
        fill_defaults(&mut conf, None, 9000);
        conf
    }

    #[test]
    fn test_identical_configs_are_safe() {
        assert!(is_change_safe(&defaulted(), &defaulted()).is_empty());
    }

    #[test]
    fn test_vxlan_port_change_is_unsafe() {
        let prev = defaulted();
        let mut next = defaulted();
        next.default_network.openshift_sdn_mut().unwrap().vxlan_port = Some(99);

        let errs = is_change_safe(&prev, &next);
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].to_string(), "cannot change openshift-sdn configuration");
    }

    #[test]
    fn test_many_field_changes_coalesce() {
        let prev = defaulted();
        let mut next = defaulted();
        let sdn = next.default_network.openshift_sdn_mut().unwrap();
        sdn.mode = SdnMode::Multitenant;
        sdn.mtu = Some(1400);
        sdn.use_external_openvswitch = Some(true);

        assert_eq!(is_change_safe(&prev, &next), vec![UnsafeChange::OpenShiftSdnConfig]);
    }

    #[test]
    fn test_proxy_changes_are_not_checked() {
        let prev = defaulted();
        let mut next = defaulted();
        if let Some(proxy) = next.kube_proxy_config.as_mut() {
            proxy.iptables_sync_period = "1m".to_string();
        }
        assert!(is_change_safe(&prev, &next).is_empty());
    }
}
