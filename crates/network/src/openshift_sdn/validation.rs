//! Validation for the OpenShift SDN backend.

use sdn_crds::NetworkConfigSpec;

use crate::error::ConfigError;

/// Largest frame the overlay interface can be configured for
pub const MAX_MTU: u32 = 65536;

pub const MAX_VXLAN_PORT: u32 = 65535;

/// Returns every problem found in an OpenShift SDN network config.
///
/// Backend fields are only inspected when the backend block exists, which
/// defaulting guarantees.
pub fn validate(conf: &NetworkConfigSpec) -> Vec<ConfigError> {
    let mut errs = Vec::new();

    if conf.cluster_networks.is_empty() {
        errs.push(ConfigError::EmptyClusterNetworks);
    }

    let Some(sdn) = conf.default_network.openshift_sdn() else {
        return errs;
    };

    if let Some(mtu) = sdn.mtu.filter(|mtu| *mtu > MAX_MTU) {
        errs.push(ConfigError::InvalidMtu(mtu));
    }

    if !sdn.mode.is_known() {
        errs.push(ConfigError::InvalidMode(sdn.mode.to_string()));
    }

    if let Some(port) = sdn.vxlan_port.filter(|port| *port > MAX_VXLAN_PORT) {
        errs.push(ConfigError::InvalidVxlanPort(port));
    }

    errs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openshift_sdn::fill_defaults;
    use crate::test_utils::openshift_sdn_spec;
    use sdn_crds::{OpenShiftSdnConfig, SdnMode};

    fn defaulted() -> NetworkConfigSpec {
        let mut conf = openshift_sdn_spec();
        fill_defaults(&mut conf, None, 9000);
        conf
    }

    fn sdn(conf: &mut NetworkConfigSpec) -> &mut OpenShiftSdnConfig {
        conf.default_network.openshift_sdn_mut().unwrap()
    }

    #[test]
    fn test_valid_config_has_no_errors() {
        assert!(validate(&openshift_sdn_spec()).is_empty());
        assert!(validate(&defaulted()).is_empty());
    }

    #[test]
    fn test_each_rule_reports_its_value() {
        let mut conf = defaulted();

        sdn(&mut conf).mtu = Some(70000);
        assert!(validate(&conf).contains(&ConfigError::InvalidMtu(70000)));

        sdn(&mut conf).mode = SdnMode::from("broken");
        let msgs: Vec<String> = validate(&conf).iter().map(ToString::to_string).collect();
        assert!(msgs.contains(&"invalid openshift-sdn mode \"broken\"".to_string()));

        sdn(&mut conf).vxlan_port = Some(66666);
        let msgs: Vec<String> = validate(&conf).iter().map(ToString::to_string).collect();
        assert!(msgs.contains(&"invalid VXLANPort 66666".to_string()));

        conf.cluster_networks.clear();
        let msgs: Vec<String> = validate(&conf).iter().map(ToString::to_string).collect();
        assert!(msgs.contains(&"ClusterNetworks cannot be empty".to_string()));
    }

    #[test]
    fn test_all_errors_are_accumulated() {
        let mut conf = defaulted();
        conf.cluster_networks.clear();
        let sdn = sdn(&mut conf);
        sdn.mtu = Some(70000);
        sdn.mode = SdnMode::from("broken");
        sdn.vxlan_port = Some(66666);

        assert_eq!(
            validate(&conf),
            vec![
                ConfigError::EmptyClusterNetworks,
                ConfigError::InvalidMtu(70000),
                ConfigError::InvalidMode("broken".to_string()),
                ConfigError::InvalidVxlanPort(66666),
            ]
        );
    }

    #[test]
    fn test_mtu_boundary() {
        let mut conf = defaulted();
        sdn(&mut conf).mtu = Some(MAX_MTU);
        assert!(validate(&conf).is_empty());

        sdn(&mut conf).mtu = Some(MAX_MTU + 1);
        assert_eq!(validate(&conf), vec![ConfigError::InvalidMtu(MAX_MTU + 1)]);
    }

    #[test]
    fn test_vxlan_port_boundary() {
        let mut conf = defaulted();
        sdn(&mut conf).vxlan_port = Some(MAX_VXLAN_PORT);
        assert!(validate(&conf).is_empty());

        sdn(&mut conf).vxlan_port = Some(MAX_VXLAN_PORT + 1);
        assert_eq!(validate(&conf), vec![ConfigError::InvalidVxlanPort(65536)]);
    }

    #[test]
    fn test_every_known_mode_is_valid() {
        for mode in [SdnMode::NetworkPolicy, SdnMode::Multitenant, SdnMode::Subnet] {
            let mut conf = defaulted();
            sdn(&mut conf).mode = mode;
            assert!(validate(&conf).is_empty());
        }
    }
}
