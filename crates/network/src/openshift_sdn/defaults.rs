//! Defaulting for the OpenShift SDN backend.

use sdn_crds::{DefaultNetwork, NetworkConfigSpec, OpenShiftSdnConfig, ProxyConfig, SdnMode};
use tracing::debug;

/// IANA-assigned VXLAN port
pub const DEFAULT_VXLAN_PORT: u32 = 4789;

/// Bytes taken by the VXLAN header plus the outer UDP/IP headers
pub const VXLAN_OVERHEAD: u32 = 50;

pub const DEFAULT_PROXY_BIND_ADDRESS: &str = "0.0.0.0";

pub const METRICS_BIND_ADDRESS_ARG: &str = "metrics-bind-address";

pub const DEFAULT_METRICS_BIND_ADDRESS: &str = "0.0.0.0:9101";

/// Fills every unset field of an OpenShift SDN network config.
///
/// Fields the caller set are left alone, so running this twice is a no-op.
/// `host_mtu` is the MTU of the host's default interface; the overlay MTU is
/// derived from it unless the previously applied config already pinned one.
pub fn fill_defaults(conf: &mut NetworkConfigSpec, previous: Option<&NetworkConfigSpec>, host_mtu: u32) {
    let DefaultNetwork::OpenShiftSdn(slot) = &mut conf.default_network;
    let sdn = slot.get_or_insert_with(|| {
        debug!("No openshiftSDNConfig given, defaulting to mode NetworkPolicy");
        OpenShiftSdnConfig::default()
    });

    if sdn.mode == SdnMode::Unknown(String::new()) {
        sdn.mode = SdnMode::NetworkPolicy;
    }

    if sdn.vxlan_port.is_none() {
        sdn.vxlan_port = Some(DEFAULT_VXLAN_PORT);
    }

    if sdn.mtu.is_none() {
        // Keep the MTU we already rolled out; a host MTU change alone must not alter the overlay
        let previous_mtu = previous
            .and_then(|p| p.default_network.openshift_sdn())
            .and_then(|p| p.mtu);
        let mtu = previous_mtu.unwrap_or_else(|| host_mtu.saturating_sub(VXLAN_OVERHEAD));
        debug!("Defaulting openshift-sdn MTU to {} (host MTU {})", mtu, host_mtu);
        sdn.mtu = Some(mtu);
    }

    if conf.deploy_kube_proxy.is_none() {
        conf.deploy_kube_proxy = Some(false);
    }

    let proxy = conf.kube_proxy_config.get_or_insert_with(ProxyConfig::default);
    if proxy.bind_address.is_empty() {
        proxy.bind_address = DEFAULT_PROXY_BIND_ADDRESS.to_string();
    }
    // Only seed an empty argument map; caller-supplied arguments are never merged into
    if proxy.proxy_arguments.is_empty() {
        proxy.proxy_arguments.insert(
            METRICS_BIND_ADDRESS_ARG.to_string(),
            vec![DEFAULT_METRICS_BIND_ADDRESS.to_string()],
        );
    }
}
