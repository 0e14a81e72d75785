//! Config documents handed to the SDN daemons.
//!
//! The node daemon and the controller read legacy-style config files; these
//! are built from the defaulted network config and embedded into ConfigMaps.

use std::collections::BTreeMap;

use sdn_crds::{NetworkConfigSpec, OpenShiftSdnConfig, SdnMode};
use serde::Serialize;

use crate::error::RenderError;

/// Port the node daemon serves metrics and health on; the proxy bind address is prefixed
const SERVING_PORT: u16 = 10251;

/// CNI plugin name the daemons use for a given isolation mode
pub fn plugin_name(mode: &SdnMode) -> Option<&'static str> {
    match mode {
        SdnMode::Subnet => Some("redhat/openshift-ovs-subnet"),
        SdnMode::Multitenant => Some("redhat/openshift-ovs-multitenant"),
        SdnMode::NetworkPolicy => Some("redhat/openshift-ovs-networkpolicy"),
        SdnMode::Unknown(_) => None,
    }
}

/// Node daemon config (`sdn-config.yaml`)
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeConfig {
    pub api_version: &'static str,
    pub kind: &'static str,
    pub serving_info: ServingInfo,
    /// Always serialized, even when empty
    pub iptables_sync_period: String,
    pub proxy_arguments: BTreeMap<String, Vec<String>>,
    pub network_config: NodeNetworkConfig,
    pub enable_unidling: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServingInfo {
    pub bind_address: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeNetworkConfig {
    pub network_plugin_name: &'static str,
    pub mtu: u32,
}

/// Controller config (`controller-config.yaml`)
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ControllerConfig {
    pub api_version: &'static str,
    pub kind: &'static str,
    pub network_config: ControllerNetworkConfig,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ControllerNetworkConfig {
    pub network_plugin_name: &'static str,
    pub cluster_networks: Vec<ClusterNetworkEntry>,
    #[serde(rename = "serviceNetworkCIDR")]
    pub service_network_cidr: String,
    pub vxlan_port: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterNetworkEntry {
    pub cidr: String,
    pub host_subnet_length: u32,
}

impl NodeConfig {
    pub fn new(conf: &NetworkConfigSpec) -> Result<Self, RenderError> {
        let sdn = sdn_config(conf)?;
        let proxy = conf.kube_proxy_config.clone().unwrap_or_default();

        Ok(Self {
            api_version: "v1",
            kind: "NodeConfig",
            serving_info: ServingInfo {
                bind_address: format!("{}:{}", proxy.bind_address, SERVING_PORT),
            },
            iptables_sync_period: proxy.iptables_sync_period,
            proxy_arguments: proxy.proxy_arguments,
            network_config: NodeNetworkConfig {
                network_plugin_name: checked_plugin_name(&sdn.mode)?,
                mtu: sdn
                    .mtu
                    .ok_or_else(|| RenderError::InvalidInput("openshiftSDNConfig.mtu is unset".to_string()))?,
            },
            enable_unidling: true,
        })
    }
}

impl ControllerConfig {
    pub fn new(conf: &NetworkConfigSpec) -> Result<Self, RenderError> {
        let sdn = sdn_config(conf)?;

        Ok(Self {
            api_version: "v1",
            kind: "MasterConfig",
            network_config: ControllerNetworkConfig {
                network_plugin_name: checked_plugin_name(&sdn.mode)?,
                cluster_networks: conf
                    .cluster_networks
                    .iter()
                    .map(|cn| ClusterNetworkEntry {
                        cidr: cn.cidr.clone(),
                        host_subnet_length: cn.host_subnet_length,
                    })
                    .collect(),
                service_network_cidr: conf.service_network.clone(),
                vxlan_port: sdn.vxlan_port.ok_or_else(|| {
                    RenderError::InvalidInput("openshiftSDNConfig.vxlanPort is unset".to_string())
                })?,
            },
        })
    }
}

fn sdn_config(conf: &NetworkConfigSpec) -> Result<&OpenShiftSdnConfig, RenderError> {
    conf.default_network
        .openshift_sdn()
        .ok_or_else(|| RenderError::InvalidInput("openshiftSDNConfig is unset".to_string()))
}

fn checked_plugin_name(mode: &SdnMode) -> Result<&'static str, RenderError> {
    plugin_name(mode).ok_or_else(|| RenderError::InvalidInput(format!("unknown mode \"{mode}\"")))
}
