//! NetworkConfig CRD
//!
//! Cluster-scoped declarative configuration for the pod overlay network.
//! One instance describes the service network, the cluster (pod) networks,
//! the default network backend and the proxy settings handed to the nodes.

use std::collections::BTreeMap;

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::default_network::{DefaultNetwork, DefaultNetworkDefinition};

/// NetworkConfigSpec defines the desired state of the cluster network
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "networkoperator.openshift.io",
    version = "v1",
    kind = "NetworkConfig",
    plural = "networkconfigs",
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfigSpec {
    /// Service network CIDR (e.g., "172.30.0.0/16")
    pub service_network: String,

    /// Pod networks; nodes are handed host subnets carved out of these
    #[serde(default)]
    pub cluster_networks: Vec<ClusterNetwork>,

    /// Default network backend and its backend-specific configuration
    #[schemars(with = "DefaultNetworkDefinition")]
    pub default_network: DefaultNetwork,

    /// Whether a standalone kube-proxy is deployed (computed when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deploy_kube_proxy: Option<bool>,

    /// Proxy settings shared by the SDN-integrated proxy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kube_proxy_config: Option<ProxyConfig>,
}

/// A pod network range and the size of the per-node subnets cut from it
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterNetwork {
    /// Pod network CIDR (e.g., "10.128.0.0/14")
    pub cidr: String,

    /// Number of host bits in each node subnet
    pub host_subnet_length: u32,
}

/// Proxy configuration
///
/// Empty strings mean "unset" for both `bindAddress` and `iptablesSyncPeriod`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProxyConfig {
    /// IP address the proxy binds to (e.g., "0.0.0.0")
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bind_address: String,

    /// iptables resync interval as a duration string (e.g., "30s")
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub iptables_sync_period: String,

    /// Extra proxy arguments; one flag may carry several values
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub proxy_arguments: BTreeMap<String, Vec<String>>,
}
