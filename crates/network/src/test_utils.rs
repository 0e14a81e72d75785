//! Test fixtures shared by the engine's unit tests

use std::path::PathBuf;

use sdn_crds::{ClusterNetwork, DefaultNetwork, NetworkConfigSpec, OpenShiftSdnConfig, SdnMode};

use crate::openshift_sdn::RenderOptions;

/// Two cluster networks, OpenShift SDN in NetworkPolicy mode, nothing defaulted
pub fn openshift_sdn_spec() -> NetworkConfigSpec {
    NetworkConfigSpec {
        service_network: "172.30.0.0/16".to_string(),
        cluster_networks: vec![
            ClusterNetwork {
                cidr: "10.128.0.0/15".to_string(),
                host_subnet_length: 9,
            },
            ClusterNetwork {
                cidr: "10.0.0.0/14".to_string(),
                host_subnet_length: 8,
            },
        ],
        default_network: DefaultNetwork::OpenShiftSdn(Some(OpenShiftSdnConfig {
            mode: SdnMode::NetworkPolicy,
            ..Default::default()
        })),
        deploy_kube_proxy: None,
        kube_proxy_config: None,
    }
}

/// The manifest templates shipped with the workspace
pub fn manifest_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../bindata")
}

pub fn render_options() -> RenderOptions {
    RenderOptions {
        manifest_dir: manifest_dir(),
        node_image: "quay.io/openshift/origin-node:latest".to_string(),
        controller_image: "quay.io/openshift/origin-node:latest".to_string(),
    }
}
