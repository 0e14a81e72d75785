//! SDN configuration engine
//!
//! Pure functions over a [`NetworkConfigSpec`]: fill in defaults, validate,
//! check that a change is safe for a running overlay, and render the
//! manifests that deploy it. A reconcile cycle runs them in that order:
//!
//! ```text
//! fill_defaults -> validate -> is_change_safe (updates only) -> render
//! ```
//!
//! Each entry point dispatches on the selected default network backend.

pub mod error;
pub mod openshift_sdn;
pub mod template;

#[cfg(test)]
mod test_utils;

use ipnet::IpNet;
use sdn_apply::ManifestObject;
use sdn_crds::{DefaultNetwork, NetworkConfigSpec};

pub use error::{ConfigError, RenderError, UnsafeChange};
pub use openshift_sdn::RenderOptions;

/// Fills unset fields. Never fails and is idempotent.
pub fn fill_defaults(conf: &mut NetworkConfigSpec, previous: Option<&NetworkConfigSpec>, host_mtu: u32) {
    match conf.default_network {
        DefaultNetwork::OpenShiftSdn(_) => openshift_sdn::fill_defaults(conf, previous, host_mtu),
    }
}

/// Returns every validation error; an empty list means the config is usable
pub fn validate(conf: &NetworkConfigSpec) -> Vec<ConfigError> {
    let mut errs = validate_ip_pools(conf);
    match conf.default_network {
        DefaultNetwork::OpenShiftSdn(_) => errs.extend(openshift_sdn::validate(conf)),
    }
    errs
}

/// Returns the reasons `next` cannot replace `prev`; empty means safe
pub fn is_change_safe(prev: &NetworkConfigSpec, next: &NetworkConfigSpec) -> Vec<UnsafeChange> {
    match (&prev.default_network, &next.default_network) {
        (DefaultNetwork::OpenShiftSdn(_), DefaultNetwork::OpenShiftSdn(_)) => {
            openshift_sdn::is_change_safe(prev, next)
        }
    }
}

/// Renders the manifests for a defaulted, validated config
pub fn render(conf: &NetworkConfigSpec, opts: &RenderOptions) -> Result<Vec<ManifestObject>, RenderError> {
    match conf.default_network {
        DefaultNetwork::OpenShiftSdn(_) => openshift_sdn::render(conf, opts),
    }
}

fn validate_ip_pools(conf: &NetworkConfigSpec) -> Vec<ConfigError> {
    let mut errs = Vec::new();
    if conf.service_network.parse::<IpNet>().is_err() {
        errs.push(ConfigError::InvalidServiceNetwork(conf.service_network.clone()));
    }
    for cn in &conf.cluster_networks {
        if cn.cidr.parse::<IpNet>().is_err() {
            errs.push(ConfigError::InvalidClusterNetwork(cn.cidr.clone()));
        }
    }
    errs
}
