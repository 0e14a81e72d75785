//! Manifest rendering for the OpenShift SDN backend.

use std::collections::BTreeSet;
use std::path::PathBuf;

use k8s_openapi::api::apps::v1::Deployment;
use sdn_apply::ManifestObject;
use sdn_crds::NetworkConfigSpec;
use serde::Serialize;
use tracing::info;

use super::config::{ControllerConfig, NodeConfig};
use crate::error::RenderError;
use crate::template;

/// Template directory of this backend, relative to the manifest root
pub const MANIFEST_SUBDIR: &str = "network/openshift-sdn";

const MASTER_NODE_LABEL: &str = "node-role.kubernetes.io/master";

/// Inputs to rendering that do not come from the network config
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Root of the manifest template tree
    pub manifest_dir: PathBuf,
    /// Image for the node daemons (sdn, ovs)
    pub node_image: String,
    /// Image for the SDN controller
    pub controller_image: String,
}

#[derive(Debug, Serialize)]
struct RenderData<'a> {
    node_image: &'a str,
    controller_image: &'a str,
    install_ovs: bool,
    node_config: String,
    controller_config: String,
}

/// Renders the full OpenShift SDN manifest set.
///
/// `conf` must be defaulted and validated. The Namespace comes first; the
/// openvswitch DaemonSet is left out when openvswitch is host-provided.
pub fn render(conf: &NetworkConfigSpec, opts: &RenderOptions) -> Result<Vec<ManifestObject>, RenderError> {
    let sdn = conf
        .default_network
        .openshift_sdn()
        .ok_or_else(|| RenderError::InvalidInput("openshiftSDNConfig is unset".to_string()))?;

    let data = RenderData {
        node_image: &opts.node_image,
        controller_image: &opts.controller_image,
        install_ovs: !sdn.use_external_openvswitch.unwrap_or(false),
        node_config: serde_json::to_string(&NodeConfig::new(conf)?)?,
        controller_config: serde_json::to_string(&ControllerConfig::new(conf)?)?,
    };

    let mut objs = template::render_dir(&opts.manifest_dir.join(MANIFEST_SUBDIR), &data)?;
    check_manifest_set(&mut objs)?;

    info!(
        "Rendered {} openshift-sdn objects (openvswitch {})",
        objs.len(),
        if data.install_ovs { "managed" } else { "external" }
    );
    Ok(objs)
}

/// Orders the set and checks the properties the apply step relies on
fn check_manifest_set(objs: &mut [ManifestObject]) -> Result<(), RenderError> {
    // Stable: everything else keeps template order
    objs.sort_by_key(|obj| obj.kind() != "Namespace");
    if objs.first().is_none_or(|obj| obj.kind() != "Namespace") {
        return Err(RenderError::Malformed("no Namespace object".to_string()));
    }

    let mut seen = BTreeSet::new();
    for obj in objs.iter() {
        if obj.api_version().is_empty() || obj.kind().is_empty() || obj.name().is_empty() {
            return Err(RenderError::Malformed(format!(
                "object {} lacks apiVersion, kind or name",
                obj.id()
            )));
        }
        if !seen.insert(obj.id()) {
            return Err(RenderError::Malformed(format!("duplicate object {}", obj.id())));
        }
        if obj.kind() == "Deployment" {
            check_pinned_to_masters(obj)?;
        }
    }
    Ok(())
}

fn check_pinned_to_masters(obj: &ManifestObject) -> Result<(), RenderError> {
    let deployment: Deployment = serde_json::from_value(obj.clone().into_value())?;
    let pinned = deployment
        .spec
        .and_then(|spec| spec.template.spec)
        .and_then(|pod| pod.node_selector)
        .is_some_and(|selector| selector.contains_key(MASTER_NODE_LABEL));
    if pinned {
        Ok(())
    } else {
        Err(RenderError::Malformed(format!(
            "{} must select {} nodes",
            obj.id(),
            MASTER_NODE_LABEL
        )))
    }
}
