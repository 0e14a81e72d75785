//! One reconcile cycle over a NetworkConfig.
//!
//! Defaults the desired config, validates it, checks the transition from the
//! previously applied config, and renders the manifests. Any finding stops
//! the cycle before rendering, and every finding is reported at once.

use sdn_apply::{ManifestObject, is_object_supported};
use sdn_crds::NetworkConfigSpec;
use sdn_network::{RenderOptions, fill_defaults, is_change_safe, render, validate};
use tracing::{debug, info};

use crate::config::OperatorConfig;
use crate::error::OperatorError;

/// Result of a successful cycle
#[derive(Debug)]
pub struct Reconciled {
    /// The defaulted config; becomes `previous` for the next cycle
    pub applied: NetworkConfigSpec,
    /// Manifests in apply order
    pub objects: Vec<ManifestObject>,
}

/// Runs reconcile cycles with fixed host inputs
#[derive(Debug, Clone)]
pub struct Reconciler {
    render_options: RenderOptions,
    host_mtu: u32,
}

impl Reconciler {
    pub fn new(config: &OperatorConfig) -> Self {
        Self {
            render_options: RenderOptions {
                manifest_dir: config.manifest_dir.clone(),
                node_image: config.node_image.clone(),
                controller_image: config.controller_image.clone(),
            },
            host_mtu: config.host_mtu,
        }
    }

    /// Reconciles `desired` against the config applied in the previous cycle, if any
    pub fn reconcile(
        &self,
        mut desired: NetworkConfigSpec,
        previous: Option<&NetworkConfigSpec>,
    ) -> Result<Reconciled, OperatorError> {
        fill_defaults(&mut desired, previous, self.host_mtu);
        debug!("Defaulted network config: {:?}", desired);

        let errs = validate(&desired);
        if !errs.is_empty() {
            return Err(OperatorError::InvalidNetworkConfig(errs));
        }

        if let Some(previous) = previous {
            let errs = is_change_safe(previous, &desired);
            if !errs.is_empty() {
                return Err(OperatorError::UnsafeChange(errs));
            }
        }

        let objects = render(&desired, &self.render_options)?;
        for obj in &objects {
            is_object_supported(obj)?;
        }

        info!("Reconciled {} network type with {} objects", desired.default_network.network_type(), objects.len());
        Ok(Reconciled {
            applied: desired,
            objects,
        })
    }
}
