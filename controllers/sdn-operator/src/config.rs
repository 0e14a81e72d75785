//! Operator configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::error::OperatorError;

const DEFAULT_MANIFEST_DIR: &str = "/bindata";
const DEFAULT_HOST_MTU: u32 = 1500;

/// Settings for one reconcile cycle
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorConfig {
    /// NetworkConfig to reconcile (`NETWORK_CONFIG`, required)
    pub network_config: PathBuf,
    /// Last applied NetworkConfig (`PREVIOUS_CONFIG`)
    pub previous_config: Option<PathBuf>,
    /// Where the defaulted NetworkConfig is written on success (`APPLIED_CONFIG_OUT`)
    pub applied_config_out: Option<PathBuf>,
    /// Root of the manifest templates (`MANIFEST_DIR`)
    pub manifest_dir: PathBuf,
    /// MTU of the host's default interface (`HOST_MTU`)
    pub host_mtu: u32,
    /// Image for the node daemons (`NODE_IMAGE`)
    pub node_image: String,
    /// Image for the SDN controller (`CONTROLLER_IMAGE`, defaults to `NODE_IMAGE`)
    pub controller_image: String,
}

impl OperatorConfig {
    pub fn from_env() -> Result<Self, OperatorError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, OperatorError> {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let network_config = var("NETWORK_CONFIG").map(PathBuf::from).ok_or_else(|| {
            OperatorError::InvalidConfig("NETWORK_CONFIG environment variable is required".to_string())
        })?;

        let host_mtu = match var("HOST_MTU") {
            Some(raw) => raw.parse::<u32>().map_err(|e| {
                OperatorError::InvalidConfig(format!("HOST_MTU must be an unsigned integer, got {raw:?}: {e}"))
            })?,
            None => DEFAULT_HOST_MTU,
        };

        let node_image = var("NODE_IMAGE").unwrap_or_default();
        let controller_image = var("CONTROLLER_IMAGE").unwrap_or_else(|| node_image.clone());

        Ok(Self {
            network_config,
            previous_config: var("PREVIOUS_CONFIG").map(PathBuf::from),
            applied_config_out: var("APPLIED_CONFIG_OUT").map(PathBuf::from),
            manifest_dir: var("MANIFEST_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST_DIR)),
            host_mtu,
            node_image,
            controller_image,
        })
    }
}
