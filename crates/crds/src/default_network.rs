//! Default network backend selection
//!
//! On the wire the default network is a discriminated structure: a `type`
//! tag plus one optional payload field per backend. In Rust it is an enum with
//! exactly one variant per backend; the conversion happens at the serde
//! boundary, where a tag/payload disagreement is rejected.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire tag of the OpenShift SDN backend
pub const NETWORK_TYPE_OPENSHIFT_SDN: &str = "OpenShiftSDN";

/// The selected default network backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DefaultNetworkDefinition", into = "DefaultNetworkDefinition")]
pub enum DefaultNetwork {
    /// VXLAN overlay programmed through openvswitch.
    /// The payload is `None` until defaulting fills it in.
    OpenShiftSdn(Option<OpenShiftSdnConfig>),
}

impl DefaultNetwork {
    /// Wire tag of the selected backend
    pub fn network_type(&self) -> &'static str {
        match self {
            DefaultNetwork::OpenShiftSdn(_) => NETWORK_TYPE_OPENSHIFT_SDN,
        }
    }

    /// OpenShift SDN payload, if that backend is selected and configured
    pub fn openshift_sdn(&self) -> Option<&OpenShiftSdnConfig> {
        match self {
            DefaultNetwork::OpenShiftSdn(config) => config.as_ref(),
        }
    }

    /// Mutable OpenShift SDN payload, if that backend is selected and configured
    pub fn openshift_sdn_mut(&mut self) -> Option<&mut OpenShiftSdnConfig> {
        match self {
            DefaultNetwork::OpenShiftSdn(config) => config.as_mut(),
        }
    }
}

/// Wire representation of [`DefaultNetwork`]
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DefaultNetworkDefinition {
    /// Backend tag (e.g., "OpenShiftSDN")
    #[serde(rename = "type")]
    pub network_type: String,

    /// OpenShift SDN payload; only valid when `type` is "OpenShiftSDN"
    #[serde(
        rename = "openshiftSDNConfig",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub openshift_sdn_config: Option<OpenShiftSdnConfig>,
}

/// Rejections at the default network deserialization boundary
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DefaultNetworkError {
    #[error("unsupported default network type \"{0}\"")]
    UnsupportedType(String),

    #[error("openshiftSDNConfig is set but default network type is \"{0}\"")]
    MismatchedConfig(String),
}

impl TryFrom<DefaultNetworkDefinition> for DefaultNetwork {
    type Error = DefaultNetworkError;

    fn try_from(def: DefaultNetworkDefinition) -> Result<Self, Self::Error> {
        if def.network_type == NETWORK_TYPE_OPENSHIFT_SDN {
            return Ok(DefaultNetwork::OpenShiftSdn(def.openshift_sdn_config));
        }
        if def.openshift_sdn_config.is_some() {
            Err(DefaultNetworkError::MismatchedConfig(def.network_type))
        } else {
            Err(DefaultNetworkError::UnsupportedType(def.network_type))
        }
    }
}

impl From<DefaultNetwork> for DefaultNetworkDefinition {
    fn from(network: DefaultNetwork) -> Self {
        match network {
            DefaultNetwork::OpenShiftSdn(config) => DefaultNetworkDefinition {
                network_type: NETWORK_TYPE_OPENSHIFT_SDN.to_string(),
                openshift_sdn_config: config,
            },
        }
    }
}

/// OpenShift SDN backend configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OpenShiftSdnConfig {
    /// Isolation mode
    #[serde(default)]
    #[schemars(with = "String")]
    pub mode: SdnMode,

    /// UDP destination port for VXLAN encapsulation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vxlan_port: Option<u32>,

    /// MTU of the overlay interface
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtu: Option<u32>,

    /// When true, openvswitch is provided by the host and not deployed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_external_openvswitch: Option<bool>,
}

/// OpenShift SDN isolation mode
///
/// Unrecognized wire values are kept in `Unknown` so that validation can
/// report them instead of the whole document failing to parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SdnMode {
    /// Per-namespace NetworkPolicy isolation
    #[default]
    NetworkPolicy,
    /// Per-project VNID isolation
    Multitenant,
    /// Flat network, no isolation
    Subnet,
    /// Anything else found on the wire
    Unknown(String),
}

impl SdnMode {
    pub fn as_str(&self) -> &str {
        match self {
            SdnMode::NetworkPolicy => "NetworkPolicy",
            SdnMode::Multitenant => "Multitenant",
            SdnMode::Subnet => "Subnet",
            SdnMode::Unknown(other) => other,
        }
    }

    /// True for the closed set of modes the SDN implements
    pub fn is_known(&self) -> bool {
        !matches!(self, SdnMode::Unknown(_))
    }
}

impl From<String> for SdnMode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "NetworkPolicy" => SdnMode::NetworkPolicy,
            "Multitenant" => SdnMode::Multitenant,
            "Subnet" => SdnMode::Subnet,
            _ => SdnMode::Unknown(value),
        }
    }
}

impl From<&str> for SdnMode {
    fn from(value: &str) -> Self {
        SdnMode::from(value.to_string())
    }
}

impl From<SdnMode> for String {
    fn from(mode: SdnMode) -> Self {
        match mode {
            SdnMode::Unknown(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for SdnMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
