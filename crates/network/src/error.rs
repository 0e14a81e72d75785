//! Error types for the configuration engine.
//!
//! Validation and change-safety findings are plain values collected into
//! lists; only rendering has a fallible `Result` path.

use std::path::PathBuf;

use sdn_apply::ApplyError;
use thiserror::Error;

/// A single validation finding
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("ClusterNetworks cannot be empty")]
    EmptyClusterNetworks,

    #[error("invalid MTU {0}")]
    InvalidMtu(u32),

    #[error("invalid openshift-sdn mode \"{0}\"")]
    InvalidMode(String),

    #[error("invalid VXLANPort {0}")]
    InvalidVxlanPort(u32),

    #[error("invalid ServiceNetwork \"{0}\"")]
    InvalidServiceNetwork(String),

    #[error("invalid ClusterNetwork CIDR \"{0}\"")]
    InvalidClusterNetwork(String),
}

/// A change that cannot be applied to a running overlay
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UnsafeChange {
    #[error("cannot change openshift-sdn configuration")]
    OpenShiftSdnConfig,
}

/// Rendering failures; none of these leave a usable manifest set
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to render template {path}: {source}")]
    Template {
        path: PathBuf,
        #[source]
        source: minijinja::Error,
    },

    #[error("template {path} is not valid YAML: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("template {path} produced an invalid object: {source}")]
    Object {
        path: PathBuf,
        #[source]
        source: ApplyError,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("malformed manifest set: {0}")]
    Malformed(String),

    #[error("config is not defaulted and validated: {0}")]
    InvalidInput(String),
}
