//! Operator-specific error types.
//!
//! This module defines error types specific to the SDN operator binary
//! that are not covered by the engine's own errors.

use std::fmt::Display;
use std::path::PathBuf;

use sdn_apply::ApplyError;
use sdn_network::{ConfigError, RenderError, UnsafeChange};
use thiserror::Error;

/// Errors that can occur while running a reconcile cycle.
#[derive(Debug, Error)]
pub enum OperatorError {
    /// Invalid process configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Input or output file could not be accessed
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file is not a NetworkConfig
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The network config failed validation
    #[error("invalid network configuration: {}", join(.0))]
    InvalidNetworkConfig(Vec<ConfigError>),

    /// The change cannot be applied to the running overlay
    #[error("unsafe network configuration change: {}", join(.0))]
    UnsafeChange(Vec<UnsafeChange>),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Apply error: {0}")]
    Apply(#[from] ApplyError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),
}

/// Every finding, in order, separated by "; "
fn join<E: Display>(errs: &[E]) -> String {
    errs.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}
