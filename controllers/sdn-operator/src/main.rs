//! SDN Operator
//!
//! Runs one reconcile cycle for the cluster's OpenShift SDN overlay:
//! the NetworkConfig is defaulted, validated and checked against the
//! previously applied one, then the manifests that deploy the overlay are
//! printed to stdout as a YAML stream for the apply step.

mod config;
mod error;
mod reconciler;

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use sdn_crds::NetworkConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::OperatorConfig;
use crate::error::OperatorError;
use crate::reconciler::Reconciler;

fn main() -> Result<()> {
    // stdout carries the manifests
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    info!("Starting SDN Operator");

    let config = OperatorConfig::from_env()?;

    info!("Configuration:");
    info!("  Network config: {}", config.network_config.display());
    info!(
        "  Previous config: {}",
        config
            .previous_config
            .as_deref()
            .map_or_else(|| "none".to_string(), |p| p.display().to_string())
    );
    info!("  Manifest dir: {}", config.manifest_dir.display());
    info!("  Host MTU: {}", config.host_mtu);

    let desired = load_network_config(&config.network_config)?;
    let previous = config
        .previous_config
        .as_deref()
        .map(load_network_config)
        .transpose()?;

    let reconciler = Reconciler::new(&config);
    let outcome = reconciler.reconcile(desired.spec.clone(), previous.as_ref().map(|p| &p.spec))?;

    let mut stdout = io::stdout().lock();
    for obj in &outcome.objects {
        write!(stdout, "---\n{}", obj.to_yaml()?)?;
    }
    stdout.flush()?;

    if let Some(path) = &config.applied_config_out {
        let applied = NetworkConfig {
            metadata: desired.metadata,
            spec: outcome.applied,
        };
        fs::write(path, serde_yaml::to_string(&applied)?).map_err(|source| OperatorError::Io {
            path: path.clone(),
            source,
        })?;
        info!("Wrote applied network config to {}", path.display());
    }

    Ok(())
}

fn load_network_config(path: &Path) -> Result<NetworkConfig, OperatorError> {
    let raw = fs::read_to_string(path).map_err(|source| OperatorError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&raw).map_err(|source| OperatorError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
