//! SDN Operator CRD Definitions
//!
//! Kubernetes Custom Resource Definitions consumed by the SDN configuration engine.

pub mod default_network;
pub mod network_config;

pub use default_network::*;
pub use network_config::*;
