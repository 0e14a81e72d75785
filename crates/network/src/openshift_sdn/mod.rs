//! OpenShift SDN backend
//!
//! VXLAN overlay programmed through openvswitch. The SDN runs as a node
//! daemon plus a controller on the masters; openvswitch itself is either
//! deployed alongside or provided by the host.

mod config;
mod defaults;
mod render;
mod safety;
mod validation;


pub use config::{ControllerConfig, NodeConfig, plugin_name};
pub use defaults::{
    DEFAULT_METRICS_BIND_ADDRESS, DEFAULT_PROXY_BIND_ADDRESS, DEFAULT_VXLAN_PORT,
    METRICS_BIND_ADDRESS_ARG, VXLAN_OVERHEAD, fill_defaults,
};
pub use render::{MANIFEST_SUBDIR, RenderOptions, render};
pub use safety::is_change_safe;
pub use validation::{MAX_MTU, MAX_VXLAN_PORT, validate};
