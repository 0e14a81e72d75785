//! Prints the NetworkConfig CustomResourceDefinition as YAML.

use kube::CustomResourceExt;
use sdn_crds::NetworkConfig;

fn main() -> Result<(), serde_yaml::Error> {
    print!("{}", serde_yaml::to_string(&NetworkConfig::crd())?);
    Ok(())
}
