//! CRD generator
//!
//! Prints the ClientMount CustomResourceDefinition as YAML so it can be
//! applied to a cluster or committed to the deploy manifests.

use kube::CustomResourceExt;

fn main() {
    let crd = crds::ClientMount::crd();
    match serde_yaml::to_string(&crd) {
        Ok(yaml) => print!("{}", yaml),
        Err(e) => {
            eprintln!("Failed to serialize ClientMount CRD: {}", e);
            std::process::exit(1);
        }
    }
}
