use log::debug;

use crate::resources::crd::v1alpha1::workloadcluster::WorkloadClusterSpec;

use super::error::SynthesisError;

pub fn validate_cni_type(cluster: &WorkloadClusterSpec, requested: &str) -> Result<(), SynthesisError> {
    if !cluster.supports(requested) {
        return Err(SynthesisError::UnsupportedPlugin {
            requested: requested.to_owned(),
            supported: cluster.supported_cnis().to_vec(),
        });
    }

    debug!("CNI type '{requested}' is supported by the workload cluster");

    Ok(())
}
