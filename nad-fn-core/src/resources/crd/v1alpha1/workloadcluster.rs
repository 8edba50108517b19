use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[skip_serializing_none]
#[derive(CustomResource, Deserialize, Serialize, Clone, Default, Debug, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[kube(
    group = "infra.nephio.org",
    version = "v1alpha1",
    kind = "WorkloadCluster",
    namespaced,
    derive = "Default"
)]
pub struct WorkloadClusterSpec {
    /// name of the cluster this object describes
    pub cluster_name: Option<String>,
    /// CNI plugin types installed on the cluster, in order of preference
    pub cnis: Option<Vec<String>>,
    /// host interface secondary networks are attached to
    pub master_interface: Option<String>,
}

impl WorkloadClusterSpec {
    pub fn supported_cnis(&self) -> &[String] {
        self.cnis.as_deref().unwrap_or_default()
    }

    pub fn supports(&self, cni_type: &str) -> bool {
        self.supported_cnis().iter().any(|cni| cni == cni_type)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.supported_cnis().iter().any(|cni| cni.is_empty()) {
            return Err("cnis contains an empty entry".to_owned());
        }

        if matches!(self.master_interface.as_deref(), Some("")) {
            return Err("masterInterface is set but empty".to_owned());
        }

        Ok(())
    }
}
