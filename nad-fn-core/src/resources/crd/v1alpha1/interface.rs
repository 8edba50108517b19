use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::NetworkInstanceRef;

#[skip_serializing_none]
#[derive(CustomResource, Deserialize, Serialize, Clone, Default, Debug, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[kube(
    group = "req.nephio.org",
    version = "v1alpha1",
    kind = "Interface",
    namespaced,
    derive = "Default"
)]
pub struct InterfaceSpec {
    /// network instance the interface gets attached to
    pub network_instance: NetworkInstanceRef,
    /// CNI plugin type requested for the attachment
    #[serde(default)]
    pub cni_type: String,
    /// how the interface is attached (none or vlan)
    pub attachment_type: Option<String>,
}

impl Interface {
    pub fn network_instance_name(&self) -> &str {
        &self.spec.network_instance.name
    }
}
