use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[skip_serializing_none]
#[derive(CustomResource, Deserialize, Serialize, Clone, Default, Debug, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[kube(
    group = "vlan.resource.nephio.org",
    version = "v1alpha1",
    kind = "VLANClaim",
    namespaced,
    status = "VLANClaimStatus",
    derive = "Default"
)]
pub struct VLANClaimSpec {
    /// name of the VLAN index the id is claimed from
    pub vlan_index: Option<String>,
}

#[skip_serializing_none]
#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VLANClaimStatus {
    #[serde(rename = "vlanID")]
    pub vlan_id: Option<u16>,
}

impl VLANClaim {
    /// Allocated VLAN id, 0 while unresolved.
    pub fn vlan_id(&self) -> u16 {
        self.status
            .as_ref()
            .and_then(|status| status.vlan_id)
            .unwrap_or_default()
    }
}
