use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::NetworkInstanceRef;

#[skip_serializing_none]
#[derive(CustomResource, Deserialize, Serialize, Clone, Default, Debug, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[kube(
    group = "ipam.resource.nephio.org",
    version = "v1alpha1",
    kind = "IPClaim",
    namespaced,
    status = "IPClaimStatus",
    derive = "Default"
)]
pub struct IPClaimSpec {
    /// claim kind (network, loopback, pool)
    pub kind: Option<String>,
    /// network instance the address is claimed from
    pub network_instance: NetworkInstanceRef,
}

#[skip_serializing_none]
#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IPClaimStatus {
    /// allocated prefix, e.g. 10.0.0.5/24
    pub prefix: Option<String>,
    /// gateway of the allocated prefix
    pub gateway: Option<String>,
}

impl IPClaim {
    /// Allocated `(address, gateway)`, empty strings while the claim is unresolved.
    pub fn resolved(&self) -> (&str, &str) {
        let status = self.status.as_ref();

        (
            status.and_then(|s| s.prefix.as_deref()).unwrap_or_default(),
            status.and_then(|s| s.gateway.as_deref()).unwrap_or_default(),
        )
    }

    pub fn network_instance_name(&self) -> &str {
        &self.spec.network_instance.name
    }
}
