use std::collections::BTreeMap;

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[derive(CustomResource, Deserialize, Serialize, Clone, Default, Debug, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[kube(
    group = "infra.nephio.org",
    version = "v1alpha1",
    kind = "Network",
    namespaced,
    derive = "Default"
)]
pub struct NetworkSpec {
    /// routing tables of this network, each one is a network instance
    #[serde(default)]
    pub routing_tables: Vec<RoutingTable>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoutingTable {
    /// correlates with `networkInstance.name` of the claims
    pub name: String,
    #[serde(default)]
    pub prefixes: Vec<Prefix>,
}

#[skip_serializing_none]
#[derive(Deserialize, Serialize, Clone, Default, Debug, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Prefix {
    pub prefix: String,
    pub labels: Option<BTreeMap<String, String>>,
}

impl Network {
    pub fn routing_tables_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a RoutingTable> + 'a {
        self.spec
            .routing_tables
            .iter()
            .filter(move |table| table.name == name)
    }
}
