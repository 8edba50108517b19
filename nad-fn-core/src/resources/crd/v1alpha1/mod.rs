use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub mod interface;
pub mod ipclaim;
pub mod network;
pub mod vlanclaim;
pub mod workloadcluster;

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
pub struct NetworkInstanceRef {
    pub name: String,
}
