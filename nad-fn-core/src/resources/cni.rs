use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

pub const CNI_VERSION: &str = "0.3.1";
pub const STATIC_IPAM: &str = "static";

/// CNI plugin chain carried in `spec.config` of a NetworkAttachmentDefinition.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CniConfig {
    pub cni_version: String,
    pub plugins: Vec<CniPlugin>,
}

impl Default for CniConfig {
    fn default() -> Self {
        Self {
            cni_version: CNI_VERSION.to_owned(),
            plugins: Vec::new(),
        }
    }
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CniPlugin {
    #[serde(rename = "type")]
    pub type_: String,
    pub capabilities: Option<CniCapabilities>,
    pub master: Option<String>,
    pub bridge: Option<String>,
    pub ipam: Option<CniIpam>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CniCapabilities {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub ips: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct CniIpam {
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<CniAddress>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<CniRoute>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct CniAddress {
    pub address: String,
    pub gateway: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct CniRoute {
    #[serde(rename = "dst")]
    pub destination: String,
    #[serde(rename = "gw")]
    pub gateway: String,
}
