use std::fmt::Display;

use kube::Resource;
use serde_yaml::Value;
use thiserror::Error;

use super::crd::{
    v1::networkattachmentdefinition::NetworkAttachmentDefinition,
    v1alpha1::{
        interface::Interface, ipclaim::IPClaim, network::Network, vlanclaim::VLANClaim,
        workloadcluster::WorkloadCluster,
    },
};

#[derive(Debug, Error)]
pub enum ObjectDecodeError {
    #[error("Couldn't decode {} '{}'! Reason: {}", .kind, .name, .source)]
    Malformed {
        kind: ObjectKind,
        name: String,
        source: serde_yaml::Error,
    },
}

/// Kinds the function knows how to interpret, everything else is passed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    WorkloadCluster,
    Network,
    Interface,
    IpClaim,
    VlanClaim,
    NetworkAttachmentDefinition,
}

impl ObjectKind {
    const ALL: [ObjectKind; 6] = [
        ObjectKind::WorkloadCluster,
        ObjectKind::Network,
        ObjectKind::Interface,
        ObjectKind::IpClaim,
        ObjectKind::VlanClaim,
        ObjectKind::NetworkAttachmentDefinition,
    ];

    pub fn api_version(&self) -> String {
        match self {
            ObjectKind::WorkloadCluster => WorkloadCluster::api_version(&()).into_owned(),
            ObjectKind::Network => Network::api_version(&()).into_owned(),
            ObjectKind::Interface => Interface::api_version(&()).into_owned(),
            ObjectKind::IpClaim => IPClaim::api_version(&()).into_owned(),
            ObjectKind::VlanClaim => VLANClaim::api_version(&()).into_owned(),
            ObjectKind::NetworkAttachmentDefinition => {
                NetworkAttachmentDefinition::api_version(&()).into_owned()
            }
        }
    }

    pub fn kind(&self) -> String {
        match self {
            ObjectKind::WorkloadCluster => WorkloadCluster::kind(&()).into_owned(),
            ObjectKind::Network => Network::kind(&()).into_owned(),
            ObjectKind::Interface => Interface::kind(&()).into_owned(),
            ObjectKind::IpClaim => IPClaim::kind(&()).into_owned(),
            ObjectKind::VlanClaim => VLANClaim::kind(&()).into_owned(),
            ObjectKind::NetworkAttachmentDefinition => {
                NetworkAttachmentDefinition::kind(&()).into_owned()
            }
        }
    }

    pub fn from_type_meta(api_version: &str, kind: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|known| known.api_version() == api_version && known.kind() == kind)
    }

    pub fn of_value(value: &Value) -> Option<Self> {
        let api_version = value.get("apiVersion").and_then(Value::as_str)?;
        let kind = value.get("kind").and_then(Value::as_str)?;

        Self::from_type_meta(api_version, kind)
    }
}

impl Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.kind())
    }
}

/// Closed set of typed objects consumed by the function.
#[derive(Debug, Clone)]
pub enum KrmObject {
    WorkloadCluster(WorkloadCluster),
    Network(Network),
    Interface(Interface),
    IpClaim(IPClaim),
    VlanClaim(VLANClaim),
    NetworkAttachmentDefinition(NetworkAttachmentDefinition),
}

impl KrmObject {
    /// Returns `Ok(None)` for objects of unknown kinds.
    pub fn from_value(value: &Value) -> Result<Option<Self>, ObjectDecodeError> {
        let kind = match ObjectKind::of_value(value) {
            Some(kind) => kind,
            None => return Ok(None),
        };
        let malformed = |source| ObjectDecodeError::Malformed {
            kind,
            name: value_name(value).to_owned(),
            source,
        };
        let owned = value.clone();

        let object = match kind {
            ObjectKind::WorkloadCluster => {
                KrmObject::WorkloadCluster(serde_yaml::from_value(owned).map_err(malformed)?)
            }
            ObjectKind::Network => {
                KrmObject::Network(serde_yaml::from_value(owned).map_err(malformed)?)
            }
            ObjectKind::Interface => {
                KrmObject::Interface(serde_yaml::from_value(owned).map_err(malformed)?)
            }
            ObjectKind::IpClaim => {
                KrmObject::IpClaim(serde_yaml::from_value(owned).map_err(malformed)?)
            }
            ObjectKind::VlanClaim => {
                KrmObject::VlanClaim(serde_yaml::from_value(owned).map_err(malformed)?)
            }
            ObjectKind::NetworkAttachmentDefinition => KrmObject::NetworkAttachmentDefinition(
                serde_yaml::from_value(owned).map_err(malformed)?,
            ),
        };

        Ok(Some(object))
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            KrmObject::WorkloadCluster(_) => ObjectKind::WorkloadCluster,
            KrmObject::Network(_) => ObjectKind::Network,
            KrmObject::Interface(_) => ObjectKind::Interface,
            KrmObject::IpClaim(_) => ObjectKind::IpClaim,
            KrmObject::VlanClaim(_) => ObjectKind::VlanClaim,
            KrmObject::NetworkAttachmentDefinition(_) => ObjectKind::NetworkAttachmentDefinition,
        }
    }
}

pub fn value_name(value: &Value) -> &str {
    value
        .get("metadata")
        .and_then(|metadata| metadata.get("name"))
        .and_then(Value::as_str)
        .unwrap_or_default()
}

pub fn value_annotation<'a>(value: &'a Value, key: &str) -> &'a str {
    value
        .get("metadata")
        .and_then(|metadata| metadata.get("annotations"))
        .and_then(|annotations| annotations.get(key))
        .and_then(Value::as_str)
        .unwrap_or_default()
}

pub fn value_namespace(value: &Value) -> &str {
    value
        .get("metadata")
        .and_then(|metadata| metadata.get("namespace"))
        .and_then(Value::as_str)
        .unwrap_or_default()
}
