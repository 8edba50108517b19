use std::collections::BTreeMap;

use derive_builder::Builder;
use kube::core::ObjectMeta;

use crate::{
    resources::{
        cni::{CniAddress, CniCapabilities, CniConfig, CniIpam, CniPlugin, CniRoute, STATIC_IPAM},
        crd::v1::networkattachmentdefinition::{
            NetworkAttachmentDefinition, NetworkAttachmentDefinitionSpec,
        },
    },
    SPECIALIZER_OWNER_ANNOTATION,
};

use super::error::SynthesisError;

pub const VLAN_CNI_TYPE: &str = "vlan";
pub const BRIDGE_CNI_TYPE: &str = "bridge";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAddress {
    pub address: String,
    pub gateway: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub destination: String,
    pub gateway: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentLink {
    /// host interface the plugin attaches to (with a VLAN sub-interface suffix, if any)
    Master(String),
    /// linux bridge the plugin attaches to
    Bridge(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(setter(into))]
pub struct SynthesizedAttachment {
    pub name: String,
    pub namespace: String,
    /// full name of the object the attachment was generated from
    #[builder(default, setter(strip_option))]
    pub owner: Option<String>,
    /// unset in VLAN-only mode
    #[builder(default, setter(strip_option))]
    pub cni_type: Option<String>,
    #[builder(default, setter(strip_option))]
    pub link: Option<AttachmentLink>,
    #[builder(default)]
    pub addresses: Vec<ResolvedAddress>,
    #[builder(default)]
    pub routes: Vec<ResolvedRoute>,
}

/// Picks the link of the attachment.
///
/// Everything but the `vlan` plugin expects the VLAN to be terminated on a
/// sub-interface of the master (`eth1.20`), `bridge` attaches to a bridge
/// named after the VLAN instead and doesn't need the master interface at all.
pub fn resolve_link(
    cni_type: &str,
    vlan_id: u16,
    master_interface: Option<&str>,
) -> Result<AttachmentLink, SynthesisError> {
    if cni_type == BRIDGE_CNI_TYPE {
        return Ok(AttachmentLink::Bridge(bridge_name(vlan_id)));
    }

    let master = master_interface
        .filter(|master| !master.is_empty())
        .ok_or_else(|| {
            SynthesisError::validation(format!(
                "workload cluster has no masterInterface, required by the '{cni_type}' CNI"
            ))
        })?;

    if cni_type != VLAN_CNI_TYPE && vlan_id != 0 {
        return Ok(AttachmentLink::Master(format!("{master}.{vlan_id}")));
    }

    Ok(AttachmentLink::Master(master.to_owned()))
}

pub fn bridge_name(vlan_id: u16) -> String {
    format!("br{vlan_id}")
}

impl SynthesizedAttachment {
    pub fn is_vlan_only(&self) -> bool {
        self.cni_type.is_none()
    }

    pub fn generate_cni_config(&self) -> CniConfig {
        let cni_type = match &self.cni_type {
            Some(cni_type) => cni_type,
            None => return CniConfig::default(),
        };
        let (master, bridge) = match &self.link {
            Some(AttachmentLink::Master(master)) => (Some(master.to_owned()), None),
            Some(AttachmentLink::Bridge(bridge)) => (None, Some(bridge.to_owned())),
            None => (None, None),
        };

        CniConfig {
            plugins: vec![CniPlugin {
                type_: cni_type.to_owned(),
                capabilities: Some(CniCapabilities { ips: true }),
                master,
                bridge,
                ipam: Some(CniIpam {
                    type_: STATIC_IPAM.to_owned(),
                    addresses: self
                        .addresses
                        .iter()
                        .map(|a| CniAddress {
                            address: a.address.to_owned(),
                            gateway: a.gateway.to_owned(),
                        })
                        .collect(),
                    routes: self
                        .routes
                        .iter()
                        .map(|r| CniRoute {
                            destination: r.destination.to_owned(),
                            gateway: r.gateway.to_owned(),
                        })
                        .collect(),
                }),
            }],
            ..Default::default()
        }
    }

    pub fn generate_metadata(&self) -> ObjectMeta {
        ObjectMeta {
            name: Some(self.name.to_owned()),
            namespace: Some(self.namespace.to_owned()),
            annotations: self.owner.as_ref().map(|owner| {
                BTreeMap::from([(SPECIALIZER_OWNER_ANNOTATION.to_owned(), owner.to_owned())])
            }),
            ..Default::default()
        }
    }

    pub fn generate_network_attachment_definition(
        &self,
    ) -> Result<NetworkAttachmentDefinition, SynthesisError> {
        let config =
            serde_json::to_string(&self.generate_cni_config()).map_err(SynthesisError::Render)?;

        Ok(NetworkAttachmentDefinition {
            metadata: self.generate_metadata(),
            spec: NetworkAttachmentDefinitionSpec { config },
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        resources::cni::CniConfig, synthesis::error::SynthesisError, SPECIALIZER_OWNER_ANNOTATION,
    };

    use super::{
        resolve_link, AttachmentLink, ResolvedAddress, ResolvedRoute, SynthesizedAttachment,
        SynthesizedAttachmentBuilder,
    };

    #[test]
    fn vlan_id_selects_sub_interface() {
        assert_eq!(
            resolve_link("macvlan", 30, Some("eth1")).unwrap(),
            AttachmentLink::Master("eth1.30".to_owned())
        );
        assert_eq!(
            resolve_link("macvlan", 0, Some("eth1")).unwrap(),
            AttachmentLink::Master("eth1".to_owned())
        );
    }

    #[test]
    fn vlan_plugin_keeps_plain_master() {
        assert_eq!(
            resolve_link("vlan", 30, Some("eth1")).unwrap(),
            AttachmentLink::Master("eth1".to_owned())
        );
    }

    #[test]
    fn bridge_plugin_is_named_after_vlan() {
        assert_eq!(
            resolve_link("bridge", 20, None).unwrap(),
            AttachmentLink::Bridge("br20".to_owned())
        );
    }

    #[test]
    fn master_interface_required_for_non_bridge_plugins() {
        assert!(matches!(
            resolve_link("ipvlan", 0, None),
            Err(SynthesisError::Validation(_))
        ));
        assert!(matches!(
            resolve_link("ipvlan", 0, Some("")),
            Err(SynthesisError::Validation(_))
        ));
    }

    #[test]
    fn builder_requires_identity() {
        assert!(SynthesizedAttachmentBuilder::default()
            .name("upf-n3")
            .build()
            .is_err());
    }

    #[test]
    fn vlan_only_attachment_renders_empty_plugin_list() {
        let attachment = SynthesizedAttachmentBuilder::default()
            .name("upf-n3")
            .namespace("upf")
            .build()
            .unwrap();
        let nad = attachment.generate_network_attachment_definition().unwrap();

        assert!(attachment.is_vlan_only());
        assert_eq!(nad.metadata.name.as_deref(), Some("upf-n3"));
        assert_eq!(nad.metadata.namespace.as_deref(), Some("upf"));
        assert!(nad.metadata.annotations.is_none());
        assert_eq!(
            serde_json::from_str::<CniConfig>(&nad.spec.config).unwrap(),
            CniConfig::default()
        );
    }

    #[test]
    fn renders_static_ipam_config() {
        let attachment = SynthesizedAttachment {
            name: "upf-n3".to_owned(),
            namespace: "upf".to_owned(),
            owner: None,
            cni_type: Some("macvlan".to_owned()),
            link: Some(AttachmentLink::Master("eth1".to_owned())),
            addresses: vec![ResolvedAddress {
                address: "10.0.0.5/24".to_owned(),
                gateway: "10.0.0.1".to_owned(),
            }],
            routes: vec![ResolvedRoute {
                destination: "10.1.0.0/16".to_owned(),
                gateway: "10.0.0.1".to_owned(),
            }],
        };
        let nad = attachment.generate_network_attachment_definition().unwrap();

        assert_eq!(
            nad.spec.config,
            r#"{"cniVersion":"0.3.1","plugins":[{"type":"macvlan","capabilities":{"ips":true},"master":"eth1","ipam":{"type":"static","addresses":[{"address":"10.0.0.5/24","gateway":"10.0.0.1"}],"routes":[{"dst":"10.1.0.0/16","gw":"10.0.0.1"}]}}]}"#
        );
    }

    #[test]
    fn owner_is_stamped_as_annotation() {
        let attachment = SynthesizedAttachmentBuilder::default()
            .name("upf-n3")
            .namespace("upf")
            .owner("req.nephio.org/v1alpha1.Interface.n3")
            .build()
            .unwrap();
        let metadata = attachment.generate_metadata();

        assert_eq!(
            metadata
                .annotations
                .as_ref()
                .and_then(|annotations| annotations.get(SPECIALIZER_OWNER_ANNOTATION))
                .map(String::as_str),
            Some("req.nephio.org/v1alpha1.Interface.n3")
        );
    }
}
