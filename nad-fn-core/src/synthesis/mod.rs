use log::{debug, info};

use crate::{
    helpers::{pretty_type_name, RequireMetadata},
    resources::{
        annotations::owner_reference,
        crd::v1alpha1::{interface::Interface, network::Network, workloadcluster::WorkloadCluster},
    },
    DEFAULT_POD_NETWORK,
};

use self::{
    attachment::{resolve_link, SynthesizedAttachment, SynthesizedAttachmentBuilder},
    capabilities::validate_cni_type,
    claims::{aggregate_claims, SynthesisMode},
    correlation::resolve_owner,
    error::SynthesisError,
    routes::resolve_routes,
};

pub mod attachment;
pub mod capabilities;
pub mod claims;
pub mod correlation;
pub mod error;
pub mod objects;
pub mod routes;

pub use objects::ObjectSet;

/// State accumulated from the watched objects of a single function run.
#[derive(Debug, Default)]
pub struct SynthesisContext {
    workload_cluster: Option<WorkloadCluster>,
    networks: Vec<Network>,
}

impl SynthesisContext {
    pub fn on_workload_cluster(&mut self, cluster: WorkloadCluster) -> Result<(), SynthesisError> {
        if self.workload_cluster.is_some() {
            return Err(SynthesisError::validation(
                "multiple WorkloadCluster objects found in the package",
            ));
        }

        cluster.spec.validate().map_err(|reason| {
            SynthesisError::validation(format!("WorkloadCluster is invalid: {reason}"))
        })?;

        self.workload_cluster = Some(cluster);

        Ok(())
    }

    pub fn on_network(&mut self, network: Network) {
        self.networks.push(network);
    }

    /// Generates the attachment for the single interface of `objects`.
    ///
    /// Returns `Ok(None)` for interfaces attached to the default pod network.
    pub fn synthesize(
        &self,
        objects: &ObjectSet,
    ) -> Result<Option<SynthesizedAttachment>, SynthesisError> {
        let cluster = self
            .workload_cluster
            .as_ref()
            .ok_or_else(|| SynthesisError::validation("workload cluster is missing from the package"))?;
        let interface = single_interface(&objects.interfaces)?;

        info!(
            "Synthesizing attachment: interfaces: {}, ipClaims: {}, vlanClaims: {}, networks: {}",
            objects.interfaces.len(),
            objects.ip_claims.len(),
            objects.vlan_claims.len(),
            self.networks.len()
        );

        let owner = resolve_owner(interface)?;

        if interface.network_instance_name() == DEFAULT_POD_NETWORK {
            debug!("Interface is attached to the default pod network, nothing to generate");
            return Ok(None);
        }

        let interface_name = interface.require_name_or_else(|| {
            SynthesisError::validation(format!("{} is missing a name", pretty_type_name::<Interface>()))
        })?;
        let claims = aggregate_claims(&objects.ip_claims, &objects.vlan_claims)?;
        let mut builder = SynthesizedAttachmentBuilder::default();

        builder
            .name(format!("{}-{}", owner.name, interface_name))
            .namespace(owner.namespace)
            .owner(owner_reference::<Interface>(interface_name));

        if claims.mode == SynthesisMode::VlanOnly {
            return Ok(Some(builder.build()?));
        }

        let cni_type = interface.spec.cni_type.as_str();

        validate_cni_type(&cluster.spec, cni_type)?;

        let link = resolve_link(
            cni_type,
            claims.vlan_id,
            cluster.spec.master_interface.as_deref(),
        )?;
        let routes = resolve_routes(&objects.ip_claims, &self.networks)?;

        debug!("Resolved link: {link:?}, routes: {}", routes.len());

        Ok(Some(
            builder
                .cni_type(cni_type)
                .link(link)
                .addresses(claims.addresses)
                .routes(routes)
                .build()?,
        ))
    }
}

fn single_interface(interfaces: &[Interface]) -> Result<&Interface, SynthesisError> {
    match interfaces {
        [] => Err(SynthesisError::validation(format!(
            "expected an {} object to generate the attachment",
            pretty_type_name::<Interface>()
        ))),
        [interface] => Ok(interface),
        _ => Err(SynthesisError::validation(format!(
            "expected a single {} per synthesis, got {}",
            pretty_type_name::<Interface>(),
            interfaces.len()
        ))),
    }
}


#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use kube::core::ObjectMeta;

    use crate::{
        helpers::FromStatus,
        resources::crd::v1alpha1::{
            interface::{Interface, InterfaceSpec},
            ipclaim::{IPClaim, IPClaimSpec, IPClaimStatus},
            network::{Network, NetworkSpec, Prefix, RoutingTable},
            vlanclaim::{VLANClaim, VLANClaimStatus},
            workloadcluster::{WorkloadCluster, WorkloadClusterSpec},
            NetworkInstanceRef,
        },
        SPECIALIZER_FOR_ANNOTATION, SPECIALIZER_NAMESPACE_ANNOTATION,
    };

    use super::{
        attachment::{AttachmentLink, ResolvedAddress, ResolvedRoute},
        error::SynthesisError,
        ObjectSet, SynthesisContext,
    };

    fn workload_cluster(cnis: &[&str], master_interface: Option<&str>) -> WorkloadCluster {
        WorkloadCluster {
            spec: WorkloadClusterSpec {
                cluster_name: Some("edge01".to_owned()),
                cnis: Some(cnis.iter().map(|c| c.to_string()).collect()),
                master_interface: master_interface.map(str::to_owned),
            },
            ..Default::default()
        }
    }

    fn context() -> SynthesisContext {
        let mut context = SynthesisContext::default();

        context
            .on_workload_cluster(workload_cluster(&["macvlan", "bridge"], Some("eth1")))
            .unwrap();
        context.on_network(Network {
            spec: NetworkSpec {
                routing_tables: vec![RoutingTable {
                    name: "net-a".to_owned(),
                    prefixes: vec![Prefix {
                        prefix: "10.1.0.0/16".to_owned(),
                        labels: None,
                    }],
                }],
            },
            ..Default::default()
        });

        context
    }

    fn interface(cni_type: &str, network_instance: &str) -> Interface {
        Interface {
            metadata: ObjectMeta {
                name: Some("n3".to_owned()),
                annotations: Some(BTreeMap::from([
                    (
                        SPECIALIZER_FOR_ANNOTATION.to_owned(),
                        "workload.nephio.org/v1alpha1.UPFDeployment.upf-regional".to_owned(),
                    ),
                    (SPECIALIZER_NAMESPACE_ANNOTATION.to_owned(), "upf".to_owned()),
                ])),
                ..Default::default()
            },
            spec: InterfaceSpec {
                network_instance: NetworkInstanceRef {
                    name: network_instance.to_owned(),
                },
                cni_type: cni_type.to_owned(),
                attachment_type: None,
            },
        }
    }

    fn ip_claim(prefix: &str, gateway: &str) -> IPClaim {
        IPClaim {
            metadata: ObjectMeta::default(),
            spec: IPClaimSpec {
                network_instance: NetworkInstanceRef {
                    name: "net-a".to_owned(),
                },
                ..Default::default()
            },
            status: Some(IPClaimStatus {
                prefix: Some(prefix.to_owned()),
                gateway: Some(gateway.to_owned()),
            }),
        }
    }

    fn vlan_claim(vlan_id: u16) -> VLANClaim {
        VLANClaim::from_status(VLANClaimStatus {
            vlan_id: Some(vlan_id),
        })
    }

    fn objects(
        interface: Interface,
        ip_claims: Vec<IPClaim>,
        vlan_claims: Vec<VLANClaim>,
    ) -> ObjectSet {
        ObjectSet {
            interfaces: vec![interface],
            ip_claims,
            vlan_claims,
        }
    }

    #[test]
    fn macvlan_attachment_with_routes() {
        let attachment = context()
            .synthesize(&objects(
                interface("macvlan", "net-a"),
                vec![ip_claim("10.0.0.5/24", "10.0.0.1")],
                vec![],
            ))
            .unwrap()
            .unwrap();

        assert_eq!(attachment.name, "upf-regional-n3");
        assert_eq!(attachment.namespace, "upf");
        assert_eq!(
            attachment.owner.as_deref(),
            Some("req.nephio.org/v1alpha1.Interface.n3")
        );
        assert_eq!(attachment.cni_type.as_deref(), Some("macvlan"));
        assert_eq!(attachment.link, Some(AttachmentLink::Master("eth1".to_owned())));
        assert_eq!(
            attachment.addresses,
            vec![ResolvedAddress {
                address: "10.0.0.5/24".to_owned(),
                gateway: "10.0.0.1".to_owned(),
            }]
        );
        assert_eq!(
            attachment.routes,
            vec![ResolvedRoute {
                destination: "10.1.0.0/16".to_owned(),
                gateway: "10.0.0.1".to_owned(),
            }]
        );
    }

    #[test]
    fn bridge_attachment_uses_vlan_bridge() {
        let attachment = context()
            .synthesize(&objects(
                interface("bridge", "net-a"),
                vec![ip_claim("10.0.0.5/24", "10.0.0.1")],
                vec![vlan_claim(20)],
            ))
            .unwrap()
            .unwrap();

        assert_eq!(attachment.link, Some(AttachmentLink::Bridge("br20".to_owned())));
    }

    #[test]
    fn vlan_claim_selects_master_sub_interface() {
        let attachment = context()
            .synthesize(&objects(
                interface("macvlan", "net-a"),
                vec![ip_claim("10.0.0.5/24", "10.0.0.1")],
                vec![vlan_claim(30)],
            ))
            .unwrap()
            .unwrap();

        assert_eq!(attachment.link, Some(AttachmentLink::Master("eth1.30".to_owned())));
    }

    #[test]
    fn vlan_only_attachment_carries_metadata_only() {
        let attachment = context()
            .synthesize(&objects(interface("sriov", "net-a"), vec![], vec![vlan_claim(30)]))
            .unwrap()
            .unwrap();

        assert!(attachment.is_vlan_only());
        assert_eq!(attachment.name, "upf-regional-n3");
        assert_eq!(attachment.link, None);
        assert!(attachment.addresses.is_empty());
        assert!(attachment.routes.is_empty());
    }

    #[test]
    fn default_network_generates_nothing() {
        let result = context()
            .synthesize(&objects(interface("macvlan", "default"), vec![], vec![]))
            .unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn missing_claims_are_reported() {
        assert!(matches!(
            context().synthesize(&objects(interface("macvlan", "net-a"), vec![], vec![])),
            Err(SynthesisError::MissingAllocation)
        ));
    }

    #[test]
    fn unsupported_cni_is_reported() {
        let result = context().synthesize(&objects(
            interface("ipvlan", "net-a"),
            vec![ip_claim("10.0.0.5/24", "10.0.0.1")],
            vec![],
        ));

        assert!(matches!(
            result,
            Err(SynthesisError::UnsupportedPlugin { requested, supported })
                if requested == "ipvlan" && supported == vec!["macvlan".to_owned(), "bridge".to_owned()]
        ));
    }

    #[test]
    fn workload_cluster_is_required() {
        let result = SynthesisContext::default().synthesize(&objects(
            interface("macvlan", "net-a"),
            vec![ip_claim("10.0.0.5/24", "10.0.0.1")],
            vec![],
        ));

        assert!(matches!(result, Err(SynthesisError::Validation(_))));
    }

    #[test]
    fn second_workload_cluster_is_rejected() {
        let mut context = context();

        assert!(matches!(
            context.on_workload_cluster(workload_cluster(&["macvlan"], Some("eth2"))),
            Err(SynthesisError::Validation(_))
        ));
    }

    #[test]
    fn invalid_workload_cluster_is_rejected() {
        let mut context = SynthesisContext::default();

        assert!(context
            .on_workload_cluster(workload_cluster(&["macvlan", ""], Some("eth1")))
            .is_err());
        assert!(context.workload_cluster.is_none());
    }

    #[test]
    fn interface_is_required() {
        assert!(matches!(
            context().synthesize(&ObjectSet::default()),
            Err(SynthesisError::Validation(_))
        ));
    }

    #[test]
    fn correlation_annotations_are_required() {
        let mut interface = interface("macvlan", "default");
        interface.metadata.annotations = None;

        assert!(matches!(
            context().synthesize(&objects(interface, vec![], vec![])),
            Err(SynthesisError::Correlation { .. })
        ));
    }

    #[test]
    fn synthesis_is_independent_of_claim_order() {
        let context = context();
        let claims = vec![
            ip_claim("10.0.0.7/24", "10.0.0.1"),
            ip_claim("10.0.0.5/24", "10.0.0.1"),
            ip_claim("10.0.0.6/24", "10.0.0.1"),
        ];
        let mut reversed = claims.clone();
        reversed.reverse();

        let forward = context
            .synthesize(&objects(interface("macvlan", "net-a"), claims, vec![]))
            .unwrap();
        let backward = context
            .synthesize(&objects(interface("macvlan", "net-a"), reversed, vec![]))
            .unwrap();

        assert_eq!(forward, backward);
    }
}
