use kube::Resource;

use crate::{
    helpers::{pretty_type_name, RequireMetadata},
    resources::{
        annotations::strip_domain,
        crd::v1alpha1::{interface::Interface, ipclaim::IPClaim, vlanclaim::VLANClaim},
    },
    SPECIALIZER_OWNER_ANNOTATION,
};

use super::error::SynthesisError;

/// Interfaces and claims of a package.
#[derive(Debug, Clone, Default)]
pub struct ObjectSet {
    pub interfaces: Vec<Interface>,
    pub ip_claims: Vec<IPClaim>,
    pub vlan_claims: Vec<VLANClaim>,
}

impl ObjectSet {
    /// Splits the set into one set per interface.
    ///
    /// A lone interface owns every claim. With several interfaces each claim
    /// has to name its interface through the owner annotation.
    pub fn partition(self) -> Result<Vec<ObjectSet>, SynthesisError> {
        match self.interfaces.len() {
            0 => Err(SynthesisError::validation(format!(
                "expected an {} object to generate the attachment",
                pretty_type_name::<Interface>()
            ))),
            1 => Ok(vec![self]),
            _ => self.partition_by_owner(),
        }
    }

    fn partition_by_owner(self) -> Result<Vec<ObjectSet>, SynthesisError> {
        let names = self
            .interfaces
            .iter()
            .map(|interface| {
                interface
                    .require_name_or_else(|| {
                        SynthesisError::validation(format!(
                            "{} is missing a name",
                            pretty_type_name::<Interface>()
                        ))
                    })
                    .map(str::to_owned)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let mut sets = self
            .interfaces
            .into_iter()
            .map(|interface| ObjectSet {
                interfaces: vec![interface],
                ..Default::default()
            })
            .collect::<Vec<_>>();

        for claim in self.ip_claims {
            let index = owner_index(&names, &claim)?;
            sets[index].ip_claims.push(claim);
        }

        for claim in self.vlan_claims {
            let index = owner_index(&names, &claim)?;
            sets[index].vlan_claims.push(claim);
        }

        Ok(sets)
    }
}

fn owner_index<K: Resource>(names: &[String], claim: &K) -> Result<usize, SynthesisError> {
    let metadata = claim.meta();
    let owner = metadata
        .annotations
        .as_ref()
        .and_then(|annotations| annotations.get(SPECIALIZER_OWNER_ANNOTATION))
        .map(|owner| strip_domain(owner))
        .unwrap_or_default();

    names.iter().position(|name| name == owner).ok_or_else(|| {
        SynthesisError::validation(format!(
            "{} '{}' can't be correlated to any of the interfaces {names:?} (owner: '{owner}')",
            pretty_type_name::<K>(),
            metadata.name.as_deref().unwrap_or_default(),
        ))
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use kube::core::ObjectMeta;

    use crate::{
        resources::crd::v1alpha1::{interface::Interface, ipclaim::IPClaim, vlanclaim::VLANClaim},
        synthesis::error::SynthesisError,
        SPECIALIZER_OWNER_ANNOTATION,
    };

    use super::ObjectSet;

    fn metadata(name: &str, owner: Option<&str>) -> ObjectMeta {
        ObjectMeta {
            name: Some(name.to_owned()),
            annotations: owner.map(|owner| {
                BTreeMap::from([(SPECIALIZER_OWNER_ANNOTATION.to_owned(), owner.to_owned())])
            }),
            ..Default::default()
        }
    }

    fn interface(name: &str) -> Interface {
        Interface {
            metadata: metadata(name, None),
            ..Default::default()
        }
    }

    fn ip_claim(name: &str, owner: Option<&str>) -> IPClaim {
        IPClaim {
            metadata: metadata(name, owner),
            ..Default::default()
        }
    }

    fn vlan_claim(name: &str, owner: Option<&str>) -> VLANClaim {
        VLANClaim {
            metadata: metadata(name, owner),
            ..Default::default()
        }
    }

    #[test]
    fn lone_interface_owns_everything() {
        let set = ObjectSet {
            interfaces: vec![interface("n3")],
            ip_claims: vec![ip_claim("a", None), ip_claim("b", Some("x.y.other"))],
            vlan_claims: vec![vlan_claim("c", None)],
        };
        let sets = set.partition().unwrap();

        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].ip_claims.len(), 2);
        assert_eq!(sets[0].vlan_claims.len(), 1);
    }

    #[test]
    fn claims_follow_their_owner() {
        let set = ObjectSet {
            interfaces: vec![interface("n3"), interface("n6")],
            ip_claims: vec![
                ip_claim("n6-ip", Some("req.nephio.org/v1alpha1.Interface.n6")),
                ip_claim("n3-ip", Some("req.nephio.org/v1alpha1.Interface.n3")),
            ],
            vlan_claims: vec![vlan_claim("n3-vlan", Some("n3"))],
        };
        let sets = set.partition().unwrap();

        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].interfaces[0].metadata.name.as_deref(), Some("n3"));
        assert_eq!(sets[0].ip_claims[0].metadata.name.as_deref(), Some("n3-ip"));
        assert_eq!(sets[0].vlan_claims.len(), 1);
        assert_eq!(sets[1].ip_claims[0].metadata.name.as_deref(), Some("n6-ip"));
        assert!(sets[1].vlan_claims.is_empty());
    }

    #[test]
    fn orphaned_claims_are_rejected_with_several_interfaces() {
        let set = ObjectSet {
            interfaces: vec![interface("n3"), interface("n6")],
            ip_claims: vec![ip_claim("orphan", None)],
            ..Default::default()
        };

        assert!(matches!(
            set.partition(),
            Err(SynthesisError::Validation(reason)) if reason.contains("orphan")
        ));
    }

    #[test]
    fn empty_set_has_nothing_to_partition() {
        assert!(matches!(
            ObjectSet::default().partition(),
            Err(SynthesisError::Validation(_))
        ));
    }
}
