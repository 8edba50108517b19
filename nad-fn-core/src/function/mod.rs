use kube::Resource;
use log::{debug, info};
use serde_yaml::Value;
use thiserror::Error;

use crate::{
    resources::{
        annotations::owner_reference,
        crd::v1alpha1::interface::Interface,
        object::{value_annotation, value_name, KrmObject, ObjectDecodeError, ObjectKind},
    },
    synthesis::{error::SynthesisError, ObjectSet, SynthesisContext},
    SPECIALIZER_OWNER_ANNOTATION,
};

use self::resource_list::{same_identity, ResourceList};

pub mod resource_list;

#[derive(Debug, Error)]
pub enum FunctionError {
    #[error("{}", .0)]
    Decode(ObjectDecodeError),
    #[error("{}", .0)]
    Synthesis(SynthesisError),
    #[error("Couldn't serialize the generated resource! Reason: {}", .0)]
    Serialization(serde_yaml::Error),
}

impl From<ObjectDecodeError> for FunctionError {
    fn from(value: ObjectDecodeError) -> Self {
        FunctionError::Decode(value)
    }
}

impl From<SynthesisError> for FunctionError {
    fn from(value: SynthesisError) -> Self {
        FunctionError::Synthesis(value)
    }
}

/// Generates a NetworkAttachmentDefinition for every interface of the
/// package and upserts them into `resource_list`. Attachments generated by
/// earlier runs that no interface produces anymore are removed.
///
/// Nothing is written to the list unless every interface was processed
/// successfully. Returns the number of generated resources.
pub fn run(resource_list: &mut ResourceList) -> Result<usize, FunctionError> {
    let mut context = SynthesisContext::default();
    let mut objects = ObjectSet::default();

    for item in &resource_list.items {
        if let Some(object) = KrmObject::from_value(item)? {
            dispatch(&mut context, &mut objects, object)?;
        }
    }

    let mut generated = Vec::new();

    for set in objects.partition()? {
        if let Some(attachment) = context.synthesize(&set)? {
            if attachment.is_vlan_only() {
                debug!("'{}' is VLAN-only, rendering an empty plugin list", attachment.name);
            }

            let nad = attachment.generate_network_attachment_definition()?;

            debug!("{nad:#?}");

            generated.push(serde_yaml::to_value(&nad).map_err(FunctionError::Serialization)?);
        }
    }

    let count = generated.len();

    resource_list.items.retain(|item| {
        let stale = is_generated_attachment(item)
            && !generated.iter().any(|fresh| same_identity(fresh, item));

        if stale {
            info!("Removing stale NetworkAttachmentDefinition '{}'", value_name(item));
        }

        !stale
    });

    for item in generated {
        resource_list.upsert(item);
    }

    info!("Generated {count} NetworkAttachmentDefinition(s)");

    Ok(count)
}

fn dispatch(
    context: &mut SynthesisContext,
    objects: &mut ObjectSet,
    object: KrmObject,
) -> Result<(), SynthesisError> {
    debug!("Ingesting {} '{}'", object.kind(), object_name(&object));

    match object {
        KrmObject::WorkloadCluster(cluster) => context.on_workload_cluster(cluster)?,
        KrmObject::Network(network) => context.on_network(network),
        KrmObject::Interface(interface) => objects.interfaces.push(interface),
        KrmObject::IpClaim(claim) => objects.ip_claims.push(claim),
        KrmObject::VlanClaim(claim) => objects.vlan_claims.push(claim),
        // earlier output, replaced or pruned once synthesis succeeds
        KrmObject::NetworkAttachmentDefinition(_) => {}
    }

    Ok(())
}

/// Attachments owned by an Interface were generated by this function.
fn is_generated_attachment(item: &Value) -> bool {
    ObjectKind::of_value(item) == Some(ObjectKind::NetworkAttachmentDefinition)
        && value_annotation(item, SPECIALIZER_OWNER_ANNOTATION)
            .starts_with(&owner_reference::<Interface>(""))
}

fn object_name(object: &KrmObject) -> &str {
    let metadata = match object {
        KrmObject::WorkloadCluster(o) => o.meta(),
        KrmObject::Network(o) => o.meta(),
        KrmObject::Interface(o) => o.meta(),
        KrmObject::IpClaim(o) => o.meta(),
        KrmObject::VlanClaim(o) => o.meta(),
        KrmObject::NetworkAttachmentDefinition(o) => o.meta(),
    };

    metadata.name.as_deref().unwrap_or_default()
}
