use crate::resources::{annotations::CorrelationAnnotations, crd::v1alpha1::interface::Interface};

use super::error::SynthesisError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub name: String,
    pub namespace: String,
}

/// Resolves the root resource the attachment is generated for from the
/// specializer annotations of the interface.
pub fn resolve_owner(interface: &Interface) -> Result<Owner, SynthesisError> {
    let annotations =
        CorrelationAnnotations::from_annotations(interface.metadata.annotations.as_ref());
    let name = annotations.owner_name();
    let namespace = annotations.owner_namespace();

    if name.is_empty() || namespace.is_empty() {
        return Err(SynthesisError::Correlation {
            name: name.to_owned(),
            namespace: namespace.to_owned(),
        });
    }

    Ok(Owner {
        name: name.to_owned(),
        namespace: namespace.to_owned(),
    })
}
