use std::collections::BTreeMap;

use kube::Resource;

use crate::{
    SPECIALIZER_FOR_ANNOTATION, SPECIALIZER_NAMESPACE_ANNOTATION, SPECIALIZER_OWNER_ANNOTATION,
};

/// Specializer annotations recognized on the objects of a package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrelationAnnotations {
    pub for_: Option<String>,
    pub owner: Option<String>,
    pub namespace: Option<String>,
}

impl CorrelationAnnotations {
    pub fn from_annotations(annotations: Option<&BTreeMap<String, String>>) -> Self {
        let get = |key: &str| annotations.and_then(|a| a.get(key)).cloned();

        Self {
            for_: get(SPECIALIZER_FOR_ANNOTATION),
            owner: get(SPECIALIZER_OWNER_ANNOTATION),
            namespace: get(SPECIALIZER_NAMESPACE_ANNOTATION),
        }
    }

    /// Short name of the root resource of the specialization, `for` takes
    /// precedence over `owner`.
    pub fn owner_name(&self) -> &str {
        self.for_
            .as_deref()
            .or(self.owner.as_deref())
            .map(strip_domain)
            .unwrap_or_default()
    }

    pub fn owner_namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or_default()
    }
}

/// Full owner name of the `K` object named `name`, the inverse of [`strip_domain`].
pub fn owner_reference<K: Resource<DynamicType = ()>>(name: &str) -> String {
    format!("{}.{}.{}", K::api_version(&()), K::kind(&()), name)
}

/// `workload.nephio.org/v1alpha1.UPFDeployment.upf-1` -> `upf-1`
pub fn strip_domain(full_name: &str) -> &str {
    full_name.rsplit('.').next().unwrap_or(full_name)
}
