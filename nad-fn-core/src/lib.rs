pub mod function;
pub mod helpers;
pub mod ip;
pub mod resources;
pub mod synthesis;

/// name of the pod network that is handled by the cluster's primary CNI
pub const DEFAULT_POD_NETWORK: &str = "default";

pub const SPECIALIZER_FOR_ANNOTATION: &str = "specializer.nephio.org/for";
pub const SPECIALIZER_OWNER_ANNOTATION: &str = "specializer.nephio.org/owner";
pub const SPECIALIZER_NAMESPACE_ANNOTATION: &str = "specializer.nephio.org/namespace";
