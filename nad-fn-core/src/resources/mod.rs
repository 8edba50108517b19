pub mod annotations;
pub mod cni;
pub mod crd;
pub mod object;
