use itertools::Itertools;
use log::{debug, warn};

use crate::resources::crd::v1alpha1::{ipclaim::IPClaim, vlanclaim::VLANClaim};

use super::{attachment::ResolvedAddress, error::SynthesisError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisMode {
    /// plugin, link, addresses and routes are rendered
    Full,
    /// only VLAN claims are present, nothing but the metadata is rendered
    VlanOnly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedClaims {
    pub mode: SynthesisMode,
    pub vlan_id: u16,
    /// deduplicated by address, sorted by address
    pub addresses: Vec<ResolvedAddress>,
}

pub fn aggregate_claims(
    ip_claims: &[IPClaim],
    vlan_claims: &[VLANClaim],
) -> Result<AggregatedClaims, SynthesisError> {
    if ip_claims.is_empty() && vlan_claims.is_empty() {
        return Err(SynthesisError::MissingAllocation);
    }

    let mode = if ip_claims.is_empty() {
        SynthesisMode::VlanOnly
    } else {
        SynthesisMode::Full
    };
    let vlan_id = resolve_vlan_id(vlan_claims);
    let addresses = match mode {
        SynthesisMode::VlanOnly => Vec::new(),
        SynthesisMode::Full => collect_addresses(ip_claims),
    };

    debug!(
        "Claims aggregated: mode: {mode:?}, vlan id: {vlan_id}, addresses: {}",
        addresses.len()
    );

    Ok(AggregatedClaims {
        mode,
        vlan_id,
        addresses,
    })
}

/// The last non-zero VLAN id wins.
// TODO: reject packages carrying conflicting VLAN ids once it's confirmed that
// a single interface never owns more than one VLANClaim
pub fn resolve_vlan_id(vlan_claims: &[VLANClaim]) -> u16 {
    let resolved = vlan_claims
        .iter()
        .map(VLANClaim::vlan_id)
        .filter(|id| *id != 0)
        .collect::<Vec<_>>();

    if resolved.iter().unique().count() > 1 {
        warn!("Multiple VLAN ids claimed for a single interface ({resolved:?}), using the last one!");
    }

    resolved.last().copied().unwrap_or_default()
}

fn collect_addresses(ip_claims: &[IPClaim]) -> Vec<ResolvedAddress> {
    ip_claims
        .iter()
        .map(IPClaim::resolved)
        .unique_by(|(address, _)| *address)
        .map(|(address, gateway)| ResolvedAddress {
            address: address.to_owned(),
            gateway: gateway.to_owned(),
        })
        .sorted_by(|a, b| a.address.cmp(&b.address))
        .collect()
}
