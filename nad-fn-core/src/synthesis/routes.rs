use itertools::Itertools;
use log::debug;

use crate::{
    ip::address_family,
    resources::crd::v1alpha1::{ipclaim::IPClaim, network::Network},
};

use super::{attachment::ResolvedRoute, error::SynthesisError};

/// Routes every prefix of the routing tables matching a claim's network
/// instance through that claim's gateway, as long as the prefix and the
/// claimed address belong to the same address family.
///
/// Claims without an address or a gateway don't produce routes. The result is
/// deduplicated by destination (first claim wins) and sorted by destination.
pub fn resolve_routes(
    ip_claims: &[IPClaim],
    networks: &[Network],
) -> Result<Vec<ResolvedRoute>, SynthesisError> {
    let mut routes = Vec::new();

    for claim in ip_claims {
        let (address, gateway) = claim.resolved();

        if address.is_empty() || gateway.is_empty() {
            continue;
        }

        let tables = networks
            .iter()
            .flat_map(|network| network.routing_tables_named(claim.network_instance_name()));

        for prefix in tables.flat_map(|table| table.prefixes.iter()) {
            if address_family(&prefix.prefix)? != address_family(address)? {
                debug!("Skipping '{}', address family differs from '{address}'", prefix.prefix);
                continue;
            }

            routes.push(ResolvedRoute {
                destination: prefix.prefix.to_owned(),
                gateway: gateway.to_owned(),
            });
        }
    }

    Ok(routes
        .into_iter()
        .unique_by(|route| route.destination.to_owned())
        .sorted_by(|a, b| a.destination.cmp(&b.destination))
        .collect())
}
