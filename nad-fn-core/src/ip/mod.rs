use ipnet::IpNet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IpParseError {
    #[error("Couldn't parse '{}' as a CIDR prefix!", .0)]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AddressFamily {
    Ipv4,
    Ipv6,
}

/// Parses a CIDR prefix (`10.0.0.5/24`), bare addresses and surrounding
/// whitespace are rejected.
pub fn parse_network_address(value: &str) -> Result<IpNet, IpParseError> {
    value
        .parse::<IpNet>()
        .map_err(|_| IpParseError::Invalid(value.to_owned()))
}

pub fn address_family(value: &str) -> Result<AddressFamily, IpParseError> {
    match parse_network_address(value)? {
        IpNet::V4(_) => Ok(AddressFamily::Ipv4),
        IpNet::V6(_) => Ok(AddressFamily::Ipv6),
    }
}
