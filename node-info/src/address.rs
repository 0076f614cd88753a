//! Host addresses without name resolution.
//!
//! A [`HostAddress`] pairs an IP address with the host name it was created
//! for. Nothing here touches DNS or the network.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use serde::{Deserialize, Serialize};

use crate::errors::{AddressError, NodeError};

pub const LOCALHOST: &str = "localhost";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostAddress {
    pub hostname: String,
    pub ip: IpAddr,
}

impl HostAddress {
    pub fn new(hostname: impl Into<String>, ip: IpAddr) -> Self {
        Self {
            hostname: hostname.into(),
            ip,
        }
    }

    /// Build an address from raw network-order octets. Four bytes make an
    /// IPv4 address, sixteen make an IPv6 address.
    pub fn from_octets(hostname: impl Into<String>, octets: &[u8]) -> Result<Self, AddressError> {
        let ip = match octets.len() {
            4 => {
                let mut bytes = [0u8; 4];
                bytes.copy_from_slice(octets);
                IpAddr::V4(Ipv4Addr::from(bytes))
            }
            16 => {
                let mut bytes = [0u8; 16];
                bytes.copy_from_slice(octets);
                IpAddr::V6(Ipv6Addr::from(bytes))
            }
            len => return Err(AddressError::InvalidLength(len)),
        };
        Ok(Self::new(hostname, ip))
    }

    pub fn is_loopback(&self) -> bool {
        self.ip.is_loopback()
    }
}

impl fmt::Display for HostAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.hostname, self.ip)
    }
}

impl From<HostAddress> for IpAddr {
    fn from(address: HostAddress) -> Self {
        address.ip
    }
}

/// The IPv4 loopback address `127.0.0.1`, labeled `localhost`.
///
/// Fails only if four fixed octets cannot form an address, which means the
/// runtime is broken.
pub fn v4_localhost() -> Result<HostAddress, NodeError> {
    HostAddress::from_octets(LOCALHOST, &[127, 0, 0, 1])
        .map_err(|_| NodeError::Unreachable("could not create localhost address".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v4_localhost() {
        let address = v4_localhost().unwrap();
        assert_eq!(address.hostname, "localhost");
        assert_eq!(address.ip, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert!(address.is_loopback());
        assert_eq!(address.to_string(), "localhost/127.0.0.1");
    }

    #[test]
    fn test_from_octets_v6() {
        let mut octets = [0u8; 16];
        octets[15] = 1;
        let address = HostAddress::from_octets("localhost", &octets).unwrap();
        assert_eq!(address.ip, IpAddr::V6(Ipv6Addr::LOCALHOST));
    }

    #[test]
    fn test_from_octets_rejects_bad_length() {
        assert_eq!(
            HostAddress::from_octets("bad", &[127, 0, 1]),
            Err(AddressError::InvalidLength(3))
        );
    }
}
