//! SOCKS5 Protocol Types

use std::fmt;
use std::net::Ipv4Addr;

/// Target address types accepted in a CONNECT request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetAddr {
    Ipv4(Ipv4Addr),
    Domain(String),
}

impl fmt::Display for TargetAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetAddr::Ipv4(ip) => write!(f, "{}", ip),
            TargetAddr::Domain(domain) => f.write_str(domain),
        }
    }
}

/// SOCKS5 greeting from the client
#[derive(Debug, Clone)]
pub struct HandshakeRequest {
    pub version: u8,
    pub methods: Vec<u8>,
}

impl HandshakeRequest {
    pub fn method_count(&self) -> usize {
        self.methods.len()
    }
}

/// SOCKS5 CONNECT request from the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectRequest {
    pub version: u8,
    pub command: u8,
    pub address_type: u8,
    pub address: TargetAddr,
    pub port: u16,
}

impl ConnectRequest {
    /// `"<address>:<port>"`, the string handed to the dialer.
    pub fn destination(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::constants::*;

    #[test]
    fn test_ipv4_destination() {
        let request = ConnectRequest {
            version: SOCKS5_VERSION,
            command: SOCKS5_CMD_CONNECT,
            address_type: SOCKS5_ADDR_IPV4,
            address: TargetAddr::Ipv4(Ipv4Addr::new(127, 0, 0, 1)),
            port: 80,
        };
        assert_eq!(request.destination(), "127.0.0.1:80");
    }

    #[test]
    fn test_domain_destination() {
        let request = ConnectRequest {
            version: SOCKS5_VERSION,
            command: SOCKS5_CMD_CONNECT,
            address_type: SOCKS5_ADDR_DOMAIN,
            address: TargetAddr::Domain("example.com".to_string()),
            port: 443,
        };
        assert_eq!(request.destination(), "example.com:443");
    }
}
