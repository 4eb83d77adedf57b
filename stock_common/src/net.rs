//! Shared networking constants and helpers used by client and server.
use crate::Result;
use std::net::{IpAddr, SocketAddr};

/// TCP port the gRPC service listens on.
pub const SERVICE_PORT: u16 = 50051;
/// Default bind host for the server.
pub const BIND_HOST: &str = "0.0.0.0";

/// Helper to format an address with a port like "ip:port".
pub fn addr(ip: &str, port: u16) -> String {
    format!("{}:{}", ip, port)
}

/// Parse `ip` and `port` into a socket address. IPv6 hosts are given bare (`::1`).
pub fn socket_addr(ip: &str, port: u16) -> Result<SocketAddr> {
    let ip: IpAddr = ip.trim().parse()?;
    Ok(SocketAddr::new(ip, port))
}

/// Default endpoint a client dials when none is given.
pub fn default_endpoint() -> String {
    format!("http://127.0.0.1:{}", SERVICE_PORT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StockError;

    #[test]
    fn parses_bind_address() {
        let parsed = socket_addr(BIND_HOST, SERVICE_PORT).unwrap();
        assert_eq!(parsed.port(), 50051);
        assert!(parsed.ip().is_unspecified());
    }

    #[test]
    fn accepts_bare_ipv6() {
        let parsed = socket_addr("::1", 7000).unwrap();
        assert!(parsed.is_ipv6());
        assert_eq!(parsed.port(), 7000);
    }

    #[test]
    fn rejects_hostnames_and_garbage() {
        assert!(matches!(
            socket_addr("not an ip", 1),
            Err(StockError::AddrParse(_))
        ));
    }
}
