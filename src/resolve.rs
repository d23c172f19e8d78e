use std::io;
use std::net::IpAddr;

use crate::error::ProbeError;

/// Resolve `host` with the platform resolver (getaddrinfo, so /etc/hosts and
/// nsswitch apply). Textual addresses are returned as-is.
pub async fn resolve_host_to_ip(host: &str) -> Result<IpAddr, ProbeError> {
    // First try to parse as IP address
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(ip);
    }

    let mut addrs = tokio::net::lookup_host((host, 0))
        .await
        .map_err(|e| ProbeError::resolution(host, e))?;

    addrs.next().map(|addr| addr.ip()).ok_or_else(|| {
        ProbeError::resolution(
            host,
            io::Error::new(io::ErrorKind::NotFound, "no addresses found"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[tokio::test]
    async fn literal_address_skips_lookup() {
        let ip = resolve_host_to_ip("10.255.255.1").await.unwrap();
        assert_eq!(ip, IpAddr::V4(Ipv4Addr::new(10, 255, 255, 1)));

        let ip = resolve_host_to_ip("::1").await.unwrap();
        assert!(ip.is_loopback());
    }

    #[tokio::test]
    async fn localhost_is_loopback() {
        let ip = resolve_host_to_ip("localhost").await.unwrap();
        assert!(ip.is_loopback(), "got {ip}");
    }

    #[tokio::test]
    async fn invalid_tld_fails() {
        let err = resolve_host_to_ip("this-host-does-not-exist.invalid").await.unwrap_err();
        assert!(err.is_resolution());
        assert!(err.to_string().starts_with("Unknown host: this-host-does-not-exist.invalid"));
    }

    #[tokio::test]
    async fn empty_host_fails() {
        let err = resolve_host_to_ip("").await.unwrap_err();
        assert!(err.is_resolution());
    }
}
