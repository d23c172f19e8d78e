use std::time::Duration;
use tracing::{info, warn};

use crate::config::ProbeConfig;
use crate::prober::{self, CheckOptions};
use crate::resolve::resolve_host_to_ip;
use crate::result::ProbeResult;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);
pub const DEFAULT_TCP_FALLBACK_PORT: u16 = 7;

/// Resolves a host and checks whether it answers. Holds no state beyond its
/// options, so one value can serve any number of concurrent probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostProbe {
    opts: CheckOptions,
}

impl Default for HostProbe {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl HostProbe {
    pub fn new(timeout: Duration) -> Self {
        Self {
            opts: CheckOptions {
                timeout,
                tcp_fallback_port: DEFAULT_TCP_FALLBACK_PORT,
            },
        }
    }

    pub fn from_config(config: &ProbeConfig) -> Self {
        Self::new(config.timeout()).with_tcp_fallback_port(config.tcp_fallback_port)
    }

    pub fn with_tcp_fallback_port(mut self, port: u16) -> Self {
        self.opts.tcp_fallback_port = port;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.opts.timeout
    }

    /// resolve → check → report. Never fails: every error is folded into the
    /// returned record.
    pub async fn probe(&self, host: &str) -> ProbeResult {
        let outcome = match resolve_host_to_ip(host).await {
            Ok(ip) => prober::check(ip, self.opts).await,
            Err(e) => Err(e),
        };

        match &outcome {
            Ok(check) => info!(
                host,
                ip = %check.ip,
                reachable = check.reachable,
                time_ms = check.elapsed.as_millis() as u64,
                "probe finished"
            ),
            Err(e) if e.is_resolution() => info!(host, error = %e, "probe finished"),
            Err(e) => warn!(host, error = %e, "probe transport failure"),
        }

        ProbeResult::from_outcome(host, outcome)
    }
}

/// One-off probe with the default fallback port.
pub async fn probe(host: &str, timeout: Duration) -> ProbeResult {
    HostProbe::new(timeout).probe(host).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn localhost_answers() {
        let r = HostProbe::default().probe("localhost").await;
        assert!(r.is_consistent(), "{r:?}");
        assert_eq!(r.host, "localhost");
        assert!(r.success, "{r:?}");
        assert_eq!(r.reachable, Some(true));
        let ip: std::net::IpAddr = r.ip.as_deref().unwrap().parse().unwrap();
        assert!(ip.is_loopback());
        assert!(r.time_millis.unwrap() < 1000);
    }

    #[tokio::test]
    async fn unknown_host_is_reported_as_data() {
        let r = probe("this-host-does-not-exist.invalid", DEFAULT_TIMEOUT).await;
        assert!(r.is_consistent(), "{r:?}");
        assert!(!r.success);
        assert!(r.error.as_deref().unwrap().starts_with("Unknown host"));
        assert_eq!(r.ip, None);
        assert_eq!(r.reachable, None);
        assert_eq!(r.time_millis, None);
    }

    #[test]
    fn config_carries_through() {
        let cfg = ProbeConfig {
            timeout_ms: 250,
            tcp_fallback_port: 9,
            ..ProbeConfig::default()
        };
        let p = HostProbe::from_config(&cfg);
        assert_eq!(p.timeout(), Duration::from_millis(250));
        assert_eq!(p.opts.tcp_fallback_port, 9);
    }
}
