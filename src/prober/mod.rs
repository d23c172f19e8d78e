use std::fmt;
use std::net::IpAddr;
use std::time::Duration;
use tracing::debug;

use crate::error::ProbeError;
use crate::result::Reachability;
use crate::timestamp::Stopwatch;

pub mod icmp;
pub mod tcp_connect;

use icmp::Echo;

/// How reachability was decided. Not caller-selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mechanism {
    Icmp,
    TcpConnect,
}

impl fmt::Display for Mechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mechanism::Icmp => "icmp",
            Mechanism::TcpConnect => "tcp_connect",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOptions {
    pub timeout: Duration,
    pub tcp_fallback_port: u16,
}

/// ICMP echo first, TCP connect to the fallback port if ICMP is not
/// permitted. Both share one deadline of `opts.timeout`.
pub async fn check(ip: IpAddr, opts: CheckOptions) -> Result<Reachability, ProbeError> {
    let sw = Stopwatch::start();

    let (mechanism, reachable) = match icmp::probe_icmp(ip, opts.timeout).await? {
        Echo::Reply(rtt) => {
            debug!(%ip, ?rtt, "icmp echo reply");
            (Mechanism::Icmp, true)
        }
        Echo::NoReply => (Mechanism::Icmp, false),
        Echo::Unavailable(e) => {
            debug!(%ip, error = %e, port = opts.tcp_fallback_port, "icmp unavailable, falling back to tcp connect");
            let left = sw.remaining(opts.timeout);
            let reachable = tcp_connect::probe_tcp(ip, opts.tcp_fallback_port, left).await?;
            (Mechanism::TcpConnect, reachable)
        }
    };

    let elapsed = sw.elapsed();
    debug!(%ip, %mechanism, reachable, ?elapsed, "reachability check done");

    Ok(Reachability {
        ip,
        reachable,
        elapsed,
    })
}
