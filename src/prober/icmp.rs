use std::io;
use std::net::IpAddr;
use std::time::Duration;
use surge_ping::{Client, Config, ICMP, PingIdentifier, PingSequence, SurgeError};

use crate::timestamp::monotonic_ns;

const PAYLOAD: [u8; 56] = [0; 56];

/// What a single echo request produced.
#[derive(Debug)]
pub enum Echo {
    Reply(Duration),
    NoReply,
    /// No ICMP socket could be used; the caller should fall back.
    Unavailable(io::Error),
}

fn open_client(ip: IpAddr) -> io::Result<Client> {
    let config = match ip {
        IpAddr::V4(_) => Config::default(),
        IpAddr::V6(_) => Config::builder().kind(ICMP::V6).build(),
    };
    // surge-ping tries a datagram ICMP socket first, then a raw one.
    Client::new(&config)
}

// Per-probe identifier: concurrent probes each own a socket, but raw sockets
// see every reply on the host, so keep identifiers apart.
fn identifier() -> PingIdentifier {
    let pid = std::process::id() as u16;
    let tick = (monotonic_ns() >> 10) as u16;
    PingIdentifier(pid ^ tick)
}

pub async fn probe_icmp(ip: IpAddr, timeout: Duration) -> io::Result<Echo> {
    let client = match open_client(ip) {
        Ok(client) => client,
        Err(e) => return Ok(Echo::Unavailable(e)),
    };

    let mut pinger = client.pinger(ip, identifier()).await;
    pinger.timeout(timeout);

    match pinger.ping(PingSequence(0), &PAYLOAD).await {
        Ok((_packet, rtt)) => Ok(Echo::Reply(rtt)),
        Err(SurgeError::Timeout { .. }) => Ok(Echo::NoReply),
        Err(SurgeError::IOError(e)) if e.kind() == io::ErrorKind::PermissionDenied => {
            Ok(Echo::Unavailable(e))
        }
        Err(SurgeError::IOError(e)) => Err(e),
        Err(other) => Err(io::Error::other(other.to_string())),
    }
}
