use std::io;
use std::net::{IpAddr, SocketAddr};
use tokio::net::TcpStream;
use tokio::time::{timeout, Duration};

/// Connect to `port` on `ip`. A completed handshake or a refusal both mean
/// the host answered; silence until `limit` means it did not.
pub async fn probe_tcp(ip: IpAddr, port: u16, limit: Duration) -> io::Result<bool> {
    // `timeout` polls the connect once even with nothing left
    if limit.is_zero() {
        return Ok(false);
    }
    let addr = SocketAddr::new(ip, port);
    match timeout(limit, TcpStream::connect(addr)).await {
        Ok(Ok(conn)) => {
            drop(conn);
            Ok(true)
        }
        Ok(Err(e)) if e.kind() == io::ErrorKind::ConnectionRefused => Ok(true),
        Ok(Err(e)) if e.kind() == io::ErrorKind::TimedOut => Ok(false),
        Ok(Err(e)) => Err(e),
        Err(_elapsed) => Ok(false),
    }
}
