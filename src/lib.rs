//! Resolve a hostname and check, within a bounded time, whether the address
//! answers. See [`HostProbe`].

pub mod config;
pub mod error;
pub mod probe;
pub mod prober;
pub mod resolve;
pub mod result;
pub mod task;
pub mod timestamp;

pub use config::{LogFormat, ProbeConfig};
pub use error::ProbeError;
pub use probe::{probe, HostProbe, DEFAULT_TIMEOUT};
pub use result::{ProbeRequest, ProbeResult, Reachability};
pub use task::{CompletionSink, ProbeHandle};
