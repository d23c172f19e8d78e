use std::io;
use thiserror::Error;

/// Failure modes of a single probe. The `Display` text is what ends up in
/// `ProbeResult::error`.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Unknown host: {host}: {source}")]
    Resolution {
        host: String,
        #[source]
        source: io::Error,
    },

    #[error("IO Error: {0}")]
    Transport(#[from] io::Error),
}

impl ProbeError {
    pub fn resolution(host: &str, source: io::Error) -> Self {
        ProbeError::Resolution {
            host: host.to_string(),
            source,
        }
    }

    pub fn is_resolution(&self) -> bool {
        matches!(self, ProbeError::Resolution { .. })
    }
}
