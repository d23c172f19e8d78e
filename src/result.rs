use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::time::Duration;

use crate::error::ProbeError;

/// A single probe invocation. Consumed by `HostProbe::spawn`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeRequest {
    pub host: String,
}

impl ProbeRequest {
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }
}

/// Outcome of a reachability check against an already resolved address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reachability {
    pub ip: IpAddr,
    pub reachable: bool,
    pub elapsed: Duration,
}

/// Terminal record of one probe.
///
/// Either `error` is set, or all of `ip`, `reachable` and `time_millis` are.
/// Build it through [`ProbeResult::checked`], [`ProbeResult::failed`],
/// [`ProbeResult::from_outcome`] or the `From<(host, outcome)>` impl so that
/// holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeResult {
    pub host: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reachable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_millis: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProbeResult {
    pub fn checked(host: impl Into<String>, check: Reachability) -> Self {
        Self {
            host: host.into(),
            ip: Some(check.ip.to_string()),
            success: check.reachable,
            reachable: Some(check.reachable),
            time_millis: Some(check.elapsed.as_millis() as u64),
            error: None,
        }
    }

    pub fn failed(host: impl Into<String>, err: &ProbeError) -> Self {
        Self {
            host: host.into(),
            ip: None,
            success: false,
            reachable: None,
            time_millis: None,
            error: Some(err.to_string()),
        }
    }

    pub fn from_outcome(host: impl Into<String>, outcome: Result<Reachability, ProbeError>) -> Self {
        match outcome {
            Ok(check) => Self::checked(host, check),
            Err(err) => Self::failed(host, &err),
        }
    }

    /// True when the record is one of the two well-formed shapes.
    pub fn is_consistent(&self) -> bool {
        let checked = self.ip.is_some() && self.reachable.is_some() && self.time_millis.is_some();
        let bare = self.ip.is_none() && self.reachable.is_none() && self.time_millis.is_none();
        match &self.error {
            Some(_) => bare && !self.success,
            None => checked && self.success == self.reachable.unwrap_or(false),
        }
    }
}

impl<H: Into<String>> From<(H, Result<Reachability, ProbeError>)> for ProbeResult {
    fn from((host, outcome): (H, Result<Reachability, ProbeError>)) -> Self {
        Self::from_outcome(host, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io;
    use std::net::Ipv4Addr;

    fn check(reachable: bool, ms: u64) -> Reachability {
        Reachability {
            ip: IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)),
            reachable,
            elapsed: Duration::from_millis(ms),
        }
    }

    #[test]
    fn reachable_record_serializes_camel_case() {
        let r = ProbeResult::checked("gw", check(true, 12));
        assert!(r.is_consistent());
        assert_eq!(
            serde_json::to_value(&r).unwrap(),
            json!({"host": "gw", "ip": "10.0.0.1", "success": true, "reachable": true, "timeMillis": 12})
        );
    }

    #[test]
    fn unreachable_is_not_success() {
        let r = ProbeResult::checked("gw", check(false, 5000));
        assert!(r.is_consistent());
        assert!(!r.success);
        assert_eq!(r.reachable, Some(false));
        assert_eq!(r.time_millis, Some(5000));
    }

    #[test]
    fn failure_omits_check_fields() {
        let err = ProbeError::resolution("x.invalid", io::Error::new(io::ErrorKind::NotFound, "gone"));
        let r = ProbeResult::from_outcome("x.invalid", Err(err));
        assert!(r.is_consistent());
        assert_eq!(
            serde_json::to_value(&r).unwrap(),
            json!({"host": "x.invalid", "success": false, "error": "Unknown host: x.invalid: gone"})
        );
    }

    #[test]
    fn transport_failure_omits_check_fields() {
        let err = ProbeError::Transport(io::Error::other("Network is unreachable"));
        let r = ProbeResult::from_outcome("255.255.255.255", Err(err));
        assert!(r.is_consistent());
        assert_eq!(
            serde_json::to_value(&r).unwrap(),
            json!({"host": "255.255.255.255", "success": false, "error": "IO Error: Network is unreachable"})
        );
    }

    #[test]
    fn from_tuple_matches_from_outcome() {
        let r: ProbeResult = ("gw", Ok::<_, ProbeError>(check(true, 7))).into();
        assert_eq!(r, ProbeResult::checked("gw", check(true, 7)));

        let err = ProbeError::Transport(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        let r = ProbeResult::from((String::from("gw"), Err(err)));
        assert_eq!(r.error.as_deref(), Some("IO Error: denied"));
        assert!(r.is_consistent());
    }

    #[test]
    fn partial_record_is_inconsistent() {
        let mut r = ProbeResult::checked("gw", check(true, 1));
        r.time_millis = None;
        assert!(!r.is_consistent());

        let mut r = ProbeResult::checked("gw", check(false, 1));
        r.success = true;
        assert!(!r.is_consistent());
    }

    #[test]
    fn deserializes_sparse_failure() {
        let r: ProbeResult =
            serde_json::from_str(r#"{"host":"h","success":false,"error":"IO Error: boom"}"#).unwrap();
        assert!(r.is_consistent());
        assert_eq!(r.ip, None);
    }
}
