use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::fs;

use crate::probe::{DEFAULT_TCP_FALLBACK_PORT, DEFAULT_TIMEOUT};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProbeConfig {
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_tcp_fallback_port")]
    pub tcp_fallback_port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT.as_millis() as u64
}

fn default_tcp_fallback_port() -> u16 {
    DEFAULT_TCP_FALLBACK_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            tcp_fallback_port: default_tcp_fallback_port(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl ProbeConfig {
    /// Defaults, then the file named by `path` or `PROBE_CONFIG`, then
    /// `PROBE_TIMEOUT_MS` / `PROBE_LOG_LEVEL`. Not validated: the caller
    /// applies its own overrides first, then calls [`ProbeConfig::validate`].
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var("PROBE_CONFIG").ok();
        let path = path.or(env_path.as_deref().map(Path::new));

        let mut config = match path {
            Some(p) => Self::load_file_config(p).await?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Highest-precedence layer, e.g. CLI flags.
    pub fn apply_overrides(&mut self, timeout_ms: Option<u64>, log_level: Option<String>) {
        if let Some(ms) = timeout_ms {
            self.timeout_ms = ms;
        }
        if let Some(level) = log_level {
            self.log_level = level;
        }
    }

    async fn load_file_config(file_path: &Path) -> Result<Self> {
        if !file_path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", file_path.display()));
        }

        let content = fs::read_to_string(file_path).await?;
        let config: ProbeConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(ms) = var("PROBE_TIMEOUT_MS") {
            self.timeout_ms = ms
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid PROBE_TIMEOUT_MS {:?}: {}", ms, e))?;
        }
        if let Some(level) = var("PROBE_LOG_LEVEL") {
            self.log_level = level;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_ms == 0 {
            return Err(anyhow::anyhow!("timeoutMs must be greater than zero"));
        }
        self.validate_log_level()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get the log level as a tracing::Level
    pub fn get_tracing_level(&self) -> Result<tracing::Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(tracing::Level::TRACE),
            "debug" => Ok(tracing::Level::DEBUG),
            "info" => Ok(tracing::Level::INFO),
            "warn" | "warning" => Ok(tracing::Level::WARN),
            "error" => Ok(tracing::Level::ERROR),
            _ => Err(anyhow::anyhow!("Invalid log level: {}. Valid levels are: trace, debug, info, warn, error", self.log_level))
        }
    }

    /// Validate the log level is one of the supported values
    pub fn validate_log_level(&self) -> Result<()> {
        self.get_tracing_level().map(|_| ())
    }
}
