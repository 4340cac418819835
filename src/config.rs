//! Gate configuration.

use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors produced while parsing configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown probe failure policy '{0}' (expected 'open' or 'closed')")]
    ProbeFailurePolicy(String),
}

/// What a failed status probe means for the gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProbeFailurePolicy {
    /// Treat the server as not requiring a PIN. Keeps the app usable when the
    /// status endpoint is unreachable.
    #[default]
    FailOpen,
    /// Treat the server as requiring a PIN that has not been entered.
    FailClosed,
}

impl ProbeFailurePolicy {
    /// `(pin_enabled, authenticated)` to record after a failed probe.
    #[must_use]
    pub fn fallback(self) -> (bool, bool) {
        match self {
            Self::FailOpen => (false, false),
            Self::FailClosed => (true, false),
        }
    }
}

impl FromStr for ProbeFailurePolicy {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "open" | "fail-open" => Ok(Self::FailOpen),
            "closed" | "fail-closed" => Ok(Self::FailClosed),
            other => Err(ConfigError::ProbeFailurePolicy(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// Prefix joined in front of every API path.
    pub api_base: String,
    /// Per-request timeout applied by the transports.
    pub request_timeout: Duration,
    pub probe_failure: ProbeFailurePolicy,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            probe_failure: ProbeFailurePolicy::default(),
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
