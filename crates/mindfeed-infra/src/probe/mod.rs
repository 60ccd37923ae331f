//! Source reachability probes.

use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use mindfeed_core::ports::ReachabilityProbe;

#[cfg(feature = "http-probe")]
mod http;

#[cfg(feature = "http-probe")]
pub use http::HttpReachabilityProbe;

/// Timeouts and redirect policy for a probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub max_redirects: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(5),
            max_redirects: 10,
        }
    }
}

impl ProbeConfig {
    /// Load overrides from `PROBE_CONNECT_TIMEOUT_SECS`, `PROBE_READ_TIMEOUT_SECS`
    /// and `PROBE_MAX_REDIRECTS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            connect_timeout: std::env::var("PROBE_CONNECT_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.connect_timeout),
            read_timeout: std::env::var("PROBE_READ_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.read_timeout),
            max_redirects: std::env::var("PROBE_MAX_REDIRECTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_redirects),
        }
    }
}

/// Probe used when no network client is compiled in: every source is
/// unreachable, so scientific posts are refused rather than accepted unchecked.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnreachableProbe;

#[async_trait]
impl ReachabilityProbe for UnreachableProbe {
    async fn is_reachable(&self, url: &str, _cancel: &CancellationToken) -> bool {
        tracing::warn!(url = %url, "No HTTP probe available, treating source as unreachable");
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeouts_are_five_seconds() {
        let config = ProbeConfig::default();
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.read_timeout, Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_unreachable_probe_fails_closed() {
        let probe = UnreachableProbe;
        assert!(!probe.is_reachable("https://example.org", &CancellationToken::new()).await);
    }
}
