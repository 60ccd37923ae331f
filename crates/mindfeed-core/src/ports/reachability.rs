//! Source reachability port.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Checks that a URL answers successfully.
///
/// Fail-closed: every fault, including cancellation, is reported as `false`
/// and never as an error. A single attempt is authoritative.
#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    async fn is_reachable(&self, url: &str, cancel: &CancellationToken) -> bool;
}
