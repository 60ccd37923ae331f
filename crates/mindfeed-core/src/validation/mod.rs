//! Acceptance rules a post must pass before it is stored.
//!
//! Three independent rules are evaluated and every failure is reported:
//!
//! - **moderation**: a non-empty media reference must not look like it shows people;
//! - **temporal**: kinds that require a future date must be scheduled strictly
//!   after the policy cutoff;
//! - **source**: kinds that require a source must cite one that is present,
//!   well formed and reachable, checked in that order and stopping at the first
//!   failure.

mod moderation;
pub mod url;

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::domain::PostDraft;
use crate::ports::{HumanDetector, ReachabilityProbe};

pub use moderation::KeywordHumanDetector;

/// Cutoff used when none is configured: 2025-03-01T00:00:00Z.
pub fn default_event_cutoff() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0)
        .single()
        .expect("2025-03-01T00:00:00Z is a valid instant")
}

/// Tunable parameters of the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Events must be scheduled strictly after this instant.
    pub event_cutoff: DateTime<Utc>,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            event_cutoff: default_event_cutoff(),
        }
    }
}

/// One failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("media containing humans is not permitted")]
    HumanMedia,

    #[error("events must be scheduled after {}", .cutoff.to_rfc3339())]
    EventNotInFuture { cutoff: DateTime<Utc> },

    #[error("scientific posts must cite a source")]
    MissingSource,

    #[error("source must be a valid http(s) or ftp URL")]
    MalformedSource,

    #[error("source must be reachable")]
    UnreachableSource,
}

/// Runs the acceptance rules against a draft.
#[derive(Clone)]
pub struct PostValidator {
    detector: Arc<dyn HumanDetector>,
    probe: Arc<dyn ReachabilityProbe>,
    policy: ValidationPolicy,
}

impl PostValidator {
    pub fn new(
        detector: Arc<dyn HumanDetector>,
        probe: Arc<dyn ReachabilityProbe>,
        policy: ValidationPolicy,
    ) -> Self {
        Self {
            detector,
            probe,
            policy,
        }
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Validate without an external cancellation signal.
    pub async fn validate(&self, draft: &PostDraft) -> Vec<Violation> {
        self.validate_with_cancel(draft, &CancellationToken::new())
            .await
    }

    /// Validate, letting `cancel` abort an in-flight source probe.
    ///
    /// An empty result means the draft is accepted.
    pub async fn validate_with_cancel(
        &self,
        draft: &PostDraft,
        cancel: &CancellationToken,
    ) -> Vec<Violation> {
        let mut violations = Vec::new();
        let rules = draft.kind.rules();

        if let Some(violation) = self.check_media(draft) {
            violations.push(violation);
        }

        if rules.requires_future_date {
            if let Some(violation) = self.check_schedule(draft) {
                violations.push(violation);
            }
        }

        if rules.requires_source {
            if let Some(violation) = self.check_source(draft, cancel).await {
                violations.push(violation);
            }
        }

        violations
    }

    fn check_media(&self, draft: &PostDraft) -> Option<Violation> {
        let media = draft.media_reference.as_deref().filter(|m| !m.is_empty())?;
        self.detector
            .looks_human(media)
            .then_some(Violation::HumanMedia)
    }

    fn check_schedule(&self, draft: &PostDraft) -> Option<Violation> {
        let cutoff = self.policy.event_cutoff;
        match draft.scheduled_at {
            Some(at) if at > cutoff => None,
            _ => Some(Violation::EventNotInFuture { cutoff }),
        }
    }

    async fn check_source(
        &self,
        draft: &PostDraft,
        cancel: &CancellationToken,
    ) -> Option<Violation> {
        let Some(source) = draft
            .source_reference
            .as_deref()
            .filter(|s| !s.trim().is_empty())
        else {
            return Some(Violation::MissingSource);
        };

        if !url::is_well_formed(source) {
            return Some(Violation::MalformedSource);
        }

        if !self.probe.is_reachable(source, cancel).await {
            tracing::debug!(source = %source, "Cited source is not reachable");
            return Some(Violation::UnreachableSource);
        }

        None
    }
}
