//! Media moderation port.

/// Decides whether a media reference likely depicts people.
///
/// Implementations must not perform I/O; a vision-model backed detector is
/// expected to be wrapped behind a cache or precomputed label set.
pub trait HumanDetector: Send + Sync {
    fn looks_human(&self, media_reference: &str) -> bool;
}
