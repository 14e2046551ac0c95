//! Repeat policy derived from the configured repeat count

use std::num::NonZeroU64;

/// What a guard does when the first result is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatPolicy {
    /// Negative count: call again until a result is accepted.
    Unbounded,
    /// Zero: fail at once.
    RejectImmediately,
    /// Positive count: call again exactly this many times.
    Bounded(NonZeroU64),
}

impl RepeatPolicy {
    /// Maps a signed repeat count onto a policy.
    pub fn from_count(count: i64) -> Self {
        if count < 0 {
            return RepeatPolicy::Unbounded;
        }
        match NonZeroU64::new(count.unsigned_abs()) {
            Some(n) => RepeatPolicy::Bounded(n),
            None => RepeatPolicy::RejectImmediately,
        }
    }

    /// True if a rejected result is retried until one is accepted.
    pub fn is_unbounded(&self) -> bool {
        matches!(self, RepeatPolicy::Unbounded)
    }
}

impl Default for RepeatPolicy {
    /// One retry.
    fn default() -> Self {
        Self::from_count(1)
    }
}
