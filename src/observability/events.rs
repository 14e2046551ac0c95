//! Observable events
//!
//! Events are explicit and typed. The guard itself emits none of them;
//! they are raised by the command layer and the demo fallback.

use std::fmt;

/// Observable events in validall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration loaded and checked
    ConfigLoaded,
    /// A guarded call is about to run
    CheckStart,
    /// A guarded call returned a result
    CheckAccepted,
    /// A guarded call returned a validation error
    CheckRejected,
    /// The fallback ran after retries were spent
    FallbackInvoked,
    /// A negative repeat count was loaded; rejected results retry forever
    UnboundedRepeat,
}

impl Event {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::CheckStart => "CHECK_START",
            Event::CheckAccepted => "CHECK_ACCEPTED",
            Event::CheckRejected => "CHECK_REJECTED",
            Event::FallbackInvoked => "FALLBACK_INVOKED",
            Event::UnboundedRepeat => "UNBOUNDED_REPEAT",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::ConfigLoaded.as_str(), "CONFIG_LOADED");
        assert_eq!(Event::FallbackInvoked.to_string(), "FALLBACK_INVOKED");
    }
}
