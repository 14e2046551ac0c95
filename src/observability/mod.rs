//! Observability for the command layer
//!
//! Structured JSON-lines logging of lifecycle events.
//!
//! # Usage
//!
//! ```
//! use validall::observability::{Event, Logger, Severity};
//!
//! let logger = Logger::new(Severity::Info);
//! logger.event(Event::CheckStart, &[("args", "1")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{format_line, Logger, Severity};

impl Event {
    /// Severity an event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::CheckRejected | Event::FallbackInvoked | Event::UnboundedRepeat => Severity::Warn,
            Event::ConfigLoaded | Event::CheckStart => Severity::Trace,
            Event::CheckAccepted => Severity::Info,
        }
    }
}

impl Logger {
    /// Log a lifecycle event at the severity it implies
    pub fn event(&self, event: Event, fields: &[(&str, &str)]) {
        match event.severity() {
            Severity::Trace => self.trace(event.as_str(), fields),
            Severity::Info => self.info(event.as_str(), fields),
            Severity::Warn => self.warn(event.as_str(), fields),
            other => self.log(other, event.as_str(), fields),
        }
    }
}
