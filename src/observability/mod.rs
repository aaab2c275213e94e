//! Observability subsystem
//!
//! Provides:
//! - Structured logging (JSON lines)
//! - Validation counters
//! - Typed lifecycle events
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on validation outcomes
//! 3. No async or background threads
//! 4. Deterministic output
//! 5. Rejections are counted, never logged; the error belongs to the caller
//!
//! # Usage
//!
//! ```ignore
//! use search_validator::observability::{Logger, Event, MetricsRegistry};
//!
//! Logger::info("CONFIG_LOADED", &[("path", "validator.json")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_verifications_passed();
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Log a lifecycle event at its default severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        // Verifies no panic
        log_event(Event::ConfigLoaded);
        log_event(Event::VerifyComplete);
    }

    #[test]
    fn test_log_event_with_fields() {
        log_event_with_fields(Event::SchemasLoaded, &[("tables", "3")]);
    }
}
