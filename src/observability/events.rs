//! Observable events
//!
//! Events are explicit and typed.

use std::fmt;

use super::logger::Severity;

/// Observable events emitted by the validator and its collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Validator configuration loaded from disk
    ConfigLoaded,
    /// Table definitions loaded into a catalog
    SchemasLoaded,

    // Validation
    /// A rule chain passed and its results were merged
    VerifyComplete,
    /// A value was registered without running any rule
    PassThroughRegistered,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemasLoaded => "SCHEMAS_LOADED",
            Event::VerifyComplete => "VERIFY_COMPLETE",
            Event::PassThroughRegistered => "PASS_THROUGH_REGISTERED",
        }
    }

    /// Per-call events are TRACE, lifecycle events are INFO
    pub fn severity(&self) -> Severity {
        match self {
            Event::ConfigLoaded | Event::SchemasLoaded => Severity::Info,
            Event::VerifyComplete | Event::PassThroughRegistered => Severity::Trace,
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
    fn test_all_events_have_string_representation() {
        let events = [
            Event::ConfigLoaded,
            Event::SchemasLoaded,
            Event::VerifyComplete,
            Event::PassThroughRegistered,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_ascii_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_per_call_events_are_trace() {
        assert_eq!(Event::VerifyComplete.severity(), Severity::Trace);
        assert_eq!(Event::ConfigLoaded.severity(), Severity::Info);
    }
}
