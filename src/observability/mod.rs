//! Observability: structured logging for service lifecycle and request
//! failures.

pub mod logger;

pub use logger::{Logger, Severity};

/// Lifecycle events emitted during boot and shutdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Process started, configuration loading begins
    BootStart,
    /// Configuration loaded from environment/CLI
    ConfigLoaded,
    /// Store opened and collections loaded
    StoreOpened,
    /// Listener bound, serving requests
    ServeStart,
    /// Store could not be opened
    StoreOpenFailed,
    /// Configuration invalid or incomplete
    ConfigInvalid,
    /// Listener could not be bound
    BindFailed,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "boot_start",
            Event::ConfigLoaded => "config_loaded",
            Event::StoreOpened => "store_opened",
            Event::ServeStart => "serve_start",
            Event::StoreOpenFailed => "store_open_failed",
            Event::ConfigInvalid => "config_invalid",
            Event::BindFailed => "bind_failed",
        }
    }

    /// Whether this event accompanies process exit
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Event::StoreOpenFailed | Event::ConfigInvalid | Event::BindFailed
        )
    }
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_fatal() {
        Severity::Fatal
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(Event::StoreOpenFailed.is_fatal());
        assert!(Event::ConfigInvalid.is_fatal());
        assert!(!Event::BootStart.is_fatal());
        assert!(!Event::ServeStart.is_fatal());
    }

    #[test]
    fn test_log_event_no_panic() {
        log_event(Event::BootStart);
        log_event_with_fields(Event::ConfigLoaded, &[("store_uri", "/tmp/shop")]);
    }
}
