//! Observability for the config store
//!
//! - Structured logging (JSON lines)
//! - Typed lifecycle and request events
//! - Per-request summary scopes
//!
//! # Usage
//!
//! ```ignore
//! use configstore::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::Serving, &[("addr", "0.0.0.0:8080")]);
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use scope::RequestScope;

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log an event with fields, at the severity the event implies
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_fatal() {
        Severity::Fatal
    } else if event.is_warning() {
        Severity::Warn
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}
