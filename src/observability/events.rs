//! Observable events
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events in the config store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Process startup begins
    Startup,
    /// Configuration loaded and validated
    ConfigLoaded,
    /// Listener bound, ready for requests
    Serving,
    /// Listener could not bind (FATAL)
    BindFailed,
    /// Expired sessions swept
    SessionsPurged,

    // Session gate
    /// Credentials accepted
    LoginAccepted,
    /// Credentials rejected
    LoginRejected,
    /// Session flag cleared
    Logout,
    /// Session store failed during login/logout
    SessionStoreFailed,

    // Requests
    /// Request rejected before dispatch
    RequestRejected,
    /// Record in a request body failed validation and was skipped
    RecordDropped,
    /// Collection request handled
    Request,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::Startup => "CONFIGSTORE_STARTUP",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::Serving => "SERVING",
            Event::BindFailed => "BIND_FAILED",
            Event::SessionsPurged => "SESSIONS_PURGED",
            Event::LoginAccepted => "LOGIN_ACCEPTED",
            Event::LoginRejected => "LOGIN_REJECTED",
            Event::Logout => "LOGOUT",
            Event::SessionStoreFailed => "SESSION_STORE_FAILED",
            Event::RequestRejected => "REQUEST_REJECTED",
            Event::RecordDropped => "RECORD_DROPPED",
            Event::Request => "REQUEST",
        }
    }

    /// Events that end the process
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::BindFailed)
    }

    /// Events logged at WARN
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Event::LoginRejected
                | Event::RequestRejected
                | Event::RecordDropped
                | Event::SessionStoreFailed
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
