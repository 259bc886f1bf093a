//! Per-request observation scope
//!
//! Collects fields while a request is handled and logs one `REQUEST` line
//! with the outcome and elapsed time when finished.

use std::time::Instant;

use super::events::Event;
use super::logger::{Logger, Severity};

/// Logs a single summary line for one request
///
/// ```ignore
/// let mut scope = RequestScope::new("GET", "/configs/hostname");
/// scope.field("returned", "2");
/// scope.finish(200);
/// ```
pub struct RequestScope {
    started: Instant,
    fields: Vec<(&'static str, String)>,
    finished: bool,
}

impl RequestScope {
    pub fn new(method: &str, path: &str) -> Self {
        Self {
            started: Instant::now(),
            fields: vec![("method", method.to_string()), ("path", path.to_string())],
            finished: false,
        }
    }

    /// Attach a field to the summary line
    pub fn field(&mut self, key: &'static str, value: impl ToString) {
        self.fields.push((key, value.to_string()));
    }

    /// Log the summary with the response status
    pub fn finish(mut self, status: u16) {
        self.emit(status);
    }

    fn emit(&mut self, status: u16) {
        self.finished = true;
        let severity = if status >= 500 {
            Severity::Error
        } else if status >= 400 {
            Severity::Warn
        } else {
            Severity::Info
        };

        let status = status.to_string();
        let elapsed = self.started.elapsed().as_millis().to_string();
        let mut fields: Vec<(&str, &str)> = self
            .fields
            .iter()
            .map(|(k, v)| (*k, v.as_str()))
            .collect();
        fields.push(("status", status.as_str()));
        fields.push(("elapsed_ms", elapsed.as_str()));

        Logger::log(severity, Event::Request.as_str(), &fields);
    }
}

impl Drop for RequestScope {
    fn drop(&mut self) {
        if !self.finished {
            self.field("reason", "scope dropped without status");
            self.emit(500);
        }
    }
}
