//! configstore - an authenticated in-memory store of configuration records
//!
//! Records are JSON objects keyed by their `name` field. Clients log in,
//! then add, list, and delete records over HTTP.

pub mod cli;
pub mod collection;
pub mod http_server;
pub mod observability;
pub mod record;
pub mod session;
