//! # Session Gate
//!
//! Per-client authentication state. Each client holds an opaque session id
//! (carried in a cookie by the HTTP layer); the server keeps one boolean
//! "logged in" flag per session.
//!
//! ## Invariants
//! - Missing session, missing flag, or a false flag all mean unauthenticated
//! - Any store failure during a check is treated as unauthenticated
//! - Logout clears the flag of a live session and stores nothing otherwise

mod errors;
mod gate;
mod session;

pub use errors::{SessionError, SessionResult};
pub use gate::{Credentials, SessionGate};
pub use session::{InMemorySessionStore, Session, SessionConfig, SessionId, SessionStore};
