//! # Sessions and session storage

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::errors::{SessionError, SessionResult};

/// Opaque session identifier handed to the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generates a fresh random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(SessionId)
            .map_err(|_| SessionError::MalformedSessionId)
    }
}

/// Session model
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Unique session identifier
    pub id: SessionId,

    /// Login flag; `None` until the client logs in or out
    pub logged_in: Option<bool>,

    /// When the session expires
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Creates a session with no login flag.
    ///
    /// Fails if `ttl` pushes the expiry past the representable date range.
    pub fn new(ttl: Duration) -> SessionResult<Self> {
        Ok(Self {
            id: SessionId::generate(),
            logged_in: None,
            expires_at: expiry_after(ttl)?,
        })
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Whether the flag is present and true
    pub fn is_logged_in(&self) -> bool {
        self.logged_in == Some(true)
    }
}

/// `now + ttl`, or a storage error when the result is out of range
pub(crate) fn expiry_after(ttl: Duration) -> SessionResult<DateTime<Utc>> {
    Utc::now()
        .checked_add_signed(ttl)
        .ok_or_else(|| SessionError::StorageError("session expiry out of range".to_string()))
}

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Session lifetime, renewed on every save
    pub ttl: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::days(30),
        }
    }
}

impl SessionConfig {
    pub fn with_ttl_days(days: u32) -> Self {
        Self {
            ttl: Duration::days(i64::from(days)),
        }
    }
}

/// Session store trait
pub trait SessionStore: Send + Sync {
    /// Loads a session by id
    fn load(&self, id: &SessionId) -> SessionResult<Option<Session>>;

    /// Inserts or replaces a session
    fn save(&self, session: &Session) -> SessionResult<()>;

    /// Drops sessions expired at `now`, returning how many were removed
    fn purge_expired(&self, now: DateTime<Utc>) -> SessionResult<usize>;
}

/// In-memory session store
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions, expired ones included
    pub fn len(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self, id: &SessionId) -> SessionResult<Option<Session>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| SessionError::StorageError("Lock poisoned".to_string()))?;
        Ok(sessions.get(id).cloned())
    }

    fn save(&self, session: &Session) -> SessionResult<()> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| SessionError::StorageError("Lock poisoned".to_string()))?;
        sessions.insert(session.id, session.clone());
        Ok(())
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> SessionResult<usize> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| SessionError::StorageError("Lock poisoned".to_string()))?;

        let len_before = sessions.len();
        sessions.retain(|_, s| !s.is_expired_at(now));
        Ok(len_before - sessions.len())
    }
}
