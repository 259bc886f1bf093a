//! # Session Gate
//!
//! Checks configured credentials and reads/writes the per-session login flag.

use chrono::Utc;
use subtle::ConstantTimeEq;

use super::errors::{SessionError, SessionResult};
use super::session::{expiry_after, Session, SessionConfig, SessionId, SessionStore};

/// Process-wide login credentials
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Compares both parts in constant time; both are always evaluated
    fn matches(&self, username: &str, password: &str) -> bool {
        let user_ok = self.username.as_bytes().ct_eq(username.as_bytes());
        let pass_ok = self.password.as_bytes().ct_eq(password.as_bytes());
        (user_ok & pass_ok).into()
    }
}

/// Gate guarding collection operations
pub struct SessionGate<S: SessionStore> {
    store: S,
    credentials: Credentials,
    config: SessionConfig,
}

impl<S: SessionStore> SessionGate<S> {
    pub fn new(store: S, credentials: Credentials, config: SessionConfig) -> Self {
        Self {
            store,
            credentials,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Logs the client in.
    ///
    /// Reuses the client's live session when there is one, otherwise starts
    /// a new one. A store failure while looking up the session aborts the
    /// login rather than silently starting over.
    pub fn authenticate(
        &self,
        current: Option<SessionId>,
        username: &str,
        password: &str,
    ) -> SessionResult<Session> {
        if !self.credentials.matches(username, password) {
            return Err(SessionError::InvalidCredentials);
        }

        let mut session = match self.load_live(current)? {
            Some(session) => session,
            None => Session::new(self.config.ttl)?,
        };
        session.logged_in = Some(true);
        self.persist(session)
    }

    /// Logs the client out. Does not require a prior login.
    ///
    /// Clears the flag on the client's live session. Without one there is
    /// nothing to store: a missing session already reads as logged out, so
    /// `Ok(None)` is returned and the store is left untouched.
    pub fn deauthenticate(&self, current: Option<SessionId>) -> SessionResult<Option<Session>> {
        // a broken lookup is the same as no session
        let Some(mut session) = self.load_live(current).unwrap_or(None) else {
            return Ok(None);
        };
        session.logged_in = Some(false);
        self.persist(session).map(Some)
    }

    /// Succeeds only for a live session whose flag is present and true
    pub fn check(&self, current: Option<SessionId>) -> SessionResult<()> {
        match self.load_live(current) {
            Ok(Some(session)) if session.is_logged_in() => Ok(()),
            _ => Err(SessionError::Unauthenticated),
        }
    }

    /// Removes expired sessions from the store
    pub fn purge_expired(&self) -> SessionResult<usize> {
        self.store.purge_expired(Utc::now())
    }

    fn load_live(&self, current: Option<SessionId>) -> SessionResult<Option<Session>> {
        let Some(id) = current else {
            return Ok(None);
        };
        let session = self.store.load(&id)?;
        Ok(session.filter(|s| !s.is_expired_at(Utc::now())))
    }

    fn persist(&self, mut session: Session) -> SessionResult<Session> {
        session.expires_at = expiry_after(self.config.ttl)?;
        self.store.save(&session)?;
        Ok(session)
    }
}
