//! Session cookie handling

use axum::http::{header, HeaderMap, HeaderValue};
use chrono::Utc;

use crate::session::{Session, SessionId};

/// Name of the cookie carrying the session id
pub const SESSION_COOKIE: &str = "default";

/// Reads the session id from the request's cookies.
///
/// A missing or unparseable cookie means no session.
pub fn session_from_headers(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| value.trim_matches('"').parse().ok())
}

/// `Set-Cookie` value for a saved session
pub fn session_cookie(session: &Session) -> Option<HeaderValue> {
    let max_age = (session.expires_at - Utc::now()).num_seconds().max(0);
    let cookie = format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly",
        SESSION_COOKIE, session.id, max_age
    );
    HeaderValue::from_str(&cookie).ok()
}
