//! Request-level errors
//!
//! Every variant ends the request; the client gets the response envelope
//! with `error` set.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;
use thiserror::Error;

use super::envelope::ResponseEnvelope;

/// Challenge sent with every 401
pub const AUTH_CHALLENGE: &str = "Basic realm=\"Authorization Required\"";

/// Errors that terminate a request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Body was not valid JSON for the route's envelope
    #[error("bad request")]
    BadRequest,

    /// Verb not supported on this route
    #[error("bad method")]
    BadMethod,

    /// Wrong credentials, or no authenticated session
    #[error("unauthorized")]
    Unauthorized,

    /// Shared state could not be accessed
    #[error("internal error")]
    Internal(String),
}

impl ApiError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::BadMethod => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Builds the error response, echoing the request id
    pub fn respond(&self, id: i64) -> Response {
        let mut response = ResponseEnvelope::error(id, self).into_response(self.status_code());
        if matches!(self, ApiError::Unauthorized) {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(AUTH_CHALLENGE),
            );
        }
        response
    }
}
