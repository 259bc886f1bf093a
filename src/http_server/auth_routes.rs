//! Auth HTTP Routes
//!
//! `/login` and `/logout`. Neither requires an existing session. Both accept
//! any verb at the router level so a non-POST gets the JSON `bad method`
//! envelope.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode},
    response::Response,
    routing::any,
    Router,
};

use super::cookies::{session_cookie, session_from_headers};
use super::envelope::{decode_body, AuthEnvelope, RequestEnvelope, ResponseEnvelope};
use super::errors::ApiError;
use super::state::ConfigService;
use crate::observability::{log_event_with_fields, Event};
use crate::session::{Session, SessionError};

/// Auth routes with shared state
pub fn auth_routes(state: Arc<ConfigService>) -> Router {
    Router::new()
        .route("/login", any(login_handler))
        .route("/logout", any(logout_handler))
        .with_state(state)
}

/// Login handler
async fn login_handler(
    State(state): State<Arc<ConfigService>>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let auth: AuthEnvelope = match decode_body(&body) {
        Ok(auth) => auth,
        Err((id, e)) => return reject("/login", id, e),
    };

    if method != Method::POST {
        return reject("/login", auth.id, ApiError::BadMethod);
    }

    let current = session_from_headers(&headers);
    match state
        .gate()
        .authenticate(current, &auth.username, &auth.password)
    {
        Ok(session) => {
            log_event_with_fields(Event::LoginAccepted, &[("session", &session.id.to_string())]);
            ok_with_session(auth.id, &session)
        }
        Err(SessionError::InvalidCredentials) => {
            log_event_with_fields(Event::LoginRejected, &[("username", &auth.username)]);
            ApiError::Unauthorized.respond(auth.id)
        }
        Err(e) => {
            log_event_with_fields(Event::SessionStoreFailed, &[("reason", &e.to_string())]);
            ApiError::Unauthorized.respond(auth.id)
        }
    }
}

/// Logout handler
async fn logout_handler(
    State(state): State<Arc<ConfigService>>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request: RequestEnvelope = match decode_body(&body) {
        Ok(request) => request,
        Err((id, e)) => return reject("/logout", id, e),
    };

    if method != Method::POST {
        return reject("/logout", request.id, ApiError::BadMethod);
    }

    let current = session_from_headers(&headers);
    match state.gate().deauthenticate(current) {
        Ok(Some(session)) => {
            log_event_with_fields(Event::Logout, &[("session", &session.id.to_string())]);
            ok_with_session(request.id, &session)
        }
        Ok(None) => ResponseEnvelope::ok(request.id).into_response(StatusCode::OK),
        Err(e) => {
            // logout still succeeds from the client's point of view
            log_event_with_fields(Event::SessionStoreFailed, &[("reason", &e.to_string())]);
            ResponseEnvelope::ok(request.id).into_response(StatusCode::OK)
        }
    }
}

fn ok_with_session(id: i64, session: &Session) -> Response {
    let mut response = ResponseEnvelope::ok(id).into_response(StatusCode::OK);
    if let Some(cookie) = session_cookie(session) {
        response.headers_mut().insert(header::SET_COOKIE, cookie);
    }
    response
}

fn reject(path: &str, id: i64, error: ApiError) -> Response {
    log_event_with_fields(
        Event::RequestRejected,
        &[("path", path), ("reason", &error.to_string())],
    );
    error.respond(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Credentials, SessionConfig};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn service() -> Arc<ConfigService> {
        Arc::new(ConfigService::new(
            Credentials::new("whiskey", "hotel"),
            SessionConfig::default(),
        ))
    }

    fn app() -> Router {
        auth_routes(service())
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_login_sets_cookie() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/login")
                    .body(Body::from(r#"{"id":7,"username":"whiskey","password":"hotel"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_some());
        let body = body_json(response).await;
        assert_eq!(body["id"], 7);
        assert_eq!(body["error"], "");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/login")
                    .body(Body::from(r#"{"id":1,"username":"whiskey","password":"x"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(header::WWW_AUTHENTICATE).is_some());
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_login_requires_post() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/login")
                    .body(Body::from(r#"{"id":2}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body = body_json(response).await;
        assert_eq!(body["id"], 2);
        assert_eq!(body["error"], "bad method");
    }

    #[tokio::test]
    async fn test_malformed_body_wins_over_bad_method() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/logout")
                    .body(Body::from("{oops"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "bad request");
    }

    #[tokio::test]
    async fn test_logout_requires_post() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/logout")
                    .body(Body::from(r#"{"id":12}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body = body_json(response).await;
        assert_eq!(body["id"], 12);
        assert_eq!(body["error"], "bad method");
    }

    #[tokio::test]
    async fn test_anonymous_logouts_store_no_sessions() {
        let state = service();
        let app = auth_routes(state.clone());

        for id in 0..50 {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/logout")
                        .body(Body::from(format!(r#"{{"id":{id}}}"#)))
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            assert!(response.headers().get(header::SET_COOKIE).is_none());
            assert_eq!(body_json(response).await["error"], "");
        }
        assert!(state.gate().store().is_empty());
    }

    #[tokio::test]
    async fn test_logout_after_login_keeps_session_cookie() {
        let state = service();
        let session = state.gate().authenticate(None, "whiskey", "hotel").unwrap();

        let response = auth_routes(state.clone())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/logout")
                    .header(header::COOKIE, format!("default={}", session.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_some());
        assert_eq!(state.gate().store().len(), 1);
        assert!(state.gate().check(Some(session.id)).is_err());
    }
}
