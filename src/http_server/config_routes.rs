//! Collection HTTP Routes
//!
//! Everything under `/configs/` requires a logged-in session.
//!
//! | Method | Path | Action |
//! |---|---|---|
//! | GET | `/configs/{field}/...` | list, sorted by the given fields |
//! | GET | `/configs/large/{field}/...` | list records with over 100 fields |
//! | POST | `/configs/` | add records, return duplicates |
//! | DELETE | `/configs/` | delete records, return the ones not found |

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    response::Response,
    routing::any,
    Router,
};

use super::cookies::session_from_headers;
use super::envelope::{decode_body, RequestEnvelope, ResponseEnvelope};
use super::errors::ApiError;
use super::state::{ConfigService, ListQuery};
use crate::collection::{Collection, SortOrder};
use crate::observability::RequestScope;

/// Path segment selecting the large-record filter
pub const LARGE_FILTER_TOKEN: &str = "large";

/// Collection routes with shared state
pub fn config_routes(state: Arc<ConfigService>) -> Router {
    Router::new()
        .route("/configs", any(configs_handler))
        .route("/configs/", any(configs_handler))
        .route("/configs/*suffix", any(configs_suffix_handler))
        .with_state(state)
}

impl ListQuery {
    /// Parses the (already percent-decoded) path after `/configs/`.
    ///
    /// Only the first raw segment can select the `large` filter, so
    /// `/configs//large` lists unfiltered. Every later segment is a sort key;
    /// empty ones are ignored.
    pub fn from_suffix(suffix: &str) -> Self {
        let mut segments = suffix.split('/').peekable();
        let large_only = segments.next_if_eq(&LARGE_FILTER_TOKEN).is_some();
        Self {
            large_only,
            order: SortOrder::by(segments.filter(|s| !s.is_empty())),
        }
    }
}

/// `/configs` and `/configs/`
async fn configs_handler(
    State(state): State<Arc<ConfigService>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    handle(&state, &method, &uri, &headers, &body, Ok(String::new()))
}

/// `/configs/*suffix`; axum percent-decodes the captured suffix
async fn configs_suffix_handler(
    State(state): State<Arc<ConfigService>>,
    suffix: Result<Path<String>, PathRejection>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let suffix = suffix.map(|Path(suffix)| suffix).map_err(|_| ApiError::BadRequest);
    handle(&state, &method, &uri, &headers, &body, suffix)
}

/// Decode, authorize, dispatch
fn handle(
    state: &ConfigService,
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
    body: &[u8],
    suffix: Result<String, ApiError>,
) -> Response {
    let mut scope = RequestScope::new(method.as_str(), uri.path());

    let (id, result) = match decode_body::<RequestEnvelope>(body) {
        Ok(request) => (request.id, dispatch(state, method, headers, suffix, request)),
        Err((id, e)) => (id, Err(e)),
    };
    scope.field("id", id);

    match result {
        Ok(collection) => {
            scope.field("returned", collection.len());
            scope.finish(StatusCode::OK.as_u16());
            ResponseEnvelope::with_collection(id, collection).into_response(StatusCode::OK)
        }
        Err(e) => {
            scope.field("error", &e);
            if let ApiError::Internal(detail) = &e {
                scope.field("detail", detail);
            }
            scope.finish(e.status_code().as_u16());
            e.respond(id)
        }
    }
}

fn dispatch(
    state: &ConfigService,
    method: &Method,
    headers: &HeaderMap,
    suffix: Result<String, ApiError>,
    request: RequestEnvelope,
) -> Result<Collection, ApiError> {
    state
        .gate()
        .check(session_from_headers(headers))
        .map_err(|_| ApiError::Unauthorized)?;

    match *method {
        // an undecodable suffix only matters when listing
        Method::GET => state.list(&ListQuery::from_suffix(&suffix?)),
        Method::POST => state.add(request.into_records()),
        Method::DELETE => state.remove(request.into_records()),
        _ => Err(ApiError::BadMethod),
    }
}
