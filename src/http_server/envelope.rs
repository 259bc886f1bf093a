//! Request and response envelopes
//!
//! All bodies are JSON. Request bodies may be empty, in which case every
//! field takes its default.

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::ApiError;
use crate::collection::{to_indented_json, Collection};
use crate::observability::{log_event_with_fields, Event};
use crate::record::Record;

/// Body of collection requests
#[derive(Debug, Default, Deserialize)]
pub struct RequestEnvelope {
    #[serde(default)]
    pub id: i64,

    /// Raw records; validated one by one in [`RequestEnvelope::into_records`]
    #[serde(default)]
    pub configurations: Option<Vec<Value>>,
}

impl RequestEnvelope {
    /// Validates each record, skipping (and logging) the invalid ones
    pub fn into_records(self) -> Vec<Record> {
        let id = self.id.to_string();
        self.configurations
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .filter_map(|(index, raw)| match Record::from_json(raw) {
                Ok(record) => Some(record),
                Err(e) => {
                    log_event_with_fields(
                        Event::RecordDropped,
                        &[
                            ("id", &id),
                            ("index", &index.to_string()),
                            ("reason", &e.to_string()),
                        ],
                    );
                    None
                }
            })
            .collect()
    }
}

/// Body of login requests
#[derive(Debug, Default, Deserialize)]
pub struct AuthEnvelope {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Body of every response
#[derive(Debug, Clone, Serialize)]
pub struct ResponseEnvelope {
    pub id: i64,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configurations: Option<Collection>,
}

impl ResponseEnvelope {
    /// Success with no collection attached
    pub fn ok(id: i64) -> Self {
        Self {
            id,
            error: String::new(),
            configurations: None,
        }
    }

    /// Success carrying a collection
    pub fn with_collection(id: i64, collection: Collection) -> Self {
        Self {
            id,
            error: String::new(),
            configurations: Some(collection),
        }
    }

    pub fn error(id: i64, error: &ApiError) -> Self {
        Self {
            id,
            error: error.to_string(),
            configurations: None,
        }
    }

    /// Indented JSON followed by a newline
    pub fn to_body(&self) -> String {
        let mut body = to_indented_json(self).unwrap_or_else(|_| {
            format!("{{\"id\": {}, \"error\": \"internal error\"}}", self.id)
        });
        body.push('\n');
        body
    }

    pub fn into_response(self, status: StatusCode) -> Response {
        let mut response = Response::new(Body::from(self.to_body()));
        *response.status_mut() = status;
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        response
    }
}

/// Decodes the first JSON value in `body`.
///
/// An empty body yields the default envelope. Anything after the first
/// value is ignored. On failure the request id is recovered from the body
/// when possible so the error can echo it.
pub fn decode_body<T>(body: &[u8]) -> Result<T, (i64, ApiError)>
where
    T: DeserializeOwned + Default,
{
    let mut values = serde_json::Deserializer::from_slice(body).into_iter::<T>();
    match values.next() {
        None => Ok(T::default()),
        Some(Ok(value)) => Ok(value),
        Some(Err(_)) => Err((recover_id(body), ApiError::BadRequest)),
    }
}

fn recover_id(body: &[u8]) -> i64 {
    let mut values = serde_json::Deserializer::from_slice(body).into_iter::<Value>();
    match values.next() {
        Some(Ok(value)) => value.get("id").and_then(Value::as_i64).unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_body_decodes_to_default() {
        let env: RequestEnvelope = decode_body(b"").unwrap();
        assert_eq!(env.id, 0);
        assert!(env.configurations.is_none());

        let env: AuthEnvelope = decode_body(b"  \n").unwrap();
        assert!(env.username.is_empty());
    }

    #[test]
    fn test_trailing_data_ignored() {
        let env: AuthEnvelope = decode_body(br#"{"id":3,"username":"u"} trailing"#).unwrap();
        assert_eq!(env.id, 3);
        assert_eq!(env.username, "u");
    }

    #[test]
    fn test_malformed_body() {
        let err = decode_body::<RequestEnvelope>(b"{not json").unwrap_err();
        assert_eq!(err, (0, ApiError::BadRequest));
    }

    #[test]
    fn test_id_recovered_from_mistyped_body() {
        let err = decode_body::<RequestEnvelope>(br#"{"id":9,"configurations":"x"}"#).unwrap_err();
        assert_eq!(err, (9, ApiError::BadRequest));
    }

    #[test]
    fn test_invalid_records_dropped() {
        let env: RequestEnvelope = decode_body(
            json!({
                "id": 1,
                "configurations": [
                    {"name": "a", "hostname": "h", "port": 1, "username": "u"},
                    {"name": "b", "hostname": "h"},
                    {"name": "c", "hostname": "h", "port": 1, "username": "u"}
                ]
            })
            .to_string()
            .as_bytes(),
        )
        .unwrap();

        let records = env.into_records();
        let names: Vec<_> = records.iter().map(Record::unique_value).collect();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn test_response_omits_missing_collection() {
        let body = ResponseEnvelope::ok(5).to_body();
        let parsed: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed, json!({"id": 5, "error": ""}));
        assert!(body.ends_with("}\n"));
    }

    #[test]
    fn test_response_with_empty_collection() {
        let body = ResponseEnvelope::with_collection(1, Collection::new()).to_body();
        let parsed: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed, json!({"id": 1, "error": "", "configurations": []}));
    }

    #[test]
    fn test_error_envelope() {
        let body = ResponseEnvelope::error(2, &ApiError::Unauthorized).to_body();
        let parsed: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed["error"], "unauthorized");
        assert_eq!(parsed["id"], 2);
    }
}
