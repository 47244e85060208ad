//! Request extractors.

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{header, HeaderMap};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// A request body read as a JSON object.
///
/// Mirrors the usual JSON body-parser rules: a request without a JSON content
/// type, or with an empty body, yields an empty object. Unparseable JSON and
/// non-object JSON are a 400 before the handler runs.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonObject(pub Map<String, Value>);

#[async_trait]
impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            return Ok(Self(Map::new()));
        }

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::MalformedBody(rejection.body_text()))?;

        if body.is_empty() {
            return Ok(Self(Map::new()));
        }

        let value: Value = serde_json::from_slice(&body).map_err(|e| {
            ApiError::MalformedBody(format!("Failed to parse the request body as JSON: {}", e))
        })?;

        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ApiError::MalformedBody(format!(
                "Expected request body to be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

/// `application/json` or `application/*+json`, parameters ignored.
fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
