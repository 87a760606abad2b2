//! # Response Envelope
//!
//! Normalized `{statusCode, headers, body, isBase64Encoded}` response.

use std::collections::BTreeMap;

use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::json::to_body;

pub const ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
pub const ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";
pub const MAX_AGE: &str = "Access-Control-Max-Age";
pub const CONTENT_TYPE: &str = "Content-Type";

const PREFLIGHT_HEADERS: &str = "Content-Type, X-Auth-Token";
const PREFLIGHT_MAX_AGE: &str = "86400";

/// Used only if a payload cannot be encoded at all
const FALLBACK_ERROR_BODY: &str = r#"{"error": "Failed to encode response"}"#;

/// HTTP-shaped response descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl GatewayResponse {
    /// JSON response with the standard content-type and CORS headers
    pub fn json<T: Serialize + ?Sized>(status_code: u16, payload: &T) -> Self {
        match to_body(payload) {
            Ok(body) => Self::with_json_body(status_code, body),
            Err(e) => Self::error(500, &e.to_string()),
        }
    }

    /// `{"error": message}` with the given status
    pub fn error(status_code: u16, message: &str) -> Self {
        let body = to_body(&ErrorBody { error: message })
            .unwrap_or_else(|_| FALLBACK_ERROR_BODY.to_string());
        Self::with_json_body(status_code, body)
    }

    /// CORS preflight answer: empty body, no content type
    pub fn preflight(allowed_methods: &str) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(ALLOW_ORIGIN.to_string(), "*".to_string());
        headers.insert(ALLOW_METHODS.to_string(), allowed_methods.to_string());
        headers.insert(ALLOW_HEADERS.to_string(), PREFLIGHT_HEADERS.to_string());
        headers.insert(MAX_AGE.to_string(), PREFLIGHT_MAX_AGE.to_string());

        Self {
            status_code: 200,
            headers,
            body: String::new(),
            is_base64_encoded: false,
        }
    }

    fn with_json_body(status_code: u16, body: String) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(CONTENT_TYPE.to_string(), "application/json".to_string());
        headers.insert(ALLOW_ORIGIN.to_string(), "*".to_string());

        Self {
            status_code,
            headers,
            body,
            is_base64_encoded: false,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Parse the body back into JSON
    pub fn json_body(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }
}

impl IntoResponse for GatewayResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = status;

        let headers = response.headers_mut();
        for (name, value) in &self.headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                headers.insert(name, value);
            }
        }

        response
    }
}
