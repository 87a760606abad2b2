//! # Request Envelope
//!
//! The request description handed to handlers by the HTTP adapter or the CLI.

use std::collections::HashMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Methods the handlers distinguish between
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Options,
    /// Anything else; always answered with 405
    Other(String),
}

impl HttpMethod {
    /// Parse a method name. Matching is exact, as on the wire.
    pub fn parse(method: &str) -> Self {
        match method {
            "GET" => HttpMethod::Get,
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "DELETE" => HttpMethod::Delete,
            "OPTIONS" => HttpMethod::Options,
            other => HttpMethod::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Other(name) => name,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// HTTP-shaped request descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayRequest {
    /// Method name (default: "GET")
    #[serde(default = "default_method")]
    pub http_method: String,

    /// Query string parameters; `null` is treated like an empty map
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,

    /// JSON-encoded request body
    #[serde(default)]
    pub body: Option<String>,
}

fn default_method() -> String {
    "GET".to_string()
}

impl Default for GatewayRequest {
    fn default() -> Self {
        Self {
            http_method: default_method(),
            query_string_parameters: None,
            body: None,
        }
    }
}

impl GatewayRequest {
    /// Create a request with the given method and nothing else
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            http_method: method.into(),
            ..Default::default()
        }
    }

    /// Build a request from already-extracted HTTP parts
    pub fn from_parts(method: &str, query: HashMap<String, String>, body: String) -> Self {
        Self {
            http_method: method.to_string(),
            query_string_parameters: if query.is_empty() { None } else { Some(query) },
            body: if body.is_empty() { None } else { Some(body) },
        }
    }

    /// Add a query string parameter
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_string_parameters
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Set the raw body
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn method(&self) -> HttpMethod {
        HttpMethod::parse(&self.http_method)
    }

    /// Look up a query string parameter
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|params| params.get(key))
            .map(String::as_str)
    }

    /// Decode the body as JSON. A missing or blank body decodes as `{}`.
    pub fn json_body<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        match self.body.as_deref() {
            Some(raw) if !raw.trim().is_empty() => serde_json::from_str(raw),
            _ => serde_json::from_str("{}"),
        }
    }
}
