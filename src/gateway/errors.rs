//! # Handler Errors
//!
//! Error taxonomy shared by the handlers and its mapping onto the envelope.

use thiserror::Error;

use super::response::GatewayResponse;

/// Result type for handler operations
pub type HandlerResult<T> = Result<T, HandlerError>;

/// Handler errors
#[derive(Debug, Error)]
pub enum HandlerError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Required `id` query parameter absent or empty
    #[error("Missing id parameter")]
    MissingId,

    /// Method / `type` combination has no action
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// View counter requested for an item that does not exist
    #[error("Item {0} not found")]
    ItemNotFound(i32),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// `id` present but not an integer
    #[error("invalid input syntax for type integer: \"{0}\"")]
    InvalidId(String),

    /// Body was not valid JSON for the expected shape
    #[error("{0}")]
    InvalidBody(#[from] serde_json::Error),

    /// HTTP request could not be turned into an envelope
    #[error("{0}")]
    InvalidRequest(String),

    /// Store or any other runtime failure, message passed through as-is
    #[error("{0}")]
    Internal(String),
}

impl HandlerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::MissingId => 400,
            HandlerError::ItemNotFound(_) => 404,
            HandlerError::MethodNotAllowed => 405,

            HandlerError::InvalidId(_) => 500,
            HandlerError::InvalidBody(_) => 500,
            HandlerError::InvalidRequest(_) => 500,
            HandlerError::Internal(_) => 500,
        }
    }
}

impl From<HandlerError> for GatewayResponse {
    fn from(err: HandlerError) -> Self {
        let message = err.to_string();
        // the error key must never be an empty string
        let message = if message.is_empty() {
            "Internal error".to_string()
        } else {
            message
        };
        GatewayResponse::error(err.status_code(), &message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(HandlerError::MissingId.status_code(), 400);
        assert_eq!(HandlerError::ItemNotFound(3).status_code(), 404);
        assert_eq!(HandlerError::MethodNotAllowed.status_code(), 405);
        assert_eq!(HandlerError::InvalidId("x".into()).status_code(), 500);
        assert_eq!(HandlerError::InvalidRequest("bad".into()).status_code(), 500);
        assert_eq!(HandlerError::Internal("boom".into()).status_code(), 500);
    }

    #[test]
    fn test_missing_id_envelope() {
        let response = GatewayResponse::from(HandlerError::MissingId);
        assert_eq!(response.status_code, 400);
        assert_eq!(response.body, r#"{"error": "Missing id parameter"}"#);
    }

    #[test]
    fn test_invalid_id_message() {
        let err = HandlerError::InvalidId("abc".to_string());
        assert_eq!(
            err.to_string(),
            "invalid input syntax for type integer: \"abc\""
        );
    }

    #[test]
    fn test_empty_internal_message_is_replaced() {
        let response = GatewayResponse::from(HandlerError::Internal(String::new()));
        let body = response.json_body().unwrap();
        assert_eq!(body["error"], "Internal error");
    }
}
