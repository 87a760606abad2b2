//! # Gateway Envelope
//!
//! Every handler in this crate speaks the same HTTP-shaped envelope:
//!
//! - [`GatewayRequest`]: `{httpMethod, queryStringParameters, body}`
//! - [`GatewayResponse`]: `{statusCode, headers, body, isBase64Encoded}`
//!
//! The HTTP server and the `invoke` CLI command both translate into and out of
//! these types, so handler behavior is identical on either surface.

pub mod errors;
pub mod json;
pub mod request;
pub mod response;

pub use errors::{HandlerError, HandlerResult};
pub use request::{GatewayRequest, HttpMethod};
pub use response::GatewayResponse;

use uuid::Uuid;

use crate::observability::{Logger, Timer};

/// Fresh correlation id for one handled request
pub fn new_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Emit the per-request log line for a finished envelope.
///
/// Server errors are logged at ERROR level with the error text from the body.
pub fn log_outcome(
    function: &str,
    request_id: &str,
    method: &HttpMethod,
    response: &GatewayResponse,
    timer: &Timer,
) {
    let status = response.status_code.to_string();
    let duration = timer.elapsed_ms();

    if response.status_code >= 500 {
        let error = response
            .json_body()
            .ok()
            .and_then(|body| body.get("error").and_then(|e| e.as_str()).map(String::from))
            .unwrap_or_default();
        Logger::error(
            "REQUEST_FAILED",
            &[
                ("function", function),
                ("request_id", request_id),
                ("method", method.as_str()),
                ("status", &status),
                ("duration_ms", &duration),
                ("error", &error),
            ],
        );
    } else {
        Logger::info(
            "REQUEST_COMPLETE",
            &[
                ("function", function),
                ("request_id", request_id),
                ("method", method.as_str()),
                ("status", &status),
                ("duration_ms", &duration),
            ],
        );
    }
}
