//! Gallery and Image HTTP Routes
//!
//! Each route accepts any method, copies method, query string and body into a
//! [`GatewayRequest`], and returns the handler's envelope as the HTTP response.
//!
//! Requests axum cannot decode (query string, UTF-8, body limit) are still
//! answered with an envelope: a 500 `{"error": ...}` with the CORS headers.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, QueryRejection},
        Query, State,
    },
    http::Method,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};

use crate::gallery::{handler, GalleryHandler};
use crate::gateway::{
    log_outcome, new_request_id, GatewayRequest, GatewayResponse, HandlerError, HandlerResult,
    HttpMethod,
};
use crate::images::{self, ImageCatalog};
use crate::observability::Timer;

type QueryParts = Result<Query<HashMap<String, String>>, QueryRejection>;
type BodyBytes = Result<Bytes, BytesRejection>;

/// Create the `/gallery` route
pub fn gallery_routes(handler: GalleryHandler) -> Router {
    Router::new()
        .route("/gallery", any(gallery_handler))
        .with_state(handler)
}

/// Create the `/images` route
pub fn image_routes() -> Router {
    Router::new()
        .route("/images", any(images_handler))
        .with_state(ImageCatalog::new())
}

async fn gallery_handler(
    State(gallery): State<GalleryHandler>,
    method: Method,
    query: QueryParts,
    body: BodyBytes,
) -> Response {
    match to_envelope(&method, query, body) {
        Ok(request) => gallery.handle(&request).await.into_response(),
        Err(err) => rejected(handler::FUNCTION_NAME, &method, err),
    }
}

async fn images_handler(
    State(catalog): State<ImageCatalog>,
    method: Method,
    query: QueryParts,
    body: BodyBytes,
) -> Response {
    match to_envelope(&method, query, body) {
        Ok(request) => catalog.handle(&request).into_response(),
        Err(err) => rejected(images::FUNCTION_NAME, &method, err),
    }
}

/// Build the request envelope from extracted parts
fn to_envelope(
    method: &Method,
    query: QueryParts,
    body: BodyBytes,
) -> HandlerResult<GatewayRequest> {
    let Query(query) = query.map_err(|e| HandlerError::InvalidRequest(e.body_text()))?;
    let bytes = body.map_err(|e| HandlerError::InvalidRequest(e.body_text()))?;
    let body = String::from_utf8(bytes.to_vec()).map_err(|e| {
        HandlerError::InvalidRequest(format!("Request body is not valid UTF-8: {}", e))
    })?;

    Ok(GatewayRequest::from_parts(method.as_str(), query, body))
}

/// Answer a request that never reached a handler
fn rejected(function: &str, method: &Method, err: HandlerError) -> Response {
    let timer = Timer::new();
    let response = GatewayResponse::from(err);
    log_outcome(
        function,
        &new_request_id(),
        &HttpMethod::parse(method.as_str()),
        &response,
        &timer,
    );
    response.into_response()
}
