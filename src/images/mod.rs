//! # Image Catalog
//!
//! Static list of pre-uploaded CDN images offered by the image picker.
//! No store access and no mutation.

use serde::Serialize;

use crate::gateway::{
    log_outcome, new_request_id, GatewayRequest, GatewayResponse, HandlerError, HttpMethod,
};
use crate::observability::Timer;

/// Name used for this handler in log lines
pub const FUNCTION_NAME: &str = "images";

const ALLOWED_METHODS: &str = "GET, OPTIONS";

/// One pre-uploaded asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageAsset {
    pub url: &'static str,
    pub name: &'static str,
    pub size: u64,
    pub uploaded_at: &'static str,
}

pub const CATALOG: [ImageAsset; 3] = [
    ImageAsset {
        url: "https://cdn.poehali.dev/projects/86c96c3c-6cad-472d-8416-d5730424d827/files/f45eb1e5-e14b-4002-8c03-8564a5f5108e.jpg",
        name: "business-portrait.jpg",
        size: 152000,
        uploaded_at: "2025-10-25T04:00:00Z",
    },
    ImageAsset {
        url: "https://cdn.poehali.dev/projects/86c96c3c-6cad-472d-8416-d5730424d827/files/f3295b3f-a9ab-4d14-8f12-35003c4605be.jpg",
        name: "creative-artist.jpg",
        size: 148000,
        uploaded_at: "2025-10-25T04:00:01Z",
    },
    ImageAsset {
        url: "https://cdn.poehali.dev/projects/86c96c3c-6cad-472d-8416-d5730424d827/files/9dd6054f-df11-42dd-b672-fe63ec725401.jpg",
        name: "fashion-model.jpg",
        size: 145000,
        uploaded_at: "2025-10-25T04:00:02Z",
    },
];

#[derive(Serialize)]
struct ImagesPayload<'a> {
    images: &'a [ImageAsset],
}

/// Handler serving [`CATALOG`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCatalog;

impl ImageCatalog {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, request: &GatewayRequest) -> GatewayResponse {
        let timer = Timer::new();
        let request_id = new_request_id();
        let method = request.method();

        let response = match method {
            HttpMethod::Options => GatewayResponse::preflight(ALLOWED_METHODS),
            HttpMethod::Get => GatewayResponse::json(200, &ImagesPayload { images: &CATALOG }),
            _ => GatewayResponse::from(HandlerError::MethodNotAllowed),
        };

        log_outcome(FUNCTION_NAME, &request_id, &method, &response, &timer);
        response
    }
}
