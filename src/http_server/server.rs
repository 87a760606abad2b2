//! # HTTP Server
//!
//! Axum server exposing the gallery handler, the image catalog and a health
//! check. CORS headers come from the handlers' envelopes, not from a layer.

use std::io;
use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

use crate::gallery::GalleryHandler;
use crate::observability::Logger;

use super::config::HttpServerConfig;
use super::gallery_routes::{gallery_routes, image_routes};
use super::observability_routes::health_routes;

pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    pub fn new(config: HttpServerConfig, gallery: GalleryHandler) -> Self {
        let router = Self::build_router(gallery);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    pub fn build_router(gallery: GalleryHandler) -> Router {
        Router::new()
            .merge(health_routes())
            .merge(gallery_routes(gallery))
            .merge(image_routes())
    }

    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process is stopped
    pub async fn start(self) -> Result<(), io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid socket address '{}': {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        let local = listener.local_addr()?.to_string();
        Logger::info(
            "SERVER_STARTED",
            &[("addr", &local), ("routes", "/gallery,/images,/health")],
        );

        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::gallery::{InMemoryGalleryStore, ItemLayout};

    fn gallery() -> GalleryHandler {
        GalleryHandler::new(Arc::new(InMemoryGalleryStore::new(ItemLayout::Profile)))
    }

    #[test]
    fn test_server_creation() {
        let server = HttpServer::new(HttpServerConfig::default(), gallery());
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_router_builds() {
        let config = HttpServerConfig {
            port: 9090,
            ..Default::default()
        };
        let server = HttpServer::new(config, gallery());
        let _router = server.router();
    }

    #[tokio::test]
    async fn test_invalid_address_is_error() {
        let config = HttpServerConfig {
            host: "not an address".to_string(),
            port: 8080,
        };
        let err = HttpServer::new(config, gallery()).start().await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
