//! # HTTP Server Module
//!
//! Serves the envelope handlers over real HTTP with Axum.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/gallery` - Gallery CRUD handler (any method)
//! - `/images` - Static image catalog (any method)

pub mod config;
pub mod gallery_routes;
pub mod observability_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;
