//! gallery-api - CRUD handlers for a people/photo gallery
//!
//! Handlers take an HTTP-shaped request envelope and return a response
//! envelope; they are served over HTTP by [`http_server`] or run one-shot
//! from the [`cli`].

pub mod cli;
pub mod config;
pub mod gallery;
pub mod gateway;
pub mod http_server;
pub mod images;
pub mod observability;
