//! # Gallery Module
//!
//! CRUD handler for gallery items and their categories.
//!
//! One handler serves both table layouts (see [`layout`]); persistence sits
//! behind the [`GalleryStore`] trait with a PostgreSQL implementation and an
//! in-memory one.

pub mod handler;
pub mod layout;
pub mod memory;
pub mod model;
pub mod postgres;
pub mod store;

pub use handler::GalleryHandler;
pub use layout::{ItemLayout, LayoutError, SchemaName, TableLayout};
pub use memory::InMemoryGalleryStore;
pub use model::{BasicItem, Category, GalleryEntry, ItemId, NewItem, ProfileItem};
pub use postgres::{PgGalleryStore, PoolSettings};
pub use store::{GalleryStore, StoreError, StoreResult};
