//! # Gallery Store
//!
//! Storage seam for the gallery handler. Each operation is one statement
//! against the backing store.

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use crate::gateway::HandlerError;

use super::layout::ItemLayout;
use super::model::{Category, GalleryEntry, ItemId, NewItem};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Boxed future returned by [`GalleryStore`] operations
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = StoreResult<T>> + Send + 'a>>;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Error reported by the database driver
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    /// Operation has no table behind it in this layout
    #[error("{operation} is not available for the {layout} layout")]
    Unsupported {
        operation: &'static str,
        layout: ItemLayout,
    },

    /// Insert payload shaped for a different layout
    #[error("item shape does not match the {0} layout")]
    ShapeMismatch(ItemLayout),

    #[error("{0}")]
    Internal(String),
}

impl From<StoreError> for HandlerError {
    fn from(err: StoreError) -> Self {
        HandlerError::Internal(err.to_string())
    }
}

/// Trait for gallery persistence
pub trait GalleryStore: Send + Sync {
    /// Layout of the tables this store reads and writes
    fn layout(&self) -> ItemLayout;

    /// All items, newest first
    fn list_items(&self) -> StoreFuture<'_, Vec<GalleryEntry>>;

    /// All categories by ascending id
    fn list_categories(&self) -> StoreFuture<'_, Vec<Category>>;

    /// Atomically increment the view counter.
    ///
    /// Returns the post-increment value, or `None` if no item has this id.
    fn record_view(&self, id: ItemId) -> StoreFuture<'_, Option<i32>>;

    /// Insert an item, returning its generated id
    fn insert_item(&self, item: NewItem) -> StoreFuture<'_, ItemId>;

    /// Delete an item, returning the number of rows removed
    fn delete_item(&self, id: ItemId) -> StoreFuture<'_, u64>;
}
