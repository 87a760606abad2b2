//! In-memory gallery store
//!
//! Mirrors the PostgreSQL store's statement semantics (generated ids,
//! store-assigned timestamps, left join on categories, atomic view counter)
//! without a database. Used by tests and by `--in-memory` runs.

use std::sync::RwLock;

use chrono::{NaiveDateTime, Utc};

use super::layout::ItemLayout;
use super::model::{BasicItem, Category, GalleryEntry, ItemId, NewItem, ProfileItem};
use super::store::{GalleryStore, StoreError, StoreFuture, StoreResult};

#[derive(Debug, Default)]
struct Tables {
    items: Vec<StoredItem>,
    categories: Vec<Category>,
    last_id: ItemId,
}

#[derive(Debug, Clone)]
struct StoredItem {
    id: ItemId,
    image_url: String,
    name: String,
    bio: Option<String>,
    category_id: Option<ItemId>,
    telegram_username: Option<String>,
    views: i32,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct InMemoryGalleryStore {
    layout: ItemLayout,
    tables: RwLock<Tables>,
}

impl InMemoryGalleryStore {
    pub fn new(layout: ItemLayout) -> Self {
        Self {
            layout,
            tables: RwLock::new(Tables::default()),
        }
    }

    /// Seed the categories table
    pub fn with_categories(self, categories: Vec<Category>) -> Self {
        if let Ok(mut tables) = self.tables.write() {
            tables.categories = categories;
            tables.categories.sort_by_key(|c| c.id);
        }
        self
    }

    /// Stored view counter for an item, if it exists
    pub fn views(&self, id: ItemId) -> Option<i32> {
        let tables = self.tables.read().ok()?;
        tables.items.iter().find(|i| i.id == id).map(|i| i.views)
    }

    fn read_tables(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| StoreError::Internal("Lock poisoned".to_string()))
    }

    fn write_tables(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| StoreError::Internal("Lock poisoned".to_string()))
    }

    fn to_entry(&self, item: &StoredItem, categories: &[Category]) -> GalleryEntry {
        match self.layout {
            ItemLayout::Basic => GalleryEntry::Basic(BasicItem {
                id: item.id,
                image_url: item.image_url.clone(),
                title: item.name.clone(),
                description: item.bio.clone(),
                created_at: Some(item.created_at),
                updated_at: Some(item.updated_at),
            }),
            ItemLayout::Profile => {
                let category = item
                    .category_id
                    .and_then(|id| categories.iter().find(|c| c.id == id));
                GalleryEntry::Profile(ProfileItem {
                    id: item.id,
                    image_url: item.image_url.clone(),
                    name: item.name.clone(),
                    bio: item.bio.clone(),
                    category_id: item.category_id,
                    telegram_username: item.telegram_username.clone(),
                    views: item.views,
                    created_at: Some(item.created_at),
                    updated_at: Some(item.updated_at),
                    category_name: category.map(|c| c.name.clone()),
                    category_color: category.map(|c| c.color.clone()),
                })
            }
        }
    }

    fn list_items_now(&self) -> StoreResult<Vec<GalleryEntry>> {
        let tables = self.read_tables()?;

        let mut items: Vec<&StoredItem> = tables.items.iter().collect();
        items.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(items
            .into_iter()
            .map(|item| self.to_entry(item, &tables.categories))
            .collect())
    }

    fn insert_now(&self, item: NewItem) -> StoreResult<ItemId> {
        let mut tables = self.write_tables()?;
        let now = Utc::now().naive_utc();
        let id = tables.last_id.checked_add(1).ok_or_else(out_of_range)?;

        let stored = match (self.layout, item) {
            (ItemLayout::Basic, NewItem::Basic(item)) => StoredItem {
                id,
                image_url: item.image_url,
                name: item.title,
                bio: item.description,
                category_id: None,
                telegram_username: None,
                views: 0,
                created_at: now,
                updated_at: now,
            },
            (ItemLayout::Profile, NewItem::Profile(item)) => StoredItem {
                id,
                image_url: item.image_url,
                name: item.name,
                bio: item.bio,
                category_id: item.category_id,
                telegram_username: item.telegram_username,
                views: 0,
                created_at: now,
                updated_at: now,
            },
            (layout, _) => return Err(StoreError::ShapeMismatch(layout)),
        };

        tables.last_id = id;
        tables.items.push(stored);
        Ok(id)
    }

    fn record_view_now(&self, id: ItemId) -> StoreResult<Option<i32>> {
        if self.layout != ItemLayout::Profile {
            return Err(StoreError::Unsupported {
                operation: "record_view",
                layout: self.layout,
            });
        }

        let mut tables = self.write_tables()?;
        match tables.items.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                item.views = item.views.checked_add(1).ok_or_else(out_of_range)?;
                Ok(Some(item.views))
            }
            None => Ok(None),
        }
    }
}

/// Same failure PostgreSQL reports when an `integer` column overflows
fn out_of_range() -> StoreError {
    StoreError::Internal("integer out of range".to_string())
}

impl GalleryStore for InMemoryGalleryStore {
    fn layout(&self) -> ItemLayout {
        self.layout
    }

    fn list_items(&self) -> StoreFuture<'_, Vec<GalleryEntry>> {
        let result = self.list_items_now();
        Box::pin(async move { result })
    }

    fn list_categories(&self) -> StoreFuture<'_, Vec<Category>> {
        let result = if self.layout == ItemLayout::Profile {
            self.read_tables().map(|tables| tables.categories.clone())
        } else {
            Err(StoreError::Unsupported {
                operation: "list_categories",
                layout: self.layout,
            })
        };
        Box::pin(async move { result })
    }

    fn record_view(&self, id: ItemId) -> StoreFuture<'_, Option<i32>> {
        let result = self.record_view_now(id);
        Box::pin(async move { result })
    }

    fn insert_item(&self, item: NewItem) -> StoreFuture<'_, ItemId> {
        let result = self.insert_now(item);
        Box::pin(async move { result })
    }

    fn delete_item(&self, id: ItemId) -> StoreFuture<'_, u64> {
        let result = self.write_tables().map(|mut tables| {
            let before = tables.items.len();
            tables.items.retain(|i| i.id != id);
            (before - tables.items.len()) as u64
        });
        Box::pin(async move { result })
    }
}
