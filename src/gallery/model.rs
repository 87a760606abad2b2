//! Gallery rows and insert payloads.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// Identifier type of `gallery_items` and `categories`
pub type ItemId = i32;

/// Category assigned to new profile items when the body does not name one
pub const DEFAULT_CATEGORY_ID: ItemId = 1;

/// A row from the profile layout listing (items left-joined with categories).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProfileItem {
    pub id: ItemId,
    pub image_url: String,
    pub name: String,
    pub bio: Option<String>,
    pub category_id: Option<ItemId>,
    pub telegram_username: Option<String>,
    pub views: i32,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    pub category_name: Option<String>,
    pub category_color: Option<String>,
}

/// A row from the basic layout `gallery_items` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BasicItem {
    pub id: ItemId,
    pub image_url: String,
    pub title: String,
    pub description: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// One listed item, shaped by the table layout it came from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GalleryEntry {
    Basic(BasicItem),
    Profile(ProfileItem),
}

/// A row from the `categories` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: ItemId,
    pub name: String,
    pub color: String,
}

/// POST body for the basic layout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewBasicItem {
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub title: String,
    /// Missing means empty text, explicit `null` stores NULL
    #[serde(default = "empty_text")]
    pub description: Option<String>,
}

/// POST body for the profile layout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewProfileItem {
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "empty_text")]
    pub bio: Option<String>,
    /// Missing means [`DEFAULT_CATEGORY_ID`], explicit `null` means no category
    #[serde(default = "default_category_id")]
    pub category_id: Option<ItemId>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub telegram_username: Option<String>,
}

/// Insert payload handed to a store
#[derive(Debug, Clone, PartialEq)]
pub enum NewItem {
    Basic(NewBasicItem),
    Profile(NewProfileItem),
}

fn empty_text() -> Option<String> {
    Some(String::new())
}

fn default_category_id() -> Option<ItemId> {
    Some(DEFAULT_CATEGORY_ID)
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
