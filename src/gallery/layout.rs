//! # Table Layout
//!
//! The gallery handler runs against one of two table layouts:
//!
//! - `basic`: unqualified `gallery_items(image_url, title, description)`
//! - `profile`: schema-qualified `gallery_items` with name, bio, category,
//!   contact handle and view counter, plus a `categories` table
//!
//! All SQL text is assembled once here. Values are always bound as
//! parameters; the only text spliced in is a validated, quoted schema name
//! and the table name constants below.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ITEMS_TABLE: &str = "gallery_items";
pub const CATEGORIES_TABLE: &str = "categories";

/// Schema used by the profile layout unless configured otherwise
pub const DEFAULT_SCHEMA: &str = "gallery";

/// PostgreSQL truncates identifiers beyond this length
const MAX_IDENTIFIER_LEN: usize = 63;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("invalid schema name '{0}': expected [A-Za-z_][A-Za-z0-9_]*, at most 63 characters")]
    InvalidSchemaName(String),
}

/// Which item shape the tables hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemLayout {
    Basic,
    Profile,
}

impl ItemLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemLayout::Basic => "basic",
            ItemLayout::Profile => "profile",
        }
    }

    /// Methods advertised in the CORS preflight answer
    pub fn allowed_methods(&self) -> &'static str {
        match self {
            ItemLayout::Basic => "GET, POST, DELETE, OPTIONS",
            // PUT is advertised but has no action behind it
            ItemLayout::Profile => "GET, POST, PUT, DELETE, OPTIONS",
        }
    }
}

impl fmt::Display for ItemLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated SQL schema identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaName(String);

impl SchemaName {
    pub fn new(name: impl Into<String>) -> Result<Self, LayoutError> {
        let name = name.into();
        if is_identifier(&name) {
            Ok(Self(name))
        } else {
            Err(LayoutError::InvalidSchemaName(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn quoted(&self) -> String {
        format!("\"{}\"", self.0)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let first_ok = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
    first_ok
        && name.len() <= MAX_IDENTIFIER_LEN
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Item layout plus the schema its tables live in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    variant: ItemLayout,
    schema: Option<SchemaName>,
}

impl TableLayout {
    /// Unqualified tables with the title/description shape
    pub fn basic() -> Self {
        Self {
            variant: ItemLayout::Basic,
            schema: None,
        }
    }

    /// Schema-qualified tables with the category-aware shape
    pub fn profile(schema: SchemaName) -> Self {
        Self {
            variant: ItemLayout::Profile,
            schema: Some(schema),
        }
    }

    pub fn variant(&self) -> ItemLayout {
        self.variant
    }

    fn table(&self, name: &'static str) -> String {
        match &self.schema {
            Some(schema) => format!("{}.\"{}\"", schema.quoted(), name),
            None => name.to_string(),
        }
    }

    /// Build the statement set for this layout
    pub fn statements(&self) -> Statements {
        let items = self.table(ITEMS_TABLE);

        match self.variant {
            ItemLayout::Basic => Statements {
                list_items: format!(
                    "SELECT id, image_url, title, description, {created}, {updated} \
                     FROM {items} ORDER BY created_at DESC, id DESC",
                    created = as_timestamp("created_at"),
                    updated = as_timestamp("updated_at"),
                ),
                list_categories: None,
                record_view: None,
                insert_item: format!(
                    "INSERT INTO {items} (image_url, title, description) \
                     VALUES ($1, $2, $3) RETURNING id"
                ),
                delete_item: format!("DELETE FROM {items} WHERE id = $1"),
            },
            ItemLayout::Profile => {
                let categories = self.table(CATEGORIES_TABLE);
                Statements {
                    list_items: format!(
                        "SELECT g.id, g.image_url, g.name, g.bio, g.category_id, \
                         g.telegram_username, g.views, {created}, {updated}, \
                         c.name AS category_name, c.color AS category_color \
                         FROM {items} g LEFT JOIN {categories} c ON g.category_id = c.id \
                         ORDER BY g.created_at DESC, g.id DESC",
                        created = as_timestamp("g.created_at"),
                        updated = as_timestamp("g.updated_at"),
                    ),
                    list_categories: Some(format!(
                        "SELECT id, name, color FROM {categories} ORDER BY id ASC"
                    )),
                    record_view: Some(format!(
                        "UPDATE {items} SET views = views + 1 WHERE id = $1 RETURNING views"
                    )),
                    insert_item: format!(
                        "INSERT INTO {items} (image_url, name, bio, category_id, telegram_username) \
                         VALUES ($1, $2, $3, $4, $5) RETURNING id"
                    ),
                    delete_item: format!("DELETE FROM {items} WHERE id = $1"),
                }
            }
        }
    }
}

/// Select a timestamp column as `timestamp without time zone`, so rows decode
/// the same whether the column is `TIMESTAMP` or `TIMESTAMPTZ`
fn as_timestamp(column: &str) -> String {
    let alias = column.rsplit('.').next().unwrap_or(column);
    format!("{column}::timestamp AS {alias}")
}

/// Prepared SQL text for one layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statements {
    pub list_items: String,
    pub list_categories: Option<String>,
    pub record_view: Option<String>,
    pub insert_item: String,
    pub delete_item: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_name_validation() {
        assert!(SchemaName::new("gallery").is_ok());
        assert!(SchemaName::new("_t_p123_fame").is_ok());
        assert!(SchemaName::new("").is_err());
        assert!(SchemaName::new("1abc").is_err());
        assert!(SchemaName::new("public; DROP TABLE x").is_err());
        assert!(SchemaName::new("a\"b").is_err());
        assert!(SchemaName::new("a".repeat(64)).is_err());
    }

    #[test]
    fn test_basic_statements_are_unqualified() {
        let statements = TableLayout::basic().statements();
        assert!(statements.list_items.contains("FROM gallery_items ORDER BY created_at DESC"));
        assert!(statements.list_categories.is_none());
        assert!(statements.record_view.is_none());
        assert!(statements.insert_item.contains("(image_url, title, description)"));
    }

    #[test]
    fn test_profile_statements_are_qualified() {
        let schema = SchemaName::new("fame").unwrap();
        let statements = TableLayout::profile(schema).statements();

        assert!(statements
            .list_items
            .contains("FROM \"fame\".\"gallery_items\" g LEFT JOIN \"fame\".\"categories\" c"));
        assert_eq!(
            statements.list_categories.as_deref(),
            Some("SELECT id, name, color FROM \"fame\".\"categories\" ORDER BY id ASC")
        );
        assert!(statements
            .record_view
            .as_deref()
            .unwrap()
            .contains("SET views = views + 1 WHERE id = $1 RETURNING views"));
        assert_eq!(
            statements.delete_item,
            "DELETE FROM \"fame\".\"gallery_items\" WHERE id = $1"
        );
    }

    #[test]
    fn test_timestamps_selected_without_zone() {
        let basic = TableLayout::basic().statements();
        assert!(basic.list_items.contains("created_at::timestamp AS created_at"));
        assert!(basic.list_items.contains("updated_at::timestamp AS updated_at"));

        let profile = TableLayout::profile(SchemaName::new("fame").unwrap()).statements();
        assert!(profile.list_items.contains("g.created_at::timestamp AS created_at"));
        assert!(profile.list_items.contains("g.updated_at::timestamp AS updated_at"));
        assert!(profile.list_items.contains("ORDER BY g.created_at DESC, g.id DESC"));
    }

    #[test]
    fn test_values_are_parameters() {
        let schema = SchemaName::new("fame").unwrap();
        let statements = TableLayout::profile(schema).statements();
        assert!(statements.insert_item.ends_with("VALUES ($1, $2, $3, $4, $5) RETURNING id"));
    }

    #[test]
    fn test_allowed_methods() {
        assert_eq!(ItemLayout::Basic.allowed_methods(), "GET, POST, DELETE, OPTIONS");
        assert!(ItemLayout::Profile.allowed_methods().contains("PUT"));
    }

    #[test]
    fn test_layout_serde_names() {
        let layout: ItemLayout = serde_json::from_str("\"basic\"").unwrap();
        assert_eq!(layout, ItemLayout::Basic);
        assert_eq!(serde_json::to_string(&ItemLayout::Profile).unwrap(), "\"profile\"");
    }
}
