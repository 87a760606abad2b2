//! # Gallery Handler
//!
//! Routes a request envelope by method and `type` query parameter, runs one
//! store operation, and renders the response envelope.
//!
//! | Method  | `type`                | Action                     |
//! |---------|-----------------------|----------------------------|
//! | OPTIONS | any                   | CORS preflight, no store   |
//! | GET     | absent / `persons`    | list items                 |
//! | GET     | `categories`          | list categories (profile)  |
//! | GET     | `view`                | increment views (profile)  |
//! | POST    | any                   | insert item                |
//! | DELETE  | any                   | delete item by `id`        |
//!
//! The basic layout ignores `type` and always lists items on GET.

use std::sync::Arc;

use serde::Serialize;

use crate::gateway::{
    log_outcome, new_request_id, GatewayRequest, GatewayResponse, HandlerError, HandlerResult,
    HttpMethod,
};
use crate::observability::Timer;

use super::layout::ItemLayout;
use super::model::{Category, GalleryEntry, ItemId, NewItem};
use super::store::GalleryStore;

/// Name used for this handler in log lines
pub const FUNCTION_NAME: &str = "gallery";

#[derive(Debug, Serialize)]
struct ItemsPayload {
    items: Vec<GalleryEntry>,
}

#[derive(Debug, Serialize)]
struct CategoriesPayload {
    categories: Vec<Category>,
}

#[derive(Debug, Serialize)]
struct ViewsPayload {
    views: i32,
}

#[derive(Debug, Serialize)]
struct CreatedPayload {
    success: bool,
    id: ItemId,
}

#[derive(Debug, Serialize)]
struct SuccessPayload {
    success: bool,
}

/// What a GET request asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Listing {
    Persons,
    Categories,
    View,
}

impl Listing {
    fn from_request(layout: ItemLayout, request: &GatewayRequest) -> HandlerResult<Self> {
        if layout == ItemLayout::Basic {
            return Ok(Listing::Persons);
        }
        match request.query_param("type") {
            None | Some("persons") => Ok(Listing::Persons),
            Some("categories") => Ok(Listing::Categories),
            Some("view") => Ok(Listing::View),
            Some(_) => Err(HandlerError::MethodNotAllowed),
        }
    }
}

/// CRUD handler over a [`GalleryStore`]
#[derive(Clone)]
pub struct GalleryHandler {
    store: Arc<dyn GalleryStore>,
}

impl GalleryHandler {
    pub fn new(store: Arc<dyn GalleryStore>) -> Self {
        Self { store }
    }

    pub fn layout(&self) -> ItemLayout {
        self.store.layout()
    }

    /// Handle one request. Never fails: every error becomes an envelope.
    pub async fn handle(&self, request: &GatewayRequest) -> GatewayResponse {
        let timer = Timer::new();
        let request_id = new_request_id();
        let method = request.method();

        let response = match method {
            HttpMethod::Options => GatewayResponse::preflight(self.layout().allowed_methods()),
            _ => self
                .dispatch(&method, request)
                .await
                .unwrap_or_else(GatewayResponse::from),
        };

        log_outcome(FUNCTION_NAME, &request_id, &method, &response, &timer);
        response
    }

    async fn dispatch(
        &self,
        method: &HttpMethod,
        request: &GatewayRequest,
    ) -> HandlerResult<GatewayResponse> {
        match method {
            HttpMethod::Get => match Listing::from_request(self.layout(), request)? {
                Listing::Persons => self.list_items().await,
                Listing::Categories => self.list_categories().await,
                Listing::View => self.record_view(request).await,
            },
            HttpMethod::Post => self.create_item(request).await,
            HttpMethod::Delete => self.delete_item(request).await,
            _ => Err(HandlerError::MethodNotAllowed),
        }
    }

    async fn list_items(&self) -> HandlerResult<GatewayResponse> {
        let items = self.store.list_items().await?;
        Ok(GatewayResponse::json(200, &ItemsPayload { items }))
    }

    async fn list_categories(&self) -> HandlerResult<GatewayResponse> {
        let categories = self.store.list_categories().await?;
        Ok(GatewayResponse::json(200, &CategoriesPayload { categories }))
    }

    async fn record_view(&self, request: &GatewayRequest) -> HandlerResult<GatewayResponse> {
        let id = required_id(request)?;
        let views = self
            .store
            .record_view(id)
            .await?
            .ok_or(HandlerError::ItemNotFound(id))?;
        Ok(GatewayResponse::json(200, &ViewsPayload { views }))
    }

    async fn create_item(&self, request: &GatewayRequest) -> HandlerResult<GatewayResponse> {
        let item = match self.layout() {
            ItemLayout::Basic => NewItem::Basic(request.json_body()?),
            ItemLayout::Profile => NewItem::Profile(request.json_body()?),
        };
        let id = self.store.insert_item(item).await?;
        Ok(GatewayResponse::json(201, &CreatedPayload { success: true, id }))
    }

    /// Deleting an id that does not exist still succeeds
    async fn delete_item(&self, request: &GatewayRequest) -> HandlerResult<GatewayResponse> {
        let id = required_id(request)?;
        self.store.delete_item(id).await?;
        Ok(GatewayResponse::json(200, &SuccessPayload { success: true }))
    }
}

/// Read the `id` query parameter. Absent or empty is a client error; anything
/// that is not an integer is rejected the way the database would reject it.
fn required_id(request: &GatewayRequest) -> HandlerResult<ItemId> {
    let raw = request
        .query_param("id")
        .filter(|value| !value.is_empty())
        .ok_or(HandlerError::MissingId)?;

    raw.trim()
        .parse()
        .map_err(|_| HandlerError::InvalidId(raw.to_string()))
}
