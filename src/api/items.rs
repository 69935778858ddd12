//! Item endpoints (user-profile records). Reads are open; every mutation
//! passes the shared-secret access gate before validation runs.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;

use super::auth::require_api_key;
use super::errors::{ApiError, ApiResult};
use super::products::MessageResponse;
use super::server::AppState;
use super::validate::{CreateItem, PatchItem, ReplaceItem};
use crate::store::{parse_document_id, stamp_created_at, Filter};

/// Collection name for items
pub const COLLECTION: &str = "items";

#[derive(Debug, Serialize)]
pub struct ItemListResponse {
    pub count: usize,
    pub items: Vec<Value>,
}

/// Item routes, nested under `/api`
pub fn item_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route(
            "/items/:id",
            get(get_item)
                .put(replace_item)
                .patch(patch_item)
                .delete(delete_item),
        )
}

async fn list_items(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ItemListResponse>> {
    let items = state.store.find(COLLECTION, &Filter::new(), None, None)?;

    Ok(Json(ItemListResponse {
        count: items.len(),
        items,
    }))
}

async fn get_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_document_id(&id).ok_or(ApiError::InvalidId(id))?;

    let item = state
        .store
        .find_one(COLLECTION, &id)?
        .ok_or(ApiError::NotFound("Item"))?;

    Ok(Json(item))
}

async fn create_item(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    require_api_key(&headers, state.api_key.as_deref())?;

    let input: CreateItem = serde_json::from_value(body)
        .map_err(|e| ApiError::InvalidBody(e.to_string()))?;

    let mut doc = input.into_document()?;
    stamp_created_at(&mut doc);

    let id = state.store.insert_one(COLLECTION, doc.clone())?;
    if let Some(obj) = doc.as_object_mut() {
        obj.insert("id".to_string(), Value::String(id));
    }

    Ok((StatusCode::CREATED, Json(doc)))
}

/// PUT: full replace, every field of the item shape required
async fn replace_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> ApiResult<Json<MessageResponse>> {
    require_api_key(&headers, state.api_key.as_deref())?;

    let id = parse_document_id(&id).ok_or(ApiError::InvalidId(id))?;

    let input: ReplaceItem = serde_json::from_value(body)
        .map_err(|e| ApiError::InvalidBody(e.to_string()))?;
    let fields_to_set = input.into_document()?;

    let matched = state.store.update_one(COLLECTION, &id, fields_to_set)?;
    if matched == 0 {
        return Err(ApiError::NotFound("Item"));
    }

    Ok(Json(MessageResponse {
        message: "Item replaced",
    }))
}

/// PATCH: partial update, at least one field supplied
async fn patch_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> ApiResult<Json<MessageResponse>> {
    require_api_key(&headers, state.api_key.as_deref())?;

    let id = parse_document_id(&id).ok_or(ApiError::InvalidId(id))?;

    let input: PatchItem = serde_json::from_value(body)
        .map_err(|e| ApiError::InvalidBody(e.to_string()))?;
    let fields_to_set = input.into_fields_to_set()?;

    let matched = state.store.update_one(COLLECTION, &id, fields_to_set)?;
    if matched == 0 {
        return Err(ApiError::NotFound("Item"));
    }

    Ok(Json(MessageResponse {
        message: "Item updated",
    }))
}

async fn delete_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Json<MessageResponse>> {
    require_api_key(&headers, state.api_key.as_deref())?;

    let id = parse_document_id(&id).ok_or(ApiError::InvalidId(id))?;

    let deleted = state.store.delete_one(COLLECTION, &id)?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Item"));
    }

    Ok(Json(MessageResponse {
        message: "Item deleted",
    }))
}
