//! Product endpoints: list with query translation, get, create, update,
//! delete. No access gate on this collection.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;

use super::errors::{ApiError, ApiResult};
use super::query::ListQuery;
use super::server::AppState;
use super::validate::{CreateProduct, UpdateProduct};
use crate::store::{parse_document_id, stamp_created_at};

/// Collection name for products
pub const COLLECTION: &str = "products";

/// Listing response: matching records plus the returned count
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub count: usize,
    pub products: Vec<Value>,
}

/// Mutation acknowledgement
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Product routes, nested under `/api`
pub fn product_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

async fn list_products(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ProductListResponse>> {
    let query = ListQuery::parse(&params)?;

    let products = state.store.find(
        COLLECTION,
        &query.filter,
        query.sort.as_ref(),
        query.projection.as_ref(),
    )?;

    Ok(Json(ProductListResponse {
        count: products.len(),
        products,
    }))
}

async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_document_id(&id).ok_or(ApiError::InvalidId(id))?;

    let product = state
        .store
        .find_one(COLLECTION, &id)?
        .ok_or(ApiError::NotFound("Product"))?;

    Ok(Json(product))
}

async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let input: CreateProduct = serde_json::from_value(body)
        .map_err(|e| ApiError::InvalidBody(e.to_string()))?;

    let mut doc = input.into_document()?;
    stamp_created_at(&mut doc);

    let id = state.store.insert_one(COLLECTION, doc.clone())?;
    if let Some(obj) = doc.as_object_mut() {
        obj.insert("id".to_string(), Value::String(id));
    }

    Ok((StatusCode::CREATED, Json(doc)))
}

async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_document_id(&id).ok_or(ApiError::InvalidId(id))?;

    let input: UpdateProduct = serde_json::from_value(body)
        .map_err(|e| ApiError::InvalidBody(e.to_string()))?;
    let fields_to_set = input.into_fields_to_set()?;

    let matched = state.store.update_one(COLLECTION, &id, fields_to_set)?;
    if matched == 0 {
        return Err(ApiError::NotFound("Product"));
    }

    Ok(Json(MessageResponse {
        message: "Product updated",
    }))
}

async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_document_id(&id).ok_or(ApiError::InvalidId(id))?;

    let deleted = state.store.delete_one(COLLECTION, &id)?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Product"));
    }

    Ok(Json(MessageResponse {
        message: "Product deleted",
    }))
}
